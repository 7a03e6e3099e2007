//! Shared fixtures for the dashboard integration tests.
//!
//! Writes small order exports to temporary CSV files shaped like the real
//! `main_data.csv` (one row per order line item).

use std::io::Write;
use tempfile::NamedTempFile;

pub const FULL_HEADER: &str =
    "order_id,customer_id,order_purchase_timestamp,price,payment_value,product_category_name_english";

/// Three line items over two days, two categories.
pub const SAMPLE_ROWS: &[&str] = &[
    "e481f51cbdc54678b7cc49136f2d6af7,c1,2018-08-01 10:56:33,29.99,38.71,housewares",
    "53cdb2fc8bc7dce0b6741e2150273451,c2,2018-08-01 20:41:37,118.70,141.46,perfumery",
    "47770eb9100c2d0c44946d9cf07ec65d,c3,2018-08-02 08:38:49,159.90,179.12,housewares",
];

/// Write `header` and `rows` to a fresh temporary CSV file.
///
/// The caller must keep the returned handle alive while the file is read.
pub fn write_csv(header: &str, rows: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

pub fn sample_csv() -> NamedTempFile {
    write_csv(FULL_HEADER, SAMPLE_ROWS)
}
