//! Record table widget
//! Scrollable table over every column of the loaded file; only visible rows are laid out.

use crate::data::RecordTable;
use egui::{Layout, RichText, ScrollArea};
use egui_extras::{Column, TableBuilder};

const COL_WIDTH: f32 = 110.0;
const MIN_COL_WIDTH: f32 = 40.0;

pub fn show_records(
    ui: &mut egui::Ui,
    id: &str,
    table: &RecordTable,
    row_height: f32,
    max_height: f32,
) {
    if table.is_empty() {
        ui.label(RichText::new("No rows").italics());
        return;
    }

    let columns = table.column_names();
    let records = table.records();

    // Header and body share one table, so they scroll sideways together.
    ScrollArea::horizontal()
        .id_salt(format!("{id}_hscroll"))
        .show(ui, |ui| {
            TableBuilder::new(ui)
                .id_salt(id)
                .striped(true)
                .resizable(true)
                .cell_layout(Layout::left_to_right(egui::Align::Center))
                .column(Column::auto().at_least(MIN_COL_WIDTH))
                .columns(
                    Column::initial(COL_WIDTH).at_least(MIN_COL_WIDTH).clip(true),
                    columns.len(),
                )
                .min_scrolled_height(0.0)
                .max_scroll_height(max_height)
                .header(row_height + 4.0, |mut header| {
                    header.col(|ui| {
                        ui.label(RichText::new("#").strong().size(11.0));
                    });
                    for name in columns {
                        header.col(|ui| {
                            ui.add(egui::Label::new(RichText::new(name).strong().size(11.0)).truncate());
                        });
                    }
                })
                .body(|body| {
                    body.rows(row_height, records.len(), |mut row| {
                        let idx = row.index();
                        let record = &records[idx];
                        row.col(|ui| {
                            ui.label(RichText::new(idx.to_string()).size(11.0).weak());
                        });
                        for col in 0..columns.len() {
                            let text = record.cells.get(col).map(String::as_str).unwrap_or("");
                            row.col(|ui| {
                                ui.add(egui::Label::new(RichText::new(text).size(11.0)).truncate());
                            });
                        }
                    });
                });
        });
}
