use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::model::form_to_string;
use crate::seasons::Season;
use crate::styling::{StylingRule, cell_highlight};
use crate::table_view::{TableColumn, TableView};

/// Writes one season's table to a workbook, with each cell coloured by the
/// highlight it resolves to under `rules`.
pub fn export_table_xlsx(
    path: &Path,
    season: &Season,
    view: &TableView,
    rules: &[StylingRule],
) -> Result<()> {
    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(season.to_string())?;
        write_table(sheet, view, rules)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;
    Ok(())
}

fn write_table(sheet: &mut Worksheet, view: &TableView, rules: &[StylingRule]) -> Result<()> {
    let header = Format::new().set_bold();
    for (col_idx, meta) in view.columns.iter().enumerate() {
        sheet
            .write_string_with_format(0, col_idx as u16, meta.header, &header)
            .with_context(|| format!("write header {}", meta.header))?;
    }

    for (row_idx, row) in view.rows.iter().enumerate() {
        let r = row_idx as u32 + 1;
        for (col_idx, meta) in view.columns.iter().enumerate() {
            let c = col_idx as u16;
            let written = match meta.column {
                TableColumn::Club => sheet.write_string(r, c, &row.club.name),
                TableColumn::Form => sheet.write_string(r, c, form_to_string(&row.form)),
                column => {
                    let value = row.value(column).unwrap_or_default();
                    match cell_highlight(rules, column, value) {
                        Some(hl) => {
                            let fill = Format::new().set_background_color(Color::RGB(hl.rgb()));
                            sheet.write_number_with_format(r, c, value as f64, &fill)
                        }
                        None => sheet.write_number(r, c, value as f64),
                    }
                }
            };
            written.with_context(|| format!("write cell ({r},{c})"))?;
        }
    }
    Ok(())
}
