use anyhow::Result;
use polars::prelude::*;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::path::Path;

/// Writes the summary sheet followed by one sheet per fund, named by
/// ticker. Header row from column names; numbers as numeric cells, nulls
/// as blank cells.
pub fn write_workbook(
    path: &Path,
    summary: &DataFrame,
    fund_tables: &[(String, DataFrame)],
) -> Result<()> {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Summary")?;
    write_sheet(sheet, summary)?;

    for (ticker, df) in fund_tables {
        let sheet = workbook.add_worksheet();
        sheet.set_name(ticker)?;
        write_sheet(sheet, df)?;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_sheet(sheet: &mut Worksheet, df: &DataFrame) -> Result<()> {
    for (col_idx, column) in df.get_columns().iter().enumerate() {
        let col = col_idx as u16;
        sheet.write_string(0, col, column.name().as_str())?;

        let series = column.as_materialized_series();
        for row_idx in 0..series.len() {
            let row = row_idx as u32 + 1;
            match series.get(row_idx)? {
                AnyValue::Null => {}
                AnyValue::Float64(v) => {
                    sheet.write_number(row, col, v)?;
                }
                AnyValue::String(s) => {
                    sheet.write_string(row, col, s)?;
                }
                AnyValue::StringOwned(s) => {
                    sheet.write_string(row, col, s.as_str())?;
                }
                other => {
                    sheet.write_string(row, col, format!("{:?}", other))?;
                }
            }
        }
    }
    Ok(())
}
