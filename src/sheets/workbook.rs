//! xlsx 读写

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::{Format, Workbook};

use super::{CellValue, SheetError, SheetGrid};
use crate::errors::Result;

fn to_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) => CellValue::from_text(s),
        other => CellValue::from_text(other.to_string()),
    }
}

/// 读取指定工作表
///
/// calamine 的区域从第一个非空单元格开始，这里按起始偏移补齐空行空列，
/// 使网格下标与文件中的行列位置一致。
pub fn parse_xlsx(data: &[u8], worksheet: &str) -> std::result::Result<SheetGrid, SheetError> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| SheetError::ParseFailed(format!("打开 XLSX 失败: {e}")))?;

    if !workbook.sheet_names().iter().any(|name| name == worksheet) {
        return Err(SheetError::MissingWorksheet(worksheet.to_string()));
    }

    let range = workbook
        .worksheet_range(worksheet)
        .map_err(|e| SheetError::ParseFailed(format!("读取工作表失败: {e}")))?;

    let Some((start_row, start_col)) = range.start() else {
        return Ok(SheetGrid::default());
    };

    let mut rows: Vec<Vec<CellValue>> = (0..start_row).map(|_| Vec::new()).collect();
    for row in range.rows() {
        let mut cells: Vec<CellValue> = (0..start_col).map(|_| CellValue::Empty).collect();
        cells.extend(row.iter().map(to_cell));
        rows.push(cells);
    }

    Ok(SheetGrid::new(rows))
}

/// 写入单工作表的 xlsx，首行为加粗表头
pub fn write_xlsx(worksheet: &str, headers: &[String], rows: &[Vec<CellValue>]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let sheet = workbook.add_worksheet().set_name(worksheet)?;

    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, header, &header_format)?;
        sheet.set_column_width(col as u16, 18)?;
    }

    for (row_idx, row) in rows.iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    sheet.write_string(excel_row, col as u16, s)?;
                }
                CellValue::Number(n) => {
                    sheet.write_number(excel_row, col as u16, *n)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
