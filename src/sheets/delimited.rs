//! csv 读取

use std::io::Cursor;

use super::{CellValue, SheetError, SheetGrid};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 读取 csv，不区分表头与数据，空白单元格视为空
///
/// csv 解析器会跳过空行，这里先按记录切分，空行保留为空行，
/// 使空行同样能作为数据区的结束标记，行号也与文件一致。
pub fn parse_csv(data: &[u8]) -> Result<SheetGrid, SheetError> {
    let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);

    let mut rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, line) in split_records(data).into_iter().enumerate() {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            rows.push(Vec::new());
            continue;
        }

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(Cursor::new(line));
        let cells = match rdr.records().next() {
            Some(record) => record
                .map_err(|e| SheetError::ParseFailed(format!("第 {} 行解析失败: {e}", idx + 1)))?
                .iter()
                .map(CellValue::from_text)
                .collect(),
            None => Vec::new(),
        };
        rows.push(cells);
    }

    Ok(SheetGrid::new(rows))
}

/// 按记录结束符切分，引号字段内的换行不切分
///
/// 只有位于字段开头的引号才开启引号字段，字段中间的引号按普通字符处理，
/// 与 csv 解析器的规则一致。
fn split_records(data: &[u8]) -> Vec<&[u8]> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut at_field_start = true;

    let mut i = 0;
    while i < data.len() {
        let byte = data[i];
        if in_quotes {
            if byte == b'"' {
                if data.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
        } else {
            match byte {
                b'"' if at_field_start => {
                    in_quotes = true;
                    at_field_start = false;
                }
                b',' => at_field_start = true,
                b'\n' => {
                    records.push(&data[start..i]);
                    start = i + 1;
                    at_field_start = true;
                }
                _ => at_field_start = false,
            }
        }
        i += 1;
    }
    if start < data.len() {
        records.push(&data[start..]);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_bom_and_ragged_rows() {
        let data = b"\xEF\xBB\xBFName,IdentifierNumber,Score\nAlice,S1,18\nBob,S2\n";
        let grid = parse_csv(data).unwrap();

        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[0][0], CellValue::Text("Name".into()));
        assert_eq!(grid.rows[2].len(), 2);
    }

    #[test]
    fn test_blank_cells_are_empty() {
        let grid = parse_csv(b"a, ,c\n,,\n").unwrap();
        assert_eq!(grid.rows[0][1], CellValue::Empty);
        assert!(grid.rows[1].iter().all(CellValue::is_blank));
    }

    #[test]
    fn test_empty_lines_are_kept() {
        let grid = parse_csv(b"h1,h2\nA,1\n\nB,2\n").unwrap();
        assert_eq!(grid.rows.len(), 4);
        assert!(grid.rows[2].is_empty());
        assert_eq!(grid.rows[3][0].as_text(), "B");
    }

    #[test]
    fn test_crlf_empty_lines_are_kept() {
        let grid = parse_csv(b"h1,h2\r\nA,1\r\n\r\nB,2\r\n").unwrap();
        assert_eq!(grid.rows.len(), 4);
        assert!(grid.rows[2].is_empty());
        assert_eq!(grid.rows[3][0].as_text(), "B");
    }

    #[test]
    fn test_leading_empty_lines_shift_rows() {
        let grid = parse_csv(b"\n\nh1,h2\nA,1\n").unwrap();
        assert_eq!(grid.rows.len(), 4);
        assert!(grid.rows[0].is_empty() && grid.rows[1].is_empty());
        assert_eq!(grid.rows[2][0].as_text(), "h1");
    }

    #[test]
    fn test_mid_field_quote_is_literal() {
        let grid = parse_csv(b"5\" screen,x\n\nnext,y\n").unwrap();
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[0][0].as_text(), "5\" screen");
        assert!(grid.rows[1].is_empty());
    }

    #[test]
    fn test_quoted_values() {
        let grid = parse_csv(b"\"Smith, Jr.\",\"007\",12.5\n\"multi\nline\",x\nnext,y\n").unwrap();
        assert_eq!(grid.rows[0][0].as_text(), "Smith, Jr.");
        assert_eq!(grid.rows[0][1].as_text(), "007");
        assert_eq!(grid.rows[0][2].as_number(), Some(12.5));
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[2][0].as_text(), "next");
    }
}
