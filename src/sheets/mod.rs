//! 表格文件读写
//!
//! 读取时只负责把文件还原为单元格网格，表头与数据行的语义由成绩导入服务处理。

pub mod delimited;
pub mod workbook;

use std::fmt;

use crate::utils::detect_sheet_format;

/// 单元格值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// 由文本构造，空白字符串视为空单元格，其余文本原样保留
    pub fn from_text<S: AsRef<str>>(raw: S) -> Self {
        let raw = raw.as_ref();
        if raw.trim().is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// 单元格的文本形式，文本单元格原样返回
    ///
    /// 整数值的数字单元格输出为不带小数点的整数文本，
    /// 保证 `2021001` 这样的学号在 xlsx 与 csv 中读出的结果一致。
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
        }
    }

    /// 单元格的数值形式，文本单元格按十进制解析
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Empty => None,
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
        }
        .filter(|n| n.is_finite())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// 支持的表格格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetFormat::Xlsx => write!(f, "xlsx"),
            SheetFormat::Csv => write!(f, "csv"),
        }
    }
}

/// 单元格网格，第 0 行对应文件第 1 行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 表格解析错误
#[derive(Debug, Clone, PartialEq)]
pub enum SheetError {
    EmptyFile,
    UnsupportedFormat,
    ParseFailed(String),
    MissingWorksheet(String),
}

impl SheetError {
    pub fn message(&self) -> String {
        match self {
            Self::EmptyFile => "文件内容为空".to_string(),
            Self::UnsupportedFormat => "无法识别的文件格式，仅支持 xlsx 与 csv".to_string(),
            Self::ParseFailed(msg) => msg.clone(),
            Self::MissingWorksheet(name) => format!("缺少工作表: {name}"),
        }
    }
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// 表格解析协作者
pub trait SheetParser: Send + Sync {
    /// 读取文件为单元格网格；xlsx 读取名为 `worksheet` 的工作表
    fn parse(&self, content: &[u8], worksheet: &str) -> Result<SheetGrid, SheetError>;
}

/// 按文件内容自动选择 xlsx 或 csv 解析
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoSheetParser;

impl SheetParser for AutoSheetParser {
    fn parse(&self, content: &[u8], worksheet: &str) -> Result<SheetGrid, SheetError> {
        if content.is_empty() {
            return Err(SheetError::EmptyFile);
        }

        match detect_sheet_format(content) {
            Some(SheetFormat::Xlsx) => workbook::parse_xlsx(content, worksheet),
            Some(SheetFormat::Csv) => delimited::parse_csv(content),
            None => Err(SheetError::UnsupportedFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_text_forms() {
        assert_eq!(CellValue::Number(2021001.0).as_text(), "2021001");
        assert_eq!(CellValue::Number(18.5).as_text(), "18.5");
        assert_eq!(CellValue::from_text("  Alice ").as_text(), "  Alice ");
        assert_eq!(CellValue::from_text("   "), CellValue::Empty);
        assert!(CellValue::Text(" ".into()).is_blank());
    }

    #[test]
    fn test_cell_numbers() {
        assert_eq!(CellValue::Text("18".into()).as_number(), Some(18.0));
        assert_eq!(CellValue::Number(7.5).as_number(), Some(7.5));
        assert_eq!(CellValue::Text("abc".into()).as_number(), None);
        assert_eq!(CellValue::Text("NaN".into()).as_number(), None);
        assert_eq!(CellValue::Empty.as_number(), None);
    }

    #[test]
    fn test_auto_parser_rejects_unknown() {
        let parser = AutoSheetParser;
        assert_eq!(parser.parse(&[], "Scores"), Err(SheetError::EmptyFile));
        assert_eq!(
            parser.parse(&[0xD0, 0xCF, 0x11, 0xE0, 0xFF, 0xFE], "Scores"),
            Err(SheetError::UnsupportedFormat)
        );
    }

    #[test]
    fn test_auto_parser_reads_csv() {
        let grid = AutoSheetParser
            .parse(b"Name,IdentifierNumber,Score\nAlice,S1,18\n", "Scores")
            .unwrap();
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[1][2], CellValue::Text("18".into()));
    }
}
