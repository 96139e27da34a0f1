use serde::Serialize;

/// 单行校验结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowValidation {
    pub row_number: usize,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// 成绩导入结果
///
/// 只要有一行无效，`committed` 即为 false 且没有任何成绩被写入。
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub unit_id: i64,
    pub committed: bool,
    pub written: usize,
    pub rows: Vec<RowValidation>,
}

impl ImportReport {
    pub fn invalid_rows(&self) -> impl Iterator<Item = &RowValidation> {
        self.rows.iter().filter(|row| !row.is_valid)
    }
}

/// 生成的成绩模板文件
#[derive(Debug, Clone)]
pub struct TemplateFile {
    pub file_name: String,
    pub content_type: String,
    pub content: Vec<u8>,
}
