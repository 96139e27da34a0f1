use crate::sheets::SheetFormat;

/// OOXML（xlsx/docx 等）是 ZIP 容器
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
/// 旧版 Office 复合文档
const OLE_MAGIC: [u8; 8] = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// 根据文件内容的魔术字节判断表格格式
///
/// # Returns
/// * `Some(SheetFormat::Xlsx)` - ZIP 容器
/// * `Some(SheetFormat::Csv)` - 合法的 UTF-8 文本
/// * `None` - 空内容、旧版 xls 或其他二进制内容
pub fn detect_sheet_format(data: &[u8]) -> Option<SheetFormat> {
    if data.is_empty() {
        return None;
    }

    if data.starts_with(&ZIP_MAGIC) {
        return Some(SheetFormat::Xlsx);
    }

    if data.starts_with(&OLE_MAGIC) {
        return None;
    }

    // 文本格式 - 只要求是 UTF-8 且不含 NUL
    match std::str::from_utf8(data) {
        Ok(text) if !text.contains('\0') => Some(SheetFormat::Csv),
        _ => None,
    }
}
