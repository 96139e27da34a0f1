//! 提交附件的二进制存储
//!
//! 数据库只记录相对路径，文件内容由 [`FileStore`] 负责。

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{GradingError, Result};

#[async_trait]
pub trait FileStore: Send + Sync {
    /// 保存文件，返回相对于存储根目录的路径
    async fn save(&self, folder: &str, file_name: &str, content: &[u8]) -> Result<String>;
    async fn read(&self, path: &str) -> Result<Vec<u8>>;
    async fn delete(&self, path: &str) -> Result<()>;
}

/// 本地文件系统存储
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 将相对路径解析到根目录下，拒绝绝对路径与 `..`
    fn resolve(&self, relative: &str) -> Result<PathBuf> {
        let path = Path::new(relative);
        let mut resolved = self.root.clone();
        for component in path.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(GradingError::file_operation(format!(
                        "非法的存储路径: {relative}"
                    )));
                }
            }
        }
        if resolved == self.root {
            return Err(GradingError::file_operation(format!(
                "存储路径为空: {relative}"
            )));
        }
        Ok(resolved)
    }
}

/// 存储文件名：时间戳-uuid.扩展名，原始文件名只保留到数据库
fn stored_name(file_name: &str) -> String {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "bin".to_string());

    format!(
        "{}-{}.{}",
        chrono::Utc::now().timestamp(),
        Uuid::new_v4(),
        extension
    )
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(&self, folder: &str, file_name: &str, content: &[u8]) -> Result<String> {
        let relative = format!("{}/{}", folder.trim_matches('/'), stored_name(file_name));
        let full_path = self.resolve(&relative)?;

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GradingError::file_operation(format!("创建存储目录失败: {e}"))
            })?;
        }

        tokio::fs::write(&full_path, content)
            .await
            .map_err(|e| GradingError::file_operation(format!("写入文件失败: {e}")))?;

        tracing::debug!("文件已保存: {}", full_path.display());
        Ok(relative)
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path)?;
        tokio::fs::read(&full_path)
            .await
            .map_err(|e| GradingError::file_operation(format!("读取文件失败 {path}: {e}")))
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let full_path = self.resolve(path)?;
        match tokio::fs::remove_file(&full_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(GradingError::file_operation(format!(
                "删除文件失败 {path}: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_read_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        let path = store
            .save("submissions/3/7", "report.PDF", b"%PDF-1.4")
            .await
            .unwrap();
        assert!(path.starts_with("submissions/3/7/"));
        assert!(path.ends_with(".pdf"));

        assert_eq!(store.read(&path).await.unwrap(), b"%PDF-1.4");

        store.delete(&path).await.unwrap();
        assert!(store.read(&path).await.is_err());
        // 重复删除不报错
        store.delete(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        assert!(store.read("../etc/passwd").await.is_err());
        assert!(store.read("/etc/passwd").await.is_err());
        assert!(store.save("../outside", "a.txt", b"x").await.is_err());
    }

    #[test]
    fn test_stored_name_extension() {
        assert!(stored_name("a.tar.GZ").ends_with(".gz"));
        assert!(stored_name("noext").ends_with(".bin"));
        assert!(stored_name("weird.e x").ends_with(".bin"));
    }
}
