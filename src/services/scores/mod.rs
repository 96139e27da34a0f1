//! 成绩表导入
//!
//! 外部填写的成绩表须满足配置的模板：表头逐列精确匹配，数据从第 2 行开始，
//! 遇到整行空白即结束。任意一行无效时整批拒绝，全部有效时在一个事务内写入。

pub mod import;
pub mod list;
pub mod template;

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::{ImportConfig, ImportTemplateConfig};
use crate::errors::{GradingError, Result};
use crate::models::{
    Caller, Outcome,
    scores::{
        entities::ScoreRecord,
        responses::{ImportReport, TemplateFile},
    },
};
use crate::sheets::SheetParser;
use crate::storage::Storage;
use crate::utils::KeyedLocks;

/// 校验后的导入模板
#[derive(Debug, Clone, PartialEq)]
pub struct ImportTemplate {
    pub file_name: String,
    pub worksheet_name: String,
    pub content_type: String,
    pub name_header: String,
    pub identifier_header: String,
    pub score_header: String,
}

impl ImportTemplate {
    /// 表头须为三列：姓名、标识、分数，非空且互不相同
    pub fn from_config(config: &ImportTemplateConfig) -> Result<Self> {
        let headers: Vec<String> = config
            .column_headers
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let [name, identifier, score] = headers.as_slice() else {
            return Err(GradingError::configuration(format!(
                "成绩模板须为 3 列表头，当前为 {} 列",
                headers.len()
            )));
        };

        if headers.iter().any(|h| h.is_empty()) {
            return Err(GradingError::configuration("成绩模板表头不能为空"));
        }
        if headers.iter().collect::<HashSet<_>>().len() != headers.len() {
            return Err(GradingError::configuration("成绩模板表头不能重复"));
        }
        if config.worksheet_name.trim().is_empty() {
            return Err(GradingError::configuration("成绩模板工作表名不能为空"));
        }

        Ok(Self {
            file_name: config.file_name.clone(),
            worksheet_name: config.worksheet_name.trim().to_string(),
            content_type: config.content_type.clone(),
            name_header: name.clone(),
            identifier_header: identifier.clone(),
            score_header: score.clone(),
        })
    }

    /// 有序表头
    pub fn headers(&self) -> [&str; 3] {
        [
            self.name_header.as_str(),
            self.identifier_header.as_str(),
            self.score_header.as_str(),
        ]
    }
}

pub struct ScoreService {
    storage: Arc<dyn Storage>,
    parser: Arc<dyn SheetParser>,
    template: ImportTemplate,
    max_rows: usize,
    // 按单元串行化批量写入
    locks: KeyedLocks<i64>,
}

impl ScoreService {
    pub fn new(
        storage: Arc<dyn Storage>,
        parser: Arc<dyn SheetParser>,
        template: ImportTemplate,
        max_rows: usize,
    ) -> Self {
        Self {
            storage,
            parser,
            template,
            max_rows,
            locks: KeyedLocks::new(),
        }
    }

    pub fn from_config(
        storage: Arc<dyn Storage>,
        parser: Arc<dyn SheetParser>,
        config: &ImportConfig,
    ) -> Result<Self> {
        let template = ImportTemplate::from_config(&config.template)?;
        Ok(Self::new(storage, parser, template, config.max_rows))
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn template(&self) -> &ImportTemplate {
        &self.template
    }

    /// 导入成绩表
    pub async fn import_scores(
        &self,
        caller: &Caller,
        unit_id: i64,
        content: &[u8],
    ) -> Result<Outcome<ImportReport>> {
        import::import_scores(self, caller, unit_id, content).await
    }

    /// 生成可直接填写并导入的成绩模板
    pub async fn generate_template(
        &self,
        caller: &Caller,
        unit_id: i64,
    ) -> Result<Outcome<TemplateFile>> {
        template::generate_template(self, caller, unit_id).await
    }

    /// 列出单元的已登记成绩
    pub async fn list_scores(
        &self,
        caller: &Caller,
        unit_id: i64,
    ) -> Result<Outcome<Vec<ScoreRecord>>> {
        list::list_scores(self, caller, unit_id).await
    }
}
