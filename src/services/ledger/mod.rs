//! 成绩构成账本
//!
//! 班级总分由若干考试、练习、项目按分值组成，分值之和必须等于总分。
//! 构成只能整体替换，不支持局部修改。

pub mod get;
pub mod replace;
pub mod validate;

use std::sync::Arc;

use crate::errors::Result;
use crate::models::{
    Caller, Outcome,
    class_entries::{entities::ClassEntrySet, requests::ReplaceEntriesRequest},
};
use crate::storage::Storage;
use crate::utils::KeyedLocks;

pub use validate::validate_entry_set;

pub struct LedgerService {
    storage: Arc<dyn Storage>,
    // 按班级串行化替换操作
    locks: KeyedLocks<i64>,
}

impl LedgerService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            locks: KeyedLocks::new(),
        }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// 整体替换班级的成绩构成
    pub async fn replace_entries(
        &self,
        caller: &Caller,
        req: ReplaceEntriesRequest,
    ) -> Result<Outcome<ClassEntrySet>> {
        replace::replace_entries(self, caller, req).await
    }

    /// 获取班级的总分与当前成绩构成
    pub async fn get_entries(
        &self,
        caller: &Caller,
        class_id: i64,
    ) -> Result<Outcome<ClassEntrySet>> {
        get::get_entries(self, caller, class_id).await
    }
}
