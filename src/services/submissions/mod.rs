//! 提交版本库
//!
//! 每个 (单元, 提交主体) 组合在有提交后恰好有一个最终提交。
//! 新提交默认成为最终提交，也可以显式指定历史版本为最终提交，
//! 两种切换都在存储层以单个原子操作完成。

pub mod artifact;
pub mod finalize;
pub mod history;
pub mod list;
pub mod submit;

use std::sync::Arc;

use crate::config::UploadConfig;
use crate::errors::Result;
use crate::models::{
    Caller, Outcome,
    submissions::{
        entities::Submission,
        requests::{SetFinalRequest, SubmissionListQuery, SubmitRequest},
        responses::{SubmissionArtifact, SubmissionListItem},
    },
};
use crate::storage::{FileStore, Storage};
use crate::utils::KeyedLocks;

pub struct SubmissionService {
    storage: Arc<dyn Storage>,
    files: Arc<dyn FileStore>,
    upload: UploadConfig,
    // 按 (unit_id, actor_id) 串行化写操作
    locks: KeyedLocks<(i64, i64)>,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>, files: Arc<dyn FileStore>, upload: UploadConfig) -> Self {
        Self {
            storage,
            files,
            upload,
            locks: KeyedLocks::new(),
        }
    }

    pub(crate) fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    /// 上传新提交并设为最终提交
    pub async fn submit(&self, caller: &Caller, req: SubmitRequest) -> Result<Outcome<Submission>> {
        submit::submit(self, caller, req).await
    }

    /// 指定某次提交为最终提交
    pub async fn set_final(
        &self,
        caller: &Caller,
        req: SetFinalRequest,
    ) -> Result<Outcome<Submission>> {
        finalize::set_final(self, caller, req).await
    }

    /// 获取最终提交，尚无提交时为 `None`
    pub async fn get_final(
        &self,
        caller: &Caller,
        unit_id: i64,
        actor_id: i64,
    ) -> Result<Outcome<Option<Submission>>> {
        finalize::get_final(self, caller, unit_id, actor_id).await
    }

    /// 列出单元的全部提交
    pub async fn list_all(
        &self,
        caller: &Caller,
        query: SubmissionListQuery,
    ) -> Result<Outcome<Vec<SubmissionListItem>>> {
        list::list_all(self, caller, query).await
    }

    /// 获取提交历史，最新在前
    pub async fn history(
        &self,
        caller: &Caller,
        unit_id: i64,
        actor_id: i64,
    ) -> Result<Outcome<Vec<Submission>>> {
        history::history(self, caller, unit_id, actor_id).await
    }

    /// 读取提交附件
    pub async fn read_artifact(
        &self,
        caller: &Caller,
        submission_id: i64,
    ) -> Result<Outcome<SubmissionArtifact>> {
        artifact::read_artifact(self, caller, submission_id).await
    }
}
