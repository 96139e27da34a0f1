//! 业务逻辑层
//!
//! 三个组件互不调用，只共享存储协作者。每个公开操作都返回
//! `errors::Result<Outcome<T>>`：外层错误是基础设施故障，内层是预期内的拒绝。

/// 展开内层 `Outcome`，遇到拒绝时直接作为正常结果返回
macro_rules! try_outcome {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(rejection) => return Ok(Err(rejection)),
        }
    };
}

pub(crate) mod access;
pub mod ledger;
pub mod scores;
pub mod submissions;

pub use ledger::LedgerService;
pub use scores::{ImportTemplate, ScoreService};
pub use submissions::SubmissionService;
