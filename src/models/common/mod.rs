pub mod caller;
pub mod rejection;

pub use caller::Caller;
pub use rejection::{Outcome, Rejection, RejectionCategory, ValidationIssue};
