//! 预导入模块，方便使用

pub use super::class_entries::{
    ActiveModel as ClassEntryActiveModel, Entity as ClassEntries, Model as ClassEntryModel,
};
pub use super::class_users::{
    ActiveModel as ClassUserActiveModel, Entity as ClassUsers, Model as ClassUserModel,
};
pub use super::classes::{ActiveModel as ClassActiveModel, Entity as Classes, Model as ClassModel};
pub use super::gradable_units::{
    ActiveModel as GradableUnitActiveModel, Entity as GradableUnits, Model as GradableUnitModel,
};
pub use super::score_records::{
    ActiveModel as ScoreRecordActiveModel, Entity as ScoreRecords, Model as ScoreRecordModel,
};
pub use super::submissions::{
    ActiveModel as SubmissionActiveModel, Entity as Submissions, Model as SubmissionModel,
};
pub use super::team_members::{
    ActiveModel as TeamMemberActiveModel, Entity as TeamMembers, Model as TeamMemberModel,
};
pub use super::teams::{ActiveModel as TeamActiveModel, Entity as Teams, Model as TeamModel};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
