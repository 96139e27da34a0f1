use sea_orm_migration::prelude::*;

use super::m20250123_000001_create_tables::{Classes, GradableUnits};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 班级成绩构成表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ClassEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassEntries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClassEntries::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassEntries::EntryType).string().not_null())
                    .col(
                        ColumnDef::new(ClassEntries::EntryId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClassEntries::Portion).double().not_null())
                    .col(
                        ColumnDef::new(ClassEntries::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassEntries::Table, ClassEntries::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 提交表 ====================
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::UnitId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Submissions::ActorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::FileName).string().not_null())
                    .col(ColumnDef::new(Submissions::FilePath).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::IsFinal)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::UnitId)
                            .to(GradableUnits::Table, GradableUnits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 成绩记录表 ====================
        manager
            .create_table(
                Table::create()
                    .table(ScoreRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScoreRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScoreRecords::UnitId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ScoreRecords::ActorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScoreRecords::Score).double().not_null())
                    .col(ColumnDef::new(ScoreRecords::RowOrigin).integer().null())
                    .col(
                        ColumnDef::new(ScoreRecords::RecordedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ScoreRecords::Table, ScoreRecords::UnitId)
                            .to(GradableUnits::Table, GradableUnits::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_class_entries_class_id")
                    .table(ClassEntries::Table)
                    .col(ClassEntries::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_submissions_unit_actor")
                    .table(Submissions::Table)
                    .col(Submissions::UnitId)
                    .col(Submissions::ActorId)
                    .to_owned(),
            )
            .await?;

        // 导入时按 (unit_id, actor_id) 覆盖写入
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_score_records_unit_actor")
                    .table(ScoreRecords::Table)
                    .col(ScoreRecords::UnitId)
                    .col(ScoreRecords::ActorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScoreRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassEntries::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum ClassEntries {
    #[sea_orm(iden = "class_entries")]
    Table,
    Id,
    ClassId,
    EntryType,
    EntryId,
    Portion,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    #[sea_orm(iden = "submissions")]
    Table,
    Id,
    UnitId,
    ActorId,
    FileName,
    FilePath,
    SubmittedAt,
    IsFinal,
}

#[derive(DeriveIden)]
enum ScoreRecords {
    #[sea_orm(iden = "score_records")]
    Table,
    Id,
    UnitId,
    ActorId,
    Score,
    RowOrigin,
    RecordedAt,
}
