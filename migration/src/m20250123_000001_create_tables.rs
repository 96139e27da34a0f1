use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::DisplayName).string().null())
                    .col(
                        ColumnDef::new(Users::IdentifierNumber)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::ClassName).string().not_null())
                    .col(ColumnDef::new(Classes::TotalScore).double().not_null())
                    .col(ColumnDef::new(Classes::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Classes::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班级用户关联表
        manager
            .create_table(
                Table::create()
                    .table(ClassUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassUsers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassUsers::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(ClassUsers::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ClassUsers::Role).string().not_null())
                    .col(
                        ColumnDef::new(ClassUsers::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassUsers::Table, ClassUsers::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassUsers::Table, ClassUsers::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建可评分单元表（考试 / 练习 / 项目阶段）
        manager
            .create_table(
                Table::create()
                    .table(GradableUnits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GradableUnits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GradableUnits::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GradableUnits::ProjectId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(GradableUnits::Kind).string().not_null())
                    .col(ColumnDef::new(GradableUnits::Title).string().not_null())
                    .col(ColumnDef::new(GradableUnits::MaxScore).double().not_null())
                    .col(
                        ColumnDef::new(GradableUnits::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(GradableUnits::Table, GradableUnits::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组表
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::ProjectId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::TeamName).string().not_null())
                    .col(ColumnDef::new(Teams::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teams::Table, Teams::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建小组成员表
        manager
            .create_table(
                Table::create()
                    .table(TeamMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeamMembers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TeamMembers::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(TeamMembers::UserId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeamMembers::Table, TeamMembers::UserId)
                            .to(Users::Table, Users::Id)
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
                    .name("idx_class_users_class_user")
                    .table(ClassUsers::Table)
                    .col(ClassUsers::ClassId)
                    .col(ClassUsers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_gradable_units_class_id")
                    .table(GradableUnits::Table)
                    .col(GradableUnits::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_teams_project_id")
                    .table(Teams::Table)
                    .col(Teams::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_team_members_team_user")
                    .table(TeamMembers::Table)
                    .col(TeamMembers::TeamId)
                    .col(TeamMembers::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(TeamMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GradableUnits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassUsers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    DisplayName,
    IdentifierNumber,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Classes {
    #[sea_orm(iden = "classes")]
    Table,
    Id,
    TeacherId,
    ClassName,
    TotalScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassUsers {
    #[sea_orm(iden = "class_users")]
    Table,
    Id,
    ClassId,
    UserId,
    Role,
    JoinedAt,
}

#[derive(DeriveIden)]
pub(crate) enum GradableUnits {
    #[sea_orm(iden = "gradable_units")]
    Table,
    Id,
    ClassId,
    ProjectId,
    Kind,
    Title,
    MaxScore,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Teams {
    #[sea_orm(iden = "teams")]
    Table,
    Id,
    ClassId,
    ProjectId,
    TeamName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TeamMembers {
    #[sea_orm(iden = "team_members")]
    Table,
    Id,
    TeamId,
    UserId,
}
