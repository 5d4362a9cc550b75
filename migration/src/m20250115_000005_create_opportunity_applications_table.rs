use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OpportunityApplications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OpportunityApplications::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OpportunityApplications::UserId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpportunityApplications::OpportunityId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpportunityApplications::CoverLetter)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OpportunityApplications::Status).string().not_null())
                    .col(
                        ColumnDef::new(OpportunityApplications::AppliedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OpportunityApplications::UpdatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_user_id")
                            .from(
                                OpportunityApplications::Table,
                                OpportunityApplications::UserId,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_applications_opportunity_id")
                            .from(
                                OpportunityApplications::Table,
                                OpportunityApplications::OpportunityId,
                            )
                            .to(Opportunities::Table, Opportunities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_applications_user_opportunity")
                    .table(OpportunityApplications::Table)
                    .col(OpportunityApplications::UserId)
                    .col(OpportunityApplications::OpportunityId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OpportunityApplications::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum OpportunityApplications {
    Table,
    Id,
    UserId,
    OpportunityId,
    CoverLetter,
    Status,
    AppliedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Opportunities {
    Table,
    Id,
}
