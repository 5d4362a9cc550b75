use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Opportunities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Opportunities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Opportunities::Type).string().not_null())
                    .col(ColumnDef::new(Opportunities::Title).string().not_null())
                    .col(ColumnDef::new(Opportunities::Company).string().not_null())
                    .col(ColumnDef::new(Opportunities::Description).text().not_null())
                    .col(ColumnDef::new(Opportunities::Details).json())
                    .col(ColumnDef::new(Opportunities::Funding).string())
                    .col(ColumnDef::new(Opportunities::Location).string())
                    .col(ColumnDef::new(Opportunities::Category).string())
                    .col(ColumnDef::new(Opportunities::Deadline).timestamp().not_null())
                    .col(
                        ColumnDef::new(Opportunities::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Opportunities::ApplicationsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Opportunities::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Opportunities::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_opportunities_deadline")
                    .table(Opportunities::Table)
                    .col(Opportunities::Deadline)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Opportunities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Opportunities {
    Table,
    Id,
    Type,
    Title,
    Company,
    Description,
    Details,
    Funding,
    Location,
    Category,
    Deadline,
    IsActive,
    ApplicationsCount,
    CreatedAt,
    UpdatedAt,
}
