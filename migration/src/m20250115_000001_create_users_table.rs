use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).string())
                    .col(ColumnDef::new(Users::UserType).string().not_null())
                    .col(ColumnDef::new(Users::Avatar).string())
                    .col(ColumnDef::new(Users::Bio).text())
                    .col(ColumnDef::new(Users::Location).string())
                    .col(ColumnDef::new(Users::Website).string())
                    .col(ColumnDef::new(Users::Specialization).json())
                    .col(ColumnDef::new(Users::SocialProvider).string())
                    .col(ColumnDef::new(Users::SocialProviderId).string())
                    .col(ColumnDef::new(Users::Followers).integer().not_null().default(0))
                    .col(ColumnDef::new(Users::Following).integer().not_null().default(0))
                    .col(ColumnDef::new(Users::Projects).integer().not_null().default(0))
                    .col(ColumnDef::new(Users::Awards).integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Users::IsVerified)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Users::LastLogin).timestamp())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_social_identity")
                    .table(Users::Table)
                    .col(Users::SocialProvider)
                    .col(Users::SocialProviderId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
    UserType,
    Avatar,
    Bio,
    Location,
    Website,
    Specialization,
    SocialProvider,
    SocialProviderId,
    Followers,
    Following,
    Projects,
    Awards,
    IsVerified,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
