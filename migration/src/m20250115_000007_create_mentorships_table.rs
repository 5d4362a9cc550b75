use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Mentorships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Mentorships::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Mentorships::MentorId).integer().not_null())
                    .col(ColumnDef::new(Mentorships::MenteeId).integer().not_null())
                    .col(ColumnDef::new(Mentorships::Status).string().not_null())
                    .col(ColumnDef::new(Mentorships::Specialties).json())
                    .col(ColumnDef::new(Mentorships::Bio).text())
                    .col(ColumnDef::new(Mentorships::YearsExperience).integer())
                    .col(
                        ColumnDef::new(Mentorships::AvailableSlots)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(ColumnDef::new(Mentorships::Sessions).json())
                    .col(ColumnDef::new(Mentorships::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Mentorships::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mentorships_mentor_id")
                            .from(Mentorships::Table, Mentorships::MentorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_mentorships_mentee_id")
                            .from(Mentorships::Table, Mentorships::MenteeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mentorships_mentor_id")
                    .table(Mentorships::Table)
                    .col(Mentorships::MentorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mentorships_mentee_id")
                    .table(Mentorships::Table)
                    .col(Mentorships::MenteeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Mentorships::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Mentorships {
    Table,
    Id,
    MentorId,
    MenteeId,
    Status,
    Specialties,
    Bio,
    YearsExperience,
    AvailableSlots,
    Sessions,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
