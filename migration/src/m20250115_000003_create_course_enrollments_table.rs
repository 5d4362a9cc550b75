use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CourseEnrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseEnrollments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CourseEnrollments::UserId).integer().not_null())
                    .col(ColumnDef::new(CourseEnrollments::CourseId).integer().not_null())
                    .col(
                        ColumnDef::new(CourseEnrollments::Progress)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(CourseEnrollments::EnrolledAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_user_id")
                            .from(CourseEnrollments::Table, CourseEnrollments::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollments_course_id")
                            .from(CourseEnrollments::Table, CourseEnrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Duplicate enrollments are rejected here, not in the controller.
        manager
            .create_index(
                Index::create()
                    .name("uq_enrollments_user_course")
                    .table(CourseEnrollments::Table)
                    .col(CourseEnrollments::UserId)
                    .col(CourseEnrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseEnrollments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CourseEnrollments {
    Table,
    Id,
    UserId,
    CourseId,
    Progress,
    EnrolledAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
}
