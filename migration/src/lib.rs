pub use sea_orm_migration::prelude::*;

mod m20250115_000001_create_users_table;
mod m20250115_000002_create_courses_table;
mod m20250115_000003_create_course_enrollments_table;
mod m20250115_000004_create_opportunities_table;
mod m20250115_000005_create_opportunity_applications_table;
mod m20250115_000006_create_portfolios_table;
mod m20250115_000007_create_mentorships_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250115_000001_create_users_table::Migration),
            Box::new(m20250115_000002_create_courses_table::Migration),
            Box::new(m20250115_000003_create_course_enrollments_table::Migration),
            Box::new(m20250115_000004_create_opportunities_table::Migration),
            Box::new(m20250115_000005_create_opportunity_applications_table::Migration),
            Box::new(m20250115_000006_create_portfolios_table::Migration),
            Box::new(m20250115_000007_create_mentorships_table::Migration),
        ]
    }
}
