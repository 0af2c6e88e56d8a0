//! SeaORM database migrations.
//!
//! Only the initial tables are created; existing report data is never rewritten.

pub use sea_orm_migration::prelude::*;

mod m20261019_000001_create_builds;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261019_000001_create_builds::Migration),
            Box::new(m20261019_000002_create_tests::Migration),
        ]
    }
}
