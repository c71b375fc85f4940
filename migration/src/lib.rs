pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20181001_000001_initial_tables;
mod m20181015_000001_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20181001_000001_initial_tables::Migration),
            Box::new(m20181015_000001_lookup_indexes::Migration),
        ]
    }
}
