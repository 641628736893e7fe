//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250201_000001_create_user_table;
mod m20250201_000002_create_agency_table;
mod m20250201_000003_create_guide_table;
mod m20250201_000004_create_catalog_tables;
mod m20250201_000005_create_tour_tables;
mod m20250201_000006_create_booking_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250201_000001_create_user_table::Migration),
            Box::new(m20250201_000002_create_agency_table::Migration),
            Box::new(m20250201_000003_create_guide_table::Migration),
            Box::new(m20250201_000004_create_catalog_tables::Migration),
            Box::new(m20250201_000005_create_tour_tables::Migration),
            Box::new(m20250201_000006_create_booking_tables::Migration),
        ]
    }
}
