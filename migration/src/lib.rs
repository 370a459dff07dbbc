pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_transport_lines;
mod m20250601_000002_create_schedules;
mod m20250601_000003_create_air_quality_zones;
mod m20250601_000004_seed_air_quality_zones;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_transport_lines::Migration),
            Box::new(m20250601_000002_create_schedules::Migration),
            Box::new(m20250601_000003_create_air_quality_zones::Migration),
            Box::new(m20250601_000004_seed_air_quality_zones::Migration),
        ]
    }
}
