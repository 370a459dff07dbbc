use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reference data only; the service never writes to this table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                INSERT OR IGNORE INTO air_quality_zones
                    (zone_name, aqi, status, pm10, no2, co2, o3, description)
                VALUES
                    ('Charguia 2', 156, 'Unhealthy', 98.4, 61.2, 612.0, 38.5,
                     'Industrial zone with heavy truck traffic and factory emissions'),
                    ('Tunis Center', 92, 'Moderate', 54.1, 47.8, 498.0, 41.3,
                     'Dense downtown traffic during rush hours'),
                    ('Sidi Bou Said', 34, 'Good', 18.7, 12.4, 405.0, 52.6,
                     'Coastal village with steady sea breeze'),
                    ('Ariana', 67, 'Moderate', 36.9, 29.5, 441.0, 45.0,
                     'Residential area with moderate commuter traffic');
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DELETE FROM air_quality_zones
                WHERE zone_name IN ('Charguia 2', 'Tunis Center', 'Sidi Bou Said', 'Ariana');
                "#,
            )
            .await?;

        Ok(())
    }
}
