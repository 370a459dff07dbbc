use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AirQualityZones::Table)
                    .if_not_exists()
                    .col(pk_auto(AirQualityZones::Id))
                    .col(string(AirQualityZones::ZoneName).unique_key())
                    .col(integer(AirQualityZones::Aqi))
                    .col(string(AirQualityZones::Status))
                    .col(double(AirQualityZones::Pm10))
                    .col(double(AirQualityZones::No2))
                    .col(double(AirQualityZones::Co2))
                    .col(double(AirQualityZones::O3))
                    .col(string_len_null(AirQualityZones::Description, 500))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AirQualityZones::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AirQualityZones {
    Table,
    Id,
    ZoneName,
    Aqi,
    Status,
    Pm10,
    No2,
    Co2,
    O3,
    Description,
}
