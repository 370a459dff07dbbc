use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(pk_auto(Schedules::Id))
                    .col(integer(Schedules::LineId))
                    .col(string(Schedules::StationFrom))
                    .col(string(Schedules::StationTo))
                    .col(time(Schedules::DepartureTime))
                    .col(time(Schedules::ArrivalTime))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedules_line_id")
                            .from(Schedules::Table, Schedules::LineId)
                            .to(TransportLines::Table, TransportLines::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_line_id")
                    .table(Schedules::Table)
                    .col(Schedules::LineId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Schedules {
    Table,
    Id,
    LineId,
    StationFrom,
    StationTo,
    DepartureTime,
    ArrivalTime,
}

#[derive(DeriveIden)]
enum TransportLines {
    Table,
    Id,
}
