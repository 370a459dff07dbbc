use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TransportLines::Table)
                    .if_not_exists()
                    .col(pk_auto(TransportLines::Id))
                    .col(string(TransportLines::Name).unique_key())
                    .col(string(TransportLines::LineType))
                    .col(string(TransportLines::LineStatus))
                    .col(text_null(TransportLines::Description))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transport_lines_line_type")
                    .table(TransportLines::Table)
                    .col(TransportLines::LineType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TransportLines::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TransportLines {
    Table,
    Id,
    Name,
    LineType,
    LineStatus,
    Description,
}
