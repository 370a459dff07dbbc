use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "schedules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub line_id: i64,
    pub station_from: String,
    pub station_to: String,
    pub departure_time: chrono::NaiveTime,
    pub arrival_time: chrono::NaiveTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::transport_lines::Entity",
        from = "Column::LineId",
        to = "super::transport_lines::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    TransportLines,
}

impl Related<super::transport_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransportLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
