//! Persistence seams for the services.
//!
//! Each trait exposes the handful of capabilities a service needs
//! (get-by-id, list, save, delete, exists). The `SeaOrm*` types back them
//! with a `DatabaseConnection`; tests may substitute in-memory fakes.

use crate::entities::transport_lines::LineType;
use crate::entities::{air_quality_zones, prelude::*, schedules, transport_lines};
use crate::error::Result;
use async_trait::async_trait;
use chrono::NaiveTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;

/// A line together with the schedules it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineWithSchedules {
    pub line: transport_lines::Model,
    pub schedules: Vec<schedules::Model>,
}

/// Mutable fields of a line, used for both insert and full replace.
#[derive(Debug, Clone)]
pub struct LineFields {
    pub name: String,
    pub line_type: LineType,
    pub line_status: transport_lines::LineStatus,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewSchedule {
    pub line_id: i64,
    pub station_from: String,
    pub station_to: String,
    pub departure_time: NaiveTime,
    pub arrival_time: NaiveTime,
}

#[async_trait]
pub trait LineRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<LineWithSchedules>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<LineWithSchedules>>;
    async fn find_by_type(&self, line_type: LineType) -> Result<Vec<LineWithSchedules>>;
    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<LineWithSchedules>>;
    /// Exact, case-sensitive match. Returns the owning line id.
    async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>>;
    async fn exists_by_id(&self, id: i64) -> Result<bool>;
    async fn insert(&self, fields: LineFields) -> Result<transport_lines::Model>;
    /// Returns `None` when no line has this id.
    async fn update(&self, id: i64, fields: LineFields) -> Result<Option<transport_lines::Model>>;
    /// Removes the line and its schedules. Returns `false` when nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<schedules::Model>>;
    async fn find_by_id(&self, id: i64) -> Result<Option<schedules::Model>>;
    async fn find_by_line_id(&self, line_id: i64) -> Result<Vec<schedules::Model>>;
    async fn find_by_station(&self, station: &str) -> Result<Vec<schedules::Model>>;
    /// Earliest departure on the line strictly later than `after`.
    async fn find_next_departure(
        &self,
        line_id: i64,
        after: NaiveTime,
    ) -> Result<Option<schedules::Model>>;
    async fn insert(&self, schedule: NewSchedule) -> Result<schedules::Model>;
    async fn delete(&self, id: i64) -> Result<bool>;
}

#[async_trait]
pub trait ZoneRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<air_quality_zones::Model>>;
    async fn find_by_name_ignore_case(
        &self,
        zone_name: &str,
    ) -> Result<Option<air_quality_zones::Model>>;
    async fn zone_names(&self) -> Result<Vec<String>>;
}

// === SeaORM implementations ===

#[derive(Clone)]
pub struct SeaOrmLineRepository {
    db: DatabaseConnection,
}

impl SeaOrmLineRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn attach_schedules(
    rows: Vec<(transport_lines::Model, Vec<schedules::Model>)>,
) -> Vec<LineWithSchedules> {
    rows.into_iter()
        .map(|(line, schedules)| LineWithSchedules { line, schedules })
        .collect()
}

#[async_trait]
impl LineRepository for SeaOrmLineRepository {
    async fn find_all(&self) -> Result<Vec<LineWithSchedules>> {
        let rows = TransportLines::find()
            .order_by_asc(transport_lines::Column::Id)
            .find_with_related(Schedules)
            .all(&self.db)
            .await?;
        Ok(attach_schedules(rows))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<LineWithSchedules>> {
        let Some(line) = TransportLines::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let schedules = line
            .find_related(Schedules)
            .order_by_asc(schedules::Column::DepartureTime)
            .all(&self.db)
            .await?;
        Ok(Some(LineWithSchedules { line, schedules }))
    }

    async fn find_by_type(&self, line_type: LineType) -> Result<Vec<LineWithSchedules>> {
        let rows = TransportLines::find()
            .filter(transport_lines::Column::LineType.eq(line_type))
            .order_by_asc(transport_lines::Column::Id)
            .find_with_related(Schedules)
            .all(&self.db)
            .await?;
        Ok(attach_schedules(rows))
    }

    async fn find_by_name_containing(&self, fragment: &str) -> Result<Vec<LineWithSchedules>> {
        // Matched in Rust: SQLite's lower() only folds ASCII and LIKE treats % and _ as wildcards
        let needle = fragment.to_lowercase();
        let ids: Vec<i64> = TransportLines::find()
            .all(&self.db)
            .await?
            .into_iter()
            .filter(|line| line.name.to_lowercase().contains(&needle))
            .map(|line| line.id)
            .collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = TransportLines::find()
            .filter(transport_lines::Column::Id.is_in(ids))
            .order_by_asc(transport_lines::Column::Id)
            .find_with_related(Schedules)
            .all(&self.db)
            .await?;
        Ok(attach_schedules(rows))
    }

    async fn find_id_by_name(&self, name: &str) -> Result<Option<i64>> {
        let line = TransportLines::find()
            .filter(transport_lines::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(line.map(|l| l.id))
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool> {
        let count = TransportLines::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn insert(&self, fields: LineFields) -> Result<transport_lines::Model> {
        let line = transport_lines::ActiveModel {
            name: Set(fields.name),
            line_type: Set(fields.line_type),
            line_status: Set(fields.line_status),
            description: Set(fields.description),
            ..Default::default()
        };
        Ok(line.insert(&self.db).await?)
    }

    async fn update(&self, id: i64, fields: LineFields) -> Result<Option<transport_lines::Model>> {
        let Some(existing) = TransportLines::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_line: transport_lines::ActiveModel = existing.into();
        active_line.name = Set(fields.name);
        active_line.line_type = Set(fields.line_type);
        active_line.line_status = Set(fields.line_status);
        active_line.description = Set(fields.description);

        Ok(Some(active_line.update(&self.db).await?))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        // Schedules first, the line row last
        let removed = Schedules::delete_many()
            .filter(schedules::Column::LineId.eq(id))
            .exec(&txn)
            .await?;
        let result = TransportLines::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        debug!(
            "Deleted line {} ({} rows) and {} schedules",
            id, result.rows_affected, removed.rows_affected
        );
        Ok(result.rows_affected > 0)
    }
}

#[derive(Clone)]
pub struct SeaOrmScheduleRepository {
    db: DatabaseConnection,
}

impl SeaOrmScheduleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScheduleRepository for SeaOrmScheduleRepository {
    async fn find_all(&self) -> Result<Vec<schedules::Model>> {
        Ok(Schedules::find()
            .order_by_asc(schedules::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<schedules::Model>> {
        Ok(Schedules::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_line_id(&self, line_id: i64) -> Result<Vec<schedules::Model>> {
        Ok(Schedules::find()
            .filter(schedules::Column::LineId.eq(line_id))
            .order_by_asc(schedules::Column::DepartureTime)
            .all(&self.db)
            .await?)
    }

    async fn find_by_station(&self, station: &str) -> Result<Vec<schedules::Model>> {
        Ok(Schedules::find()
            .filter(
                Condition::any()
                    .add(schedules::Column::StationFrom.eq(station))
                    .add(schedules::Column::StationTo.eq(station)),
            )
            .order_by_asc(schedules::Column::DepartureTime)
            .all(&self.db)
            .await?)
    }

    async fn find_next_departure(
        &self,
        line_id: i64,
        after: NaiveTime,
    ) -> Result<Option<schedules::Model>> {
        Ok(Schedules::find()
            .filter(schedules::Column::LineId.eq(line_id))
            .filter(schedules::Column::DepartureTime.gt(after))
            .order_by_asc(schedules::Column::DepartureTime)
            .one(&self.db)
            .await?)
    }

    async fn insert(&self, schedule: NewSchedule) -> Result<schedules::Model> {
        let model = schedules::ActiveModel {
            line_id: Set(schedule.line_id),
            station_from: Set(schedule.station_from),
            station_to: Set(schedule.station_to),
            departure_time: Set(schedule.departure_time),
            arrival_time: Set(schedule.arrival_time),
            ..Default::default()
        };
        Ok(model.insert(&self.db).await?)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = Schedules::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}

#[derive(Clone)]
pub struct SeaOrmZoneRepository {
    db: DatabaseConnection,
}

impl SeaOrmZoneRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ZoneRepository for SeaOrmZoneRepository {
    async fn find_all(&self) -> Result<Vec<air_quality_zones::Model>> {
        Ok(AirQualityZones::find()
            .order_by_asc(air_quality_zones::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_by_name_ignore_case(
        &self,
        zone_name: &str,
    ) -> Result<Option<air_quality_zones::Model>> {
        let wanted = zone_name.trim().to_lowercase();
        Ok(self
            .find_all()
            .await?
            .into_iter()
            .find(|zone| zone.zone_name.to_lowercase() == wanted))
    }

    async fn zone_names(&self) -> Result<Vec<String>> {
        let zones = self.find_all().await?;
        Ok(zones.into_iter().map(|z| z.zone_name).collect())
    }
}
