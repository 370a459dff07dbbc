use crate::api::{
    LineAvailabilityDto, LineFormDto, ScheduleDto, ScheduleFormDto, TransportLineDto, hh_mm,
    line_to_dto, schedule_to_dto,
};
use crate::entities::transport_lines::LineType;
use crate::error::{Result, ServiceError};
use crate::repositories::{LineFields, LineRepository, NewSchedule, ScheduleRepository};
use chrono::NaiveTime;
use std::sync::Arc;
use tracing::{debug, info, warn};

const LINE: &str = "TransportLine";
const SCHEDULE: &str = "Schedule";

fn require_non_blank(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        warn!("Rejected input: {} is blank", field);
        return Err(ServiceError::InvalidInput(format!("{field} must not be blank")));
    }
    Ok(())
}

fn parse_time(value: &str, field: &str) -> Result<NaiveTime> {
    hh_mm::parse(value).ok_or_else(|| {
        ServiceError::InvalidInput(format!("{field} must be formatted as HH:MM, got '{value}'"))
    })
}

fn line_fields(form: LineFormDto) -> Result<LineFields> {
    require_non_blank(&form.name, "name")?;
    Ok(LineFields {
        name: form.name,
        line_type: form.line_type,
        line_status: form.line_status,
        description: form.description,
    })
}

#[derive(Clone)]
pub struct TransportLineService {
    lines: Arc<dyn LineRepository>,
    schedules: Arc<dyn ScheduleRepository>,
}

impl TransportLineService {
    pub fn new(lines: Arc<dyn LineRepository>, schedules: Arc<dyn ScheduleRepository>) -> Self {
        Self { lines, schedules }
    }

    pub async fn list_lines(&self) -> Result<Vec<TransportLineDto>> {
        let lines = self.lines.find_all().await?;
        debug!("Listing {} transport lines", lines.len());
        Ok(lines
            .into_iter()
            .map(|l| line_to_dto(l.line, l.schedules))
            .collect())
    }

    pub async fn get_line(&self, id: i64) -> Result<TransportLineDto> {
        self.lines
            .find_by_id(id)
            .await?
            .map(|l| line_to_dto(l.line, l.schedules))
            .ok_or_else(|| ServiceError::not_found(LINE, id))
    }

    pub async fn lines_by_type(&self, line_type: LineType) -> Result<Vec<TransportLineDto>> {
        let lines = self.lines.find_by_type(line_type).await?;
        Ok(lines
            .into_iter()
            .map(|l| line_to_dto(l.line, l.schedules))
            .collect())
    }

    pub async fn search_lines(&self, fragment: &str) -> Result<Vec<TransportLineDto>> {
        let lines = self.lines.find_by_name_containing(fragment.trim()).await?;
        Ok(lines
            .into_iter()
            .map(|l| line_to_dto(l.line, l.schedules))
            .collect())
    }

    pub async fn create_line(&self, form: LineFormDto) -> Result<TransportLineDto> {
        let fields = line_fields(form)?;

        if self.lines.find_id_by_name(&fields.name).await?.is_some() {
            warn!("Rejected duplicate line name '{}'", fields.name);
            return Err(ServiceError::InvalidInput(format!(
                "Line with name '{}' already exists",
                fields.name
            )));
        }

        let line = self.lines.insert(fields).await?;
        info!("Created transport line {} ({})", line.id, line.name);
        Ok(line_to_dto(line, Vec::new()))
    }

    pub async fn update_line(&self, id: i64, form: LineFormDto) -> Result<TransportLineDto> {
        let fields = line_fields(form)?;

        if let Some(owner) = self.lines.find_id_by_name(&fields.name).await?
            && owner != id
        {
            return Err(ServiceError::InvalidInput(format!(
                "Line with name '{}' already exists",
                fields.name
            )));
        }

        let line = self
            .lines
            .update(id, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found(LINE, id))?;
        let schedules = self.schedules.find_by_line_id(id).await?;

        info!("Updated transport line {}", id);
        Ok(line_to_dto(line, schedules))
    }

    pub async fn delete_line(&self, id: i64) -> Result<()> {
        if !self.lines.delete(id).await? {
            return Err(ServiceError::not_found(LINE, id));
        }
        info!("Deleted transport line {} and its schedules", id);
        Ok(())
    }

    /// Line status plus the first departure strictly after `now`.
    pub async fn line_availability(&self, id: i64, now: NaiveTime) -> Result<LineAvailabilityDto> {
        let line = self
            .lines
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(LINE, id))?
            .line;
        let next = self.schedules.find_next_departure(id, now).await?;

        Ok(LineAvailabilityDto {
            status: line.line_status,
            line_name: line.name,
            next_departure: next.as_ref().map(|s| s.departure_time),
            next_departure_from: next.as_ref().map(|s| s.station_from.clone()),
            next_departure_to: next.map(|s| s.station_to),
        })
    }
}

#[derive(Clone)]
pub struct ScheduleService {
    schedules: Arc<dyn ScheduleRepository>,
    lines: Arc<dyn LineRepository>,
}

impl ScheduleService {
    pub fn new(schedules: Arc<dyn ScheduleRepository>, lines: Arc<dyn LineRepository>) -> Self {
        Self { schedules, lines }
    }

    pub async fn list_schedules(&self) -> Result<Vec<ScheduleDto>> {
        let schedules = self.schedules.find_all().await?;
        Ok(schedules.into_iter().map(schedule_to_dto).collect())
    }

    pub async fn get_schedule(&self, id: i64) -> Result<ScheduleDto> {
        self.schedules
            .find_by_id(id)
            .await?
            .map(schedule_to_dto)
            .ok_or_else(|| ServiceError::not_found(SCHEDULE, id))
    }

    pub async fn schedules_for_line(&self, line_id: i64) -> Result<Vec<ScheduleDto>> {
        if !self.lines.exists_by_id(line_id).await? {
            return Err(ServiceError::not_found(LINE, line_id));
        }
        let schedules = self.schedules.find_by_line_id(line_id).await?;
        Ok(schedules.into_iter().map(schedule_to_dto).collect())
    }

    pub async fn schedules_for_station(&self, station: &str) -> Result<Vec<ScheduleDto>> {
        let schedules = self.schedules.find_by_station(station.trim()).await?;
        Ok(schedules.into_iter().map(schedule_to_dto).collect())
    }

    pub async fn create_schedule(&self, form: ScheduleFormDto) -> Result<ScheduleDto> {
        let line_id = form.line_id.ok_or_else(|| {
            ServiceError::InvalidInput("Transport line must be specified".to_string())
        })?;

        if !self.lines.exists_by_id(line_id).await? {
            warn!("Rejected schedule for unknown line {}", line_id);
            return Err(ServiceError::InvalidInput(format!(
                "{LINE} not found with id: {line_id}"
            )));
        }

        require_non_blank(&form.station_from, "stationFrom")?;
        require_non_blank(&form.station_to, "stationTo")?;
        let departure_time = parse_time(&form.departure_time, "departureTime")?;
        let arrival_time = parse_time(&form.arrival_time, "arrivalTime")?;

        if departure_time >= arrival_time {
            warn!(
                "Rejected schedule on line {}: departure {} not before arrival {}",
                line_id, departure_time, arrival_time
            );
            return Err(ServiceError::InvalidInput(
                "Departure time must be before arrival time".to_string(),
            ));
        }

        let schedule = self
            .schedules
            .insert(NewSchedule {
                line_id,
                station_from: form.station_from,
                station_to: form.station_to,
                departure_time,
                arrival_time,
            })
            .await?;

        info!("Created schedule {} on line {}", schedule.id, line_id);
        Ok(schedule_to_dto(schedule))
    }

    pub async fn delete_schedule(&self, id: i64) -> Result<()> {
        if !self.schedules.delete(id).await? {
            return Err(ServiceError::not_found(SCHEDULE, id));
        }
        info!("Deleted schedule {}", id);
        Ok(())
    }
}
