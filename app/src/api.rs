//! Wire shapes shared by the REST and SOAP layers.
//!
//! JSON keys are camelCase. Times of day travel as `HH:MM` strings, or
//! `HH:MM:SS` when the seconds are not zero.

use crate::entities::transport_lines::{LineStatus, LineType};
use crate::entities::{air_quality_zones, schedules, transport_lines};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Times of day as `HH:MM` or `HH:MM:SS`. Seconds are only written when non-zero.
pub mod hh_mm {
    use chrono::{NaiveTime, Timelike};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn parse(text: &str) -> Option<NaiveTime> {
        let text = text.trim();
        NaiveTime::parse_from_str(text, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M:%S"))
            .ok()
    }

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        let pattern = if time.second() == 0 { "%H:%M" } else { "%H:%M:%S" };
        serializer.serialize_str(&time.format(pattern).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid time of day: {text}")))
    }

    pub mod option {
        use chrono::NaiveTime;
        use serde::Serializer;

        #[allow(clippy::ref_option)]
        pub fn serialize<S: Serializer>(
            time: &Option<NaiveTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match time {
                Some(t) => super::serialize(t, serializer),
                None => serializer.serialize_none(),
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDto {
    pub id: i64,
    pub line_id: i64,
    pub station_from: String,
    pub station_to: String,
    #[serde(with = "hh_mm")]
    pub departure_time: NaiveTime,
    #[serde(with = "hh_mm")]
    pub arrival_time: NaiveTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransportLineDto {
    pub id: i64,
    pub name: String,
    pub line_type: LineType,
    pub line_status: LineStatus,
    pub description: Option<String>,
    pub schedules: Vec<ScheduleDto>,
}

/// Body of `POST /lines` and `PUT /lines/{id}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineFormDto {
    pub name: String,
    pub line_type: LineType,
    pub line_status: LineStatus,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `POST /schedules`. Times are `HH:MM` or `HH:MM:SS`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleFormDto {
    #[serde(default)]
    pub line_id: Option<i64>,
    pub station_from: String,
    pub station_to: String,
    pub departure_time: String,
    pub arrival_time: String,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineAvailabilityDto {
    pub status: LineStatus,
    pub line_name: String,
    #[serde(serialize_with = "hh_mm::option::serialize")]
    pub next_departure: Option<NaiveTime>,
    pub next_departure_from: Option<String>,
    pub next_departure_to: Option<String>,
}

/// One zone as returned to SOAP callers; `timestamp` is set at read time.
#[derive(Clone, Debug, PartialEq)]
pub struct AirQualityRecord {
    pub zone_name: String,
    pub aqi: i32,
    pub status: String,
    pub pm10: f64,
    pub no2: f64,
    pub co2: f64,
    pub o3: f64,
    pub timestamp: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ZoneComparison {
    pub record1: AirQualityRecord,
    pub record2: AirQualityRecord,
    pub verdict: String,
}

pub fn schedule_to_dto(schedule: schedules::Model) -> ScheduleDto {
    ScheduleDto {
        id: schedule.id,
        line_id: schedule.line_id,
        station_from: schedule.station_from,
        station_to: schedule.station_to,
        departure_time: schedule.departure_time,
        arrival_time: schedule.arrival_time,
    }
}

pub fn line_to_dto(
    line: transport_lines::Model,
    schedules: Vec<schedules::Model>,
) -> TransportLineDto {
    TransportLineDto {
        id: line.id,
        name: line.name,
        line_type: line.line_type,
        line_status: line.line_status,
        description: line.description,
        schedules: schedules.into_iter().map(schedule_to_dto).collect(),
    }
}

pub fn zone_to_record(zone: air_quality_zones::Model, timestamp: &str) -> AirQualityRecord {
    AirQualityRecord {
        zone_name: zone.zone_name,
        aqi: zone.aqi,
        status: zone.status,
        pm10: zone.pm10,
        no2: zone.no2,
        co2: zone.co2,
        o3: zone.o3,
        timestamp: timestamp.to_string(),
    }
}
