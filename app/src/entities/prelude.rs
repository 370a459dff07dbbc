pub use super::air_quality_zones::Entity as AirQualityZones;
pub use super::schedules::Entity as Schedules;
pub use super::transport_lines::Entity as TransportLines;
