pub mod prelude;

pub mod air_quality_zones;
pub mod schedules;
pub mod transport_lines;
