//! Transport lines and air-quality zones: entities, persistence, services
//! and the SOAP codec shared by the `cityhub-server` binary.

pub mod air_quality;
pub mod api;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod repositories;
pub mod soap;
pub mod transport;
