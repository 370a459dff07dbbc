use crate::error::{Result, ServiceError};
use std::net::SocketAddr;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/city_services.db?mode=rwc";
const DEFAULT_REST_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SOAP_ADDR: &str = "0.0.0.0:8081";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rest_addr: SocketAddr,
    pub soap_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            dotenvy::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let rest_addr = parse_env_addr("REST_ADDR", DEFAULT_REST_ADDR)?;
        let soap_addr = parse_env_addr("SOAP_ADDR", DEFAULT_SOAP_ADDR)?;

        if rest_addr == soap_addr {
            return Err(ServiceError::Config(format!(
                "REST_ADDR and SOAP_ADDR must differ (both {rest_addr})"
            )));
        }

        Ok(Config {
            database_url,
            rest_addr,
            soap_addr,
        })
    }
}

fn parse_env_addr(key: &str, default: &str) -> Result<SocketAddr> {
    dotenvy::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse::<SocketAddr>()
        .map_err(|_| ServiceError::Config(format!("Invalid {key}")))
}
