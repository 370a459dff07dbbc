#![allow(clippy::unwrap_used, clippy::expect_used)]

use cityhub::config::Config;
use cityhub::error::ServiceError;
use serial_test::serial;
use temp_env::with_vars;

const KEYS: [&str; 3] = ["DATABASE_URL", "REST_ADDR", "SOAP_ADDR"];

fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
    KEYS.iter().map(|k| (*k, None)).collect()
}

#[test]
#[serial]
fn test_defaults_when_nothing_is_set() {
    with_vars(unset_all(), || {
        let config = Config::from_env().unwrap();
        assert_eq!(
            config.database_url,
            "sqlite://data/city_services.db?mode=rwc"
        );
        assert_eq!(config.rest_addr.port(), 8080);
        assert_eq!(config.soap_addr.port(), 8081);
    });
}

#[test]
#[serial]
fn test_custom_values_are_used() {
    with_vars(
        [
            ("DATABASE_URL", Some("sqlite::memory:")),
            ("REST_ADDR", Some("127.0.0.1:9000")),
            ("SOAP_ADDR", Some("127.0.0.1:9001")),
        ],
        || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.database_url, "sqlite::memory:");
            assert_eq!(config.rest_addr.to_string(), "127.0.0.1:9000");
            assert_eq!(config.soap_addr.to_string(), "127.0.0.1:9001");
        },
    );
}

#[test]
#[serial]
fn test_invalid_address_is_a_config_error() {
    with_vars(
        [
            ("DATABASE_URL", None),
            ("REST_ADDR", Some("not-an-address")),
            ("SOAP_ADDR", None),
        ],
        || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ServiceError::Config(_)));
            assert_eq!(err.to_string(), "Configuration error: Invalid REST_ADDR");
        },
    );
}

#[test]
#[serial]
fn test_rest_and_soap_must_not_share_an_address() {
    with_vars(
        [
            ("DATABASE_URL", None),
            ("REST_ADDR", Some("127.0.0.1:7000")),
            ("SOAP_ADDR", Some("127.0.0.1:7000")),
        ],
        || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ServiceError::Config(_)));
        },
    );
}
