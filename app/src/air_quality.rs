use crate::api::{AirQualityRecord, ZoneComparison, zone_to_record};
use crate::error::{Result, ServiceError};
use crate::repositories::ZoneRepository;
use chrono::Local;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, warn};

/// Wall-clock stamp attached to every record at read time.
pub fn read_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// Sentence naming the cleaner of two zones, lower AQI wins.
pub fn verdict(first: &AirQualityRecord, second: &AirQualityRecord) -> String {
    match first.aqi.cmp(&second.aqi) {
        Ordering::Less => format!(
            "{} is cleaner than {} (AQI: {} vs {})",
            first.zone_name, second.zone_name, first.aqi, second.aqi
        ),
        Ordering::Greater => format!(
            "{} is cleaner than {} (AQI: {} vs {})",
            second.zone_name, first.zone_name, second.aqi, first.aqi
        ),
        Ordering::Equal => format!(
            "Both zones have similar air quality (AQI: {})",
            first.aqi
        ),
    }
}

#[derive(Clone)]
pub struct AirQualityService {
    zones: Arc<dyn ZoneRepository>,
}

impl AirQualityService {
    pub fn new(zones: Arc<dyn ZoneRepository>) -> Self {
        Self { zones }
    }

    pub async fn zone(&self, zone_name: &str) -> Result<AirQualityRecord> {
        match self.zones.find_by_name_ignore_case(zone_name).await? {
            Some(zone) => {
                debug!("Found air quality zone '{}'", zone.zone_name);
                Ok(zone_to_record(zone, &read_timestamp()))
            }
            None => {
                let known = self.zones.zone_names().await?;
                warn!("Unknown air quality zone '{}'", zone_name);
                Err(ServiceError::NotFound(format!(
                    "Zone not found: {zone_name}. Available zones: {}",
                    known.join(", ")
                )))
            }
        }
    }

    pub async fn all_zones(&self) -> Result<Vec<AirQualityRecord>> {
        let timestamp = read_timestamp();
        let zones = self.zones.find_all().await?;
        Ok(zones
            .into_iter()
            .map(|z| zone_to_record(z, &timestamp))
            .collect())
    }

    pub async fn compare(&self, zone_name1: &str, zone_name2: &str) -> Result<ZoneComparison> {
        let record1 = self.zone(zone_name1).await?;
        let record2 = self.zone(zone_name2).await?;
        let verdict = verdict(&record1, &record2);

        Ok(ZoneComparison {
            record1,
            record2,
            verdict,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::entities::air_quality_zones;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;

    struct FixedZones(Vec<air_quality_zones::Model>);

    #[async_trait]
    impl ZoneRepository for FixedZones {
        async fn find_all(&self) -> Result<Vec<air_quality_zones::Model>> {
            Ok(self.0.clone())
        }

        async fn find_by_name_ignore_case(
            &self,
            zone_name: &str,
        ) -> Result<Option<air_quality_zones::Model>> {
            Ok(self
                .0
                .iter()
                .find(|z| z.zone_name.eq_ignore_ascii_case(zone_name))
                .cloned())
        }

        async fn zone_names(&self) -> Result<Vec<String>> {
            Ok(self.0.iter().map(|z| z.zone_name.clone()).collect())
        }
    }

    fn zone(id: i64, name: &str, aqi: i32) -> air_quality_zones::Model {
        air_quality_zones::Model {
            id,
            zone_name: name.to_string(),
            aqi,
            status: "Moderate".to_string(),
            pm10: 20.0,
            no2: 10.0,
            co2: 400.0,
            o3: 30.0,
            description: None,
        }
    }

    fn service() -> AirQualityService {
        AirQualityService::new(Arc::new(FixedZones(vec![
            zone(1, "Lakeside", 40),
            zone(2, "Harbour", 90),
            zone(3, "Old Town", 40),
        ])))
    }

    #[tokio::test]
    async fn test_lower_aqi_first_is_cleaner() {
        let result = service().compare("Lakeside", "Harbour").await.unwrap();
        assert_eq!(
            result.verdict,
            "Lakeside is cleaner than Harbour (AQI: 40 vs 90)"
        );
        assert_eq!(result.record1.zone_name, "Lakeside");
        assert_eq!(result.record2.zone_name, "Harbour");
    }

    #[tokio::test]
    async fn test_lower_aqi_second_is_cleaner() {
        let result = service().compare("harbour", "lakeside").await.unwrap();
        assert_eq!(
            result.verdict,
            "Lakeside is cleaner than Harbour (AQI: 40 vs 90)"
        );
    }

    #[tokio::test]
    async fn test_equal_aqi_is_similar() {
        let result = service().compare("Lakeside", "Old Town").await.unwrap();
        assert_eq!(result.verdict, "Both zones have similar air quality (AQI: 40)");
    }

    #[tokio::test]
    async fn test_unknown_zone_lists_known_names() {
        let err = service().zone("Atlantis").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert_eq!(
            err.to_string(),
            "Zone not found: Atlantis. Available zones: Lakeside, Harbour, Old Town"
        );
    }

    #[tokio::test]
    async fn test_compare_fails_when_either_zone_is_unknown() {
        let err = service().compare("Lakeside", "Atlantis").await.unwrap_err();
        assert!(err.to_string().starts_with("Zone not found: Atlantis"));
    }

    #[tokio::test]
    async fn test_records_are_stamped_at_read_time() {
        let records = service().all_zones().await.unwrap();
        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(
                NaiveDateTime::parse_from_str(&record.timestamp, "%Y-%m-%dT%H:%M:%S%.3f").is_ok()
            );
        }
    }
}
