#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use cityhub::air_quality::AirQualityService;
use cityhub::api::{LineFormDto, ScheduleFormDto};
use cityhub::db::init_database;
use cityhub::entities::transport_lines::{LineStatus, LineType};
use cityhub::error::ServiceError;
use cityhub::repositories::{SeaOrmLineRepository, SeaOrmScheduleRepository, SeaOrmZoneRepository};
use cityhub::soap::{self, SoapFault, SoapRequest, SoapResponse};
use cityhub::transport::{ScheduleService, TransportLineService};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

async fn setup_test_db() -> DatabaseConnection {
    let db = init_database("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

fn services(db: &DatabaseConnection) -> (TransportLineService, ScheduleService, AirQualityService) {
    let lines = Arc::new(SeaOrmLineRepository::new(db.clone()));
    let schedules = Arc::new(SeaOrmScheduleRepository::new(db.clone()));
    let zones = Arc::new(SeaOrmZoneRepository::new(db.clone()));
    (
        TransportLineService::new(lines.clone(), schedules.clone()),
        ScheduleService::new(schedules, lines),
        AirQualityService::new(zones),
    )
}

fn line_form(name: &str, line_type: LineType) -> LineFormDto {
    LineFormDto {
        name: name.to_string(),
        line_type,
        line_status: LineStatus::Active,
        description: None,
    }
}

fn schedule_form(line_id: i64, from: &str, to: &str, dep: &str, arr: &str) -> ScheduleFormDto {
    ScheduleFormDto {
        line_id: Some(line_id),
        station_from: from.to_string(),
        station_to: to.to_string(),
        departure_time: dep.to_string(),
        arrival_time: arr.to_string(),
    }
}

#[tokio::test]
async fn test_line_lifecycle_with_schedules() {
    let db = setup_test_db().await;
    let (lines, schedules, _) = services(&db);

    let bus = lines.create_line(line_form("Bus 12", LineType::Bus)).await.unwrap();
    let metro = lines
        .create_line(line_form("Metro 1", LineType::Metro))
        .await
        .unwrap();

    let s1 = schedules
        .create_schedule(schedule_form(bus.id, "Bab Saadoun", "Ariana", "08:00", "08:45"))
        .await
        .unwrap();
    schedules
        .create_schedule(schedule_form(bus.id, "Ariana", "Bab Saadoun", "09:00", "09:45"))
        .await
        .unwrap();
    schedules
        .create_schedule(schedule_form(metro.id, "Barcelone", "Ariana", "10:00", "10:20"))
        .await
        .unwrap();

    let fetched = lines.get_line(bus.id).await.unwrap();
    assert_eq!(fetched.schedules.len(), 2);
    assert!(fetched.schedules.contains(&s1));

    let at_ariana = schedules.schedules_for_station("Ariana").await.unwrap();
    assert_eq!(at_ariana.len(), 3);

    lines.delete_line(bus.id).await.unwrap();

    let remaining = schedules.list_schedules().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].line_id, metro.id);
    assert!(matches!(
        schedules.get_schedule(s1.id).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        schedules.schedules_for_line(bus.id).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

#[tokio::test]
async fn test_duplicate_line_name_is_rejected_across_types() {
    let db = setup_test_db().await;
    let (lines, _, _) = services(&db);

    lines.create_line(line_form("Line A", LineType::Bus)).await.unwrap();
    let err = lines
        .create_line(line_form("Line A", LineType::Tram))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Line with name 'Line A' already exists");
    assert_eq!(lines.list_lines().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_filter_by_type_only_returns_that_type() {
    let db = setup_test_db().await;
    let (lines, _, _) = services(&db);

    lines.create_line(line_form("T1", LineType::Train)).await.unwrap();
    lines.create_line(line_form("B1", LineType::Bus)).await.unwrap();
    lines.create_line(line_form("T2", LineType::Train)).await.unwrap();

    let trains = lines.lines_by_type(LineType::Train).await.unwrap();
    assert_eq!(trains.len(), 2);
    assert!(trains.iter().all(|l| l.line_type == LineType::Train));
    assert!(lines.lines_by_type(LineType::Tram).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_seeded_zones_answer_soap_requests() {
    let db = setup_test_db().await;
    let (_, _, air) = services(&db);

    let request = soap::parse_request(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"
                             xmlns:air="http://example.com/air-quality-service">
             <soapenv:Body>
               <air:CompareAirQualityRequest>
                 <air:zone1>ariana</air:zone1>
                 <air:zone2>Sidi Bou Said</air:zone2>
               </air:CompareAirQualityRequest>
             </soapenv:Body>
           </soapenv:Envelope>"#,
    )
    .unwrap();

    let SoapRequest::CompareAirQuality { zone1, zone2 } = request else {
        panic!("expected a comparison request");
    };
    let comparison = air.compare(&zone1, &zone2).await.unwrap();
    assert_eq!(
        comparison.verdict,
        "Sidi Bou Said is cleaner than Ariana (AQI: 34 vs 67)"
    );

    let xml = soap::write_response(&SoapResponse::CompareAirQuality(comparison)).unwrap();
    assert!(xml.contains("<ns2:zoneName>Ariana</ns2:zoneName>"));
    assert!(xml.contains("<ns2:aqi>34</ns2:aqi>"));
}

#[tokio::test]
async fn test_unknown_zone_becomes_client_fault_listing_zones() {
    let db = setup_test_db().await;
    let (_, _, air) = services(&db);

    let err = air.zone("Atlantis").await.unwrap_err();
    let fault = SoapFault::from(&err);
    assert!(fault.zone_not_found);

    let xml = soap::write_fault(&fault).unwrap();
    assert!(xml.contains("SOAP-ENV:Client"));
    assert!(xml.contains("Zone not found: Atlantis"));
    assert!(xml.contains("Charguia 2, Tunis Center, Sidi Bou Said, Ariana"));
}
