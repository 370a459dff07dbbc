//! End-to-end test over real sockets: both routers are served on ephemeral
//! ports and driven with `reqwest`.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use cityhub::db;
use cityhub_server::{AppState, rest_router, soap_router};
use migration::{Migrator, MigratorTrait};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpListener;

async fn serve(router: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .unwrap();
    });
    addr
}

#[tokio::test]
async fn test_rest_and_soap_share_one_database() {
    let db = db::init_database("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    let state = AppState::new(db);

    let rest = serve(rest_router(state.clone())).await;
    let soap = serve(soap_router(state)).await;
    let client = reqwest::Client::new();

    let created: Value = client
        .post(format!("http://{rest}/lines"))
        .json(&json!({
            "name": "TGM",
            "lineType": "TRAIN",
            "lineStatus": "ACTIVE"
        }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(created["name"], "TGM");
    assert_eq!(created["schedules"], json!([]));

    let response = client
        .post(format!("http://{rest}/schedules"))
        .json(&json!({
            "lineId": created["id"],
            "stationFrom": "Tunis Marine",
            "stationTo": "La Marsa Plage",
            "departureTime": "07:15",
            "arrivalTime": "07:50"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let lines: Value = client
        .get(format!("http://{rest}/lines/type/TRAIN"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(lines[0]["schedules"][0]["departureTime"], "07:15");

    let response = client
        .post(format!("http://{soap}/ws"))
        .header("Content-Type", "text/xml; charset=utf-8")
        .body(
            r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"
                                 xmlns:air="http://example.com/air-quality-service">
                 <soapenv:Body><air:GetAllZonesRequest/></soapenv:Body>
               </soapenv:Envelope>"#,
        )
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body = response.text().await.unwrap();
    assert!(body.contains("GetAllZonesResponse"));
    assert!(body.contains("Tunis Center"));
}
