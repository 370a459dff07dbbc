use crate::AppState;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use cityhub::error::{Result, ServiceError};
use cityhub::soap::{self, SoapFault, SoapRequest, SoapResponse};
use tracing::{debug, error, warn};

const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

fn xml(status: StatusCode, body: String) -> Response {
    (status, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], body).into_response()
}

async fn dispatch(state: &AppState, request: SoapRequest) -> Result<SoapResponse> {
    let response = match request {
        SoapRequest::GetAirQuality { zone_name } => {
            SoapResponse::GetAirQuality(state.air_quality.zone(&zone_name).await?)
        }
        SoapRequest::GetAllZones => SoapResponse::GetAllZones(state.air_quality.all_zones().await?),
        SoapRequest::CompareAirQuality { zone1, zone2 } => {
            SoapResponse::CompareAirQuality(state.air_quality.compare(&zone1, &zone2).await?)
        }
    };
    Ok(response)
}

fn fault_response(err: &ServiceError) -> Response {
    let fault = SoapFault::from(err);
    match err {
        ServiceError::Database(_) | ServiceError::Config(_) => error!("SOAP request failed: {}", err),
        _ => warn!("SOAP fault: {}", fault.message),
    }

    match soap::write_fault(&fault) {
        Ok(body) => xml(StatusCode::INTERNAL_SERVER_ERROR, body),
        Err(e) => {
            error!("Failed to write SOAP fault: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `POST /ws`: one envelope in, one envelope or fault out.
pub async fn handle_envelope(State(state): State<AppState>, body: String) -> Response {
    let outcome = match soap::parse_request(&body) {
        Ok(request) => {
            debug!("SOAP operation {}", request.operation());
            dispatch(&state, request).await
        }
        Err(e) => Err(e),
    };

    match outcome.and_then(|response| soap::write_response(&response)) {
        Ok(body) => xml(StatusCode::OK, body),
        Err(e) => fault_response(&e),
    }
}

pub async fn wsdl() -> Response {
    xml(StatusCode::OK, soap::WSDL.to_string())
}
