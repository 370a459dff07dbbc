//! SOAP 1.1 document/literal codec for the air-quality service.
//!
//! Requests are read with a streaming `quick_xml::NsReader`, and the payload
//! element must belong to [`NAMESPACE`]. Responses and faults are written
//! with `quick_xml::Writer`, which escapes text content.

use crate::api::{AirQualityRecord, ZoneComparison};
use crate::error::{Result, ServiceError};
use quick_xml::NsReader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::{QName, ResolveResult};
use std::collections::HashMap;

pub const NAMESPACE: &str = "http://example.com/air-quality-service";
pub const ENVELOPE_NAMESPACE: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const WSDL: &str = include_str!("air-quality.wsdl");

const ENV: &str = "SOAP-ENV";
const NS: &str = "ns2";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoapRequest {
    GetAirQuality { zone_name: String },
    GetAllZones,
    CompareAirQuality { zone1: String, zone2: String },
}

impl SoapRequest {
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::GetAirQuality { .. } => "GetAirQuality",
            Self::GetAllZones => "GetAllZones",
            Self::CompareAirQuality { .. } => "CompareAirQuality",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SoapResponse {
    GetAirQuality(AirQualityRecord),
    GetAllZones(Vec<AirQualityRecord>),
    CompareAirQuality(ZoneComparison),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultCode {
    Client,
    Server,
}

impl FaultCode {
    const fn qualified(self) -> &'static str {
        match self {
            Self::Client => "SOAP-ENV:Client",
            Self::Server => "SOAP-ENV:Server",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    pub code: FaultCode,
    pub message: String,
    pub zone_not_found: bool,
}

impl From<&ServiceError> for SoapFault {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => Self {
                code: FaultCode::Client,
                message: msg.clone(),
                zone_not_found: true,
            },
            ServiceError::InvalidInput(_) | ServiceError::Parse(_) => Self {
                code: FaultCode::Client,
                message: err.to_string(),
                zone_not_found: false,
            },
            ServiceError::Database(_) | ServiceError::Config(_) => Self {
                code: FaultCode::Server,
                message: "Internal server error".to_string(),
                zone_not_found: false,
            },
        }
    }
}

// === Request parsing ===

pub fn parse_request(xml: &str) -> Result<SoapRequest> {
    let mut reader = NsReader::from_str(xml);
    reader.config_mut().trim_text(true);

    // local name of the payload element, and whether it is in NAMESPACE
    let mut operation: Option<(String, bool)> = None;
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_resolved_event_into(&mut buf) {
            Ok((ns, Event::Start(e))) => {
                let in_service = is_service_namespace(&ns);
                let name = local_name(&e);
                if name == "Header" {
                    let end = e.name().as_ref().to_vec();
                    let mut skip = Vec::new();
                    reader
                        .read_to_end_into(QName(&end), &mut skip)
                        .map_err(|err| ServiceError::Parse(format!("XML error: {err}")))?;
                } else if is_envelope_element(&name) {
                    // structural wrapper, payload follows
                } else if operation.is_none() {
                    operation = Some((name, in_service));
                } else if matches!(name.as_str(), "zoneName" | "zone1" | "zone2") {
                    let value = read_text(&mut reader)?;
                    fields.insert(name, value);
                }
            }
            Ok((ns, Event::Empty(e))) => {
                let in_service = is_service_namespace(&ns);
                let name = local_name(&e);
                if operation.is_none() && !is_envelope_element(&name) && name != "Header" {
                    operation = Some((name, in_service));
                }
            }
            Ok((_, Event::Eof)) => break,
            Err(e) => return Err(ServiceError::Parse(format!("XML error: {e}"))),
            _ => {}
        }
        buf.clear();
    }

    let (operation, in_service) =
        operation.ok_or_else(|| ServiceError::Parse("SOAP Body has no payload".to_string()))?;

    if !in_service {
        return Err(ServiceError::InvalidInput(format!(
            "Unsupported operation: {operation} is not in namespace {NAMESPACE}"
        )));
    }

    let mut take = |field: &str| {
        fields
            .remove(field)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                ServiceError::InvalidInput(format!("{operation} requires a non-empty {field}"))
            })
    };

    match operation.as_str() {
        "GetAirQualityRequest" => Ok(SoapRequest::GetAirQuality {
            zone_name: take("zoneName")?,
        }),
        "GetAllZonesRequest" => Ok(SoapRequest::GetAllZones),
        "CompareAirQualityRequest" => Ok(SoapRequest::CompareAirQuality {
            zone1: take("zone1")?,
            zone2: take("zone2")?,
        }),
        other => Err(ServiceError::InvalidInput(format!(
            "Unsupported operation: {other}"
        ))),
    }
}

fn is_service_namespace(ns: &ResolveResult<'_>) -> bool {
    matches!(ns, ResolveResult::Bound(bound) if bound.as_ref() == NAMESPACE.as_bytes())
}

fn is_envelope_element(name: &str) -> bool {
    matches!(name, "Envelope" | "Body")
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn read_text(reader: &mut NsReader<&[u8]>) -> Result<String> {
    let mut buf = Vec::new();
    match reader.read_event_into(&mut buf) {
        Ok(Event::Text(e)) => e
            .unescape()
            .map(|s| s.to_string())
            .map_err(|e| ServiceError::Parse(format!("Text unescape error: {e}"))),
        Ok(Event::CData(e)) => Ok(String::from_utf8_lossy(&e).into_owned()),
        _ => Ok(String::new()),
    }
}

// === Response writing ===

struct EnvelopeWriter {
    writer: Writer<Vec<u8>>,
}

impl EnvelopeWriter {
    fn open() -> Result<Self> {
        let mut this = Self {
            writer: Writer::new(Vec::new()),
        };
        this.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        this.event(Event::Start(
            BytesStart::new(format!("{ENV}:Envelope"))
                .with_attributes([(format!("xmlns:{ENV}").as_str(), ENVELOPE_NAMESPACE)]),
        ))?;
        this.event(Event::Empty(BytesStart::new(format!("{ENV}:Header"))))?;
        this.start(&format!("{ENV}:Body"))?;
        Ok(this)
    }

    fn finish(mut self) -> Result<String> {
        self.end(&format!("{ENV}:Body"))?;
        self.end(&format!("{ENV}:Envelope"))?;
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| ServiceError::Parse(format!("Invalid UTF-8 in response: {e}")))
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| ServiceError::Parse(format!("XML write error: {e}")))
    }

    fn start(&mut self, name: &str) -> Result<()> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn start_payload(&mut self, local: &str) -> Result<()> {
        self.event(Event::Start(
            BytesStart::new(format!("{NS}:{local}"))
                .with_attributes([(format!("xmlns:{NS}").as_str(), NAMESPACE)]),
        ))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text_element(&mut self, name: &str, value: &str) -> Result<()> {
        self.start(name)?;
        self.event(Event::Text(BytesText::new(value)))?;
        self.end(name)
    }

    fn field(&mut self, local: &str, value: &str) -> Result<()> {
        self.text_element(&format!("{NS}:{local}"), value)
    }

    fn record(&mut self, element: &str, record: &AirQualityRecord) -> Result<()> {
        let tag = format!("{NS}:{element}");
        self.start(&tag)?;
        self.field("zoneName", &record.zone_name)?;
        self.field("aqi", &record.aqi.to_string())?;
        self.field("status", &record.status)?;
        self.field("pm10", &record.pm10.to_string())?;
        self.field("no2", &record.no2.to_string())?;
        self.field("co2", &record.co2.to_string())?;
        self.field("o3", &record.o3.to_string())?;
        self.field("timestamp", &record.timestamp)?;
        self.end(&tag)
    }
}

pub fn write_response(response: &SoapResponse) -> Result<String> {
    let mut w = EnvelopeWriter::open()?;

    let payload = match response {
        SoapResponse::GetAirQuality(record) => {
            w.start_payload("GetAirQualityResponse")?;
            w.record("record", record)?;
            "GetAirQualityResponse"
        }
        SoapResponse::GetAllZones(records) => {
            w.start_payload("GetAllZonesResponse")?;
            for record in records {
                w.record("records", record)?;
            }
            "GetAllZonesResponse"
        }
        SoapResponse::CompareAirQuality(comparison) => {
            w.start_payload("CompareAirQualityResponse")?;
            w.record("record1", &comparison.record1)?;
            w.record("record2", &comparison.record2)?;
            w.field("verdict", &comparison.verdict)?;
            "CompareAirQualityResponse"
        }
    };

    w.end(&format!("{NS}:{payload}"))?;
    w.finish()
}

pub fn write_fault(fault: &SoapFault) -> Result<String> {
    let mut w = EnvelopeWriter::open()?;
    let fault_tag = format!("{ENV}:Fault");

    w.start(&fault_tag)?;
    w.text_element("faultcode", fault.code.qualified())?;
    w.text_element("faultstring", &fault.message)?;
    if fault.zone_not_found {
        w.start("detail")?;
        w.start_payload("ZoneNotFoundFault")?;
        w.field("message", &fault.message)?;
        w.end(&format!("{NS}:ZoneNotFoundFault"))?;
        w.end("detail")?;
    }
    w.end(&fault_tag)?;

    w.finish()
}
