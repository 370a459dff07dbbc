use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "transport_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub line_type: LineType,
    pub line_status: LineStatus,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
pub enum LineType {
    #[sea_orm(string_value = "BUS")]
    Bus,
    #[sea_orm(string_value = "TRAIN")]
    Train,
    #[sea_orm(string_value = "METRO")]
    Metro,
    #[sea_orm(string_value = "TRAM")]
    Tram,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "UPPERCASE")]
pub enum LineStatus {
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "SUSPENDED")]
    Suspended,
    #[sea_orm(string_value = "MAINTENANCE")]
    Maintenance,
}

impl LineType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bus => "BUS",
            Self::Train => "TRAIN",
            Self::Metro => "METRO",
            Self::Tram => "TRAM",
        }
    }
}

impl LineStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Maintenance => "MAINTENANCE",
        }
    }
}

impl fmt::Display for LineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for LineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a path segment such as `bus` or `BUS`.
impl FromStr for LineType {
    type Err = crate::error::ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "BUS" => Ok(Self::Bus),
            "TRAIN" => Ok(Self::Train),
            "METRO" => Ok(Self::Metro),
            "TRAM" => Ok(Self::Tram),
            _ => Err(crate::error::ServiceError::InvalidInput(format!(
                "Unknown line type: {s}"
            ))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_type_from_str_is_case_insensitive() {
        assert_eq!("bus".parse::<LineType>().unwrap(), LineType::Bus);
        assert_eq!("METRO".parse::<LineType>().unwrap(), LineType::Metro);
        assert_eq!("Tram".parse::<LineType>().unwrap(), LineType::Tram);
    }

    #[test]
    fn test_line_type_from_str_rejects_unknown() {
        let err = "ferry".parse::<LineType>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown line type: ferry");
    }

    #[test]
    fn test_enums_serialize_uppercase() {
        assert_eq!(serde_json::to_string(&LineType::Train).unwrap(), "\"TRAIN\"");
        assert_eq!(
            serde_json::to_string(&LineStatus::Suspended).unwrap(),
            "\"SUSPENDED\""
        );
        let status: LineStatus = serde_json::from_str("\"MAINTENANCE\"").unwrap();
        assert_eq!(status, LineStatus::Maintenance);
    }
}
