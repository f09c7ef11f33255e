use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use models::{Driver, VehicleType};

use crate::errors::ServiceError;

/// One line of the drivers file: `id,name,license_number,vehicle_type,is_available`.
///
/// `vehicle_type` stays raw text here so an unknown value is reported with
/// the offending row id instead of a bare CSV decode error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverRow {
    pub id: u64,
    pub name: String,
    pub license_number: String,
    pub vehicle_type: Option<String>,
    #[serde(with = "flag")]
    pub is_available: bool,
}

impl From<&Driver> for DriverRow {
    fn from(d: &Driver) -> Self {
        Self {
            id: d.id,
            name: d.name.clone(),
            license_number: d.license_number.clone(),
            vehicle_type: d.vehicle_type.map(|v| v.as_str().to_string()),
            is_available: d.is_available,
        }
    }
}

impl TryFrom<DriverRow> for Driver {
    type Error = ServiceError;

    fn try_from(row: DriverRow) -> Result<Self, Self::Error> {
        let vehicle_type = match row.vehicle_type.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(raw.parse::<VehicleType>().map_err(|e| {
                ServiceError::Storage(format!("driver {}: {e}", row.id))
            })?),
        };
        Ok(Driver {
            id: row.id,
            name: row.name,
            license_number: row.license_number,
            vehicle_type,
            is_available: row.is_available,
        })
    }
}

/// Parse the boolean spellings found in driver files (`True`, `false`, `1`, `no`, ...).
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Booleans are written as `True`/`False`, the spelling existing driver files use.
mod flag {
    use super::*;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "True" } else { "False" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_flag(&raw).ok_or_else(|| de::Error::custom(format!("invalid boolean '{raw}'")))
    }
}
