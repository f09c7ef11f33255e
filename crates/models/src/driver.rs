use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Vehicle category a driver operates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Sedan,
    Suv,
    Hatchback,
    Wagon,
    Standard,
}

impl VehicleType {
    pub const ALL: [VehicleType; 5] = [
        VehicleType::Sedan,
        VehicleType::Suv,
        VehicleType::Hatchback,
        VehicleType::Wagon,
        VehicleType::Standard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Sedan => "sedan",
            VehicleType::Suv => "suv",
            VehicleType::Hatchback => "hatchback",
            VehicleType::Wagon => "wagon",
            VehicleType::Standard => "standard",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VehicleType::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ModelError::Validation(format!("unknown vehicle_type '{s}'")))
    }
}

/// A taxi driver record as stored and returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: u64,
    pub name: String,
    pub license_number: String,
    pub vehicle_type: Option<VehicleType>,
    pub is_available: bool,
}

/// Create/update payload: every mutable field, no id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverInput {
    pub name: String,
    pub license_number: String,
    #[serde(default)]
    pub vehicle_type: Option<VehicleType>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

fn default_available() -> bool { true }

impl DriverInput {
    /// Build an input with the wire defaults (no vehicle, available).
    pub fn new(name: impl Into<String>, license_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            license_number: license_number.into(),
            vehicle_type: None,
            is_available: true,
        }
    }

    pub fn with_vehicle(mut self, vehicle_type: VehicleType) -> Self {
        self.vehicle_type = Some(vehicle_type);
        self
    }

    pub fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }
}

impl Driver {
    pub fn from_input(id: u64, input: DriverInput) -> Self {
        Self {
            id,
            name: input.name,
            license_number: input.license_number,
            vehicle_type: input.vehicle_type,
            is_available: input.is_available,
        }
    }

    /// Overwrite all mutable fields; the id is left untouched.
    pub fn apply(&mut self, input: DriverInput) {
        self.name = input.name;
        self.license_number = input.license_number;
        self.vehicle_type = input.vehicle_type;
        self.is_available = input.is_available;
    }
}

/// Optional list predicates, combined with AND.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverFilter {
    pub is_available: Option<bool>,
    pub vehicle_type: Option<VehicleType>,
    pub name: Option<String>,
}

impl DriverFilter {
    pub fn is_empty(&self) -> bool {
        self.is_available.is_none() && self.vehicle_type.is_none() && self.name.is_none()
    }

    pub fn matches(&self, driver: &Driver) -> bool {
        if let Some(avail) = self.is_available {
            if driver.is_available != avail {
                return false;
            }
        }
        if let Some(vt) = self.vehicle_type {
            if driver.vehicle_type != Some(vt) {
                return false;
            }
        }
        if let Some(needle) = &self.name {
            if !driver.name.to_lowercase().contains(&needle.to_lowercase()) {
                return false;
            }
        }
        true
    }

    /// Keep matching drivers in their original order.
    pub fn apply(&self, drivers: Vec<Driver>) -> Vec<Driver> {
        if self.is_empty() {
            return drivers;
        }
        drivers.into_iter().filter(|d| self.matches(d)).collect()
    }
}
