//! Raw input rows and the validated machine record
//!
//! A [`RawRow`] is what the parsing collaborators hand to the core: a 1-based
//! row number plus whatever values were found under each column name. A
//! [`MachineRecord`] only exists once every field of a row has passed
//! validation.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The seven fields every telemetry row must carry, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    MachineId,
    RuntimeHours,
    VibrationLevel,
    Temperature,
    MaintenanceThreshold,
    MaxOperatingHours,
    ScalingFactor,
}

impl Field {
    /// All required fields in canonical (report) order.
    pub const ALL: [Field; 7] = [
        Field::MachineId,
        Field::RuntimeHours,
        Field::VibrationLevel,
        Field::Temperature,
        Field::MaintenanceThreshold,
        Field::MaxOperatingHours,
        Field::ScalingFactor,
    ];

    /// Number of fields per record
    pub const COUNT: usize = Self::ALL.len();

    /// Column name as it appears in input files
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::MachineId => "machine_id",
            Field::RuntimeHours => "runtime_hours",
            Field::VibrationLevel => "vibration_level",
            Field::Temperature => "temperature",
            Field::MaintenanceThreshold => "maintenance_threshold",
            Field::MaxOperatingHours => "max_operating_hours",
            Field::ScalingFactor => "scaling_factor",
        }
    }

    /// Look up a field by its column name
    pub fn from_name(name: &str) -> Option<Field> {
        Self::ALL.iter().copied().find(|f| f.as_str() == name)
    }

    /// Whether the field must parse as a number
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Field::MachineId)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single cell value before validation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    /// True for text cells that are empty or whitespace-only
    pub fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(s) if s.trim().is_empty())
    }

    /// Interpret the value as text (numbers are rendered back)
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Parse into a finite number, if possible
    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Number(n)
    }
}

/// One input row keyed by column name, annotated with its 1-based position
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawRow {
    pub row: usize,
    pub values: BTreeMap<String, RawValue>,
}

impl RawRow {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value for a required field, treating blank cells as absent
    pub fn get(&self, field: Field) -> Option<&RawValue> {
        self.values
            .get(field.as_str())
            .filter(|value| !value.is_blank())
    }

    /// Column names present in the row that are not required fields
    pub fn unknown_columns(&self) -> impl Iterator<Item = &str> {
        self.values
            .keys()
            .map(String::as_str)
            .filter(|name| Field::from_name(name).is_none())
    }
}

/// A fully validated telemetry record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MachineRecord {
    /// 1-based row number in the source batch
    pub row: usize,
    pub machine_id: String,
    pub runtime_hours: f64,
    pub vibration_level: f64,
    pub temperature: f64,
    pub maintenance_threshold: f64,
    pub max_operating_hours: f64,
    pub scaling_factor: f64,
}

impl MachineRecord {
    /// Numeric value of a field; `None` for `machine_id`
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::MachineId => None,
            Field::RuntimeHours => Some(self.runtime_hours),
            Field::VibrationLevel => Some(self.vibration_level),
            Field::Temperature => Some(self.temperature),
            Field::MaintenanceThreshold => Some(self.maintenance_threshold),
            Field::MaxOperatingHours => Some(self.max_operating_hours),
            Field::ScalingFactor => Some(self.scaling_factor),
        }
    }

    /// Rebuild the raw row this record was validated from
    pub fn to_raw_row(&self) -> RawRow {
        let mut row = RawRow::new(self.row).with(Field::MachineId.as_str(), self.machine_id.as_str());
        for field in Field::ALL.iter().filter(|f| f.is_numeric()) {
            if let Some(value) = self.numeric(*field) {
                row.insert(field.as_str(), value);
            }
        }
        row
    }
}
