use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Timestamps attached to a measurement.
///
/// `local` is the wall-clock time at the reporting location and is the only
/// field the dashboard bins on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementDate {
    #[serde(default)]
    pub utc: Option<String>,
    pub local: String,
}

/// A single reading reported by a location.
///
/// Fields other than `parameter` and `date.local` are carried through
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub parameter: String,
    pub date: MeasurementDate,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Measurement {
    /// Build a measurement from a parameter id and a local timestamp.
    pub fn new(parameter: impl Into<String>, timestamp_local: impl Into<String>) -> Self {
        Measurement {
            parameter: parameter.into(),
            date: MeasurementDate {
                utc: None,
                local: timestamp_local.into(),
            },
            value: None,
            unit: None,
            extra: Map::new(),
        }
    }

    /// The reporting location's wall-clock timestamp.
    pub fn timestamp_local(&self) -> &str {
        &self.date.local
    }

    /// Keep the measurements recorded for one parameter, in input order.
    pub fn for_parameter<'a>(
        measurements: &'a [Measurement],
        parameter_id: &'a str,
    ) -> impl Iterator<Item = &'a Measurement> + 'a {
        measurements
            .iter()
            .filter(move |m| m.parameter == parameter_id)
    }
}
