//! Health report domain model
//!
//! A [`HealthReport`] is the validated output of one tongue analysis. It is
//! immutable once built: fields are private and only readable through
//! accessors. A [`HistoryEntry`] is a report admitted to the local history
//! under a generated [`EntryId`].

use super::errors::ServiceError;
use super::ids::EntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// General health classification returned by the vision service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthStatus {
    /// All statuses, in the order the service schema enumerates them
    pub const ALL: [HealthStatus; 4] = [
        HealthStatus::Excellent,
        HealthStatus::Good,
        HealthStatus::Fair,
        HealthStatus::Poor,
    ];

    /// Wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent",
            HealthStatus::Good => "Good",
            HealthStatus::Fair => "Fair",
            HealthStatus::Poor => "Poor",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthStatus {
    type Err = ServiceError;

    /// Exact, case-sensitive match against the closed set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HealthStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ServiceError::UnknownHealthStatus(s.to_string()))
    }
}

/// Structured health estimate for a single scan
///
/// # Examples
///
/// ```
/// use glossa::domain::report::{HealthReport, HealthStatus};
/// use chrono::{TimeZone, Utc};
///
/// let report = HealthReport::builder()
///     .hemoglobin_estimate("13.0 g/dL")
///     .health_status(HealthStatus::Good)
///     .observations(vec!["mild coating".to_string()])
///     .recommendations(vec!["hydrate".to_string()])
///     .description("ok")
///     .timestamp(Utc.timestamp_millis_opt(1000).unwrap())
///     .build()
///     .unwrap();
///
/// assert_eq!(report.health_status(), HealthStatus::Good);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    hemoglobin_estimate: String,
    health_status: HealthStatus,
    observations: Vec<String>,
    recommendations: Vec<String>,
    description: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl HealthReport {
    /// Creates a new builder for constructing a HealthReport
    pub fn builder() -> HealthReportBuilder {
        HealthReportBuilder::default()
    }

    /// Validates a report object received from the vision service
    ///
    /// Every field must be present with the expected JSON type and
    /// `healthStatus` must be one of the enumerated values. The timestamp is
    /// assigned by the caller at receipt time; any timestamp in the payload is
    /// ignored.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidResponse`] if the payload is not an object or a field has the wrong type
    /// - [`ServiceError::MissingFields`] if any required field is absent or null
    /// - [`ServiceError::UnknownHealthStatus`] if the status is outside the closed set
    pub fn from_service_value(
        value: &Value,
        received_at: DateTime<Utc>,
    ) -> Result<Self, ServiceError> {
        let object = value.as_object().ok_or_else(|| {
            ServiceError::InvalidResponse("report must be a JSON object".to_string())
        })?;

        let missing: Vec<String> = REQUIRED_FIELDS
            .iter()
            .filter(|field| object.get(**field).map_or(true, Value::is_null))
            .map(|field| field.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ServiceError::MissingFields(missing));
        }

        let hemoglobin_estimate = string_field(object, "hemoglobinEstimate")?;
        let health_status: HealthStatus = string_field(object, "healthStatus")?.parse()?;
        let observations = string_list_field(object, "observations")?;
        let recommendations = string_list_field(object, "recommendations")?;
        let description = string_field(object, "description")?;

        if observations.is_empty() {
            tracing::warn!("Service returned a report without observations");
        }

        Ok(Self {
            hemoglobin_estimate,
            health_status,
            observations,
            recommendations,
            description,
            timestamp: received_at,
        })
    }

    /// Estimated hemoglobin level, e.g. "12.5 g/dL"
    pub fn hemoglobin_estimate(&self) -> &str {
        &self.hemoglobin_estimate
    }

    /// General health classification
    pub fn health_status(&self) -> HealthStatus {
        self.health_status
    }

    /// Visual findings, in service order
    pub fn observations(&self) -> &[String] {
        &self.observations
    }

    /// Advice, in service order
    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    /// Short summary of the findings
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Local receipt time of the report
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Plain-text summary suitable for sharing
    pub fn share_text(&self) -> String {
        format!(
            "TongueHealth AI Report\n--------------------\nStatus: {}\nEst. Hb: {}\nFindings: {}",
            self.health_status,
            self.hemoglobin_estimate,
            self.observations.join(", ")
        )
    }
}

/// Fields a service report must carry
pub const REQUIRED_FIELDS: [&str; 5] = [
    "hemoglobinEstimate",
    "healthStatus",
    "observations",
    "recommendations",
    "description",
];

fn string_field(object: &serde_json::Map<String, Value>, name: &str) -> Result<String, ServiceError> {
    match object.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(ServiceError::InvalidResponse(format!(
            "field '{name}' must be a string"
        ))),
    }
}

fn string_list_field(
    object: &serde_json::Map<String, Value>,
    name: &str,
) -> Result<Vec<String>, ServiceError> {
    let items = object.get(name).and_then(Value::as_array).ok_or_else(|| {
        ServiceError::InvalidResponse(format!("field '{name}' must be an array of strings"))
    })?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ServiceError::InvalidResponse(format!(
                    "field '{name}' must be an array of strings"
                ))
            })
        })
        .collect()
}

/// Builder for constructing HealthReport instances
#[derive(Debug, Default)]
pub struct HealthReportBuilder {
    hemoglobin_estimate: Option<String>,
    health_status: Option<HealthStatus>,
    observations: Vec<String>,
    recommendations: Vec<String>,
    description: Option<String>,
    timestamp: Option<DateTime<Utc>>,
}

impl HealthReportBuilder {
    /// Creates a new HealthReportBuilder
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hemoglobin estimate
    pub fn hemoglobin_estimate(mut self, estimate: impl Into<String>) -> Self {
        self.hemoglobin_estimate = Some(estimate.into());
        self
    }

    /// Sets the health status
    pub fn health_status(mut self, status: HealthStatus) -> Self {
        self.health_status = Some(status);
        self
    }

    /// Sets the observations
    pub fn observations(mut self, observations: Vec<String>) -> Self {
        self.observations = observations;
        self
    }

    /// Sets the recommendations
    pub fn recommendations(mut self, recommendations: Vec<String>) -> Self {
        self.recommendations = recommendations;
        self
    }

    /// Sets the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the receipt timestamp
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Builds the HealthReport
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is missing
    pub fn build(self) -> Result<HealthReport, String> {
        Ok(HealthReport {
            hemoglobin_estimate: self
                .hemoglobin_estimate
                .ok_or("hemoglobin_estimate is required")?,
            health_status: self.health_status.ok_or("health_status is required")?,
            observations: self.observations,
            recommendations: self.recommendations,
            description: self.description.ok_or("description is required")?,
            timestamp: self.timestamp.ok_or("timestamp is required")?,
        })
    }
}

/// A report admitted to the local history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: EntryId,
    #[serde(flatten)]
    report: HealthReport,
}

impl HistoryEntry {
    /// Pairs a report with its history identifier
    pub fn new(id: EntryId, report: HealthReport) -> Self {
        Self { id, report }
    }

    /// Identifier of this entry
    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// The stored report
    pub fn report(&self) -> &HealthReport {
        &self.report
    }
}
