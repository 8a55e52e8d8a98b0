//! Metric rule domain types
//!
//! Provides validated types for thresholds, statistics and comparison
//! operators used by alarm rules.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Metric that checks for under-provisioning instead of saturation
pub const RUNNING_PODS_METRIC: &str = "service_number_of_running_pods";

/// Evaluation window applied to every alarm (5 minutes)
pub const EVALUATION_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Number of windows that must breach before an alarm fires
pub const EVALUATION_PERIODS: u32 = 1;

/// Aggregation statistic applied over the evaluation window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Sum,
    Average,
    Minimum,
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "Sum"),
            Self::Average => write!(f, "Average"),
            Self::Minimum => write!(f, "Minimum"),
        }
    }
}

/// Direction of the threshold comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOperator {
    /// Fires on excess / saturation
    GreaterThanThreshold,
    /// Fires on absence / under-provisioning
    LessThanThreshold,
}

impl ComparisonOperator {
    /// Pick the comparison direction for a metric
    ///
    /// Only the running pod count alarms when it drops below the threshold.
    pub fn for_metric(metric_name: &str) -> Self {
        if metric_name == RUNNING_PODS_METRIC {
            Self::LessThanThreshold
        } else {
            Self::GreaterThanThreshold
        }
    }

    /// Short symbol for table output
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::GreaterThanThreshold => ">",
            Self::LessThanThreshold => "<",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GreaterThanThreshold => write!(f, "GreaterThanThreshold"),
            Self::LessThanThreshold => write!(f, "LessThanThreshold"),
        }
    }
}

/// CloudWatch metric namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricNamespace {
    /// Application load balancer metrics
    #[serde(rename = "AWS/ApplicationELB")]
    ApplicationElb,
    /// EKS Container Insights metrics
    ContainerInsights,
}

impl MetricNamespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ApplicationElb => "AWS/ApplicationELB",
            Self::ContainerInsights => "ContainerInsights",
        }
    }
}

impl fmt::Display for MetricNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alarm threshold
///
/// Validated on construction to be a finite number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(into = "f64")]
pub struct Threshold(f64);

impl Threshold {
    /// Create a new threshold
    ///
    /// # Errors
    /// Returns `DomainError::InvalidValue` for NaN or infinite values
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidValue(format!(
                "threshold must be finite, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Create a threshold from a literal table entry
    pub(crate) const fn new_unchecked(value: f64) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Threshold> for f64 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

/// A single metric rule: name, threshold and statistic
///
/// The evaluation window and period count are fixed for every rule.
/// Deserialized rules go through [`MetricRule::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMetricRule")]
pub struct MetricRule {
    /// CloudWatch metric name
    pub name: String,
    /// Threshold the statistic is compared against
    pub threshold: Threshold,
    /// Aggregation over the window
    pub statistic: Statistic,
}

impl MetricRule {
    /// Create a new metric rule with validation
    pub fn new(name: &str, threshold: f64, statistic: Statistic) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::EmptyIdentifier("metric name"));
        }
        let threshold = Threshold::new(threshold).map_err(|_| DomainError::InvalidThreshold {
            metric: name.to_string(),
            value: threshold.to_string(),
        })?;
        Ok(Self {
            name: name.to_string(),
            threshold,
            statistic,
        })
    }

    /// Create a rule from a literal table entry
    pub(crate) fn literal(name: &str, threshold: f64, statistic: Statistic) -> Self {
        Self {
            name: name.to_string(),
            threshold: Threshold::new_unchecked(threshold),
            statistic,
        }
    }

    /// Comparison direction derived from the metric name
    pub fn comparison(&self) -> ComparisonOperator {
        ComparisonOperator::for_metric(&self.name)
    }

    /// Evaluation window in seconds
    pub fn period_secs(&self) -> u64 {
        EVALUATION_WINDOW.as_secs()
    }

    pub fn evaluation_periods(&self) -> u32 {
        EVALUATION_PERIODS
    }
}

/// Unvalidated rule as read from a config file
#[derive(Deserialize)]
struct RawMetricRule {
    name: String,
    threshold: f64,
    statistic: Statistic,
}

impl TryFrom<RawMetricRule> for MetricRule {
    type Error = DomainError;

    fn try_from(raw: RawMetricRule) -> Result<Self, Self::Error> {
        Self::new(&raw.name, raw.threshold, raw.statistic)
    }
}
