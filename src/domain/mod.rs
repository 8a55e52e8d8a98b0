//! Domain models for alarmgen
//!
//! This module contains all domain types with validation.
//! Types are validated on construction (fail-fast pattern).

pub mod alarm;
pub mod catalog;
pub mod environment;
pub mod metric;

pub use alarm::{AlarmDescriptor, AlarmScope, Dimension, NotificationBinding, Transition};
pub use catalog::{AlarmCategory, MetricCatalog};
pub use environment::{
    load_balancer_name, EnvironmentDescriptor, EnvironmentName, NotificationChannel,
};
pub use metric::{
    ComparisonOperator, MetricNamespace, MetricRule, Statistic, Threshold, EVALUATION_PERIODS,
    EVALUATION_WINDOW, RUNNING_PODS_METRIC,
};
