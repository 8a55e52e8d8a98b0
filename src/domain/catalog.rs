//! Metric catalog
//!
//! Literal metric tables for the four alarm categories.

use super::metric::{MetricNamespace, MetricRule, Statistic, RUNNING_PODS_METRIC};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Alarm category, one per metric table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmCategory {
    /// Load balancer metrics
    Edge,
    /// Pod metrics aggregated per namespace
    Namespace,
    /// Pod metrics for a single service
    Service,
    /// Worker node and cluster metrics
    Node,
}

impl AlarmCategory {
    pub const ALL: [AlarmCategory; 4] = [Self::Edge, Self::Namespace, Self::Service, Self::Node];

    /// CloudWatch namespace the category's metrics live in
    pub fn metric_namespace(&self) -> MetricNamespace {
        match self {
            Self::Edge => MetricNamespace::ApplicationElb,
            Self::Namespace | Self::Service | Self::Node => MetricNamespace::ContainerInsights,
        }
    }
}

impl fmt::Display for AlarmCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Edge => write!(f, "edge"),
            Self::Namespace => write!(f, "namespace"),
            Self::Service => write!(f, "service"),
            Self::Node => write!(f, "node"),
        }
    }
}

/// Metric tables for every alarm category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricCatalog {
    /// Load balancer metrics
    pub edge: Vec<MetricRule>,
    /// Pod metrics, shared by namespace and service scopes
    pub pod: Vec<MetricRule>,
    /// Node and cluster metrics
    pub node: Vec<MetricRule>,
}

impl MetricCatalog {
    /// The standard tables
    pub fn standard() -> Self {
        Self {
            edge: vec![
                MetricRule::literal("HTTPCode_ELB_5XX_Count", 20.0, Statistic::Sum),
                MetricRule::literal("HTTPCode_ELB_4XX_Count", 50.0, Statistic::Sum),
                MetricRule::literal("RequestCount", 10000.0, Statistic::Sum),
                MetricRule::literal("TargetResponseTime", 2.0, Statistic::Sum),
            ],
            pod: vec![
                MetricRule::literal("pod_cpu_utilization", 90.0, Statistic::Average),
                MetricRule::literal("pod_memory_utilization", 90.0, Statistic::Average),
                MetricRule::literal("pod_number_of_container_restarts", 3.0, Statistic::Sum),
                MetricRule::literal(RUNNING_PODS_METRIC, 1.0, Statistic::Minimum),
            ],
            node: vec![
                MetricRule::literal("node_memory_utilization", 80.0, Statistic::Average),
                MetricRule::literal("node_cpu_utilization", 80.0, Statistic::Average),
                MetricRule::literal("cluster_node_count", 2.0, Statistic::Average),
                MetricRule::literal("node_filesystem_utilization", 85.0, Statistic::Average),
                MetricRule::literal("cluster_failed_node_count", 1.0, Statistic::Average),
            ],
        }
    }

    /// Rules applied for a category
    pub fn rules(&self, category: AlarmCategory) -> &[MetricRule] {
        match category {
            AlarmCategory::Edge => &self.edge,
            AlarmCategory::Namespace | AlarmCategory::Service => &self.pod,
            AlarmCategory::Node => &self.node,
        }
    }
}

impl Default for MetricCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
