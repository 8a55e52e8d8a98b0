//! Alarm naming
//!
//! Builds composite alarm names from the environment prefix, the scope
//! identifiers and the metric name.

use crate::domain::{load_balancer_name, AlarmScope};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Segment used for load balancer alarms
const EDGE_SEGMENT: &str = "ALB";
/// Segment used for node alarms under the compact scheme
const NODE_SEGMENT: &str = "WorkerNode";

/// How scope identifiers are folded into alarm names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingScheme {
    /// `{prefix}-{service}-{metric}` and `{prefix}-WorkerNode-{metric}`
    #[default]
    Compact,
    /// `{prefix}-{group}-{service}-{metric}` and `{prefix}-{cluster}-{metric}`
    Qualified,
}

impl fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Qualified => write!(f, "qualified"),
        }
    }
}

/// Name builder for one environment
#[derive(Debug, Clone)]
pub struct AlarmNamer<'a> {
    prefix: &'a str,
    scheme: NamingScheme,
    /// Whether the environment has more than one load balancer
    qualify_load_balancers: bool,
}

impl<'a> AlarmNamer<'a> {
    pub fn new(prefix: &'a str, scheme: NamingScheme, load_balancer_count: usize) -> Self {
        Self {
            prefix,
            scheme,
            qualify_load_balancers: load_balancer_count > 1,
        }
    }

    /// Composite name for a metric on a scope
    pub fn name(&self, scope: &AlarmScope, metric: &str) -> String {
        let p = self.prefix;
        match scope {
            AlarmScope::LoadBalancer { load_balancer } if self.qualify_load_balancers => format!(
                "{}-{}-{}-{}",
                p,
                EDGE_SEGMENT,
                load_balancer_name(load_balancer),
                metric
            ),
            AlarmScope::LoadBalancer { .. } => format!("{}-{}-{}", p, EDGE_SEGMENT, metric),
            AlarmScope::Namespace { namespace, .. } => format!("{}-{}-{}", p, namespace, metric),
            AlarmScope::Service {
                namespace, service, ..
            } => match self.scheme {
                NamingScheme::Compact => format!("{}-{}-{}", p, service, metric),
                NamingScheme::Qualified => format!("{}-{}-{}-{}", p, namespace, service, metric),
            },
            AlarmScope::Cluster { cluster } => match self.scheme {
                NamingScheme::Compact => format!("{}-{}-{}", p, NODE_SEGMENT, metric),
                NamingScheme::Qualified => format!("{}-{}-{}", p, cluster, metric),
            },
        }
    }
}
