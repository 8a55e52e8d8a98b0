//! Alarm descriptor types
//!
//! An alarm descriptor is the derived, immutable description of one
//! alarm: its name, the metric it watches and who hears about it.

use super::catalog::AlarmCategory;
use super::environment::NotificationChannel;
use super::metric::{ComparisonOperator, MetricNamespace, MetricRule};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A metric dimension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// The resource an alarm is scoped to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlarmScope {
    LoadBalancer {
        load_balancer: String,
    },
    Namespace {
        cluster: String,
        namespace: String,
    },
    Service {
        cluster: String,
        namespace: String,
        service: String,
    },
    Cluster {
        cluster: String,
    },
}

impl AlarmScope {
    pub fn category(&self) -> AlarmCategory {
        match self {
            Self::LoadBalancer { .. } => AlarmCategory::Edge,
            Self::Namespace { .. } => AlarmCategory::Namespace,
            Self::Service { .. } => AlarmCategory::Service,
            Self::Cluster { .. } => AlarmCategory::Node,
        }
    }

    /// Metric dimensions, in CloudWatch order
    pub fn dimensions(&self) -> Vec<Dimension> {
        match self {
            Self::LoadBalancer { load_balancer } => {
                vec![Dimension::new("LoadBalancer", load_balancer)]
            }
            Self::Namespace { cluster, namespace } => vec![
                Dimension::new("ClusterName", cluster),
                Dimension::new("Namespace", namespace),
            ],
            Self::Service {
                cluster,
                namespace,
                service,
            } => vec![
                Dimension::new("ClusterName", cluster),
                Dimension::new("Namespace", namespace),
                Dimension::new("Service", service),
            ],
            Self::Cluster { cluster } => vec![Dimension::new("ClusterName", cluster)],
        }
    }

    /// Most specific identifier, used in listings
    pub fn target(&self) -> &str {
        match self {
            Self::LoadBalancer { load_balancer } => load_balancer,
            Self::Namespace { namespace, .. } => namespace,
            Self::Service { service, .. } => service,
            Self::Cluster { cluster } => cluster,
        }
    }
}

/// State transition that triggers a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transition {
    /// Entering the ALARM state
    Alarm,
    /// Returning to OK
    Recovery,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Alarm => write!(f, "ALARM"),
            Self::Recovery => write!(f, "OK"),
        }
    }
}

/// Binds one alarm transition to a notification channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationBinding {
    pub transition: Transition,
    pub channel: NotificationChannel,
}

/// One generated alarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmDescriptor {
    /// Composite alarm name, unique within an environment
    pub name: String,
    pub scope: AlarmScope,
    pub rule: MetricRule,
    pub comparison: ComparisonOperator,
    pub bindings: Vec<NotificationBinding>,
}

impl AlarmDescriptor {
    /// Build a descriptor bound to `channel` for both transitions
    pub fn new(
        name: String,
        scope: AlarmScope,
        rule: MetricRule,
        channel: &NotificationChannel,
    ) -> Self {
        let comparison = rule.comparison();
        let bindings = [Transition::Alarm, Transition::Recovery]
            .into_iter()
            .map(|transition| NotificationBinding {
                transition,
                channel: channel.clone(),
            })
            .collect();

        Self {
            name,
            scope,
            rule,
            comparison,
            bindings,
        }
    }

    pub fn category(&self) -> AlarmCategory {
        self.scope.category()
    }

    pub fn metric_namespace(&self) -> MetricNamespace {
        self.category().metric_namespace()
    }

    /// Channels notified on a given transition
    pub fn channels_for(&self, transition: Transition) -> impl Iterator<Item = &NotificationChannel> {
        self.bindings
            .iter()
            .filter(move |b| b.transition == transition)
            .map(|b| &b.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metric::Statistic;

    fn channel() -> NotificationChannel {
        NotificationChannel::existing("arn:aws:sns:ap-south-1:1:alerts").unwrap()
    }

    #[test]
    fn test_service_dimensions() {
        let scope = AlarmScope::Service {
            cluster: "c".to_string(),
            namespace: "ns".to_string(),
            service: "svc".to_string(),
        };
        let dims = scope.dimensions();
        assert_eq!(dims.len(), 3);
        assert_eq!(dims[2], Dimension::new("Service", "svc"));
        assert_eq!(scope.category(), AlarmCategory::Service);
    }

    #[test]
    fn test_descriptor_binds_both_transitions() {
        let rule = MetricRule::new("pod_cpu_utilization", 90.0, Statistic::Average).unwrap();
        let alarm = AlarmDescriptor::new(
            "x".to_string(),
            AlarmScope::Cluster {
                cluster: "c".to_string(),
            },
            rule,
            &channel(),
        );

        assert_eq!(alarm.bindings.len(), 2);
        assert_eq!(alarm.channels_for(Transition::Alarm).count(), 1);
        assert_eq!(alarm.channels_for(Transition::Recovery).count(), 1);
        assert_eq!(alarm.comparison, ComparisonOperator::GreaterThanThreshold);
        assert_eq!(alarm.metric_namespace(), MetricNamespace::ContainerInsights);
    }

    #[test]
    fn test_dimension_serializes_pascal_case() {
        let json = serde_json::to_value(Dimension::new("ClusterName", "c")).unwrap();
        assert_eq!(json["Name"], "ClusterName");
        assert_eq!(json["Value"], "c");
    }
}
