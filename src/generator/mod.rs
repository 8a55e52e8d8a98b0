//! Alarm generation
//!
//! Expands an environment and the metric catalog into one alarm
//! descriptor per (scope, metric) combination.

pub mod naming;

pub use naming::{AlarmNamer, NamingScheme};

use crate::domain::{
    AlarmCategory, AlarmDescriptor, AlarmScope, EnvironmentDescriptor, MetricCatalog,
};
use crate::error::GenerateError;
use std::collections::{BTreeMap, HashSet};

/// Generated alarms for one environment
#[derive(Debug, Clone)]
pub struct EnvironmentAlarms {
    pub environment: EnvironmentDescriptor,
    pub alarms: Vec<AlarmDescriptor>,
}

impl EnvironmentAlarms {
    /// Alarms in a category
    pub fn by_category(&self, category: AlarmCategory) -> impl Iterator<Item = &AlarmDescriptor> {
        self.alarms.iter().filter(move |a| a.category() == category)
    }

    /// Alarm count per category, every category present
    pub fn counts(&self) -> BTreeMap<AlarmCategory, usize> {
        let mut counts: BTreeMap<AlarmCategory, usize> =
            AlarmCategory::ALL.iter().map(|c| (*c, 0)).collect();
        for alarm in &self.alarms {
            *counts.entry(alarm.category()).or_insert(0) += 1;
        }
        counts
    }

    pub fn len(&self) -> usize {
        self.alarms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alarms.is_empty()
    }
}

/// Expands environments into alarm descriptors
#[derive(Debug, Clone, Default)]
pub struct AlarmGenerator {
    catalog: MetricCatalog,
    scheme: NamingScheme,
}

impl AlarmGenerator {
    /// Create a generator over a catalog
    pub fn new(catalog: MetricCatalog, scheme: NamingScheme) -> Self {
        Self { catalog, scheme }
    }

    /// Standard catalog with the given naming scheme
    pub fn with_scheme(scheme: NamingScheme) -> Self {
        Self::new(MetricCatalog::standard(), scheme)
    }

    pub fn catalog(&self) -> &MetricCatalog {
        &self.catalog
    }

    /// Generate every alarm for an environment
    ///
    /// Order: load balancer alarms, namespace alarms, service alarms, then
    /// node alarms.
    ///
    /// # Errors
    /// Returns `GenerateError::DuplicateAlarmName` if two scopes fold onto
    /// the same composite name.
    pub fn generate(&self, env: &EnvironmentDescriptor) -> Result<EnvironmentAlarms, GenerateError> {
        let namer = AlarmNamer::new(&env.prefix, self.scheme, env.load_balancers.len());

        let mut scopes = Vec::new();
        for lb in &env.load_balancers {
            scopes.push(AlarmScope::LoadBalancer {
                load_balancer: lb.clone(),
            });
        }
        for ns in &env.namespaces {
            scopes.push(AlarmScope::Namespace {
                cluster: env.cluster_name.clone(),
                namespace: ns.clone(),
            });
        }
        for (group, service) in env.services() {
            scopes.push(AlarmScope::Service {
                cluster: env.cluster_name.clone(),
                namespace: group.to_string(),
                service: service.to_string(),
            });
        }
        scopes.push(AlarmScope::Cluster {
            cluster: env.cluster_name.clone(),
        });

        let mut alarms = Vec::new();
        let mut names = HashSet::new();

        for scope in scopes {
            for rule in self.catalog.rules(scope.category()) {
                let name = namer.name(&scope, &rule.name);
                if !names.insert(name.clone()) {
                    return Err(GenerateError::DuplicateAlarmName {
                        environment: env.name.to_string(),
                        name,
                    });
                }
                alarms.push(AlarmDescriptor::new(
                    name,
                    scope.clone(),
                    rule.clone(),
                    &env.channel,
                ));
            }
        }

        log::debug!(
            "Generated {} alarms for {} ({})",
            alarms.len(),
            env.name,
            self.scheme
        );

        Ok(EnvironmentAlarms {
            environment: env.clone(),
            alarms,
        })
    }

    /// Generate alarms for several environments
    pub fn generate_all(
        &self,
        envs: &[EnvironmentDescriptor],
    ) -> Result<Vec<EnvironmentAlarms>, GenerateError> {
        envs.iter().map(|env| self.generate(env)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::domain::{ComparisonOperator, EnvironmentName, Transition, RUNNING_PODS_METRIC};

    fn dev() -> EnvironmentDescriptor {
        Config::default()
            .resolve_environments(&[EnvironmentName::Dev])
            .unwrap()
            .remove(0)
    }

    #[test]
    fn test_dev_alarm_count() {
        let alarms = AlarmGenerator::default().generate(&dev()).unwrap();
        assert_eq!(alarms.len(), 33);

        let counts = alarms.counts();
        assert_eq!(counts[&AlarmCategory::Edge], 4);
        assert_eq!(counts[&AlarmCategory::Namespace], 16);
        assert_eq!(counts[&AlarmCategory::Service], 8);
        assert_eq!(counts[&AlarmCategory::Node], 5);
    }

    #[test]
    fn test_first_alarm_matches_edge_table() {
        let alarms = AlarmGenerator::default().generate(&dev()).unwrap();
        let first = &alarms.alarms[0];
        assert_eq!(first.name, "AHS-EHR-Dev-ALB-HTTPCode_ELB_5XX_Count");
        assert_eq!(first.rule.threshold.value(), 20.0);
    }

    #[test]
    fn test_comparison_directions() {
        let alarms = AlarmGenerator::default().generate(&dev()).unwrap();
        for alarm in &alarms.alarms {
            let expected = if alarm.rule.name == RUNNING_PODS_METRIC {
                ComparisonOperator::LessThanThreshold
            } else {
                ComparisonOperator::GreaterThanThreshold
            };
            assert_eq!(alarm.comparison, expected, "{}", alarm.name);
        }
    }

    #[test]
    fn test_every_alarm_bound_to_channel() {
        let env = dev();
        let alarms = AlarmGenerator::default().generate(&env).unwrap();
        for alarm in &alarms.alarms {
            let on_alarm: Vec<_> = alarm.channels_for(Transition::Alarm).collect();
            let on_ok: Vec<_> = alarm.channels_for(Transition::Recovery).collect();
            assert_eq!(on_alarm, vec![&env.channel]);
            assert_eq!(on_ok, vec![&env.channel]);
        }
    }

    #[test]
    fn test_service_names_collide_across_groups_in_compact_scheme() {
        let mut env = dev();
        env.service_groups.insert(
            "another-group".to_string(),
            vec!["arca-emr-frontend-service".to_string()],
        );

        let result = AlarmGenerator::with_scheme(NamingScheme::Compact).generate(&env);
        assert!(matches!(
            result,
            Err(GenerateError::DuplicateAlarmName { .. })
        ));

        let alarms = AlarmGenerator::with_scheme(NamingScheme::Qualified)
            .generate(&env)
            .unwrap();
        assert_eq!(alarms.counts()[&AlarmCategory::Service], 12);
    }

    #[test]
    fn test_two_load_balancers_stay_unique() {
        let mut env = dev();
        env.load_balancers.push("app/k8s-second-lb/0123456789".to_string());

        let alarms = AlarmGenerator::default().generate(&env).unwrap();
        assert_eq!(alarms.counts()[&AlarmCategory::Edge], 8);
        assert!(alarms
            .alarms
            .iter()
            .any(|a| a.name == "AHS-EHR-Dev-ALB-k8s-second-lb-RequestCount"));
    }

    #[test]
    fn test_empty_lists_still_emit_node_alarms() {
        let mut env = dev();
        env.load_balancers.clear();
        env.namespaces.clear();
        env.service_groups.clear();

        let alarms = AlarmGenerator::default().generate(&env).unwrap();
        assert_eq!(alarms.len(), 5);
        assert_eq!(alarms.by_category(AlarmCategory::Node).count(), 5);
    }
}
