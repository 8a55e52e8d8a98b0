//! Integration tests for alarm generation
//!
//! Checks the per-environment alarm counts, comparison directions, name
//! uniqueness and notification bindings against the built-in tables.

use alarmgen::config::{Config, NotificationMode};
use alarmgen::domain::{
    AlarmCategory, ComparisonOperator, EnvironmentDescriptor, MetricCatalog, Transition,
    RUNNING_PODS_METRIC,
};
use alarmgen::generator::{AlarmGenerator, EnvironmentAlarms, NamingScheme};
use std::collections::HashSet;

fn resolve(config: &Config) -> Vec<EnvironmentDescriptor> {
    config.resolve_environments(&[]).unwrap()
}

fn generate_all(config: &Config) -> Vec<EnvironmentAlarms> {
    AlarmGenerator::with_scheme(config.naming.scheme)
        .generate_all(&resolve(config))
        .unwrap()
}

fn managed_config() -> Config {
    let mut config = Config::default();
    config.notification.mode = NotificationMode::Managed;
    config.notification.email = Some("oncall@example.com".to_string());
    config
}

#[test]
fn test_category_counts_follow_environment_shape() {
    let catalog = MetricCatalog::standard();

    for generated in generate_all(&Config::default()) {
        let env = &generated.environment;
        let counts = generated.counts();

        assert_eq!(
            counts[&AlarmCategory::Edge],
            env.load_balancers.len() * catalog.edge.len()
        );
        assert_eq!(counts[&AlarmCategory::Namespace], env.namespaces.len() * 4);
        assert_eq!(counts[&AlarmCategory::Service], env.service_count() * 4);
        assert_eq!(counts[&AlarmCategory::Node], 5);
    }
}

#[test]
fn test_dev_environment_has_33_alarms_on_one_channel() {
    let all = generate_all(&Config::default());
    let dev = &all[0];

    assert_eq!(dev.len(), 4 + 16 + 8 + 5);

    let channels: HashSet<&str> = dev
        .alarms
        .iter()
        .flat_map(|a| a.bindings.iter().map(|b| b.channel.display_id()))
        .collect();
    assert_eq!(channels.len(), 1);
}

#[test]
fn test_only_running_pods_uses_less_than() {
    for scheme in [NamingScheme::Compact, NamingScheme::Qualified] {
        let mut config = Config::default();
        config.naming.scheme = scheme;

        for generated in generate_all(&config) {
            for alarm in &generated.alarms {
                if alarm.rule.name == RUNNING_PODS_METRIC {
                    assert_eq!(alarm.comparison, ComparisonOperator::LessThanThreshold);
                } else {
                    assert_eq!(alarm.comparison, ComparisonOperator::GreaterThanThreshold);
                }
            }
        }
    }
}

#[test]
fn test_alarm_names_unique_per_environment() {
    for scheme in [NamingScheme::Compact, NamingScheme::Qualified] {
        let mut config = Config::default();
        config.naming.scheme = scheme;

        for generated in generate_all(&config) {
            let names: HashSet<&str> = generated.alarms.iter().map(|a| a.name.as_str()).collect();
            assert_eq!(names.len(), generated.len(), "{:?}", scheme);
            assert!(generated
                .alarms
                .iter()
                .all(|a| a.name.starts_with(&generated.environment.prefix)));
        }
    }
}

#[test]
fn test_every_alarm_notifies_on_alarm_and_recovery() {
    for config in [Config::default(), managed_config()] {
        for generated in generate_all(&config) {
            let channel = &generated.environment.channel;
            for alarm in &generated.alarms {
                assert_eq!(alarm.bindings.len(), 2);
                assert_eq!(
                    alarm.channels_for(Transition::Alarm).collect::<Vec<_>>(),
                    vec![channel]
                );
                assert_eq!(
                    alarm.channels_for(Transition::Recovery).collect::<Vec<_>>(),
                    vec![channel]
                );
            }
        }
    }
}

#[test]
fn test_qualified_scheme_renames_service_and_node_alarms() {
    let mut config = Config::default();
    config.naming.scheme = NamingScheme::Qualified;
    let all = generate_all(&config);
    let staging = &all[1];

    let names: HashSet<&str> = staging.alarms.iter().map(|a| a.name.as_str()).collect();
    assert!(names.contains(
        "AHS-EHR-Staging-arcaai-staging-frontend-arca-emr-frontend-service-pod_cpu_utilization"
    ));
    assert!(names.contains("AHS-EHR-Staging-AHS-EHR-Staging-arcaquest-eks-cluster_node_count"));
    assert!(names.contains("AHS-EHR-Staging-ALB-RequestCount"));
    assert!(names.contains("AHS-EHR-Staging-ocr-staging-pod_memory_utilization"));
}

#[test]
fn test_metric_windows_are_fixed() {
    for generated in generate_all(&Config::default()) {
        for alarm in &generated.alarms {
            assert_eq!(alarm.rule.period_secs(), 300);
            assert_eq!(alarm.rule.evaluation_periods(), 1);
        }
    }
}
