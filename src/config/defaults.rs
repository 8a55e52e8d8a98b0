//! Built-in environment table
//!
//! The identifiers of the resources the alarms watch in each environment.

use super::EnvironmentConfig;
use crate::domain::EnvironmentName;
use std::collections::BTreeMap;

const ACCOUNT_TOPIC_ROOT: &str = "arn:aws:sns:ap-south-1:829876691474";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn frontend_group(group: &str) -> BTreeMap<String, Vec<String>> {
    let mut groups = BTreeMap::new();
    groups.insert(
        group.to_string(),
        strings(&["arca-emr-frontend-service", "arca-admin-frontend-service"]),
    );
    groups
}

/// Dev environment
pub fn dev() -> EnvironmentConfig {
    EnvironmentConfig {
        name: EnvironmentName::Dev,
        prefix: None,
        stack_name: None,
        topic_arn: Some(format!("{}:AHS-EHR-Dev-CloudWatch-Alerts", ACCOUNT_TOPIC_ROOT)),
        load_balancers: strings(&["app/k8s-arcaaideveksing-0f33c6f686/d5bbcea83bc5f771"]),
        cluster_name: "AHS-EHR-Dev-arcaquest-eks".to_string(),
        namespaces: strings(&[
            "docsearch-dev",
            "emrsearchenginehttp-dev",
            "ocr-dev",
            "arcaquest-dev",
        ]),
        service_groups: frontend_group("arcaai-dev-frontend"),
    }
}

/// Staging environment
pub fn staging() -> EnvironmentConfig {
    EnvironmentConfig {
        name: EnvironmentName::Staging,
        prefix: None,
        stack_name: None,
        topic_arn: Some(format!("{}:AHS-EHR-Staging-CloudWatch-Alerts", ACCOUNT_TOPIC_ROOT)),
        load_balancers: strings(&["app/k8s-arcaaistagingeksi-f3c1c220f6/35fc3972e9fdee44"]),
        cluster_name: "AHS-EHR-Staging-arcaquest-eks".to_string(),
        namespaces: strings(&[
            "docsearch-staging",
            "emrsearchenginehttp-staging",
            "ocr-staging",
            "arcaquest-staging",
        ]),
        service_groups: frontend_group("arcaai-staging-frontend"),
    }
}

/// All built-in environments
pub fn environments() -> Vec<EnvironmentConfig> {
    vec![dev(), staging()]
}
