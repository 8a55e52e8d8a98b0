//! Environment domain types
//!
//! Describes a deployment environment: its identifiers and the
//! notification channel its alarms report to.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Organisation prefix shared by every generated name
pub const NAME_ROOT: &str = "AHS-EHR";

/// Deployment environment name
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EnvironmentName {
    Dev,
    Staging,
}

impl EnvironmentName {
    pub const ALL: [EnvironmentName; 2] = [Self::Dev, Self::Staging];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dev => "Dev",
            Self::Staging => "Staging",
        }
    }

    /// Naming prefix, e.g. `AHS-EHR-Dev`
    pub fn default_prefix(&self) -> String {
        format!("{}-{}", NAME_ROOT, self.as_str())
    }

    /// Stack name, e.g. `AHS-EHR-Dev-Monitoring-Stack`
    pub fn default_stack_name(&self) -> String {
        format!("{}-Monitoring-Stack", self.default_prefix())
    }
}

impl fmt::Display for EnvironmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnvironmentName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" => Ok(Self::Dev),
            "staging" => Ok(Self::Staging),
            _ => Err(DomainError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// Where alarm and recovery notifications are published
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NotificationChannel {
    /// Pre-existing SNS topic referenced by ARN
    Existing { topic_arn: String },
    /// Topic created alongside the alarms, with an email subscription
    Managed { topic_name: String, email: String },
}

impl NotificationChannel {
    /// Reference an existing topic
    ///
    /// # Errors
    /// Returns `DomainError::InvalidTopicArn` unless the ARN has the
    /// `arn:<partition>:sns:<region>:<account>:<name>` shape
    pub fn existing(topic_arn: &str) -> Result<Self, DomainError> {
        let parts: Vec<&str> = topic_arn.split(':').collect();
        let valid = parts.len() == 6
            && parts[0] == "arn"
            && parts[2] == "sns"
            && parts.iter().skip(3).all(|p| !p.is_empty());
        if !valid {
            return Err(DomainError::InvalidTopicArn(topic_arn.to_string()));
        }
        Ok(Self::Existing {
            topic_arn: topic_arn.to_string(),
        })
    }

    /// Create a managed topic with one email subscriber
    pub fn managed(topic_name: &str, email: &str) -> Result<Self, DomainError> {
        if topic_name.trim().is_empty() {
            return Err(DomainError::EmptyIdentifier("topic name"));
        }
        let valid_email = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && domain.contains('.'),
            None => false,
        };
        if !valid_email {
            return Err(DomainError::InvalidEmail(email.to_string()));
        }
        Ok(Self::Managed {
            topic_name: topic_name.to_string(),
            email: email.to_string(),
        })
    }

    /// Human-readable identifier of the channel
    pub fn display_id(&self) -> &str {
        match self {
            Self::Existing { topic_arn } => topic_arn,
            Self::Managed { topic_name, .. } => topic_name,
        }
    }
}

/// A fully resolved environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentDescriptor {
    pub name: EnvironmentName,
    /// Prefix for every alarm name
    pub prefix: String,
    /// Name of the synthesized stack
    pub stack_name: String,
    pub channel: NotificationChannel,
    /// Load balancer identifiers (`app/<name>/<id>`)
    pub load_balancers: Vec<String>,
    pub cluster_name: String,
    pub namespaces: Vec<String>,
    /// Grouping name to service names
    pub service_groups: BTreeMap<String, Vec<String>>,
}

impl EnvironmentDescriptor {
    /// Check that no identifier is blank
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.prefix.trim().is_empty() {
            return Err(DomainError::EmptyIdentifier("prefix"));
        }
        if self.stack_name.trim().is_empty() {
            return Err(DomainError::EmptyIdentifier("stack_name"));
        }
        if self.cluster_name.trim().is_empty() {
            return Err(DomainError::EmptyIdentifier("cluster_name"));
        }
        if self.load_balancers.iter().any(|lb| lb.trim().is_empty()) {
            return Err(DomainError::EmptyIdentifier("load balancer"));
        }
        if self.namespaces.iter().any(|ns| ns.trim().is_empty()) {
            return Err(DomainError::EmptyIdentifier("namespace"));
        }
        for (group, services) in &self.service_groups {
            if group.trim().is_empty() {
                return Err(DomainError::EmptyIdentifier("service group"));
            }
            if services.iter().any(|s| s.trim().is_empty()) {
                return Err(DomainError::EmptyIdentifier("service"));
            }
        }
        Ok(())
    }

    /// Total services across all groupings
    pub fn service_count(&self) -> usize {
        self.service_groups.values().map(Vec::len).sum()
    }

    /// (grouping, service) pairs in deterministic order
    pub fn services(&self) -> impl Iterator<Item = (&str, &str)> {
        self.service_groups
            .iter()
            .flat_map(|(group, services)| services.iter().map(move |s| (group.as_str(), s.as_str())))
    }
}

/// Short name of a load balancer identifier
///
/// `app/k8s-foo-0f33/d5bb` yields `k8s-foo-0f33`; anything else is
/// returned unchanged.
pub fn load_balancer_name(id: &str) -> &str {
    let mut parts = id.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(name), Some(_)) if !name.is_empty() => name,
        _ => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> EnvironmentDescriptor {
        let mut service_groups = BTreeMap::new();
        service_groups.insert(
            "frontend".to_string(),
            vec!["a-service".to_string(), "b-service".to_string()],
        );
        EnvironmentDescriptor {
            name: EnvironmentName::Dev,
            prefix: "AHS-EHR-Dev".to_string(),
            stack_name: "AHS-EHR-Dev-Monitoring-Stack".to_string(),
            channel: NotificationChannel::existing("arn:aws:sns:ap-south-1:123456789012:alerts")
                .unwrap(),
            load_balancers: vec!["app/lb/1".to_string()],
            cluster_name: "cluster".to_string(),
            namespaces: vec!["ns".to_string()],
            service_groups,
        }
    }

    #[test]
    fn test_environment_name_parse() {
        assert_eq!("dev".parse::<EnvironmentName>().unwrap(), EnvironmentName::Dev);
        assert_eq!(
            "Staging".parse::<EnvironmentName>().unwrap(),
            EnvironmentName::Staging
        );
        assert!("prod".parse::<EnvironmentName>().is_err());
    }

    #[test]
    fn test_default_names() {
        assert_eq!(EnvironmentName::Dev.default_prefix(), "AHS-EHR-Dev");
        assert_eq!(
            EnvironmentName::Staging.default_stack_name(),
            "AHS-EHR-Staging-Monitoring-Stack"
        );
    }

    #[test]
    fn test_existing_channel_validates_arn() {
        assert!(NotificationChannel::existing("arn:aws:sns:ap-south-1:1:topic").is_ok());
        assert!(matches!(
            NotificationChannel::existing("arn:aws:sqs:ap-south-1:1:queue"),
            Err(DomainError::InvalidTopicArn(_))
        ));
        assert!(NotificationChannel::existing("topic").is_err());
    }

    #[test]
    fn test_managed_channel_validates_email() {
        assert!(NotificationChannel::managed("alerts", "ops@example.com").is_ok());
        assert!(matches!(
            NotificationChannel::managed("alerts", "ops"),
            Err(DomainError::InvalidEmail(_))
        ));
        assert!(NotificationChannel::managed("", "ops@example.com").is_err());
    }

    #[test]
    fn test_validate_rejects_blank_cluster() {
        let mut env = descriptor();
        assert!(env.validate().is_ok());
        env.cluster_name = " ".to_string();
        assert_eq!(
            env.validate(),
            Err(DomainError::EmptyIdentifier("cluster_name"))
        );
    }

    #[test]
    fn test_services_iteration() {
        let env = descriptor();
        assert_eq!(env.service_count(), 2);
        let pairs: Vec<_> = env.services().collect();
        assert_eq!(pairs, vec![("frontend", "a-service"), ("frontend", "b-service")]);
    }

    #[test]
    fn test_load_balancer_name() {
        assert_eq!(
            load_balancer_name("app/k8s-arcaaideveksing-0f33c6f686/d5bbcea83bc5f771"),
            "k8s-arcaaideveksing-0f33c6f686"
        );
        assert_eq!(load_balancer_name("plain"), "plain");
    }
}
