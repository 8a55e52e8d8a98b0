//! CloudFormation template model
//!
//! Typed resources serialized into the JSON template format.

use crate::domain::{ComparisonOperator, Dimension, Statistic};
use crate::error::SynthError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Template format version emitted in every template
pub const FORMAT_VERSION: &str = "2010-09-09";

/// Resource tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

/// A value that is either a literal ARN or a reference to a resource
/// in the same template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ActionTarget {
    Arn(String),
    Ref {
        #[serde(rename = "Ref")]
        logical_id: String,
    },
}

impl ActionTarget {
    pub fn reference(logical_id: &str) -> Self {
        Self::Ref {
            logical_id: logical_id.to_string(),
        }
    }
}

/// `AWS::CloudWatch::Alarm` properties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmProperties {
    pub alarm_name: String,
    pub namespace: String,
    pub metric_name: String,
    pub dimensions: Vec<Dimension>,
    pub statistic: Statistic,
    pub period: u64,
    pub evaluation_periods: u32,
    pub threshold: f64,
    pub comparison_operator: ComparisonOperator,
    pub alarm_actions: Vec<ActionTarget>,
    #[serde(rename = "OKActions")]
    pub ok_actions: Vec<ActionTarget>,
    pub tags: Vec<Tag>,
}

/// `AWS::SNS::Topic` properties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TopicProperties {
    pub topic_name: String,
    pub tags: Vec<Tag>,
}

/// `AWS::SNS::Subscription` properties
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SubscriptionProperties {
    pub protocol: String,
    pub endpoint: String,
    pub topic_arn: ActionTarget,
}

/// A template resource
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "Type", content = "Properties")]
pub enum Resource {
    #[serde(rename = "AWS::CloudWatch::Alarm")]
    Alarm(AlarmProperties),
    #[serde(rename = "AWS::SNS::Topic")]
    Topic(TopicProperties),
    #[serde(rename = "AWS::SNS::Subscription")]
    Subscription(SubscriptionProperties),
}

impl Resource {
    /// CloudFormation resource type
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Alarm(_) => "AWS::CloudWatch::Alarm",
            Self::Topic(_) => "AWS::SNS::Topic",
            Self::Subscription(_) => "AWS::SNS::Subscription",
        }
    }
}

/// Template output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub description: String,
    pub value: ActionTarget,
}

/// A CloudFormation template
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    pub description: String,
    pub resources: BTreeMap<String, Resource>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

impl Template {
    pub fn new(description: String) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            description,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Add a resource under the logical ID derived from `construct_id`
    ///
    /// Returns the logical ID.
    pub fn add_resource(
        &mut self,
        stack: &str,
        construct_id: &str,
        resource: Resource,
    ) -> Result<String, SynthError> {
        let logical_id = logical_id(construct_id)?;
        if self.resources.contains_key(&logical_id) {
            return Err(SynthError::DuplicateLogicalId {
                stack: stack.to_string(),
                logical_id,
            });
        }
        self.resources.insert(logical_id.clone(), resource);
        Ok(logical_id)
    }

    /// Number of resources of a type
    pub fn count_of(&self, type_name: &str) -> usize {
        self.resources
            .values()
            .filter(|r| r.type_name() == type_name)
            .count()
    }

    pub fn to_json_pretty(&self) -> Result<String, SynthError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Project a construct id onto a logical ID
///
/// Logical IDs may only contain ASCII letters and digits and are capped
/// at 255 characters.
pub fn logical_id(construct_id: &str) -> Result<String, SynthError> {
    let id: String = construct_id
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(255)
        .collect();
    if id.is_empty() {
        return Err(SynthError::InvalidConstructId(construct_id.to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic() -> Resource {
        Resource::Topic(TopicProperties {
            topic_name: "alerts".to_string(),
            tags: vec![Tag::new("Environment", "Dev")],
        })
    }

    #[test]
    fn test_logical_id_strips_punctuation() {
        assert_eq!(
            logical_id("AHS-EHR-Dev-ALB-HTTPCode_ELB_5XX_Count").unwrap(),
            "AHSEHRDevALBHTTPCodeELB5XXCount"
        );
        assert!(matches!(
            logical_id("--"),
            Err(SynthError::InvalidConstructId(_))
        ));
    }

    #[test]
    fn test_add_resource_detects_collision() {
        let mut template = Template::new("test".to_string());
        template.add_resource("S", "a-b", topic()).unwrap();
        let result = template.add_resource("S", "ab", topic());
        assert!(matches!(
            result,
            Err(SynthError::DuplicateLogicalId { .. })
        ));
    }

    #[test]
    fn test_resource_serialization_shape() {
        let json = serde_json::to_value(topic()).unwrap();
        assert_eq!(json["Type"], "AWS::SNS::Topic");
        assert_eq!(json["Properties"]["TopicName"], "alerts");
        assert_eq!(json["Properties"]["Tags"][0]["Key"], "Environment");
    }

    #[test]
    fn test_action_target_serialization() {
        let arn = serde_json::to_value(ActionTarget::Arn("arn:x".to_string())).unwrap();
        assert_eq!(arn, serde_json::json!("arn:x"));

        let reference = serde_json::to_value(ActionTarget::reference("Topic")).unwrap();
        assert_eq!(reference, serde_json::json!({ "Ref": "Topic" }));
    }

    #[test]
    fn test_template_omits_empty_outputs() {
        let template = Template::new("test".to_string());
        let json = serde_json::to_value(&template).unwrap();
        assert_eq!(json["AWSTemplateFormatVersion"], FORMAT_VERSION);
        assert!(json.get("Outputs").is_none());
    }
}
