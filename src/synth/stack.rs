//! Stack synthesis
//!
//! Turns the generated alarms of one environment into a template,
//! creating or referencing the notification topic on the way.

use super::template::{
    ActionTarget, AlarmProperties, Output, Resource, SubscriptionProperties, Tag, Template,
    TopicProperties,
};
use crate::domain::{AlarmDescriptor, EnvironmentName, NotificationChannel, Transition};
use crate::error::SynthError;
use crate::generator::EnvironmentAlarms;
use std::collections::HashMap;

/// Tag key carrying the environment name
pub const ENVIRONMENT_TAG: &str = "Environment";

/// A synthesized stack
#[derive(Debug, Clone)]
pub struct Stack {
    pub name: String,
    pub environment: EnvironmentName,
    pub template: Template,
    pub alarm_count: usize,
}

impl Stack {
    /// Synthesize the stack for one environment
    pub fn synthesize(generated: &EnvironmentAlarms) -> Result<Self, SynthError> {
        let env = &generated.environment;
        let mut builder = StackBuilder::new(&env.stack_name, &env.prefix, env.name);

        for alarm in &generated.alarms {
            builder.add_alarm(alarm)?;
        }

        log::info!(
            "Synthesized {} ({} alarms, {} resources)",
            env.stack_name,
            generated.alarms.len(),
            builder.template.resources.len()
        );

        Ok(Self {
            name: env.stack_name.clone(),
            environment: env.name,
            template: builder.template,
            alarm_count: generated.alarms.len(),
        })
    }

    /// File name of the template inside an assembly
    pub fn template_file(&self) -> String {
        format!("{}.template.json", self.name)
    }
}

struct StackBuilder<'a> {
    stack_name: &'a str,
    prefix: &'a str,
    environment: EnvironmentName,
    template: Template,
    /// Resolved targets keyed by channel identifier
    channels: HashMap<String, ActionTarget>,
}

impl<'a> StackBuilder<'a> {
    fn new(stack_name: &'a str, prefix: &'a str, environment: EnvironmentName) -> Self {
        Self {
            stack_name,
            prefix,
            environment,
            template: Template::new(format!(
                "CloudWatch alarms for the {} environment",
                environment
            )),
            channels: HashMap::new(),
        }
    }

    fn tags(&self) -> Vec<Tag> {
        vec![Tag::new(ENVIRONMENT_TAG, self.environment.as_str())]
    }

    /// Action target for a channel, creating its resources on first use
    fn resolve_channel(&mut self, channel: &NotificationChannel) -> Result<ActionTarget, SynthError> {
        if let Some(target) = self.channels.get(channel.display_id()) {
            return Ok(target.clone());
        }

        let target = match channel {
            NotificationChannel::Existing { topic_arn } => ActionTarget::Arn(topic_arn.clone()),
            NotificationChannel::Managed { topic_name, email } => {
                let topic = Resource::Topic(TopicProperties {
                    topic_name: topic_name.clone(),
                    tags: self.tags(),
                });
                let topic_id = self.template.add_resource(
                    self.stack_name,
                    &format!("{}-AlertsTopic", self.prefix),
                    topic,
                )?;
                let topic_ref = ActionTarget::reference(&topic_id);

                let subscription = Resource::Subscription(SubscriptionProperties {
                    protocol: "email".to_string(),
                    endpoint: email.clone(),
                    topic_arn: topic_ref.clone(),
                });
                self.template.add_resource(
                    self.stack_name,
                    &format!("{}-AlertsEmailSubscription", self.prefix),
                    subscription,
                )?;

                self.template.outputs.insert(
                    format!("{}Arn", topic_id),
                    Output {
                        description: format!("ARN of {}", topic_name),
                        value: topic_ref.clone(),
                    },
                );
                topic_ref
            }
        };

        self.channels
            .insert(channel.display_id().to_string(), target.clone());
        Ok(target)
    }

    fn targets_for(
        &mut self,
        alarm: &AlarmDescriptor,
        transition: Transition,
    ) -> Result<Vec<ActionTarget>, SynthError> {
        alarm
            .channels_for(transition)
            .map(|channel| self.resolve_channel(channel))
            .collect()
    }

    fn add_alarm(&mut self, alarm: &AlarmDescriptor) -> Result<(), SynthError> {
        let alarm_actions = self.targets_for(alarm, Transition::Alarm)?;
        let ok_actions = self.targets_for(alarm, Transition::Recovery)?;

        let properties = AlarmProperties {
            alarm_name: alarm.name.clone(),
            namespace: alarm.metric_namespace().to_string(),
            metric_name: alarm.rule.name.clone(),
            dimensions: alarm.scope.dimensions(),
            statistic: alarm.rule.statistic,
            period: alarm.rule.period_secs(),
            evaluation_periods: alarm.rule.evaluation_periods(),
            threshold: alarm.rule.threshold.value(),
            comparison_operator: alarm.comparison,
            alarm_actions,
            ok_actions,
            tags: self.tags(),
        };

        self.template
            .add_resource(self.stack_name, &alarm.name, Resource::Alarm(properties))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, NotificationMode};
    use crate::generator::AlarmGenerator;

    fn generate(config: &Config) -> EnvironmentAlarms {
        let env = config
            .resolve_environments(&[EnvironmentName::Dev])
            .unwrap()
            .remove(0);
        AlarmGenerator::default().generate(&env).unwrap()
    }

    #[test]
    fn test_existing_topic_stack() {
        let stack = Stack::synthesize(&generate(&Config::default())).unwrap();
        assert_eq!(stack.name, "AHS-EHR-Dev-Monitoring-Stack");
        assert_eq!(stack.alarm_count, 33);
        assert_eq!(stack.template.resources.len(), 33);
        assert_eq!(stack.template.count_of("AWS::SNS::Topic"), 0);
        assert!(stack.template.outputs.is_empty());
        assert_eq!(stack.template_file(), "AHS-EHR-Dev-Monitoring-Stack.template.json");
    }

    #[test]
    fn test_alarm_properties() {
        let stack = Stack::synthesize(&generate(&Config::default())).unwrap();
        let json = serde_json::to_value(&stack.template).unwrap();
        let alarm = &json["Resources"]["AHSEHRDevarcaquestdevservicenumberofrunningpods"];

        assert_eq!(alarm["Type"], "AWS::CloudWatch::Alarm");
        let props = &alarm["Properties"];
        assert_eq!(props["AlarmName"], "AHS-EHR-Dev-arcaquest-dev-service_number_of_running_pods");
        assert_eq!(props["Namespace"], "ContainerInsights");
        assert_eq!(props["Statistic"], "Minimum");
        assert_eq!(props["Period"], 300);
        assert_eq!(props["EvaluationPeriods"], 1);
        assert_eq!(props["ComparisonOperator"], "LessThanThreshold");
        assert_eq!(props["Dimensions"][1]["Value"], "arcaquest-dev");
        assert_eq!(props["AlarmActions"], props["OKActions"]);
        assert_eq!(
            props["AlarmActions"][0],
            "arn:aws:sns:ap-south-1:829876691474:AHS-EHR-Dev-CloudWatch-Alerts"
        );
        assert_eq!(props["Tags"][0]["Value"], "Dev");
    }

    #[test]
    fn test_managed_topic_stack() {
        let mut config = Config::default();
        config.notification.mode = NotificationMode::Managed;
        config.notification.email = Some("ops@example.com".to_string());

        let stack = Stack::synthesize(&generate(&config)).unwrap();
        assert_eq!(stack.template.resources.len(), 35);
        assert_eq!(stack.template.count_of("AWS::SNS::Topic"), 1);
        assert_eq!(stack.template.count_of("AWS::SNS::Subscription"), 1);
        assert_eq!(stack.template.outputs.len(), 1);

        let json = serde_json::to_value(&stack.template).unwrap();
        let subscription = &json["Resources"]["AHSEHRDevAlertsEmailSubscription"]["Properties"];
        assert_eq!(subscription["Protocol"], "email");
        assert_eq!(subscription["TopicArn"]["Ref"], "AHSEHRDevAlertsTopic");

        let alarm = &json["Resources"]["AHSEHRDevWorkerNodeclusternodecount"]["Properties"];
        assert_eq!(alarm["AlarmActions"][0]["Ref"], "AHSEHRDevAlertsTopic");
        assert_eq!(alarm["OKActions"][0]["Ref"], "AHSEHRDevAlertsTopic");
    }
}
