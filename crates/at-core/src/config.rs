//! Options recognized by the auto-tune pass and their validation.

use serde::{Deserialize, Serialize};

use crate::plugin::{ConfigurationError, ConfigurationShape, OptionKind, OptionSpec};

/// Auto-tune options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoTuneConfig {
    /// Hours every day has to reach.
    #[serde(alias = "minimumDailyWorkDuration")]
    pub minimum_daily_work_duration: i32,

    /// Synthesize placeholder days for calendar gaps.
    #[serde(default, alias = "addMissingDays")]
    pub add_missing_days: bool,

    /// Project name used on synthesized entries.
    #[serde(default, alias = "defaultProjectName")]
    pub default_project_name: String,
}

impl AutoTuneConfig {
    /// Options understood by [`AutoTuneConfig`].
    pub const SHAPE: ConfigurationShape = ConfigurationShape {
        section: "autotune",
        options: &[
            OptionSpec {
                name: "minimum_daily_work_duration",
                kind: OptionKind::Integer,
                required: true,
                description: "hours every day has to reach (> 0)",
            },
            OptionSpec {
                name: "add_missing_days",
                kind: OptionKind::Boolean,
                required: false,
                description: "fill calendar gaps with placeholder days",
            },
            OptionSpec {
                name: "default_project_name",
                kind: OptionKind::String,
                required: false,
                description: "project booked on placeholder entries (required with add_missing_days)",
            },
        ],
    };

    /// Reads options from a raw configuration value and validates them.
    pub fn from_value(value: Option<&serde_json::Value>) -> Result<Self, ConfigurationError> {
        let value = match value {
            None | Some(serde_json::Value::Null) => return Err(ConfigurationError::Missing),
            Some(value) => value,
        };
        let config = Self::deserialize(value).map_err(|e| ConfigurationError::WrongShape {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.minimum_daily_work_duration <= 0 {
            return Err(ConfigurationError::Invalid {
                option: "minimum_daily_work_duration",
                reason: format!("must be positive, got {}", self.minimum_daily_work_duration),
            });
        }
        if self.add_missing_days && self.default_project_name.trim().is_empty() {
            return Err(ConfigurationError::Invalid {
                option: "default_project_name",
                reason: "must be set when add_missing_days is enabled".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reads_snake_case_options() {
        let value = json!({
            "minimum_daily_work_duration": 8,
            "add_missing_days": true,
            "default_project_name": "Internal"
        });

        let config = AutoTuneConfig::from_value(Some(&value)).unwrap();

        assert_eq!(config.minimum_daily_work_duration, 8);
        assert!(config.add_missing_days);
        assert_eq!(config.default_project_name, "Internal");
    }

    #[test]
    fn test_reads_camel_case_aliases() {
        let value = json!({
            "minimumDailyWorkDuration": 6,
            "addMissingDays": false,
            "defaultProjectName": "Misc"
        });

        let config = AutoTuneConfig::from_value(Some(&value)).unwrap();

        assert_eq!(config.minimum_daily_work_duration, 6);
        assert!(!config.add_missing_days);
    }

    #[test]
    fn test_missing_configuration() {
        assert_eq!(
            AutoTuneConfig::from_value(None),
            Err(ConfigurationError::Missing)
        );
        assert_eq!(
            AutoTuneConfig::from_value(Some(&serde_json::Value::Null)),
            Err(ConfigurationError::Missing)
        );
    }

    #[test]
    fn test_wrong_shape() {
        let value = json!(["not", "a", "table"]);
        let result = AutoTuneConfig::from_value(Some(&value));
        assert!(matches!(result, Err(ConfigurationError::WrongShape { .. })));

        let value = json!({"minimum_daily_work_duration": "eight"});
        let result = AutoTuneConfig::from_value(Some(&value));
        assert!(matches!(result, Err(ConfigurationError::WrongShape { .. })));
    }

    #[test]
    fn test_shape_lists_every_field() {
        let value = json!({
            "minimum_daily_work_duration": 8,
            "add_missing_days": true,
            "default_project_name": "Internal"
        });
        let serde_json::Value::Object(fields) = value else {
            unreachable!()
        };

        assert_eq!(AutoTuneConfig::SHAPE.options.len(), fields.len());
        for name in fields.keys() {
            assert!(AutoTuneConfig::SHAPE.option(name).is_some(), "{name} not described");
        }
        assert!(AutoTuneConfig::SHAPE.option("minimum_daily_work_duration").unwrap().required);
    }

    #[test]
    fn test_non_positive_minimum_rejected() {
        for minimum in [0, -3] {
            let value = json!({"minimum_daily_work_duration": minimum});
            let err = AutoTuneConfig::from_value(Some(&value)).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("minimum_daily_work_duration must be positive, got {minimum}")
            );
        }
    }

    #[test]
    fn test_gap_filling_requires_project_name() {
        for name in [None, Some(""), Some("  ")] {
            let mut value = json!({
                "minimum_daily_work_duration": 8,
                "add_missing_days": true
            });
            if let Some(name) = name {
                value["default_project_name"] = json!(name);
            }

            let result = AutoTuneConfig::from_value(Some(&value));

            assert!(
                matches!(
                    result,
                    Err(ConfigurationError::Invalid {
                        option: "default_project_name",
                        ..
                    })
                ),
                "accepted project name {name:?}"
            );
        }
    }

    #[test]
    fn test_project_name_optional_without_gap_filling() {
        let value = json!({"minimum_daily_work_duration": 8});

        let config = AutoTuneConfig::from_value(Some(&value)).unwrap();

        assert!(!config.add_missing_days);
        assert!(config.default_project_name.is_empty());
    }
}
