use crate::color::{parse_color, Rgb};
use crate::outcome::VALUE_PLACEHOLDER;
use crate::{ConfigError, MessageSet, RenderConfig};

/// Roller settings as read from a `d20.toml` file.
///
/// Every field is optional; missing ones keep their defaults. Animation
/// timing is fixed and has no setting.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RollerDetails {
    pub idle_prompt: Option<String>,
    pub in_progress: Option<String>,
    pub critical_hit: Option<String>,
    pub critical_miss: Option<String>,
    pub result_template: Option<String>,
    pub title: Option<String>,
    pub roll_label: Option<String>,
    pub rolling_label: Option<String>,
    pub footer: Option<String>,
    pub rolling_color: Option<String>,
    pub critical_hit_color: Option<String>,
    pub critical_miss_color: Option<String>,
    pub normal_color: Option<String>,
}

/// Resolved settings handed to the sequencer and the presenter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RollerConfig {
    pub messages: MessageSet,
    pub render: RenderConfig,
}

impl RollerDetails {
    /// Parse a `d20.toml` string into `RollerDetails`.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Fill in defaults and validate.
    pub fn resolve(&self) -> Result<RollerConfig, ConfigError> {
        let mut config = RollerConfig::default();

        let messages = &mut config.messages;
        override_text(&mut messages.idle_prompt, &self.idle_prompt);
        override_text(&mut messages.in_progress, &self.in_progress);
        override_text(&mut messages.critical_hit, &self.critical_hit);
        override_text(&mut messages.critical_miss, &self.critical_miss);
        if let Some(template) = &self.result_template {
            if !template.contains(VALUE_PLACEHOLDER) {
                return Err(ConfigError::MissingPlaceholder {
                    field: "result_template",
                });
            }
            messages.result_template = template.clone();
        }

        let render = &mut config.render;
        override_text(&mut render.title, &self.title);
        override_text(&mut render.roll_label, &self.roll_label);
        override_text(&mut render.rolling_label, &self.rolling_label);
        override_text(&mut render.footer, &self.footer);

        let colors = &mut render.colors;
        override_color(&mut colors.rolling, "rolling_color", &self.rolling_color)?;
        override_color(&mut colors.critical_hit, "critical_hit_color", &self.critical_hit_color)?;
        override_color(&mut colors.critical_miss, "critical_miss_color", &self.critical_miss_color)?;
        override_color(&mut colors.normal, "normal_color", &self.normal_color)?;

        Ok(config)
    }
}

fn override_text(target: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        target.clone_from(value);
    }
}

fn override_color(target: &mut Rgb, field: &'static str, value: &Option<String>) -> Result<(), ConfigError> {
    if let Some(value) = value {
        *target = parse_color(value).ok_or_else(|| ConfigError::InvalidColor {
            field,
            value: value.clone(),
        })?;
    }
    Ok(())
}
