use serde::{Deserialize, Serialize};

/// User configuration, read from `~/.config/refscore/config.yaml`.
///
/// Example YAML:
/// ```yaml
/// display:
///   decimals: 2
///   color: auto
/// form:
///   prefill: true
/// log_level: warn
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,

    #[serde(default)]
    pub form: FormConfig,

    /// Tracing filter used when neither `RUST_LOG` nor `--verbose` is given
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    /// Decimal places shown for scores (stored values keep full precision)
    #[serde(default = "default_decimals")]
    pub decimals: u8,

    #[serde(default)]
    pub color: ColorMode,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            decimals: default_decimals(),
            color: ColorMode::default(),
        }
    }
}

fn default_decimals() -> u8 {
    2
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FormConfig {
    /// Pre-populate templates with neutral defaults
    #[serde(default = "default_prefill")]
    pub prefill: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            prefill: default_prefill(),
        }
    }
}

fn default_prefill() -> bool {
    true
}
