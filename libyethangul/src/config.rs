//! Keyboard configuration.

use serde::{Deserialize, Serialize};
use tracing::warn;
use yethangul_core::JamoTable;

use crate::combination::{CombinationTable, TriggerPattern};

/// One custom binding: a trigger (see `TriggerPattern` syntax) and the jamo
/// it produces.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct KeyBinding {
    pub trigger: String,
    pub jamo: char,
}

impl KeyBinding {
    pub fn new<T: Into<String>>(trigger: T, jamo: char) -> Self {
        Self {
            trigger: trigger.into(),
            jamo,
        }
    }
}

/// Keyboard configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All composition options from `yethangul_core::Config` (flattened via serde)
/// - Custom key bindings (`[[bindings]]` tables in TOML)
/// - Whether custom bindings replace the standard trigger table
///
/// # Example
///
/// ```rust
/// use libyethangul::YetHangulConfig;
///
/// let config = YetHangulConfig::from_toml_str(r#"
/// archaic_mode = true
///
/// [[bindings]]
/// trigger = "altgr+z"
/// jamo = "ㆆ"
/// "#).unwrap();
/// assert!(config.base.archaic_mode);
/// assert_eq!(config.bindings.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct YetHangulConfig {
    /// Base composition options (mode, timing window, history, compounds)
    #[serde(flatten)]
    pub base: yethangul_core::Config,

    /// Start from an empty table instead of the standard one
    pub replace_standard_bindings: bool,

    /// Custom key bindings applied on top of the standard table
    pub bindings: Vec<KeyBinding>,
}

impl YetHangulConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: YetHangulConfig = toml::from_str(&content)?;
        config.base.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check base ranges and that every binding is usable.
    pub fn validate(&self, jamo: &JamoTable) -> Result<(), String> {
        self.base.validate()?;
        for binding in &self.bindings {
            binding.trigger.parse::<TriggerPattern>()?;
            if jamo.lookup(binding.jamo).is_none() {
                return Err(format!(
                    "binding '{}': unknown jamo '{}'",
                    binding.trigger, binding.jamo
                ));
            }
        }
        Ok(())
    }

    /// Build the combination table: the standard table (unless replaced) with
    /// custom bindings applied in order. Unusable bindings are skipped.
    pub fn combination_table(&self, jamo: &JamoTable) -> CombinationTable {
        let mut table = if self.replace_standard_bindings {
            CombinationTable::new()
        } else {
            CombinationTable::standard()
        };

        for binding in &self.bindings {
            let pattern = match binding.trigger.parse::<TriggerPattern>() {
                Ok(pattern) => pattern,
                Err(e) => {
                    warn!("skipping binding '{}': {}", binding.trigger, e);
                    continue;
                }
            };
            if jamo.lookup(binding.jamo).is_none() {
                warn!("skipping binding '{}': unknown jamo '{}'", binding.trigger, binding.jamo);
                continue;
            }
            table.insert(pattern, binding.jamo);
        }
        table
    }
}
