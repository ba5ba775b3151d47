//! yethangul-core
//!
//! Layout-independent composition core for modern and archaic (Old Hangul)
//! jamo, shared by keyboard crates such as libyethangul.
//!
//! Public API:
//! - `LetterSymbol` / `RoleTag` - Letter records and the role an occurrence plays
//! - `JamoTable` - Input symbol → letter lookup, compound vowels
//! - `position` - Initial/medial/final role assignment over a run
//! - `syllable` - Precomposed syllable algebra
//! - `SyllableComposer` - Syllable buffering, boundaries and rendering
//! - `ImeContext` - Host-visible preedit/commit state
//! - `Config` - Configuration and feature flags
use serde::{Deserialize, Serialize};

pub mod letter;
pub use letter::{LetterClass, LetterSymbol, Occurrence, RoleTag};

pub mod jamo_table;
pub use jamo_table::JamoTable;

pub mod position;

pub mod syllable;

pub mod composer;
pub use composer::{CompositionBuffer, SyllableComposer};

pub mod context;
pub use context::ImeContext;

/// Language-level configuration for composition.
///
/// Keyboard-specific options (custom key bindings, layouts) belong in the
/// keyboard crate's config, which flattens this one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Archaic input enabled at startup
    pub archaic_mode: bool,

    /// Window (ms) within which keys can form repeated-key or sequence
    /// patterns. Valid range: 100-1000.
    pub timing_window_ms: u64,

    /// Maximum number of keys remembered for pattern matching (at least 3,
    /// the longest sequence).
    pub history_capacity: usize,

    /// Fuse vowel pairs such as ㅗ + ㅏ into ㅘ
    pub compound_vowels: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            archaic_mode: false,
            timing_window_ms: 300,
            history_capacity: 10,
            compound_vowels: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
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

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), String> {
        if !(100..=1000).contains(&self.timing_window_ms) {
            return Err(format!(
                "timing_window_ms must be between 100 and 1000, got {}",
                self.timing_window_ms
            ));
        }
        if self.history_capacity < 3 {
            return Err(format!(
                "history_capacity must be at least 3, got {}",
                self.history_capacity
            ));
        }
        Ok(())
    }

    // ========== Archaic Mode ==========

    pub fn toggle_archaic_mode(&mut self) {
        self.archaic_mode = !self.archaic_mode;
    }

    pub fn set_archaic_mode(&mut self, enabled: bool) {
        self.archaic_mode = enabled;
    }

    pub fn is_archaic_mode(&self) -> bool {
        self.archaic_mode
    }
}

/// Small helpers shared by keyboard crates and tools.
pub mod utils {
    /// Space-separated `U+XXXX` listing, for diagnostics.
    pub fn codepoints(s: &str) -> String {
        s.chars()
            .map(|ch| format!("U+{:04X}", ch as u32))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
