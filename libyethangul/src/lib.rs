//! # libyethangul
//!
//! Archaic Hangul (옛한글) keyboard engine built on yethangul-core: Dubeolsik
//! layout, trigger patterns for archaic letters, and a host-facing engine.

pub mod config;
pub mod key_event;
pub mod layout;
pub mod combination;
pub mod history;
pub mod interpreter;
pub mod engine;
pub mod export;
pub mod script;

// Re-export core components
pub use yethangul_core::{Config, ImeContext, JamoTable, LetterSymbol, RoleTag, SyllableComposer};

pub use config::{KeyBinding, YetHangulConfig};
pub use key_event::{Key, KeyEvent, KeyState, ModifierSet};
pub use combination::{CombinationTable, TriggerPattern};
pub use history::{HistoryEntry, KeyHistory};
pub use interpreter::{KeyCombinationInterpreter, Resolution};
pub use engine::{CompositionEngine, EngineState, KeyResult};
pub use export::{compose_utf16, write_utf16, ExportError};
