//! Host-facing composition engine.
//!
//! `CompositionEngine` takes key events one at a time, resolves them to
//! letters through the `KeyCombinationInterpreter`, and feeds the letters to a
//! `SyllableComposer`. After each call the host reads `context()`: text to
//! insert in `commit_text` and the syllable in progress in `preedit_text`.

use std::sync::Arc;

use tracing::{debug, trace};
use yethangul_core::{Config, ImeContext, JamoTable, SyllableComposer};

use crate::combination::CombinationTable;
use crate::config::YetHangulConfig;
use crate::export::{self, ExportError};
use crate::interpreter::KeyCombinationInterpreter;
use crate::key_event::{Key, KeyEvent};

/// Auxiliary text shown while archaic input is on.
pub const ARCHAIC_INDICATOR: &str = "옛";

/// Result of processing a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    /// Key was consumed by the engine
    Handled,
    /// Key was not consumed (the host should apply it)
    NotHandled,
}

/// Composition state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Nothing pending
    Idle,
    /// A syllable is in progress
    Composing,
}

#[derive(Debug)]
pub struct CompositionEngine {
    interpreter: KeyCombinationInterpreter,
    composer: SyllableComposer,
    context: ImeContext,
}

impl Default for CompositionEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositionEngine {
    /// Engine with the standard tables and default settings.
    pub fn new() -> Self {
        Self::with_table(&Config::default(), CombinationTable::standard())
    }

    /// Engine from a keyboard config; custom bindings are applied to the
    /// combination table.
    pub fn from_config(config: &YetHangulConfig) -> Self {
        let jamo = JamoTable::standard();
        let table = config.combination_table(&jamo);
        Self::with_table(&config.base, table)
    }

    /// Engine with an explicit combination table.
    pub fn with_table(config: &Config, combinations: CombinationTable) -> Self {
        let jamo = JamoTable::standard();
        let mut interpreter = KeyCombinationInterpreter::new(
            Arc::clone(&jamo),
            combinations,
            config.history_capacity,
            config.timing_window_ms,
        );
        interpreter.set_archaic_mode(config.archaic_mode);
        let composer = SyllableComposer::new(jamo).with_compound_vowels(config.compound_vowels);

        let mut engine = Self {
            interpreter,
            composer,
            context: ImeContext::new(),
        };
        engine.sync_context();
        engine
    }

    pub fn context(&self) -> &ImeContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ImeContext {
        &mut self.context
    }

    pub fn interpreter(&self) -> &KeyCombinationInterpreter {
        &self.interpreter
    }

    pub fn composer(&self) -> &SyllableComposer {
        &self.composer
    }

    pub fn state(&self) -> EngineState {
        if self.composer.is_empty() {
            EngineState::Idle
        } else {
            EngineState::Composing
        }
    }

    /// Process one key event.
    pub fn process_key(&mut self, event: KeyEvent) -> KeyResult {
        // Clear commit text from previous key
        self.context.commit_text.clear();
        let before = self.state();

        let result = self.dispatch(event);

        self.sync_context();
        let after = self.state();
        if before != after {
            trace!("{:?} -> {:?}", before, after);
        }
        result
    }

    fn dispatch(&mut self, event: KeyEvent) -> KeyResult {
        if event.key.is_modifier() {
            self.interpreter.resolve(&event);
            return KeyResult::NotHandled;
        }
        if !event.is_down() {
            return KeyResult::NotHandled;
        }

        match event.key {
            Key::Char(_) => match self.interpreter.resolve(&event) {
                Some(resolution) => {
                    if resolution.supersedes > 0 {
                        self.composer.retract(resolution.supersedes);
                    }
                    if let Some(committed) = self.composer.push(resolution.letter) {
                        self.context.commit_text.push_str(&committed);
                    }
                    KeyResult::Handled
                }
                None => {
                    self.commit_pending();
                    KeyResult::NotHandled
                }
            },
            Key::Backspace => {
                self.interpreter.clear_history();
                if self.composer.backspace() {
                    KeyResult::Handled
                } else {
                    KeyResult::NotHandled
                }
            }
            Key::ModeToggle => {
                self.switch_mode(!self.is_archaic_mode());
                KeyResult::Handled
            }
            Key::Space | Key::Enter | Key::Other => {
                self.interpreter.clear_history();
                self.commit_pending();
                KeyResult::NotHandled
            }
            Key::Shift | Key::AltGraph => KeyResult::NotHandled,
        }
    }

    fn commit_pending(&mut self) {
        let text = self.composer.flush();
        self.context.commit_text.push_str(&text);
    }

    fn sync_context(&mut self) {
        self.context.preedit_text = self.composer.preedit();
        self.context.auxiliary_text = if self.interpreter.is_archaic_mode() {
            ARCHAIC_INDICATOR.to_string()
        } else {
            String::new()
        };
    }

    pub fn is_archaic_mode(&self) -> bool {
        self.interpreter.is_archaic_mode()
    }

    /// Switch archaic input on or off. Any pending syllable is committed
    /// first; `commit_text` holds only what this call committed.
    pub fn set_archaic_mode(&mut self, enabled: bool) {
        self.context.commit_text.clear();
        self.switch_mode(enabled);
    }

    pub fn toggle_archaic_mode(&mut self) {
        self.set_archaic_mode(!self.is_archaic_mode());
    }

    fn switch_mode(&mut self, enabled: bool) {
        if enabled == self.interpreter.is_archaic_mode() {
            return;
        }
        self.commit_pending();
        self.interpreter.clear_history();
        self.interpreter.set_archaic_mode(enabled);
        debug!("archaic mode {}", if enabled { "on" } else { "off" });
        self.sync_context();
    }

    /// Commit the pending syllable and forget recent keys, like Space does.
    /// `commit_text` holds only what this call committed.
    pub fn flush(&mut self) -> String {
        self.context.commit_text.clear();
        self.interpreter.clear_history();
        let text = self.composer.flush();
        self.context.commit_text.push_str(&text);
        self.sync_context();
        text
    }

    /// Drop all pending state without committing anything.
    pub fn reset(&mut self) {
        self.composer.reset();
        self.interpreter.clear_history();
        self.context.commit_text.clear();
        self.sync_context();
    }

    /// Move `commit_text` into a UTF-16 buffer. On error the commit text is
    /// kept so the host can retry with a larger buffer.
    pub fn take_commit_utf16(&mut self, out: &mut [u16]) -> Result<usize, ExportError> {
        let written = export::write_utf16(&self.context.commit_text, out)?;
        self.context.commit_text.clear();
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key_event::ModifierSet;

    fn type_keys(engine: &mut CompositionEngine, keys: &str, start: u64) -> String {
        let mut out = String::new();
        for (i, ch) in keys.chars().enumerate() {
            engine.process_key(KeyEvent::char(ch, start + i as u64 * 50));
            out.push_str(&engine.context().commit_text);
        }
        out
    }

    #[test]
    fn test_gan() {
        let mut engine = CompositionEngine::new();
        assert_eq!(type_keys(&mut engine, "rks", 0), "");
        assert_eq!(engine.context().preedit_text, "간");
        assert_eq!(engine.state(), EngineState::Composing);

        let result = engine.process_key(KeyEvent::down(Key::Space, 500));
        assert_eq!(result, KeyResult::NotHandled);
        assert_eq!(engine.context().commit_text, "간");
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_commit_text_cleared_each_call() {
        let mut engine = CompositionEngine::new();
        type_keys(&mut engine, "rk", 0);
        engine.process_key(KeyEvent::down(Key::Space, 500));
        assert!(engine.context().has_commit());
        engine.process_key(KeyEvent::char('r', 600));
        assert!(!engine.context().has_commit());
    }

    #[test]
    fn test_modern_word() {
        let mut engine = CompositionEngine::new();
        let mut text = type_keys(&mut engine, "dkssudgktpdy", 0);
        text.push_str(&engine.flush());
        assert_eq!(text, "안녕하세요");
    }

    #[test]
    fn test_backspace() {
        let mut engine = CompositionEngine::new();
        type_keys(&mut engine, "rks", 0);
        assert_eq!(engine.process_key(KeyEvent::down(Key::Backspace, 200)), KeyResult::Handled);
        assert_eq!(engine.context().preedit_text, "가");
        engine.process_key(KeyEvent::down(Key::Backspace, 250));
        engine.process_key(KeyEvent::down(Key::Backspace, 300));
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(
            engine.process_key(KeyEvent::down(Key::Backspace, 350)),
            KeyResult::NotHandled
        );
    }

    #[test]
    fn test_key_up_and_modifiers_not_handled() {
        let mut engine = CompositionEngine::new();
        assert_eq!(engine.process_key(KeyEvent::up(Key::Char('r'), 0)), KeyResult::NotHandled);
        assert_eq!(engine.process_key(KeyEvent::down(Key::Shift, 0)), KeyResult::NotHandled);
        assert_eq!(engine.process_key(KeyEvent::char('r', 10)), KeyResult::Handled);
        assert_eq!(engine.context().preedit_text, "\u{1101}");
        engine.process_key(KeyEvent::up(Key::Shift, 20));
    }

    #[test]
    fn test_unmapped_key_commits_and_passes_through() {
        let mut engine = CompositionEngine::new();
        type_keys(&mut engine, "rk", 0);
        assert_eq!(engine.process_key(KeyEvent::char('.', 200)), KeyResult::NotHandled);
        assert_eq!(engine.context().commit_text, "가");
    }

    #[test]
    fn test_mode_toggle_flushes_first() {
        let mut engine = CompositionEngine::new();
        type_keys(&mut engine, "rk", 0);
        assert_eq!(engine.process_key(KeyEvent::down(Key::ModeToggle, 200)), KeyResult::Handled);
        assert_eq!(engine.context().commit_text, "가");
        assert!(engine.is_archaic_mode());
        assert_eq!(engine.context().auxiliary_text, ARCHAIC_INDICATOR);
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn test_archaic_repeat_supersedes_pending_letter() {
        let mut engine = CompositionEngine::new();
        engine.set_archaic_mode(true);
        type_keys(&mut engine, "rk", 0);
        engine.process_key(KeyEvent::char('s', 100));
        engine.process_key(KeyEvent::char('s', 150));
        assert_eq!(engine.context().preedit_text, "\u{1100}\u{1161}\u{11FF}");
    }

    #[test]
    fn test_sequence_builds_light_bieup() {
        let mut engine = CompositionEngine::new();
        engine.set_archaic_mode(true);
        let mut text = type_keys(&mut engine, "qdks", 0);
        text.push_str(&engine.flush());
        assert_eq!(text, "\u{112B}\u{1161}\u{11AB}");
    }

    #[test]
    fn test_altgr_archaic_syllable() {
        let mut engine = CompositionEngine::new();
        let altgr_s = KeyEvent::char('s', 0).with_modifiers(ModifierSet::ALTGR);
        engine.process_key(altgr_s);
        type_keys(&mut engine, "mf", 50);
        assert_eq!(engine.flush(), "\u{1140}\u{1173}\u{11AF}");
    }

    #[test]
    fn test_reset_discards() {
        let mut engine = CompositionEngine::new();
        type_keys(&mut engine, "rk", 0);
        engine.reset();
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.flush(), "");
    }

    #[test]
    fn test_take_commit_utf16() {
        let mut engine = CompositionEngine::new();
        type_keys(&mut engine, "rks", 0);
        engine.process_key(KeyEvent::down(Key::Enter, 300));

        let mut small = [0u16; 1];
        assert!(engine.take_commit_utf16(&mut small).is_err());
        assert!(engine.context().has_commit());

        let mut out = [0u16; 4];
        assert_eq!(engine.take_commit_utf16(&mut out), Ok(1));
        assert_eq!(out[..2], [0xAC04, 0]);
        assert!(!engine.context().has_commit());
    }

    #[test]
    fn test_flush_forgets_recent_keys() {
        let mut engine = CompositionEngine::new();
        engine.set_archaic_mode(true);
        engine.process_key(KeyEvent::char('s', 0));
        assert_eq!(engine.flush(), "\u{1102}");
        // same key inside the window must not pair with the committed ㄴ
        engine.process_key(KeyEvent::char('s', 50));
        assert_eq!(engine.flush(), "\u{1102}");
    }

    #[test]
    fn test_flush_reports_only_its_own_commit() {
        let mut engine = CompositionEngine::new();
        type_keys(&mut engine, "rk", 0);
        engine.process_key(KeyEvent::down(Key::Space, 100));
        assert_eq!(engine.context().commit_text, "가");
        assert_eq!(engine.flush(), "");
        assert!(!engine.context().has_commit());
    }

    #[test]
    fn test_set_archaic_mode_reports_only_its_own_commit() {
        let mut engine = CompositionEngine::new();
        type_keys(&mut engine, "rk", 0);
        engine.set_archaic_mode(true);
        assert_eq!(engine.context().commit_text, "가");
        engine.set_archaic_mode(false);
        assert!(!engine.context().has_commit());
        engine.set_archaic_mode(false);
        assert!(!engine.context().has_commit());
    }

    #[test]
    fn test_from_config_applies_bindings() {
        let config = YetHangulConfig {
            bindings: vec![crate::config::KeyBinding::new("altgr+z", 'ㆆ')],
            ..Default::default()
        };
        let mut engine = CompositionEngine::from_config(&config);
        engine.process_key(KeyEvent::char('z', 0).with_modifiers(ModifierSet::ALTGR));
        assert_eq!(engine.context().preedit_text, "\u{1159}");
    }
}
