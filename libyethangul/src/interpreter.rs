//! Key combination interpreter.
//!
//! Turns key events into letters. Precedence, first match wins:
//!
//! 1. modifier combination (Shift and/or AltGr held); AltGr combinations are
//!    always active, Shift-only combinations yield archaic letters only in
//!    archaic mode
//! 2. repeated key (same key twice within the window), archaic mode only
//! 3. key sequence, three keys before two, archaic mode only
//! 4. single-key trigger, archaic mode only
//! 5. the plain letter on the key; archaic letters only in archaic mode
//!
//! Repeated-key and sequence matches evict the history entries they consumed.
//! Every other resolution leaves history alone, so a shifted key can still
//! open a sequence.

use std::sync::Arc;

use tracing::{debug, trace, warn};
use yethangul_core::{JamoTable, LetterSymbol};

use crate::combination::{CombinationTable, TriggerPattern};
use crate::history::KeyHistory;
use crate::key_event::{Key, KeyEvent, ModifierSet};
use crate::layout;

/// A resolved letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub letter: LetterSymbol,
    /// Letters produced by earlier keys of the matched pattern. They are
    /// superseded by `letter` and should be withdrawn if still pending.
    pub supersedes: usize,
}

impl Resolution {
    fn plain(letter: LetterSymbol) -> Self {
        Self {
            letter,
            supersedes: 0,
        }
    }
}

/// Pattern match before the jamo is looked up.
struct PatternMatch {
    pattern: TriggerPattern,
    jamo: char,
}

impl PatternMatch {
    /// History entries the match evicts. Only repeated-key and sequence
    /// matches consume the keys they span.
    fn consumed(&self) -> usize {
        match self.pattern {
            TriggerPattern::SingleKey(_) | TriggerPattern::ModifiedKey(..) => 0,
            TriggerPattern::RepeatedKey(_) | TriggerPattern::KeySequence(..) => {
                self.pattern.key_count()
            }
        }
    }
}

/// Stateful key → letter resolver.
#[derive(Debug, Clone)]
pub struct KeyCombinationInterpreter {
    jamo: Arc<JamoTable>,
    combinations: CombinationTable,
    history: KeyHistory,
    held: ModifierSet,
    archaic_mode: bool,
}

impl KeyCombinationInterpreter {
    pub fn new(
        jamo: Arc<JamoTable>,
        combinations: CombinationTable,
        history_capacity: usize,
        window_ms: u64,
    ) -> Self {
        Self {
            jamo,
            combinations,
            history: KeyHistory::new(history_capacity, window_ms),
            held: ModifierSet::NONE,
            archaic_mode: false,
        }
    }

    /// Standard tables, 10-key history, 300 ms window.
    pub fn standard() -> Self {
        Self::new(JamoTable::standard(), CombinationTable::standard(), 10, 300)
    }

    pub fn is_archaic_mode(&self) -> bool {
        self.archaic_mode
    }

    pub fn set_archaic_mode(&mut self, enabled: bool) {
        self.archaic_mode = enabled;
    }

    pub fn history(&self) -> &KeyHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn combinations(&self) -> &CombinationTable {
        &self.combinations
    }

    /// Resolve one key event to at most one letter.
    pub fn resolve(&mut self, event: &KeyEvent) -> Option<Resolution> {
        match event.key {
            Key::Shift => {
                self.held.shift = event.is_down();
                return None;
            }
            Key::AltGraph => {
                self.held.altgr = event.is_down();
                return None;
            }
            _ => {}
        }
        if !event.is_down() {
            return None;
        }
        let Key::Char(raw) = event.key else {
            return None;
        };

        let mut modifiers = self.held.union(event.modifiers);
        let key = if raw.is_ascii_uppercase() {
            modifiers.shift = true;
            raw.to_ascii_lowercase()
        } else {
            raw
        };

        self.history.record(key, modifiers, event.time_ms);

        if let Some(found) = self.match_pattern(key, modifiers) {
            match self.jamo.lookup(found.jamo) {
                Some(letter) => {
                    debug!("{} -> {}", found.pattern, letter.symbol);
                    let consumed = found.consumed();
                    let supersedes = if consumed > 1 {
                        self.history.live_before_last(consumed - 1)
                    } else {
                        0
                    };
                    if consumed > 0 {
                        self.history.evict_last(consumed);
                    } else {
                        self.history.set_last_live(true);
                    }
                    return Some(Resolution { letter, supersedes });
                }
                None => warn!("{} is bound to unknown jamo {}", found.pattern, found.jamo),
            }
        }

        let resolution = self.plain_letter(key, modifiers).map(Resolution::plain);
        self.history.set_last_live(resolution.is_some());
        resolution
    }

    fn match_pattern(&self, key: char, modifiers: ModifierSet) -> Option<PatternMatch> {
        if !modifiers.is_empty() {
            let pattern = TriggerPattern::ModifiedKey(modifiers, key);
            if let Some(jamo) = self.combinations.get(&pattern) {
                // Shift alone is ordinary typing (and Caps Lock): its archaic
                // letters wait for archaic mode. AltGr is always explicit.
                if modifiers.altgr || self.archaic_mode || self.jamo.is_modern(jamo) {
                    return Some(PatternMatch { pattern, jamo });
                }
                trace!("{} -> {} ignored outside archaic mode", pattern, jamo);
            }
        }

        if !self.archaic_mode {
            return None;
        }

        if let Some(tokens) = self.history.tail_tokens(2) {
            if tokens[0] == tokens[1] {
                let pattern = TriggerPattern::RepeatedKey(tokens[1]);
                if let Some(jamo) = self.combinations.get(&pattern) {
                    return Some(PatternMatch { pattern, jamo });
                }
            }
        }

        if let Some(tokens) = self.history.tail_tokens(3) {
            let pattern = TriggerPattern::KeySequence(tokens[0], tokens[1], Some(tokens[2]));
            if let Some(jamo) = self.combinations.get(&pattern) {
                return Some(PatternMatch { pattern, jamo });
            }
        }
        if let Some(tokens) = self.history.tail_tokens(2) {
            let pattern = TriggerPattern::KeySequence(tokens[0], tokens[1], None);
            if let Some(jamo) = self.combinations.get(&pattern) {
                return Some(PatternMatch { pattern, jamo });
            }
        }

        if modifiers.is_empty() {
            let pattern = TriggerPattern::SingleKey(key);
            if let Some(jamo) = self.combinations.get(&pattern) {
                return Some(PatternMatch { pattern, jamo });
            }
        }
        None
    }

    /// Letter printed on the key, or the jamo itself for direct input.
    fn plain_letter(&self, key: char, modifiers: ModifierSet) -> Option<LetterSymbol> {
        if modifiers.altgr {
            return None;
        }
        let symbol = layout::jamo_for_key(key).unwrap_or(key);
        let letter = self.jamo.lookup(symbol)?;
        if letter.archaic && !self.archaic_mode {
            trace!("archaic {} ignored outside archaic mode", letter.symbol);
            return None;
        }
        Some(letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn archaic() -> KeyCombinationInterpreter {
        let mut interpreter = KeyCombinationInterpreter::standard();
        interpreter.set_archaic_mode(true);
        interpreter
    }

    fn symbol(resolution: Option<Resolution>) -> Option<char> {
        resolution.map(|r| r.letter.symbol)
    }

    #[test]
    fn test_plain_keys() {
        let mut it = KeyCombinationInterpreter::standard();
        assert_eq!(symbol(it.resolve(&KeyEvent::char('r', 0))), Some('ㄱ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char('k', 10))), Some('ㅏ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char('ㄴ', 20))), Some('ㄴ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char('1', 30))), None);
    }

    #[test]
    fn test_key_up_ignored() {
        let mut it = KeyCombinationInterpreter::standard();
        assert!(it.resolve(&KeyEvent::up(Key::Char('r'), 0)).is_none());
        assert!(it.history().is_empty());
    }

    #[test]
    fn test_modifier_transitions_tracked() {
        let mut it = KeyCombinationInterpreter::standard();
        assert!(it.resolve(&KeyEvent::down(Key::AltGraph, 0)).is_none());
        assert_eq!(symbol(it.resolve(&KeyEvent::char('s', 10))), Some('ㅿ'));
        assert!(it.resolve(&KeyEvent::up(Key::AltGraph, 20)).is_none());
        assert_eq!(symbol(it.resolve(&KeyEvent::char('s', 30))), Some('ㄴ'));
    }

    #[test]
    fn test_modifier_bitmask_on_event() {
        let mut it = KeyCombinationInterpreter::standard();
        let ev = KeyEvent::char('m', 0).with_modifiers(ModifierSet::ALTGR_SHIFT);
        assert_eq!(symbol(it.resolve(&ev)), Some('ㅱ'));
    }

    #[test]
    fn test_uppercase_implies_shift() {
        let mut it = KeyCombinationInterpreter::standard();
        assert_eq!(symbol(it.resolve(&KeyEvent::char('Q', 0))), Some('ㅃ'));
        // shift with no binding falls back to the unshifted letter
        assert_eq!(symbol(it.resolve(&KeyEvent::char('A', 10))), Some('ㅁ'));
    }

    #[test]
    fn test_shift_layer_archaic_letters_gated() {
        let mut it = KeyCombinationInterpreter::standard();
        // Caps Lock style input in modern mode stays modern
        assert_eq!(symbol(it.resolve(&KeyEvent::char('S', 0))), Some('ㄴ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char('G', 10))), Some('ㅎ'));
        let shift_f = KeyEvent::char('f', 20).with_modifiers(ModifierSet::SHIFT);
        assert_eq!(symbol(it.resolve(&shift_f)), Some('ㄹ'));
        // modern doubled consonants and AltGr letters are unaffected
        assert_eq!(symbol(it.resolve(&KeyEvent::char('T', 30))), Some('ㅆ'));
        let altgr_s = KeyEvent::char('s', 40).with_modifiers(ModifierSet::ALTGR);
        assert_eq!(symbol(it.resolve(&altgr_s)), Some('ㅿ'));

        it.set_archaic_mode(true);
        assert_eq!(symbol(it.resolve(&KeyEvent::char('S', 1000))), Some('ㅥ'));
    }

    #[test]
    fn test_altgr_without_binding_yields_nothing() {
        let mut it = KeyCombinationInterpreter::standard();
        let ev = KeyEvent::char('z', 0).with_modifiers(ModifierSet::ALTGR);
        assert!(it.resolve(&ev).is_none());
    }

    #[test]
    fn test_repeated_key_in_archaic_mode() {
        let mut it = archaic();
        let first = it.resolve(&KeyEvent::char('s', 0)).unwrap();
        assert_eq!(first.letter.symbol, 'ㄴ');
        let second = it.resolve(&KeyEvent::char('s', 100)).unwrap();
        assert_eq!(second.letter.symbol, 'ㅥ');
        assert_eq!(second.supersedes, 1);
        assert!(it.history().is_empty());
    }

    #[test]
    fn test_repeated_key_outside_window() {
        let mut it = archaic();
        it.resolve(&KeyEvent::char('s', 0));
        let second = it.resolve(&KeyEvent::char('s', 301)).unwrap();
        assert_eq!(second.letter.symbol, 'ㄴ');
        assert_eq!(second.supersedes, 0);
    }

    #[test]
    fn test_repeated_key_without_pattern_falls_back() {
        let mut it = archaic();
        assert_eq!(symbol(it.resolve(&KeyEvent::char('r', 0))), Some('ㄱ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char('r', 50))), Some('ㄱ'));
    }

    #[test]
    fn test_modern_mode_ignores_repeats_and_sequences() {
        let mut it = KeyCombinationInterpreter::standard();
        assert_eq!(symbol(it.resolve(&KeyEvent::char('s', 0))), Some('ㄴ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char('s', 50))), Some('ㄴ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char('q', 100))), Some('ㅂ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char('d', 150))), Some('ㅇ'));
        assert_eq!(symbol(it.resolve(&KeyEvent::char(';', 200))), None);
    }

    #[test]
    fn test_two_key_sequence() {
        let mut it = archaic();
        assert_eq!(symbol(it.resolve(&KeyEvent::char('q', 0))), Some('ㅂ'));
        let res = it.resolve(&KeyEvent::char('d', 100)).unwrap();
        assert_eq!(res.letter.symbol, 'ㅸ');
        assert_eq!(res.supersedes, 1);
    }

    #[test]
    fn test_shifted_key_opens_sequence() {
        let mut it = archaic();
        let ev = KeyEvent::char('q', 0).with_modifiers(ModifierSet::SHIFT);
        assert_eq!(symbol(it.resolve(&ev)), Some('ㅃ'));
        let res = it.resolve(&KeyEvent::char('d', 100)).unwrap();
        assert_eq!(res.letter.symbol, 'ㅹ');
        assert_eq!(res.supersedes, 1);
    }

    #[test]
    fn test_three_key_sequence_wins_over_two() {
        let mut table = CombinationTable::standard();
        table.insert(TriggerPattern::KeySequence('x', 'q', Some('d')), 'ㆄ');
        let mut it = KeyCombinationInterpreter::new(JamoTable::standard(), table, 10, 300);
        it.set_archaic_mode(true);

        it.resolve(&KeyEvent::char('x', 0));
        it.resolve(&KeyEvent::char('q', 50));
        let res = it.resolve(&KeyEvent::char('d', 100)).unwrap();
        assert_eq!(res.letter.symbol, 'ㆄ');
        assert_eq!(res.supersedes, 2);
    }

    #[test]
    fn test_modifier_wins_over_repeat() {
        let mut it = archaic();
        it.resolve(&KeyEvent::char('s', 0));
        let ev = KeyEvent::char('s', 50).with_modifiers(ModifierSet::ALTGR);
        let res = it.resolve(&ev).unwrap();
        assert_eq!(res.letter.symbol, 'ㅿ');
        assert_eq!(res.supersedes, 0);
    }

    #[test]
    fn test_single_key_pattern_and_repeat() {
        let mut it = archaic();
        assert_eq!(symbol(it.resolve(&KeyEvent::char(';', 0))), Some('ㆍ'));
        let res = it.resolve(&KeyEvent::char(';', 80)).unwrap();
        assert_eq!(res.letter.symbol, 'ᆢ');
        assert_eq!(res.supersedes, 1);
    }

    #[test]
    fn test_archaic_plain_letter_gated() {
        let mut it = KeyCombinationInterpreter::standard();
        assert!(it.resolve(&KeyEvent::char('ㅿ', 0)).is_none());
        it.set_archaic_mode(true);
        assert_eq!(symbol(it.resolve(&KeyEvent::char('ㅿ', 10))), Some('ㅿ'));
    }

    #[test]
    fn test_dead_key_does_not_supersede() {
        let mut it = archaic();
        // '1' resolves to nothing but still sits in history
        assert!(it.resolve(&KeyEvent::char('1', 0)).is_none());
        let mut table = CombinationTable::standard();
        table.insert(TriggerPattern::KeySequence('1', 'd', None), 'ㆁ');
        let mut it2 = KeyCombinationInterpreter::new(JamoTable::standard(), table, 10, 300);
        it2.set_archaic_mode(true);
        it2.resolve(&KeyEvent::char('1', 0));
        let res = it2.resolve(&KeyEvent::char('d', 10)).unwrap();
        assert_eq!(res.letter.symbol, 'ㆁ');
        assert_eq!(res.supersedes, 0);
        assert_eq!(it.history().len(), 1);
    }

    #[test]
    fn test_history_capacity_respected() {
        let mut it = KeyCombinationInterpreter::standard();
        for i in 0..25u64 {
            it.resolve(&KeyEvent::char('r', i * 5));
            assert!(it.history().len() <= 10);
        }
    }
}
