//! Syllable composer.
//!
//! `SyllableComposer` accumulates letters into the syllable in progress,
//! decides where one syllable ends and the next begins, and renders finished
//! runs either as a precomposed syllable or as a string of positional jamo.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::jamo_table::JamoTable;
use crate::letter::{LetterSymbol, Occurrence, RoleTag};
use crate::position;
use crate::syllable;

/// Pending letter occurrences of one syllable.
///
/// Roles are reassigned over the whole run after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositionBuffer {
    occurrences: Vec<Occurrence>,
}

impl CompositionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn last(&self) -> Option<&Occurrence> {
        self.occurrences.last()
    }

    /// Whether any pending occurrence is a vowel.
    pub fn has_vowel(&self) -> bool {
        self.occurrences.iter().any(|o| o.letter.is_vowel())
    }

    pub fn clear(&mut self) {
        self.occurrences.clear();
    }

    /// Append a letter and reassign roles.
    pub fn push(&mut self, letter: LetterSymbol) {
        self.push_occurrence(Occurrence::new(letter, RoleTag::Initial));
    }

    fn push_occurrence(&mut self, occurrence: Occurrence) {
        self.occurrences.push(occurrence);
        self.reassign_roles();
    }

    /// Remove the last occurrence and reassign roles.
    pub fn pop(&mut self) -> Option<Occurrence> {
        let popped = self.occurrences.pop();
        self.reassign_roles();
        popped
    }

    /// Replace the last vowel with the compound it forms with the next one.
    fn merge_last(&mut self, fused: LetterSymbol) {
        if let Some(last) = self.occurrences.last_mut() {
            let original = last.letter;
            last.merged_from = Some(original);
            last.letter = fused;
        }
        self.reassign_roles();
    }

    fn reassign_roles(&mut self) {
        let letters: Vec<LetterSymbol> = self.occurrences.iter().map(|o| o.letter).collect();
        for (occurrence, role) in self.occurrences.iter_mut().zip(position::roles(&letters)) {
            occurrence.role = role;
        }
    }
}

/// Stateful syllable builder.
#[derive(Debug, Clone)]
pub struct SyllableComposer {
    jamo: Arc<JamoTable>,
    buffer: CompositionBuffer,
    compound_vowels: bool,
}

impl Default for SyllableComposer {
    fn default() -> Self {
        Self::new(JamoTable::standard())
    }
}

impl SyllableComposer {
    pub fn new(jamo: Arc<JamoTable>) -> Self {
        Self {
            jamo,
            buffer: CompositionBuffer::new(),
            compound_vowels: true,
        }
    }

    /// Enable or disable in-place compound vowels (ㅗ + ㅏ → ㅘ).
    pub fn with_compound_vowels(mut self, enabled: bool) -> Self {
        self.compound_vowels = enabled;
        self
    }

    pub fn jamo_table(&self) -> &JamoTable {
        &self.jamo
    }

    pub fn buffer(&self) -> &CompositionBuffer {
        &self.buffer
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        self.buffer.occurrences()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Add a letter to the syllable in progress.
    ///
    /// Returns the text committed by a syllable boundary, if this letter
    /// caused one.
    pub fn push(&mut self, letter: LetterSymbol) -> Option<String> {
        let mut committed = String::new();

        if let Some(last) = self.buffer.last().copied() {
            if letter.is_consonant() && last.letter.is_consonant() {
                // two consonants in a row: the pending run is complete
                committed = self.flush();
                trace!("consonant boundary before {}", letter.symbol);
            } else if letter.is_vowel() {
                if last.letter.is_vowel() && self.compound_vowels {
                    if let Some(fused) = self.jamo.compound_vowel(&last.letter, &letter) {
                        trace!(
                            "compound vowel {} + {} -> {}",
                            last.letter.symbol,
                            letter.symbol,
                            fused.symbol
                        );
                        self.buffer.merge_last(fused);
                        return None;
                    }
                }
                if self.buffer.has_vowel() {
                    committed = self.split_before_vowel();
                    trace!("vowel boundary before {}", letter.symbol);
                }
            }
        }

        self.buffer.push(letter);
        (!committed.is_empty()).then_some(committed)
    }

    /// Commit everything before a new vowel. A consonant closing the pending
    /// syllable moves over and becomes the new syllable's initial.
    fn split_before_vowel(&mut self) -> String {
        let carried = match self.buffer.last() {
            Some(last) if last.letter.is_consonant() => self.buffer.pop(),
            _ => None,
        };
        let committed = self.flush();
        if let Some(occurrence) = carried {
            self.buffer.push(occurrence.letter);
        }
        committed
    }

    /// Render the pending run and clear the buffer.
    pub fn flush(&mut self) -> String {
        let text = Self::render(self.buffer.occurrences());
        if !text.is_empty() {
            debug!("commit {:?}", text);
        }
        self.buffer.clear();
        text
    }

    /// Render the pending run without clearing it.
    pub fn preedit(&self) -> String {
        Self::render(self.buffer.occurrences())
    }

    /// Drop the pending run without rendering it.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Remove the last pending letter. A compound vowel reverts to the vowel
    /// it was built from. Returns false when nothing was pending.
    pub fn backspace(&mut self) -> bool {
        match self.buffer.pop() {
            Some(occurrence) => {
                if let Some(original) = occurrence.merged_from {
                    self.buffer.push(original);
                }
                true
            }
            None => false,
        }
    }

    /// Withdraw up to `count` pending letters, most recent first. Returns how
    /// many were withdrawn; committed text is never recalled.
    pub fn retract(&mut self, count: usize) -> usize {
        let mut withdrawn = 0;
        while withdrawn < count && self.backspace() {
            withdrawn += 1;
        }
        if withdrawn < count {
            trace!("retract: {} of {} letters already committed", count - withdrawn, count);
        }
        withdrawn
    }

    /// Render a run of occurrences.
    ///
    /// Modern `[Initial, Medial]` and `[Initial, Medial, Final]` runs become
    /// one precomposed syllable. Everything else, including any run holding
    /// an archaic letter, becomes the positional jamo of each occurrence in
    /// order.
    pub fn render(run: &[Occurrence]) -> String {
        if let Some(ch) = Self::compose_run(run) {
            return ch.to_string();
        }
        run.iter().map(|o| o.letter.positional_char(o.role)).collect()
    }

    fn compose_run(run: &[Occurrence]) -> Option<char> {
        if run.iter().any(|o| o.letter.archaic) {
            return None;
        }
        match run {
            [i, m] if i.role == RoleTag::Initial && m.role == RoleTag::Medial => {
                syllable::compose(i.letter.codepoint, m.letter.codepoint, None)
            }
            [i, m, f]
                if i.role == RoleTag::Initial
                    && m.role == RoleTag::Medial
                    && f.role == RoleTag::Final =>
            {
                let trailing = f.letter.final_codepoint?;
                syllable::compose(i.letter.codepoint, m.letter.codepoint, Some(trailing))
            }
            _ => None,
        }
    }

    /// Compose a whole jamo string in one go. Characters the jamo table does
    /// not know end the pending syllable and pass through unchanged.
    pub fn compose_text(&mut self, text: &str) -> String {
        let mut out = String::new();
        for ch in text.chars() {
            match self.jamo.lookup(ch) {
                Some(letter) => {
                    if let Some(committed) = self.push(letter) {
                        out.push_str(&committed);
                    }
                }
                None => {
                    out.push_str(&self.flush());
                    out.push(ch);
                }
            }
        }
        out.push_str(&self.flush());
        out
    }
}
