//! Letter symbols and the roles they play inside a syllable.
//!
//! A `LetterSymbol` is the resolved form of one keystroke (or key combination):
//! a consonant or vowel with its conjoining code points. The role it plays
//! (`RoleTag`) is not part of the symbol; the same ㄴ can open one syllable and
//! close the next.

use serde::{Deserialize, Serialize};

/// Consonant or vowel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterClass {
    Consonant,
    Vowel,
}

/// Structural role of one letter occurrence inside a syllable block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleTag {
    /// Leading consonant (초성)
    Initial,
    /// Vowel nucleus (중성)
    Medial,
    /// Trailing consonant (종성)
    Final,
}

/// Immutable record for one letter.
///
/// `codepoint` is the conjoining form used when the letter opens a syllable
/// (consonants) or forms its nucleus (vowels). `final_codepoint` is the
/// trailing-consonant form, present only when Unicode encodes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LetterSymbol {
    /// Input symbol: the compatibility jamo when one exists, otherwise the
    /// conjoining character itself (e.g. 'ᄙ').
    pub symbol: char,
    pub codepoint: u32,
    pub final_codepoint: Option<u32>,
    pub class: LetterClass,
    pub archaic: bool,
    /// Korean letter name (e.g. "반시옷")
    pub name: &'static str,
}

impl LetterSymbol {
    pub const fn consonant(
        symbol: char,
        codepoint: u32,
        final_codepoint: Option<u32>,
        archaic: bool,
        name: &'static str,
    ) -> Self {
        Self {
            symbol,
            codepoint,
            final_codepoint,
            class: LetterClass::Consonant,
            archaic,
            name,
        }
    }

    pub const fn vowel(symbol: char, codepoint: u32, archaic: bool, name: &'static str) -> Self {
        Self {
            symbol,
            codepoint,
            final_codepoint: None,
            class: LetterClass::Vowel,
            archaic,
            name,
        }
    }

    pub fn is_consonant(&self) -> bool {
        self.class == LetterClass::Consonant
    }

    pub fn is_vowel(&self) -> bool {
        self.class == LetterClass::Vowel
    }

    /// Code point this letter contributes when it plays `role`.
    ///
    /// Only `Final` differs: it prefers the trailing form and keeps the
    /// leading form when no trailing form exists.
    pub fn positional_codepoint(&self, role: RoleTag) -> u32 {
        match role {
            RoleTag::Final => self.final_codepoint.unwrap_or(self.codepoint),
            RoleTag::Initial | RoleTag::Medial => self.codepoint,
        }
    }

    /// Positional form as a `char`. Table data only holds valid scalar values,
    /// so the replacement character never shows up in practice.
    pub fn positional_char(&self, role: RoleTag) -> char {
        char::from_u32(self.positional_codepoint(role)).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

/// One letter occurrence in a pending syllable run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub letter: LetterSymbol,
    pub role: RoleTag,
    /// For a compound vowel built in place (ㅗ + ㅏ → ㅘ), the vowel it was
    /// built from. Backspace reverts to it.
    pub merged_from: Option<LetterSymbol>,
}

impl Occurrence {
    pub fn new(letter: LetterSymbol, role: RoleTag) -> Self {
        Self {
            letter,
            role,
            merged_from: None,
        }
    }
}
