//! Static jamo inventory.
//!
//! Maps an input symbol (compatibility jamo such as 'ㄱ' or 'ㅿ', or a
//! conjoining jamo with no compatibility form such as 'ᄙ') to its
//! `LetterSymbol`. The table is pure data: two symbols may sound alike in
//! different eras, and choosing between them is the trigger table's job.

use std::sync::{Arc, OnceLock};

use ahash::AHashMap;

use crate::letter::{LetterClass, LetterSymbol};

const fn c(symbol: char, initial: u32, trailing: Option<u32>, name: &'static str) -> LetterSymbol {
    LetterSymbol::consonant(symbol, initial, trailing, false, name)
}

const fn v(symbol: char, medial: u32, name: &'static str) -> LetterSymbol {
    LetterSymbol::vowel(symbol, medial, false, name)
}

const fn ac(symbol: char, initial: u32, trailing: Option<u32>, name: &'static str) -> LetterSymbol {
    LetterSymbol::consonant(symbol, initial, trailing, true, name)
}

const fn av(symbol: char, medial: u32, name: &'static str) -> LetterSymbol {
    LetterSymbol::vowel(symbol, medial, true, name)
}

/// The 19 leading consonants of the syllable algebra, in code point order.
pub const MODERN_CONSONANTS: [LetterSymbol; 19] = [
    c('ㄱ', 0x1100, Some(0x11A8), "기역"),
    c('ㄲ', 0x1101, Some(0x11A9), "쌍기역"),
    c('ㄴ', 0x1102, Some(0x11AB), "니은"),
    c('ㄷ', 0x1103, Some(0x11AE), "디귿"),
    c('ㄸ', 0x1104, None, "쌍디귿"),
    c('ㄹ', 0x1105, Some(0x11AF), "리을"),
    c('ㅁ', 0x1106, Some(0x11B7), "미음"),
    c('ㅂ', 0x1107, Some(0x11B8), "비읍"),
    c('ㅃ', 0x1108, None, "쌍비읍"),
    c('ㅅ', 0x1109, Some(0x11BA), "시옷"),
    c('ㅆ', 0x110A, Some(0x11BB), "쌍시옷"),
    c('ㅇ', 0x110B, Some(0x11BC), "이응"),
    c('ㅈ', 0x110C, Some(0x11BD), "지읒"),
    c('ㅉ', 0x110D, None, "쌍지읒"),
    c('ㅊ', 0x110E, Some(0x11BE), "치읓"),
    c('ㅋ', 0x110F, Some(0x11BF), "키읔"),
    c('ㅌ', 0x1110, Some(0x11C0), "티읕"),
    c('ㅍ', 0x1111, Some(0x11C1), "피읖"),
    c('ㅎ', 0x1112, Some(0x11C2), "히읗"),
];

/// The 21 vowels of the syllable algebra, in code point order.
pub const MODERN_VOWELS: [LetterSymbol; 21] = [
    v('ㅏ', 0x1161, "아"),
    v('ㅐ', 0x1162, "애"),
    v('ㅑ', 0x1163, "야"),
    v('ㅒ', 0x1164, "얘"),
    v('ㅓ', 0x1165, "어"),
    v('ㅔ', 0x1166, "에"),
    v('ㅕ', 0x1167, "여"),
    v('ㅖ', 0x1168, "예"),
    v('ㅗ', 0x1169, "오"),
    v('ㅘ', 0x116A, "와"),
    v('ㅙ', 0x116B, "왜"),
    v('ㅚ', 0x116C, "외"),
    v('ㅛ', 0x116D, "요"),
    v('ㅜ', 0x116E, "우"),
    v('ㅝ', 0x116F, "워"),
    v('ㅞ', 0x1170, "웨"),
    v('ㅟ', 0x1171, "위"),
    v('ㅠ', 0x1172, "유"),
    v('ㅡ', 0x1173, "으"),
    v('ㅢ', 0x1174, "의"),
    v('ㅣ', 0x1175, "이"),
];

/// Letters of Middle Korean orthography absent from the modern alphabet.
pub const ARCHAIC_LETTERS: [LetterSymbol; 24] = [
    ac('ㅿ', 0x1140, Some(0x11EB), "반시옷"),
    ac('ㆆ', 0x1159, Some(0x11F9), "여린히읗"),
    ac('ㅸ', 0x112B, Some(0x11E6), "가벼운비읍"),
    ac('ㅹ', 0x112C, None, "가벼운쌍비읍"),
    ac('ㅱ', 0x111D, Some(0x11E2), "가벼운미음"),
    ac('ㆄ', 0x1157, Some(0x11F4), "가벼운피읖"),
    ac('ㆁ', 0x114C, Some(0x11F0), "옛이응"),
    ac('ㅥ', 0x1114, Some(0x11FF), "쌍니은"),
    ac('ㆀ', 0x1147, Some(0x11EE), "쌍이응"),
    ac('ᄙ', 0x1119, Some(0x11D0), "쌍리을"),
    ac('ㆅ', 0x1158, None, "쌍히읗"),
    ac('ᄼ', 0x113C, None, "치두음시옷"),
    ac('ᄽ', 0x113D, None, "치두음쌍시옷"),
    ac('ᄾ', 0x113E, None, "정치음시옷"),
    ac('ᄿ', 0x113F, None, "정치음쌍시옷"),
    ac('ᅎ', 0x114E, None, "치두음지읒"),
    ac('ᅏ', 0x114F, None, "치두음쌍지읒"),
    ac('ᅐ', 0x1150, None, "정치음지읒"),
    ac('ᅑ', 0x1151, None, "정치음쌍지읒"),
    ac('ᅔ', 0x1154, None, "치두음치읓"),
    ac('ᅕ', 0x1155, None, "정치음치읓"),
    av('ㆍ', 0x119E, "아래아"),
    av('ᆢ', 0x11A2, "쌍아래아"),
    av('ㆎ', 0x11A1, "아래애"),
];

/// Vowel pairs typed in sequence that fuse into one compound vowel.
const COMPOUND_VOWELS: [(char, char, char); 8] = [
    ('ㅗ', 'ㅏ', 'ㅘ'),
    ('ㅗ', 'ㅐ', 'ㅙ'),
    ('ㅗ', 'ㅣ', 'ㅚ'),
    ('ㅜ', 'ㅓ', 'ㅝ'),
    ('ㅜ', 'ㅔ', 'ㅞ'),
    ('ㅜ', 'ㅣ', 'ㅟ'),
    ('ㅡ', 'ㅣ', 'ㅢ'),
    ('ㆍ', 'ㅣ', 'ㆎ'),
];

static STANDARD: OnceLock<Arc<JamoTable>> = OnceLock::new();

/// Lookup table from input symbol to letter.
#[derive(Debug, Clone)]
pub struct JamoTable {
    letters: AHashMap<char, LetterSymbol>,
    compounds: AHashMap<(char, char), char>,
}

impl JamoTable {
    /// Shared standard table (modern + archaic letters).
    pub fn standard() -> Arc<JamoTable> {
        Arc::clone(STANDARD.get_or_init(|| Arc::new(JamoTable::build_standard())))
    }

    fn build_standard() -> Self {
        let mut letters = AHashMap::new();
        for letter in MODERN_CONSONANTS
            .iter()
            .chain(MODERN_VOWELS.iter())
            .chain(ARCHAIC_LETTERS.iter())
        {
            letters.insert(letter.symbol, *letter);
        }

        let compounds = COMPOUND_VOWELS
            .iter()
            .map(|&(first, second, fused)| ((first, second), fused))
            .collect();

        Self { letters, compounds }
    }

    /// Letter for an input symbol. Also accepts a letter's own conjoining
    /// leading/vowel form, so 'ᄀ' resolves like 'ㄱ'.
    pub fn lookup(&self, symbol: char) -> Option<LetterSymbol> {
        if let Some(letter) = self.letters.get(&symbol) {
            return Some(*letter);
        }
        let cp = symbol as u32;
        self.letters.values().find(|l| l.codepoint == cp).copied()
    }

    /// Whether `symbol` is a modern (non-archaic) letter.
    pub fn is_modern(&self, symbol: char) -> bool {
        self.lookup(symbol).is_some_and(|l| !l.archaic)
    }

    /// Compound vowel formed by typing `second` right after `first`.
    pub fn compound_vowel(
        &self,
        first: &LetterSymbol,
        second: &LetterSymbol,
    ) -> Option<LetterSymbol> {
        if first.class != LetterClass::Vowel || second.class != LetterClass::Vowel {
            return None;
        }
        let fused = self.compounds.get(&(first.symbol, second.symbol))?;
        self.letters.get(fused).copied()
    }

    /// Number of letters in the table.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}
