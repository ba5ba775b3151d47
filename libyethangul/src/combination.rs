//! Trigger patterns and the combination table.
//!
//! A `TriggerPattern` is the key shape that produces one letter: a key on its
//! own, a key with Shift/AltGr held, the same key twice in quick succession, or
//! a short run of keys. Keys are physical Latin keys; in repeated-key and
//! sequence patterns a shifted key is written as its shifted character
//! (`Q` for Shift+q).
//!
//! Trigger syntax (used by custom bindings and the CLI):
//!
//! | Pattern | Example |
//! |---------|---------|
//! | single key | `;` |
//! | modifier + key | `shift+s`, `altgr+a`, `altgr+shift+m` |
//! | repeated key | `s s` |
//! | key sequence | `q d`, `x y z` |

use std::fmt;
use std::str::FromStr;

use ahash::AHashMap;

use crate::key_event::ModifierSet;

/// Key shape that resolves to one letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TriggerPattern {
    SingleKey(char),
    ModifiedKey(ModifierSet, char),
    RepeatedKey(char),
    KeySequence(char, char, Option<char>),
}

impl TriggerPattern {
    /// Number of key presses the pattern spans.
    pub fn key_count(&self) -> usize {
        match self {
            TriggerPattern::SingleKey(_) | TriggerPattern::ModifiedKey(..) => 1,
            TriggerPattern::RepeatedKey(_) => 2,
            TriggerPattern::KeySequence(_, _, None) => 2,
            TriggerPattern::KeySequence(_, _, Some(_)) => 3,
        }
    }
}

fn single_char(token: &str) -> Result<char, String> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(format!("expected a single key, got '{}'", token)),
    }
}

fn parse_modified(token: &str) -> Result<TriggerPattern, String> {
    let (prefix, key) = token
        .rsplit_once('+')
        .ok_or_else(|| format!("invalid modifier pattern '{}'", token))?;
    let key = single_char(key)?.to_ascii_lowercase();

    let mut modifiers = ModifierSet::NONE;
    for name in prefix.split('+') {
        match name.to_ascii_lowercase().as_str() {
            "shift" => modifiers.shift = true,
            "altgr" | "altgraph" | "alt_graph" => modifiers.altgr = true,
            other => return Err(format!("unknown modifier '{}'", other)),
        }
    }
    Ok(TriggerPattern::ModifiedKey(modifiers, key))
}

impl FromStr for TriggerPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [token] if token.chars().count() > 1 && token.contains('+') => parse_modified(token),
            [token] => Ok(TriggerPattern::SingleKey(single_char(token)?)),
            [a, b] => {
                let (a, b) = (single_char(a)?, single_char(b)?);
                if a == b {
                    Ok(TriggerPattern::RepeatedKey(a))
                } else {
                    Ok(TriggerPattern::KeySequence(a, b, None))
                }
            }
            [a, b, c] => Ok(TriggerPattern::KeySequence(
                single_char(a)?,
                single_char(b)?,
                Some(single_char(c)?),
            )),
            [] => Err("empty trigger".to_string()),
            _ => Err(format!("trigger '{}' has more than three keys", s)),
        }
    }
}

impl fmt::Display for TriggerPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriggerPattern::SingleKey(k) => write!(f, "{}", k),
            TriggerPattern::ModifiedKey(m, k) => write!(f, "{}+{}", m, k),
            TriggerPattern::RepeatedKey(k) => write!(f, "{} {}", k, k),
            TriggerPattern::KeySequence(a, b, None) => write!(f, "{} {}", a, b),
            TriggerPattern::KeySequence(a, b, Some(c)) => write!(f, "{} {} {}", a, b, c),
        }
    }
}

// Standard triggers on the Dubeolsik layout. Values are JamoTable symbols.

const SHIFT_LAYER: [(char, char); 12] = [
    ('q', 'ㅃ'),
    ('w', 'ㅉ'),
    ('e', 'ㄸ'),
    ('r', 'ㄲ'),
    ('t', 'ㅆ'),
    ('o', 'ㅒ'),
    ('p', 'ㅖ'),
    ('s', 'ㅥ'),
    ('f', 'ᄙ'),
    ('d', 'ㆀ'),
    ('g', 'ㆅ'),
    (';', 'ᆢ'),
];

const ALTGR_LAYER: [(char, char); 13] = [
    ('a', 'ㆍ'),
    ('s', 'ㅿ'),
    ('h', 'ㆆ'),
    ('b', 'ㅸ'),
    ('n', 'ㅥ'),
    ('o', 'ㆀ'),
    ('l', 'ᄙ'),
    ('k', 'ᄼ'),
    ('t', 'ᄾ'),
    ('c', 'ᅎ'),
    ('p', 'ᅐ'),
    ('u', 'ᅔ'),
    ('w', 'ᅕ'),
];

const ALTGR_SHIFT_LAYER: [(char, char); 8] = [
    ('a', 'ᆢ'),
    ('h', 'ㆅ'),
    ('m', 'ㅱ'),
    ('k', 'ᄽ'),
    ('t', 'ᄿ'),
    ('c', 'ᅏ'),
    ('p', 'ᅑ'),
    ('o', 'ㆁ'),
];

const REPEATED: [(char, char); 5] = [
    ('s', 'ㅥ'),
    ('f', 'ᄙ'),
    ('d', 'ㆀ'),
    ('g', 'ㆅ'),
    (';', 'ᆢ'),
];

const SEQUENCES: [(char, char, char); 4] = [
    ('q', 'd', 'ㅸ'),
    ('Q', 'd', 'ㅹ'),
    ('v', 'd', 'ㆄ'),
    ('a', 'd', 'ㅱ'),
];

const SINGLE: [(char, char); 1] = [(';', 'ㆍ')];

/// Trigger pattern → jamo symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinationTable {
    patterns: AHashMap<TriggerPattern, char>,
}

impl CombinationTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard archaic triggers for the Dubeolsik layout.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for (key, jamo) in SHIFT_LAYER {
            table.insert(TriggerPattern::ModifiedKey(ModifierSet::SHIFT, key), jamo);
        }
        for (key, jamo) in ALTGR_LAYER {
            table.insert(TriggerPattern::ModifiedKey(ModifierSet::ALTGR, key), jamo);
        }
        for (key, jamo) in ALTGR_SHIFT_LAYER {
            table.insert(TriggerPattern::ModifiedKey(ModifierSet::ALTGR_SHIFT, key), jamo);
        }
        for (key, jamo) in REPEATED {
            table.insert(TriggerPattern::RepeatedKey(key), jamo);
        }
        for (first, second, jamo) in SEQUENCES {
            table.insert(TriggerPattern::KeySequence(first, second, None), jamo);
        }
        for (key, jamo) in SINGLE {
            table.insert(TriggerPattern::SingleKey(key), jamo);
        }
        table
    }

    /// Bind a pattern, returning the jamo it replaced.
    pub fn insert(&mut self, pattern: TriggerPattern, jamo: char) -> Option<char> {
        self.patterns.insert(pattern, jamo)
    }

    pub fn get(&self, pattern: &TriggerPattern) -> Option<char> {
        self.patterns.get(pattern).copied()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TriggerPattern, &char)> {
        self.patterns.iter()
    }

    /// All bindings in pattern order, for display.
    pub fn entries(&self) -> Vec<(TriggerPattern, char)> {
        let mut entries: Vec<_> = self.iter().map(|(p, j)| (*p, *j)).collect();
        entries.sort();
        entries
    }
}
