//! Dubeolsik (KS X 5002) base layout.
//!
//! Physical Latin keys to the compatibility jamo printed on them. The shifted
//! layer (ㅃ ㅉ ㄸ ㄲ ㅆ ㅒ ㅖ) lives in the combination table so it can be
//! rebound like any other modifier pattern.

use phf::phf_map;

static DUBEOLSIK: phf::Map<char, char> = phf_map! {
    'q' => 'ㅂ', 'w' => 'ㅈ', 'e' => 'ㄷ', 'r' => 'ㄱ', 't' => 'ㅅ',
    'y' => 'ㅛ', 'u' => 'ㅕ', 'i' => 'ㅑ', 'o' => 'ㅐ', 'p' => 'ㅔ',
    'a' => 'ㅁ', 's' => 'ㄴ', 'd' => 'ㅇ', 'f' => 'ㄹ', 'g' => 'ㅎ',
    'h' => 'ㅗ', 'j' => 'ㅓ', 'k' => 'ㅏ', 'l' => 'ㅣ',
    'z' => 'ㅋ', 'x' => 'ㅌ', 'c' => 'ㅊ', 'v' => 'ㅍ', 'b' => 'ㅠ',
    'n' => 'ㅜ', 'm' => 'ㅡ',
};

/// Jamo on a physical key, if the key carries one.
pub fn jamo_for_key(key: char) -> Option<char> {
    DUBEOLSIK.get(&key.to_ascii_lowercase()).copied()
}

/// Character a key produces with Shift held on a US keyboard.
pub fn shifted(key: char) -> char {
    match key {
        'a'..='z' => key.to_ascii_uppercase(),
        ';' => ':',
        '\'' => '"',
        ',' => '<',
        '.' => '>',
        '/' => '?',
        '[' => '{',
        ']' => '}',
        _ => key,
    }
}
