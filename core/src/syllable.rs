//! Precomposed syllable algebra (U+AC00..=U+D7A3).
//!
//! Syllable = S_BASE + (L × V_COUNT × T_COUNT) + (V × T_COUNT) + T, where L, V
//! and T are indices into the 19 leading consonants, 21 vowels and 28 trailing
//! slots (slot 0 = no trailing consonant).

/// First precomposed syllable (가)
pub const S_BASE: u32 = 0xAC00;
/// First modern leading consonant (ᄀ)
pub const L_BASE: u32 = 0x1100;
/// First modern vowel (ᅡ)
pub const V_BASE: u32 = 0x1161;
/// One before the first modern trailing consonant (ᆨ is T_BASE + 1)
pub const T_BASE: u32 = 0x11A7;

pub const L_COUNT: u32 = 19;
pub const V_COUNT: u32 = 21;
pub const T_COUNT: u32 = 28;
/// Syllables per leading consonant
pub const N_COUNT: u32 = V_COUNT * T_COUNT;
pub const S_COUNT: u32 = L_COUNT * N_COUNT;

/// Index of a leading consonant in the modern ordering.
pub fn initial_index(codepoint: u32) -> Option<u32> {
    codepoint
        .checked_sub(L_BASE)
        .filter(|&index| index < L_COUNT)
}

/// Index of a vowel in the modern ordering.
pub fn medial_index(codepoint: u32) -> Option<u32> {
    codepoint
        .checked_sub(V_BASE)
        .filter(|&index| index < V_COUNT)
}

/// Trailing slot of a final consonant: 1..=27. Slot 0 means "none" and is
/// never returned here.
pub fn final_index(codepoint: u32) -> Option<u32> {
    codepoint
        .checked_sub(T_BASE)
        .filter(|&index| (1..T_COUNT).contains(&index))
}

/// Assemble a precomposed syllable from conjoining code points.
///
/// Returns `None` when any part lies outside the modern ranges, so archaic
/// code points can never push the result out of the syllable block.
pub fn compose(initial: u32, medial: u32, trailing: Option<u32>) -> Option<char> {
    let l = initial_index(initial)?;
    let v = medial_index(medial)?;
    let t = match trailing {
        Some(cp) => final_index(cp)?,
        None => 0,
    };
    char::from_u32(S_BASE + l * N_COUNT + v * T_COUNT + t)
}

/// Split a precomposed syllable back into its conjoining code points.
pub fn decompose(syllable: char) -> Option<(u32, u32, Option<u32>)> {
    if !is_syllable(syllable) {
        return None;
    }
    let s = syllable as u32 - S_BASE;

    let l = s / N_COUNT;
    let v = (s % N_COUNT) / T_COUNT;
    let t = s % T_COUNT;

    let trailing = (t != 0).then_some(T_BASE + t);
    Some((L_BASE + l, V_BASE + v, trailing))
}

/// Whether `ch` is a precomposed syllable.
pub fn is_syllable(ch: char) -> bool {
    (S_BASE..S_BASE + S_COUNT).contains(&(ch as u32))
}
