//! Role assignment for a run of letters.
//!
//! Roles are recomputed over the whole run whenever it changes, so adding a
//! letter can change the role of an earlier one.

use crate::letter::{LetterSymbol, RoleTag};

/// Role of `symbols[index]` within the run.
///
/// Vowels are always `Medial`. A consonant is `Initial` at the start of the
/// run, `Final` right after a vowel, `Initial` right before a vowel, and
/// `Final` otherwise.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn role(symbols: &[LetterSymbol], index: usize) -> RoleTag {
    if symbols[index].is_vowel() {
        return RoleTag::Medial;
    }
    if index == 0 {
        return RoleTag::Initial;
    }
    if symbols[index - 1].is_vowel() {
        return RoleTag::Final;
    }
    if symbols.get(index + 1).is_some_and(|next| next.is_vowel()) {
        return RoleTag::Initial;
    }
    RoleTag::Final
}

/// Roles for every position of the run.
pub fn roles(symbols: &[LetterSymbol]) -> Vec<RoleTag> {
    (0..symbols.len()).map(|i| role(symbols, i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jamo_table::JamoTable;
    use RoleTag::*;

    fn letters(text: &str) -> Vec<LetterSymbol> {
        let table = JamoTable::standard();
        text.chars().map(|ch| table.lookup(ch).unwrap()).collect()
    }

    #[test]
    fn test_consonant_vowel_consonant() {
        assert_eq!(roles(&letters("ㄱㅏㄴ")), vec![Initial, Medial, Final]);
    }

    #[test]
    fn test_vowel_always_medial() {
        assert_eq!(roles(&letters("ㅏ")), vec![Medial]);
        assert_eq!(roles(&letters("ㅏㅗ")), vec![Medial, Medial]);
    }

    #[test]
    fn test_lone_consonant_is_initial() {
        assert_eq!(roles(&letters("ㅿ")), vec![Initial]);
    }

    #[test]
    fn test_consonant_before_vowel_is_initial() {
        // ㄴ follows a consonant but precedes a vowel
        assert_eq!(roles(&letters("ㄱㄴㅏ")), vec![Initial, Initial, Medial]);
    }

    #[test]
    fn test_consonant_between_consonants_is_final() {
        assert_eq!(roles(&letters("ㄱㄴㄷ")), vec![Initial, Final, Final]);
    }

    #[test]
    fn test_appending_vowel_reclassifies_trailing_consonant() {
        let mut run = letters("ㄱㄴ");
        assert_eq!(role(&run, 1), Final);
        run.extend(letters("ㅏ"));
        assert_eq!(role(&run, 1), Initial);
    }

    #[test]
    fn test_moving_vowel_changes_neighbours() {
        // same multiset, vowel in a different place
        assert_eq!(roles(&letters("ㄱㅏㄴ")), vec![Initial, Medial, Final]);
        assert_eq!(roles(&letters("ㄱㄴㅏ")), vec![Initial, Initial, Medial]);
        assert_eq!(roles(&letters("ㅏㄱㄴ")), vec![Medial, Final, Final]);
    }

    #[test]
    fn test_role_is_idempotent() {
        let run = letters("ㅿㅡㄹ");
        let first = roles(&run);
        let second = roles(&run);
        assert_eq!(first, second);
        assert_eq!(first, vec![Initial, Medial, Final]);
    }
}
