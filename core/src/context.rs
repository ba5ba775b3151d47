//! IME context for host communication.
//!
//! `ImeContext` is a plain data container with public fields. After the host
//! hands a key event to the engine it reads these fields to update its UI and
//! insert committed text.

/// Host-visible composition state.
///
/// - `preedit_text`: the syllable in progress (displayed with underline)
/// - `commit_text`: text to insert at the caret (consume and clear)
/// - `auxiliary_text`: mode indicator for the host's status area
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImeContext {
    /// Pending syllable as currently rendered
    pub preedit_text: String,

    /// Text committed by the last call
    pub commit_text: String,

    /// Short status hint (e.g. "옛" while archaic input is on)
    pub auxiliary_text: String,
}

impl ImeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_commit() {
        let mut ctx = ImeContext::new();
        ctx.commit_text.push_str("간");
        assert!(ctx.has_commit());
        assert_eq!(ctx.take_commit(), "간");
        assert!(!ctx.has_commit());
    }
}
