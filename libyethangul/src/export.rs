//! UTF-16 output for hosts that hand over a fixed-size buffer.
//!
//! Text is written as UTF-16 code units followed by a NUL terminator. This is
//! the only place the engine reports an error: a buffer too small for the
//! text plus terminator.

use std::fmt;

use yethangul_core::SyllableComposer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportError {
    /// `needed` code units (terminator included) do not fit in `capacity`
    BufferTooSmall { needed: usize, capacity: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::BufferTooSmall { needed, capacity } => write!(
                f,
                "output buffer too small: need {} UTF-16 units, have {}",
                needed, capacity
            ),
        }
    }
}

impl std::error::Error for ExportError {}

/// Code units needed for `text`, terminator included.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count() + 1
}

/// Write `text` and a NUL terminator into `out`. Returns the number of code
/// units written, terminator excluded. `out` is left untouched on error.
pub fn write_utf16(text: &str, out: &mut [u16]) -> Result<usize, ExportError> {
    let needed = utf16_len(text);
    if needed > out.len() {
        return Err(ExportError::BufferTooSmall {
            needed,
            capacity: out.len(),
        });
    }
    let mut written = 0;
    for (slot, unit) in out.iter_mut().zip(text.encode_utf16()) {
        *slot = unit;
        written += 1;
    }
    out[written] = 0;
    Ok(written)
}

/// Compose a jamo string and write the result.
pub fn compose_utf16(input: &str, out: &mut [u16]) -> Result<usize, ExportError> {
    let composed = SyllableComposer::default().compose_text(input);
    write_utf16(&composed, out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_with_terminator() {
        let mut out = [0xFFFFu16; 4];
        assert_eq!(write_utf16("간", &mut out), Ok(1));
        assert_eq!(out[..2], [0xAC04, 0]);
    }

    #[test]
    fn test_exact_fit() {
        let mut out = [0u16; 3];
        assert_eq!(write_utf16("한글", &mut out), Ok(2));
        assert_eq!(out, [0xD55C, 0xAE00, 0]);
    }

    #[test]
    fn test_buffer_too_small() {
        let mut out = [7u16; 2];
        let err = write_utf16("한글", &mut out).unwrap_err();
        assert_eq!(
            err,
            ExportError::BufferTooSmall {
                needed: 3,
                capacity: 2
            }
        );
        assert_eq!(out, [7, 7]);
        assert!(err.to_string().contains("need 3"));
    }

    #[test]
    fn test_empty_text() {
        let mut out = [9u16; 1];
        assert_eq!(write_utf16("", &mut out), Ok(0));
        assert_eq!(out, [0]);
        assert!(write_utf16("", &mut []).is_err());
    }

    #[test]
    fn test_compose_utf16() {
        let mut out = [0u16; 8];
        assert_eq!(compose_utf16("ㅿㅡㄹ", &mut out), Ok(3));
        assert_eq!(out[..4], [0x1140, 0x1173, 0x11AF, 0]);

        let mut small = [0u16; 1];
        assert_eq!(
            compose_utf16("ㄱㅏㄴ", &mut small),
            Err(ExportError::BufferTooSmall {
                needed: 2,
                capacity: 1
            })
        );
    }
}
