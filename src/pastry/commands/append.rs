use crate::error::{PastryError, Result};
use crate::model::Snippet;

/// Appends `bytes` as a new snippet and returns its index.
///
/// Bytes that are not valid UTF-8 are rejected with `InvalidEncoding` and the
/// collection is left untouched.
pub fn run(snippets: &mut Vec<Snippet>, bytes: &[u8]) -> Result<usize> {
    let text = std::str::from_utf8(bytes).map_err(|_| PastryError::InvalidEncoding)?;
    Ok(push(snippets, text.to_string()))
}

/// Appends already-decoded text.
pub fn push(snippets: &mut Vec<Snippet>, text: String) -> usize {
    snippets.push(Snippet::new(text));
    snippets.len() - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::texts;

    #[test]
    fn appends_in_insertion_order() {
        let mut snippets = Vec::new();
        assert_eq!(run(&mut snippets, b"one apple").unwrap(), 0);
        assert_eq!(run(&mut snippets, b"two apples").unwrap(), 1);
        assert_eq!(run(&mut snippets, b"three apple").unwrap(), 2);
        assert_eq!(
            texts(&snippets),
            vec!["one apple", "two apples", "three apple"]
        );
    }

    #[test]
    fn keeps_payload_verbatim() {
        let mut snippets = Vec::new();
        run(&mut snippets, b"\nfirst\r\n  second\n\n").unwrap();
        assert_eq!(snippets[0].text, "\nfirst\r\n  second\n\n");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let mut snippets = Vec::new();
        run(&mut snippets, b"ok").unwrap();

        let err = run(&mut snippets, &[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, PastryError::InvalidEncoding));
        assert_eq!(snippets.len(), 1);
    }

    #[test]
    fn rejects_truncated_multibyte_sequence() {
        // "é" is 0xC3 0xA9; a read cut after the first byte must not be stored.
        let mut snippets = Vec::new();
        assert!(run(&mut snippets, &[b'c', b'a', b'f', 0xC3]).is_err());
        assert!(snippets.is_empty());
    }
}
