//! Character/byte offset conversion
//!
//! Spans are expressed in characters so they stay meaningful to callers that
//! do not index by UTF-8 bytes. Regex matches and string slicing work in bytes.

/// Byte offset of every character boundary in a string, plus its length
#[derive(Debug, Clone)]
pub struct CharMap {
    boundaries: Vec<usize>,
    ascii: bool,
    byte_len: usize,
}

impl CharMap {
    pub fn new(text: &str) -> Self {
        let ascii = text.is_ascii();
        let boundaries = if ascii {
            Vec::new()
        } else {
            text.char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(text.len()))
                .collect()
        };
        Self {
            boundaries,
            ascii,
            byte_len: text.len(),
        }
    }

    /// Number of characters in the mapped text
    pub fn char_len(&self) -> usize {
        if self.ascii {
            self.byte_len
        } else {
            self.boundaries.len() - 1
        }
    }

    /// Byte offset of the character at `char_idx` (`char_len()` maps to the end)
    pub fn byte_at_char(&self, char_idx: usize) -> Option<usize> {
        if self.ascii {
            return (char_idx <= self.byte_len).then_some(char_idx);
        }
        self.boundaries.get(char_idx).copied()
    }

    /// Character index of a byte offset; `None` if not on a char boundary
    pub fn char_at_byte(&self, byte_idx: usize) -> Option<usize> {
        if self.ascii {
            return (byte_idx <= self.byte_len).then_some(byte_idx);
        }
        self.boundaries.binary_search(&byte_idx).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_is_identity() {
        let map = CharMap::new("hello");
        assert_eq!(map.char_len(), 5);
        assert_eq!(map.byte_at_char(5), Some(5));
        assert_eq!(map.byte_at_char(6), None);
        assert_eq!(map.char_at_byte(3), Some(3));
    }

    #[test]
    fn test_multibyte_boundaries() {
        // 'é' is two bytes, '₹' is three
        let map = CharMap::new("é₹a");
        assert_eq!(map.char_len(), 3);
        assert_eq!(map.byte_at_char(1), Some(2));
        assert_eq!(map.byte_at_char(2), Some(5));
        assert_eq!(map.byte_at_char(3), Some(6));
        assert_eq!(map.char_at_byte(5), Some(2));
        assert_eq!(map.char_at_byte(1), None);
    }

    #[test]
    fn test_empty_text() {
        let map = CharMap::new("");
        assert_eq!(map.char_len(), 0);
        assert_eq!(map.byte_at_char(0), Some(0));
    }
}
