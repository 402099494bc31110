//! Canonical code assignment and the serialized codebook
//!
//! The wire form of the code tree is a code-length table: a u16 symbol
//! count followed by one `(symbol, code_length)` byte pair per symbol in
//! ascending symbol order. Actual code words are reassigned canonically
//! from the lengths (symbols ordered by length, then by value, each code
//! the binary successor of the previous one), so the table needs no
//! structural markers and no byte value can collide with the grammar.
//!
//! Deserialization validates that the declared lengths describe exactly one
//! complete prefix-free code: assigning canonical codes overflows when the
//! lengths oversubscribe the code space, and the final code must come out
//! all-ones when they saturate it. Both checks are integer-safe for any
//! length a single byte can declare.

use std::collections::HashMap;

use crate::bitstream::BitWriter;
use crate::error::{HuffzipError, Result};
use crate::frequency::ALPHABET_SIZE;
use crate::tree::{CodeTable, DecodeTree};

/// Canonical symbol-to-code assignment with its serializable length table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codebook {
    /// `(symbol, code_length)` pairs in ascending symbol order
    lengths: Vec<(u8, u8)>,
    codes: HashMap<u8, Vec<bool>>,
}

impl Codebook {
    /// Canonicalize the codes of a tree-generated table.
    ///
    /// Only the per-symbol code lengths survive; code words are reassigned
    /// canonically so the same lengths always yield the same codes.
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut lengths: Vec<(u8, u8)> = table
            .iter()
            .map(|(symbol, code)| (symbol, code.len() as u8))
            .collect();
        lengths.sort_unstable_by_key(|&(symbol, _)| symbol);

        let codes = canonical_codes(&lengths)?;
        Ok(Self { lengths, codes })
    }

    /// Serialize the length table: symbol count (u16 LE) followed by
    /// `(symbol, code_length)` pairs in ascending symbol order
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(2 + 2 * self.lengths.len());
        result.extend_from_slice(&(self.lengths.len() as u16).to_le_bytes());
        for &(symbol, length) in &self.lengths {
            result.push(symbol);
            result.push(length);
        }
        result
    }

    /// Parse and validate a serialized length table.
    ///
    /// The cursor-tracked parse fails with
    /// [`HuffzipError::TreeDeserialization`] when the table is truncated,
    /// lists fewer than two symbols, repeats or misorders symbols, declares
    /// a zero length, carries trailing bytes, or declares lengths that do
    /// not describe exactly one complete prefix-free code.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(HuffzipError::tree_deserialization(
                "codebook truncated: missing symbol count",
            ));
        }

        let count = u16::from_le_bytes([data[0], data[1]]) as usize;
        if count < 2 {
            return Err(HuffzipError::tree_deserialization(
                "codebook must list at least two symbols",
            ));
        }
        if count > ALPHABET_SIZE {
            return Err(HuffzipError::tree_deserialization(format!(
                "codebook lists {count} symbols, more than the byte alphabet holds",
            )));
        }

        let mut lengths = Vec::with_capacity(count);
        let mut offset = 2;
        let mut previous: Option<u8> = None;

        for _ in 0..count {
            if offset + 2 > data.len() {
                return Err(HuffzipError::tree_deserialization(
                    "codebook truncated: symbol record cut short",
                ));
            }
            let symbol = data[offset];
            let length = data[offset + 1];
            offset += 2;

            if length == 0 {
                return Err(HuffzipError::tree_deserialization(format!(
                    "zero-length code declared for symbol 0x{symbol:02x}",
                )));
            }
            if let Some(previous) = previous {
                if symbol <= previous {
                    return Err(HuffzipError::tree_deserialization(
                        "codebook symbols repeated or out of order",
                    ));
                }
            }
            previous = Some(symbol);
            lengths.push((symbol, length));
        }

        if offset != data.len() {
            return Err(HuffzipError::tree_deserialization(
                "trailing bytes after codebook table",
            ));
        }

        let codes = canonical_codes(&lengths)?;
        Ok(Self { lengths, codes })
    }

    /// The canonical code assigned to `symbol`, if the codebook covers it
    pub fn code(&self, symbol: u8) -> Option<&[bool]> {
        self.codes.get(&symbol).map(Vec::as_slice)
    }

    /// Number of symbols the codebook covers
    pub fn symbol_count(&self) -> usize {
        self.lengths.len()
    }

    /// Longest code length in bits
    pub fn max_code_length(&self) -> usize {
        self.lengths
            .iter()
            .map(|&(_, length)| length as usize)
            .max()
            .unwrap_or(0)
    }

    /// Iterate `(symbol, code_length)` pairs in ascending symbol order
    pub fn iter_lengths(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.lengths.iter().copied()
    }

    /// Encode `data` against this codebook into packed payload bytes plus
    /// the padding-bit count.
    ///
    /// Fails with [`HuffzipError::SymbolNotInCodebook`] when the input
    /// contains a symbol the codebook does not cover; a codebook derived
    /// from the same input covers it by construction.
    pub fn encode_payload(&self, data: &[u8]) -> Result<(Vec<u8>, u8)> {
        let mut writer = BitWriter::with_capacity(data.len() / 2 + 1);
        for &byte in data {
            match self.code(byte) {
                Some(code) => writer.push_code(code),
                None => return Err(HuffzipError::symbol_not_in_codebook(byte)),
            }
        }
        Ok(writer.finish())
    }

    /// Rebuild the decode-side tree by inserting every canonical code path
    pub fn decode_tree(&self) -> Result<DecodeTree> {
        let mut tree = DecodeTree::new();
        for &(symbol, _) in &self.lengths {
            // Every listed symbol has a code; lengths and codes are built
            // from the same table
            if let Some(code) = self.code(symbol) {
                tree.insert(symbol, code)?;
            }
        }
        tree.validate_complete()?;
        Ok(tree)
    }
}

/// Assign canonical codes to `(symbol, length)` pairs.
///
/// Symbols are ordered by `(length, symbol)`; the first code is all zeros
/// and each following code is the binary successor of the previous one,
/// extended with zeros to its own length.
fn canonical_codes(lengths: &[(u8, u8)]) -> Result<HashMap<u8, Vec<bool>>> {
    let mut ordered: Vec<(u8, u8)> = lengths.to_vec();
    ordered.sort_unstable_by_key(|&(symbol, length)| (length, symbol));

    let mut codes = HashMap::with_capacity(ordered.len());
    let mut current: Vec<bool> = Vec::new();

    for (i, &(symbol, length)) in ordered.iter().enumerate() {
        if i == 0 {
            current = vec![false; length as usize];
        } else {
            if !increment(&mut current) {
                return Err(HuffzipError::tree_deserialization(
                    "code lengths oversubscribe the code space",
                ));
            }
            // Ascending lengths: resize only ever extends
            current.resize(length as usize, false);
        }
        codes.insert(symbol, current.clone());
    }

    // A complete code ends exactly on the all-ones word
    if !current.iter().all(|&bit| bit) {
        return Err(HuffzipError::tree_deserialization(
            "code lengths undersubscribe the code space",
        ));
    }

    Ok(codes)
}

/// Binary-increment a code in place; false when the code is all ones
fn increment(code: &mut [bool]) -> bool {
    for bit in code.iter_mut().rev() {
        if *bit {
            *bit = false;
        } else {
            *bit = true;
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::tree::{build_tree, BuildOutcome};

    fn codebook_for(data: &[u8]) -> Codebook {
        match build_tree(&FrequencyTable::from_data(data)) {
            BuildOutcome::Tree(tree) => {
                Codebook::from_code_table(&tree.assign_codes()).unwrap()
            }
            other => panic!("expected a tree, got {:?}", other),
        }
    }

    fn as_bits(code: &[bool]) -> String {
        code.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_canonical_assignment_is_ordered() {
        // All four symbols get two-bit codes; canonical order is by symbol
        let book = codebook_for(b"aaabbbccd");
        assert_eq!(book.symbol_count(), 4);
        assert_eq!(book.max_code_length(), 2);
        assert_eq!(as_bits(book.code(b'a').unwrap()), "00");
        assert_eq!(as_bits(book.code(b'b').unwrap()), "01");
        assert_eq!(as_bits(book.code(b'c').unwrap()), "10");
        assert_eq!(as_bits(book.code(b'd').unwrap()), "11");
        assert_eq!(book.code(b'e'), None);
    }

    #[test]
    fn test_canonical_assignment_mixed_lengths() {
        // d:4 c:2 a:1 b:1 -> lengths d=1, c=2, a=b=3
        let book = codebook_for(b"ddddccab");
        assert_eq!(as_bits(book.code(b'd').unwrap()), "0");
        assert_eq!(as_bits(book.code(b'c').unwrap()), "10");
        assert_eq!(as_bits(book.code(b'a').unwrap()), "110");
        assert_eq!(as_bits(book.code(b'b').unwrap()), "111");
    }

    #[test]
    fn test_wire_roundtrip() {
        let book = codebook_for(b"entropy coding keeps the bits honest");
        let bytes = book.to_bytes();
        let parsed = Codebook::from_bytes(&bytes).unwrap();
        assert_eq!(parsed, book);
    }

    #[test]
    fn test_wire_layout() {
        let book = codebook_for(b"aaabbbccd");
        let bytes = book.to_bytes();
        assert_eq!(
            bytes,
            vec![4, 0, b'a', 2, b'b', 2, b'c', 2, b'd', 2]
        );
    }

    #[test]
    fn test_deterministic_across_builds() {
        let data = b"deterministic output or bust";
        let first = codebook_for(data).to_bytes();
        for _ in 0..4 {
            assert_eq!(codebook_for(data).to_bytes(), first);
        }
    }

    #[test]
    fn test_from_bytes_rejects_truncation() {
        assert!(Codebook::from_bytes(&[]).is_err());
        assert!(Codebook::from_bytes(&[2]).is_err());
        // Declares two symbols, provides one record
        assert!(Codebook::from_bytes(&[2, 0, b'a', 1]).is_err());
        // Record cut in half
        assert!(Codebook::from_bytes(&[2, 0, b'a', 1, b'b']).is_err());
    }

    #[test]
    fn test_from_bytes_rejects_degenerate_counts() {
        // Zero and one symbol are never serialized as a general codebook
        assert!(Codebook::from_bytes(&[0, 0]).is_err());
        assert!(Codebook::from_bytes(&[1, 0, b'a', 1]).is_err());
        // More symbols than the byte alphabet holds
        assert!(Codebook::from_bytes(&[1, 1, b'a', 1]).is_err());
    }

    #[test]
    fn test_from_bytes_rejects_bad_records() {
        // Zero-length code
        assert!(Codebook::from_bytes(&[2, 0, b'a', 0, b'b', 1]).is_err());
        // Repeated symbol
        assert!(Codebook::from_bytes(&[2, 0, b'a', 1, b'a', 1]).is_err());
        // Out-of-order symbols
        assert!(Codebook::from_bytes(&[2, 0, b'b', 1, b'a', 1]).is_err());
        // Trailing garbage
        assert!(Codebook::from_bytes(&[2, 0, b'a', 1, b'b', 1, 0xFF]).is_err());
    }

    #[test]
    fn test_from_bytes_rejects_invalid_length_sets() {
        // Three one-bit codes oversubscribe
        let err = Codebook::from_bytes(&[3, 0, b'a', 1, b'b', 1, b'c', 1]).unwrap_err();
        assert!(matches!(err, HuffzipError::TreeDeserialization { .. }));

        // One one-bit and one two-bit code leave a hole
        let err = Codebook::from_bytes(&[2, 0, b'a', 1, b'b', 2]).unwrap_err();
        assert!(matches!(err, HuffzipError::TreeDeserialization { .. }));
    }

    #[test]
    fn test_from_bytes_accepts_valid_tables() {
        let book = Codebook::from_bytes(&[2, 0, b'x', 1, b'y', 1]).unwrap();
        assert_eq!(as_bits(book.code(b'x').unwrap()), "0");
        assert_eq!(as_bits(book.code(b'y').unwrap()), "1");

        let book = Codebook::from_bytes(&[3, 0, b'a', 1, b'b', 2, b'c', 2]).unwrap();
        assert_eq!(as_bits(book.code(b'a').unwrap()), "0");
        assert_eq!(as_bits(book.code(b'b').unwrap()), "10");
        assert_eq!(as_bits(book.code(b'c').unwrap()), "11");
    }

    #[test]
    fn test_encode_payload() {
        let book = codebook_for(b"aaabbbccd");
        let (payload, padding) = book.encode_payload(b"aaabbbccd").unwrap();
        assert_eq!(payload, vec![0b0000_0001, 0b0101_1010, 0b1100_0000]);
        assert_eq!(padding, 6);
    }

    #[test]
    fn test_encode_payload_rejects_uncovered_symbol() {
        let book = codebook_for(b"aaabbbccd");
        let err = book.encode_payload(b"aaaz").unwrap_err();
        assert!(matches!(
            err,
            HuffzipError::SymbolNotInCodebook { symbol: b'z' }
        ));
    }

    #[test]
    fn test_decode_tree_resolves_every_code() {
        let book = codebook_for(b"ddddccab");
        let tree = book.decode_tree().unwrap();

        for (symbol, _) in book.iter_lengths() {
            let mut node = tree.root();
            for &bit in book.code(symbol).unwrap() {
                node = tree.step(node, bit).unwrap();
            }
            assert_eq!(tree.symbol(node), Some(symbol));
        }
    }

    #[test]
    fn test_lengths_iterate_in_symbol_order() {
        let book = codebook_for(b"ddddccab");
        let symbols: Vec<u8> = book.iter_lengths().map(|(s, _)| s).collect();
        assert_eq!(symbols, vec![b'a', b'b', b'c', b'd']);
    }
}
