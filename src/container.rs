//! Container wire format
//!
//! The container is the self-describing top-level object: a one-byte
//! discriminant tag followed by the shape's fields, all integers
//! little-endian. The general shape carries its codebook length explicitly
//! and treats the remainder as packed payload; the empty and single-symbol
//! shapes are fixed-size and self-delimiting, so trailing bytes after them
//! are rejected.

use crate::error::{HuffzipError, Result};

/// Discriminant tag for the empty shape
pub const TAG_EMPTY: u8 = 0x00;
/// Discriminant tag for the single-symbol shape
pub const TAG_SINGLE: u8 = 0x01;
/// Discriminant tag for the general shape
pub const TAG_GENERAL: u8 = 0x02;

/// Wire length of the single-symbol shape: tag, symbol, u64 count
const SINGLE_LEN: usize = 1 + 1 + 8;

/// The three on-wire shapes a container can take
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Container {
    /// Empty input; nothing but the tag
    Empty,
    /// Input held exactly one distinct symbol; the run is reconstructed by
    /// repetition rather than tree decode
    Single {
        /// The sole symbol
        symbol: u8,
        /// Number of repetitions; never zero on the wire
        count: u64,
    },
    /// Two or more distinct symbols; tree decode applies
    General {
        /// Zero bits appended to align the payload to a byte boundary
        padding_bits: u8,
        /// Serialized codebook (see [`crate::codebook::Codebook`])
        codebook: Vec<u8>,
        /// Packed payload bytes
        payload: Vec<u8>,
    },
}

impl Container {
    /// Serialize to the wire form
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Container::Empty => vec![TAG_EMPTY],
            Container::Single { symbol, count } => {
                let mut result = Vec::with_capacity(SINGLE_LEN);
                result.push(TAG_SINGLE);
                result.push(*symbol);
                result.extend_from_slice(&count.to_le_bytes());
                result
            }
            Container::General {
                padding_bits,
                codebook,
                payload,
            } => {
                let mut result = Vec::with_capacity(4 + codebook.len() + payload.len());
                result.push(TAG_GENERAL);
                result.extend_from_slice(&(codebook.len() as u16).to_le_bytes());
                result.push(*padding_bits);
                result.extend_from_slice(codebook);
                result.extend_from_slice(payload);
                result
            }
        }
    }

    /// Parse the wire form.
    ///
    /// Fails with [`HuffzipError::MalformedHeader`] on an unrecognized
    /// tag, truncated or out-of-range fields, or trailing bytes after a
    /// self-delimiting shape, and with
    /// [`HuffzipError::PaddingOutOfRange`] when the general shape declares
    /// more than 7 padding bits.
    pub fn parse(data: &[u8]) -> Result<Container> {
        let (&tag, rest) = data
            .split_first()
            .ok_or_else(|| HuffzipError::malformed_header("container is empty"))?;

        match tag {
            TAG_EMPTY => {
                if !rest.is_empty() {
                    return Err(HuffzipError::malformed_header(
                        "trailing bytes after empty container",
                    ));
                }
                Ok(Container::Empty)
            }
            TAG_SINGLE => {
                if data.len() != SINGLE_LEN {
                    return Err(HuffzipError::malformed_header(format!(
                        "single-symbol container must be {SINGLE_LEN} bytes, got {}",
                        data.len(),
                    )));
                }
                let symbol = rest[0];
                // rest[1..9] is exactly eight bytes here
                let mut count_bytes = [0u8; 8];
                count_bytes.copy_from_slice(&rest[1..9]);
                let count = u64::from_le_bytes(count_bytes);
                if count == 0 {
                    return Err(HuffzipError::malformed_header(
                        "single-symbol container declares a zero repeat count",
                    ));
                }
                Ok(Container::Single { symbol, count })
            }
            TAG_GENERAL => {
                if rest.len() < 3 {
                    return Err(HuffzipError::malformed_header(
                        "general container truncated before codebook length and padding",
                    ));
                }
                let codebook_len = u16::from_le_bytes([rest[0], rest[1]]) as usize;
                let padding_bits = rest[2];
                if padding_bits > 7 {
                    return Err(HuffzipError::padding_out_of_range(padding_bits));
                }

                let body = &rest[3..];
                if body.len() < codebook_len {
                    return Err(HuffzipError::malformed_header(format!(
                        "declared codebook length {codebook_len} exceeds the {} container bytes left",
                        body.len(),
                    )));
                }

                Ok(Container::General {
                    padding_bits,
                    codebook: body[..codebook_len].to_vec(),
                    payload: body[codebook_len..].to_vec(),
                })
            }
            other => Err(HuffzipError::malformed_header(format!(
                "unrecognized container tag 0x{other:02x}",
            ))),
        }
    }
}
