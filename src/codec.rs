//! Encode/decode orchestration
//!
//! The facade wires the pipeline together: frequency count, tree build,
//! canonical code assignment, bit packing, container framing, and the
//! inverse walk on decode. Every structure it touches is local to one
//! call; the codec itself carries no state, so one instance can be shared
//! and reused freely, concurrently included.

use log::debug;

use crate::bitstream::BitReader;
use crate::codebook::Codebook;
use crate::container::Container;
use crate::error::{HuffzipError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{build_tree, BuildOutcome};

/// Stateless Huffman codec facade
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanCodec;

impl HuffmanCodec {
    /// Create a codec handle
    pub fn new() -> Self {
        Self
    }

    /// Compress `data` into a self-describing container.
    ///
    /// Empty input and single-distinct-symbol input produce the dedicated
    /// container shapes; everything else goes through tree construction
    /// and bit packing.
    pub fn encode(&self, data: &[u8]) -> Result<Vec<u8>> {
        let frequencies = FrequencyTable::from_data(data);

        let container = match build_tree(&frequencies) {
            BuildOutcome::Empty => Container::Empty,
            BuildOutcome::Single { symbol, count } => Container::Single { symbol, count },
            BuildOutcome::Tree(tree) => {
                let table = tree.assign_codes();
                let codebook = Codebook::from_code_table(&table)?;
                let (payload, padding_bits) = codebook.encode_payload(data)?;
                Container::General {
                    padding_bits,
                    codebook: codebook.to_bytes(),
                    payload,
                }
            }
        };

        let bytes = container.to_bytes();
        debug!(
            "encoded {} input bytes into a {} byte container",
            data.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Decompress a container produced by [`HuffmanCodec::encode`].
    ///
    /// Fail-fast: the first inconsistency aborts with the specific error
    /// kind and no partial output is returned.
    pub fn decode(&self, container: &[u8]) -> Result<Vec<u8>> {
        let output = match Container::parse(container)? {
            Container::Empty => Vec::new(),
            Container::Single { symbol, count } => {
                let count = usize::try_from(count).map_err(|_| {
                    HuffzipError::malformed_header(
                        "repeat count exceeds addressable memory on this target",
                    )
                })?;
                vec![symbol; count]
            }
            Container::General {
                padding_bits,
                codebook,
                payload,
            } => {
                if payload.is_empty() {
                    return Err(HuffzipError::unexpected_end_of_stream(
                        "general container carries no payload bytes",
                    ));
                }

                let codebook = Codebook::from_bytes(&codebook)?;
                let tree = codebook.decode_tree()?;
                let reader = BitReader::new(&payload, padding_bits)?;

                let mut output = Vec::new();
                let mut node = tree.root();
                for bit in reader {
                    let next = tree.step(node, bit).ok_or_else(|| {
                        HuffzipError::tree_deserialization(
                            "decode walk reached a vacant branch",
                        )
                    })?;
                    match tree.symbol(next) {
                        Some(symbol) => {
                            output.push(symbol);
                            node = tree.root();
                        }
                        None => node = next,
                    }
                }

                // The last code must complete exactly; anything else means
                // the stream was cut off mid-symbol
                if node != tree.root() {
                    return Err(HuffzipError::unexpected_end_of_stream(
                        "bit stream ended in the middle of a code",
                    ));
                }

                output
            }
        };

        debug!(
            "decoded {} container bytes into {} output bytes",
            container.len(),
            output.len()
        );
        Ok(output)
    }
}

/// Compress `data` with a throwaway codec handle
pub fn huffzip_compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().encode(data)
}

/// Decompress `container` with a throwaway codec handle
pub fn huffzip_decompress(container: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::new().decode(container)
}
