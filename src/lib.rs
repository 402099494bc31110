//! # huffzip: Self-Describing Huffman Entropy Coding
//!
//! This crate implements a static, single-pass Huffman codec over raw
//! bytes. Encoding turns any byte sequence into a compact container that
//! carries everything needed to reverse the transform exactly: a
//! discriminant for the empty and single-symbol special cases, a canonical
//! code-length codebook, the padding-bit count, and the packed payload.
//!
//! ## Key Properties
//!
//! - **Byte alphabet**: symbols are raw bytes, so arbitrary binary data
//!   round-trips without any text-encoding ambiguity
//! - **Deterministic output**: tree construction uses an explicit
//!   tie-break and codes are assigned canonically, so equal inputs always
//!   produce byte-identical containers
//! - **Marker-free codebook**: the tree ships as a code-length table, so
//!   no byte value can collide with the serialization grammar
//! - **Fail-fast decoding**: malformed containers abort with a specific
//!   error kind; there is no partial or best-effort output
//! - **Reentrant**: the codec holds no per-call scratch state, so one
//!   instance can serve sequential or concurrent calls safely
//!
//! ## Quick Start
//!
//! ```rust
//! use huffzip::{huffzip_compress, huffzip_decompress};
//!
//! let data = b"the quick brown fox jumps over the lazy dog";
//! let container = huffzip_compress(data)?;
//! let restored = huffzip_decompress(&container)?;
//! assert_eq!(restored, data);
//! # Ok::<(), huffzip::HuffzipError>(())
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod bitstream;
pub mod codebook;
pub mod codec;
pub mod container;
pub mod error;
pub mod frequency;
pub mod heap;
pub mod tree;

// Re-export core types
pub use bitstream::{BitReader, BitWriter};
pub use codebook::Codebook;
pub use codec::{huffzip_compress, huffzip_decompress, HuffmanCodec};
pub use container::Container;
pub use error::{HuffzipError, Result};
pub use frequency::{EntropyStats, FrequencyTable, ALPHABET_SIZE};
pub use heap::MinHeap;
pub use tree::{build_tree, BuildOutcome, CodeTable, DecodeTree, HuffmanTree, NodeId};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("initializing huffzip v{}", VERSION);
}
