//! Symbol frequency analysis
//!
//! Frequencies are counted over raw bytes so arbitrary binary inputs
//! round-trip; nothing here is character- or encoding-aware.

/// Number of distinct symbols in the byte alphabet
pub const ALPHABET_SIZE: usize = 256;

/// Occurrence counts for every byte value, built in one pass over the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl FrequencyTable {
    /// Count symbol occurrences in `data`
    pub fn from_data(data: &[u8]) -> Self {
        let mut counts = [0u64; ALPHABET_SIZE];
        for &byte in data {
            counts[byte as usize] += 1;
        }
        Self { counts }
    }

    /// Occurrence count for one symbol
    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Total number of symbols counted
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Number of symbols with a non-zero count
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// True when no symbol was counted
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Iterate `(symbol, count)` pairs with non-zero counts, in ascending
    /// symbol order
    pub fn iter_present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(s, &c)| (s as u8, c))
    }
}

/// Statistics for entropy coding operations
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntropyStats {
    /// Original size in bytes
    pub input_size: usize,
    /// Compressed size in bytes
    pub output_size: usize,
    /// Compression ratio (output/input)
    pub compression_ratio: f64,
    /// Bits per symbol achieved
    pub bits_per_symbol: f64,
    /// Theoretical entropy of the input
    pub entropy: f64,
    /// Encoding efficiency (theoretical / actual)
    pub efficiency: f64,
}

impl EntropyStats {
    /// Create new entropy statistics
    pub fn new(input_size: usize, output_size: usize, entropy: f64) -> Self {
        let compression_ratio = if input_size > 0 {
            output_size as f64 / input_size as f64
        } else {
            0.0
        };

        let bits_per_symbol = if input_size > 0 {
            (output_size * 8) as f64 / input_size as f64
        } else {
            0.0
        };

        let efficiency = if bits_per_symbol > 0.0 {
            entropy / bits_per_symbol
        } else {
            0.0
        };

        Self {
            input_size,
            output_size,
            compression_ratio,
            bits_per_symbol,
            entropy,
            efficiency,
        }
    }

    /// Calculate space savings as a percentage
    pub fn space_savings(&self) -> f64 {
        (1.0 - self.compression_ratio) * 100.0
    }

    /// Calculate theoretical entropy from byte frequencies
    pub fn calculate_entropy(data: &[u8]) -> f64 {
        if data.is_empty() {
            return 0.0;
        }

        let frequencies = FrequencyTable::from_data(data);
        let total = data.len() as f64;
        let mut entropy = 0.0;

        for (_, freq) in frequencies.iter_present() {
            let p = freq as f64 / total;
            entropy -= p * p.log2();
        }

        entropy
    }
}
