//! Fail-fast behavior on malformed containers
//!
//! Every scenario here must abort with the specific error kind and return
//! no output at all.

use huffzip::{huffzip_compress, huffzip_decompress, Container, HuffzipError};

fn reference_container() -> Vec<u8> {
    huffzip_compress(b"aaabbbccd").unwrap()
}

#[test]
fn rejects_padding_count_of_nine() {
    let mut bytes = reference_container();
    // Byte 3 is the padding-bit count in the general shape
    bytes[3] = 9;
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::PaddingOutOfRange { bits: 9 }));
}

#[test]
fn rejects_payload_truncated_by_one_byte() {
    let mut bytes = reference_container();
    bytes.pop();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::UnexpectedEndOfStream { .. }));
}

#[test]
fn rejects_missing_payload() {
    let bytes = Container::General {
        padding_bits: 0,
        codebook: vec![2, 0, b'a', 1, b'b', 1],
        payload: Vec::new(),
    }
    .to_bytes();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::UnexpectedEndOfStream { .. }));
}

#[test]
fn rejects_unknown_discriminant() {
    let err = huffzip_decompress(&[0x07, 0, 0]).unwrap_err();
    assert!(matches!(err, HuffzipError::MalformedHeader { .. }));
}

#[test]
fn rejects_empty_container() {
    let err = huffzip_decompress(&[]).unwrap_err();
    assert!(matches!(err, HuffzipError::MalformedHeader { .. }));
}

#[test]
fn rejects_trailing_bytes_after_empty_shape() {
    let err = huffzip_decompress(&[0x00, 0x00]).unwrap_err();
    assert!(matches!(err, HuffzipError::MalformedHeader { .. }));
}

#[test]
fn rejects_truncated_single_shape() {
    let err = huffzip_decompress(&[0x01, b'a', 4, 0]).unwrap_err();
    assert!(matches!(err, HuffzipError::MalformedHeader { .. }));
}

#[test]
fn rejects_single_shape_with_zero_count() {
    let bytes = Container::Single {
        symbol: b'a',
        count: 0,
    }
    .to_bytes();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::MalformedHeader { .. }));
}

#[test]
fn rejects_codebook_length_overrun() {
    let mut bytes = reference_container();
    // Declare a codebook longer than the container
    bytes[1] = 0xFF;
    bytes[2] = 0x00;
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::MalformedHeader { .. }));
}

#[test]
fn rejects_truncated_codebook_table() {
    // Codebook slice declares three symbols but carries two records
    let bytes = Container::General {
        padding_bits: 0,
        codebook: vec![3, 0, b'a', 1, b'b', 2],
        payload: vec![0b0101_0101],
    }
    .to_bytes();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::TreeDeserialization { .. }));
}

#[test]
fn rejects_single_symbol_codebook() {
    let bytes = Container::General {
        padding_bits: 0,
        codebook: vec![1, 0, b'a', 1],
        payload: vec![0b0000_0000],
    }
    .to_bytes();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::TreeDeserialization { .. }));
}

#[test]
fn rejects_oversubscribed_code_lengths() {
    let bytes = Container::General {
        padding_bits: 0,
        codebook: vec![3, 0, b'a', 1, b'b', 1, b'c', 1],
        payload: vec![0b0101_0101],
    }
    .to_bytes();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::TreeDeserialization { .. }));
}

#[test]
fn rejects_undersubscribed_code_lengths() {
    let bytes = Container::General {
        padding_bits: 0,
        codebook: vec![2, 0, b'a', 1, b'b', 2],
        payload: vec![0b0101_0101],
    }
    .to_bytes();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::TreeDeserialization { .. }));
}

#[test]
fn rejects_repeated_codebook_symbol() {
    let bytes = Container::General {
        padding_bits: 0,
        codebook: vec![2, 0, b'a', 1, b'a', 1],
        payload: vec![0b0101_0101],
    }
    .to_bytes();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::TreeDeserialization { .. }));
}

#[test]
fn rejects_zero_length_code() {
    let bytes = Container::General {
        padding_bits: 0,
        codebook: vec![2, 0, b'a', 0, b'b', 1],
        payload: vec![0b0101_0101],
    }
    .to_bytes();
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::TreeDeserialization { .. }));
}

#[test]
fn rejects_dirty_padding_region() {
    let mut bytes = reference_container();
    // Set a bit inside the declared six-bit padding region
    let last = bytes.len() - 1;
    bytes[last] |= 0b0000_0001;
    let err = huffzip_decompress(&bytes).unwrap_err();
    assert!(matches!(err, HuffzipError::UnexpectedEndOfStream { .. }));
}

#[test]
fn valid_container_still_decodes_after_negative_cases() {
    // The codec shares no state with the failing calls above
    let bytes = reference_container();
    assert_eq!(huffzip_decompress(&bytes).unwrap(), b"aaabbbccd");
}
