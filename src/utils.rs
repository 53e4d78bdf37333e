use crate::error::AbiError;
use std::str;

/// A function that takes a hexadecimal representation of bytes
/// back into a stream of bytes.
pub fn hex_str_to_bytes(s: &str) -> Result<Vec<u8>, AbiError> {
    let s = if s.starts_with("0x") { &s[2..] } else { s };
    if s.len() % 2 != 0 {
        return Err(AbiError::InvalidHex);
    }
    s.as_bytes()
        .chunks(2)
        .map(|ch| {
            str::from_utf8(ch)
                .map_err(|_| AbiError::InvalidHex)
                .and_then(|res| u8::from_str_radix(res, 16).map_err(|_| AbiError::InvalidHex))
        })
        .collect()
}

/// `true` when `s` (after stripping an optional `0x` prefix) contains
/// only hex digits, i.e. looks like something `hex_str_to_bytes` should
/// be used on rather than treated as raw bytes.
pub fn looks_like_hex(s: &str) -> bool {
    let s = if s.starts_with("0x") { &s[2..] } else { s };
    !s.is_empty() && s.len() % 2 == 0 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn bytes_to_hex_str(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .fold(String::new(), |acc, x| acc + &x)
}

/// Pad bytes with zeros at the beginning (used for big-endian numeric
/// words).
pub fn zpad(bytes: &[u8], len: usize) -> Vec<u8> {
    if bytes.len() >= len {
        return bytes.to_vec();
    }
    let mut pad = vec![0u8; len - bytes.len()];
    pad.extend(bytes);
    pad
}

/// Pad bytes with zeros at the end (used for fixed-width byte/string
/// values, which are right-padded rather than left-padded).
pub fn rpad(bytes: &[u8], len: usize) -> Vec<u8> {
    if bytes.len() >= len {
        return bytes.to_vec();
    }
    let mut out = bytes.to_vec();
    out.extend(vec![0u8; len - bytes.len()]);
    out
}

/// Round `len` up to the next multiple of 32 (a whole number of ABI
/// words).
pub fn ceil32(len: usize) -> usize {
    match len % 32 {
        0 => len,
        r => len + (32 - r),
    }
}

#[test]
fn decode_bytes() {
    assert_eq!(
        hex_str_to_bytes(&"deadbeef".to_owned()).expect("Unable to decode"),
        [222, 173, 190, 239]
    );
}

#[test]
fn bytes_raises_decode_error() {
    assert_eq!(hex_str_to_bytes("zz").unwrap_err(), AbiError::InvalidHex);
}

#[test]
fn parse_prefixed_empty() {
    assert_eq!(
        hex_str_to_bytes(&"0x".to_owned()).unwrap(),
        Vec::<u8>::new()
    );
}

#[test]
fn parse_prefixed_non_empty() {
    assert_eq!(
        hex_str_to_bytes(&"0xdeadbeef".to_owned()).unwrap(),
        vec![0xde, 0xad, 0xbe, 0xef]
    );
}

#[test]
fn encode_bytes() {
    assert_eq!(bytes_to_hex_str(&[0xf]), "0f".to_owned());
    assert_eq!(bytes_to_hex_str(&[0xff]), "ff".to_owned());
    assert_eq!(
        bytes_to_hex_str(&[0xde, 0xad, 0xbe, 0xef]),
        "deadbeef".to_owned()
    );
}

#[test]
fn verify_zpad() {
    assert_eq!(zpad(&[1, 2, 3, 4], 8), [0, 0, 0, 0, 1, 2, 3, 4]);
}

#[test]
fn verify_zpad_exact() {
    assert_eq!(zpad(&[1, 2, 3, 4], 4), [1, 2, 3, 4]);
}

#[test]
fn verify_rpad() {
    assert_eq!(rpad(&[1, 2, 3, 4], 8), [1, 2, 3, 4, 0, 0, 0, 0]);
}

#[test]
fn verify_ceil32() {
    assert_eq!(ceil32(0), 0);
    assert_eq!(ceil32(1), 32);
    assert_eq!(ceil32(32), 32);
    assert_eq!(ceil32(33), 64);
}
