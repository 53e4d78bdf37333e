//! Contract ABI argument encoder/decoder.
//!
//! This module implements the Contract ABI encoding scheme: a contract
//! call or event payload is a 4-byte (or 32-byte, for event topics)
//! selector derived from a canonical signature, followed by arguments
//! packed per the head/tail scheme in [`layout`].
//!
//! Grounded on `clarity::abi::encode_call` for the overall facade shape
//! (selector ++ encoded args).
pub mod layout;
pub mod param_type;
pub mod signature;
pub mod token;

pub use param_type::{ArraySize, Kind, ParamType};
pub use signature::{event_signature, method_selector, parse_signature};
pub use token::Token;

use crate::error::AbiError;
use crate::utils;

/// Encodes a full call payload: the 4-byte method selector derived from
/// `signature`, followed by the head/tail encoding of `tokens` against
/// the argument types parsed out of `signature`.
pub fn encode_abi(signature: &str, tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
    let (_name, types) = parse_signature(signature)?;
    let mut out = method_selector(signature).to_vec();
    out.extend(layout::encode_args(&types, tokens)?);
    Ok(out)
}

/// Decodes a call payload produced by [`encode_abi`], checking the
/// leading selector matches `signature` before decoding the arguments.
pub fn decode_call(signature: &str, data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let (_name, types) = parse_signature(signature)?;
    let expected = method_selector(signature);
    if data.len() < 4 {
        return Err(AbiError::TruncatedInput {
            expected: 4,
            got: data.len(),
        });
    }
    if data[0..4] != expected {
        return Err(AbiError::MalformedSignature {
            signature: signature.to_owned(),
            reason: "selector does not match payload".to_owned(),
        });
    }
    decode_args(&types, &data[4..])
}

/// Decodes a raw argument list (no selector prefix) against `types`.
pub fn decode_args(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    layout::decode_args(types, data)
}

/// [`decode_args`], but accepting either raw bytes rendered as a string
/// or an actual hex string; `input` is hex-decoded first whenever it
/// looks like hex (an optional `0x` prefix followed by nothing but hex
/// digits), and treated as the raw argument bytes otherwise.
pub fn decode_args_str(types: &[ParamType], input: &str) -> Result<Vec<Token>, AbiError> {
    if utils::looks_like_hex(input) {
        let bytes = utils::hex_str_to_bytes(input)?;
        decode_args(types, &bytes)
    } else {
        decode_args(types, input.as_bytes())
    }
}

/// [`encode_abi`], but rendering the payload as a `0x`-prefixed hex
/// string rather than raw bytes.
pub fn encode_abi_hex(signature: &str, tokens: &[Token]) -> Result<String, AbiError> {
    Ok(format!("0x{}", utils::bytes_to_hex_str(&encode_abi(signature, tokens)?)))
}

/// [`decode_call`], but taking a `0x`-prefixed (or bare) hex string.
pub fn decode_abi_hex(signature: &str, hex: &str) -> Result<Vec<Token>, AbiError> {
    let bytes = utils::hex_str_to_bytes(hex)?;
    decode_call(signature, &bytes)
}

/// Concatenates the selector and the encoded args for `signature`,
/// rendered as lower-case hex with a `0x` prefix.
pub fn build_payload(signature: &str, tokens: &[Token]) -> Result<String, AbiError> {
    encode_abi_hex(signature, tokens)
}
