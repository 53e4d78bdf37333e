//! Argument-list layout: the head/tail scheme used to pack several
//! top-level values into one blob, generalizing
//! `clarity::abi::encode_tokens`'s running `dynamic_offset` fold to
//! values of any [`ParamType`].
use crate::abi::param_type::ParamType;
use crate::abi::token::{self, Token};
use crate::error::AbiError;

/// Encodes a full argument list: one head word (or `static_width_bytes`
/// words, for fixed arrays) per argument, followed by the tail bytes of
/// any dynamic arguments in declaration order.
pub fn encode_args(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
    if types.len() != tokens.len() {
        return Err(AbiError::ArgumentCountMismatch {
            expected: types.len(),
            got: tokens.len(),
        });
    }

    let head_len: usize = types
        .iter()
        .map(|t| if t.is_dynamic() { 32 } else { t.static_width_bytes() })
        .sum();

    let mut head = Vec::with_capacity(head_len);
    let mut tail = Vec::new();
    let mut tail_offset = head_len;

    for (ty, tok) in types.iter().zip(tokens) {
        if ty.is_dynamic() {
            let encoded = token::encode_value(ty, tok)?;
            head.extend(usize_to_word(tail_offset));
            tail_offset += encoded.len();
            tail.extend(encoded);
        } else {
            head.extend(token::encode_value(ty, tok)?);
        }
    }

    head.extend(tail);
    Ok(head)
}

/// Decodes a full argument list laid out by [`encode_args`].
pub fn decode_args(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let mut head_pos = 0usize;
    let mut out = Vec::with_capacity(types.len());

    for ty in types {
        if ty.is_dynamic() {
            let offset_word = read_word(data, head_pos)?;
            let offset = word_to_usize(&offset_word, data.len())?;
            if data.len() < offset {
                return Err(AbiError::TruncatedInput {
                    expected: offset,
                    got: data.len(),
                });
            }
            let (tok, _) = token::decode_value(ty, &data[offset..])?;
            out.push(tok);
            head_pos += 32;
        } else {
            let width = ty.static_width_bytes();
            if data.len() < head_pos + width {
                return Err(AbiError::TruncatedInput {
                    expected: head_pos + width,
                    got: data.len(),
                });
            }
            let (tok, consumed) = token::decode_value(ty, &data[head_pos..])?;
            debug_assert_eq!(consumed, width);
            out.push(tok);
            head_pos += width;
        }
    }

    Ok(out)
}

fn read_word(data: &[u8], at: usize) -> Result<[u8; 32], AbiError> {
    if data.len() < at + 32 {
        return Err(AbiError::TruncatedInput {
            expected: at + 32,
            got: data.len(),
        });
    }
    let mut w = [0u8; 32];
    w.copy_from_slice(&data[at..at + 32]);
    Ok(w)
}

fn word_to_usize(word: &[u8; 32], data_len_for_err: usize) -> Result<usize, AbiError> {
    use num_bigint::BigUint;
    use num_traits::ToPrimitive;
    BigUint::from_bytes_be(word)
        .to_usize()
        .ok_or(AbiError::TruncatedInput {
            expected: usize::max_value(),
            got: data_len_for_err,
        })
}

fn usize_to_word(n: usize) -> [u8; 32] {
    let bytes = (n as u128).to_be_bytes();
    let mut w = [0u8; 32];
    w[32 - bytes.len()..].copy_from_slice(&bytes);
    w
}
