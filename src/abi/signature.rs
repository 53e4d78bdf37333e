//! Signature parsing and the Keccak-256 derived selector.
//!
//! Kept close to `clarity::abi::derive_signature`/`derive_method_id`;
//! generalized here to also split out and parse the argument type list.
use crate::abi::param_type::ParamType;
use crate::error::AbiError;
use sha3::{Digest, Keccak256};

/// Splits `name(t1,t2,...)` into a method name and its parsed argument
/// types. An empty argument list (`N == 0`) is legal and parses to an
/// empty list.
pub fn parse_signature(sig: &str) -> Result<(String, Vec<ParamType>), AbiError> {
    let malformed = |reason: &str| AbiError::MalformedSignature {
        signature: sig.to_owned(),
        reason: reason.to_owned(),
    };

    let open = sig.find('(').ok_or_else(|| malformed("missing '('"))?;
    if !sig.ends_with(')') {
        return Err(malformed("missing trailing ')'"));
    }

    let name = sig[..open].to_owned();
    let inner = &sig[open + 1..sig.len() - 1];

    let types = if inner.is_empty() {
        Vec::new()
    } else {
        inner
            .split(',')
            .map(ParamType::parse)
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok((name, types))
}

/// Raw Keccak-256 digest of the UTF-8 bytes of `sig`. The caller is
/// responsible for providing the canonical form; this function does
/// not canonicalize shorthand like `int` -> `uint256`.
pub fn event_signature(sig: &str) -> [u8; 32] {
    let digest = Keccak256::digest(sig.as_bytes());
    let mut result = [0u8; 32];
    result.copy_from_slice(&digest);
    result
}

/// The first 4 bytes of [`event_signature`], the method selector placed
/// at the head of a call payload.
pub fn method_selector(sig: &str) -> [u8; 4] {
    let digest = event_signature(sig);
    let mut result = [0u8; 4];
    result.copy_from_slice(&digest[0..4]);
    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::utils::bytes_to_hex_str;

    #[test]
    fn selector_baz() {
        assert_eq!(
            bytes_to_hex_str(&method_selector("baz(uint32,bool)")),
            "cdcd77c0"
        );
    }

    #[test]
    fn selector_bar_fixed_array() {
        assert_eq!(
            bytes_to_hex_str(&method_selector("bar(fixed128x128[2])")),
            "ab55044d"
        );
    }

    #[test]
    fn selector_sam() {
        assert_eq!(
            bytes_to_hex_str(&method_selector("sam(bytes,bool,uint256[])")),
            "a5643bf2"
        );
    }

    #[test]
    fn selector_empty_args() {
        assert_eq!(bytes_to_hex_str(&method_selector("s()")), "86b714e2");
    }

    #[test]
    fn rejects_missing_parens() {
        assert!(parse_signature("baz uint32,bool)").is_err());
        assert!(parse_signature("baz(uint32,bool").is_err());
    }

    #[test]
    fn parses_empty_arg_list() {
        let (name, types) = parse_signature("s()").unwrap();
        assert_eq!(name, "s");
        assert!(types.is_empty());
    }

    #[test]
    fn parses_name_and_types() {
        let (name, types) = parse_signature("baz(uint32,bool)").unwrap();
        assert_eq!(name, "baz");
        assert_eq!(types.len(), 2);
    }
}
