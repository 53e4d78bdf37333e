//! Property-based round-trip checks: primitive/array round-trip, width,
//! padding, sign extension, range rejection, and truncation detection.
use ethabicodec::abi::{decode_args, method_selector, ParamType, Token};
use ethabicodec::abi::layout::encode_args;
use ethabicodec::error::AbiError;
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

fn pt(s: &str) -> ParamType {
    ParamType::parse(s).unwrap()
}

proptest! {
    #[test]
    fn uint256_round_trips(v in any::<u64>()) {
        let types = vec![pt("uint256")];
        let tokens = vec![Token::Uint(BigUint::from(v))];
        let enc = encode_args(&types, &tokens).unwrap();
        prop_assert_eq!(enc.len(), 32);
        let dec = decode_args(&types, &enc).unwrap();
        prop_assert_eq!(dec, tokens);
    }

    #[test]
    fn int256_round_trips(v in any::<i64>()) {
        let types = vec![pt("int256")];
        let tokens = vec![Token::Int(BigInt::from(v))];
        let enc = encode_args(&types, &tokens).unwrap();
        let dec = decode_args(&types, &enc).unwrap();
        prop_assert_eq!(dec, tokens);
    }

    #[test]
    fn negative_int_sign_extension_invariant(v in i32::MIN..0i32) {
        let types = vec![pt("int32")];
        let tokens = vec![Token::Int(BigInt::from(v))];
        let enc = encode_args(&types, &tokens).unwrap();
        // bits=32 -> 32/8=4 low bytes carry the value, high 28 bytes are 0xff.
        prop_assert!(enc[..28].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn uint8_out_of_range_is_rejected(v in 256u32..u32::MAX) {
        let types = vec![pt("uint8")];
        let tokens = vec![Token::Uint(BigUint::from(v))];
        prop_assert_eq!(
            encode_args(&types, &tokens).unwrap_err(),
            AbiError::OutOfRange { type_str: "uint8".to_owned() }
        );
    }

    #[test]
    fn dynamic_array_round_trips(values in prop::collection::vec(any::<u32>(), 0..8)) {
        let types = vec![pt("uint32[]")];
        let tokens = vec![Token::Array(values.iter().copied().map(Token::from).collect())];
        let enc = encode_args(&types, &tokens).unwrap();
        prop_assert_eq!(enc.len() % 32, 0);
        prop_assert!(enc.len() >= 32);
        let dec = decode_args(&types, &enc).unwrap();
        prop_assert_eq!(dec, tokens);
    }

    #[test]
    fn fixed_array_width_is_exact(values in prop::collection::vec(any::<u32>(), 3)) {
        let types = vec![pt("uint32[3]")];
        let tokens = vec![Token::Array(values.iter().copied().map(Token::from).collect())];
        let enc = encode_args(&types, &tokens).unwrap();
        prop_assert_eq!(enc.len(), 96);
    }

    #[test]
    fn dynamic_bytes_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let types = vec![pt("bytes")];
        let tokens = vec![Token::Bytes(bytes.clone())];
        let enc = encode_args(&types, &tokens).unwrap();
        prop_assert_eq!(enc.len() % 32, 0);
        let dec = decode_args(&types, &enc).unwrap();
        prop_assert_eq!(dec, tokens);
    }

    #[test]
    fn truncated_static_array_is_rejected(n_words in 0usize..2) {
        let types = vec![pt("uint32[2]")];
        let short = vec![0u8; n_words * 32];
        prop_assert!(decode_args(&types, &short).is_err());
    }

    #[test]
    fn selector_is_four_bytes_and_deterministic(s in "[a-z]{1,8}\\(\\)") {
        let a = method_selector(&s);
        let b = method_selector(&s);
        prop_assert_eq!(a.len(), 4);
        prop_assert_eq!(a, b);
    }
}
