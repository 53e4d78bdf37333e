//! # Introduction
//! A Contract ABI argument encoder/decoder: given a canonical function
//! signature such as `transfer(address,uint256)`, turns typed argument
//! values into the selector-prefixed calldata a contract call expects,
//! and back.
//!
//! ## Features
//! * Keccak-256 derived 4-byte method selectors and 32-byte event
//!   signatures
//! * The full static/dynamic head-tail argument layout, including
//!   nested fixed and dynamic arrays
//! * Arbitrary-width signed/unsigned integers and fixed-point values
//!   via `num-bigint`/`num-rational`
//!
//! ## Getting started
//! ```rust
//! use ethabicodec::abi::{encode_abi, decode_call, Token};
//!
//! let tokens = vec![Token::from(69u32), Token::Bool(true)];
//! let calldata = encode_abi("baz(uint32,bool)", &tokens).unwrap();
//! let decoded = decode_call("baz(uint32,bool)", &calldata).unwrap();
//! assert_eq!(decoded, tokens);
//! ```

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod abi;
pub mod address;
pub mod error;
pub mod utils;

pub use crate::abi::Token;
pub use crate::address::Address;
pub use crate::error::AbiError;
