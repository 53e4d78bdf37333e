//! A 20-byte Ethereum-style address, encoded in the ABI as a left-padded
//! `uint160`.
use crate::error::AbiError;
use crate::utils;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address([u8; 20]);

impl Address {
    pub fn from_slice(bytes: &[u8]) -> Result<Address, AbiError> {
        if bytes.len() != 20 {
            return Err(AbiError::InvalidType {
                type_str: "address".to_owned(),
                reason: format!("expected 20 bytes, got {}", bytes.len()),
            });
        }
        let mut buf = [0u8; 20];
        buf.copy_from_slice(bytes);
        Ok(Address(buf))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Address, AbiError> {
        let bytes = utils::hex_str_to_bytes(s)?;
        Address::from_slice(&bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", utils::bytes_to_hex_str(&self.0))
    }
}

#[test]
fn parses_hex_address() {
    let a: Address = "0x00000000000000000000000000000000deadbeef"
        .parse()
        .expect("Unable to parse address");
    assert_eq!(a.as_bytes()[16..], [0xde, 0xad, 0xbe, 0xef]);
}

#[test]
fn rejects_wrong_length() {
    assert!("0xdead".parse::<Address>().is_err());
}

#[test]
fn displays_as_lowercase_hex() {
    let a: Address = "0x00000000000000000000000000000000deadbeef"
        .parse()
        .unwrap();
    assert_eq!(
        a.to_string(),
        "0x00000000000000000000000000000000deadbeef"
    );
}
