//! Type model: parses a single type expression from the ABI grammar
//! into a [`ParamType`], and exposes the derived static/dynamic facts
//! the codec needs to lay arguments out.
use crate::error::AbiError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The base type a [`ParamType`] describes, before any array suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    UInt(usize),
    Int(usize),
    Bool,
    Address,
    /// `Some(n)` for `bytes<n>` (1..=32); `None` for dynamic `bytes`.
    Bytes(Option<usize>),
    String,
    Fixed(usize, usize),
    UFixed(usize, usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArraySize {
    None,
    Fixed(usize),
    Dynamic,
}

/// A fully parsed type expression, e.g. `uint32[2]` or `fixed128x128`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamType {
    pub kind: Kind,
    pub array: ArraySize,
}

impl ParamType {
    pub fn new(kind: Kind, array: ArraySize) -> ParamType {
        ParamType { kind, array }
    }

    /// Whether the element kind alone is dynamically sized, independent
    /// of whether an array suffix is also present.
    fn kind_is_dynamic(&self) -> bool {
        matches!(self.kind, Kind::String) || matches!(self.kind, Kind::Bytes(None))
    }

    /// True when the kind is `String` or dynamic `Bytes`, or the array
    /// suffix itself is dynamic (`T[]`); the encoded size then depends
    /// on the value, not just the type.
    pub fn is_dynamic(&self) -> bool {
        self.kind_is_dynamic() || self.array == ArraySize::Dynamic
    }

    /// Width in bytes of the static head region: 32 for a bare value,
    /// 32 times the length for a fixed-size array. Only meaningful when
    /// `!is_dynamic()`.
    pub fn static_width_bytes(&self) -> usize {
        debug_assert!(!self.is_dynamic());
        match self.array {
            ArraySize::None => 32,
            ArraySize::Fixed(n) => 32 * n,
            ArraySize::Dynamic => unreachable!("a dynamic-length array is always dynamic"),
        }
    }

    /// The element type with the array suffix stripped, used to recurse
    /// into array elements.
    pub fn element_type(&self) -> ParamType {
        ParamType {
            kind: self.kind.clone(),
            array: ArraySize::None,
        }
    }

    /// Parses one type expression per the grammar below.
    pub fn parse(s: &str) -> Result<ParamType, AbiError> {
        let invalid = |reason: String| AbiError::InvalidType {
            type_str: s.to_owned(),
            reason,
        };

        let (base, array) = split_array_suffix(s).map_err(invalid)?;
        let kind = parse_kind(base).map_err(invalid)?;
        Ok(ParamType { kind, array })
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Kind::UInt(bits) => write!(f, "uint{}", bits),
            Kind::Int(bits) => write!(f, "int{}", bits),
            Kind::Bool => write!(f, "bool"),
            Kind::Address => write!(f, "address"),
            Kind::Bytes(Some(n)) => write!(f, "bytes{}", n),
            Kind::Bytes(None) => write!(f, "bytes"),
            Kind::String => write!(f, "string"),
            Kind::Fixed(h, l) => write!(f, "fixed{}x{}", h, l),
            Kind::UFixed(h, l) => write!(f, "ufixed{}x{}", h, l),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match self.array {
            ArraySize::None => Ok(()),
            ArraySize::Fixed(n) => write!(f, "[{}]", n),
            ArraySize::Dynamic => write!(f, "[]"),
        }
    }
}

/// Peels at most one `[N]`/`[]` suffix off the end of `s`; the grammar
/// accepted here only ever nests one array level.
fn split_array_suffix(s: &str) -> Result<(&str, ArraySize), String> {
    if !s.ends_with(']') {
        return Ok((s, ArraySize::None));
    }
    let open = s.rfind('[').ok_or_else(|| "unmatched ']'".to_owned())?;
    let inner = &s[open + 1..s.len() - 1];
    let base = &s[..open];
    if inner.is_empty() {
        Ok((base, ArraySize::Dynamic))
    } else {
        let n: usize = inner
            .parse()
            .map_err(|_| format!("invalid array length '{}'", inner))?;
        if n == 0 {
            return Err("fixed array length must be > 0".to_owned());
        }
        Ok((base, ArraySize::Fixed(n)))
    }
}

fn parse_kind(base: &str) -> Result<Kind, String> {
    if base == "bool" {
        return Ok(Kind::Bool);
    }
    if base == "address" {
        return Ok(Kind::Address);
    }
    if base == "string" {
        return Ok(Kind::String);
    }
    if let Some(tail) = base.strip_prefix("ufixed") {
        let (h, l) = parse_hl(tail, (0, 256))?;
        return Ok(Kind::UFixed(h, l));
    }
    if let Some(tail) = base.strip_prefix("fixed") {
        let (h, l) = parse_hl(tail, (0, 256))?;
        return Ok(Kind::Fixed(h, l));
    }
    if let Some(tail) = base.strip_prefix("uint") {
        let bits = parse_bits(tail, 256)?;
        return Ok(Kind::UInt(bits));
    }
    if let Some(tail) = base.strip_prefix("int") {
        let bits = parse_bits(tail, 256)?;
        return Ok(Kind::Int(bits));
    }
    if let Some(tail) = base.strip_prefix("bytes") {
        if tail.is_empty() {
            return Ok(Kind::Bytes(None));
        }
        let n: usize = tail
            .parse()
            .map_err(|_| format!("invalid bytes size '{}'", tail))?;
        if n == 0 || n > 32 {
            return Err(format!("bytes size {} out of range 1..=32", n));
        }
        return Ok(Kind::Bytes(Some(n)));
    }
    Err(format!("unknown base type '{}'", base))
}

fn parse_bits(tail: &str, default: usize) -> Result<usize, String> {
    let bits = if tail.is_empty() {
        default
    } else {
        tail.parse()
            .map_err(|_| format!("invalid bit width '{}'", tail))?
    };
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(format!(
            "bit width {} must be a multiple of 8 in 8..=256",
            bits
        ));
    }
    Ok(bits)
}

fn parse_hl(tail: &str, default: (usize, usize)) -> Result<(usize, usize), String> {
    let (h, l) = if tail.is_empty() {
        default
    } else {
        let mut parts = tail.splitn(2, 'x');
        let h = parts
            .next()
            .ok_or_else(|| "missing integer bit width".to_owned())?;
        let l = parts
            .next()
            .ok_or_else(|| "missing fractional bit width ('HxL')".to_owned())?;
        let h: usize = h
            .parse()
            .map_err(|_| format!("invalid integer bit width '{}'", h))?;
        let l: usize = l
            .parse()
            .map_err(|_| format!("invalid fractional bit width '{}'", l))?;
        (h, l)
    };
    if h % 8 != 0 || l % 8 != 0 {
        return Err(format!(
            "fixed-point widths must be multiples of 8, got {}x{}",
            h, l
        ));
    }
    if h + l > 256 || h + l == 0 {
        return Err(format!(
            "fixed-point total width {} out of range (0, 256]",
            h + l
        ));
    }
    Ok((h, l))
}
