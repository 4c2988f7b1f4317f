use alloy::primitives::{hex, B256, U256};
use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};

/// Errors from parsing a BN254 scalar field value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("empty field value")]
    Empty,

    #[error("invalid hex in field value {0:?}")]
    InvalidHex(String),

    #[error("invalid decimal field value {0:?}")]
    InvalidDecimal(String),

    #[error("field value {0:?} is longer than 32 bytes")]
    TooLong(String),

    #[error("field value {0} is not below the BN254 scalar modulus")]
    NotCanonical(B256),
}

/// Convert B256 to BN254 field element.
pub fn b256_to_fr(value: B256) -> Fr {
    Fr::from_be_bytes_mod_order(value.as_ref())
}

/// Convert BN254 field element to B256.
pub fn fr_to_b256(value: Fr) -> B256 {
    let bytes = value.into_bigint().to_bytes_be();
    B256::left_padding_from(&bytes)
}

/// Parse a hex-encoded field value (`0x` prefix optional).
///
/// Odd-length input is treated as having a leading zero nibble. Values that
/// are not reduced modulo the BN254 scalar field are rejected instead of
/// being silently wrapped.
pub fn parse_field(text: &str) -> Result<B256, FieldError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(FieldError::Empty);
    }
    if digits.len() > 64 {
        return Err(FieldError::TooLong(text.to_string()));
    }

    let padded = if digits.len() % 2 == 1 {
        format!("0{digits}")
    } else {
        digits.to_string()
    };
    let bytes = hex::decode(&padded).map_err(|_| FieldError::InvalidHex(text.to_string()))?;
    canonical(B256::left_padding_from(&bytes))
}

/// Parse a field value the way Noir reads circuit inputs: hex when
/// `0x`-prefixed, decimal otherwise.
pub fn parse_noir_field(text: &str) -> Result<B256, FieldError> {
    let trimmed = text.trim();
    if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
        return parse_field(trimmed);
    }
    if trimmed.is_empty() {
        return Err(FieldError::Empty);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::InvalidDecimal(text.to_string()));
    }

    let value = U256::from_str_radix(trimmed, 10)
        .map_err(|_| FieldError::InvalidDecimal(text.to_string()))?;
    canonical(B256::from(value.to_be_bytes::<32>()))
}

fn canonical(value: B256) -> Result<B256, FieldError> {
    if fr_to_b256(b256_to_fr(value)) != value {
        return Err(FieldError::NotCanonical(value));
    }
    Ok(value)
}

/// Format a field value the way Noir input files expect it (`0x` + 64 hex digits).
pub fn format_field(value: &B256) -> String {
    format!("{value}")
}
