//! Canonical byte encodings of integers.
//!
//! Unsigned values are minimal big-endian byte strings, with zero encoded as an empty string.
//! Signed values are prefixed with a sign byte (`0` for non-negative, `1` for negative),
//! so zero is `[0]` and "negative zero" is invalid.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::error::DecodeError;

const SIGN_NON_NEGATIVE: u8 = 0;
const SIGN_NEGATIVE: u8 = 1;

pub(crate) fn to_unsigned_bytes(x: &BigUint) -> Vec<u8> {
    if x.is_zero() {
        Vec::new()
    } else {
        x.to_bytes_be()
    }
}

pub(crate) fn from_unsigned_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

pub(crate) fn to_signed_bytes(x: &BigInt) -> Vec<u8> {
    let sign = if x.sign() == Sign::Minus {
        SIGN_NEGATIVE
    } else {
        SIGN_NON_NEGATIVE
    };
    let mut bytes = Vec::with_capacity(1 + x.magnitude().bits().div_ceil(8) as usize);
    bytes.push(sign);
    bytes.extend(to_unsigned_bytes(x.magnitude()));
    bytes
}

pub(crate) fn from_signed_bytes(field: &'static str, bytes: &[u8]) -> Result<BigInt, DecodeError> {
    let (sign, magnitude) = bytes.split_first().ok_or(DecodeError::EmptyField { field, index: 0 })?;
    let magnitude = from_unsigned_bytes(magnitude);
    match *sign {
        SIGN_NON_NEGATIVE => Ok(BigInt::from(magnitude)),
        SIGN_NEGATIVE if magnitude.is_zero() => Err(DecodeError::NegativeZero { field }),
        SIGN_NEGATIVE => Ok(-BigInt::from(magnitude)),
        _ => Err(DecodeError::InvalidSign { field }),
    }
}
