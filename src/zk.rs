//! ZK proofs of well-formedness of the key-generation parameters.
//! The paper refers to them as "sigma-protocols".

mod fac;
mod mod_;
mod prm;

use num_bigint::BigUint;
use num_traits::Zero;

pub use fac::{FactorProof, FactorProofWire};
pub use mod_::{ModProof, ModProofWire};
pub use prm::{ParamProof, ParamProofWire};

use crate::{
    error::{DecodeError, VerificationError},
    params::PARAM_M,
    tools::WireBytes,
    uint::{from_unsigned_bytes, to_unsigned_bytes},
};

/// Checks that `value` lies in `[1, modulus)`.
fn check_residue(
    component: &'static str,
    index: usize,
    value: &BigUint,
    modulus: &BigUint,
) -> Result<(), VerificationError> {
    if value.is_zero() || value >= modulus {
        return Err(VerificationError::OutOfRange { component, index });
    }
    Ok(())
}

fn has_repetitions<T>(entries: &[T]) -> bool {
    entries.len() == PARAM_M
}

fn all_non_empty(entries: &[WireBytes]) -> bool {
    entries.iter().all(|entry| !entry.is_empty())
}

fn encode_unsigned_entries<'a>(values: impl Iterator<Item = &'a BigUint>) -> Vec<WireBytes> {
    values.map(|value| to_unsigned_bytes(value).into()).collect()
}

/// Decodes exactly [`PARAM_M`] non-empty unsigned entries.
fn decode_unsigned_entries(field: &'static str, entries: &[WireBytes]) -> Result<Vec<BigUint>, DecodeError> {
    if !has_repetitions(entries) {
        return Err(DecodeError::WrongLength {
            field,
            expected: PARAM_M,
            actual: entries.len(),
        });
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            if entry.is_empty() {
                Err(DecodeError::EmptyField { field, index })
            } else {
                Ok(from_unsigned_bytes(entry.as_bytes()))
            }
        })
        .collect()
}
