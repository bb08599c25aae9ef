#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    missing_docs,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]
#![cfg_attr(not(test), warn(clippy::unwrap_used, clippy::indexing_slicing))]

/*!
## Features

`parallel`: runs the repetitions of $\Pi^{mod}$ in parallel using [`rayon`](https://docs.rs/rayon).

`dev`: memoized non-secure key material for tests and benchmarks. See the [`dev`] module.
*/

mod error;
mod paillier;
mod params;
mod tools;
mod uint;
mod zk;

#[cfg(any(test, feature = "dev"))]
pub mod dev;

pub use error::{
    ArithmeticError, DecodeError, FactorBound, FactorCheck, KeyError, ProofError, VerificationError,
};
pub use paillier::{
    crt::{
        is_quadratic_residue_mod_composite, is_quadratic_residue_mod_prime, prime_sqrt,
        quadratic_residue_mod_composite,
    },
    PedersenParams, PedersenSecret, PrivateKey, PublicKey,
};
pub use params::{PARAM_E, PARAM_L, PARAM_M};
pub use tools::WireBytes;
pub use uint::{jacobi_symbol, JacobiSymbol};
pub use zk::{FactorProof, FactorProofWire, ModProof, ModProofWire, ParamProof, ParamProofWire};
