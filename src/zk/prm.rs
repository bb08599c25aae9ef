//! Pedersen Parameters ZK ($\Pi^{prm}$, Section 5.3, Fig. 13).
//!
//! Publish $(\hat{N}, s, t)$ and prove that we know a secret $\lambda$ such that
//! $s = t^\lambda \mod \hat{N}$.

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use sha2::Sha512_256;

use super::{all_non_empty, check_residue, decode_unsigned_entries, encode_unsigned_entries, has_repetitions};
use crate::{
    error::{DecodeError, ProofError, VerificationError},
    paillier::{PedersenParams, PedersenSecret},
    params::PARAM_M,
    tools::{
        bitvec::BitVec,
        hashing::{Chain, Hasher},
        random::random_below,
        WireBytes,
    },
    uint::ModInt,
};

const HASH_TAG_COMMITMENTS: &[u8] = b"P_prm commitments";
const HASH_TAG: &[u8] = b"P_prm";

#[derive(Debug, Clone, PartialEq, Eq)]
struct PrmChallenge(BitVec);

impl PrmChallenge {
    fn new(elems: &[ParamProofElem], setup: &PedersenParams) -> Self {
        let commitments = elems.iter().map(|elem| &elem.commitment).collect::<Vec<_>>();
        let commitments_digest = Hasher::<Sha512_256>::new_with_dst(HASH_TAG_COMMITMENTS)
            .chain(commitments.as_slice())
            .finalize_to_uint();
        let e = Hasher::<Sha512_256>::new_with_dst(HASH_TAG)
            .chain(setup.modulus())
            .chain(setup.base_value())
            .chain(setup.base_randomizer())
            .chain(&commitments_digest)
            .finalize_to_uint();
        Self(BitVec::from_low_bits(&e, PARAM_M))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ParamProofElem {
    /// $A_i = t^{a_i}$
    commitment: BigUint,
    /// $z_i = a_i + e_i \lambda \mod \phi(\hat{N})$
    response: BigUint,
}

/// Pedersen Parameters ZK proof.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParamProofWire", into = "ParamProofWire")]
pub struct ParamProof {
    elems: Vec<ParamProofElem>,
}

impl ParamProof {
    /// Create a proof that we know the `secret`
    /// (i.e. lambda, the power that was used to create ring-Pedersen parameters).
    pub fn new(
        rng: &mut impl CryptoRngCore,
        secret: &PedersenSecret,
        setup: &PedersenParams,
    ) -> Result<Self, ProofError> {
        if secret.modulus() != setup.modulus() {
            return Err(ProofError::ModulusMismatch);
        }
        let totient = ModInt::new(secret.totient())?;

        let nonces = (0..PARAM_M)
            .map(|_| random_below(rng, totient.modulus()))
            .collect::<Vec<_>>();
        let mut elems = nonces
            .iter()
            .map(|a| ParamProofElem {
                commitment: setup.mod_int().pow(setup.base_randomizer(), a),
                response: BigUint::default(),
            })
            .collect::<Vec<_>>();

        let challenge = PrmChallenge::new(&elems, setup);
        for ((elem, a), e) in elems.iter_mut().zip(nonces.iter()).zip(challenge.0.bits()) {
            elem.response = if *e {
                totient.add(a, secret.lambda())
            } else {
                a.clone()
            };
        }

        Ok(Self { elems })
    }

    /// Verify that the proof is correct for a secret corresponding to the given ring-Pedersen parameters.
    pub fn verify(&self, setup: &PedersenParams) -> Result<(), VerificationError> {
        self.verify_equations(setup)
            .inspect_err(|error| tracing::debug!(%error, "Param proof rejected"))
    }

    fn verify_equations(&self, setup: &PedersenParams) -> Result<(), VerificationError> {
        if !has_repetitions(&self.elems) {
            return Err(VerificationError::WrongLength {
                expected: PARAM_M,
                actual: self.elems.len(),
            });
        }
        for (index, elem) in self.elems.iter().enumerate() {
            check_residue("A", index, &elem.commitment, setup.modulus())?;
            if &elem.response >= setup.modulus() {
                return Err(VerificationError::ParamRange { index });
            }
        }

        let challenge = PrmChallenge::new(&self.elems, setup);
        let modulus = setup.mod_int();
        for (index, (elem, e)) in self.elems.iter().zip(challenge.0.bits()).enumerate() {
            // t^{z_i} == A_i s^{e_i} \mod \hat{N}
            let lhs = modulus.pow(setup.base_randomizer(), &elem.response);
            let rhs = if *e {
                modulus.mul(&elem.commitment, setup.base_value())
            } else {
                elem.commitment.clone()
            };
            if lhs != rhs {
                return Err(VerificationError::ParamEquation { index });
            }
        }
        Ok(())
    }

    /// Returns the wire representation of the proof.
    pub fn to_wire(&self) -> ParamProofWire {
        ParamProofWire {
            commitments: encode_unsigned_entries(self.elems.iter().map(|elem| &elem.commitment)),
            responses: encode_unsigned_entries(self.elems.iter().map(|elem| &elem.response)),
        }
    }
}

/// The wire representation of [`ParamProof`]: big-endian commitments $A_i$ and responses $z_i$.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamProofWire {
    /// $A_0, \dots, A_{M-1}$
    pub commitments: Vec<WireBytes>,
    /// $z_0, \dots, z_{M-1}$
    pub responses: Vec<WireBytes>,
}

impl ParamProofWire {
    /// Cheap structural check: [`PARAM_M`] non-empty entries in each field.
    pub fn validate_basic(&self) -> bool {
        has_repetitions(&self.commitments)
            && has_repetitions(&self.responses)
            && all_non_empty(&self.commitments)
            && all_non_empty(&self.responses)
    }
}

impl TryFrom<ParamProofWire> for ParamProof {
    type Error = DecodeError;

    fn try_from(wire: ParamProofWire) -> Result<Self, Self::Error> {
        let commitments = decode_unsigned_entries("commitments", &wire.commitments)?;
        let responses = decode_unsigned_entries("responses", &wire.responses)?;
        let elems = commitments
            .into_iter()
            .zip(responses)
            .map(|(commitment, response)| ParamProofElem { commitment, response })
            .collect();
        Ok(Self { elems })
    }
}

impl From<ParamProof> for ParamProofWire {
    fn from(proof: ParamProof) -> Self {
        proof.to_wire()
    }
}
