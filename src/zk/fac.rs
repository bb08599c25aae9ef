//! No Small Factor Proof ($\Pi^{fac}$, Section C.5, Fig. 28)

use num_bigint::{BigInt, BigUint};
use num_traits::One;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use sha3::Shake256;

use super::check_residue;
use crate::{
    error::{ArithmeticError, DecodeError, FactorBound, FactorCheck, ProofError, VerificationError},
    paillier::{PedersenParams, PrivateKey, PublicKey},
    params::{FACTOR_CHALLENGE_BITS, PARAM_E, PARAM_L},
    tools::{
        hashing::{Chain, Hasher},
        random::random_scaled,
        WireBytes,
    },
    uint::{add_mul, from_signed_bytes, to_signed_bytes, ModInt},
};

const HASH_TAG: &[u8] = b"P_fac";

/// The first-round messages of the proof.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FacCommitment {
    cap_p: BigInt,
    cap_q: BigInt,
    cap_a: BigInt,
    cap_b: BigInt,
    cap_t: BigInt,
    sigma: BigInt,
}

/// The symmetric challenge $e \in [-(2^{256} - 1), 2^{256} - 1]$.
struct FacChallenge(BigInt);

impl FacChallenge {
    fn new(
        setup: &PedersenParams,
        modulus0: &BigUint,
        commitment: &FacCommitment,
    ) -> Result<Self, ArithmeticError> {
        // Hash into [0, 2^257 - 1), then shift down by 2^256 - 1.
        let half_range = (BigUint::one() << FACTOR_CHALLENGE_BITS) - 1u32;
        let range = ModInt::new(&((&half_range << 1u32) + 1u32))?;
        let h = Hasher::<Shake256>::new_with_dst(HASH_TAG)
            .chain(setup.modulus())
            .chain(setup.base_value())
            .chain(setup.base_randomizer())
            .chain(modulus0)
            .chain(&commitment.cap_p)
            .chain(&commitment.cap_q)
            .chain(&commitment.cap_a)
            .chain(&commitment.cap_b)
            .chain(&commitment.cap_t)
            .chain(&commitment.sigma)
            .finalize_to_n(&range);
        Ok(Self(BigInt::from(h) - BigInt::from(half_range)))
    }
}

/// The bound $2^{L+E} \lfloor \sqrt{N_0} \rfloor$ on $|z_1|$ and $|z_2|$.
fn response_bound(modulus0: &BigUint) -> BigInt {
    BigInt::from(modulus0.sqrt() << (PARAM_L + PARAM_E))
}

fn check_bound(value: &BigInt, bound: &BigInt, which: FactorBound) -> Result<(), VerificationError> {
    if value.magnitude() > bound.magnitude() {
        return Err(VerificationError::FactorRange(which));
    }
    Ok(())
}

/**
ZK proof: No small factor proof.

Secret inputs:
- primes $p$, $q$ such that $p, q < \pm\sqrt{N_0} 2^\ell$.

Public inputs:
- Paillier public key $N_0 = p * q$,
- Setup parameters ($\hat{N}$, $s$, $t$).
*/
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FactorProofWire", into = "FactorProofWire")]
pub struct FactorProof {
    commitment: FacCommitment,
    z1: BigInt,
    z2: BigInt,
    w1: BigInt,
    w2: BigInt,
    v: BigInt,
}

impl FactorProof {
    /// Proves that the primes of `key` are not small, committing to them with the verifier's `setup`.
    pub fn new(rng: &mut impl CryptoRngCore, key: &PrivateKey, setup: &PedersenParams) -> Result<Self, ProofError> {
        let modulus0 = key.modulus();
        let hat_cap_n = setup.modulus(); // $\hat{N}$

        let sqrt_cap_n0 = modulus0.sqrt();
        let scale = modulus0 * hat_cap_n; // N_0 \hat{N}

        let alpha = random_scaled(rng, PARAM_L + PARAM_E, &sqrt_cap_n0);
        let beta = random_scaled(rng, PARAM_L + PARAM_E, &sqrt_cap_n0);
        let mu = random_scaled(rng, PARAM_L, hat_cap_n);
        let nu = random_scaled(rng, PARAM_L, hat_cap_n);
        let sigma = random_scaled(rng, PARAM_L, &scale);
        let r = random_scaled(rng, PARAM_L + PARAM_E, &scale);
        let x = random_scaled(rng, PARAM_L + PARAM_E, hat_cap_n);
        let y = random_scaled(rng, PARAM_L + PARAM_E, hat_cap_n);

        let (p, q) = key.primes();
        let p = BigInt::from(p.clone());
        let q = BigInt::from(q.clone());

        let cap_q = setup.commit(&q, &nu)?;
        let cap_t = setup
            .mod_int()
            .exp_mul_exp(&cap_q, &alpha, setup.base_randomizer(), &r)?;
        let commitment = FacCommitment {
            cap_p: setup.commit(&p, &mu)?.into(),
            cap_q: cap_q.into(),
            cap_a: setup.commit(&alpha, &x)?.into(),
            cap_b: setup.commit(&beta, &y)?.into(),
            cap_t: cap_t.into(),
            sigma,
        };

        // Non-interactive challenge
        let e = FacChallenge::new(setup, modulus0, &commitment)?.0;

        let hat_sigma = &commitment.sigma - &nu * &p;

        // Unreduced: the range check on `z1` and `z2` depends on it.
        let z1 = add_mul(&alpha, &e, &p);
        let z2 = add_mul(&beta, &e, &q);
        let w1 = add_mul(&x, &e, &mu);
        let w2 = add_mul(&y, &e, &nu);
        let v = add_mul(&r, &e, &hat_sigma);

        Ok(Self {
            commitment,
            z1,
            z2,
            w1,
            w2,
            v,
        })
    }

    /// Verify that the proof is correct for the Paillier public key `public_key` ($N_0$)
    /// and the verifier's own `setup`.
    pub fn verify(&self, public_key: &PublicKey, setup: &PedersenParams) -> Result<(), VerificationError> {
        self.verify_equations(public_key.modulus(), setup)
            .inspect_err(|error| tracing::debug!(%error, "Factor proof rejected"))
    }

    fn verify_equations(&self, modulus0: &BigUint, setup: &PedersenParams) -> Result<(), VerificationError> {
        let commitment = &self.commitment;
        let hat_cap_n = setup.modulus();
        let cap_p = residue("P", &commitment.cap_p, hat_cap_n)?;
        let cap_q = residue("Q", &commitment.cap_q, hat_cap_n)?;
        let cap_a = residue("A", &commitment.cap_a, hat_cap_n)?;
        let cap_b = residue("B", &commitment.cap_b, hat_cap_n)?;
        let cap_t = residue("T", &commitment.cap_t, hat_cap_n)?;

        // z_1, z_2 \in \pm 2^{L+E} \sqrt{N_0}
        let bound = response_bound(modulus0);
        check_bound(&self.z1, &bound, FactorBound::Z1)?;
        check_bound(&self.z2, &bound, FactorBound::Z2)?;

        // The remaining exponents are bounded by what an honest prover produces:
        // $w_1, w_2 \in \pm 2^{L+E+1} \hat{N}$, $v \in \pm 2^{L+E+1} N_0 \hat{N}$, $\sigma \in \pm 2^L N_0 \hat{N}$.
        let scale = BigInt::from(modulus0 * hat_cap_n);
        let w_bound = BigInt::from(hat_cap_n.clone()) << (PARAM_L + PARAM_E + 1);
        check_bound(&self.w1, &w_bound, FactorBound::W1)?;
        check_bound(&self.w2, &w_bound, FactorBound::W2)?;
        check_bound(&self.v, &(&scale << (PARAM_L + PARAM_E + 1)), FactorBound::V)?;
        check_bound(&commitment.sigma, &(&scale << PARAM_L), FactorBound::Sigma)?;

        let e = FacChallenge::new(setup, modulus0, commitment)?.0;

        let modulus = setup.mod_int();
        let s = setup.base_value();
        let t = setup.base_randomizer();

        // R = s^{N_0} t^{\sigma}
        let cap_r = modulus.exp_mul_exp(s, &BigInt::from(modulus0.clone()), t, &commitment.sigma)?;

        // s^{z_1} t^{w_1} == A P^e \mod \hat{N}
        if setup.commit(&self.z1, &self.w1)? != modulus.mul_exp(&cap_a, &cap_p, &e)? {
            return Err(VerificationError::FactorEquation(FactorCheck::FirstFactor));
        }

        // s^{z_2} t^{w_2} == B Q^e \mod \hat{N}
        if setup.commit(&self.z2, &self.w2)? != modulus.mul_exp(&cap_b, &cap_q, &e)? {
            return Err(VerificationError::FactorEquation(FactorCheck::SecondFactor));
        }

        // Q^{z_1} t^v == T R^e \mod \hat{N}
        if modulus.exp_mul_exp(&cap_q, &self.z1, t, &self.v)? != modulus.mul_exp(&cap_t, &cap_r, &e)? {
            return Err(VerificationError::FactorEquation(FactorCheck::Product));
        }

        Ok(())
    }

    /// Returns the wire representation of the proof.
    pub fn to_wire(&self) -> FactorProofWire {
        let commitment = &self.commitment;
        let encode = |x: &BigInt| WireBytes::from(to_signed_bytes(x));
        FactorProofWire {
            cap_p: encode(&commitment.cap_p),
            cap_q: encode(&commitment.cap_q),
            cap_a: encode(&commitment.cap_a),
            cap_b: encode(&commitment.cap_b),
            cap_t: encode(&commitment.cap_t),
            sigma: encode(&commitment.sigma),
            z1: encode(&self.z1),
            z2: encode(&self.z2),
            w1: encode(&self.w1),
            w2: encode(&self.w2),
            v: encode(&self.v),
        }
    }
}

/// Converts a commitment into an element of `[1, \hat{N})`.
fn residue(component: &'static str, value: &BigInt, modulus: &BigUint) -> Result<BigUint, VerificationError> {
    let value = value
        .to_biguint()
        .ok_or(VerificationError::OutOfRange { component, index: 0 })?;
    check_residue(component, 0, &value, modulus)?;
    Ok(value)
}

/// The wire representation of [`FactorProof`].
///
/// All fields use the signed encoding: a sign byte (`0` or `1`) followed by the big-endian magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactorProofWire {
    /// $P$
    pub cap_p: WireBytes,
    /// $Q$
    pub cap_q: WireBytes,
    /// $A$
    pub cap_a: WireBytes,
    /// $B$
    pub cap_b: WireBytes,
    /// $T$
    pub cap_t: WireBytes,
    /// $\sigma$
    pub sigma: WireBytes,
    /// $z_1$
    pub z1: WireBytes,
    /// $z_2$
    pub z2: WireBytes,
    /// $w_1$
    pub w1: WireBytes,
    /// $w_2$
    pub w2: WireBytes,
    /// $v$
    pub v: WireBytes,
}

impl FactorProofWire {
    fn fields(&self) -> [(&'static str, &WireBytes); 11] {
        [
            ("P", &self.cap_p),
            ("Q", &self.cap_q),
            ("A", &self.cap_a),
            ("B", &self.cap_b),
            ("T", &self.cap_t),
            ("sigma", &self.sigma),
            ("z1", &self.z1),
            ("z2", &self.z2),
            ("w1", &self.w1),
            ("w2", &self.w2),
            ("v", &self.v),
        ]
    }

    /// Cheap structural check: every field is non-empty.
    pub fn validate_basic(&self) -> bool {
        self.fields().iter().all(|(_, bytes)| !bytes.is_empty())
    }
}

impl TryFrom<FactorProofWire> for FactorProof {
    type Error = DecodeError;

    fn try_from(wire: FactorProofWire) -> Result<Self, Self::Error> {
        let [cap_p, cap_q, cap_a, cap_b, cap_t, sigma, z1, z2, w1, w2, v] = wire
            .fields()
            .map(|(field, bytes)| from_signed_bytes(field, bytes.as_bytes()));
        Ok(Self {
            commitment: FacCommitment {
                cap_p: cap_p?,
                cap_q: cap_q?,
                cap_a: cap_a?,
                cap_b: cap_b?,
                cap_t: cap_t?,
                sigma: sigma?,
            },
            z1: z1?,
            z2: z2?,
            w1: w1?,
            w2: w2?,
            v: v?,
        })
    }
}

impl From<FactorProof> for FactorProofWire {
    fn from(proof: FactorProof) -> Self {
        proof.to_wire()
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::{BigInt, Sign};
    use num_traits::One;
    use rand_core::OsRng;

    use super::{response_bound, FacChallenge, FactorProof};
    use crate::{
        dev::{blum_key, pedersen_setup},
        error::{DecodeError, FactorBound, FactorCheck, VerificationError},
        params::FACTOR_CHALLENGE_BITS,
        tools::WireBytes,
    };

    #[test_log::test]
    fn prove_and_verify() {
        let key = blum_key();
        let (_, setup) = pedersen_setup();
        let proof = FactorProof::new(&mut OsRng, key, setup).unwrap();

        // Serialization roundtrip
        let config = bincode::config::standard();
        let serialized = bincode::serde::encode_to_vec(&proof, config).unwrap();
        let (decoded, _) = bincode::serde::decode_from_slice::<FactorProof, _>(&serialized, config).unwrap();
        assert_eq!(decoded, proof);

        assert!(proof.to_wire().validate_basic());
        assert_eq!(decoded.verify(key.public_key(), setup), Ok(()));
    }

    #[test_log::test]
    fn tampered_responses_are_rejected() {
        let key = blum_key();
        let (_, setup) = pedersen_setup();
        let proof = FactorProof::new(&mut OsRng, key, setup).unwrap();

        let mut tampered = proof.clone();
        tampered.w1 += BigInt::one();
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorEquation(FactorCheck::FirstFactor))
        );

        let mut tampered = proof.clone();
        tampered.w2 -= BigInt::one();
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorEquation(FactorCheck::SecondFactor))
        );

        let mut tampered = proof;
        tampered.v += BigInt::one();
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorEquation(FactorCheck::Product))
        );
    }

    #[test_log::test]
    fn oversized_response_is_rejected() {
        let key = blum_key();
        let (secret, setup) = pedersen_setup();
        let proof = FactorProof::new(&mut OsRng, key, setup).unwrap();

        let bound = response_bound(key.modulus());
        assert!(proof.z1.magnitude() <= bound.magnitude());
        assert!(proof.z2.magnitude() <= bound.magnitude());

        // A multiple of the group order leaves every equation intact.
        let shift = BigInt::from(secret.totient().clone()) * &bound;

        let mut tampered = proof.clone();
        tampered.z1 += &shift;
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorRange(FactorBound::Z1))
        );

        let mut tampered = proof;
        tampered.z2 -= &shift;
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorRange(FactorBound::Z2))
        );
    }

    #[test_log::test]
    fn range_is_checked_before_exponentiation() {
        let key = blum_key();
        let (_, setup) = pedersen_setup();
        let proof = FactorProof::new(&mut OsRng, key, setup).unwrap();

        // Exponentiating by a two-million-bit z1 would take far longer than the test.
        let mut tampered = proof.clone();
        tampered.z1 += BigInt::one() << 2_000_000;
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorRange(FactorBound::Z1))
        );

        let huge = BigInt::one() << 4096;

        let mut tampered = proof.clone();
        tampered.w1 += &huge;
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorRange(FactorBound::W1))
        );

        let mut tampered = proof.clone();
        tampered.w2 -= &huge;
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorRange(FactorBound::W2))
        );

        let mut tampered = proof.clone();
        tampered.v -= &huge;
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorRange(FactorBound::V))
        );

        let mut tampered = proof;
        tampered.commitment.sigma += &huge;
        assert_eq!(
            tampered.verify(key.public_key(), setup),
            Err(VerificationError::FactorRange(FactorBound::Sigma))
        );
    }

    #[test]
    fn challenge_is_symmetric_and_deterministic() {
        let key = blum_key();
        let (_, setup) = pedersen_setup();
        let proof = FactorProof::new(&mut OsRng, key, setup).unwrap();
        let half_range: BigInt = (BigInt::one() << FACTOR_CHALLENGE_BITS) - 1;

        let mut negatives = 0;
        let mut commitment = proof.commitment;
        for _ in 0..64 {
            commitment.sigma += 1;
            let e = FacChallenge::new(setup, key.modulus(), &commitment).unwrap().0;
            assert!(e.magnitude() <= half_range.magnitude());
            assert_eq!(e, FacChallenge::new(setup, key.modulus(), &commitment).unwrap().0);
            if e.sign() == Sign::Minus {
                negatives += 1;
            }
        }
        // Fails with probability 2^{-64} each way.
        assert!(negatives > 0);
        assert!(negatives < 64);
    }

    #[test_log::test]
    fn proof_is_bound_to_the_modulus() {
        let key = blum_key();
        let (_, setup) = pedersen_setup();
        let proof = FactorProof::new(&mut OsRng, key, setup).unwrap();
        let other_key = crate::dev::pedersen_key();
        assert!(proof.verify(other_key.public_key(), setup).is_err());
    }

    #[test_log::test]
    fn negative_commitment_is_rejected() {
        let key = blum_key();
        let (_, setup) = pedersen_setup();
        let mut proof = FactorProof::new(&mut OsRng, key, setup).unwrap();
        proof.commitment.cap_t = -proof.commitment.cap_t.clone();
        assert_eq!(
            proof.verify(key.public_key(), setup),
            Err(VerificationError::OutOfRange {
                component: "T",
                index: 0
            })
        );
    }

    #[test]
    fn malformed_wire() {
        let key = blum_key();
        let (_, setup) = pedersen_setup();
        let wire = FactorProof::new(&mut OsRng, key, setup).unwrap().to_wire();

        let mut empty = wire.clone();
        empty.w2 = WireBytes::default();
        assert!(!empty.validate_basic());
        assert_eq!(
            FactorProof::try_from(empty).unwrap_err(),
            DecodeError::EmptyField { field: "w2", index: 0 }
        );

        let mut bad_sign = wire.clone();
        bad_sign.sigma = vec![7u8, 1, 2, 3].into();
        assert!(bad_sign.validate_basic());
        assert_eq!(
            FactorProof::try_from(bad_sign).unwrap_err(),
            DecodeError::InvalidSign { field: "sigma" }
        );

        let mut negative_zero = wire;
        negative_zero.v = vec![1u8].into();
        assert_eq!(
            FactorProof::try_from(negative_zero).unwrap_err(),
            DecodeError::NegativeZero { field: "v" }
        );
    }
}
