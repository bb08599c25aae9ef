//! Proof of Paillier-Blum modulus ($\Pi^{mod}$, Section 5.2, Fig. 12).

use num_bigint::BigUint;
use rand_core::CryptoRngCore;
use serde::{Deserialize, Serialize};
use sha3::Shake256;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{all_non_empty, check_residue, decode_unsigned_entries, encode_unsigned_entries, has_repetitions};
use crate::{
    error::{DecodeError, ProofError, VerificationError},
    paillier::{crt::CrtRoots, PrivateKey, PublicKey},
    params::PARAM_M,
    tools::{
        hashing::{Chain, Hasher},
        random::random_non_residue,
        WireBytes,
    },
    uint::{from_unsigned_bytes, is_probable_prime, jacobi_symbol, to_unsigned_bytes, JacobiSymbol, ModInt},
};

const HASH_TAG: &[u8] = b"P_mod";

/// The order in which the sign $(-1)^a$ and the twist $w^b$ are tried.
const SIGN_TWIST_ORDER: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

/// The challenges $y_i$, hashed from the modulus, the witness and the index.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ModChallenge(Vec<BigUint>);

impl ModChallenge {
    fn new(modulus: &ModInt, w: &BigUint) -> Self {
        let ys = (0..PARAM_M as u64)
            .map(|i| {
                Hasher::<Shake256>::new_with_dst(HASH_TAG)
                    .chain(modulus.modulus())
                    .chain(w)
                    .chain(&i)
                    .finalize_to_n(modulus)
            })
            .collect();
        Self(ys)
    }
}

/// Returns $(-1)^a w^b y \mod N$.
fn sign_and_twist(modulus: &ModInt, y: &BigUint, w: &BigUint, a: bool, b: bool) -> BigUint {
    let y = if b { modulus.mul(y, w) } else { y % modulus.modulus() };
    if a {
        modulus.neg(&y)
    } else {
        y
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ModProofElem {
    /// $x_i$ with $x_i^4 = (-1)^{a_i} w^{b_i} y_i$
    x: BigUint,
    a: bool,
    b: bool,
    /// $z_i = y_i^{N^{-1} \mod \phi(N)}$
    z: BigUint,
}

impl ModProofElem {
    fn new(
        index: usize,
        y: &BigUint,
        w: &BigUint,
        roots: &CrtRoots,
        inv_modulus: &BigUint,
    ) -> Result<Self, ProofError> {
        let modulus = roots.modulus();
        let (a, b, x) = SIGN_TWIST_ORDER
            .iter()
            .find_map(|&(a, b)| {
                let y = sign_and_twist(modulus, y, w, a, b);
                if !roots.is_residue(&y) {
                    return None;
                }
                roots.fourth_root(&y).into_iter().next().map(|x| (a, b, x))
            })
            .ok_or_else(|| {
                tracing::warn!(index, "No quartic root for any sign and twist of the challenge");
                ProofError::NoFourthRoot { index }
            })?;
        let z = modulus.pow(y, inv_modulus);
        Ok(Self { x, a, b, z })
    }
}

/// Proof that a Paillier modulus is a Paillier-Blum integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ModProofWire", into = "ModProofWire")]
pub struct ModProof {
    /// A quadratic non-residue with the Jacobi symbol $(w/N) = -1$.
    w: BigUint,
    elems: Vec<ModProofElem>,
}

impl ModProof {
    /// Proves that the modulus of `key` is a product of two primes congruent to 3 modulo 4.
    ///
    /// Fails with [`ProofError::NoFourthRoot`] if the primes are not such a pair.
    pub fn new(rng: &mut impl CryptoRngCore, key: &PrivateKey) -> Result<Self, ProofError> {
        let (p, q) = key.primes();
        let roots = CrtRoots::new(p, q)?;
        let modulus = roots.modulus();

        let (w, attempts) = random_non_residue(rng, modulus);
        tracing::trace!(attempts, "Sampled a Jacobi non-residue");

        // N^{-1} mod \phi(N)
        let inv_modulus = ModInt::new(key.totient())?.inverse(key.modulus())?;

        let challenge = ModChallenge::new(modulus, &w);

        #[cfg(not(feature = "parallel"))]
        let iter = challenge.0.iter();
        #[cfg(feature = "parallel")]
        let iter = challenge.0.par_iter();

        let elems = iter
            .enumerate()
            .map(|(index, y)| ModProofElem::new(index, y, &w, &roots, &inv_modulus))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { w, elems })
    }

    /// Verify that the proof is correct for the given public key.
    pub fn verify(&self, public_key: &PublicKey) -> Result<(), VerificationError> {
        self.verify_equations(public_key.modulus())
            .inspect_err(|error| tracing::debug!(%error, "Mod proof rejected"))
    }

    fn verify_equations(&self, modulus: &BigUint) -> Result<(), VerificationError> {
        // Zero is even too.
        let modulus = ModInt::new(modulus).map_err(|_| VerificationError::EvenModulus)?;
        let n = modulus.modulus();
        if !n.bit(0) {
            return Err(VerificationError::EvenModulus);
        }
        if is_probable_prime(n) {
            return Err(VerificationError::PrimeModulus);
        }
        if !has_repetitions(&self.elems) {
            return Err(VerificationError::WrongLength {
                expected: PARAM_M,
                actual: self.elems.len(),
            });
        }
        check_residue("w", 0, &self.w, n).map_err(|_| VerificationError::InvalidWitness)?;
        if jacobi_symbol(&self.w, n)? != JacobiSymbol::MinusOne {
            return Err(VerificationError::InvalidWitness);
        }
        for (index, elem) in self.elems.iter().enumerate() {
            check_residue("x", index, &elem.x, n)?;
            check_residue("z", index, &elem.z, n)?;
        }

        let challenge = ModChallenge::new(&modulus, &self.w);

        #[cfg(not(feature = "parallel"))]
        let iter = challenge.0.iter().zip(self.elems.iter());
        #[cfg(feature = "parallel")]
        let iter = challenge.0.par_iter().zip(self.elems.par_iter());

        iter.enumerate().try_for_each(|(index, (y, elem))| {
            // z_i^N == y_i \mod N
            if &modulus.pow(&elem.z, n) != y {
                return Err(VerificationError::NthRoot { index });
            }
            // x_i^4 == (-1)^{a_i} w^{b_i} y_i \mod N
            let x_sq = modulus.mul(&elem.x, &elem.x);
            let x_4 = modulus.mul(&x_sq, &x_sq);
            if x_4 != sign_and_twist(&modulus, y, &self.w, elem.a, elem.b) {
                return Err(VerificationError::FourthRoot { index });
            }
            Ok(())
        })
    }

    /// Returns the wire representation of the proof.
    pub fn to_wire(&self) -> ModProofWire {
        ModProofWire {
            w: to_unsigned_bytes(&self.w).into(),
            x: encode_unsigned_entries(self.elems.iter().map(|elem| &elem.x)),
            a: self.elems.iter().map(|elem| u8::from(elem.a)).collect::<Vec<_>>().into(),
            b: self.elems.iter().map(|elem| u8::from(elem.b)).collect::<Vec<_>>().into(),
            z: encode_unsigned_entries(self.elems.iter().map(|elem| &elem.z)),
        }
    }
}

/// The wire representation of [`ModProof`].
///
/// Integers are big-endian; the flags $a_i$, $b_i$ are one byte each, `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModProofWire {
    /// $w$
    pub w: WireBytes,
    /// $x_0, \dots, x_{M-1}$
    pub x: Vec<WireBytes>,
    /// $a_0, \dots, a_{M-1}$
    pub a: WireBytes,
    /// $b_0, \dots, b_{M-1}$
    pub b: WireBytes,
    /// $z_0, \dots, z_{M-1}$
    pub z: Vec<WireBytes>,
}

impl ModProofWire {
    /// Cheap structural check: a non-empty `w` and [`PARAM_M`] non-empty entries in every other field.
    pub fn validate_basic(&self) -> bool {
        !self.w.is_empty()
            && has_repetitions(&self.x)
            && has_repetitions(self.a.as_bytes())
            && has_repetitions(self.b.as_bytes())
            && has_repetitions(&self.z)
            && all_non_empty(&self.x)
            && all_non_empty(&self.z)
    }
}

fn decode_flags(field: &'static str, flags: &WireBytes) -> Result<Vec<bool>, DecodeError> {
    if !has_repetitions(flags.as_bytes()) {
        return Err(DecodeError::WrongLength {
            field,
            expected: PARAM_M,
            actual: flags.as_bytes().len(),
        });
    }
    flags
        .as_bytes()
        .iter()
        .enumerate()
        .map(|(index, &value)| match value {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::InvalidFlag { field, index, value }),
        })
        .collect()
}

impl TryFrom<ModProofWire> for ModProof {
    type Error = DecodeError;

    fn try_from(wire: ModProofWire) -> Result<Self, Self::Error> {
        if wire.w.is_empty() {
            return Err(DecodeError::EmptyField { field: "w", index: 0 });
        }
        let w = from_unsigned_bytes(wire.w.as_bytes());
        let x = decode_unsigned_entries("x", &wire.x)?;
        let a = decode_flags("a", &wire.a)?;
        let b = decode_flags("b", &wire.b)?;
        let z = decode_unsigned_entries("z", &wire.z)?;

        let elems = x
            .into_iter()
            .zip(a)
            .zip(b)
            .zip(z)
            .map(|(((x, a), b), z)| ModProofElem { x, a, b, z })
            .collect();
        Ok(Self { w, elems })
    }
}

impl From<ModProof> for ModProofWire {
    fn from(proof: ModProof) -> Self {
        proof.to_wire()
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_traits::One;
    use rand_core::OsRng;

    use super::{ModChallenge, ModProof, ModProofElem};
    use crate::{
        dev::blum_key,
        error::{DecodeError, ProofError, VerificationError},
        paillier::{PrivateKey, PublicKey},
        params::PARAM_M,
        uint::ModInt,
    };

    fn uint(x: u32) -> BigUint {
        BigUint::from(x)
    }

    #[test]
    fn challenge_is_deterministic() {
        let key = blum_key();
        let modulus = ModInt::new(key.modulus()).unwrap();
        let w = uint(5);

        let challenge = ModChallenge::new(&modulus, &w);
        assert_eq!(challenge, ModChallenge::new(&modulus, &w));
        assert_eq!(challenge.0.len(), PARAM_M);
        assert!(challenge.0.iter().all(|y| y < key.modulus()));
        // Each repetition is hashed with its own index.
        assert_ne!(challenge.0[0], challenge.0[1]);

        assert_ne!(challenge, ModChallenge::new(&modulus, &uint(7)));
    }

    #[test_log::test]
    fn prove_and_verify() {
        let key = blum_key();
        let proof = ModProof::new(&mut OsRng, key).unwrap();

        // Serialization roundtrip
        let config = bincode::config::standard();
        let serialized = bincode::serde::encode_to_vec(&proof, config).unwrap();
        let (decoded, _) = bincode::serde::decode_from_slice::<ModProof, _>(&serialized, config).unwrap();
        assert_eq!(decoded, proof);

        assert!(proof.to_wire().validate_basic());
        assert_eq!(decoded.verify(key.public_key()), Ok(()));
    }

    #[test_log::test]
    fn tampered_response_is_rejected() {
        let key = blum_key();
        let mut proof = ModProof::new(&mut OsRng, key).unwrap();
        let last = proof.elems.last_mut().unwrap();
        last.z -= BigUint::one();
        assert_eq!(
            proof.verify(key.public_key()),
            Err(VerificationError::NthRoot { index: PARAM_M - 1 })
        );
    }

    #[test_log::test]
    fn tampered_flag_is_rejected() {
        let key = blum_key();
        let mut proof = ModProof::new(&mut OsRng, key).unwrap();
        proof.elems[7].a = !proof.elems[7].a;
        assert_eq!(
            proof.verify(key.public_key()),
            Err(VerificationError::FourthRoot { index: 7 })
        );
    }

    #[test_log::test]
    fn non_blum_primes_fail_generation() {
        // 17 = 1 mod 4
        let key = PrivateKey::new(uint(17), uint(7)).unwrap();
        assert!(matches!(
            ModProof::new(&mut OsRng, &key),
            Err(ProofError::NoFourthRoot { .. })
        ));
    }

    #[test_log::test]
    fn forged_proof_is_rejected() {
        let p = uint(17);
        let q = uint(7);
        let n = &p * &q;
        let totient = uint(16 * 6);
        let modulus = ModInt::new(&n).unwrap();

        // Degenerate witnesses: w = 0, x_i = 0, a_i = b_i = true,
        // for which x_i^4 == -w y_i holds trivially.
        let w = BigUint::default();
        let challenge = ModChallenge::new(&modulus, &w);
        let inv_modulus = ModInt::new(&totient).unwrap().inverse(&n).unwrap();
        let elems = challenge
            .0
            .iter()
            .map(|y| ModProofElem {
                x: BigUint::default(),
                a: true,
                b: true,
                z: modulus.pow(y, &inv_modulus),
            })
            .collect();
        let forged = ModProof { w, elems };

        assert_eq!(
            forged.verify(&PublicKey::new(n)),
            Err(VerificationError::InvalidWitness)
        );
    }

    #[test_log::test]
    fn invalid_moduli_are_rejected() {
        let key = blum_key();
        let proof = ModProof::new(&mut OsRng, key).unwrap();

        let even = key.modulus() * 2u32;
        assert_eq!(
            proof.verify(&PublicKey::new(even)),
            Err(VerificationError::EvenModulus)
        );
        assert_eq!(
            proof.verify(&PublicKey::new(BigUint::default())),
            Err(VerificationError::EvenModulus)
        );
        let (p, _) = key.primes();
        assert_eq!(
            proof.verify(&PublicKey::new(p.clone())),
            Err(VerificationError::PrimeModulus)
        );
    }

    #[test]
    fn malformed_wire() {
        let key = blum_key();
        let wire = ModProof::new(&mut OsRng, key).unwrap().to_wire();

        let mut no_w = wire.clone();
        no_w.w = Default::default();
        assert!(!no_w.validate_basic());
        assert_eq!(
            ModProof::try_from(no_w).unwrap_err(),
            DecodeError::EmptyField { field: "w", index: 0 }
        );

        let mut short = wire.clone();
        short.x.truncate(PARAM_M - 2);
        assert!(!short.validate_basic());
        assert_eq!(
            ModProof::try_from(short).unwrap_err(),
            DecodeError::WrongLength {
                field: "x",
                expected: PARAM_M,
                actual: PARAM_M - 2
            }
        );

        let mut bad_flag = wire.clone();
        let mut flags = bad_flag.b.as_bytes().to_vec();
        flags[11] = 2;
        bad_flag.b = flags.into();
        assert!(bad_flag.validate_basic());
        assert_eq!(
            ModProof::try_from(bad_flag).unwrap_err(),
            DecodeError::InvalidFlag {
                field: "b",
                index: 11,
                value: 2
            }
        );

        let mut long_flags = wire;
        long_flags.a = vec![0u8; PARAM_M + 1].into();
        assert!(!long_flags.validate_basic());
        assert!(matches!(
            ModProof::try_from(long_flags),
            Err(DecodeError::WrongLength { field: "a", .. })
        ));
    }
}
