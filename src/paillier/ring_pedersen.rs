//! Ring-Pedersen commitment parameters (Definition 3.3 in CGGMP'21).

use core::fmt;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use super::PrivateKey;
use crate::{
    error::{ArithmeticError, KeyError},
    tools::random::{random_below, random_unit},
    uint::ModInt,
};

/// Ring-Pedersen secret: the discrete log $\lambda$ of $s$ to the base $t$,
/// along with the totient of the modulus it was created for.
#[derive(Clone)]
pub struct PedersenSecret {
    modulus: BigUint,
    totient: BigUint,
    lambda: BigUint,
}

impl PedersenSecret {
    /// Samples $\lambda \in [0, \phi(\hat{N}))$ for the modulus of the given key.
    pub fn random(rng: &mut impl CryptoRngCore, key: &PrivateKey) -> Self {
        let lambda = random_below(rng, key.totient());
        Self::new(key, lambda)
    }

    /// Uses the given $\lambda$ (reduced modulo $\phi(\hat{N})$) for the modulus of the given key.
    pub fn new(key: &PrivateKey, lambda: BigUint) -> Self {
        Self {
            modulus: key.modulus().clone(),
            totient: key.totient().clone(),
            lambda: lambda % key.totient(),
        }
    }

    /// Returns the modulus $\hat{N}$ the secret was created for.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// $\phi(\hat{N})$
    pub(crate) fn totient(&self) -> &BigUint {
        &self.totient
    }

    /// The discrete log $\lambda$ of $s$ to the base $t$.
    pub(crate) fn lambda(&self) -> &BigUint {
        &self.lambda
    }
}

impl fmt::Debug for PedersenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PedersenSecret")
            .field("modulus", &self.modulus)
            .finish_non_exhaustive()
    }
}

/// Public ring-Pedersen parameters $(\hat{N}, s, t)$.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedersenParams {
    /// The public modulus $\hat{N}$.
    modulus: ModInt,
    /// The ring-Pedersen base for secret exponentiation.
    base_value: BigUint, // $s = t^\lambda$, where $\lambda$ is the secret
    /// The ring-Pedersen base for randomizer exponentiation.
    base_randomizer: BigUint, // $t$
}

impl PedersenParams {
    /// Validates parameters received from another party.
    ///
    /// $\hat{N}$ must be odd and greater than 1, and both bases must be invertible elements of $[1, \hat{N})$.
    pub fn new(modulus: BigUint, base_value: BigUint, base_randomizer: BigUint) -> Result<Self, KeyError> {
        if modulus.is_even() || modulus.is_one() {
            return Err(KeyError::InvalidModulus);
        }
        for base in [&base_value, &base_randomizer] {
            if base >= &modulus || !base.gcd(&modulus).is_one() {
                return Err(KeyError::InvalidBase);
            }
        }
        let modulus = ModInt::new(&modulus).map_err(|_| KeyError::InvalidModulus)?;
        Ok(Self {
            modulus,
            base_value,
            base_randomizer,
        })
    }

    /// Creates parameters with $t$ a random quadratic residue and $s = t^\lambda$.
    pub fn random_with_secret(rng: &mut impl CryptoRngCore, secret: &PedersenSecret) -> Result<Self, ArithmeticError> {
        let modulus = ModInt::new(secret.modulus())?;
        let r = random_unit(rng, &modulus);
        let base_randomizer = modulus.mul(&r, &r);
        let base_value = modulus.pow(&base_randomizer, secret.lambda());
        Ok(Self {
            modulus,
            base_value,
            base_randomizer,
        })
    }

    /// Returns $\hat{N}$.
    pub fn modulus(&self) -> &BigUint {
        self.modulus.modulus()
    }

    /// Returns $s$.
    pub fn base_value(&self) -> &BigUint {
        &self.base_value
    }

    /// Returns $t$.
    pub fn base_randomizer(&self) -> &BigUint {
        &self.base_randomizer
    }

    pub(crate) fn mod_int(&self) -> &ModInt {
        &self.modulus
    }

    /// Creates a commitment $s^{value} t^{randomizer} \mod \hat{N}$.
    pub fn commit(&self, value: &BigInt, randomizer: &BigInt) -> Result<BigUint, ArithmeticError> {
        self.modulus
            .exp_mul_exp(&self.base_value, value, &self.base_randomizer, randomizer)
    }
}
