use core::fmt;

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;

use crate::{error::KeyError, uint::is_probable_prime};

/// A Paillier public key: the modulus $N$.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    modulus: BigUint,
}

impl PublicKey {
    /// Wraps a modulus received from another party. No validation is performed;
    /// that is what [`ModProof`](crate::ModProof) is for.
    pub fn new(modulus: BigUint) -> Self {
        Self { modulus }
    }

    /// Returns $N$.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }
}

/// A Paillier secret key: the primes $p$, $q$ and the totient $\phi(N) = (p - 1)(q - 1)$.
#[derive(Clone)]
pub struct PrivateKey {
    p: BigUint,
    q: BigUint,
    totient: BigUint,
    public_key: PublicKey,
}

impl PrivateKey {
    /// Creates a key from two distinct odd primes.
    ///
    /// Note that the primes are not required to be congruent to 3 modulo 4;
    /// [`ModProof::new`](crate::ModProof::new) reports an error for such keys.
    pub fn new(p: BigUint, q: BigUint) -> Result<Self, KeyError> {
        if p == q {
            return Err(KeyError::EqualPrimes);
        }
        for prime in [&p, &q] {
            if prime.is_even() || prime < &BigUint::from(3u32) {
                return Err(KeyError::EvenPrime);
            }
            if !is_probable_prime(prime) {
                return Err(KeyError::NotPrime);
            }
        }

        let one = BigUint::one();
        let totient = (&p - &one) * (&q - &one);
        let public_key = PublicKey::new(&p * &q);
        Ok(Self {
            p,
            q,
            totient,
            public_key,
        })
    }

    /// Returns the public part of the key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns $N = p q$.
    pub fn modulus(&self) -> &BigUint {
        self.public_key.modulus()
    }

    /// Returns the prime factors $(p, q)$.
    pub fn primes(&self) -> (&BigUint, &BigUint) {
        (&self.p, &self.q)
    }

    /// Euler's totient function of `p * q` - the number of positive integers up to `p * q`
    /// that are relatively prime to it.
    pub fn totient(&self) -> &BigUint {
        &self.totient
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::PrivateKey;
    use crate::error::KeyError;

    fn uint(x: u32) -> BigUint {
        BigUint::from(x)
    }

    #[test]
    fn basics() {
        let sk = PrivateKey::new(uint(7), uint(11)).unwrap();
        assert_eq!(sk.modulus(), &uint(77));
        assert_eq!(sk.totient(), &uint(60));
        assert_eq!(sk.primes(), (&uint(7), &uint(11)));
        assert_eq!(sk.public_key().modulus(), &uint(77));
    }

    #[test]
    fn invalid_primes() {
        assert_eq!(PrivateKey::new(uint(7), uint(7)).unwrap_err(), KeyError::EqualPrimes);
        assert_eq!(PrivateKey::new(uint(2), uint(7)).unwrap_err(), KeyError::EvenPrime);
        assert_eq!(PrivateKey::new(uint(1), uint(7)).unwrap_err(), KeyError::EvenPrime);
        assert_eq!(PrivateKey::new(uint(9), uint(7)).unwrap_err(), KeyError::NotPrime);
    }

    #[test]
    fn debug_hides_primes() {
        let sk = PrivateKey::new(uint(7), uint(11)).unwrap();
        let debug = format!("{sk:?}");
        assert!(debug.contains("77"));
        assert!(!debug.contains("11,") && !debug.contains("p:"));
    }
}
