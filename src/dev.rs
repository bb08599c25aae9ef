//! Key material intended for testing and benchmarking.
//!
//! The primes are scaled down to 512 bits to allow for faster execution.
//! **Not for production use.**

use std::sync::OnceLock;

use num_bigint::{BigUint, RandBigInt};
use rand_core::{CryptoRngCore, OsRng};

use crate::{
    paillier::{PedersenParams, PedersenSecret, PrivateKey},
    uint::is_probable_prime,
};

/// The size of the primes in the memoized fixtures.
pub const TEST_PRIME_BITS: u64 = 512;

/// Samples a prime of exactly `bits` bits that is congruent to 3 modulo 4.
pub fn random_blum_prime(rng: &mut impl CryptoRngCore, bits: u64) -> BigUint {
    loop {
        let mut candidate = rng.gen_biguint(bits);
        candidate.set_bit(bits - 1, true);
        candidate.set_bit(0, true);
        candidate.set_bit(1, true);
        if is_probable_prime(&candidate) {
            return candidate;
        }
    }
}

/// Samples a Paillier-Blum key with two distinct `prime_bits`-sized primes.
pub fn random_blum_key(rng: &mut impl CryptoRngCore, prime_bits: u64) -> PrivateKey {
    loop {
        let p = random_blum_prime(rng, prime_bits);
        let q = random_blum_prime(rng, prime_bits);
        // Only fails if `p == q`.
        if let Ok(key) = PrivateKey::new(p, q) {
            return key;
        }
    }
}

/// A memoized Paillier-Blum key, used as the prover's key $N_0$.
pub fn blum_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| random_blum_key(&mut OsRng, TEST_PRIME_BITS))
}

/// A memoized key, distinct from [`blum_key`], whose modulus is used as $\hat{N}$.
pub fn pedersen_key() -> &'static PrivateKey {
    static KEY: OnceLock<PrivateKey> = OnceLock::new();
    KEY.get_or_init(|| random_blum_key(&mut OsRng, TEST_PRIME_BITS))
}

/// Memoized ring-Pedersen parameters over the modulus of [`pedersen_key`], along with their secret.
pub fn pedersen_setup() -> (&'static PedersenSecret, &'static PedersenParams) {
    static SETUP: OnceLock<(PedersenSecret, PedersenParams)> = OnceLock::new();
    let (secret, params) = SETUP.get_or_init(|| {
        let secret = PedersenSecret::random(&mut OsRng, pedersen_key());
        let params = PedersenParams::random_with_secret(&mut OsRng, &secret)
            .expect("the modulus of a valid key is non-zero");
        (secret, params)
    });
    (secret, params)
}
