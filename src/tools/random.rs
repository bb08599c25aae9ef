use num_bigint::{BigInt, BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::One;
use rand_core::CryptoRngCore;

use crate::uint::{jacobi_symbol, JacobiSymbol, ModInt};

/// Samples uniformly from `[0, bound)`. `bound` must be non-zero.
pub(crate) fn random_below(rng: &mut impl CryptoRngCore, bound: &BigUint) -> BigUint {
    rng.gen_biguint_below(bound)
}

/// Samples uniformly from `[0, 2^bits * scale)`. `scale` must be non-zero.
pub(crate) fn random_scaled(rng: &mut impl CryptoRngCore, bits: u32, scale: &BigUint) -> BigInt {
    BigInt::from(random_below(rng, &(scale << bits)))
}

/// Samples uniformly from the elements of `[1, N)` coprime to `N`.
pub(crate) fn random_unit(rng: &mut impl CryptoRngCore, modulus: &ModInt) -> BigUint {
    loop {
        let x = rng.gen_biguint_range(&BigUint::one(), modulus.modulus());
        if x.gcd(modulus.modulus()).is_one() {
            return x;
        }
    }
}

/// Samples an element of `[1, N)` with the Jacobi symbol `(w/N) = -1`, returning it and the number of attempts.
///
/// Loops forever if `N` is a perfect square, so `N` must be an odd Paillier modulus.
pub(crate) fn random_non_residue(rng: &mut impl CryptoRngCore, modulus: &ModInt) -> (BigUint, usize) {
    let mut attempts = 0;
    loop {
        attempts += 1;
        let w = rng.gen_biguint_range(&BigUint::one(), modulus.modulus());
        if jacobi_symbol(&w, modulus.modulus()) == Ok(JacobiSymbol::MinusOne) {
            return (w, attempts);
        }
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use num_integer::Integer;
    use num_traits::One;
    use rand_chacha::ChaCha8Rng;
    use rand_core::SeedableRng;

    use super::{random_non_residue, random_scaled, random_unit};
    use crate::uint::{jacobi_symbol, JacobiSymbol, ModInt};

    #[test]
    fn samples_respect_their_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(123);
        let modulus = ModInt::new(&BigUint::from(77u32)).unwrap();

        for _ in 0..200 {
            let x = random_scaled(&mut rng, 3, &BigUint::from(5u32));
            assert!(x >= 0.into() && x < 40.into());

            let u = random_unit(&mut rng, &modulus);
            assert!(u >= BigUint::one() && &u < modulus.modulus());
            assert!(u.gcd(modulus.modulus()).is_one());

            let (w, attempts) = random_non_residue(&mut rng, &modulus);
            assert!(attempts >= 1);
            assert_eq!(jacobi_symbol(&w, modulus.modulus()), Ok(JacobiSymbol::MinusOne));
        }
    }
}
