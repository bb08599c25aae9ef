//! Arbitrary-precision integer helpers.

mod encoding;
mod jacobi;
mod modular;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::One;

pub(crate) use encoding::{from_signed_bytes, from_unsigned_bytes, to_signed_bytes, to_unsigned_bytes};
pub use jacobi::{jacobi_symbol, JacobiSymbol};
pub(crate) use modular::ModInt;

/// Probabilistic primality test (BPSW).
pub(crate) fn is_probable_prime(n: &BigUint) -> bool {
    num_prime::nt_funcs::is_prime(n, None).probably()
}

/// Returns `a + e * b` over the integers.
///
/// The result is deliberately not reduced: the magnitude of proof responses is what their range checks bound.
pub(crate) fn add_mul(a: &BigInt, e: &BigInt, b: &BigInt) -> BigInt {
    a + e * b
}

/// Bézout coefficients for a coprime pair: `a * p + b * q = 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bezout {
    pub a: BigInt,
    pub b: BigInt,
}

/// Returns the Bézout coefficients of `p` and `q`, or `None` if they are not coprime.
pub(crate) fn bezout(p: &BigUint, q: &BigUint) -> Option<Bezout> {
    let egcd = BigInt::from(p.clone()).extended_gcd(&BigInt::from(q.clone()));
    if !egcd.gcd.is_one() {
        return None;
    }
    Some(Bezout { a: egcd.x, b: egcd.y })
}

/// Converts a value known to be non-negative into an unsigned integer.
pub(crate) fn into_unsigned(x: BigInt) -> BigUint {
    debug_assert!(x.sign() != num_bigint::Sign::Minus);
    x.into_parts().1
}

#[cfg(test)]
mod tests {
    use num_bigint::{BigInt, BigUint};

    use super::{add_mul, bezout, is_probable_prime};

    #[test]
    fn bezout_coefficients() {
        for (p, q) in [(7u32, 11u32), (11, 7), (17, 7), (3, 1000003)] {
            let coeffs = bezout(&BigUint::from(p), &BigUint::from(q)).unwrap();
            assert_eq!(coeffs.a * BigInt::from(p) + coeffs.b * BigInt::from(q), BigInt::from(1));
        }
        assert!(bezout(&BigUint::from(6u32), &BigUint::from(9u32)).is_none());
    }

    #[test]
    fn add_mul_is_unreduced() {
        let a = BigInt::from(-5);
        let e = BigInt::from(1) << 300;
        let b = BigInt::from(3);
        assert_eq!(add_mul(&a, &e, &b), (BigInt::from(3) << 300) - 5);
        assert_eq!(add_mul(&a, &-e, &b), -(BigInt::from(3) << 300u32) - 5);
    }

    #[test]
    fn primality() {
        for p in [2u32, 3, 7, 11, 17, 65537] {
            assert!(is_probable_prime(&BigUint::from(p)));
        }
        for n in [0u32, 1, 77, 119, 561, 65535] {
            assert!(!is_probable_prime(&BigUint::from(n)));
        }
    }
}
