use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

use super::into_unsigned;
use crate::error::ArithmeticError;

/// Arithmetic modulo a fixed non-zero modulus.
///
/// Inputs may be unreduced; all outputs are in `[0, modulus)`.
/// Signed exponents are supported: a negative exponent exponentiates the inverse of the base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ModInt {
    modulus: BigUint,
    modulus_signed: BigInt,
}

impl ModInt {
    pub fn new(modulus: &BigUint) -> Result<Self, ArithmeticError> {
        if modulus.is_zero() {
            return Err(ArithmeticError::ZeroModulus);
        }
        Ok(Self {
            modulus: modulus.clone(),
            modulus_signed: BigInt::from(modulus.clone()),
        })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Reduces a signed integer into `[0, modulus)`.
    pub fn reduce(&self, x: &BigInt) -> BigUint {
        into_unsigned(x.mod_floor(&self.modulus_signed))
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        let a = a % &self.modulus;
        if a.is_zero() {
            a
        } else {
            &self.modulus - a
        }
    }

    pub fn inverse(&self, a: &BigUint) -> Result<BigUint, ArithmeticError> {
        let a = BigInt::from(a % &self.modulus);
        let egcd = a.extended_gcd(&self.modulus_signed);
        if !egcd.gcd.is_one() {
            return Err(ArithmeticError::NotInvertible);
        }
        Ok(self.reduce(&egcd.x))
    }

    /// `base^exponent` for a non-negative exponent.
    pub fn pow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.modulus)
    }

    /// `base^exponent`, inverting the base for a negative exponent.
    pub fn exp(&self, base: &BigUint, exponent: &BigInt) -> Result<BigUint, ArithmeticError> {
        let (base, exponent) = self.split_exponent(base, exponent)?;
        Ok(self.pow(&base, &exponent))
    }

    /// `a * b^e`
    pub fn mul_exp(&self, a: &BigUint, b: &BigUint, e: &BigInt) -> Result<BigUint, ArithmeticError> {
        Ok(self.mul(a, &self.exp(b, e)?))
    }

    /// `a^x * b^y`, evaluated with a single square-and-multiply ladder over both exponents.
    pub fn exp_mul_exp(&self, a: &BigUint, x: &BigInt, b: &BigUint, y: &BigInt) -> Result<BigUint, ArithmeticError> {
        let (a, x) = self.split_exponent(a, x)?;
        let (b, y) = self.split_exponent(b, y)?;
        let ab = self.mul(&a, &b);

        let mut result = BigUint::one() % &self.modulus;
        for i in (0..x.bits().max(y.bits())).rev() {
            result = self.mul(&result, &result);
            match (x.bit(i), y.bit(i)) {
                (true, true) => result = self.mul(&result, &ab),
                (true, false) => result = self.mul(&result, &a),
                (false, true) => result = self.mul(&result, &b),
                (false, false) => {}
            }
        }
        Ok(result)
    }

    fn split_exponent(&self, base: &BigUint, exponent: &BigInt) -> Result<(BigUint, BigUint), ArithmeticError> {
        let base = if exponent.sign() == Sign::Minus {
            self.inverse(base)?
        } else {
            base % &self.modulus
        };
        Ok((base, exponent.magnitude().clone()))
    }
}
