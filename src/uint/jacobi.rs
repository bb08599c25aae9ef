//! Jacobi symbol calculation.

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::error::ArithmeticError;

/// The value of a Jacobi symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JacobiSymbol {
    /// The arguments are not coprime.
    Zero,
    /// +1
    One,
    /// -1
    MinusOne,
}

impl core::ops::Neg for JacobiSymbol {
    type Output = Self;
    fn neg(self) -> Self {
        match self {
            Self::Zero => Self::Zero,
            Self::One => Self::MinusOne,
            Self::MinusOne => Self::One,
        }
    }
}

impl core::ops::Mul<JacobiSymbol> for JacobiSymbol {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Self::One, Self::One) => Self::One,
            (Self::MinusOne, Self::MinusOne) => Self::One,
            (Self::MinusOne, Self::One) => Self::MinusOne,
            (Self::One, Self::MinusOne) => Self::MinusOne,
            _ => Self::Zero,
        }
    }
}

fn low_bits(x: &BigUint, mask: u64) -> u64 {
    x.iter_u64_digits().next().unwrap_or(0) & mask
}

/// Transforms `(a/p)` -> `(r/p)` for odd `p`, where the resulting `r` is odd, and `a = r * 2^s`.
/// Takes a Jacobi symbol value, and returns `r` and the new Jacobi symbol,
/// negated if the transformation changes parity.
fn reduce_numerator(j: JacobiSymbol, a: &BigUint, p: &BigUint) -> (JacobiSymbol, BigUint) {
    let p_mod_8 = low_bits(p, 7);
    let s = a.trailing_zeros().unwrap_or(0);
    let j = if (s & 1) == 1 && (p_mod_8 == 3 || p_mod_8 == 5) {
        -j
    } else {
        j
    };
    (j, a >> s)
}

/// Transforms `(a/p)` -> `(p/a)` for odd and coprime `a` and `p`.
fn swap(j: JacobiSymbol, a: BigUint, p: BigUint) -> (JacobiSymbol, BigUint, BigUint) {
    let j = if low_bits(&a, 3) == 1 || low_bits(&p, 3) == 1 {
        j
    } else {
        -j
    };
    (j, p, a)
}

fn jacobi_symbol_word(a: u64, p: u64) -> JacobiSymbol {
    let mut result = JacobiSymbol::One;
    let mut a = a % p;
    let mut p = p;

    while a != 0 {
        let s = a.trailing_zeros();
        if (s & 1) == 1 && (p & 7 == 3 || p & 7 == 5) {
            result = -result;
        }
        a >>= s;
        if a & 3 == 3 && p & 3 == 3 {
            result = -result;
        }
        (a, p) = (p % a, a);
    }
    if p == 1 {
        result
    } else {
        JacobiSymbol::Zero
    }
}

/// Evaluates the Jacobi symbol `(a/p)` for an odd `p`.
pub fn jacobi_symbol(a: &BigUint, p: &BigUint) -> Result<JacobiSymbol, ArithmeticError> {
    if p.is_even() {
        return Err(ArithmeticError::EvenModulus);
    }

    let mut result = JacobiSymbol::One;
    let mut a = a % p;
    let mut p = p.clone();

    while !a.is_zero() {
        // `p` is odd here, and `a` is odd after the reduction.
        // `swap()` is only valid for coprime `a` and `p`, but if they are not,
        // the result is eventually `Zero`, which is unaffected by sign changes.
        (result, a) = reduce_numerator(result, &a, &p);
        (result, a, p) = swap(result, a, p);
        a %= &p;

        if let (Some(a_word), Some(p_word)) = (a.to_u64(), p.to_u64()) {
            return Ok(result * jacobi_symbol_word(a_word, p_word));
        }
    }
    if p.is_one() {
        Ok(result)
    } else {
        Ok(JacobiSymbol::Zero)
    }
}
