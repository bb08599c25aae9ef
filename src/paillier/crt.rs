//! Square and quartic roots modulo Blum primes and their products.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{
    error::ArithmeticError,
    uint::{bezout, Bezout, ModInt},
};

/// Returns the square roots `{r, p - r}` of `x` modulo a prime `p ≡ 3 mod 4`,
/// or an empty vector if `x` is not a quadratic residue or `p ≢ 3 mod 4`.
///
/// Uses `r = x^((p + 1) / 4) mod p`; a zero residue has the single root 0.
pub fn prime_sqrt(x: &BigUint, p: &BigUint) -> Vec<BigUint> {
    if p.mod_floor(&BigUint::from(4u32)) != BigUint::from(3u32) {
        return Vec::new();
    }
    let x = x % p;
    let r = x.modpow(&((p + 1u32) >> 2), p);
    if (&r * &r) % p != x {
        return Vec::new();
    }
    if r.is_zero() {
        vec![r]
    } else {
        let neg_r = p - &r;
        vec![r, neg_r]
    }
}

/// Euler's criterion: is `x` a square modulo the odd prime `p`? Zero counts as a square.
pub fn is_quadratic_residue_mod_prime(x: &BigUint, p: &BigUint) -> bool {
    let x = x % p;
    if x.is_zero() {
        return true;
    }
    x.modpow(&((p - 1u32) >> 1), p).is_one()
}

/// Is `x` a square modulo `p q`?
pub fn is_quadratic_residue_mod_composite(x: &BigUint, p: &BigUint, q: &BigUint) -> bool {
    is_quadratic_residue_mod_prime(x, p) && is_quadratic_residue_mod_prime(x, q)
}

/// Given a square root `y` of `x` modulo `n = p q`, returns the square root of `y` which is itself
/// a quadratic residue modulo `n` (so a quartic root of `x`), or `None` if `y` has no square roots.
pub fn quadratic_residue_mod_composite(
    x: &BigUint,
    p: &BigUint,
    q: &BigUint,
    n: &BigUint,
    y: &BigUint,
) -> Option<BigUint> {
    let roots = CrtRoots::new(p, q).ok()?;
    if roots.modulus.modulus() != n || roots.modulus.mul(y, y) != x % n {
        return None;
    }
    roots.residue_sqrt(y)
}

/// Root extraction modulo `n = p q` for primes `p, q ≡ 3 mod 4`,
/// with the Bézout coefficients `a p + b q = 1` computed once.
#[derive(Debug, Clone)]
pub(crate) struct CrtRoots {
    p: BigUint,
    q: BigUint,
    modulus: ModInt,
    bezout: Bezout,
}

impl CrtRoots {
    pub fn new(p: &BigUint, q: &BigUint) -> Result<Self, ArithmeticError> {
        let bezout = bezout(p, q).ok_or(ArithmeticError::NotInvertible)?;
        let modulus = ModInt::new(&(p * q))?;
        Ok(Self {
            p: p.clone(),
            q: q.clone(),
            modulus,
            bezout,
        })
    }

    /// Returns the element congruent to `rp` modulo `p` and to `rq` modulo `q`.
    fn combine(&self, rp: &BigUint, rq: &BigUint) -> BigUint {
        let bq = &self.bezout.b * BigInt::from(self.q.clone());
        let ap = &self.bezout.a * BigInt::from(self.p.clone());
        self.modulus
            .reduce(&(bq * BigInt::from(rp.clone()) + ap * BigInt::from(rq.clone())))
    }

    /// All square roots of `x` modulo `n`: none, or one per combination of prime-level roots
    /// (four for a residue coprime to `n`).
    pub fn sqrt(&self, x: &BigUint) -> Vec<BigUint> {
        let rps = prime_sqrt(x, &self.p);
        let rqs = prime_sqrt(x, &self.q);
        rps.iter()
            .flat_map(|rp| rqs.iter().map(move |rq| (rp, rq)))
            .map(|(rp, rq)| self.combine(rp, rq))
            .collect()
    }

    /// Quartic roots of `x` modulo `n`, as square roots of each square root.
    ///
    /// May contain duplicates; any entry is a valid root.
    pub fn fourth_root(&self, x: &BigUint) -> Vec<BigUint> {
        self.sqrt(x).iter().flat_map(|root| self.sqrt(root)).collect()
    }

    /// The square root of `y` that is a quadratic residue modulo `n`.
    pub fn residue_sqrt(&self, y: &BigUint) -> Option<BigUint> {
        // For p ≡ 3 mod 4 the closed-form root is a power of `y`, hence a residue itself.
        let rp = prime_sqrt(y, &self.p).into_iter().next()?;
        let rq = prime_sqrt(y, &self.q).into_iter().next()?;
        Some(self.combine(&rp, &rq))
    }

    /// Is `x` a square modulo `n`? For Blum primes, exactly the elements with a quartic root.
    pub fn is_residue(&self, x: &BigUint) -> bool {
        is_quadratic_residue_mod_composite(x, &self.p, &self.q)
    }

    pub fn modulus(&self) -> &ModInt {
        &self.modulus
    }
}
