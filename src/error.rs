/// Failures of modular arithmetic.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// The modulus is zero.
    ZeroModulus,
    /// The Jacobi symbol is only defined for odd moduli.
    EvenModulus,
    /// The element has no inverse modulo the given modulus.
    NotInvertible,
}

/// Malformed key material.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyError {
    /// The prime factors must be distinct.
    EqualPrimes,
    /// A prime factor is even or smaller than 3.
    EvenPrime,
    /// A prime factor failed the primality test.
    NotPrime,
    /// The ring-Pedersen modulus must be odd and greater than 1.
    InvalidModulus,
    /// A ring-Pedersen base is not an invertible element modulo the ring-Pedersen modulus.
    InvalidBase,
}

/// Failures during proof generation.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProofError {
    /// Invalid key material: {0}
    Key(KeyError),
    /// The ring-Pedersen secret does not correspond to the given parameters.
    ModulusMismatch,
    /// No sign and twist of challenge {index} has a quartic root; the primes are not a Blum pair.
    NoFourthRoot {
        /// The index of the challenge.
        index: usize,
    },
    /// Arithmetic failure: {0}
    Arithmetic(ArithmeticError),
}

/// The equalities checked by $\Pi^{fac}$ verification.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorCheck {
    /// s^z1 t^w1 != A P^e mod N
    FirstFactor,
    /// s^z2 t^w2 != B Q^e mod N
    SecondFactor,
    /// Q^z1 t^v != T R^e mod N
    Product,
}

/// The values range-checked by $\Pi^{fac}$ verification before any exponentiation.
///
/// $z_1$, $z_2$ are bounded by $2^{L+E} \sqrt{N_0}$, the rest by the sizes an honest prover can reach.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactorBound {
    /// z1
    Z1,
    /// z2
    Z2,
    /// w1
    W1,
    /// w2
    W2,
    /// v
    V,
    /// sigma
    Sigma,
}

/// Reasons a proof was rejected.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationError {
    /// The modulus is even.
    EvenModulus,
    /// The modulus is probably prime.
    PrimeModulus,
    /// The witness w is outside of [1, N) or its Jacobi symbol is not -1.
    InvalidWitness,
    /// Component {component} at index {index} is outside of [1, N).
    OutOfRange {
        /// The name of the proof component.
        component: &'static str,
        /// The index of the offending entry.
        index: usize,
    },
    /// Expected {expected} proof entries, got {actual}.
    WrongLength {
        /// The required number of entries.
        expected: usize,
        /// The number of entries in the proof.
        actual: usize,
    },
    /// Response at index {index} is not below the modulus.
    ParamRange {
        /// The index of the offending response.
        index: usize,
    },
    /// t^z != A s^e mod N at index {index}.
    ParamEquation {
        /// The index of the failed repetition.
        index: usize,
    },
    /// z^N != y mod N at index {index}.
    NthRoot {
        /// The index of the failed repetition.
        index: usize,
    },
    /// x^4 != (-1)^a w^b y mod N at index {index}.
    FourthRoot {
        /// The index of the failed repetition.
        index: usize,
    },
    /// Factor proof equation failed: {0}
    FactorEquation(FactorCheck),
    /// Factor proof value {0} is out of range.
    FactorRange(FactorBound),
    /// Arithmetic failure: {0}
    Arithmetic(ArithmeticError),
}

/// Malformed wire representations.
#[derive(displaydoc::Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Field `{field}` has {actual} entries, expected {expected}.
    WrongLength {
        /// The name of the field.
        field: &'static str,
        /// The required number of entries.
        expected: usize,
        /// The number of entries found.
        actual: usize,
    },
    /// Field `{field}` has an empty entry at index {index}.
    EmptyField {
        /// The name of the field.
        field: &'static str,
        /// The index of the entry (0 for scalar fields).
        index: usize,
    },
    /// Field `{field}` has an invalid flag byte {value} at index {index}.
    InvalidFlag {
        /// The name of the field.
        field: &'static str,
        /// The index of the entry.
        index: usize,
        /// The byte found.
        value: u8,
    },
    /// Field `{field}` has an invalid sign byte.
    InvalidSign {
        /// The name of the field.
        field: &'static str,
    },
    /// Field `{field}` encodes a negative zero.
    NegativeZero {
        /// The name of the field.
        field: &'static str,
    },
}

impl From<ArithmeticError> for ProofError {
    fn from(source: ArithmeticError) -> Self {
        Self::Arithmetic(source)
    }
}

impl From<KeyError> for ProofError {
    fn from(source: KeyError) -> Self {
        Self::Key(source)
    }
}

impl From<ArithmeticError> for VerificationError {
    fn from(source: ArithmeticError) -> Self {
        Self::Arithmetic(source)
    }
}

impl std::error::Error for ArithmeticError {}
impl std::error::Error for KeyError {}
impl std::error::Error for DecodeError {}

impl std::error::Error for ProofError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Key(err) => Some(err),
            Self::Arithmetic(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for VerificationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Arithmetic(err) => Some(err),
            _ => None,
        }
    }
}

