use num_bigint::BigUint;

/// A fixed-length challenge vector of bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BitVec(Box<[bool]>);

impl BitVec {
    /// Takes the `bits` least significant bits of `value`, least significant first.
    pub fn from_low_bits(value: &BigUint, bits: usize) -> Self {
        Self((0..bits as u64).map(|i| value.bit(i)).collect())
    }

    pub fn bits(&self) -> &[bool] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use super::BitVec;
    use crate::params::PARAM_M;

    #[test]
    fn bits_are_least_significant_first() {
        let bytes = hex::decode("0f0e0d0c0b0a090807060504030201").unwrap();
        let value = BigUint::from_bytes_be(&bytes);
        let bits = BitVec::from_low_bits(&value, PARAM_M);
        let bits = bits.bits();

        assert_eq!(bits.len(), PARAM_M);
        assert!(bits[0]);
        assert!(!bits[1]);
        assert!(!bits[8]);
        assert!(bits[9]);
        assert!(bits[16]);
        assert!(bits[17]);
    }

    #[test]
    fn short_values_are_zero_padded() {
        let bits = BitVec::from_low_bits(&BigUint::from(5u32), 8);
        assert_eq!(bits.bits(), &[true, false, true, false, false, false, false, false]);
    }
}
