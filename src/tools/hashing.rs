use digest::{ExtendableOutput, FixedOutput, Update, XofReader};
use num_bigint::{BigInt, BigUint};

use crate::uint::{to_signed_bytes, to_unsigned_bytes, ModInt};

/// Extra output bits drawn from the XOF when hashing into a range,
/// making the reduced value statistically close to uniform.
const STATISTICAL_SLACK_BITS: u64 = 128;

/// A digest object that takes byte slices or decomposable ([`Hashable`]) objects.
pub(crate) trait Chain: Sized {
    /// Hash raw bytes.
    ///
    /// Note: only for impls in specific types, do not use directly.
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self;

    /// Hash raw bytes in a collision-resistant way.
    fn chain_bytes(self, bytes: &(impl AsRef<[u8]> + ?Sized)) -> Self {
        // Hash the length too to prevent hash conflicts. (e.g. H(AB|CD) == H(ABC|D)).
        let len = (bytes.as_ref().len() as u64).to_be_bytes();
        self.chain_raw_bytes(&len).chain_raw_bytes(bytes.as_ref())
    }

    fn chain<T: Hashable + ?Sized>(self, hashable: &T) -> Self {
        hashable.chain(self)
    }
}

/// Wraps a hash function and standardizes the use of DST.
pub(crate) struct Hasher<D>(D);

impl<D: Update> Chain for Hasher<D> {
    fn chain_raw_bytes(self, bytes: &[u8]) -> Self {
        let mut digest = self.0;
        digest.update(bytes);
        Self(digest)
    }
}

impl<D: Default + Update> Hasher<D> {
    pub fn new_with_dst(dst: &[u8]) -> Self {
        Self(D::default()).chain_bytes(dst)
    }
}

impl<D: FixedOutput> Hasher<D> {
    /// Finalizes into a non-negative integer, reading the digest as big-endian.
    pub fn finalize_to_uint(self) -> BigUint {
        BigUint::from_bytes_be(&self.0.finalize_fixed())
    }
}

impl<D: ExtendableOutput> Hasher<D> {
    pub fn finalize_to_reader(self) -> D::Reader {
        self.0.finalize_xof()
    }

    /// Finalizes into an integer in `[0, modulus)`.
    pub fn finalize_to_n(self, modulus: &ModInt) -> BigUint {
        let bits = modulus.modulus().bits() + STATISTICAL_SLACK_BITS;
        let mut bytes = vec![0u8; bits.div_ceil(8) as usize];
        self.finalize_to_reader().read(&mut bytes);
        BigUint::from_bytes_be(&bytes) % modulus.modulus()
    }
}

/// A trait allowing complex objects to give access to their contents for hashing purposes
/// without the need of a conversion to a new form (e.g. serialization).
pub(crate) trait Hashable {
    fn chain<C: Chain>(&self, digest: C) -> C;
}

// Unsigned values are hashed in the signed encoding, so that equal integers
// produce equal hashes regardless of the type holding them.
impl Hashable for BigUint {
    fn chain<C: Chain>(&self, digest: C) -> C {
        let mut bytes = vec![0u8];
        bytes.extend(to_unsigned_bytes(self));
        digest.chain_bytes(&bytes)
    }
}

impl Hashable for BigInt {
    fn chain<C: Chain>(&self, digest: C) -> C {
        digest.chain_bytes(&to_signed_bytes(self))
    }
}

impl Hashable for u64 {
    fn chain<C: Chain>(&self, digest: C) -> C {
        digest.chain(&BigUint::from(*self))
    }
}

impl<T: Hashable> Hashable for [T] {
    fn chain<C: Chain>(&self, digest: C) -> C {
        let digest = digest.chain_raw_bytes(&(self.len() as u64).to_be_bytes());
        self.iter().fold(digest, |digest, elem| digest.chain(elem))
    }
}

impl<T: Hashable + ?Sized> Hashable for &T {
    fn chain<C: Chain>(&self, digest: C) -> C {
        (*self).chain(digest)
    }
}
