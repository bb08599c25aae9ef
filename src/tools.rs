pub(crate) mod bitvec;
pub(crate) mod hashing;
pub(crate) mod random;
mod wire;

pub use wire::WireBytes;
