pub(crate) mod crt;
mod keys;
mod ring_pedersen;

pub use keys::{PrivateKey, PublicKey};
pub use ring_pedersen::{PedersenParams, PedersenSecret};
