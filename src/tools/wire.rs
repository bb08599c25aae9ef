use serde::{Deserialize, Serialize};
use serde_encoded_bytes::{Hex, SliceLike};

/// A byte string in a proof's wire representation.
///
/// Serialized as hex in human-readable formats, and as plain bytes otherwise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireBytes(#[serde(with = "SliceLike::<Hex>")] Box<[u8]>);

impl WireBytes {
    /// Returns the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns `true` if the byte string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for WireBytes {
    fn from(source: Vec<u8>) -> Self {
        Self(source.into())
    }
}

impl From<&[u8]> for WireBytes {
    fn from(source: &[u8]) -> Self {
        Self(source.into())
    }
}

impl AsRef<[u8]> for WireBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
