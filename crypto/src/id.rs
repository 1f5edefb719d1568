use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::bls::constants::SCALAR_BYTES;
use crate::error::{Error, Result};
use crate::public_key::PublicKey;
use crate::scalar::Scalar;

/// Identity of a share holder: the x-coordinate its share is evaluated at.
///
/// Ids are public. Zero is representable, but every derivation and recovery
/// entry point rejects it because `f(0)` is the shared secret itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Id {
    scalar: Scalar,
}

impl Id {
    /// Builds an id from exactly four little-endian 64-bit limbs.
    ///
    /// # Errors
    /// [`Error::SizeMismatch`] when `words.len() != OP_UNIT_SIZE`, or a
    /// decode error when the value is not below the group order.
    pub fn set(words: &[u64]) -> Result<Self> {
        Ok(Self {
            scalar: Scalar::from_words(words)?,
        })
    }

    /// Id for a participant index. Index 0 yields the (invalid) zero id.
    pub fn from_u64(index: u64) -> Self {
        Self {
            scalar: Scalar::from_u64(index),
        }
    }

    /// Derives an id from the BLAKE3 hash of a compressed public key.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let hash = blake3::hash(&public_key.serialize());
        Self {
            scalar: Scalar::from_bytes_le(*hash.as_bytes()),
        }
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn serialize(&self) -> [u8; SCALAR_BYTES] {
        self.scalar.to_bytes_be()
    }

    /// # Errors
    /// Rejects buffers that are not exactly 32 bytes or not below the group order.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            scalar: Scalar::from_bytes_be(bytes)?,
        })
    }

    pub fn hex_string(&self) -> String {
        self.scalar.to_str_radix(16)
    }

    pub fn dec_string(&self) -> String {
        self.scalar.to_str_radix(10)
    }

    pub fn from_hex_str(s: &str) -> Result<Self> {
        Ok(Self {
            scalar: Scalar::from_str_radix(s, 16)?,
        })
    }

    pub fn from_dec_str(s: &str) -> Result<Self> {
        Ok(Self {
            scalar: Scalar::from_str_radix(s, 10)?,
        })
    }

    pub fn is_same(&self, other: &Id) -> bool {
        self == other
    }

    pub fn is_zero(&self) -> bool {
        self.scalar.is_zero()
    }

    pub fn as_scalar(&self) -> &Scalar {
        &self.scalar
    }
}

impl From<u64> for Id {
    fn from(index: u64) -> Self {
        Self::from_u64(index)
    }
}

impl Hash for Id {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialize().hash(state);
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.dec_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dec_string())
    }
}

impl FromStr for Id {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_dec_str(s)
    }
}
