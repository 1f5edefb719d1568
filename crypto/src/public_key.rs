use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bls::constants::PUBLIC_KEY_BYTES;
use crate::error::{DecodeError, Error, Result};
use crate::group::{G1Point, GroupElement};
use crate::id::Id;
use crate::polynomial::evaluate;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::threshold_math::interpolate_at_zero;

/// A BLS public key: `sk · G1`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey {
    point: G1Point,
}

impl PublicKey {
    pub(crate) fn from_point(point: G1Point) -> Self {
        Self { point }
    }

    pub fn point(&self) -> &G1Point {
        &self.point
    }

    /// Evaluates the committed polynomial `master` at `id`, giving the
    /// public key of the secret share at `id`.
    ///
    /// # Errors
    /// Empty `master` or a zero `id`.
    pub fn set(master: &[PublicKey], id: &Id) -> Result<Self> {
        if master.is_empty() {
            return Err(Error::EmptyInput("master public key is empty"));
        }
        if id.is_zero() {
            return Err(Error::ZeroId { index: 0 });
        }
        Ok(evaluate(master, id.as_scalar()))
    }

    /// Recovers the group public key from `t` public key shares, without
    /// touching any secret.
    ///
    /// # Errors
    /// Empty input, mismatched lengths, zero or duplicate ids.
    pub fn recover(shares: &[PublicKey], ids: &[Id]) -> Result<Self> {
        interpolate_at_zero(shares, ids)
    }

    /// Convenience for [`Signature::verify`].
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        signature.verify(self, message)
    }

    /// Interpolates the group key from its shares and verifies `signature`
    /// against it. Any invalid input verifies `false`.
    pub fn verify_threshold(
        shares: &[PublicKey],
        ids: &[Id],
        message: &[u8],
        signature: &Signature,
    ) -> bool {
        match Self::recover(shares, ids) {
            Ok(pk) => pk.verify(message, signature),
            Err(_) => false,
        }
    }

    pub fn is_same(&self, other: &PublicKey) -> bool {
        self == other
    }

    pub fn is_identity(&self) -> bool {
        self.point.is_identity()
    }

    /// Compressed 48-byte encoding.
    pub fn serialize(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.point.to_bytes()
    }

    /// # Errors
    /// Rejects wrong lengths, invalid encodings and points outside G1.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            point: G1Point::from_bytes(bytes)?,
        })
    }

    /// Hex of the compressed encoding.
    pub fn hex_string(&self) -> String {
        hex::encode(self.serialize())
    }

    pub fn from_hex_str(s: &str) -> Result<Self> {
        let bytes = hex::decode(s).map_err(DecodeError::from)?;
        Self::deserialize(&bytes)
    }
}

impl GroupElement for PublicKey {
    fn identity() -> Self {
        Self {
            point: G1Point::identity(),
        }
    }

    fn add_element(&self, other: &Self) -> Self {
        Self {
            point: self.point.add_element(&other.point),
        }
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        Self {
            point: self.point.mul_scalar(scalar),
        }
    }
}

impl AddAssign<&PublicKey> for PublicKey {
    fn add_assign(&mut self, rhs: &PublicKey) {
        self.point = self.point.add_element(&rhs.point);
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.hex_string())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_string())
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl Serialize for PublicKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex_string())
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_hex_str(&encoded).map_err(serde::de::Error::custom)
    }
}
