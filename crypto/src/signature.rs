use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::bls::constants::{DST, POP_DST, SIGNATURE_BYTES};
use crate::bls::ops::verify_signature;
use crate::error::{DecodeError, Error, Result};
use crate::group::{G2Point, GroupElement};
use crate::id::Id;
use crate::public_key::PublicKey;
use crate::scalar::Scalar;
use crate::threshold_math::interpolate_at_zero;

/// A BLS signature: `sk · H(m)` in G2, or a combination of such points.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    point: G2Point,
}

impl Signature {
    pub(crate) fn from_point(point: G2Point) -> Self {
        Self { point }
    }

    pub fn point(&self) -> &G2Point {
        &self.point
    }

    /// Combines `t` partial signatures on the same message into the
    /// signature of the shared secret, which is never reconstructed.
    ///
    /// # Errors
    /// Empty input, mismatched lengths, zero or duplicate ids.
    pub fn recover(shares: &[Signature], ids: &[Id]) -> Result<Self> {
        interpolate_at_zero(shares, ids)
    }

    /// Sums signatures, e.g. a multi-signature over one message.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] for an empty slice.
    pub fn aggregate(signatures: &[Signature]) -> Result<Self> {
        let (first, rest) = signatures
            .split_first()
            .ok_or(Error::EmptyInput("cannot aggregate an empty signature set"))?;
        Ok(rest.iter().fold(*first, |mut acc, sig| {
            acc += sig;
            acc
        }))
    }

    /// Pairing check of this signature on `message` under `public_key`.
    ///
    /// Never errors: malformed or adversarial inputs verify `false`.
    pub fn verify(&self, public_key: &PublicKey, message: &[u8]) -> bool {
        verify_signature(public_key.point(), message, &self.point, DST).is_ok()
    }

    /// Checks this signature as a proof of possession for `public_key`.
    pub fn verify_pop(&self, public_key: &PublicKey) -> bool {
        let message = public_key.serialize();
        verify_signature(public_key.point(), &message, &self.point, POP_DST).is_ok()
    }

    pub fn is_same(&self, other: &Signature) -> bool {
        self == other
    }

    /// Compressed 96-byte encoding.
    pub fn serialize(&self) -> [u8; SIGNATURE_BYTES] {
        self.point.to_bytes()
    }

    /// # Errors
    /// Rejects wrong lengths, invalid encodings and points outside G2.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            point: G2Point::from_bytes(bytes)?,
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

impl GroupElement for Signature {
    fn identity() -> Self {
        Self {
            point: G2Point::identity(),
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

impl AddAssign<&Signature> for Signature {
    fn add_assign(&mut self, rhs: &Signature) {
        self.point = self.point.add_element(&rhs.point);
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.hex_string())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex_string())
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_str(s)
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        Self::from_hex_str(&encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secret_key::SecretKey;
    use rand::{SeedableRng, rngs::StdRng};

    fn ids(values: &[u64]) -> Vec<Id> {
        values.iter().copied().map(Id::from_u64).collect()
    }

    #[test]
    fn verify_rejects_mismatched_public_key() {
        let mut rng = StdRng::seed_from_u64(21);
        let sk = SecretKey::random(&mut rng);
        let other = SecretKey::random(&mut rng);
        let sig = sk.sign(b"message");
        assert!(sig.verify(&sk.public_key(), b"message"));
        assert!(!sig.verify(&other.public_key(), b"message"));
    }

    #[test]
    fn verify_rejects_identity_signature() {
        let mut rng = StdRng::seed_from_u64(22);
        let pk = SecretKey::random(&mut rng).public_key();
        assert!(!Signature::identity().verify(&pk, b"message"));
    }

    #[test]
    fn aggregate_verifies_against_summed_keys() {
        let mut rng = StdRng::seed_from_u64(23);
        let keys: Vec<SecretKey> = (0..4).map(|_| SecretKey::random(&mut rng)).collect();
        let message = b"multi-signature";
        let signatures: Vec<Signature> = keys.iter().map(|sk| sk.sign(message)).collect();

        let aggregate = Signature::aggregate(&signatures).expect("aggregate");
        let mut aggregate_pk = keys[0].public_key();
        for sk in &keys[1..] {
            aggregate_pk += &sk.public_key();
        }
        assert!(aggregate.verify(&aggregate_pk, message));
        assert!(!aggregate.verify(&keys[0].public_key(), message));
    }

    #[test]
    fn aggregate_rejects_empty() {
        assert!(matches!(
            Signature::aggregate(&[]),
            Err(Error::EmptyInput(_))
        ));
    }

    #[test]
    fn add_assign_matches_aggregate() {
        let mut rng = StdRng::seed_from_u64(24);
        let a = SecretKey::random(&mut rng).sign(b"m");
        let b = SecretKey::random(&mut rng).sign(b"m");
        let mut sum = a;
        sum += &b;
        assert_eq!(sum, Signature::aggregate(&[a, b]).expect("aggregate"));
    }

    #[test]
    fn recover_matches_master_signature() {
        let mut rng = StdRng::seed_from_u64(25);
        let secret = SecretKey::random(&mut rng);
        let master = secret.master_secret_key(3, &mut rng).expect("master");
        let share_ids = ids(&[1, 3, 4]);
        let message = b"threshold message";
        let partials: Vec<Signature> = share_ids
            .iter()
            .map(|id| SecretKey::set(&master, id).expect("share").sign(message))
            .collect();

        let recovered = Signature::recover(&partials, &share_ids).expect("recover");
        assert_eq!(recovered, secret.sign(message));
        assert!(recovered.verify(&secret.public_key(), message));
    }

    #[test]
    fn recover_rejects_duplicate_ids() {
        let mut rng = StdRng::seed_from_u64(26);
        let sk = SecretKey::random(&mut rng);
        let partials = vec![sk.sign(b"m"), sk.sign(b"m")];
        assert!(matches!(
            Signature::recover(&partials, &ids(&[2, 2])),
            Err(Error::DuplicateId { .. })
        ));
    }

    #[test]
    fn encodings_roundtrip() {
        let mut rng = StdRng::seed_from_u64(27);
        let sig = SecretKey::random(&mut rng).sign(b"encode");
        assert_eq!(Signature::deserialize(&sig.serialize()).expect("bytes"), sig);
        assert_eq!(Signature::from_hex_str(&sig.hex_string()).expect("hex"), sig);
        assert_eq!(sig.to_string().parse::<Signature>().expect("parse"), sig);
        assert_eq!(sig.serialize().len(), SIGNATURE_BYTES);
    }

    #[test]
    fn deserialize_rejects_invalid_bytes() {
        assert!(Signature::deserialize(&[0u8; SIGNATURE_BYTES]).is_err());
        let valid = Signature::identity().serialize();
        assert!(matches!(
            Signature::deserialize(&valid[..SIGNATURE_BYTES - 1]),
            Err(Error::Decode(DecodeError::InvalidLength { .. }))
        ));
    }

    #[test]
    fn verify_is_false_for_garbage_decoded_from_hex() {
        let mut rng = StdRng::seed_from_u64(28);
        let pk = SecretKey::random(&mut rng).public_key();
        assert!(Signature::from_hex_str(&"00".repeat(SIGNATURE_BYTES)).is_err());
        let forged = SecretKey::random(&mut rng).sign(b"message");
        assert!(!pk.verify(b"message", &forged));
    }
}
