use std::fmt;
use std::ops::AddAssign;

use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::bls::constants::{DST, POP_DST, SCALAR_BYTES};
use crate::bls::ops::{public_key_from_scalar, sign_with_scalar};
use crate::error::{Error, Result};
use crate::group::GroupElement;
use crate::id::Id;
use crate::polynomial::evaluate;
use crate::public_key::PublicKey;
use crate::scalar::Scalar;
use crate::signature::Signature;
use crate::threshold_math::interpolate_at_zero;

/// A BLS secret key: the master secret, a polynomial coefficient, or a share.
///
/// Cloning duplicates the secret; every copy is wiped when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    scalar: Scalar,
}

impl SecretKey {
    /// Draws a uniformly random non-zero key.
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self {
            scalar: Scalar::random(rng),
        }
    }

    /// Builds a key from exactly four little-endian 64-bit limbs.
    ///
    /// # Errors
    /// [`Error::SizeMismatch`] on a wrong limb count, or a decode error when
    /// the value is not below the group order.
    pub fn set_array(words: &[u64]) -> Result<Self> {
        Ok(Self {
            scalar: Scalar::from_words(words)?,
        })
    }

    /// Coefficients `[self, r_1, ..., r_(k-1)]` of a fresh degree-(k-1)
    /// sharing polynomial whose constant term is this key.
    ///
    /// # Errors
    /// [`Error::EmptyInput`] when `k` is zero.
    pub fn master_secret_key<R: CryptoRng + RngCore>(
        &self,
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<SecretKey>> {
        if k == 0 {
            return Err(Error::EmptyInput("master secret key needs at least one coefficient"));
        }
        let mut master = Vec::with_capacity(k);
        master.push(self.clone());
        master.extend((1..k).map(|_| SecretKey::random(rng)));
        Ok(master)
    }

    /// Derives the share at `id`: `Σ master[j] · id^j`.
    ///
    /// # Errors
    /// Empty `master` or a zero `id`.
    pub fn set(master: &[SecretKey], id: &Id) -> Result<Self> {
        if master.is_empty() {
            return Err(Error::EmptyInput("master secret key is empty"));
        }
        if id.is_zero() {
            return Err(Error::ZeroId { index: 0 });
        }
        Ok(evaluate(master, id.as_scalar()))
    }

    /// Reconstructs the constant term from `t` shares and their ids.
    ///
    /// Passing fewer than `t` shares returns a wrong key without an error.
    ///
    /// # Errors
    /// Empty input, mismatched lengths, zero or duplicate ids.
    pub fn recover(shares: &[SecretKey], ids: &[Id]) -> Result<Self> {
        interpolate_at_zero(shares, ids)
    }

    /// `self · G1`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_point(public_key_from_scalar(&self.scalar))
    }

    /// Signs `message`: `self · H(message)`.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from_point(sign_with_scalar(&self.scalar, message, DST))
    }

    /// Proof of possession: a signature over this key's own compressed
    /// public key under the proof-of-possession tag.
    pub fn pop(&self) -> Signature {
        let message = self.public_key().serialize();
        Signature::from_point(sign_with_scalar(&self.scalar, &message, POP_DST))
    }

    /// Equality without an early exit on the first differing byte.
    pub fn is_same(&self, other: &SecretKey) -> bool {
        let lhs = Zeroizing::new(self.serialize());
        let rhs = Zeroizing::new(other.serialize());
        lhs.iter().zip(rhs.iter()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
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
}

/// Public keys of every coefficient of a master secret key.
pub fn master_public_key(master: &[SecretKey]) -> Vec<PublicKey> {
    master.iter().map(SecretKey::public_key).collect()
}

impl GroupElement for SecretKey {
    fn identity() -> Self {
        Self {
            scalar: Scalar::zero(),
        }
    }

    fn add_element(&self, other: &Self) -> Self {
        Self {
            scalar: self.scalar.add(&other.scalar),
        }
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        Self {
            scalar: self.scalar.mul(scalar),
        }
    }
}

impl AddAssign<&SecretKey> for SecretKey {
    fn add_assign(&mut self, rhs: &SecretKey) {
        let mut sum = self.scalar.add(&rhs.scalar);
        std::mem::swap(&mut self.scalar, &mut sum);
        sum.zeroize();
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl Serialize for SecretKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let encoded = Zeroizing::new(self.hex_string());
        serializer.serialize_str(&encoded)
    }
}

impl<'de> Deserialize<'de> for SecretKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = Zeroizing::new(String::deserialize(deserializer)?);
        Self::from_hex_str(&encoded).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use rand::{SeedableRng, rngs::StdRng};

    fn ids(values: &[u64]) -> Vec<Id> {
        values.iter().copied().map(Id::from_u64).collect()
    }

    #[test]
    fn master_secret_key_keeps_secret_first() {
        let mut rng = StdRng::seed_from_u64(1);
        let sk = SecretKey::random(&mut rng);
        let master = sk.master_secret_key(3, &mut rng).expect("master");
        assert_eq!(master.len(), 3);
        assert!(master[0].is_same(&sk));
        assert!(!master[1].is_same(&master[2]));
    }

    #[test]
    fn master_secret_key_rejects_zero_length() {
        let mut rng = StdRng::seed_from_u64(2);
        let sk = SecretKey::random(&mut rng);
        assert!(matches!(
            sk.master_secret_key(0, &mut rng),
            Err(Error::EmptyInput(_))
        ));
    }

    #[test]
    fn set_evaluates_polynomial_at_id() {
        // f(x) = 3 + 4x + 5x^2, f(2) = 31
        let master: Vec<SecretKey> = [3u64, 4, 5]
            .iter()
            .map(|v| SecretKey::set_array(&[*v, 0, 0, 0]).expect("key"))
            .collect();
        let share = SecretKey::set(&master, &Id::from_u64(2)).expect("share");
        assert_eq!(share.dec_string(), "31");
    }

    #[test]
    fn set_with_single_coefficient_is_constant() {
        let mut rng = StdRng::seed_from_u64(3);
        let sk = SecretKey::random(&mut rng);
        let share = SecretKey::set(std::slice::from_ref(&sk), &Id::from_u64(9)).expect("share");
        assert_eq!(share, sk);
    }

    #[test]
    fn set_rejects_zero_id_and_empty_master() {
        let mut rng = StdRng::seed_from_u64(4);
        let master = SecretKey::random(&mut rng)
            .master_secret_key(2, &mut rng)
            .expect("master");
        assert!(matches!(
            SecretKey::set(&master, &Id::from_u64(0)),
            Err(Error::ZeroId { .. })
        ));
        assert!(matches!(
            SecretKey::set(&[], &Id::from_u64(1)),
            Err(Error::EmptyInput(_))
        ));
    }

    #[test]
    fn recover_from_threshold_shares() {
        let mut rng = StdRng::seed_from_u64(5);
        let secret = SecretKey::random(&mut rng);
        let master = secret.master_secret_key(3, &mut rng).expect("master");
        let share_ids = ids(&[4, 7, 10]);
        let shares: Vec<SecretKey> = share_ids
            .iter()
            .map(|id| SecretKey::set(&master, id).expect("share"))
            .collect();

        let recovered = SecretKey::recover(&shares, &share_ids).expect("recover");
        assert!(recovered.is_same(&secret));
    }

    #[test]
    fn recover_rejects_duplicate_ids() {
        let mut rng = StdRng::seed_from_u64(6);
        let shares = vec![SecretKey::random(&mut rng), SecretKey::random(&mut rng)];
        assert!(matches!(
            SecretKey::recover(&shares, &ids(&[3, 3])),
            Err(Error::DuplicateId { index: 1 })
        ));
    }

    #[test]
    fn add_combines_contributions() {
        let mut a = SecretKey::set_array(&[10, 0, 0, 0]).expect("a");
        let b = SecretKey::set_array(&[32, 0, 0, 0]).expect("b");
        a += &b;
        assert_eq!(a.dec_string(), "42");
        assert_eq!(a.public_key(), {
            let mut pk = SecretKey::set_array(&[10, 0, 0, 0]).expect("a").public_key();
            pk += &b.public_key();
            pk
        });
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let mut rng = StdRng::seed_from_u64(7);
        let sk = SecretKey::random(&mut rng);
        let pk = sk.public_key();
        let signature = sk.sign(b"single-signer");
        assert!(signature.verify(&pk, b"single-signer"));
        assert!(!signature.verify(&pk, b"other message"));
    }

    #[test]
    fn pop_verifies_only_for_own_key() {
        let mut rng = StdRng::seed_from_u64(8);
        let sk = SecretKey::random(&mut rng);
        let other = SecretKey::random(&mut rng);
        let pop = sk.pop();
        assert!(pop.verify_pop(&sk.public_key()));
        assert!(!pop.verify_pop(&other.public_key()));
        // A proof of possession is not a signature over the key bytes.
        assert!(!pop.verify(&sk.public_key(), &sk.public_key().serialize()));
    }

    #[test]
    fn encodings_roundtrip() {
        let mut rng = StdRng::seed_from_u64(9);
        let sk = SecretKey::random(&mut rng);
        assert!(SecretKey::deserialize(&sk.serialize()).expect("bytes").is_same(&sk));
        assert!(SecretKey::from_hex_str(&sk.hex_string()).expect("hex").is_same(&sk));
        assert!(SecretKey::from_dec_str(&sk.dec_string()).expect("dec").is_same(&sk));
    }

    #[test]
    fn deserialize_rejects_malformed_input() {
        assert!(matches!(
            SecretKey::deserialize(&[0u8; 33]),
            Err(Error::Decode(DecodeError::InvalidLength { .. }))
        ));
        assert!(matches!(
            SecretKey::deserialize(&[0xffu8; 32]),
            Err(Error::Decode(DecodeError::OutOfRange))
        ));
        assert!(SecretKey::from_hex_str("not hex").is_err());
    }

    #[test]
    fn debug_output_is_redacted() {
        let sk = SecretKey::set_array(&[5, 0, 0, 0]).expect("key");
        assert_eq!(format!("{sk:?}"), "SecretKey(<redacted>)");
    }

    #[test]
    fn serde_uses_hex_string() {
        let sk = SecretKey::set_array(&[255, 0, 0, 0]).expect("key");
        let json = serde_json::to_string(&sk).expect("to json");
        assert_eq!(json, "\"ff\"");
        let back: SecretKey = serde_json::from_str(&json).expect("from json");
        assert!(back.is_same(&sk));
    }

    #[test]
    fn master_public_key_matches_each_coefficient() {
        let mut rng = StdRng::seed_from_u64(10);
        let master = SecretKey::random(&mut rng)
            .master_secret_key(4, &mut rng)
            .expect("master");
        let mpk = master_public_key(&master);
        assert_eq!(mpk.len(), 4);
        for (sk, pk) in master.iter().zip(&mpk) {
            assert_eq!(&sk.public_key(), pk);
        }
    }
}
