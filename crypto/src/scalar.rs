use blst::{
    blst_bendian_from_scalar, blst_lendian_from_scalar, blst_scalar, blst_scalar_fr_check,
    blst_scalar_from_bendian, blst_scalar_from_le_bytes, blst_scalar_from_uint64,
    blst_sk_add_n_check, blst_sk_inverse, blst_sk_mul_n_check, blst_sk_sub_n_check,
};
use std::fmt;

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::bls::constants::{OP_UNIT_SIZE, SCALAR_BYTES};
use crate::error::{DecodeError, Error, Result};

/// Random bytes drawn per scalar; the excess over 32 bytes keeps the
/// reduction modulo r statistically uniform.
const WIDE_RANDOM_BYTES: usize = 64;

/// A scalar value in the BLS12-381 scalar field Fr.
///
/// Scalars are elements of the finite field Fr with order r, where r is a 255-bit prime.
/// They are used throughout this crate for:
/// - Secret keys and polynomial coefficients
/// - Participant ids (interpolation x-coordinates)
/// - Lagrange coefficients in threshold recovery
///
/// All arithmetic operations are performed modulo r. Every `Scalar` built by
/// this module is fully reduced, which the `blst_sk_*` routines rely on.
/// The field r is: 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001
///
/// A scalar may hold key material, so it is wiped on drop and its `Debug`
/// output is redacted.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Scalar {
    inner: blst_scalar,
}

impl Scalar {
    /// Creates a scalar from a 32-byte little-endian representation.
    ///
    /// Values larger than r are reduced modulo r.
    pub fn from_bytes_le(bytes: [u8; SCALAR_BYTES]) -> Self {
        Self::reduce_le(&bytes)
    }

    fn reduce_le(bytes: &[u8]) -> Self {
        let mut inner = blst_scalar::default();
        unsafe {
            blst_scalar_from_le_bytes(&mut inner, bytes.as_ptr(), bytes.len());
        }
        Self { inner }
    }

    /// Parses a canonical 32-byte big-endian encoding.
    ///
    /// # Errors
    /// Returns [`DecodeError::InvalidLength`] for any other length and
    /// [`DecodeError::OutOfRange`] when the value is not below r.
    pub fn from_bytes_be(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != SCALAR_BYTES {
            return Err(DecodeError::InvalidLength {
                expected: SCALAR_BYTES,
                actual: bytes.len(),
            });
        }
        let mut inner = blst_scalar::default();
        let canonical = unsafe {
            blst_scalar_from_bendian(&mut inner, bytes.as_ptr());
            blst_scalar_fr_check(&inner)
        };
        if !canonical {
            inner.b.zeroize();
            return Err(DecodeError::OutOfRange);
        }
        Ok(Self { inner })
    }

    /// Builds a scalar from exactly [`OP_UNIT_SIZE`] little-endian 64-bit limbs.
    ///
    /// # Errors
    /// [`Error::SizeMismatch`] on a wrong limb count, [`DecodeError::OutOfRange`]
    /// when the value is not below r.
    pub fn from_words(words: &[u64]) -> Result<Self> {
        if words.len() != OP_UNIT_SIZE {
            return Err(Error::SizeMismatch {
                expected: OP_UNIT_SIZE,
                actual: words.len(),
            });
        }
        let mut inner = blst_scalar::default();
        let canonical = unsafe {
            blst_scalar_from_uint64(&mut inner, words.as_ptr());
            blst_scalar_fr_check(&inner)
        };
        if !canonical {
            inner.b.zeroize();
            return Err(DecodeError::OutOfRange.into());
        }
        Ok(Self { inner })
    }

    /// Creates a scalar from a u64 value.
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0; SCALAR_BYTES];
        bytes[..8].copy_from_slice(&value.to_le_bytes());
        Self::from_bytes_le(bytes)
    }

    /// Generates a uniformly random non-zero scalar.
    ///
    /// # Arguments
    /// * `rng` - A cryptographically secure random number generator
    pub fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        let mut bytes = [0u8; WIDE_RANDOM_BYTES];
        loop {
            rng.fill_bytes(&mut bytes);
            let scalar = Self::reduce_le(&bytes);
            if !scalar.is_zero() {
                bytes.zeroize();
                return scalar;
            }
        }
    }

    /// Converts the scalar to its 32-byte little-endian representation.
    pub fn to_bytes_le(&self) -> [u8; SCALAR_BYTES] {
        let mut bytes = [0; SCALAR_BYTES];
        unsafe {
            blst_lendian_from_scalar(bytes.as_mut_ptr(), &self.inner);
        };
        bytes
    }

    /// Converts the scalar to its canonical 32-byte big-endian representation.
    pub fn to_bytes_be(&self) -> [u8; SCALAR_BYTES] {
        let mut bytes = [0; SCALAR_BYTES];
        unsafe {
            blst_bendian_from_scalar(bytes.as_mut_ptr(), &self.inner);
        };
        bytes
    }

    /// Parses a number written in base 10 or 16, without sign or prefix.
    ///
    /// # Errors
    /// [`DecodeError::InvalidNumber`] for malformed text and
    /// [`DecodeError::OutOfRange`] when the value is not below r.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, DecodeError> {
        let well_formed = !s.is_empty() && s.chars().all(|c| c.is_digit(radix));
        let mut value = well_formed
            .then(|| BigUint::parse_bytes(s.as_bytes(), radix))
            .flatten()
            .ok_or(DecodeError::InvalidNumber { radix })?;

        let digits = Zeroizing::new(value.to_bytes_be());
        wipe_biguint(&mut value);
        if digits.len() > SCALAR_BYTES {
            return Err(DecodeError::OutOfRange);
        }
        let mut bytes = Zeroizing::new([0u8; SCALAR_BYTES]);
        bytes[SCALAR_BYTES - digits.len()..].copy_from_slice(&digits);
        Self::from_bytes_be(&bytes[..])
    }

    /// Formats the scalar as a minimal-digit number in the given radix.
    pub fn to_str_radix(&self, radix: u32) -> String {
        let bytes = Zeroizing::new(self.to_bytes_be());
        let mut value = BigUint::from_bytes_be(&bytes[..]);
        let text = value.to_str_radix(radix);
        wipe_biguint(&mut value);
        text
    }

    /// Returns the additive identity element (zero) in the scalar field.
    pub fn zero() -> Self {
        Self {
            inner: blst_scalar::default(),
        }
    }

    /// Returns the multiplicative identity element (one) in the scalar field.
    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Checks whether this scalar is the additive identity (zero).
    pub fn is_zero(&self) -> bool {
        self.inner.b.iter().fold(0u8, |acc, b| acc | b) == 0
    }

    /// Performs modular addition: `(self + other) mod r`.
    pub fn add(&self, other: &Scalar) -> Scalar {
        let mut result = blst_scalar::default();
        unsafe {
            blst_sk_add_n_check(&mut result, &self.inner, &other.inner);
        }
        Scalar { inner: result }
    }

    /// Performs modular subtraction: `(self - other) mod r`.
    pub fn sub(&self, other: &Scalar) -> Scalar {
        let mut result = blst_scalar::default();
        unsafe {
            blst_sk_sub_n_check(&mut result, &self.inner, &other.inner);
        }
        Scalar { inner: result }
    }

    /// Performs modular multiplication: `(self * other) mod r`.
    pub fn mul(&self, other: &Scalar) -> Scalar {
        let mut result = blst_scalar::default();
        unsafe {
            blst_sk_mul_n_check(&mut result, &self.inner, &other.inner);
        }
        Scalar { inner: result }
    }

    /// Computes the modular inverse: `self^(-1) mod r`.
    ///
    /// # Returns
    /// - `Some(inverse)` if the scalar is non-zero
    /// - `None` if the scalar is zero (undefined inverse)
    pub fn inverse(&self) -> Option<Scalar> {
        if self.is_zero() {
            return None;
        }
        let mut result = blst_scalar::default();
        unsafe {
            blst_sk_inverse(&mut result, &self.inner);
        };
        Some(Scalar { inner: result })
    }

    /// Performs modular division: `(self * other^(-1)) mod r`.
    ///
    /// Returns `None` if `other` is zero.
    pub fn div(&self, other: &Scalar) -> Option<Scalar> {
        other.inverse().map(|inverse| self.mul(&inverse))
    }

    /// Returns a reference to the underlying `blst_scalar`.
    pub(crate) fn as_blst_scalar(&self) -> &blst_scalar {
        &self.inner
    }
}

impl Zeroize for Scalar {
    fn zeroize(&mut self) {
        self.inner.b.zeroize();
    }
}

impl Drop for Scalar {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for Scalar {}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Scalar(<redacted>)")
    }
}

/// Clears every limb of `value` in place.
///
/// Bits are cleared from the least significant end so the limb buffer is
/// only truncated once it is already all zero.
fn wipe_biguint(value: &mut BigUint) {
    for bit in 0..value.bits() {
        value.set_bit(bit, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bls::constants::CURVE_ORDER;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_scalar_arithmetic() {
        let a = Scalar::from_u64(5);
        let b = Scalar::from_u64(3);

        assert_eq!(a.add(&b), Scalar::from_u64(8));
        assert_eq!(a.sub(&b), Scalar::from_u64(2));
        assert_eq!(a.mul(&b), Scalar::from_u64(15));
    }

    #[test]
    fn test_sub_wraps_modulo_r() {
        let a = Scalar::from_u64(3);
        let b = Scalar::from_u64(5);
        let wrapped = a.sub(&b);
        assert_eq!(wrapped.add(&Scalar::from_u64(2)), Scalar::zero());
    }

    #[test]
    fn test_scalar_inverse() {
        let a = Scalar::from_u64(5);
        let a_inv = a.inverse().expect("Should have inverse");
        assert_eq!(a.mul(&a_inv), Scalar::one());
        assert!(Scalar::zero().inverse().is_none());
    }

    #[test]
    fn random_is_nonzero_and_varies() {
        let mut rng = StdRng::seed_from_u64(1);
        let a = Scalar::random(&mut rng);
        let b = Scalar::random(&mut rng);
        assert!(!a.is_zero());
        assert_ne!(a, b);
    }

    #[test]
    fn from_bytes_be_rejects_modulus() {
        let order = BigUint::parse_bytes(CURVE_ORDER.as_bytes(), 10).expect("order");
        let bytes = order.to_bytes_be();
        assert_eq!(bytes.len(), SCALAR_BYTES);
        assert!(matches!(
            Scalar::from_bytes_be(&bytes),
            Err(DecodeError::OutOfRange)
        ));
    }

    #[test]
    fn from_bytes_be_rejects_truncated_buffer() {
        let result = Scalar::from_bytes_be(&[1u8; 31]);
        assert!(matches!(
            result,
            Err(DecodeError::InvalidLength {
                expected: 32,
                actual: 31
            })
        ));
    }

    #[test]
    fn from_words_matches_from_u64() {
        let scalar = Scalar::from_words(&[42, 0, 0, 0]).expect("words");
        assert_eq!(scalar, Scalar::from_u64(42));

        let high = Scalar::from_words(&[0, 0, 0, 1]).expect("words");
        assert_eq!(high.to_str_radix(16), format!("1{}", "0".repeat(48)));
    }

    #[test]
    fn from_words_rejects_wrong_size() {
        let result = Scalar::from_words(&[1, 2, 3]);
        assert!(matches!(
            result,
            Err(Error::SizeMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn from_words_rejects_out_of_range() {
        let result = Scalar::from_words(&[u64::MAX; 4]);
        assert!(matches!(result, Err(Error::Decode(DecodeError::OutOfRange))));
    }

    #[test]
    fn radix_strings_are_minimal() {
        let scalar = Scalar::from_u64(255);
        assert_eq!(scalar.to_str_radix(10), "255");
        assert_eq!(scalar.to_str_radix(16), "ff");
        assert_eq!(Scalar::zero().to_str_radix(10), "0");
    }

    #[test]
    fn from_str_radix_rejects_malformed_text() {
        for (text, radix) in [("", 10), ("12a", 10), ("+5", 10), ("0x10", 16), ("1_0", 16)] {
            assert!(
                matches!(
                    Scalar::from_str_radix(text, radix),
                    Err(DecodeError::InvalidNumber { .. })
                ),
                "{text:?} should be rejected"
            );
        }
        assert!(matches!(
            Scalar::from_str_radix(CURVE_ORDER, 10),
            Err(DecodeError::OutOfRange)
        ));
    }

    #[test]
    fn zeroize_clears_value() {
        let mut scalar = Scalar::from_u64(99);
        scalar.zeroize();
        assert!(scalar.is_zero());
    }

    #[test]
    fn debug_output_is_redacted() {
        let scalar = Scalar::from_u64(0xdead_beef);
        assert_eq!(format!("{scalar:?}"), "Scalar(<redacted>)");
    }

    #[test]
    fn wipe_biguint_clears_large_values() {
        let mut value = BigUint::parse_bytes(CURVE_ORDER.as_bytes(), 10).expect("order");
        wipe_biguint(&mut value);
        assert_eq!(value, BigUint::default());
        assert_eq!(value.bits(), 0);
    }

    #[test]
    fn radix_roundtrip_survives_wiping() {
        let mut rng = StdRng::seed_from_u64(3);
        let scalar = Scalar::random(&mut rng);
        for radix in [10, 16] {
            let text = scalar.to_str_radix(radix);
            assert_eq!(Scalar::from_str_radix(&text, radix).expect("parse"), scalar);
        }
    }
}
