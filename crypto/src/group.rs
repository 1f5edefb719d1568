//! Abelian groups the threshold layer combines over.
//!
//! Polynomial evaluation and Lagrange interpolation only need addition and
//! multiplication by a scalar, so they are written once against
//! [`GroupElement`] and reused for the scalar field, G1 and G2.

use std::fmt;

use blst::{
    BLST_ERROR, blst_hash_to_g2, blst_p1, blst_p1_add_or_double, blst_p1_affine,
    blst_p1_affine_in_g1, blst_p1_compress, blst_p1_from_affine, blst_p1_is_equal,
    blst_p1_is_inf, blst_p1_mult, blst_p1_uncompress, blst_p2, blst_p2_add_or_double,
    blst_p2_affine, blst_p2_affine_in_g2, blst_p2_compress, blst_p2_from_affine,
    blst_p2_is_equal, blst_p2_is_inf, blst_p2_mult, blst_p2_uncompress,
};

use crate::bls::constants::{PUBLIC_KEY_BYTES, SCALAR_BITS, SIGNATURE_BYTES};
use crate::error::DecodeError;
use crate::scalar::Scalar;

/// An element of an additive abelian group with a scalar action by Fr.
pub trait GroupElement: Clone {
    /// The additive identity.
    fn identity() -> Self;

    /// Group addition.
    fn add_element(&self, other: &Self) -> Self;

    /// Multiplication by a scalar.
    fn mul_scalar(&self, scalar: &Scalar) -> Self;
}

impl GroupElement for Scalar {
    fn identity() -> Self {
        Scalar::zero()
    }

    fn add_element(&self, other: &Self) -> Self {
        self.add(other)
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        self.mul(scalar)
    }
}

/// A point of the BLS12-381 G1 group, in projective form.
#[derive(Clone, Copy, Default)]
pub struct G1Point {
    inner: blst_p1,
}

impl G1Point {
    /// Compressed encoding width.
    pub const BYTES: usize = PUBLIC_KEY_BYTES;

    pub(crate) fn from_blst(inner: blst_p1) -> Self {
        Self { inner }
    }

    pub fn is_identity(&self) -> bool {
        unsafe { blst_p1_is_inf(&self.inner) }
    }

    /// Compressed 48-byte encoding.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        let mut bytes = [0u8; PUBLIC_KEY_BYTES];
        unsafe {
            blst_p1_compress(bytes.as_mut_ptr(), &self.inner);
        }
        bytes
    }

    /// Decodes a compressed point and checks subgroup membership.
    ///
    /// # Errors
    /// Returns an error when the length is wrong, the encoding is invalid,
    /// or the point is not in G1.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != PUBLIC_KEY_BYTES {
            return Err(DecodeError::InvalidLength {
                expected: PUBLIC_KEY_BYTES,
                actual: bytes.len(),
            });
        }
        let mut affine = blst_p1_affine::default();
        unsafe {
            let res = blst_p1_uncompress(&mut affine, bytes.as_ptr());
            if res != BLST_ERROR::BLST_SUCCESS {
                return Err(DecodeError::InvalidPoint(format!("{res:?}")));
            }
            if !blst_p1_affine_in_g1(&affine) {
                return Err(DecodeError::NotInGroup);
            }
        }
        let mut inner = blst_p1::default();
        unsafe {
            blst_p1_from_affine(&mut inner, &affine);
        }
        Ok(Self { inner })
    }
}

impl GroupElement for G1Point {
    fn identity() -> Self {
        Self::default()
    }

    fn add_element(&self, other: &Self) -> Self {
        let mut out = blst_p1::default();
        unsafe {
            blst_p1_add_or_double(&mut out, &self.inner, &other.inner);
        }
        Self { inner: out }
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        let mut out = blst_p1::default();
        unsafe {
            blst_p1_mult(
                &mut out,
                &self.inner,
                scalar.to_bytes_le().as_ptr(),
                SCALAR_BITS,
            );
        }
        Self { inner: out }
    }
}

impl PartialEq for G1Point {
    fn eq(&self, other: &Self) -> bool {
        unsafe { blst_p1_is_equal(&self.inner, &other.inner) }
    }
}

impl Eq for G1Point {}

impl fmt::Debug for G1Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G1Point({})", hex::encode(self.to_bytes()))
    }
}

/// A point of the BLS12-381 G2 group, in projective form.
#[derive(Clone, Copy, Default)]
pub struct G2Point {
    inner: blst_p2,
}

impl G2Point {
    /// Compressed encoding width.
    pub const BYTES: usize = SIGNATURE_BYTES;

    pub(crate) fn from_blst(inner: blst_p2) -> Self {
        Self { inner }
    }

    pub(crate) fn as_blst(&self) -> &blst_p2 {
        &self.inner
    }

    /// Hashes `message` to G2 with hash-to-curve under `dst`.
    pub fn hash(message: &[u8], dst: &[u8]) -> Self {
        let mut inner = blst_p2::default();
        unsafe {
            blst_hash_to_g2(
                &mut inner,
                message.as_ptr(),
                message.len(),
                dst.as_ptr(),
                dst.len(),
                std::ptr::null(),
                0,
            );
        }
        Self { inner }
    }

    pub fn is_identity(&self) -> bool {
        unsafe { blst_p2_is_inf(&self.inner) }
    }

    /// Compressed 96-byte encoding.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_BYTES] {
        let mut bytes = [0u8; SIGNATURE_BYTES];
        unsafe {
            blst_p2_compress(bytes.as_mut_ptr(), &self.inner);
        }
        bytes
    }

    /// Decodes a compressed point and checks subgroup membership.
    ///
    /// # Errors
    /// Returns an error when the length is wrong, the encoding is invalid,
    /// or the point is not in G2.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() != SIGNATURE_BYTES {
            return Err(DecodeError::InvalidLength {
                expected: SIGNATURE_BYTES,
                actual: bytes.len(),
            });
        }
        let mut affine = blst_p2_affine::default();
        unsafe {
            let res = blst_p2_uncompress(&mut affine, bytes.as_ptr());
            if res != BLST_ERROR::BLST_SUCCESS {
                return Err(DecodeError::InvalidPoint(format!("{res:?}")));
            }
            if !blst_p2_affine_in_g2(&affine) {
                return Err(DecodeError::NotInGroup);
            }
        }
        let mut inner = blst_p2::default();
        unsafe {
            blst_p2_from_affine(&mut inner, &affine);
        }
        Ok(Self { inner })
    }
}

impl GroupElement for G2Point {
    fn identity() -> Self {
        Self::default()
    }

    fn add_element(&self, other: &Self) -> Self {
        let mut out = blst_p2::default();
        unsafe {
            blst_p2_add_or_double(&mut out, &self.inner, &other.inner);
        }
        Self { inner: out }
    }

    fn mul_scalar(&self, scalar: &Scalar) -> Self {
        let mut out = blst_p2::default();
        unsafe {
            blst_p2_mult(
                &mut out,
                &self.inner,
                scalar.to_bytes_le().as_ptr(),
                SCALAR_BITS,
            );
        }
        Self { inner: out }
    }
}

impl PartialEq for G2Point {
    fn eq(&self, other: &Self) -> bool {
        unsafe { blst_p2_is_equal(&self.inner, &other.inner) }
    }
}

impl Eq for G2Point {}

impl fmt::Debug for G2Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G2Point({})", hex::encode(self.to_bytes()))
    }
}
