use blst::{
    BLST_ERROR, blst_p1, blst_p2, blst_sign_pk_in_g1, blst_sk_to_pk_in_g1,
    min_pk::{PublicKey, Signature},
};

use crate::group::{G1Point, G2Point};
use crate::scalar::Scalar;

/// Derives the public key point `scalar * G1`.
///
/// Goes through blst's key derivation entry point, which is constant-time in
/// the scalar.
pub fn public_key_from_scalar(scalar: &Scalar) -> G1Point {
    let mut pk_point = blst_p1::default();
    unsafe {
        blst_sk_to_pk_in_g1(&mut pk_point, scalar.as_blst_scalar());
    }
    G1Point::from_blst(pk_point)
}

/// Signs `message` under `dst` with `secret_scalar`.
///
/// This hashes the message to G2 and multiplies by the scalar using blst's
/// constant-time signing routine.
pub fn sign_with_scalar(secret_scalar: &Scalar, message: &[u8], dst: &[u8]) -> G2Point {
    let hash_point = G2Point::hash(message, dst);
    let mut sig_point = blst_p2::default();
    unsafe {
        blst_sign_pk_in_g1(
            &mut sig_point,
            hash_point.as_blst(),
            secret_scalar.as_blst_scalar(),
        );
    }
    G2Point::from_blst(sig_point)
}

/// Checks `e(public_key, H(message)) == e(G1, signature)` under `dst`.
///
/// Both points are group-checked, and an identity public key is rejected.
/// Any failure, including a malformed input, is reported as
/// `Err(BLST_ERROR)`.
pub fn verify_signature(
    public_key: &G1Point,
    message: &[u8],
    signature: &G2Point,
    dst: &[u8],
) -> Result<(), BLST_ERROR> {
    let pk = PublicKey::from_bytes(&public_key.to_bytes())?;
    let sig = Signature::from_bytes(&signature.to_bytes())?;

    let result = sig.verify(true, message, dst, &[], &pk, true);
    if result == BLST_ERROR::BLST_SUCCESS {
        Ok(())
    } else {
        Err(result)
    }
}
