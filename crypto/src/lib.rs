//! (t, n) threshold BLS signatures over BLS12-381.
//!
//! A dealer turns a secret key into a degree-(t-1) polynomial and hands out
//! its evaluations at participant [`Id`]s. Any t shares recover the secret
//! ([`SecretKey::recover`]), the group public key ([`PublicKey::recover`]) or
//! a signature ([`Signature::recover`]) by Lagrange interpolation at zero.
//!
//! Public keys live in G1 and signatures in G2. Point and pairing arithmetic
//! comes from `blst`.
//!
//! ```no_run
//! use threshold_bls::{Id, SecretKey, Signature};
//!
//! let mut rng = rand::thread_rng();
//! let secret = SecretKey::random(&mut rng);
//! let master = secret.master_secret_key(2, &mut rng)?;
//!
//! let ids = [Id::from_u64(1), Id::from_u64(3)];
//! let mut partials = Vec::new();
//! for id in &ids {
//!     partials.push(SecretKey::set(&master, id)?.sign(b"hello"));
//! }
//!
//! let signature = Signature::recover(&partials, &ids)?;
//! assert!(signature.verify(&secret.public_key(), b"hello"));
//! # Ok::<(), threshold_bls::Error>(())
//! ```

pub mod bls;
pub mod config;
pub mod error;
pub mod group;
pub mod id;
pub mod polynomial;
pub mod public_key;
pub mod scalar;
pub mod secret_key;
pub mod signature;
pub mod threshold;
pub mod threshold_math;

pub use bls::constants::{OP_UNIT_SIZE, PUBLIC_KEY_BYTES, SCALAR_BYTES, SIGNATURE_BYTES};
pub use config::ThresholdConfig;
pub use error::{DecodeError, Error, Result};
pub use id::Id;
pub use public_key::PublicKey;
pub use secret_key::{SecretKey, master_public_key};
pub use signature::Signature;
pub use threshold::{DealtKeys, KeyShare, PartialSignature, PublicShare, ThresholdScheme};

/// Order `r` of the scalar field, in decimal.
pub fn curve_order() -> &'static str {
    bls::constants::CURVE_ORDER
}

/// Characteristic `p` of the base field, in decimal.
pub fn field_order() -> &'static str {
    bls::constants::FIELD_ORDER
}
