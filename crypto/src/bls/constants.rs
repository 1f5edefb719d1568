//! Shared constants for BLS12-381 threshold signing in this crate.
//!
//! Public keys live in G1 and signatures in G2 (the "minimal public key
//! size" layout), following the IETF proof-of-possession ciphersuite.

/// Domain separation tag used when hashing messages for signing.
///
/// This must remain stable across all share holders of a key. Changing it
/// breaks compatibility with existing signatures.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Domain separation tag used for proofs of possession.
pub const POP_DST: &[u8] = b"BLS_POP_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// Compressed byte length of a BLS12-381 G1 public key.
pub const PUBLIC_KEY_BYTES: usize = 48;

/// Compressed byte length of a BLS12-381 G2 signature.
pub const SIGNATURE_BYTES: usize = 96;

/// Byte length of a serialized scalar (secret key or id).
pub const SCALAR_BYTES: usize = 32;

/// Number of 64-bit limbs in a scalar.
pub const OP_UNIT_SIZE: usize = 4;

/// Bit length used for scalar multiplication in BLST operations.
///
/// For BLS12-381 Fr this is 255 bits.
pub const SCALAR_BITS: usize = 255;

/// Order `r` of the BLS12-381 scalar field, in decimal.
pub const CURVE_ORDER: &str =
    "52435875175126190479447740508185965837690552500527637822603658699938581184513";

/// Characteristic `p` of the BLS12-381 base field, in decimal.
pub const FIELD_ORDER: &str = "4002409555221667393417789825735904156556882819939007885332058136124031650490837864442687629129015664037894272559787";
