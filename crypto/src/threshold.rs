//! Dealer and combiner for a (t, n) threshold BLS deployment.
//!
//! The flow is:
//! 1. [`ThresholdScheme::trusted_setup`] samples a master secret, builds a
//!    degree-(t-1) polynomial and deals one share per id `1..=n`.
//! 2. Each holder signs independently with [`ThresholdScheme::partial_sign`].
//! 3. Any t partial signatures are combined with
//!    [`ThresholdScheme::aggregate`] into the master signature, which
//!    verifies under the master public key.

use rand::{CryptoRng, RngCore};
use slog::{Discard, Logger, o};

use crate::config::ThresholdConfig;
use crate::error::{Error, Result};
use crate::id::Id;
use crate::public_key::PublicKey;
use crate::secret_key::{SecretKey, master_public_key};
use crate::signature::Signature;

/// Key share for a participant.
#[derive(Clone, Debug)]
pub struct KeyShare {
    pub id: Id,
    pub secret_key: SecretKey,
    pub public_key: PublicKey,
}

impl KeyShare {
    pub fn public_share(&self) -> PublicShare {
        PublicShare {
            id: self.id.clone(),
            public_key: self.public_key,
        }
    }
}

/// Public half of a [`KeyShare`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicShare {
    pub id: Id,
    pub public_key: PublicKey,
}

/// Partial signature from a participant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartialSignature {
    pub id: Id,
    pub signature: Signature,
}

/// Output of a trusted setup.
#[derive(Clone, Debug)]
pub struct DealtKeys {
    /// Group public key, the commitment to the master secret.
    pub master_public_key: PublicKey,
    /// Commitments to every polynomial coefficient; entry 0 is the master
    /// public key.
    pub commitments: Vec<PublicKey>,
    pub shares: Vec<KeyShare>,
}

impl DealtKeys {
    /// Checks a share against the published coefficient commitments.
    pub fn verify_share(&self, share: &KeyShare) -> bool {
        match PublicKey::set(&self.commitments, &share.id) {
            Ok(expected) => {
                expected == share.public_key && share.secret_key.public_key() == expected
            }
            Err(_) => false,
        }
    }
}

/// BLS Threshold Signature Scheme
pub struct ThresholdScheme {
    threshold: usize,
    total_participants: usize,
    logger: Logger,
}

impl ThresholdScheme {
    /// # Errors
    /// [`Error::InvalidThreshold`] unless `1 <= threshold <= participants`.
    pub fn new(config: &ThresholdConfig, logger: Logger) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            threshold: config.threshold,
            total_participants: config.participants,
            logger: logger.new(o!(
                "component" => "threshold-bls",
                "threshold" => config.threshold,
                "participants" => config.participants
            )),
        })
    }

    /// Scheme that drops all log output.
    pub fn without_logging(config: &ThresholdConfig) -> Result<Self> {
        Self::new(config, Logger::root(Discard, o!()))
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn total_participants(&self) -> usize {
        self.total_participants
    }

    /// Trusted setup for the BLS threshold signature scheme
    pub fn trusted_setup<R: CryptoRng + RngCore>(&self, rng: &mut R) -> Result<DealtKeys> {
        let master_secret = SecretKey::random(rng);
        let master = master_secret.master_secret_key(self.threshold, rng)?;
        let commitments = master_public_key(&master);

        let mut shares = Vec::with_capacity(self.total_participants);
        for index in 1..=self.total_participants as u64 {
            let id = Id::from_u64(index);
            let secret_key = SecretKey::set(&master, &id)?;
            let public_key = secret_key.public_key();
            shares.push(KeyShare {
                id,
                secret_key,
                public_key,
            });
        }

        slog::debug!(self.logger, "Trusted setup complete"; "shares" => shares.len());

        Ok(DealtKeys {
            master_public_key: commitments[0],
            commitments,
            shares,
        })
    }

    pub fn partial_sign(key_share: &KeyShare, message: &[u8]) -> PartialSignature {
        PartialSignature {
            id: key_share.id.clone(),
            signature: key_share.secret_key.sign(message),
        }
    }

    /// Combines partial signatures into the master signature.
    ///
    /// Uses exactly the first `threshold` partials.
    ///
    /// # Errors
    /// [`Error::InsufficientShares`] when fewer than `threshold` partials are
    /// supplied, or an id error from interpolation.
    pub fn aggregate(&self, partial_signatures: &[PartialSignature]) -> Result<Signature> {
        self.check_share_count(partial_signatures.len(), "signature")?;

        let sigs_to_use = &partial_signatures[..self.threshold];
        let ids: Vec<Id> = sigs_to_use.iter().map(|ps| ps.id.clone()).collect();
        let signatures: Vec<Signature> = sigs_to_use.iter().map(|ps| ps.signature).collect();

        let signature = Signature::recover(&signatures, &ids).inspect_err(|e| {
            slog::warn!(self.logger, "Signature recovery failed"; "error" => %e);
        })?;
        slog::debug!(self.logger, "Aggregated partial signatures"; "ids" => ?ids);
        Ok(signature)
    }

    /// Recovers the master public key from public key shares.
    ///
    /// Uses exactly the first `threshold` shares.
    pub fn recover_public_key(&self, shares: &[PublicShare]) -> Result<PublicKey> {
        self.check_share_count(shares.len(), "public key")?;

        let shares_to_use = &shares[..self.threshold];
        let ids: Vec<Id> = shares_to_use.iter().map(|s| s.id.clone()).collect();
        let public_keys: Vec<PublicKey> = shares_to_use.iter().map(|s| s.public_key).collect();

        PublicKey::recover(&public_keys, &ids)
    }

    /// Verify a signature
    pub fn verify(public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        signature.verify(public_key, message)
    }

    fn check_share_count(&self, got: usize, kind: &'static str) -> Result<()> {
        if got < self.threshold {
            slog::warn!(
                self.logger,
                "Not enough shares to recover";
                "kind" => kind,
                "got" => got
            );
            return Err(Error::InsufficientShares {
                required: self.threshold,
                got,
            });
        }
        Ok(())
    }
}
