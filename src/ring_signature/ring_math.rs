//! The `ring_math` module holds the challenge function and the chain walk
//! shared by signing, partial signing and verification.
use super::check_ring;
use crate::config::SignatureConfig;
use crate::curves::Curve;
use crate::errors::{Error, Result};
use crate::point::Point;
use crate::rand_nonce::{random_index, random_scalar, RandomNonce};
use num_bigint::BigUint;
use num_traits::Zero;

/// Text hashed for a point: its canonical text, or `x ‖ y` in decimal when
/// EVM compatibility is requested.
pub fn format_point(point: &Point, config: &SignatureConfig) -> String {
    if config.is_evm_compatible() {
        format!("{}{}", point.x(), point.y())
    } else {
        point.to_canonical_text()
    }
}

/// Concatenation of [`format_point`] over the ring, in ring order.
pub fn format_ring(ring: &[Point], config: &SignatureConfig) -> String {
    ring.iter().map(|point| format_point(point, config)).collect()
}

/// Input of one challenge computation.
pub(crate) enum ChainLink<'a> {
    /// Seeds the chain with the signer's commitment `alpha·G`.
    Seed { alpha_commitment: &'a Point },
    /// Commitment `r·G + c·K` of the previous ring member.
    Step {
        response: &'a BigUint,
        previous_c: &'a BigUint,
        previous_public_key: &'a Point,
    },
}

/// Everything a challenge depends on besides the link itself, computed once per ring.
pub(crate) struct ChallengeContext {
    ring_text: String,
    message_digest: String,
    curve: Curve,
    config: SignatureConfig,
}

impl ChallengeContext {
    pub(crate) fn new(
        ring: &[Point],
        message: &str,
        curve: Curve,
        config: SignatureConfig,
    ) -> Self {
        ChallengeContext {
            ring_text: format_ring(ring, &config),
            message_digest: config.hash_function().hash(message),
            curve,
            config,
        }
    }

    /// c = hash(ring ‖ digest ‖ commitment) mod N
    pub(crate) fn challenge(&self, link: ChainLink) -> Result<BigUint> {
        let commitment = match link {
            ChainLink::Seed { alpha_commitment } => alpha_commitment.clone(),
            ChainLink::Step {
                response,
                previous_c,
                previous_public_key,
            } => self
                .curve
                .generator()
                .mult(response)?
                .add(&previous_public_key.mult(previous_c)?)?,
        };
        let digest = self.config.hash_function().hash(&format!(
            "{}{}{}",
            self.ring_text,
            self.message_digest,
            format_point(&commitment, &self.config)
        ));
        let value = BigUint::parse_bytes(digest.as_bytes(), 16)
            .ok_or_else(|| Error::Decode(format!("hash output is not hex: {digest}")))?;
        Ok(value % self.curve.n())
    }

    /// Walks the whole ring from `(responses[0], c, ring[0])` and returns the
    /// challenge the walk lands on.
    pub(crate) fn replay(
        &self,
        ring: &[Point],
        responses: &[BigUint],
        c: &BigUint,
    ) -> Result<BigUint> {
        let mut current = c.clone();
        for (response, public_key) in responses.iter().zip(ring) {
            current = self.challenge(ChainLink::Step {
                response,
                previous_c: &current,
                previous_public_key: public_key,
            })?;
        }
        Ok(current)
    }
}

/// A ring with the signer spliced in and every challenge computed. The
/// response at `signer_index` is a random placeholder.
pub(crate) struct RawSignature {
    pub ring: Vec<Point>,
    pub cees: Vec<BigUint>,
    pub responses: Vec<BigUint>,
    pub signer_index: usize,
    pub alpha: RandomNonce,
}

impl RawSignature {
    /// Inserts `signer_public_key` at a random index of `ring` and builds the
    /// challenge chain, seeded right after the signer.
    ///
    /// Randomness is drawn in a fixed order: `alpha`, the insertion index,
    /// then one response per slot.
    pub(crate) fn build<R>(
        ring: &[Point],
        signer_public_key: &Point,
        message: &str,
        curve: Curve,
        config: SignatureConfig,
        rng: &mut R,
    ) -> Result<RawSignature>
    where
        R: rand::CryptoRng + rand::RngCore,
    {
        let alpha = RandomNonce::new_rand(&curve, rng)?;
        let signer_index = random_index(ring.len(), rng)?;

        let mut ring = ring.to_vec();
        ring.insert(signer_index, signer_public_key.clone());
        check_ring(&ring, Some(&curve))?;
        if config.is_safe_mode() {
            ring.iter().try_for_each(Point::check_low_order)?;
        }

        let len = ring.len();
        let responses = (0..len)
            .map(|_| random_scalar(&curve, rng))
            .collect::<Result<Vec<_>>>()?;

        let context = ChallengeContext::new(&ring, message, curve, config);
        let mut cees = vec![BigUint::zero(); len];
        cees[(signer_index + 1) % len] = context.challenge(ChainLink::Seed {
            alpha_commitment: &alpha.r_public,
        })?;
        for i in ((signer_index + 1)..(signer_index + len)).map(|i| i % len) {
            let next = context.challenge(ChainLink::Step {
                response: &responses[i],
                previous_c: &cees[i],
                previous_public_key: &ring[i],
            })?;
            cees[(i + 1) % len] = next;
        }

        Ok(RawSignature {
            ring,
            cees,
            responses,
            signer_index,
            alpha,
        })
    }

    pub(crate) fn signer_challenge(&self) -> &BigUint {
        &self.cees[self.signer_index]
    }
}
