//! Ring signatures: prove that one member of a ring of public keys signed a
//! message without revealing which one.
//!
//! A signature carries the ring, the seed challenge `c` and one response per
//! ring member. Verification walks the challenge chain once around the ring
//! and accepts when it lands back on `c`.

pub mod partial;
pub mod ring_math;
pub mod wire_messages;

use crate::config::SignatureConfig;
use crate::curves::Curve;
use crate::errors::{Error, Result};
use crate::keys_management::{derive_public_key, PrivateKey};
use crate::modular::mod_add;
use crate::pi_signature::{pi_signature, verify_pi_signature};
use crate::point::Point;
use crate::rand_nonce::random_scalar;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use ring_math::{ChallengeContext, RawSignature};
use std::collections::HashSet;
use wire_messages::{
    parse_decimal, parse_decimals, parse_ring, ring_texts, to_decimals, RingSignatureMessage,
    WireMessage,
};

/// A finished ring signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingSignature {
    message: String,
    ring: Vec<Point>,
    c: BigUint,
    responses: Vec<BigUint>,
    curve: Curve,
    config: Option<SignatureConfig>,
}

impl RingSignature {
    /// Builds a ring signature from its parts.
    ///
    /// Fails if the ring is empty, if ring and responses differ in length, if
    /// the ring holds duplicates or points that are off `curve` or have a zero
    /// coordinate, or if a response is outside of `[1, N)`. In safe mode
    /// low-order ring members are rejected as well.
    pub fn new(
        message: impl Into<String>,
        ring: Vec<Point>,
        c: BigUint,
        responses: Vec<BigUint>,
        curve: Curve,
        config: Option<SignatureConfig>,
    ) -> Result<RingSignature> {
        if ring.is_empty() {
            return Err(Error::EmptyRing);
        }
        if ring.len() != responses.len() {
            return Err(Error::LengthMismatch {
                ring: ring.len(),
                responses: responses.len(),
            });
        }
        check_ring(&ring, Some(&curve))?;
        if let Some(index) = responses
            .iter()
            .position(|response| response.is_zero() || response >= curve.n())
        {
            return Err(Error::InvalidResponse(index));
        }
        if &c >= curve.n() {
            return Err(Error::InvalidScalar(format!(
                "seed challenge {c} is not in [0, N) for {curve}"
            )));
        }
        if config.unwrap_or_default().is_safe_mode() {
            ring.iter().try_for_each(Point::check_low_order)?;
        }

        Ok(RingSignature {
            message: message.into(),
            ring,
            c,
            responses,
            curve,
            config,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    pub fn c(&self) -> &BigUint {
        &self.c
    }

    pub fn responses(&self) -> &[BigUint] {
        &self.responses
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn config(&self) -> Option<&SignatureConfig> {
        self.config.as_ref()
    }

    /// Signs `message` for `ring` with `private_key`.
    ///
    /// The signer's public key is inserted at a random position of the ring,
    /// so the signature ring holds `ring.len() + 1` members. An empty ring
    /// yields a one-member signature closed with the Schnorr response alone.
    ///
    /// # Arguments
    ///
    /// * `ring` - The other ring members (without the signer's public key).
    /// * `private_key` - The signer's private key.
    /// * `message` - The message to be signed.
    /// * `curve` - The curve the ring lives on.
    /// * `config` - Hash function and formatting options.
    /// * `rng` - A cryptographically secure randomness source.
    ///
    #[tracing::instrument(
        name = "Signing the message with a ring signature",
        skip_all,
        fields(curve = %curve, ring_size = ring.len())
    )]
    pub fn sign<R>(
        ring: &[Point],
        private_key: &PrivateKey,
        message: &str,
        curve: Curve,
        config: Option<SignatureConfig>,
        rng: &mut R,
    ) -> Result<RingSignature>
    where
        R: rand::CryptoRng + rand::RngCore,
    {
        let public_key = derive_public_key(private_key, &curve)?;

        if ring.is_empty() {
            let c = random_scalar(&curve, rng)?;
            let alpha = degenerate_alpha(&c, &curve);
            let response = pi_signature(&alpha, &c, private_key, &curve)?;
            return RingSignature::new(message, vec![public_key], c, vec![response], curve, config);
        }

        let raw = RawSignature::build(
            ring,
            &public_key,
            message,
            curve,
            config.unwrap_or_default(),
            rng,
        )?;
        let signer_response = pi_signature(
            &raw.alpha.expose_scalar(),
            raw.signer_challenge(),
            private_key,
            &curve,
        )?;

        let RawSignature {
            ring,
            mut cees,
            mut responses,
            signer_index,
            ..
        } = raw;
        responses[signer_index] = signer_response;
        RingSignature::new(message, ring, cees.swap_remove(0), responses, curve, config)
    }

    /// Finishes a partial signature with the response of the external signer.
    pub fn combine(
        partial_signature: partial::PartialSignature,
        signer_response: BigUint,
    ) -> Result<RingSignature> {
        partial_signature.combine(signer_response)
    }

    /// Verifies the signature.
    ///
    /// Returns `Ok(false)` for a signature that does not check out, and an
    /// error only when the ring is empty or ring and responses differ in length.
    #[tracing::instrument(
        name = "Verifying the ring signature",
        skip_all,
        fields(curve = %self.curve, ring_size = self.ring.len())
    )]
    pub fn verify(&self) -> Result<bool> {
        if self.ring.is_empty() {
            return Err(Error::EmptyRing);
        }
        if self.ring.len() != self.responses.len() {
            return Err(Error::LengthMismatch {
                ring: self.ring.len(),
                responses: self.responses.len(),
            });
        }

        if self.ring.len() == 1 {
            let alpha = degenerate_alpha(&self.c, &self.curve);
            return Ok(verify_pi_signature(
                &self.ring[0],
                &self.responses[0],
                &alpha,
                &self.c,
                &self.curve,
            ));
        }

        let context = ChallengeContext::new(
            &self.ring,
            &self.message,
            self.curve,
            self.config.unwrap_or_default(),
        );
        match context.replay(&self.ring, &self.responses, &self.c) {
            Ok(last) => Ok(last == self.c),
            Err(err) => {
                tracing::warn!("challenge chain could not be replayed: {err}");
                Ok(false)
            }
        }
    }

    /// Parses a signature from its canonical text and verifies it.
    pub fn verify_json(text: &str) -> Result<bool> {
        RingSignature::from_canonical_text(text)?.verify()
    }

    fn to_message(&self) -> RingSignatureMessage {
        RingSignatureMessage {
            message: self.message.clone(),
            ring: ring_texts(&self.ring),
            c: self.c.to_string(),
            responses: to_decimals(&self.responses),
            curve: self.curve.to_canonical_text(),
            config: self.config,
        }
    }

    fn from_message(message: RingSignatureMessage) -> Result<RingSignature> {
        RingSignature::new(
            message.message,
            parse_ring(&message.ring)?,
            parse_decimal(&message.c)?,
            parse_decimals(&message.responses)?,
            Curve::from_canonical_text(&message.curve)?,
            message.config,
        )
    }

    pub fn to_canonical_text(&self) -> String {
        self.to_message().to_json()
    }

    pub fn from_canonical_text(text: &str) -> Result<RingSignature> {
        RingSignature::from_message(RingSignatureMessage::from_json(text)?)
    }

    pub fn to_base64(&self) -> String {
        self.to_message().to_base64()
    }

    pub fn from_base64(base64: &str) -> Result<RingSignature> {
        RingSignature::from_message(RingSignatureMessage::from_base64(base64)?)
    }
}

/// alpha = 2c + 1 (mod N), the commitment scalar of a one-member ring.
fn degenerate_alpha(c: &BigUint, curve: &Curve) -> BigUint {
    let n = curve.n();
    mod_add(&mod_add(c, c, n), &BigUint::one(), n)
}

/// Checks that a ring is usable: non-empty, free of duplicates and made of
/// valid points of `reference` (the first member's curve when `None`).
pub fn check_ring(ring: &[Point], reference: Option<&Curve>) -> Result<()> {
    let first = ring.first().ok_or(Error::EmptyRing)?;
    let reference = reference.unwrap_or_else(|| first.curve());

    let mut seen = HashSet::with_capacity(ring.len());
    if !ring.iter().all(|point| seen.insert(point)) {
        tracing::debug!("rejecting ring with duplicate members");
        return Err(Error::DuplicateRingMember);
    }
    ring.iter().try_for_each(|point| check_point(point, reference))
}

/// Checks that `point` is a point of `curve` with non-zero coordinates.
pub fn check_point(point: &Point, curve: &Curve) -> Result<()> {
    if point.curve() != curve {
        return Err(Error::CurveMismatch(format!(
            "{} point in a {} ring",
            point.curve(),
            curve
        )));
    }
    if !point.is_valid() {
        return Err(Error::NotOnCurve(format!("[{}, {}]", point.x(), point.y())));
    }
    if point.x().is_zero() || point.y().is_zero() {
        return Err(Error::InvalidPoint(format!(
            "[{}, {}] has a zero coordinate",
            point.x(),
            point.y()
        )));
    }
    Ok(())
}
