//! This module defines the partial signing handshake: a party that only knows
//! the signer's public key prepares the whole ring signature except the
//! signer's own response, which the key holder later supplies to `combine`.
use super::ring_math::RawSignature;
use super::wire_messages::{
    parse_decimal, parse_decimals, parse_ring, ring_texts, to_decimals, PartialSignatureMessage,
    WireMessage,
};
use super::RingSignature;
use crate::config::SignatureConfig;
use crate::curves::Curve;
use crate::errors::{Error, Result};
use crate::point::Point;
use crate::rand_nonce::{expose_scalar, to_secret, SecretScalar};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::fmt;

/// A ring signature waiting for the signer's response.
///
/// `pi` (the signer's position) and `alpha` (the chain nonce) are secret.
/// The value is consumed by [`PartialSignature::combine`] and cannot be cloned.
pub struct PartialSignature {
    message: String,
    ring: Vec<Point>,
    c: BigUint,
    cpi: BigUint,
    responses: Vec<BigUint>,
    pi: usize,
    alpha: SecretScalar,
    curve: Curve,
    config: Option<SignatureConfig>,
}

impl fmt::Debug for PartialSignature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // pi and alpha are not printed
        f.debug_struct("PartialSignature")
            .field("message", &self.message)
            .field("ring", &self.ring)
            .field("c", &self.c)
            .field("cpi", &self.cpi)
            .field("curve", &self.curve)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Prepares a ring signature for `signer_public_key` without its private key.
///
/// Fails with [`Error::EmptyRing`] when `ring` is empty.
///
/// # Arguments
///
/// * `ring` - The other ring members (without the signer's public key).
/// * `message` - The message to be signed.
/// * `signer_public_key` - The public key of the external signer.
/// * `curve` - The curve the ring lives on.
/// * `config` - Hash function and formatting options.
/// * `rng` - A cryptographically secure randomness source.
///
#[tracing::instrument(
    name = "Preparing a partial ring signature",
    skip_all,
    fields(curve = %curve, ring_size = ring.len())
)]
pub fn partial_sign<R>(
    ring: &[Point],
    message: &str,
    signer_public_key: &Point,
    curve: Curve,
    config: Option<SignatureConfig>,
    rng: &mut R,
) -> Result<PartialSignature>
where
    R: rand::CryptoRng + rand::RngCore,
{
    if ring.is_empty() {
        return Err(Error::EmptyRing);
    }
    let raw = RawSignature::build(
        ring,
        signer_public_key,
        message,
        curve,
        config.unwrap_or_default(),
        rng,
    )?;
    let cpi = raw.signer_challenge().clone();
    let RawSignature {
        ring,
        mut cees,
        responses,
        signer_index,
        alpha,
    } = raw;

    Ok(PartialSignature {
        message: message.to_string(),
        ring,
        c: cees.swap_remove(0),
        cpi,
        responses,
        pi: signer_index,
        alpha: alpha.r_private,
        curve,
        config,
    })
}

impl PartialSignature {
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn ring(&self) -> &[Point] {
        &self.ring
    }

    pub fn c(&self) -> &BigUint {
        &self.c
    }

    /// Challenge at the signer's position, needed to compute the signer response.
    pub fn cpi(&self) -> &BigUint {
        &self.cpi
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

    /// Position of the signer in the ring.
    pub fn signer_index(&self) -> usize {
        self.pi
    }

    /// The chain nonce, needed to compute the signer response.
    pub fn expose_alpha(&self) -> BigUint {
        expose_scalar(&self.alpha)
    }

    /// Splices `signer_response` in at the signer's position.
    ///
    /// No cryptographic check happens here: a response inconsistent with
    /// `alpha` and `cpi` yields a signature that fails to verify.
    #[tracing::instrument(
        name = "Combining the partial signature with the signer response",
        skip_all,
        fields(curve = %self.curve, ring_size = self.ring.len())
    )]
    pub fn combine(self, signer_response: BigUint) -> Result<RingSignature> {
        let PartialSignature {
            message,
            ring,
            c,
            mut responses,
            pi,
            curve,
            config,
            ..
        } = self;
        let slot = responses.get_mut(pi).ok_or_else(|| {
            Error::Range(format!("signer index {pi} is outside of the ring"))
        })?;
        *slot = signer_response;
        RingSignature::new(message, ring, c, responses, curve, config)
    }

    /// Base64 of the json form. `config` is carried as nested json text.
    pub fn to_base64(&self) -> String {
        let message = PartialSignatureMessage {
            message: self.message.clone(),
            ring: ring_texts(&self.ring),
            c: self.c.to_string(),
            cpi: self.cpi.to_string(),
            responses: to_decimals(&self.responses),
            pi: self.pi.to_string(),
            alpha: self.expose_alpha().to_string(),
            curve: self.curve.to_canonical_text(),
            config: self.config.map(|config| {
                serde_json::to_string(&config).expect("signature configs are always serializable")
            }),
        };
        message.to_base64()
    }

    pub fn from_base64(base64: &str) -> Result<PartialSignature> {
        let message = PartialSignatureMessage::from_base64(base64)?;
        let config = message.parse_config()?;
        let curve = Curve::from_canonical_text(&message.curve)?;
        let ring = parse_ring(&message.ring)?;
        let responses = parse_decimals(&message.responses)?;
        if ring.is_empty() {
            return Err(Error::EmptyRing);
        }
        if ring.len() != responses.len() {
            return Err(Error::LengthMismatch {
                ring: ring.len(),
                responses: responses.len(),
            });
        }

        let pi = parse_decimal(&message.pi)?
            .to_usize()
            .filter(|pi| *pi < ring.len())
            .ok_or_else(|| {
                Error::Range(format!("signer index {} is outside of the ring", message.pi))
            })?;
        let alpha = parse_decimal(&message.alpha)?;
        if &alpha >= curve.n() {
            return Err(Error::InvalidScalar(format!("alpha is not in [0, N) for {curve}")));
        }

        Ok(PartialSignature {
            message: message.message,
            ring,
            c: parse_decimal(&message.c)?,
            cpi: parse_decimal(&message.cpi)?,
            responses,
            pi,
            alpha: to_secret(&alpha)?,
            curve,
            config,
        })
    }
}
