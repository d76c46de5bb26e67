//! # Ring Signature Library
//!
//! This Rust library provides an implementation of ring signatures over the secp256k1 and ed25519 curves, based on the k256 and curve25519_dalek libraries.
//!
//! ## Overview of Ring Signatures
//!
//! A ring signature proves that a message was signed by one member of a declared set of public keys (the ring) without revealing which member. There is no trusted setup and no coordination between ring members: the signer picks the other public keys on their own.
//!
//! - Key Pair Generation: every participant owns a private key (k) and the corresponding public key (K), where K = k * G and G is the generator point of the curve.
//! - Signing: the signer combines their private key, the public keys of the ring and the message to create a signature.
//! - Verification: the signature can be verified using the ring and the message only. If the challenge chain closes, the signature is considered valid.
//!
//! ## Algorithm
//!
//! The signature involves the following components:
//!
//! - Ring: K0, K1, …, Kn, with the signer's public key inserted at a secret random index pi.
//! - Message: m, hashed once into the digest H(m).
//! - Responses: r0, r1, …, rn, random scalars except for the signer's one.
//!
//! The equations relevant for ring signatures:
//!
//! - Seed: c[pi+1] = H(Ring, H(m), alpha * G) where alpha is a random nonce chosen by the signer
//! - Chain: c[i+1] = H(Ring, H(m), r[i] * G + c[i] * K[i]), walking the ring cyclically up to c[pi]
//! - Closing: r[pi] = alpha - c[pi] * k, so that r[pi] * G + c[pi] * K[pi] = alpha * G
//! - Signature: (Ring, c[0], r0, …, rn)
//! - Verification: starting from c[0], recompute every c[i+1] and check that the walk lands on c[0] again
//!
//! A signature over an empty ring is a one-member ring closed with the Schnorr-like response alone, where alpha = 2c + 1.
//!
//! ## Partial Signing
//!
//! The partial signing protocol lets a party that only knows the signer's public key (e.g. a hardware wallet holder's) precompute the whole signature except the closing response.
//!
//! ### Protocol Steps
//!
//! 1. The preparing party calls `partial_sign` with the ring, the message and the signer's public key. The result holds the ring, c[0], c[pi], alpha and every response but the signer's one.
//! 2. The key holder computes r[pi] = alpha - c[pi] * k with `pi_signature` and sends it back.
//! 3. The preparing party calls `combine` to splice r[pi] in and obtains the final `RingSignature`.
//!
//! The partial signature is consumed by `combine`: alpha must never close two different rings, since two responses sharing it reveal the private key.
//!
//! ## Usage
//!
//! To use this library in your Rust project, simply include it as a dependency and refer to the provided functions and types in your code. Runnable demos are available under `demos/`.
//!
//! ## Contributing
//!
//! Contributions to this library are welcome! Feel free to open issues or pull requests for bug fixes, improvements, or new features.
//!
//! ## Acknowledgments
//!
//! This library builds upon the k256 and curve25519_dalek libraries. Thanks to the open-source community for their contributions and support.

pub mod config;
pub mod curves;
pub mod errors;
pub mod hash_function;
pub mod keys_management;
pub mod modular;
pub mod pi_signature;
pub mod point;
pub mod rand_nonce;
pub mod ring_signature;

#[cfg(feature = "tracing")]
pub mod telemetry;

pub use crate::ring_signature::partial;
pub use crate::ring_signature::ring_math;
pub use crate::ring_signature::wire_messages;

pub use crate::config::SignatureConfig;
pub use crate::curves::{Curve, CurveName};
pub use crate::errors::{Error, ErrorKind, Result};
pub use crate::hash_function::HashFunction;
pub use crate::keys_management::{derive_public_key, KeyPair, PrivateKey};
pub use crate::partial::{partial_sign, PartialSignature};
pub use crate::point::Point;
pub use crate::ring_signature::RingSignature;
