//! Hash functions usable for the challenge chain.
//!
//! Every hash takes text and returns a lowercase hex digest, which is the
//! shape the challenge computation and the wire formats rely on.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha512};
use sha3::Keccak256;

/// Supported hash functions (default: keccak256)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashFunction {
    #[default]
    #[serde(rename = "keccak256")]
    Keccak256,
    #[serde(rename = "sha512")]
    Sha512,
}

impl HashFunction {
    /// Hashes `data` and returns the digest as a hex string.
    pub fn hash(&self, data: &str) -> String {
        match self {
            HashFunction::Keccak256 => keccak_256(data.as_bytes()),
            HashFunction::Sha512 => sha_512(data.as_bytes()),
        }
    }
}

fn hex_digest<D: Digest>(data: &[u8]) -> String {
    hex::encode(D::digest(data))
}

/// Keccak-256 of `data` as a hex string
pub fn keccak_256(data: &[u8]) -> String {
    hex_digest::<Keccak256>(data)
}

/// SHA-512 of `data` as a hex string
pub fn sha_512(data: &[u8]) -> String {
    hex_digest::<Sha512>(data)
}
