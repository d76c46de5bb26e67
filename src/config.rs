//! Signature configuration carried alongside every ring signature.

use crate::hash_function::HashFunction;
use serde::{Deserialize, Serialize};

/// Optional knobs for signing and verifying.
///
/// Absent fields are omitted on the wire and fall back to their defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureConfig {
    /// Hash function for the message digest and the challenges (default: keccak256)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<HashFunction>,

    /// Hash points as `decimal(x) || decimal(y)` instead of their json text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evm_compatibility: Option<bool>,

    /// Reject low-order ring members in addition to the regular ring checks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_mode: Option<bool>,
}

impl SignatureConfig {
    pub fn with_hash(mut self, hash: HashFunction) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn with_evm_compatibility(mut self, enabled: bool) -> Self {
        self.evm_compatibility = Some(enabled);
        self
    }

    pub fn with_safe_mode(mut self, enabled: bool) -> Self {
        self.safe_mode = Some(enabled);
        self
    }

    pub fn hash_function(&self) -> HashFunction {
        self.hash.unwrap_or_default()
    }

    pub fn is_evm_compatible(&self) -> bool {
        self.evm_compatibility.unwrap_or(false)
    }

    pub fn is_safe_mode(&self) -> bool {
        self.safe_mode.unwrap_or(false)
    }
}
