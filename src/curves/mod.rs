//! Named curves and their group laws.
//!
//! A [`Curve`] is an immutable handle on the parameters of one of the
//! supported curves. The curve-specific work (affine ↔ internal conversion,
//! group law, point compression) lives behind the [`GroupLaw`] capability,
//! one implementation per variant of [`CurveName`].

mod ed25519;
mod secp256k1;

use crate::errors::{Error, Result};
use crate::point::Point;
use crate::ring_signature::wire_messages::{CurveMessage, WireMessage};
use num_bigint::BigUint;
use std::fmt;
use std::str::FromStr;

/// Affine coordinates `(x, y)`.
pub type Coordinates = (BigUint, BigUint);

/// List of supported curves
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CurveName {
    Secp256k1,
    Ed25519,
}

impl CurveName {
    /// Wire name of the curve.
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveName::Secp256k1 => "SECP256K1",
            CurveName::Ed25519 => "ED25519",
        }
    }
}

impl FromStr for CurveName {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "SECP256K1" => Ok(CurveName::Secp256k1),
            "ED25519" => Ok(CurveName::Ed25519),
            other => Err(Error::UnknownCurve(other.to_string())),
        }
    }
}

impl fmt::Display for CurveName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain parameters of a named curve.
#[derive(Debug, PartialEq, Eq)]
pub struct CurveParams {
    /// Field modulus
    pub p: BigUint,
    /// Order of the subgroup generated by `g`
    pub n: BigUint,
    /// Generator point
    pub g: Coordinates,
    /// Index of the prime-order subgroup in the full curve group
    pub cofactor: u8,
}

/// Per-curve arithmetic. Coordinates passed in are assumed to be reduced
/// modulo P; scalars are assumed to be reduced modulo N.
pub(crate) trait GroupLaw: Sync {
    fn params(&self) -> &'static CurveParams;

    /// Affine encoding of the neutral element.
    fn identity(&self) -> Coordinates;

    fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool;

    fn add(&self, a: &Coordinates, b: &Coordinates) -> Result<Coordinates>;

    fn mul(&self, point: &Coordinates, scalar: &BigUint) -> Result<Coordinates>;

    fn negate(&self, point: &Coordinates) -> Coordinates;

    fn compress(&self, point: &Coordinates) -> String;

    fn decompress(&self, encoded: &str) -> Result<Coordinates>;
}

/// A supported elliptic curve.
///
/// Two curves are equal when they share a name, hence the same parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Curve {
    name: CurveName,
}

impl Curve {
    /// Creates a curve instance.
    pub fn new(name: CurveName) -> Self {
        Curve { name }
    }

    /// Creates a curve instance from its wire name.
    ///
    /// Fails with [`Error::UnknownCurve`] for unsupported names.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Curve::new(name.parse()?))
    }

    pub fn name(&self) -> CurveName {
        self.name
    }

    /// Field modulus.
    pub fn p(&self) -> &'static BigUint {
        &self.params().p
    }

    /// Group order.
    pub fn n(&self) -> &'static BigUint {
        &self.params().n
    }

    /// Generator coordinates.
    pub fn g(&self) -> &'static Coordinates {
        &self.params().g
    }

    pub fn params(&self) -> &'static CurveParams {
        self.group_law().params()
    }

    /// Returns the generator point as a [`Point`].
    pub fn generator(&self) -> Point {
        let (x, y) = self.g();
        Point::from_trusted(*self, (x.clone(), y.clone()))
    }

    /// Checks if the coordinates satisfy the curve equation.
    ///
    /// Never fails: out-of-range coordinates simply return `false`.
    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        self.group_law().is_on_curve(x, y)
    }

    /// Checks if a point lies on this curve.
    pub fn contains(&self, point: &Point) -> bool {
        point.curve() == self && self.is_on_curve(point.x(), point.y())
    }

    /// Returns the curve as a json string: `{"curve":"<name>"}`.
    pub fn to_canonical_text(&self) -> String {
        CurveMessage::from(self).to_json()
    }

    /// Parses a curve from its json string.
    pub fn from_canonical_text(text: &str) -> Result<Self> {
        CurveMessage::from_json(text)?.to_curve()
    }

    /// Resolves the curve a compressed point belongs to from its prefix.
    pub(crate) fn from_compressed_prefix(encoded: &str) -> Result<Self> {
        if encoded.starts_with("ED") {
            Ok(Curve::new(CurveName::Ed25519))
        } else if encoded.starts_with("02") || encoded.starts_with("03") {
            Ok(Curve::new(CurveName::Secp256k1))
        } else {
            Err(Error::Decode(format!(
                "unknown compressed point prefix: {:.4}",
                encoded
            )))
        }
    }

    pub(crate) fn group_law(&self) -> &'static dyn GroupLaw {
        match self.name {
            CurveName::Secp256k1 => &secp256k1::Secp256k1,
            CurveName::Ed25519 => &ed25519::Ed25519,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
