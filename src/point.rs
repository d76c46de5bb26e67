//! Affine points bound to a named curve.
//!
//! A [`Point`] built from caller-supplied coordinates is always checked
//! against its curve equation. Results of group operations are trusted and
//! skip the check.

use crate::curves::{Coordinates, Curve};
use crate::errors::{Error, Result};
use crate::modular::to_be_bytes_32;
use crate::ring_signature::wire_messages::{PointMessage, WireMessage};
use num_bigint::BigUint;
use num_traits::One;
use sha3::{Digest, Keccak256};

/// A point of a supported curve in affine coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    curve: Curve,
    x: BigUint,
    y: BigUint,
}

impl Point {
    /// Creates a point, failing with [`Error::NotOnCurve`] if `(x, y)` is not on `curve`.
    pub fn new(curve: Curve, x: BigUint, y: BigUint) -> Result<Self> {
        if !curve.is_on_curve(&x, &y) {
            return Err(Error::NotOnCurve(format!("[{x}, {y}]")));
        }
        Ok(Point { curve, x, y })
    }

    pub(crate) fn from_trusted(curve: Curve, (x, y): Coordinates) -> Self {
        Point { curve, x, y }
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    pub fn x(&self) -> &BigUint {
        &self.x
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    pub fn to_coordinates(&self) -> Coordinates {
        (self.x.clone(), self.y.clone())
    }

    /// Multiplies the point by `scalar`.
    ///
    /// Fails with [`Error::InvalidScalar`] unless `scalar` lies in `[0, N)`.
    pub fn mult(&self, scalar: &BigUint) -> Result<Point> {
        if scalar >= self.curve.n() {
            return Err(Error::InvalidScalar(format!(
                "{scalar} is not in [0, N) for {}",
                self.curve
            )));
        }
        let product = self.curve.group_law().mul(&self.to_coordinates(), scalar)?;
        Ok(Point::from_trusted(self.curve, product))
    }

    /// Adds two points of the same curve.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Point) -> Result<Point> {
        if self.curve != other.curve {
            return Err(Error::CurveMismatch(format!(
                "cannot add a {} point to a {} point",
                other.curve, self.curve
            )));
        }
        let sum = self
            .curve
            .group_law()
            .add(&self.to_coordinates(), &other.to_coordinates())?;
        Ok(Point::from_trusted(self.curve, sum))
    }

    pub fn negate(&self) -> Point {
        let negated = self.curve.group_law().negate(&self.to_coordinates());
        Point::from_trusted(self.curve, negated)
    }

    /// Checks the point against its curve equation. Never fails.
    pub fn is_valid(&self) -> bool {
        self.curve.is_on_curve(&self.x, &self.y)
    }

    pub fn is_identity(&self) -> bool {
        self.to_coordinates() == self.curve.group_law().identity()
    }

    /// Rejects the identity, and for curves with a cofactor, points outside of
    /// the prime-order subgroup (`(N − 1)·P` must equal `−P`).
    pub fn check_low_order(&self) -> Result<()> {
        if self.is_identity() {
            return Err(Error::InvalidPoint(
                "the identity element is not allowed".to_string(),
            ));
        }
        if self.curve.params().cofactor > 1 {
            let n_minus_one = self.curve.n() - BigUint::one();
            if self.mult(&n_minus_one)? != self.negate() {
                return Err(Error::InvalidPoint(format!(
                    "[{}, {}] has a small-order component",
                    self.x, self.y
                )));
            }
        }
        Ok(())
    }

    /// Compressed hex form: `02|03 ‖ x` on secp256k1, `ED ‖ 02|03 ‖ y` on ed25519.
    pub fn serialize_compressed(&self) -> String {
        self.curve.group_law().compress(&self.to_coordinates())
    }

    /// Parses a compressed point. The curve is inferred from the prefix.
    pub fn deserialize_compressed(encoded: &str) -> Result<Point> {
        let curve = Curve::from_compressed_prefix(encoded)?;
        let (x, y) = curve.group_law().decompress(encoded)?;
        Point::new(curve, x, y)
    }

    pub fn to_canonical_text(&self) -> String {
        PointMessage::from(self).to_json()
    }

    pub fn from_canonical_text(text: &str) -> Result<Point> {
        PointMessage::from_json(text)?.to_point()
    }

    pub fn to_base64(&self) -> String {
        PointMessage::from(self).to_base64()
    }

    pub fn from_base64(base64: &str) -> Result<Point> {
        PointMessage::from_base64(base64)?.to_point()
    }

    /// Ethereum address of the point: last 20 bytes of `keccak256(x ‖ y)`.
    pub fn to_eth_address(&self) -> Result<String> {
        let encode = |value: &BigUint| {
            to_be_bytes_32(value)
                .ok_or_else(|| Error::InvalidPoint(format!("coordinate {value} exceeds 256 bits")))
        };
        let mut hasher = Keccak256::new();
        hasher.update(encode(&self.x)?);
        hasher.update(encode(&self.y)?);
        let digest = hasher.finalize();
        Ok(format!("0x{}", hex::encode(&digest[12..])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurveName;
    use num_traits::Zero;

    fn secp256k1() -> Curve {
        Curve::new(CurveName::Secp256k1)
    }

    fn ed25519() -> Curve {
        Curve::new(CurveName::Ed25519)
    }

    /// Order-2 point (0, −1) of ed25519.
    fn ed25519_torsion() -> Point {
        let curve = ed25519();
        Point::new(curve, BigUint::zero(), curve.p() - BigUint::one()).unwrap()
    }

    #[test]
    fn test_new_rejects_off_curve_point() {
        let result = Point::new(secp256k1(), BigUint::from(1u8), BigUint::from(2u8));
        assert_eq!(result, Err(Error::NotOnCurve("[1, 2]".to_string())));
    }

    #[test]
    fn test_mult_and_add_agree() {
        for curve in [secp256k1(), ed25519()] {
            let g = curve.generator();
            let three_g = g.mult(&BigUint::from(3u8)).unwrap();
            let sum = g.add(&g).unwrap().add(&g).unwrap();
            assert_eq!(three_g, sum);
            assert!(three_g.is_valid());
        }
    }

    #[test]
    fn test_mult_rejects_scalar_out_of_range() {
        let g = secp256k1().generator();
        assert!(matches!(
            g.mult(secp256k1().n()),
            Err(Error::InvalidScalar(_))
        ));
        assert!(g.mult(&(secp256k1().n() - BigUint::one())).is_ok());
    }

    #[test]
    fn test_add_rejects_curve_mismatch() {
        let a = secp256k1().generator();
        let b = ed25519().generator();
        assert!(matches!(a.add(&b), Err(Error::CurveMismatch(_))));
        assert_ne!(a, b);
    }

    #[test]
    fn test_negate() {
        for curve in [secp256k1(), ed25519()] {
            let g = curve.generator();
            let minus_g = g.negate();
            assert!(minus_g.is_valid());
            assert!(g.add(&minus_g).unwrap().is_identity());
            assert_eq!(minus_g.negate(), g);
            assert_eq!(
                minus_g,
                g.mult(&(curve.n() - BigUint::one())).unwrap()
            );
        }
    }

    #[test]
    fn test_compressed_round_trip() {
        for curve in [secp256k1(), ed25519()] {
            let g = curve.generator();
            for k in [1u32, 2, 3, 7, 1000, 123456789] {
                let point = g.mult(&BigUint::from(k)).unwrap();
                for candidate in [point.clone(), point.negate()] {
                    let encoded = candidate.serialize_compressed();
                    assert_eq!(Point::deserialize_compressed(&encoded).unwrap(), candidate);
                }
            }
        }
    }

    #[test]
    fn test_deserialize_compressed_rejects_garbage() {
        assert!(matches!(
            Point::deserialize_compressed("05abcdef"),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            Point::deserialize_compressed(""),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_deserialize_compressed_rejects_malformed_hex() {
        for curve in [secp256k1(), ed25519()] {
            let encoded = curve.generator().serialize_compressed();
            let (prefix, digits) = encoded.split_at(encoded.len() - 64);
            for malformed in [
                format!("{prefix}+{digits}"),
                format!("{prefix}00{digits}"),
                format!("{prefix}{}_{}", &digits[..12], &digits[12..]),
            ] {
                let decoded = Point::deserialize_compressed(&malformed);
                if curve.name() == CurveName::Ed25519 && malformed.starts_with("ED0200") {
                    // leading zeros are not significant for the unpadded y
                    assert_eq!(decoded.unwrap(), curve.generator());
                } else {
                    assert!(matches!(decoded, Err(Error::Decode(_))), "{malformed} was accepted");
                }
            }
        }
    }

    #[test]
    fn test_canonical_text_round_trip() {
        let point = ed25519().generator().mult(&BigUint::from(42u8)).unwrap();
        let text = point.to_canonical_text();
        assert!(text.starts_with(r#"{"curve":"{\"curve\":\"ED25519\"}","x":""#));
        assert_eq!(Point::from_canonical_text(&text).unwrap(), point);
        assert_eq!(Point::from_base64(&point.to_base64()).unwrap(), point);
        assert!(matches!(
            Point::from_canonical_text("{}"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_check_low_order() {
        assert!(secp256k1().generator().check_low_order().is_ok());
        assert!(ed25519().generator().check_low_order().is_ok());

        let identity = Point::from_trusted(ed25519(), (BigUint::zero(), BigUint::one()));
        assert!(matches!(
            identity.check_low_order(),
            Err(Error::InvalidPoint(_))
        ));
        let secp_identity = Point::from_trusted(secp256k1(), (BigUint::zero(), BigUint::zero()));
        assert!(matches!(
            secp_identity.check_low_order(),
            Err(Error::InvalidPoint(_))
        ));

        let torsion = ed25519_torsion();
        assert!(torsion.check_low_order().is_err());
        let mixed = ed25519().generator().add(&torsion).unwrap();
        assert!(mixed.is_valid());
        assert!(mixed.check_low_order().is_err());
    }

    #[test]
    fn test_eth_address() {
        // address of private key 1
        assert_eq!(
            secp256k1().generator().to_eth_address().unwrap(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }
}
