//! secp256k1: `y² = x³ + 7` over a prime field with `P ≡ 3 (mod 4)`, cofactor 1.
//!
//! The group law is delegated to `k256`. The identity is encoded as `(0, 0)`.

use super::{Coordinates, CurveParams, GroupLaw};
use crate::errors::{Error, Result};
use crate::modular::{is_odd, mod_add, mod_mul, mod_pow, mod_sqrt, mod_sub, to_be_bytes_32};
use hex_literal::hex;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar};
use num_bigint::BigUint;
use num_traits::Zero;
use std::sync::OnceLock;

const CURVE_B: u8 = 7;

pub(crate) struct Secp256k1;

fn params() -> &'static CurveParams {
    static PARAMS: OnceLock<CurveParams> = OnceLock::new();
    PARAMS.get_or_init(|| CurveParams {
        p: BigUint::from_bytes_be(&hex!(
            "fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f"
        )),
        n: BigUint::from_bytes_be(&hex!(
            "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"
        )),
        g: (
            BigUint::from_bytes_be(&hex!(
                "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
            )),
            BigUint::from_bytes_be(&hex!(
                "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
            )),
        ),
        cofactor: 1,
    })
}

fn is_identity((x, y): &Coordinates) -> bool {
    x.is_zero() && y.is_zero()
}

/// x³ + 7 mod P
fn curve_rhs(x: &BigUint, p: &BigUint) -> BigUint {
    mod_add(&mod_pow(x, &BigUint::from(3u8), p), &BigUint::from(CURVE_B), p)
}

fn field_bytes(value: &BigUint) -> Result<FieldBytes> {
    let bytes = to_be_bytes_32(value)
        .ok_or_else(|| Error::NotOnCurve(format!("coordinate {value} exceeds 256 bits")))?;
    Ok(*FieldBytes::from_slice(&bytes))
}

fn to_projective(point: &Coordinates) -> Result<ProjectivePoint> {
    if is_identity(point) {
        return Ok(ProjectivePoint::IDENTITY);
    }
    let (x, y) = point;
    let encoded = EncodedPoint::from_affine_coordinates(&field_bytes(x)?, &field_bytes(y)?, false);
    Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
        .map(ProjectivePoint::from)
        .ok_or_else(|| Error::NotOnCurve(format!("[{x}, {y}]")))
}

fn from_projective(point: &ProjectivePoint) -> Coordinates {
    let encoded = point.to_affine().to_encoded_point(false);
    match (encoded.x(), encoded.y()) {
        (Some(x), Some(y)) => (BigUint::from_bytes_be(x), BigUint::from_bytes_be(y)),
        _ => (BigUint::zero(), BigUint::zero()),
    }
}

fn to_scalar(value: &BigUint) -> Result<Scalar> {
    let bytes = to_be_bytes_32(value)
        .ok_or_else(|| Error::InvalidScalar(format!("{value} exceeds 256 bits")))?;
    Option::<Scalar>::from(Scalar::from_repr(*FieldBytes::from_slice(&bytes)))
        .ok_or_else(|| Error::InvalidScalar(format!("{value} is not reduced modulo N")))
}

impl GroupLaw for Secp256k1 {
    fn params(&self) -> &'static CurveParams {
        params()
    }

    fn identity(&self) -> Coordinates {
        (BigUint::zero(), BigUint::zero())
    }

    fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        let p = &params().p;
        if x >= p || y >= p || x.is_zero() || y.is_zero() {
            return false;
        }
        mod_mul(y, y, p) == curve_rhs(x, p)
    }

    fn add(&self, a: &Coordinates, b: &Coordinates) -> Result<Coordinates> {
        let sum = to_projective(a)? + to_projective(b)?;
        Ok(from_projective(&sum))
    }

    fn mul(&self, point: &Coordinates, scalar: &BigUint) -> Result<Coordinates> {
        let product = to_projective(point)? * to_scalar(scalar)?;
        Ok(from_projective(&product))
    }

    fn negate(&self, point: &Coordinates) -> Coordinates {
        if is_identity(point) {
            return self.identity();
        }
        let (x, y) = point;
        (x.clone(), mod_sub(&BigUint::zero(), y, &params().p))
    }

    fn compress(&self, (x, y): &Coordinates) -> String {
        let prefix = if is_odd(y) { "03" } else { "02" };
        format!("{prefix}{:0>64}", x.to_str_radix(16))
    }

    fn decompress(&self, encoded: &str) -> Result<Coordinates> {
        let p = &params().p;
        let (prefix, x_hex) = match (encoded.get(..2), encoded.get(2..)) {
            (Some(prefix @ ("02" | "03")), Some(x_hex)) => (prefix, x_hex),
            _ => {
                return Err(Error::Decode(format!(
                    "unknown compressed point prefix: {encoded}"
                )))
            }
        };
        if x_hex.len() != 64 || !x_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Decode(format!("invalid hex x-coordinate: {x_hex}")));
        }
        let x = BigUint::parse_bytes(x_hex.as_bytes(), 16)
            .ok_or_else(|| Error::Decode(format!("invalid hex x-coordinate: {x_hex}")))?;
        if &x >= p {
            return Err(Error::Decode(format!("x-coordinate {x} is not reduced modulo P")));
        }

        let y = mod_sqrt(&curve_rhs(&x, p), p)
            .ok_or_else(|| Error::Decode(format!("{x} is not a valid x-coordinate")))?;
        let wants_odd = prefix == "03";
        let y = if is_odd(&y) == wants_odd { y } else { p - y };
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> Coordinates {
        params().g.clone()
    }

    fn two_g() -> Coordinates {
        (
            BigUint::from_bytes_be(&hex!(
                "c6047f9441ed7d6d3045406e95c07cd85c778e4b8cef3ca7abac09b95c709ee5"
            )),
            BigUint::from_bytes_be(&hex!(
                "1ae168fea63dc339a3c58419466ceaeef7f632653266d0e1236431a950cfe52a"
            )),
        )
    }

    #[test]
    fn test_double_generator() {
        let doubled = Secp256k1.mul(&generator(), &BigUint::from(2u8)).unwrap();
        assert_eq!(doubled, two_g());
        assert_eq!(Secp256k1.add(&generator(), &generator()).unwrap(), two_g());
    }

    #[test]
    fn test_identity_round_trips() {
        let g = generator();
        let sum = Secp256k1.add(&g, &Secp256k1.negate(&g)).unwrap();
        assert_eq!(sum, Secp256k1.identity());
        assert_eq!(Secp256k1.add(&sum, &g).unwrap(), g);
        assert_eq!(
            Secp256k1.mul(&g, &BigUint::zero()).unwrap(),
            Secp256k1.identity()
        );
    }

    #[test]
    fn test_mul_rejects_unreduced_scalar() {
        let result = Secp256k1.mul(&generator(), &params().n);
        assert!(matches!(result, Err(Error::InvalidScalar(_))));
    }

    #[test]
    fn test_off_curve_coordinates_are_rejected() {
        let bogus = (BigUint::from(2u8), BigUint::from(3u8));
        assert!(matches!(
            Secp256k1.add(&bogus, &generator()),
            Err(Error::NotOnCurve(_))
        ));
    }

    #[test]
    fn test_compress_generator() {
        assert_eq!(
            Secp256k1.compress(&generator()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
        assert_eq!(
            Secp256k1
                .decompress("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
                .unwrap(),
            generator()
        );
    }

    #[test]
    fn test_decompress_picks_requested_parity() {
        let negated = Secp256k1.negate(&two_g());
        let encoded = Secp256k1.compress(&negated);
        assert!(encoded.starts_with("03") != encoded.starts_with("02"));
        assert_eq!(Secp256k1.decompress(&encoded).unwrap(), negated);
    }

    #[test]
    fn test_decompress_rejects_non_residue() {
        // 5³ + 7 has no square root modulo P
        let encoded = format!("02{:0>64}", "5");
        assert!(matches!(
            Secp256k1.decompress(&encoded),
            Err(Error::Decode(_))
        ));
        assert!(matches!(Secp256k1.decompress("02zz"), Err(Error::Decode(_))));
        assert!(matches!(Secp256k1.decompress("04ab"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_decompress_requires_64_hex_digits() {
        let x_hex = "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        for encoded in [
            format!("02+{x_hex}"),
            format!("0200{x_hex}"),
            format!("02{}_{}", &x_hex[..12], &x_hex[12..]),
            format!("02{}", &x_hex[1..]),
            format!("02 {}", &x_hex[1..]),
        ] {
            assert!(
                matches!(Secp256k1.decompress(&encoded), Err(Error::Decode(_))),
                "{encoded} was accepted"
            );
        }
        assert_eq!(
            Secp256k1.decompress(&format!("02{}", x_hex.to_uppercase())).unwrap(),
            generator()
        );
    }
}
