//! ed25519: `−x² + y² = 1 + d·x²·y²` over `P = 2²⁵⁵ − 19` (`P ≡ 5 (mod 8)`), cofactor 8.
//!
//! The group law is delegated to `curve25519-dalek`, which only exposes the
//! compressed Edwards-y form; affine `x` is recovered from `y` and its sign
//! bit with [`mod_sqrt_ratio`]. The identity is `(0, 1)`.

use super::{Coordinates, CurveParams, GroupLaw};
use crate::errors::{Error, Result};
use crate::modular::{is_odd, mod_add, mod_mul, mod_sqrt_ratio, mod_sub, to_le_bytes_32};
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use hex_literal::hex;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::sync::OnceLock;

pub(crate) struct Ed25519;

struct EdwardsConstants {
    params: CurveParams,
    d: BigUint,
    sqrt_m1: BigUint,
}

fn constants() -> &'static EdwardsConstants {
    static CONSTANTS: OnceLock<EdwardsConstants> = OnceLock::new();
    CONSTANTS.get_or_init(|| EdwardsConstants {
        params: CurveParams {
            p: BigUint::from_bytes_be(&hex!(
                "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed"
            )),
            n: BigUint::from_bytes_be(&hex!(
                "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed"
            )),
            g: (
                BigUint::from_bytes_be(&hex!(
                    "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a"
                )),
                BigUint::from_bytes_be(&hex!(
                    "6666666666666666666666666666666666666666666666666666666666666658"
                )),
            ),
            cofactor: 8,
        },
        d: BigUint::from_bytes_be(&hex!(
            "52036cee2b6ffe738cc740797779e89800700a4d4141d8ab75eb4dca135978a3"
        )),
        sqrt_m1: BigUint::from_bytes_be(&hex!(
            "2b8324804fc1df0b2b4d00993dfbd7a72f431806ad2fe478c4ee1b274a0ea0b0"
        )),
    })
}

/// Recovers the affine x-coordinate from `y` and the requested parity of `x`.
fn recover_x(y: &BigUint, x_is_odd: bool) -> Option<BigUint> {
    let EdwardsConstants { params, d, sqrt_m1 } = constants();
    let p = &params.p;
    if y >= p {
        return None;
    }
    let y2 = mod_mul(y, y, p);
    let u = mod_sub(&y2, &BigUint::one(), p);
    let v = mod_add(&mod_mul(d, &y2, p), &BigUint::one(), p);
    let x = mod_sqrt_ratio(&u, &v, p, sqrt_m1)?;

    if x.is_zero() {
        return if x_is_odd { None } else { Some(x) };
    }
    Some(if is_odd(&x) == x_is_odd { x } else { p - x })
}

fn to_edwards(point: &Coordinates) -> Result<EdwardsPoint> {
    let (x, y) = point;
    let mut bytes = to_le_bytes_32(y)
        .filter(|bytes| bytes[31] & 0x80 == 0)
        .ok_or_else(|| Error::NotOnCurve(format!("[{x}, {y}]")))?;
    if is_odd(x) {
        bytes[31] |= 0x80;
    }
    CompressedEdwardsY(bytes)
        .decompress()
        .ok_or_else(|| Error::NotOnCurve(format!("[{x}, {y}]")))
}

fn from_edwards(point: &EdwardsPoint) -> Result<Coordinates> {
    let mut bytes = point.compress().to_bytes();
    let x_is_odd = bytes[31] & 0x80 != 0;
    bytes[31] &= 0x7f;
    let y = BigUint::from_bytes_le(&bytes);
    let x = recover_x(&y, x_is_odd)
        .ok_or_else(|| Error::NotOnCurve(format!("no x-coordinate for y = {y}")))?;
    Ok((x, y))
}

fn to_scalar(value: &BigUint) -> Result<Scalar> {
    let bytes = to_le_bytes_32(value)
        .ok_or_else(|| Error::InvalidScalar(format!("{value} exceeds 256 bits")))?;
    Option::<Scalar>::from(Scalar::from_canonical_bytes(bytes))
        .ok_or_else(|| Error::InvalidScalar(format!("{value} is not reduced modulo N")))
}

impl GroupLaw for Ed25519 {
    fn params(&self) -> &'static CurveParams {
        &constants().params
    }

    fn identity(&self) -> Coordinates {
        (BigUint::zero(), BigUint::one())
    }

    fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        let EdwardsConstants { params, d, .. } = constants();
        let p = &params.p;
        if x >= p || y >= p {
            return false;
        }
        let x2 = mod_mul(x, x, p);
        let y2 = mod_mul(y, y, p);
        let lhs = mod_sub(&y2, &x2, p);
        let rhs = mod_add(&BigUint::one(), &mod_mul(d, &mod_mul(&x2, &y2, p), p), p);
        lhs == rhs
    }

    fn add(&self, a: &Coordinates, b: &Coordinates) -> Result<Coordinates> {
        from_edwards(&(to_edwards(a)? + to_edwards(b)?))
    }

    fn mul(&self, point: &Coordinates, scalar: &BigUint) -> Result<Coordinates> {
        from_edwards(&(to_edwards(point)? * to_scalar(scalar)?))
    }

    fn negate(&self, (x, y): &Coordinates) -> Coordinates {
        (mod_sub(&BigUint::zero(), x, &constants().params.p), y.clone())
    }

    fn compress(&self, (x, y): &Coordinates) -> String {
        let parity = if is_odd(x) { "03" } else { "02" };
        format!("ED{parity}{}", y.to_str_radix(16))
    }

    fn decompress(&self, encoded: &str) -> Result<Coordinates> {
        let (parity, y_hex) = match (encoded.get(..2), encoded.get(2..4), encoded.get(4..)) {
            (Some("ED"), Some(parity @ ("02" | "03")), Some(y_hex)) => (parity, y_hex),
            _ => {
                return Err(Error::Decode(format!(
                    "unknown compressed point prefix: {encoded}"
                )))
            }
        };
        if y_hex.is_empty() || !y_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Decode(format!("invalid hex y-coordinate: {y_hex}")));
        }
        let y = BigUint::parse_bytes(y_hex.as_bytes(), 16)
            .ok_or_else(|| Error::Decode(format!("invalid hex y-coordinate: {y_hex}")))?;
        let x = recover_x(&y, parity == "03")
            .ok_or_else(|| Error::Decode(format!("{y} is not a valid y-coordinate")))?;
        Ok((x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> Coordinates {
        constants().params.g.clone()
    }

    #[test]
    fn test_recover_generator_x() {
        let (x, y) = generator();
        assert_eq!(recover_x(&y, is_odd(&x)), Some(x));
    }

    #[test]
    fn test_double_generator() {
        let expected = (
            BigUint::parse_bytes(
                b"24727413235106541002554574571675588834622768167397638456726423682521233608206",
                10,
            )
            .unwrap(),
            BigUint::parse_bytes(
                b"15549675580280190176352668710449542251549572066445060580507079593062643049417",
                10,
            )
            .unwrap(),
        );
        let g = generator();
        assert_eq!(Ed25519.mul(&g, &BigUint::from(2u8)).unwrap(), expected);
        assert_eq!(Ed25519.add(&g, &g).unwrap(), expected);
    }

    #[test]
    fn test_identity_round_trips() {
        let g = generator();
        let sum = Ed25519.add(&g, &Ed25519.negate(&g)).unwrap();
        assert_eq!(sum, Ed25519.identity());
        assert_eq!(Ed25519.add(&sum, &g).unwrap(), g);
        assert_eq!(Ed25519.mul(&g, &BigUint::zero()).unwrap(), Ed25519.identity());
    }

    #[test]
    fn test_mul_rejects_unreduced_scalar() {
        let result = Ed25519.mul(&generator(), &constants().params.n);
        assert!(matches!(result, Err(Error::InvalidScalar(_))));
    }

    #[test]
    fn test_compress_generator() {
        let encoded = Ed25519.compress(&generator());
        assert_eq!(
            encoded,
            "ED026666666666666666666666666666666666666666666666666666666666666658"
        );
        assert_eq!(Ed25519.decompress(&encoded).unwrap(), generator());
    }

    #[test]
    fn test_decompress_honours_parity() {
        let negated = Ed25519.negate(&generator());
        let encoded = Ed25519.compress(&negated);
        assert!(encoded.starts_with("ED03"));
        assert_eq!(Ed25519.decompress(&encoded).unwrap(), negated);
    }

    #[test]
    fn test_decompress_rejects_invalid_input() {
        // y = 2 has no matching x
        assert!(matches!(Ed25519.decompress("ED022"), Err(Error::Decode(_))));
        assert!(matches!(Ed25519.decompress("ED0466"), Err(Error::Decode(_))));
        assert!(matches!(Ed25519.decompress("ED02"), Err(Error::Decode(_))));
        // the identity has x = 0, which has no odd representative
        assert!(matches!(Ed25519.decompress("ED031"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_decompress_rejects_non_hex_y() {
        let y_hex = "6666666666666666666666666666666666666666666666666666666666666658";
        for encoded in [
            format!("ED02+{y_hex}"),
            format!("ED02{}_{}", &y_hex[..8], &y_hex[8..]),
            format!("ED02 {y_hex}"),
            "ED02_1".to_string(),
        ] {
            assert!(
                matches!(Ed25519.decompress(&encoded), Err(Error::Decode(_))),
                "{encoded} was accepted"
            );
        }
    }
}
