// The `wire_messages` module contains the serialized forms of curves, points, ring signatures
// and partial signatures exchanged with verifiers and external signers.
use crate::config::SignatureConfig;
use crate::curves::Curve;
use crate::errors::{Error, Result};
use crate::point::Point;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use num_bigint::BigUint;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Json and base64 encoding shared by every wire message.
pub trait WireMessage: Serialize + DeserializeOwned {
    fn to_json(&self) -> String {
        // Wire messages only hold strings, string lists and flat options
        serde_json::to_string(self).expect("wire messages are always serializable")
    }

    fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn to_base64(&self) -> String {
        STANDARD.encode(self.to_json())
    }

    fn from_base64(base64: &str) -> Result<Self> {
        let decoded = String::from_utf8(STANDARD.decode(base64)?)?;
        Self::from_json(&decoded)
    }
}

/// Parses a base-10 integer field.
pub(crate) fn parse_decimal(value: &str) -> Result<BigUint> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::Decode(format!("invalid decimal integer: {value:?}")));
    }
    BigUint::parse_bytes(value.as_bytes(), 10)
        .ok_or_else(|| Error::Decode(format!("invalid decimal integer: {value:?}")))
}

pub(crate) fn parse_decimals(values: &[String]) -> Result<Vec<BigUint>> {
    values.iter().map(|value| parse_decimal(value)).collect()
}

pub(crate) fn to_decimals(values: &[BigUint]) -> Vec<String> {
    values.iter().map(BigUint::to_string).collect()
}

pub(crate) fn parse_ring(ring: &[String]) -> Result<Vec<Point>> {
    ring.iter().map(|point| Point::from_canonical_text(point)).collect()
}

pub(crate) fn ring_texts(ring: &[Point]) -> Vec<String> {
    ring.iter().map(Point::to_canonical_text).collect()
}

/// `{"curve":"<name>"}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CurveMessage {
    pub curve: String,
}

impl WireMessage for CurveMessage {}

impl From<&Curve> for CurveMessage {
    fn from(curve: &Curve) -> Self {
        CurveMessage {
            curve: curve.name().as_str().to_string(),
        }
    }
}

impl CurveMessage {
    pub fn to_curve(&self) -> Result<Curve> {
        Curve::from_name(&self.curve)
    }
}

/// `{"curve":"<curve text>","x":"<decimal>","y":"<decimal>"}`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PointMessage {
    pub curve: String,
    pub x: String,
    pub y: String,
}

impl WireMessage for PointMessage {}

impl From<&Point> for PointMessage {
    fn from(point: &Point) -> Self {
        PointMessage {
            curve: point.curve().to_canonical_text(),
            x: point.x().to_string(),
            y: point.y().to_string(),
        }
    }
}

impl PointMessage {
    /// Rebuilds the point, checking that it lies on its curve.
    pub fn to_point(&self) -> Result<Point> {
        let curve = Curve::from_canonical_text(&self.curve)?;
        Point::new(curve, parse_decimal(&self.x)?, parse_decimal(&self.y)?)
    }
}

/// Public fields of a ring signature, as read by verifiers and calldata adapters.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RingSignatureMessage {
    pub message: String,
    pub ring: Vec<String>,
    pub c: String,
    pub responses: Vec<String>,
    pub curve: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<SignatureConfig>,
}

impl WireMessage for RingSignatureMessage {}

/// Pending signature handed to the external signer. `config` is nested json text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PartialSignatureMessage {
    pub message: String,
    pub ring: Vec<String>,
    pub c: String,
    pub cpi: String,
    pub responses: Vec<String>,
    pub pi: String,
    pub alpha: String,
    pub curve: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,
}

impl WireMessage for PartialSignatureMessage {}

impl PartialSignatureMessage {
    pub(crate) fn parse_config(&self) -> Result<Option<SignatureConfig>> {
        match self.config.as_deref() {
            None | Some("undefined") => Ok(None),
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurveName;

    #[test]
    fn test_point_message_layout() {
        let generator = Curve::new(CurveName::Secp256k1).generator();
        let json = PointMessage::from(&generator).to_json();
        assert_eq!(
            json,
            r#"{"curve":"{\"curve\":\"SECP256K1\"}","x":"55066263022277343669578718895168534326250603453777594175500187360389116729240","y":"32670510020758816978083085130507043184471273380659243275938904335757337482424"}"#
        );
        assert_eq!(
            PointMessage::from_json(&json).unwrap().to_point().unwrap(),
            generator
        );
    }

    #[test]
    fn test_point_message_rejects_off_curve_coordinates() {
        let message = PointMessage {
            curve: r#"{"curve":"SECP256K1"}"#.to_string(),
            x: "1".to_string(),
            y: "2".to_string(),
        };
        assert!(matches!(message.to_point(), Err(Error::NotOnCurve(_))));
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("1234").unwrap(), BigUint::from(1234u32));
        assert!(matches!(parse_decimal(""), Err(Error::Decode(_))));
        assert!(matches!(parse_decimal("-1"), Err(Error::Decode(_))));
        assert!(matches!(parse_decimal("12a"), Err(Error::Decode(_))));
    }

    #[test]
    fn test_base64_uses_padded_standard_alphabet() {
        let message = CurveMessage {
            curve: "ED25519".to_string(),
        };
        let encoded = message.to_base64();
        assert_eq!(encoded, "eyJjdXJ2ZSI6IkVEMjU1MTkifQ==");
        assert_eq!(CurveMessage::from_base64(&encoded).unwrap(), message);
        assert!(matches!(
            CurveMessage::from_base64("not base64!"),
            Err(Error::Decode(_))
        ));
    }

    #[test]
    fn test_partial_config_is_nested_text() {
        let message = PartialSignatureMessage {
            message: "m".to_string(),
            ring: vec![],
            c: "1".to_string(),
            cpi: "2".to_string(),
            responses: vec![],
            pi: "0".to_string(),
            alpha: "3".to_string(),
            curve: r#"{"curve":"SECP256K1"}"#.to_string(),
            config: Some(r#"{"safeMode":true}"#.to_string()),
        };
        let json = message.to_json();
        assert!(json.contains(r#""config":"{\"safeMode\":true}""#));
        let parsed = PartialSignatureMessage::from_json(&json).unwrap();
        assert_eq!(
            parsed.parse_config().unwrap(),
            Some(SignatureConfig::default().with_safe_mode(true))
        );
    }
}
