use crate::curves::Curve;
use crate::errors::{Error, Result};
use crate::point::Point;
use crate::rand_nonce::{expose_scalar, random_scalar, to_secret, SecretScalar};
use num_bigint::BigUint;
use num_traits::Zero;
use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// A private scalar in `[1, N)`.
pub struct PrivateKey {
    scalar: SecretScalar,
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PrivateKey([REDACTED])")
    }
}

impl Clone for PrivateKey {
    fn clone(&self) -> Self {
        PrivateKey {
            scalar: Secret::new(*self.scalar.expose_secret()),
        }
    }
}

impl PrivateKey {
    /// Wraps `value`, rejecting `0` and anything `≥ N` for `curve`.
    pub fn from_scalar(value: &BigUint, curve: &Curve) -> Result<PrivateKey> {
        if value.is_zero() || value >= curve.n() {
            return Err(Error::InvalidScalar(format!(
                "private keys must lie in [1, N) for {curve}"
            )));
        }
        Ok(PrivateKey {
            scalar: to_secret(value)?,
        })
    }

    pub fn random<R>(curve: &Curve, rng: &mut R) -> Result<PrivateKey>
    where
        R: rand::CryptoRng + rand::RngCore,
    {
        PrivateKey::from_scalar(&random_scalar(curve, rng)?, curve)
    }

    pub fn expose_scalar(&self) -> BigUint {
        expose_scalar(&self.scalar)
    }

    pub fn public_key(&self, curve: &Curve) -> Result<Point> {
        derive_public_key(self, curve)
    }
}

/// Computes `private_key·G` on `curve`.
pub fn derive_public_key(private_key: &PrivateKey, curve: &Curve) -> Result<Point> {
    curve.generator().mult(&private_key.expose_scalar())
}

pub struct KeyPair {
    pub(crate) private_key: PrivateKey,
    pub public_key: Point,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Format the KeyPair struct without including private_key
        write!(f, "KeyPair {{ public_key: {:?} }}", self.public_key)
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        KeyPair {
            private_key: self.private_key.clone(),
            public_key: self.public_key.clone(),
        }
    }
}

impl KeyPair {
    pub fn create<R>(curve: &Curve, rng: &mut R) -> Result<KeyPair>
    where
        R: rand::CryptoRng + rand::RngCore,
    {
        KeyPair::create_from_private_key(PrivateKey::random(curve, rng)?, curve)
    }

    pub fn create_from_private_key(private_key: PrivateKey, curve: &Curve) -> Result<KeyPair> {
        let public_key = derive_public_key(&private_key, curve)?;
        Ok(KeyPair {
            private_key,
            public_key,
        })
    }

    pub fn get_public_key(&self) -> &Point {
        &self.public_key
    }

    pub fn get_private_key(&self) -> &PrivateKey {
        &self.private_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurveName;
    use num_traits::One;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_private_key_bounds() {
        let curve = Curve::new(CurveName::Secp256k1);
        assert!(matches!(
            PrivateKey::from_scalar(&BigUint::zero(), &curve),
            Err(Error::InvalidScalar(_))
        ));
        assert!(matches!(
            PrivateKey::from_scalar(curve.n(), &curve),
            Err(Error::InvalidScalar(_))
        ));
        let key = PrivateKey::from_scalar(&BigUint::one(), &curve).unwrap();
        assert_eq!(key.public_key(&curve).unwrap(), curve.generator());
    }

    #[test]
    fn test_key_pair_hides_private_key() {
        let mut rng = StdRng::seed_from_u64(42);
        let curve = Curve::new(CurveName::Ed25519);
        let keys = KeyPair::create(&curve, &mut rng).unwrap();
        let scalar = keys.get_private_key().expose_scalar();
        assert_eq!(
            keys.get_public_key(),
            &curve.generator().mult(&scalar).unwrap()
        );
        let debug = format!("{:?} {:?}", keys, keys.get_private_key());
        assert!(!debug.contains(&scalar.to_string()));
        assert_eq!(keys.clone().get_private_key().expose_scalar(), scalar);
    }
}
