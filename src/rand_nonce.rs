use crate::curves::Curve;
use crate::errors::{Error, Result};
use crate::modular::to_be_bytes_32;
use crate::point::Point;
use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};
use secrecy::{ExposeSecret, Secret};
use std::fmt;

/// Scalar kept in 32-byte big-endian form behind a [`Secret`].
pub(crate) type SecretScalar = Secret<[u8; 32]>;

pub(crate) fn to_secret(value: &BigUint) -> Result<SecretScalar> {
    to_be_bytes_32(value)
        .map(Secret::new)
        .ok_or_else(|| Error::InvalidScalar("secret scalar exceeds 256 bits".to_string()))
}

pub(crate) fn expose_scalar(secret: &SecretScalar) -> BigUint {
    BigUint::from_bytes_be(secret.expose_secret())
}

/// Draws a uniformly random integer in `[1, max]`.
///
/// Random bytes covering the bit length of `max` are redrawn while the value
/// is `≥ max`, so the result carries no modulo bias. Fails with
/// [`Error::Range`] when `max` is zero.
pub fn random_in_range<R>(max: &BigUint, rng: &mut R) -> Result<BigUint>
where
    R: rand::CryptoRng + rand::RngCore,
{
    if max.is_zero() {
        return Err(Error::Range(
            "the upper bound of a random draw must be positive".to_string(),
        ));
    }
    let bits = max.bits();
    let mut bytes = vec![0u8; ((bits + 7) / 8) as usize];
    let excess_bits = (bytes.len() as u64) * 8 - bits;
    loop {
        rng.fill_bytes(&mut bytes);
        bytes[0] &= 0xffu8 >> excess_bits;
        let drawn = BigUint::from_bytes_be(&bytes);
        if &drawn < max {
            return Ok(drawn + BigUint::one());
        }
    }
}

/// Random scalar in `[1, N)`.
pub fn random_scalar<R>(curve: &Curve, rng: &mut R) -> Result<BigUint>
where
    R: rand::CryptoRng + rand::RngCore,
{
    random_in_range(&(curve.n() - BigUint::one()), rng)
}

/// Random insertion index in `[0, len]`.
pub fn random_index<R>(len: usize, rng: &mut R) -> Result<usize>
where
    R: rand::CryptoRng + rand::RngCore,
{
    let drawn = random_in_range(&BigUint::from(len + 1), rng)? - BigUint::one();
    drawn
        .to_usize()
        .ok_or_else(|| Error::Range(format!("index {drawn} does not fit in usize")))
}

/// Ephemeral scalar `alpha` with its commitment `alpha·G`.
pub struct RandomNonce {
    pub r_public: Point,
    pub(crate) r_private: SecretScalar,
}

impl fmt::Debug for RandomNonce {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // r_private stays out of the output
        write!(f, "RandomNonce {{ r_public: {:?} }}", self.r_public)
    }
}

impl Clone for RandomNonce {
    fn clone(&self) -> Self {
        RandomNonce {
            r_public: self.r_public.clone(),
            r_private: Secret::new(*self.r_private.expose_secret()),
        }
    }
}

impl RandomNonce {
    pub fn new_rand<R>(curve: &Curve, rng: &mut R) -> Result<RandomNonce>
    where
        R: rand::CryptoRng + rand::RngCore,
    {
        let alpha = random_scalar(curve, rng)?;
        RandomNonce::from_scalar(curve, &alpha)
    }

    /// Rebuilds a nonce from a known scalar in `[0, N)`.
    pub fn from_scalar(curve: &Curve, alpha: &BigUint) -> Result<RandomNonce> {
        let r_public = curve.generator().mult(alpha)?;
        Ok(RandomNonce {
            r_public,
            r_private: to_secret(alpha)?,
        })
    }

    pub fn expose_scalar(&self) -> BigUint {
        expose_scalar(&self.r_private)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::CurveName;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_in_range_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for max in [1u32, 2, 3, 255, 256, 257, 1000] {
            let max = BigUint::from(max);
            for _ in 0..200 {
                let value = random_in_range(&max, &mut rng).unwrap();
                assert!(value >= BigUint::one() && value <= max);
            }
        }
    }

    #[test]
    fn test_random_in_range_hits_both_ends() {
        let mut rng = StdRng::seed_from_u64(11);
        let max = BigUint::from(3u8);
        let draws: Vec<BigUint> = (0..100)
            .map(|_| random_in_range(&max, &mut rng).unwrap())
            .collect();
        assert!(draws.contains(&BigUint::one()));
        assert!(draws.contains(&max));
    }

    #[test]
    fn test_random_in_range_rejects_zero_bound() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            random_in_range(&BigUint::zero(), &mut rng),
            Err(Error::Range(_))
        ));
    }

    #[test]
    fn test_random_index_covers_append_position() {
        let mut rng = StdRng::seed_from_u64(3);
        let indices: Vec<usize> = (0..200)
            .map(|_| random_index(2, &mut rng).unwrap())
            .collect();
        assert!(indices.iter().all(|&i| i <= 2));
        assert!(indices.contains(&0) && indices.contains(&2));
        assert_eq!(random_index(0, &mut rng).unwrap(), 0);
    }

    #[test]
    fn test_nonce_commitment() {
        let mut rng = StdRng::seed_from_u64(5);
        let curve = Curve::new(CurveName::Ed25519);
        let nonce = RandomNonce::new_rand(&curve, &mut rng).unwrap();
        let alpha = nonce.expose_scalar();
        assert!(alpha >= BigUint::one() && &alpha < curve.n());
        assert_eq!(nonce.r_public, curve.generator().mult(&alpha).unwrap());
        assert!(!format!("{:?}", nonce).contains(&alpha.to_string()));
        assert_eq!(nonce.clone().expose_scalar(), alpha);
    }
}
