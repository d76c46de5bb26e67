use crate::curves::Curve;
use crate::errors::{Error, Result};
use crate::keys_management::PrivateKey;
use crate::modular::{mod_mul, mod_sub};
use crate::point::Point;
use num_bigint::BigUint;

/// Computes the response closing the signer's link of the chain:
/// r = alpha − c·k (mod N)
///
/// so that `r·G + c·K = alpha·G` for the public key `K = k·G`.
///
/// # Arguments
///
/// * `alpha` - The ephemeral scalar the chain was seeded with.
/// * `c` - The challenge at the signer's position.
/// * `private_key` - The signer's private key.
/// * `curve` - The curve the ring lives on.
///
#[tracing::instrument(
    name = "Closing the ring with the signer response",
    skip_all,
    fields(curve = %curve)
)]
pub fn pi_signature(
    alpha: &BigUint,
    c: &BigUint,
    private_key: &PrivateKey,
    curve: &Curve,
) -> Result<BigUint> {
    let n = curve.n();
    let k = private_key.expose_scalar();
    if &k >= n {
        return Err(Error::InvalidScalar(format!(
            "private key is not in [1, N) for {curve}"
        )));
    }
    Ok(mod_sub(&(alpha % n), &mod_mul(c, &k, n), n))
}

/// Checks that `r·G + c·K` equals `alpha·G`.
///
/// Never fails: unusable inputs simply return `false`.
pub fn verify_pi_signature(
    public_key: &Point,
    r: &BigUint,
    alpha: &BigUint,
    c: &BigUint,
    curve: &Curve,
) -> bool {
    let g = curve.generator();
    let recomputed = g
        .mult(r)
        .and_then(|r_g| public_key.mult(c).and_then(|c_k| r_g.add(&c_k)));
    match (recomputed, g.mult(alpha)) {
        (Ok(left), Ok(right)) => left == right,
        _ => false,
    }
}
