//! Modular arithmetic over field and group integers.
//!
//! Every reduction used by the curves and the signing engine goes through the
//! helpers below. None of them are constant time.

use num_bigint::BigUint;
use num_traits::{One, Zero};

/// (a + b) mod m
pub fn mod_add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// (a - b) mod m, always in [0, m)
pub fn mod_sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    let a = a % m;
    let b = b % m;
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

/// (a * b) mod m
pub fn mod_mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// base^exponent mod m
pub fn mod_pow(base: &BigUint, exponent: &BigUint, m: &BigUint) -> BigUint {
    base.modpow(exponent, m)
}

/// Square root of `a` modulo a prime `p ≡ 3 (mod 4)`.
///
/// Returns `None` when `a` is not a quadratic residue.
pub fn mod_sqrt(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    let a = a % p;
    let exponent = (p + BigUint::one()) >> 2;
    let root = mod_pow(&a, &exponent, p);
    if mod_mul(&root, &root, p) == a {
        Some(root)
    } else {
        None
    }
}

/// Square root of `u / v` modulo a prime `p ≡ 5 (mod 8)`.
///
/// Computes the candidate `u·v³·(u·v⁷)^((p−5)/8)` and fixes it up with
/// `sqrt_m1` (a square root of −1) when it squares to `−u/v`.
/// Returns `None` when `u / v` is not a square.
pub fn mod_sqrt_ratio(u: &BigUint, v: &BigUint, p: &BigUint, sqrt_m1: &BigUint) -> Option<BigUint> {
    let u = u % p;
    let v = v % p;
    let v3 = mod_mul(&mod_mul(&v, &v, p), &v, p);
    let v7 = mod_mul(&mod_mul(&v3, &v3, p), &v, p);
    let exponent = (p - BigUint::from(5u8)) >> 3;
    let candidate = mod_mul(
        &mod_mul(&u, &v3, p),
        &mod_pow(&mod_mul(&u, &v7, p), &exponent, p),
        p,
    );

    let check = mod_mul(&v, &mod_mul(&candidate, &candidate, p), p);
    if check == u {
        Some(candidate)
    } else if check == mod_sub(&BigUint::zero(), &u, p) {
        Some(mod_mul(&candidate, sqrt_m1, p))
    } else {
        None
    }
}

/// Returns true if the lowest bit of `value` is set.
pub fn is_odd(value: &BigUint) -> bool {
    value.bit(0)
}

/// Big-endian, zero-padded, 32-byte encoding. `None` if `value` needs more bytes.
pub fn to_be_bytes_32(value: &BigUint) -> Option<[u8; 32]> {
    let bytes = value.to_bytes_be();
    if bytes.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

/// Little-endian, zero-padded, 32-byte encoding. `None` if `value` needs more bytes.
pub fn to_le_bytes_32(value: &BigUint) -> Option<[u8; 32]> {
    let bytes = value.to_bytes_le();
    if bytes.len() > 32 {
        return None;
    }
    let mut out = [0u8; 32];
    out[..bytes.len()].copy_from_slice(&bytes);
    Some(out)
}
