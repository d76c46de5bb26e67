#![no_main]

use libfuzzer_sys::fuzz_target;

use num_bigint::BigUint;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ring_signature::{Curve, CurveName, KeyPair, PrivateKey, RingSignature};
use sha2::{Digest, Sha512};

fuzz_target!(|data: &[u8]| {
    // Message to be signed
    let message_to_sign = "Hello world";

    // Randomness source
    let mut seeded_rng = StdRng::seed_from_u64(123);

    for name in [CurveName::Secp256k1, CurveName::Ed25519] {
        let curve = Curve::new(name);
        let scalar = BigUint::from_bytes_be(&Sha512::digest(data)) % curve.n();
        let Ok(private_key) = PrivateKey::from_scalar(&scalar, &curve) else {
            continue;
        };

        let ring: Vec<_> = (0..3)
            .map(|_| KeyPair::create(&curve, &mut seeded_rng).expect("Error").public_key)
            .collect();

        for members in [&ring[..0], &ring[..]] {
            let signature = RingSignature::sign(
                members,
                &private_key,
                message_to_sign,
                curve,
                None,
                &mut seeded_rng,
            )
            .expect("Error");

            assert!(signature.verify().expect("Error"));
        }
    }
});
