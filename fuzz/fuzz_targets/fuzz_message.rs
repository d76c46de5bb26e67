#![no_main]

use libfuzzer_sys::fuzz_target;

use rand::rngs::StdRng;
use rand::SeedableRng;
use ring_signature::partial::partial_sign;
use ring_signature::pi_signature::pi_signature;
use ring_signature::{Curve, CurveName, KeyPair, RingSignature};

fuzz_target!(|data: &[u8]| {
    // Message to be signed
    if let Ok(message_to_sign) = std::str::from_utf8(data) {
        // Randomness source
        let mut seeded_rng = StdRng::seed_from_u64(123);
        let curve = Curve::new(CurveName::Secp256k1);

        let ring: Vec<_> = (0..2)
            .map(|_| KeyPair::create(&curve, &mut seeded_rng).expect("Error").public_key)
            .collect();
        let keys = KeyPair::create(&curve, &mut seeded_rng).expect("Error");

        // Full signature
        let signature = RingSignature::sign(
            &ring,
            keys.get_private_key(),
            message_to_sign,
            curve,
            None,
            &mut seeded_rng,
        )
        .expect("Error");
        assert!(signature.verify().expect("Error"));

        // The canonical text must survive arbitrary messages
        let parsed =
            RingSignature::from_canonical_text(&signature.to_canonical_text()).expect("Error");
        assert_eq!(parsed, signature);

        // Partial signature completed by the key holder
        let partial = partial_sign(
            &ring,
            message_to_sign,
            keys.get_public_key(),
            curve,
            None,
            &mut seeded_rng,
        )
        .expect("Error");
        let response = pi_signature(
            &partial.expose_alpha(),
            partial.cpi(),
            keys.get_private_key(),
            &curve,
        )
        .expect("Error");
        let combined = partial.combine(response).expect("Error");

        assert!(combined.verify().expect("Error"));
    }
});
