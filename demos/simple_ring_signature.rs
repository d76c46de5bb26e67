use rand_core::OsRng;
use ring_signature::{Curve, CurveName, KeyPair, RingSignature, SignatureConfig};

fn main() {
    let mut csprng = OsRng;
    let curve = Curve::new(CurveName::Secp256k1);

    // Public keys of the other ring members
    let ring: Vec<_> = (0..3)
        .map(|_| KeyPair::create(&curve, &mut csprng).expect("Error").public_key)
        .collect();

    // Signer keys
    let keys = KeyPair::create(&curve, &mut csprng).expect("Error");

    // Message to be signed
    let message = "Hello world !";

    // Signature generation
    let config = SignatureConfig::default().with_safe_mode(true);
    let signature = RingSignature::sign(
        &ring,
        keys.get_private_key(),
        message,
        curve,
        Some(config),
        &mut csprng,
    )
    .expect("Error");

    // Verification of the signature, as a verifier receiving its json form would do
    let json = signature.to_canonical_text();
    let result = RingSignature::verify_json(&json).expect("Error");

    println!("Ring size: {}", signature.ring().len());
    println!("Verification result: {:?}", result);
    assert!(result);
}
