use rand_core::OsRng;
use ring_signature::partial::{partial_sign, PartialSignature};
use ring_signature::pi_signature::pi_signature;
use ring_signature::{Curve, CurveName, KeyPair, RingSignature};

fn main() {
    let mut csprng = OsRng;
    let curve = Curve::new(CurveName::Ed25519);

    // Public keys of the other ring members
    let ring: Vec<_> = (0..4)
        .map(|_| KeyPair::create(&curve, &mut csprng).expect("Error").public_key)
        .collect();

    // The key holder only shares their public key
    let signer = KeyPair::create(&curve, &mut csprng).expect("Error");

    // The first step: the preparing party computes everything but the signer response
    let message = "Hello world !";
    let partial = partial_sign(
        &ring,
        message,
        signer.get_public_key(),
        curve,
        None,
        &mut csprng,
    )
    .expect("Error");
    let transmitted = partial.to_base64();

    // The second step: the key holder closes the ring
    let received = PartialSignature::from_base64(&transmitted).expect("Error");
    let signer_response = pi_signature(
        &received.expose_alpha(),
        received.cpi(),
        signer.get_private_key(),
        &curve,
    )
    .expect("Error");

    // The third step: the response is spliced in
    let signature = RingSignature::combine(received, signer_response).expect("Error");
    let result = signature.verify().expect("Error");

    println!("Verification result: {:?}", result);
    assert!(result);
}
