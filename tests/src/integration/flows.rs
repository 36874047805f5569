//! # Integration Test Flows
//!
//! Tests that shared-cose, shared-address, and wallet-auth work
//! together correctly across the full "login with wallet" choreography:
//!
//! 1. **Backend**: issues a nonce-bearing challenge payload
//! 2. **Wallet** (simulated): embeds its address claim in the protected
//!    headers, signs the challenge into an envelope, ships the envelope
//!    plus its key material
//! 3. **Backend**: drives `WalletAuthApi::verify` over the hex boundary
//!    and branches on the outcome
//!
//! Every exchange crosses the hex boundary exactly as an HTTP handler
//! would see it.

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    // Address codec
    use shared_address::{
        Address, BaseAddress, Credential, KeyHash, RewardAddress, MAINNET, TESTNET,
    };

    // Envelope codec
    use shared_cose::{EnvelopeBuilder, KeyMaterial, Label, SignedEnvelope, Value};

    // Verification core
    use wallet_auth::{AuthError, AuthErrorKind, PublicKey, WalletAuthApi, WalletAuthService};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// A simulated wallet: one signing key and the address it claims.
    struct Wallet {
        signing: SigningKey,
        address: Address,
    }

    impl Wallet {
        /// Wallet holding a base address on the given network.
        fn with_base_address(network: u8) -> Self {
            let signing = SigningKey::generate(&mut rand::thread_rng());
            let public = PublicKey::from_bytes(signing.verifying_key().as_bytes()).unwrap();
            let address = BaseAddress::new(
                network,
                Credential::KeyHash(public.key_hash()),
                Credential::KeyHash(KeyHash::from_bytes([0x51; 28])),
            )
            .to_address();
            Self { signing, address }
        }

        /// Wallet holding a reward address on the given network.
        fn with_reward_address(network: u8) -> Self {
            let signing = SigningKey::generate(&mut rand::thread_rng());
            let public = PublicKey::from_bytes(signing.verifying_key().as_bytes()).unwrap();
            let address =
                RewardAddress::new(network, Credential::KeyHash(public.key_hash())).to_address();
            Self { signing, address }
        }

        fn address_hex(&self) -> String {
            hex::encode(self.address.as_bytes())
        }

        /// Respond to a challenge the way a wallet extension does:
        /// sign it into an envelope and expose the key material.
        fn respond(&self, challenge: &[u8]) -> (String, String) {
            let envelope = EnvelopeBuilder::new()
                .protected_header(Label::Int(1), Value::Int(-8))
                .protected_header(
                    Label::text("address"),
                    Value::Bytes(self.address.as_bytes().to_vec()),
                )
                .unprotected_header(Label::text("hashed"), Value::Int(0))
                .payload(challenge)
                .sign_with(|data| self.signing.sign(data).to_bytes().to_vec())
                .unwrap();

            let public = PublicKey::from_bytes(self.signing.verifying_key().as_bytes()).unwrap();
            let key_material = KeyMaterial::new()
                .set_slot(1, Value::Int(1))
                .set_slot(3, Value::Int(-8))
                .set_slot(-1, Value::Int(6))
                .set_slot(
                    shared_cose::PUBLIC_KEY_SLOT,
                    Value::Bytes(public.as_bytes().to_vec()),
                );

            (
                envelope.to_hex().unwrap(),
                key_material.to_hex().unwrap(),
            )
        }
    }

    /// Backend-issued challenge: human-readable context plus a nonce.
    fn issue_challenge(nonce: &str) -> Vec<u8> {
        format!("walletgate login: {nonce}").into_bytes()
    }

    // =============================================================================
    // INTEGRATION TESTS: FULL LOGIN CHOREOGRAPHY
    // =============================================================================

    /// A well-behaved wallet with a base address authenticates.
    #[test]
    fn test_login_flow_base_address() {
        init_tracing();
        let service = WalletAuthService::new();
        let wallet = Wallet::with_base_address(TESTNET);

        let challenge = issue_challenge("nonce-123");
        let (envelope_hex, key_hex) = wallet.respond(&challenge);

        let verdict = service.verify(
            &wallet.address_hex(),
            &hex::encode(&challenge),
            &envelope_hex,
            &key_hex,
        );
        assert!(matches!(verdict, Ok(true)));
    }

    /// A well-behaved wallet with a reward address authenticates, on
    /// both networks.
    #[test]
    fn test_login_flow_reward_address() {
        init_tracing();
        let service = WalletAuthService::new();

        for network in [TESTNET, MAINNET] {
            let wallet = Wallet::with_reward_address(network);
            let challenge = issue_challenge("nonce-456");
            let (envelope_hex, key_hex) = wallet.respond(&challenge);

            let verdict = service.verify(
                &wallet.address_hex(),
                &hex::encode(&challenge),
                &envelope_hex,
                &key_hex,
            );
            assert!(matches!(verdict, Ok(true)), "network {network}");
        }
    }

    /// A replayed response to a different challenge is rejected as a
    /// payload mismatch, and the boundary classifies it as denial.
    #[test]
    fn test_replayed_response_is_denied() {
        init_tracing();
        let service = WalletAuthService::new();
        let wallet = Wallet::with_base_address(TESTNET);

        let old_challenge = issue_challenge("nonce-123");
        let (envelope_hex, key_hex) = wallet.respond(&old_challenge);

        // The backend has since issued a fresh nonce.
        let fresh_challenge = issue_challenge("nonce-124");
        let verdict = service.verify(
            &wallet.address_hex(),
            &hex::encode(&fresh_challenge),
            &envelope_hex,
            &key_hex,
        );

        let err = verdict.unwrap_err();
        assert!(matches!(err, AuthError::PayloadMismatch));
        assert_eq!(err.kind(), AuthErrorKind::PayloadMismatch);
    }

    /// A wallet claiming someone else's address cannot authenticate,
    /// even with a perfectly valid signature of its own.
    #[test]
    fn test_address_spoofing_is_denied() {
        init_tracing();
        let service = WalletAuthService::new();
        let victim = Wallet::with_base_address(TESTNET);
        let attacker = Wallet::with_base_address(TESTNET);

        let challenge = issue_challenge("nonce-123");
        // The attacker signs honestly with their own key but claims the
        // victim's address at the boundary.
        let (envelope_hex, key_hex) = attacker.respond(&challenge);

        let verdict = service.verify(
            &victim.address_hex(),
            &hex::encode(&challenge),
            &envelope_hex,
            &key_hex,
        );

        let err = verdict.unwrap_err();
        assert!(matches!(err, AuthError::AddressMismatch));
        assert_eq!(err.kind(), AuthErrorKind::AddressMismatch);
    }

    /// An attacker embedding the victim's address in the envelope still
    /// fails: the binding check requires the signing key to reconstruct
    /// the claimed address.
    #[test]
    fn test_forged_claim_with_foreign_key_is_denied() {
        init_tracing();
        let service = WalletAuthService::new();
        let victim = Wallet::with_base_address(TESTNET);
        let attacker = Wallet::with_base_address(TESTNET);

        let challenge = issue_challenge("nonce-123");

        // Attacker forges an envelope embedding the victim's address.
        let envelope = EnvelopeBuilder::new()
            .protected_header(Label::Int(1), Value::Int(-8))
            .protected_header(
                Label::text("address"),
                Value::Bytes(victim.address.as_bytes().to_vec()),
            )
            .payload(&challenge)
            .sign_with(|data| attacker.signing.sign(data).to_bytes().to_vec())
            .unwrap();
        let attacker_public =
            PublicKey::from_bytes(attacker.signing.verifying_key().as_bytes()).unwrap();
        let key_material = KeyMaterial::new().set_slot(
            shared_cose::PUBLIC_KEY_SLOT,
            Value::Bytes(attacker_public.as_bytes().to_vec()),
        );

        let verdict = service.verify(
            &victim.address_hex(),
            &hex::encode(&challenge),
            &envelope.to_hex().unwrap(),
            &key_material.to_hex().unwrap(),
        );
        assert!(matches!(verdict, Err(AuthError::AddressMismatch)));
    }

    /// Garbage from the wire surfaces as a protocol error, never as a
    /// silent denial or a verdict.
    #[test]
    fn test_garbage_input_is_a_protocol_error() {
        init_tracing();
        let service = WalletAuthService::new();
        let wallet = Wallet::with_base_address(TESTNET);
        let challenge = issue_challenge("nonce-123");
        let (envelope_hex, key_hex) = wallet.respond(&challenge);

        // Not hex at all.
        let verdict = service.verify("xyz", &hex::encode(&challenge), &envelope_hex, &key_hex);
        assert_eq!(verdict.unwrap_err().kind(), AuthErrorKind::MalformedInput);

        // Hex, but not an envelope.
        let verdict = service.verify(
            &wallet.address_hex(),
            &hex::encode(&challenge),
            "deadbeef",
            &key_hex,
        );
        assert_eq!(verdict.unwrap_err().kind(), AuthErrorKind::MalformedInput);

        // Hex, but not key material.
        let verdict = service.verify(
            &wallet.address_hex(),
            &hex::encode(&challenge),
            &envelope_hex,
            "deadbeef",
        );
        assert_eq!(verdict.unwrap_err().kind(), AuthErrorKind::MalformedInput);
    }

    /// The envelope decoded by the codec exposes exactly the byte range
    /// the wallet signed, so verification is stable across a wire
    /// roundtrip.
    #[test]
    fn test_signed_byte_range_survives_wire_roundtrip() {
        init_tracing();
        let wallet = Wallet::with_base_address(TESTNET);
        let challenge = issue_challenge("nonce-789");
        let (envelope_hex, _) = wallet.respond(&challenge);

        let decoded = SignedEnvelope::from_hex(&envelope_hex).unwrap();
        let reencoded = SignedEnvelope::from_hex(&decoded.to_hex().unwrap()).unwrap();

        assert_eq!(
            decoded.signed_data().unwrap(),
            reencoded.signed_data().unwrap()
        );
        assert_eq!(decoded.payload(), Some(challenge.as_slice()));
    }

    /// Many independent logins verify concurrently through the batch
    /// entry point.
    #[test]
    fn test_concurrent_logins_batch() {
        init_tracing();
        let service = WalletAuthService::new();

        let requests: Vec<_> = (0..16)
            .map(|i| {
                let wallet = Wallet::with_base_address(TESTNET);
                let challenge = issue_challenge(&format!("nonce-{i}"));
                let (envelope_hex, key_hex) = wallet.respond(&challenge);
                wallet_auth::VerificationRequest {
                    address: wallet.address_hex(),
                    payload: hex::encode(&challenge),
                    envelope: envelope_hex,
                    key_material: key_hex,
                }
            })
            .collect();

        let result = service.batch_verify(&requests);

        assert!(result.all_valid);
        assert_eq!(result.valid_count, 16);
    }
}
