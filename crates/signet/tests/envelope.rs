//! End-to-end envelope distribution tests.
//!
//! Exercises the full creator/recipient flow against the in-memory store:
//! envelope creation, fingerprint verification, condition-gated key
//! release, local unwrapping, and the invitation lifecycle.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use signet::{
    AccessError, Clock, ContentKey, Coordinator, CoordinatorError, DeliveryStatus,
    DocumentFingerprint, EncryptedPayload, Identity, MapResolver, MemoryStore, RecordStore,
    StoreError, X25519StaticSecret,
};

/// A clock tests can move forward.
#[derive(Clone, Default)]
struct TestClock(Arc<AtomicI64>);

impl TestClock {
    fn at(now: i64) -> Self {
        Self(Arc::new(AtomicI64::new(now)))
    }

    fn set(&self, now: i64) {
        self.0.store(now, Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now(&self) -> i64 {
        self.0.load(Ordering::SeqCst)
    }
}

const NOW: i64 = 1_700_000_000;

struct Party {
    identity: Identity,
    secret: X25519StaticSecret,
}

fn party(name: &str, seed: u8) -> Party {
    Party {
        identity: Identity::new(name),
        secret: X25519StaticSecret::from_bytes([seed; 32]),
    }
}

fn coordinator_for(
    parties: &[&Party],
    clock: TestClock,
) -> Coordinator<MemoryStore, MapResolver, TestClock> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut resolver = MapResolver::new();
    for p in parties {
        resolver.insert(p.identity.clone(), p.secret.public_key());
    }
    Coordinator::new(MemoryStore::new(), resolver, clock)
}

/// Unwrap a released key and decrypt the payload with it.
fn open_payload(
    payload: &EncryptedPayload,
    wrapped: &signet::WrappedKey,
    secret: &X25519StaticSecret,
) -> Vec<u8> {
    let key_hex = wrapped.unwrap(secret).unwrap();
    let content_key = ContentKey::from_hex(&key_hex).unwrap();
    payload.decrypt(&content_key).unwrap()
}

#[tokio::test]
async fn test_three_party_roundtrip() {
    let creator = party("0xC0FFEE", 1);
    let signers = [party("0xAAA", 2), party("0xBBB", 3), party("0xCCC", 4)];

    let coordinator = coordinator_for(
        &[&creator, &signers[0], &signers[1], &signers[2]],
        TestClock::at(NOW),
    );

    let plaintext = b"Agreement: all three parties sign below.";
    let recipients: Vec<Identity> = signers.iter().map(|p| p.identity.clone()).collect();

    let envelope = coordinator
        .create_envelope(&creator.identity, plaintext, &recipients, None)
        .await
        .unwrap();

    // The fingerprint covers the framed payload bytes.
    assert!(coordinator.verify_payload(&envelope.payload.to_bytes(), &envelope.fingerprint));

    // Creator + 3 signers hold wrapped keys.
    assert_eq!(envelope.wrapped_keys.len(), 4);
    assert_eq!(coordinator.store().record_count(), 4);

    // Every signer can get their key released and recover the plaintext.
    for signer in &signers {
        let wrapped = coordinator
            .request_unwrap(&envelope.fingerprint, &signer.identity)
            .await
            .unwrap();
        assert_eq!(
            open_payload(&envelope.payload, &wrapped, &signer.secret),
            plaintext
        );
    }

    // The creator's own copy works the same way.
    let wrapped = coordinator
        .request_unwrap(&envelope.fingerprint, &creator.identity)
        .await
        .unwrap();
    assert_eq!(
        open_payload(&envelope.payload, &wrapped, &creator.secret),
        plaintext
    );
}

#[tokio::test]
async fn test_identity_matching_is_case_insensitive() {
    let creator = party("0xC0FFEE", 1);
    let signer = party("0xAbCd", 2);
    let coordinator = coordinator_for(&[&creator, &signer], TestClock::at(NOW));

    let envelope = coordinator
        .create_envelope(
            &creator.identity,
            b"doc",
            &[Identity::new("0xABCD")],
            None,
        )
        .await
        .unwrap();

    coordinator
        .request_unwrap(&envelope.fingerprint, &Identity::new("0xabcd"))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_stranger_has_no_record() {
    let creator = party("0xC0FFEE", 1);
    let signer = party("0xAAA", 2);
    let coordinator = coordinator_for(&[&creator, &signer], TestClock::at(NOW));

    let envelope = coordinator
        .create_envelope(&creator.identity, b"doc", &[signer.identity.clone()], None)
        .await
        .unwrap();

    let err = coordinator
        .request_unwrap(&envelope.fingerprint, &Identity::new("0xstranger"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::RecipientNotFound { .. }));
}

#[tokio::test]
async fn test_expiry_gates_key_release() {
    let creator = party("0xC0FFEE", 1);
    let signer = party("0xAAA", 2);
    let clock = TestClock::at(NOW);
    let coordinator = coordinator_for(&[&creator, &signer], clock.clone());

    let expiry = NOW + 3600;
    let envelope = coordinator
        .create_envelope(
            &creator.identity,
            b"sign before the deadline",
            &[signer.identity.clone()],
            Some(expiry),
        )
        .await
        .unwrap();

    // Before and at the deadline: released.
    clock.set(expiry - 1);
    coordinator
        .request_unwrap(&envelope.fingerprint, &signer.identity)
        .await
        .unwrap();
    clock.set(expiry);
    coordinator
        .request_unwrap(&envelope.fingerprint, &signer.identity)
        .await
        .unwrap();

    // Past the deadline: denied, not an internal error.
    clock.set(expiry + 1);
    let err = coordinator
        .request_unwrap(&envelope.fingerprint, &signer.identity)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::AccessDenied { .. }));

    // The creator's copy does not expire.
    coordinator
        .request_unwrap(&envelope.fingerprint, &creator.identity)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_unresolvable_recipient_aborts_whole_envelope() {
    let creator = party("0xC0FFEE", 1);
    let known: Vec<Party> = (0..4).map(|i| party(&format!("0x{}", i), 10 + i as u8)).collect();
    let coordinator = coordinator_for(
        &[&creator, &known[0], &known[1], &known[2], &known[3]],
        TestClock::at(NOW),
    );

    // Recipient 3 of 5 has no resolvable key.
    let recipients = vec![
        known[0].identity.clone(),
        known[1].identity.clone(),
        Identity::new("0xunknown"),
        known[2].identity.clone(),
        known[3].identity.clone(),
    ];

    let err = coordinator
        .create_envelope(&creator.identity, b"doc", &recipients, None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::UnknownIdentity(_)));

    // Nothing was persisted for anyone.
    assert_eq!(coordinator.store().record_count(), 0);
    for recipient in &recipients {
        assert!(coordinator
            .store()
            .get_record(&DocumentFingerprint::ZERO, recipient)
            .await
            .unwrap()
            .is_none());
        assert!(coordinator
            .records_for_recipient(recipient)
            .await
            .unwrap()
            .is_empty());
    }
}

#[tokio::test]
async fn test_empty_recipient_list_rejected() {
    let creator = party("0xC0FFEE", 1);
    let coordinator = coordinator_for(&[&creator], TestClock::at(NOW));

    let err = coordinator
        .create_envelope(&creator.identity, b"doc", &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::NoRecipients));
}

#[tokio::test]
async fn test_deferred_key_lifecycle() {
    let creator = party("0xC0FFEE", 1);
    let signer = party("0xAAA", 2);
    let late = party("0xLATE", 3);
    let coordinator = coordinator_for(&[&creator, &signer], TestClock::at(NOW));

    let envelope = coordinator
        .create_envelope(&creator.identity, b"doc", &[signer.identity.clone()], None)
        .await
        .unwrap();

    // Invite a signer whose key is not known yet.
    let record = coordinator
        .invite_recipient(&envelope.fingerprint, &late.identity, None)
        .await
        .unwrap();
    assert_eq!(record.status, DeliveryStatus::Pending);

    // Condition passes but there is nothing to release yet.
    let err = coordinator
        .request_unwrap(&envelope.fingerprint, &late.identity)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::KeyNotDelivered { .. }));

    // Delivery before key registration is rejected.
    let content_key_hex = coordinator
        .request_unwrap(&envelope.fingerprint, &creator.identity)
        .await
        .unwrap()
        .unwrap(&creator.secret)
        .unwrap();
    let content_key = ContentKey::from_hex(&content_key_hex).unwrap();

    let err = coordinator
        .deliver_wrapped_key(&envelope.fingerprint, &late.identity, &content_key)
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::KeyNotProvided { .. }));

    // The invitee registers their public key.
    let record = coordinator
        .register_recipient_key(
            &envelope.fingerprint,
            &late.identity,
            late.secret.public_key(),
        )
        .await
        .unwrap();
    assert_eq!(record.status, DeliveryStatus::KeyProvided);

    // The creator recovers the content key from their own copy and wraps it
    // for the newcomer.
    let record = coordinator
        .deliver_wrapped_key(&envelope.fingerprint, &late.identity, &content_key)
        .await
        .unwrap();
    assert_eq!(record.status, DeliveryStatus::Ready);

    // Now the newcomer can read the document.
    let wrapped = coordinator
        .request_unwrap(&envelope.fingerprint, &late.identity)
        .await
        .unwrap();
    assert_eq!(open_payload(&envelope.payload, &wrapped, &late.secret), b"doc");

    // And signing completes the lifecycle.
    let record = coordinator
        .mark_signed(&envelope.fingerprint, &late.identity)
        .await
        .unwrap();
    assert_eq!(record.status, DeliveryStatus::Signed);

    // The document record picked up the late invitee.
    let document = coordinator
        .document(&envelope.fingerprint)
        .await
        .unwrap()
        .unwrap();
    assert!(document.recipients.contains(&late.identity));
}

#[tokio::test]
async fn test_invite_to_unknown_document_fails() {
    let creator = party("0xC0FFEE", 1);
    let coordinator = coordinator_for(&[&creator], TestClock::at(NOW));

    let err = coordinator
        .invite_recipient(
            &DocumentFingerprint::digest(b"never created"),
            &Identity::new("0xaaa"),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoordinatorError::DocumentNotFound(_)));
}

#[tokio::test]
async fn test_status_never_moves_backward() {
    let creator = party("0xC0FFEE", 1);
    let signer = party("0xAAA", 2);
    let coordinator = coordinator_for(&[&creator, &signer], TestClock::at(NOW));

    let envelope = coordinator
        .create_envelope(&creator.identity, b"doc", &[signer.identity.clone()], None)
        .await
        .unwrap();

    coordinator
        .update_status(&envelope.fingerprint, &signer.identity, DeliveryStatus::Ready)
        .await
        .unwrap();

    let err = coordinator
        .update_status(
            &envelope.fingerprint,
            &signer.identity,
            DeliveryStatus::Pending,
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoordinatorError::Store(StoreError::BackwardTransition { .. })
    ));

    // Still where it was.
    let records = coordinator
        .records_for_document(&envelope.fingerprint)
        .await
        .unwrap();
    let record = records
        .iter()
        .find(|r| r.recipient == signer.identity)
        .unwrap();
    assert_eq!(record.status, DeliveryStatus::Ready);
}

#[tokio::test]
async fn test_tampered_payload_fails_verification_and_decryption() {
    let creator = party("0xC0FFEE", 1);
    let signer = party("0xAAA", 2);
    let coordinator = coordinator_for(&[&creator, &signer], TestClock::at(NOW));

    let envelope = coordinator
        .create_envelope(&creator.identity, b"doc", &[signer.identity.clone()], None)
        .await
        .unwrap();

    let mut bytes = envelope.payload.to_bytes();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;

    // The fingerprint check catches the tamper before any key release.
    assert!(!coordinator.verify_payload(&bytes, &envelope.fingerprint));

    // And the cipher catches it even if verification is skipped.
    let wrapped = coordinator
        .request_unwrap(&envelope.fingerprint, &signer.identity)
        .await
        .unwrap();
    let key_hex = wrapped.unwrap(&signer.secret).unwrap();
    let content_key = ContentKey::from_hex(&key_hex).unwrap();
    let tampered = EncryptedPayload::from_bytes(&bytes).unwrap();
    assert!(tampered.decrypt(&content_key).is_err());
}

#[tokio::test]
async fn test_malformed_stored_condition_is_an_error_not_a_denial() {
    use signet::{AccessCondition, RecipientKeyRecord};

    let creator = party("0xC0FFEE", 1);
    let coordinator = coordinator_for(&[&creator], TestClock::at(NOW));

    // A broken tree can only arrive through storage, e.g. deserialized from
    // a corrupted record.
    let fingerprint = DocumentFingerprint::digest(b"doc");
    let record = RecipientKeyRecord::new(
        fingerprint,
        Identity::new("0xaaa"),
        AccessCondition::Identity(Identity::new("")),
        NOW,
    );
    coordinator.store().put_record(&record).await.unwrap();

    let err = coordinator
        .request_unwrap(&fingerprint, &Identity::new("0xaaa"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CoordinatorError::Access(AccessError::MalformedCondition(_))
    ));
}
