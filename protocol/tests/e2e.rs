//! End-to-end tests for the transaction engine.
//!
//! These go through the public API only, the way a wallet would: derive
//! ids, build, sign, embed, aggregate, cosign, and lock. Expected bytes and
//! hashes come from payloads that nodes accept, so a failure here means
//! announced transactions would be rejected.

use catapult_protocol::account::{Account, Address, NetworkType, PublicAccount};
use catapult_protocol::crypto::{KeyPair, Signature};
use catapult_protocol::id::{generate_namespace_path, Mosaic, MosaicId, NamespaceId};
use catapult_protocol::transaction::{
    transaction_hash, AggregateBody, CosignatureTransaction, Deadline, LockFundsBody, Message,
    MosaicSupplyChangeBody, MosaicSupplyType, RegisterNamespaceBody, Transaction,
    TransactionBuilder, TransactionError, TransactionInfo, TransactionStage, TransactionType,
    TransferBody,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

const PRIVATE_KEY: &str = "787225AAFF3D2C71F4FFA32D4F19EC4922F3CD869747F267378F81F8E3FCB12D";
const PUBLIC_KEY: &str = "1026D70E1954775749C6811084D6450A3184D977383F0E4282CD47118AF37755";
const RECIPIENT: &str = "SDUP5PLHDXKBX3UU5Q52LAY4WYEKGEWC6IB3VBFM";
const TRANSFER_PAYLOAD: &str = "A5000000773891AD01DD4CDF6E3A55C186C673E256D7DF9D471846F1943CC3529E4E02B38B9AF3F8D13784645FF5FAAFA94A321B94933C673D12DE60E4BC05ABA56F750E1026D70E1954775749C6811084D6450A3184D977383F0E4282CD47118AF37755039054410000000000000000010000000000000090E8FEBD671DD41BEE94EC3BA5831CB608A312C2F203BA84AC01000100672B0000CE5600006400000000000000";
const TRANSFER_HASH: &str = "350AE56BC97DB805E2098AB2C596FA4C6B37EF974BF24DFD61CD9F77C7687424";

fn reference_account() -> Account {
    Account::from_private_key_hex(PRIVATE_KEY, NetworkType::MijinTest).unwrap()
}

fn account(seed: u8) -> Account {
    Account::new(KeyPair::from_seed(&[seed; 32]), NetworkType::MijinTest)
}

fn builder() -> TransactionBuilder {
    TransactionBuilder::new(NetworkType::MijinTest).deadline(Deadline::new(1))
}

fn reference_transfer() -> Transaction {
    builder()
        .build(TransferBody::new(
            Address::from_raw(RECIPIENT).unwrap(),
            vec![Mosaic::new(MosaicId::new(95442763262823), 100)],
            Message::empty(),
        ))
        .unwrap()
}

// ---------------------------------------------------------------------------
// Single transactions
// ---------------------------------------------------------------------------

#[test]
fn transfer_reference_vector() {
    let account = reference_account();
    assert_eq!(account.public_key().to_hex(), PUBLIC_KEY);

    let tx = reference_transfer();
    assert_eq!(tx.size().unwrap(), 165);
    assert!(tx.is_unannounced());

    let signed = tx.sign(&account).unwrap();
    assert_eq!(signed.payload, TRANSFER_PAYLOAD);
    assert_eq!(signed.hash, TRANSFER_HASH);
    assert_eq!(signed.transaction_type, TransactionType::Transfer);
}

#[test]
fn signature_covers_exactly_the_signing_scope() {
    let signed = reference_transfer().sign(&reference_account()).unwrap();
    let payload = signed.payload_bytes().unwrap();
    let signature = Signature::from_bytes(payload[4..68].try_into().unwrap());
    let signer = PublicAccount::from_public_key_hex(PUBLIC_KEY, NetworkType::MijinTest).unwrap();

    assert!(signer.verify(&payload[100..], &signature));
    assert!(!signer.verify(&payload[68..], &signature));
}

#[test]
fn hash_ignores_size_and_signature_tail() {
    let mut payload = hex::decode(TRANSFER_PAYLOAD).unwrap();
    payload[..4].copy_from_slice(&[0xFF; 4]);
    payload[36..68].copy_from_slice(&[0; 32]);
    assert_eq!(hex::encode_upper(transaction_hash(&payload).unwrap()), TRANSFER_HASH);

    payload[120] ^= 1;
    assert_ne!(hex::encode_upper(transaction_hash(&payload).unwrap()), TRANSFER_HASH);
}

#[test]
fn namespace_ids_feed_transactions() {
    let path = generate_namespace_path("nem.xem").unwrap();
    assert_eq!(path, vec![-8884663987180930485, -3087871471161192663]);

    let register = builder()
        .build(RegisterNamespaceBody::child("xem", NamespaceId::new(path[0])).unwrap())
        .unwrap();
    let bytes = register.generate_bytes().unwrap();
    assert_eq!(&bytes[102..104], &[0x4E, 0x41]);

    let alias_transfer = builder()
        .build(TransferBody::new(
            NamespaceId::new(path[0]),
            vec![Mosaic::new(NamespaceId::new(path[1]), 1)],
            Message::plain("alias"),
        ))
        .unwrap();
    let bytes = alias_transfer.generate_bytes().unwrap();
    assert_eq!(bytes[120], 0x91);
    assert_eq!(&bytes[121..129], &(path[0] as u64).to_le_bytes());
    assert_eq!(&bytes[129..145], &[0u8; 16]);
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

#[test]
fn embedding_drops_signature_fee_and_deadline() {
    let tx = reference_transfer().with_max_fee(500);
    let full = tx.generate_bytes().unwrap();
    let signer = reference_account().public_account();
    let embedded = tx.to_embedded(&signer).unwrap();

    assert_eq!(embedded.size(), full.len() - 80);
    assert_eq!(&embedded.bytes[..4], &85u32.to_le_bytes());
    assert_eq!(&embedded.bytes[4..36], signer.public_key.as_bytes());
    assert_eq!(&embedded.bytes[36..40], &full[100..104]);
    assert_eq!(&embedded.bytes[40..], &full[120..]);
    assert_eq!(tx.max_fee(), 500);
}

#[test]
fn complete_aggregate_with_cosigners() {
    let initiator = account(1);
    let cosigners = [account(2), account(3)];

    let first = reference_transfer()
        .to_embedded(&initiator.public_account())
        .unwrap();
    let second = builder()
        .build(MosaicSupplyChangeBody::new(
            MosaicId::new(95442763262823),
            MosaicSupplyType::Increase,
            1_000,
        ))
        .unwrap()
        .to_embedded(&cosigners[0].public_account())
        .unwrap();

    let aggregate = Transaction::aggregate_complete(
        Deadline::new(1),
        vec![first.clone(), second.clone()],
        NetworkType::MijinTest,
    );
    let unsigned = aggregate.generate_bytes().unwrap();
    assert_eq!(&unsigned[124..124 + first.size()], &first.bytes[..]);
    assert_eq!(&unsigned[124 + first.size()..], &second.bytes[..]);

    let initiator_only = aggregate.sign(&initiator).unwrap();
    let signed = aggregate
        .sign_with_cosignatories(&initiator, &cosigners)
        .unwrap();
    assert_eq!(signed.hash, initiator_only.hash);

    let payload = signed.payload_bytes().unwrap();
    let base = unsigned.len();
    assert_eq!(payload.len(), base + 2 * 96);
    assert_eq!(u32::from_le_bytes(payload[..4].try_into().unwrap()) as usize, payload.len());

    let hash = signed.hash_bytes().unwrap();
    for (i, cosigner) in cosigners.iter().enumerate() {
        let pair = &payload[base + 96 * i..base + 96 * (i + 1)];
        assert_eq!(&pair[..32], cosigner.public_key().as_bytes());
        let signature = Signature::from_bytes(pair[32..].try_into().unwrap());
        assert!(cosigner.public_account().verify(&hash, &signature));
    }
}

#[test]
fn bonded_aggregate_requires_lock_funds_and_cosignatures() {
    let initiator = account(1);
    let cosigner = account(2);
    let inner = reference_transfer()
        .to_embedded(&cosigner.public_account())
        .unwrap();

    let bonded = Transaction::aggregate_bonded(Deadline::new(1), vec![inner], NetworkType::MijinTest);
    let signed_bonded = bonded.sign(&initiator).unwrap();
    assert_eq!(signed_bonded.transaction_type, TransactionType::AggregateBonded);

    let lock = LockFundsBody::new(
        Mosaic::new(MosaicId::new(95442763262823), 10_000_000),
        480,
        &signed_bonded,
    )
    .unwrap();
    let lock_bytes = builder().build(lock).unwrap().generate_bytes().unwrap();
    assert_eq!(&lock_bytes[102..104], &[0x48, 0x41]);
    assert_eq!(&lock_bytes[144..176], &signed_bonded.hash_bytes().unwrap());

    let signed_transfer = reference_transfer().sign(&initiator).unwrap();
    assert_eq!(
        LockFundsBody::new(Mosaic::new(MosaicId::new(1), 1), 1, &signed_transfer),
        Err(TransactionError::UnsupportedSignedTransactionType(
            TransactionType::Transfer
        ))
    );

    // Once announced, the node reports the bonded aggregate as missing
    // signatures and the cosigner signs its hash.
    let announced = bonded.with_info(TransactionInfo::create(
        0,
        None,
        None,
        signed_bonded.hash.clone(),
        "00",
    ));
    assert_eq!(announced.stage(), TransactionStage::MissingSignatures);

    let cosignature = CosignatureTransaction::create(&announced)
        .unwrap()
        .sign_with(&cosigner);
    assert_eq!(cosignature.parent_hash, signed_bonded.hash);
    assert!(cosigner
        .public_account()
        .verify(&signed_bonded.hash_bytes().unwrap(), &cosignature.signature));

    match announced.body() {
        catapult_protocol::transaction::TransactionBody::Aggregate(AggregateBody {
            inner_transactions,
            ..
        }) => assert_eq!(inner_transactions.len(), 1),
        other => panic!("expected aggregate body, got {other:?}"),
    }
}

#[test]
fn signed_transaction_serializes_for_announcement() {
    let signed = reference_transfer().sign(&reference_account()).unwrap();
    let json = serde_json::to_value(&signed).unwrap();
    assert_eq!(json["payload"], TRANSFER_PAYLOAD);
    assert_eq!(json["hash"], TRANSFER_HASH);

    let back: catapult_protocol::transaction::SignedTransaction =
        serde_json::from_value(json).unwrap();
    assert_eq!(back, signed);
}
