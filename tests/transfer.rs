use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use num_bigint::BigInt;
use parity_scale_codec::Encode;
use wasm_dot_transfer::{
    fetch_context, signing_message, signing_payload, AccountId, BalancesTransfer, BoxError,
    ChainContext, ErrorKind, MultiSignature, Signer, Sr25519Signer, TransferConfig,
    TransferError, H256,
};

const BOB: &str = "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty";
const GENESIS: &str = "0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3";

/// call (6, 0, Id(bob), compact(1111)) followed by the extra for
/// spec 264, tx 2, GENESIS twice, immortal era, nonce 0, tip 0
const GOLDEN_PAYLOAD: &str = concat!(
    "0600008eaf04151687736326c9fea17e25fc5287613693c912909cb226aa4794",
    "f26a485d11080100000200000091b171bb158e2d3848fa23a9f1c25182fb8e20",
    "313b2c1eb49219da7a70ce90c391b171bb158e2d3848fa23a9f1c25182fb8e20",
    "313b2c1eb49219da7a70ce90c3000000",
);

/// Chain mock with per-request delays and failures
#[derive(Default)]
struct MockChain {
    nonce: u64,
    genesis_delay: Duration,
    nonce_delay: Duration,
    fail_genesis: bool,
    fail_nonce: bool,
    requests: AtomicUsize,
    nonce_completed: AtomicBool,
}

impl MockChain {
    fn new(nonce: u64) -> Self {
        Self {
            nonce,
            ..Default::default()
        }
    }
}

#[async_trait]
impl ChainContext for MockChain {
    async fn genesis_hash(&self) -> Result<H256, BoxError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.genesis_delay).await;
        if self.fail_genesis {
            return Err("genesis request timed out".into());
        }
        Ok(H256::from_hex(GENESIS)?)
    }

    async fn account_nonce(&self, _account: &AccountId) -> Result<u64, BoxError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.nonce_delay).await;
        self.nonce_completed.store(true, Ordering::SeqCst);
        if self.fail_nonce {
            return Err("system_accountNextIndex failed".into());
        }
        Ok(self.nonce)
    }
}

/// Signer that counts how often it was asked to sign
struct CountingSigner {
    inner: Sr25519Signer,
    calls: AtomicUsize,
}

impl CountingSigner {
    fn new() -> Self {
        Self {
            inner: Sr25519Signer::from_seed(&[0x2a; 32]).unwrap(),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Signer for CountingSigner {
    fn account_id(&self) -> AccountId {
        self.inner.account_id()
    }

    fn sign(&self, message: &[u8]) -> Result<MultiSignature, TransferError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.sign(message)
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn bob() -> AccountId {
    BOB.parse().unwrap()
}

#[tokio::test]
async fn test_transfer_matches_golden_payload() {
    init_tracing();
    let pallet = BalancesTransfer::new(MockChain::new(0), TransferConfig::default());
    let signer = CountingSigner::new();

    let xt = pallet
        .transfer(&signer, bob(), &BigInt::from(1111))
        .await
        .unwrap();

    let payload = signing_payload(xt.call(), xt.extra());
    assert_eq!(hex::encode(&payload), GOLDEN_PAYLOAD);
    assert_eq!(payload.len(), 112);

    // under the threshold, so the raw payload is what got signed
    assert_eq!(signing_message(&payload).as_ref(), &payload[..]);
    assert!(xt.signature().verify(&payload, &signer.account_id()));
    assert_eq!(signer.calls(), 1);

    let wire = xt.encode();
    assert_eq!(&wire[..3], &[0x2d, 0x02, 0x84]);
    assert_eq!(&wire[4..36], signer.account_id().as_bytes());
    assert!(wire.ends_with(&xt.call().encode()));
}

#[tokio::test]
async fn test_completion_order_does_not_change_extra() {
    let signer = CountingSigner::new();

    let genesis_last = MockChain {
        nonce: 9,
        genesis_delay: Duration::from_millis(30),
        ..Default::default()
    };
    let nonce_last = MockChain {
        nonce: 9,
        nonce_delay: Duration::from_millis(30),
        ..Default::default()
    };

    let first = BalancesTransfer::new(genesis_last, TransferConfig::default())
        .transfer(&signer, bob(), &BigInt::from(1111))
        .await
        .unwrap();
    let second = BalancesTransfer::new(nonce_last, TransferConfig::default())
        .transfer(&signer, bob(), &BigInt::from(1111))
        .await
        .unwrap();

    assert_eq!(first.extra(), second.extra());
    assert_eq!(first.extra().encode(), second.extra().encode());
    assert_eq!(first.extra().nonce(), 9);
}

#[tokio::test(start_paused = true)]
async fn test_fetches_run_concurrently() {
    let chain = MockChain {
        genesis_delay: Duration::from_millis(200),
        nonce_delay: Duration::from_millis(200),
        ..Default::default()
    };
    let pallet = BalancesTransfer::new(chain, TransferConfig::default());
    let signer = CountingSigner::new();

    let started = tokio::time::Instant::now();
    pallet
        .transfer(&signer, bob(), &BigInt::from(1))
        .await
        .unwrap();
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(400));
}

#[tokio::test]
async fn test_nonce_failure_skips_signing() {
    let chain = MockChain {
        fail_nonce: true,
        ..Default::default()
    };
    let pallet = BalancesTransfer::new(chain, TransferConfig::default());
    let signer = CountingSigner::new();

    let err = pallet
        .transfer(&signer, bob(), &BigInt::from(1111))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ContextFetch);
    assert!(err.to_string().contains("account nonce"));
    assert_eq!(signer.calls(), 0);
}

#[tokio::test]
async fn test_genesis_failure_discards_fetched_nonce() {
    let chain = MockChain {
        nonce: 3,
        fail_genesis: true,
        genesis_delay: Duration::from_millis(20),
        ..Default::default()
    };
    let pallet = BalancesTransfer::new(chain, TransferConfig::default());
    let signer = CountingSigner::new();

    let err = pallet
        .transfer(&signer, bob(), &BigInt::from(1111))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransferError::ContextFetch {
            item: "genesis hash",
            ..
        }
    ));
    assert_eq!(signer.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_genesis_failure_cancels_pending_nonce() {
    let chain = MockChain {
        fail_genesis: true,
        genesis_delay: Duration::from_millis(10),
        nonce_delay: Duration::from_millis(300),
        ..Default::default()
    };

    let err = fetch_context(&chain, &bob()).await.unwrap_err();
    assert!(matches!(
        err,
        TransferError::ContextFetch {
            item: "genesis hash",
            ..
        }
    ));

    // the nonce request was started and then dropped before its delay ran out
    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(chain.requests.load(Ordering::SeqCst), 2);
    assert!(!chain.nonce_completed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_negative_amount_fails_before_fetching() {
    let pallet = BalancesTransfer::new(MockChain::new(0), TransferConfig::default());
    let signer = CountingSigner::new();

    let err = pallet
        .transfer(&signer, bob(), &BigInt::from(-1111))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(pallet_requests(&pallet), 0);
    assert_eq!(signer.calls(), 0);
}

#[tokio::test]
async fn test_custom_config_is_signed() {
    let config = TransferConfig {
        spec_version: 9430,
        tx_version: 22,
        module_index: 5,
        call_index: 3,
        tip: 1_000,
    };
    let pallet = BalancesTransfer::new(MockChain::new(17), config);
    let signer = CountingSigner::new();

    let xt = pallet
        .transfer(&signer, bob(), &BigInt::from(10_000_000_000u64))
        .await
        .unwrap();

    assert_eq!(xt.call().module_index(), 5);
    assert_eq!(xt.call().call_index(), 3);
    assert_eq!(xt.extra().spec_version(), 9430);
    assert_eq!(xt.extra().tip(), 1_000);
    assert_eq!(xt.extra().nonce(), 17);

    let payload = signing_payload(xt.call(), xt.extra());
    assert!(xt.signature().verify(&payload, &signer.account_id()));
}

fn pallet_requests(pallet: &BalancesTransfer<MockChain>) -> usize {
    pallet.chain().requests.load(Ordering::SeqCst)
}
