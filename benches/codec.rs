//! Benchmarks for asset data encoding, order hashing and envelopes.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- multi_asset
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use alloy_primitives::{Address, Bytes, U256};
use zrx_swap::codec::{decode_erc721, decode_multi_asset, encode_erc721, encode_multi_asset};
use zrx_swap::config::{exchange_domain, MAINNET_EXCHANGE};
use zrx_swap::order::{order_hash, sign_order, NftRef};
use zrx_swap::{AssetDescriptor, Envelope, LocalWallet, Order, OrderBuilder, Wallet};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

const COLLECTION: Address = Address::repeat_byte(0xaa);
const WETH: Address = Address::repeat_byte(0xee);

fn basket_order(maker: Address, size: u64) -> Order {
    OrderBuilder::new(maker)
        .maker_nfts((0..size).map(|id| NftRef { contract: COLLECTION, token_id: U256::from(id) }))
        .taker_erc20(WETH, U256::from(10).pow(U256::from(18)))
        .expiry("1800000000")
        .salt(U256::from(size))
        .build(1_700_000_000)
        .expect("valid basket")
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn bench_single_asset(c: &mut Criterion) {
    let mut group = c.benchmark_group("erc721");

    group.bench_function("encode", |b| {
        b.iter(|| encode_erc721(black_box(COLLECTION), black_box(U256::from(42))))
    });

    let blob = encode_erc721(COLLECTION, U256::from(42));
    group.bench_function("decode", |b| b.iter(|| decode_erc721(black_box(&blob))));
    group.bench_function("decode_descriptor", |b| {
        b.iter(|| AssetDescriptor::decode(black_box(&blob)))
    });

    group.finish();
}

fn bench_multi_asset(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_asset");

    for size in [1usize, 10, 100] {
        let amounts = vec![U256::from(1); size];
        let nested: Vec<Bytes> = (0..size)
            .map(|i| encode_erc721(COLLECTION, U256::from(i)))
            .collect();
        let blob = encode_multi_asset(&amounts, &nested).expect("arity matches");

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &size, |b, _| {
            b.iter(|| encode_multi_asset(black_box(&amounts), black_box(&nested)))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &size, |b, _| {
            b.iter(|| decode_multi_asset(black_box(&blob)))
        });
    }

    group.finish();
}

fn bench_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("order");
    let wallet = LocalWallet::random();
    let maker = wallet.address().expect("local wallet has an address");
    let domain = exchange_domain(MAINNET_EXCHANGE);
    let order = basket_order(maker, 10);

    group.bench_function("hash", |b| b.iter(|| order_hash(black_box(&order), &domain)));
    group.bench_function("sign", |b| {
        b.iter(|| sign_order(black_box(&order), &wallet, &domain))
    });

    let signature = sign_order(&order, &wallet, &domain).expect("signs");
    let envelope = Envelope::compact_from(&order, &signature).expect("compact form");
    let fragment = envelope.to_fragment().expect("serializes");
    group.bench_function("envelope_roundtrip", |b| {
        b.iter(|| Envelope::from_fragment(black_box(&fragment)).and_then(|env| env.open()))
    });

    group.finish();
}

criterion_group!(benches, bench_single_asset, bench_multi_asset, bench_order);
criterion_main!(benches);
