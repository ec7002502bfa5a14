//! benches/engine.rs
//! Run with:  cargo bench --bench engine
//! HTML:      target/criterion/report/index.html

use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::thread;
use stock_simulator::{
    Account, NullLog, SharedMarket, StockCatalog, TradeAction, TradeRequest, TransactionEngine,
    shared_account,
};

// ────────────────────────────────────────────────────────────────────────────
//  Single-threaded engine
// ────────────────────────────────────────────────────────────────────────────
pub fn bench_round_trips(c: &mut Criterion) {
    let engine = TransactionEngine::without_log();
    let mut group = c.benchmark_group("engine_round_trip");
    group.throughput(Throughput::Elements(2));

    group.bench_function("buy_then_sell", |b| {
        b.iter_batched(
            || (Account::new("bench", 1_000_000.0), StockCatalog::new()),
            |(mut account, mut catalog)| {
                engine.buy(&mut account, &mut catalog, "AAPL", 10).unwrap();
                engine.sell(&mut account, &mut catalog, "AAPL", 10).unwrap();
                black_box(account.cash_balance())
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("short_then_cover", |b| {
        b.iter_batched(
            || (Account::new("bench", 1_000_000.0), StockCatalog::new()),
            |(mut account, mut catalog)| {
                engine.sell_short(&mut account, &mut catalog, "MSFT", 10).unwrap();
                engine.buy_to_cover(&mut account, &mut catalog, "MSFT", 10).unwrap();
                black_box(account.cash_balance())
            },
            BatchSize::SmallInput,
        )
    });

    group.bench_function("rejected_oversell", |b| {
        let mut account = Account::new("bench", 1_000_000.0);
        let mut catalog = StockCatalog::new();
        b.iter(|| black_box(engine.sell(&mut account, &mut catalog, "AAPL", 10).is_err()))
    });

    group.finish();
}

// ────────────────────────────────────────────────────────────────────────────
//  Shared market under contention
// ────────────────────────────────────────────────────────────────────────────
const THREAD_COUNTS: &[usize] = &[1, 2, 4, 8];
const TRADES_PER_THREAD: usize = 1_000;

pub fn bench_shared_market(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared_market_buys");

    for &threads in THREAD_COUNTS {
        group.throughput(Throughput::Elements((threads * TRADES_PER_THREAD) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &n| {
            b.iter_batched(
                || Arc::new(SharedMarket::new(StockCatalog::new(), NullLog)),
                |market| {
                    thread::scope(|s| {
                        for t in 0..n {
                            let market = Arc::clone(&market);
                            s.spawn(move || {
                                let account =
                                    shared_account(Account::new(format!("t{t}"), 1.0e9));
                                let request = TradeRequest::new(TradeAction::Buy, "GOOG", 1);
                                for _ in 0..TRADES_PER_THREAD {
                                    let _ = market.execute(&account, &request);
                                }
                            });
                        }
                    });
                    black_box(market.stock("GOOG"))
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_round_trips, bench_shared_market);
criterion_main!(benches);
