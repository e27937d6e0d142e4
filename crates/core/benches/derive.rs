//! Benchmark suite for journal derivation.
//!
//! Run with: `cargo bench --package folio-core`

use std::hint::black_box;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use folio_core::document::kind::Direction;
use folio_core::document::status::DocumentStatus;
use folio_core::ledger::line::Side;
use folio_core::posting::{
    ChartRoles, PostingService, SourceDocument, TradeDocument, TradeLine,
};
use folio_core::reversal::{PostedLine, ReversalService};
use folio_shared::types::{AccountId, DocumentId, UserId};

fn roles() -> ChartRoles {
    ChartRoles {
        accounts_receivable: AccountId::new(),
        accounts_payable: AccountId::new(),
        output_vat: AccountId::new(),
        input_vat: AccountId::new(),
        excise_duty: AccountId::new(),
        sales_discount: AccountId::new(),
        purchase_discount: AccountId::new(),
        inventory_asset: AccountId::new(),
        cost_of_goods_sold: AccountId::new(),
        petty_cash: AccountId::new(),
        vat_payable: AccountId::new(),
    }
}

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 1).unwrap()
}

fn invoice_with_lines(line_count: usize) -> SourceDocument {
    let lines = (0..line_count)
        .map(|i| TradeLine {
            category_account_id: AccountId::new(),
            quantity: Decimal::from(i as u32 % 9 + 1),
            unit_price: dec!(125.00) + Decimal::from(i as u32),
            discount: if i % 3 == 0 { dec!(5.00) } else { dec!(0) },
            vat_rate: dec!(5),
            vat_inclusive: i % 2 == 0,
            excise_amount: dec!(0),
            inventory: None,
        })
        .collect();
    SourceDocument::Invoice(TradeDocument {
        id: DocumentId::new(),
        number: "INV-BENCH".into(),
        status: DocumentStatus::Pending,
        direction: Direction::Sales,
        party_account_id: AccountId::new(),
        issue_date: day(),
        exchange_rate: dec!(3.6725),
        reverse_charge: false,
        lines,
    })
}

fn posted_history(pair_count: usize) -> Vec<PostedLine> {
    (0..pair_count)
        .flat_map(|i| {
            let amount = dec!(100.00) + Decimal::from(i as u32);
            [
                PostedLine {
                    account_id: AccountId::new(),
                    side: Side::Debit,
                    amount,
                    exchange_rate: Decimal::ONE,
                    reversed: false,
                },
                PostedLine {
                    account_id: AccountId::new(),
                    side: Side::Credit,
                    amount,
                    exchange_rate: Decimal::ONE,
                    reversed: false,
                },
            ]
        })
        .collect()
}

// ============================================================================
// Posting Benchmarks
// ============================================================================

fn invoice_derivation_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("posting/invoice");
    let roles = roles();
    let user = UserId::new();

    for size in [1usize, 10, 50, 250] {
        let document = invoice_with_lines(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("lines", size), &size, |b, _| {
            b.iter(|| PostingService::derive(black_box(&document), black_box(&roles), user));
        });
    }

    group.finish();
}

// ============================================================================
// Reversal Benchmarks
// ============================================================================

fn reversal_planning_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reversal/plan");
    let user = UserId::new();

    for size in [1usize, 10, 50, 250] {
        let document = invoice_with_lines(1);
        let posted = posted_history(size);
        group.throughput(Throughput::Elements(size as u64 * 2));
        group.bench_with_input(BenchmarkId::new("line_pairs", size), &size, |b, _| {
            b.iter(|| {
                ReversalService::plan(
                    black_box(&document),
                    black_box(&posted),
                    day(),
                    user,
                    None,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    invoice_derivation_benchmark,
    reversal_planning_benchmark
);
criterion_main!(benches);
