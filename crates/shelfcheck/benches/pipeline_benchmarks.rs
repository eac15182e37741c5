//! Pipeline performance benchmarks.
//!
//! Measures detection-to-validation time on synthetic sales uploads, plus the
//! two stages whose cost grows fastest: the duplicate spelling scan and the
//! correction applier.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use shelfcheck::{CorrectionTier, DecisionMap, Parser, Pipeline, Row};

/// Generate a messy sales CSV.
fn generate_sales_data(rows: usize) -> String {
    let mut data = String::new();
    data.push_str("Purchase Date,Product,Retailer,Sales Value,Receipt ID\n");

    let products = ["Widget", "  gadget ", "Big   Box", "", "Tea Bags"];
    let chains = ["Tesco", "Teso", "tescos", "Sainsburys", "Asda", "Aldi"];

    for row in 0..rows {
        // Mixed date formats
        match row % 3 {
            0 => data.push_str(&format!("2025-{:02}-{:02},", (row % 12) + 1, (row % 28) + 1)),
            1 => data.push_str(&format!("{:02}/{:02}/2025,", (row % 12) + 1, (row % 28) + 1)),
            _ => data.push_str(&format!("{:02}/{:02}/2025,", (row % 16) + 13, (row % 12) + 1)),
        }
        data.push_str(products[row % products.len()]);
        data.push(',');
        data.push_str(chains[row % chains.len()]);
        data.push(',');
        if row % 7 == 0 {
            data.push_str("n/a,");
        } else {
            data.push_str(&format!("£{}.{:02},", row % 100, row % 100));
        }
        if row % 50 == 0 {
            data.push_str(&format!("#{}\n", row));
        } else {
            data.push_str(&format!("R{:06}\n", row));
        }
    }

    data
}

fn parse(data: &str) -> Vec<Row> {
    Parser::new().parse_str(data).unwrap()
}

/// Benchmark the full pipeline on parsed rows.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = Pipeline::new();

    for rows in [10, 100, 1000, 5000].iter() {
        let data = generate_sales_data(*rows);
        let parsed = parse(&data);

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("sales_rows", rows), &parsed, |b, parsed| {
            b.iter(|| pipeline.run(black_box(parsed)))
        });
    }

    group.finish();
}

/// Benchmark the duplicate scan as the number of distinct retailer values grows.
fn bench_duplicate_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicate_scan");
    let pipeline = Pipeline::new();

    for distinct in [10, 100, 400].iter() {
        let mut data = String::from("receipt_date,product_name,chain\n");
        for i in 0..*distinct {
            data.push_str(&format!("2025-02-24,Widget,Store {}\n", i));
        }
        let parsed = parse(&data);

        group.bench_with_input(BenchmarkId::new("distinct_chains", distinct), &parsed, |b, parsed| {
            b.iter(|| pipeline.run(black_box(parsed)))
        });
    }

    group.finish();
}

/// Benchmark applying every auto correction.
fn bench_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply");
    let pipeline = Pipeline::new();

    for rows in [100, 1000].iter() {
        let outcome = pipeline.run(&parse(&generate_sales_data(*rows)));
        let mut decisions = DecisionMap::new();
        decisions.accept_tier(&outcome.result, CorrectionTier::Auto);
        decisions.accept_tier(&outcome.result, CorrectionTier::Suggested);

        group.bench_with_input(BenchmarkId::new("accepted", rows), &decisions, |b, decisions| {
            b.iter(|| outcome.apply(black_box(decisions)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline, bench_duplicate_scan, bench_apply);
criterion_main!(benches);
