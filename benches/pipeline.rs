//! Pipeline benchmark: applicant record → feature extraction.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mshiyane_credit::features::FeatureExtractor;
use mshiyane_credit::record::{ApplicantRecord, EmploymentEntry, TransactionEntry};

fn make_record(history_len: usize) -> ApplicantRecord {
    ApplicantRecord {
        annual_income: 72_000.0,
        years_of_credit_history: 9.0,
        num_accounts: 5.0,
        payment_history_score: 88.0,
        debt_to_income_ratio: 0.32,
        num_recent_inquiries: 2.0,
        age: 41.0,
        savings_amount: 15_000.0,
        on_time_payment_ratio: 0.95,
        savings_frequency: 0.6,
        overdraft_frequency: 0.05,
        mobile_app_usage_score: 0.8,
        income_history: (0..history_len).map(|i| 6000.0 + (i % 7) as f64 * 50.0).collect(),
        transaction_history: (0..history_len)
            .map(|i| TransactionEntry {
                amount: 40.0 + (i % 13) as f64 * 3.0,
            })
            .collect(),
        employment_history: vec![
            EmploymentEntry {
                employer: Some("Acme".to_string()),
                duration_years: 4.0,
            },
            EmploymentEntry {
                employer: Some("Globex".to_string()),
                duration_years: 3.5,
            },
        ],
        ..ApplicantRecord::default()
    }
}

fn bench_extract_basic(c: &mut Criterion) {
    let extractor = FeatureExtractor::new();
    let record = make_record(24);

    c.bench_function("extract_basic_7d", |b| {
        b.iter(|| black_box(extractor.extract_basic(black_box(&record))))
    });
}

fn bench_extract_enhanced_by_history(c: &mut Criterion) {
    let extractor = FeatureExtractor::new();

    let mut g = c.benchmark_group("extract_enhanced_by_history");
    for n in [12, 60, 240, 960] {
        let record = make_record(n);
        g.bench_function(format!("history_{}", n).as_str(), |b| {
            b.iter(|| black_box(extractor.extract_enhanced(black_box(&record))))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_extract_basic, bench_extract_enhanced_by_history);
criterion_main!(benches);
