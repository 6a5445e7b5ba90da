// Criterion benchmarks for Donor Match

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use donor_match::core::{
    encoder::CategoryEncoder,
    filters::compatible_donors,
    ranker::rank_candidates,
    Matcher,
};
use donor_match::models::{DonorRecord, MatchParams, RequesterProfile};

const BLOOD_TYPES: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];
const ORGANS: &[&str] = &["Kidney", "Liver", "Heart", "Lung", "Cornea"];
const CITIES: &[(&str, &str)] = &[
    ("Mumbai", "Maharashtra"),
    ("Pune", "Maharashtra"),
    ("Chennai", "Tamil Nadu"),
    ("Kochi", "Kerala"),
];

fn create_donor(id: usize) -> DonorRecord {
    let (city, state) = CITIES[id % CITIES.len()];
    DonorRecord {
        name: format!("Donor {}", id),
        age: 20 + (id % 50) as u32,
        gender: if id % 2 == 0 { "Female" } else { "Male" }.to_string(),
        blood_type: BLOOD_TYPES[id % BLOOD_TYPES.len()].to_string(),
        organ_type: ORGANS[id % ORGANS.len()].to_string(),
        hla_typing: "A2".to_string(),
        rh_factor: "Positive".to_string(),
        bmi: 18.0 + (id % 17) as f64,
        cause_of_death: "Stroke".to_string(),
        health_condition: "Stable".to_string(),
        city: city.to_string(),
        state: state.to_string(),
        hospital: format!("Hospital {}", id % 12),
    }
}

/// Requester taken from a generated donor so every pool has compatible rows
///
/// The category cycles repeat every 40 ids, so a pool of n donors holds about
/// n / 40 rows sharing donor 46's categories.
fn create_profile() -> RequesterProfile {
    let donor = create_donor(46);
    RequesterProfile {
        blood_type: donor.blood_type,
        hla_typing: donor.hla_typing,
        organ_type: donor.organ_type,
        state: donor.state,
        city: donor.city,
        bmi: 24.0,
        age: 40,
    }
}

fn bench_encoder_fit(c: &mut Criterion) {
    let pool: Vec<DonorRecord> = (0..1000).map(create_donor).collect();

    c.bench_function("encoder_fit_1000_donors", |b| {
        b.iter(|| CategoryEncoder::fit(black_box(&pool)));
    });
}

fn bench_matching(c: &mut Criterion) {
    let matcher = Matcher::with_default_params();
    let profile = create_profile();

    let mut group = c.benchmark_group("matching");

    for pool_size in [100, 1000, 10_000, 50_000].iter() {
        let pool: Vec<DonorRecord> = (0..*pool_size).map(create_donor).collect();

        group.bench_with_input(
            BenchmarkId::new("find_donors", pool_size),
            pool_size,
            |b, _| {
                b.iter(|| matcher.find_donors(black_box(&profile), black_box(&pool)));
            },
        );
    }

    group.finish();
}

fn bench_filter_and_rank(c: &mut Criterion) {
    let profile = create_profile();
    let pool: Vec<DonorRecord> = (0..10_000).map(create_donor).collect();
    let encoder = CategoryEncoder::fit(&pool);
    let params = MatchParams::default();
    assert!(!compatible_donors(&encoder, &pool, &profile).is_empty());

    c.bench_function("filter_and_rank_10000_donors", |b| {
        b.iter(|| {
            let compatible = compatible_donors(&encoder, black_box(&pool), &profile);
            black_box(rank_candidates(compatible, &profile, &params))
        });
    });
}

criterion_group!(
    benches,
    bench_encoder_fit,
    bench_matching,
    bench_filter_and_rank
);

criterion_main!(benches);
