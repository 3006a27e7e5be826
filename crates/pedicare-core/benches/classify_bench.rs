//! Benchmarks for the classification rules.

#![allow(clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use pedicare_core::{
    Behavior, FeverLevel, GrowthClassifier, GrowthForm, Severity, SymptomResponse, TriageEngine,
};
use std::hint::black_box;

fn bench_triage(c: &mut Criterion) {
    let mild = SymptomResponse::new().with_symptom("Cough");
    let urgent = SymptomResponse::new()
        .with_fever(FeverLevel::High)
        .with_symptom("Difficulty breathing")
        .with_behavior(Behavior::ExtremelyLethargic)
        .with_severity(Severity::new(5).unwrap());

    c.bench_function("triage_mild_fallthrough", |b| {
        b.iter(|| TriageEngine::classify(black_box(&mild)))
    });
    c.bench_function("triage_urgent_first_rule", |b| {
        b.iter(|| TriageEngine::classify(black_box(&urgent)))
    });
}

fn bench_growth(c: &mut Criterion) {
    let form = GrowthForm::from_text("15.5", "110", "5", "male");

    c.bench_function("growth_classify_form", |b| {
        b.iter(|| GrowthClassifier::classify_form(black_box(&form)))
    });
}

criterion_group!(benches, bench_triage, bench_growth);
criterion_main!(benches);
