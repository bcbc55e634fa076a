//! Benchmarks for the type-effectiveness calculator.

#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use dex_core::{TypeRef, TypeRelations, compute_effectiveness};
use std::hint::black_box;

fn refs(names: &[&str]) -> Vec<TypeRef> {
    names.iter().map(|n| TypeRef::unresolved(*n)).collect()
}

fn dual_type_fixture() -> (Vec<TypeRef>, Vec<TypeRelations>) {
    let water = TypeRelations::new(TypeRef::new(11, "water"))
        .with_half_damage_to(refs(&["water", "grass", "dragon"]))
        .with_double_damage_to(refs(&["fire", "ground", "rock"]))
        .with_half_damage_from(refs(&["fire", "water", "ice", "steel"]))
        .with_double_damage_from(refs(&["grass", "electric"]));
    let ground = TypeRelations::new(TypeRef::new(5, "ground"))
        .with_no_damage_to(refs(&["flying"]))
        .with_half_damage_to(refs(&["bug", "grass"]))
        .with_double_damage_to(refs(&["fire", "electric", "poison", "rock", "steel"]))
        .with_no_damage_from(refs(&["electric"]))
        .with_half_damage_from(refs(&["poison", "rock"]))
        .with_double_damage_from(refs(&["water", "grass", "ice"]));

    (
        vec![TypeRef::new(11, "water"), TypeRef::new(5, "ground")],
        vec![water, ground],
    )
}

fn bench_compute(c: &mut Criterion) {
    let (targets, relations) = dual_type_fixture();
    c.bench_function("compute_effectiveness/dual_type", |b| {
        b.iter(|| compute_effectiveness(black_box(&targets), black_box(&relations)));
    });

    let single_targets = &targets[..1];
    let single_relations = &relations[..1];
    c.bench_function("compute_effectiveness/single_type", |b| {
        b.iter(|| compute_effectiveness(black_box(single_targets), black_box(single_relations)));
    });
}

criterion_group!(benches, bench_compute);
criterion_main!(benches);
