//! Benchmarks for target resolution and rule bundle construction.
//!
//! These benchmarks measure normalizing projects of growing size and building
//! the rule bundle of a target that embeds a growing number of other targets.

use build_targets::config::{
    deep_merge, ConfigLayer, MemoryModuleLoader, ProjectConfig, ProjectConfiguration,
};
use build_targets::path::Locations;
use build_targets::rules::TargetsFileRules;
use build_targets::targets::TargetRegistry;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Map, Value};
use std::path::Path;
use std::rc::Rc;

/// A project with `count` browser targets; the last one embeds all others.
fn generate_project(count: usize) -> ProjectConfig {
    let mut targets = Map::new();
    for i in 0..count {
        targets.insert(
            format!("target{}", i),
            json!({ "type": "browser", "includeModules": [format!("module{}", i)] }),
        );
    }
    let embedded: Vec<String> = (0..count.saturating_sub(1))
        .map(|i| format!("target{}", i))
        .collect();
    targets.insert(
        "app".to_string(),
        json!({ "type": "browser", "includeTargets": embedded }),
    );

    let mut loader = MemoryModuleLoader::new();
    loader.add_value(
        "/bench/build-targets.config.yaml",
        json!({ "name": "app", "targets": targets }),
    );
    let layer = ProjectConfiguration::layered(Path::new("/bench"), Rc::new(loader));
    ProjectConfig::from_value(layer.get_config(&[]).unwrap()).unwrap()
}

fn bench_target_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("target_resolution");

    for count in [1, 10, 50] {
        let project = generate_project(count);
        group.bench_with_input(BenchmarkId::new("targets", count), &project, |b, project| {
            b.iter(|| TargetRegistry::new(black_box(project.clone()), Locations::new("/bench")))
        });
    }

    group.finish();
}

fn bench_rule_bundle(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_bundle");

    for count in [1, 10, 50] {
        let registry =
            TargetRegistry::new(generate_project(count), Locations::new("/bench")).unwrap();
        group.bench_with_input(BenchmarkId::new("embedded", count), &registry, |b, registry| {
            b.iter(|| {
                TargetsFileRules::new(registry)
                    .get_rules_for_target(black_box("app"))
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_deep_merge(c: &mut Criterion) {
    let base = generate_project(50);
    let base: Value = serde_json::to_value(&base).unwrap();
    let changes = json!({
        "paths": { "build": "public" },
        "targets": { "app": { "transpile": false, "devServer": { "port": 8080 } } }
    });

    c.bench_function("deep_merge_project", |b| {
        b.iter(|| deep_merge(black_box(base.clone()), black_box(changes.clone())))
    });
}

criterion_group!(benches, bench_target_resolution, bench_rule_bundle, bench_deep_merge);
criterion_main!(benches);
