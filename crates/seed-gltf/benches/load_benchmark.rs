//! Load pipeline benchmarks.

use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seed_gltf::raw::{Gltf, RawAsset};
use seed_gltf::{mapper, validation, GlbReader, LoadOptions};

/// A binary tree of `count` nodes, each child listed after its parent.
fn node_tree(count: usize) -> String {
    let nodes: Vec<String> = (0..count)
        .map(|i| {
            let children: Vec<String> = [2 * i + 1, 2 * i + 2]
                .into_iter()
                .filter(|&c| c < count)
                .map(|c| c.to_string())
                .collect();
            if children.is_empty() {
                format!(r#"{{"translation": [{i}, 0, 0]}}"#)
            } else {
                format!(r#"{{"children": [{}], "rotation": [0, 0, 0, 1]}}"#, children.join(", "))
            }
        })
        .collect();

    format!(
        r#"{{
            "asset": {{"version": "2.0"}},
            "nodes": [{}],
            "scenes": [{{"nodes": [0]}}],
            "scene": 0
        }}"#,
        nodes.join(", ")
    )
}

fn glb(json: &str) -> Vec<u8> {
    let mut json = json.as_bytes().to_vec();
    while json.len() % 4 != 0 {
        json.push(b' ');
    }
    let mut out = b"glTF".to_vec();
    out.extend(2u32.to_le_bytes());
    out.extend((json.len() as u32 + 20).to_le_bytes());
    out.extend((json.len() as u32).to_le_bytes());
    out.extend(b"JSON");
    out.extend(json);
    out
}

fn validate_and_map(c: &mut Criterion) {
    let options = LoadOptions::default();
    let gltf: Gltf = serde_json::from_str(&node_tree(4096)).unwrap();

    c.bench_function("validate_4096_nodes", |b| {
        b.iter(|| validation::validate(black_box(&gltf), &options))
    });

    c.bench_function("map_4096_nodes", |b| {
        b.iter(|| {
            let raw = RawAsset {
                gltf: gltf.clone(),
                ..Default::default()
            };
            mapper::map(black_box(raw), &options)
        })
    });
}

fn read_glb(c: &mut Criterion) {
    let options = LoadOptions::default();
    let bytes = glb(&node_tree(1024));
    let reader = GlbReader::new();

    c.bench_function("read_glb_1024_nodes", |b| {
        b.iter(|| reader.read_from(black_box(bytes.as_slice()), Path::new(""), &options))
    });
}

criterion_group!(benches, validate_and_map, read_glb);
criterion_main!(benches);
