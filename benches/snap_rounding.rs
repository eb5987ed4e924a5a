use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use snapround::algorithms::noding::{McIndexNoder, Noder};
use snapround::algorithms::snap_rounding::{SnapRounder, SnapRoundingConfig, VertexSnapStrategy};
use snapround::data::*;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const LINES: usize = 200;

// Random polylines with coordinates on a grid of the given scale.
fn random_lines(rng: &mut SmallRng, scale: f64) -> Vec<SegmentString> {
  let mut lines = Vec::with_capacity(LINES);
  while lines.len() < LINES {
    let len = rng.gen_range(2..8);
    let mut pts: Vec<Coordinate> = (0..len)
      .map(|_| {
        let x = (rng.gen_range(0.0..100.0) * scale).round() / scale;
        let y = (rng.gen_range(0.0..100.0) * scale).round() / scale;
        Coordinate::new(x, y)
      })
      .collect();
    pts.dedup();
    if let Ok(s) = SegmentString::from_coords(pts) {
      lines.push(s);
    }
  }
  lines
}

pub fn criterion_benchmark(c: &mut Criterion) {
  let mut rng = SmallRng::seed_from_u64(1);
  let input = random_lines(&mut rng, 10.0);
  let pm = PrecisionModel::fixed(10.0).unwrap();

  c.bench_function("McIndexNoder::node(200 lines)", |b| {
    b.iter_batched(
      || input.clone(),
      |lines| McIndexNoder::default().node(lines),
      BatchSize::SmallInput,
    )
  });

  for (name, vertex_snap) in [
    ("pairwise", VertexSnapStrategy::Pairwise),
    ("indexed", VertexSnapStrategy::Indexed),
  ] {
    let config = SnapRoundingConfig {
      vertex_snap,
      ..SnapRoundingConfig::default()
    };
    let mut rounder = SnapRounder::with_config(pm, config).unwrap();
    c.bench_function(&format!("SnapRounder::node(200 lines, {name})"), |b| {
      b.iter_batched(
        || input.clone(),
        |lines| rounder.node(lines),
        BatchSize::SmallInput,
      )
    });
  }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
