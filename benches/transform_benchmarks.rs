//! Transform benchmarks using Criterion.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use eetransform_rs::{
    is_motion, BimanualTransform, EpisodeRecorder, Pose, PoseTransform, RecordingConfig,
    Thresholds, TrajectoryAccumulator,
};

/// Create a random episode of dual-arm states for benchmarking.
fn create_test_episode(n: usize) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = vec![0.1, 0.0, 0.3, 0.0, 0.2, 0.0, 0.8, -0.1, 0.0, 0.3, 0.0, 0.2, 0.0, 0.8];
    (0..n)
        .map(|_| {
            for value in state.iter_mut() {
                *value += rng.gen_range(-0.01..0.01);
            }
            state.clone()
        })
        .collect()
}

fn benchmark_delta_gripper_forward(c: &mut Criterion) {
    let transform = PoseTransform::from_name("ee_delta_gripper").unwrap();
    let state = Pose::new([0.1, 0.2, 0.3], [0.2, -0.1, 0.5], 0.5);
    let next = Pose::new([0.12, 0.21, 0.28], [0.25, -0.05, 0.45], 0.7);

    c.bench_function("delta_gripper_forward", |b| {
        b.iter(|| transform.forward(black_box(&state), black_box(&next)))
    });
}

fn benchmark_delta_gripper_inverse_aligned(c: &mut Criterion) {
    let transform = PoseTransform::with_base_euler("ee_delta_gripper", Some([0.0, std::f64::consts::FRAC_PI_2, 0.0])).unwrap();
    let state = Pose::new([0.1, 0.2, 0.3], [0.2, -0.1, 0.5], 0.5);
    let delta = Pose::new([0.01, 0.0, -0.02], [0.05, 0.02, -0.03], 0.7);

    c.bench_function("delta_gripper_inverse_aligned", |b| {
        b.iter(|| transform.inverse(black_box(&state), black_box(&delta)))
    });
}

fn benchmark_bimanual_forward(c: &mut Criterion) {
    let adapter = BimanualTransform::from_name("ee_delta_gripper").unwrap();
    let episode = create_test_episode(2);

    c.bench_function("bimanual_forward", |b| {
        b.iter(|| adapter.forward(black_box(&episode[0]), black_box(&episode[1])).unwrap())
    });
}

fn benchmark_is_motion(c: &mut Criterion) {
    let episode = create_test_episode(2);
    let thresholds = Thresholds::default();

    c.bench_function("is_motion_bimanual", |b| {
        b.iter(|| is_motion(black_box(&episode[0]), black_box(&episode[1]), &thresholds).unwrap())
    });
}

fn benchmark_record_episode_1000(c: &mut Criterion) {
    let episode = create_test_episode(1000);
    let config = RecordingConfig::new("ee_delta_gripper");

    c.bench_function("record_episode_1000", |b| {
        b.iter(|| {
            let mut recorder = EpisodeRecorder::new(&config, &episode[0]).unwrap();
            recorder.extend(episode[1..].iter().map(|s| s.as_slice())).unwrap()
        })
    });
}

fn benchmark_accumulate_1000(c: &mut Criterion) {
    let delta = Pose::new([0.001, 0.0, 0.0], [0.0, 0.0, 0.01], 0.5);

    c.bench_function("accumulate_delta_gripper_1000", |b| {
        b.iter(|| {
            let mut accumulator = TrajectoryAccumulator::new("ee_delta_gripper", &Pose::identity(0.5)).unwrap();
            for _ in 0..1000 {
                accumulator.append(black_box(&delta));
            }
            accumulator.current()
        })
    });
}

criterion_group!(
    benches,
    benchmark_delta_gripper_forward,
    benchmark_delta_gripper_inverse_aligned,
    benchmark_bimanual_forward,
    benchmark_is_motion,
    benchmark_record_episode_1000,
    benchmark_accumulate_1000,
);
criterion_main!(benches);
