//! Benchmarks for gesture classification

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hand_gesture::{
    clock::ManualClock,
    config::Config,
    filters::{create_filter, PositionFilter},
    landmarks::HandFrame,
    motion::MotionHistory,
    pose::PoseClassifier,
    GestureClassifier,
};

#[path = "../tests/test_helpers.rs"]
mod test_helpers;

use test_helpers::{hand_at, hand_points, THUMB_TUCKED};

/// Right hand with the given fingers extended, translated by `dx`
fn hand(extended: [bool; 4], dx: f64) -> HandFrame {
    hand_at(hand_points(extended, THUMB_TUCKED), dx, 0.0)
}

/// A 30 fps session cycling through poses while drifting sideways
fn session(frames: usize) -> Vec<(u64, Option<HandFrame>)> {
    let shapes = [[true; 4], [false; 4], [true, false, false, false], [true, true, false, false]];
    (0..frames)
        .map(|i| {
            let t = i as u64 * 33;
            let dx = 0.2 * (i as f64 * 0.05).sin();
            let frame = (i % 97 != 0).then(|| hand(shapes[(i / 20) % shapes.len()], dx));
            (t, frame)
        })
        .collect()
}

fn benchmark_pose_predicates(c: &mut Criterion) {
    let mut group = c.benchmark_group("pose_predicates");
    let poses = PoseClassifier::default();

    for (name, frame) in [("open_palm", hand([true; 4], 0.0)), ("fist", hand([false; 4], 0.0))] {
        group.bench_with_input(BenchmarkId::new("finger_states", name), &frame, |b, frame| {
            b.iter(|| black_box(poses.finger_states(black_box(frame))));
        });
        group.bench_with_input(BenchmarkId::new("is_pinching", name), &frame, |b, frame| {
            b.iter(|| black_box(poses.is_pinching(black_box(frame))));
        });
    }

    group.finish();
}

fn benchmark_velocity(c: &mut Criterion) {
    let mut group = c.benchmark_group("motion");

    let mut history = MotionHistory::new(10);
    for i in 0..10u32 {
        history.push(0.3 + 0.02 * f64::from(i), 0.5, 33 * u64::from(i));
    }
    group.bench_function("velocity_window_5", |b| {
        b.iter(|| black_box(history.velocity(black_box(5))));
    });

    group.bench_function("push_evict", |b| {
        let mut history = MotionHistory::new(10);
        let mut t = 0;
        b.iter(|| {
            t += 33;
            history.push(black_box(0.5), black_box(0.5), t);
        });
    });

    group.finish();
}

fn benchmark_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    let data = session(300);

    for filter in ["none", "moving_average", "exponential"] {
        let mut config = Config::default();
        config.output.position_filter = filter.to_string();

        group.bench_with_input(BenchmarkId::new("session_300", filter), &data, |b, data| {
            b.iter(|| {
                let mut classifier = GestureClassifier::from_config_with_clock(&config, ManualClock::new(0))
                    .expect("default config is valid");
                for (t, frame) in data {
                    black_box(classifier.update_at(frame.as_ref(), *t));
                }
            });
        });
    }

    let frame = hand([true; 4], 0.0);
    group.bench_function("single_update", |b| {
        let mut classifier = GestureClassifier::with_clock(ManualClock::new(0));
        let mut t = 0;
        b.iter(|| {
            t += 33;
            black_box(classifier.update_at(Some(black_box(&frame)), t))
        });
    });

    group.finish();
}

fn benchmark_position_filters(c: &mut Criterion) {
    let mut group = c.benchmark_group("position_filters");
    let data: Vec<(f64, f64)> = (0..100)
        .map(|i| {
            let t = f64::from(i) * 0.1;
            (0.5 + 0.2 * t.sin(), 0.5 + 0.1 * t.cos())
        })
        .collect();

    for spec in ["none", "moving_average:5", "moving_average:10", "exponential:0.5"] {
        let mut filter: Box<dyn PositionFilter> = create_filter(spec).expect("valid filter spec");
        group.bench_with_input(BenchmarkId::new("sequence_100", spec), &data, |b, data| {
            b.iter(|| {
                filter.reset();
                for &(x, y) in data {
                    black_box(filter.apply(black_box(x), black_box(y)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_pose_predicates,
    benchmark_velocity,
    benchmark_classifier,
    benchmark_position_filters
);
criterion_main!(benches);
