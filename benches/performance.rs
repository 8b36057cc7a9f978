// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Performance benchmarks for DUET
//!
//! Run with: cargo bench
//!
//! These benchmarks measure:
//! - Spelling resolution throughput
//! - Tick-append throughput on the session recorder
//! - Key parsing

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

use duet::music::{Key, SpellingTable};
use duet::session::{
    BeepEvent, NoteObservation, PlayerInfo, PlayerKind, SessionRecorder, StaticSessionInfo,
    TickInput,
};

/// Benchmark a single spelling lookup (the per-note hot path)
fn bench_resolve(c: &mut Criterion) {
    let table = SpellingTable::standard();
    let key = Key::parse("A major").unwrap();

    c.bench_function("resolve_with_key", |b| {
        b.iter(|| table.resolve(black_box(61), Some(black_box(&key))).unwrap())
    });

    c.bench_function("resolve_no_key", |b| {
        b.iter(|| table.resolve(black_box(61), None).unwrap())
    });
}

/// Benchmark appending tick records for sessions of various lengths
fn bench_tick_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick_append");

    for ticks in [64usize, 512, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(ticks), &ticks, |b, &ticks| {
            let table = Arc::new(SpellingTable::standard());
            let key = Key::parse("Eb major");
            b.iter(|| {
                let info = StaticSessionInfo::new(
                    "bench",
                    vec![
                        PlayerInfo::new("Keyboard", PlayerKind::Human),
                        PlayerInfo::new("DNN", PlayerKind::Dnn),
                    ],
                );
                let mut recorder =
                    SessionRecorder::new(Arc::clone(&table), ".", Box::new(info));
                for i in 0..ticks {
                    let input = TickInput {
                        dnn: NoteObservation::new((48 + i % 24) as u8, key),
                        human: NoteObservation::new((60 + i % 24) as u8, None),
                        metronome: BeepEvent::new((i % 4) as u32 + 1, i % 4 == 0),
                    };
                    recorder.tick(&input).unwrap();
                }
                black_box(recorder.len())
            })
        });
    }

    group.finish();
}

/// Benchmark key parsing (runs on every deserialized record)
fn bench_key_parse(c: &mut Criterion) {
    c.bench_function("key_parse", |b| {
        b.iter(|| Key::parse(black_box("Eb major")).unwrap())
    });
}

criterion_group!(benches, bench_resolve, bench_tick_append, bench_key_parse);
criterion_main!(benches);
