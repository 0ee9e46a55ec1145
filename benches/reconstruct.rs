//! Benchmarks for threadpack ingest, reconstruction and queries.
//!
//! Run with: `cargo bench`
//! Run specific group: `cargo bench --bench reconstruct -- process`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use threadpack::Message;
use threadpack::core::output::to_csv;
use threadpack::core::{OutputConfig, process};
use threadpack::parsers::{ExportParser, TwcsParser};
use threadpack::stats::DatasetStats;

use chrono::{Duration, TimeZone, Utc};

const HEADER: &str =
    "tweet_id,author_id,inbound,created_at,text,response_tweet_id,in_response_to_tweet_id";

const REPLIES: [&str; 4] = [
    "please send us a dm",
    "we're sorry to hear that",
    "can you tell us more?",
    "thanks for reaching out",
];

// =============================================================================
// Test Data Generators
// =============================================================================

/// Random reply forest, shuffled. About one message in five starts a thread.
fn generate_forest(count: usize, seed: u64) -> Vec<Message> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base_time = Utc.with_ymd_and_hms(2017, 10, 31, 0, 0, 0).unwrap();

    let mut messages: Vec<Message> = Vec::with_capacity(count);
    for i in 0..count {
        let id = i as u64 + 1;
        let ts = base_time + Duration::seconds(i as i64);
        let is_root = i == 0 || rng.gen_ratio(1, 5);

        let msg = if is_root {
            Message::new(id, format!("{}", 100_000 + i), "my order never arrived", ts)
        } else {
            let parent = rng.gen_range(i.saturating_sub(50)..i);
            messages[parent].response_tweet_id.push(id);
            Message::new(id, "sprintcare", REPLIES[i % REPLIES.len()], ts)
                .with_inbound(false)
                .with_parent(parent as u64 + 1)
        };
        messages.push(msg);
    }

    messages.shuffle(&mut rng);
    messages
}

fn generate_twcs_csv(count: usize) -> String {
    let mut lines = Vec::with_capacity(count + 1);
    lines.push(HEADER.to_string());
    for msg in generate_forest(count, 7) {
        let replies: Vec<String> = msg.response_tweet_id.iter().map(u64::to_string).collect();
        lines.push(format!(
            "{},{},{},{},\"@{} {}\",\"{}\",{}",
            msg.tweet_id,
            msg.author_id,
            if msg.inbound { "True" } else { "False" },
            msg.created_at.format("%a %b %d %H:%M:%S +0000 %Y"),
            msg.author_id,
            msg.text,
            replies.join(","),
            msg.in_response_to_tweet_id
                .map(|p| p.to_string())
                .unwrap_or_default(),
        ));
    }
    lines.join("\n")
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_twcs_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("twcs_parsing");
    let parser = TwcsParser::new();

    for size in [1_000_usize, 10_000, 100_000] {
        let csv = generate_twcs_csv(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &csv, |b, csv| {
            b.iter(|| {
                let messages = parser.parse_str(black_box(csv)).unwrap();
                black_box(messages)
            });
        });
    }
    group.finish();
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");

    for size in [1_000_usize, 10_000, 100_000] {
        let messages = generate_forest(size, 42);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &messages, |b, msgs| {
            b.iter(|| {
                let rows = process(black_box(msgs.clone())).unwrap();
                black_box(rows)
            });
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let rows = process(generate_forest(50_000, 42)).unwrap();
    let stats = DatasetStats::new(&rows);

    group.bench_function("most_common_usage", |b| {
        b.iter(|| black_box(stats.most_common_usage(2017, 10, 31).unwrap()));
    });
    group.bench_function("conversation_stats", |b| {
        b.iter(|| black_box(stats.conversation_stats(2017, 10, 31).unwrap()));
    });
    group.bench_function("num_conversations", |b| {
        b.iter(|| black_box(stats.num_conversations(black_box(2))));
    });
    group.bench_function("get_conversation", |b| {
        b.iter(|| black_box(stats.get_conversation(black_box(25_000)).len()));
    });
    group.finish();
}

fn bench_csv_snapshot(c: &mut Criterion) {
    let rows = process(generate_forest(10_000, 42)).unwrap();
    let config = OutputConfig::new();

    c.bench_function("csv_snapshot_10000", |b| {
        b.iter(|| black_box(to_csv(black_box(&rows), &config).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_twcs_parsing,
    bench_process,
    bench_queries,
    bench_csv_snapshot
);
criterion_main!(benches);
