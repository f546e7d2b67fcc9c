use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quotetree_core::{ContentCleaner, CleanConfig, RawReply, ThreadBuilder, render_forest};

/// A thread where every reply quotes a truncated prefix of an earlier one.
fn synthetic_thread(replies: usize) -> Vec<RawReply> {
    let mut thread = vec![RawReply::new("1point3acres\nMain post describing a four round onsite loop")];
    for i in 0..replies {
        let body = format!("Reply number {} with some detail about round {}", i, i % 4);
        if i == 0 {
            thread.push(RawReply::new(body));
            continue;
        }
        let parent = format!("Reply number {} with some detail about round {}", i / 2, (i / 2) % 4);
        let truncated: String = parent.chars().take(24).collect();
        thread.push(RawReply::with_quote(
            format!("user{} wrote at 2025-12-07 08:39\n{}\n{}", i, truncated, body),
            format!("user{} wrote at 2025-12-07 08:39 {} ...", i, truncated),
        ));
    }
    thread
}

fn bench_build(c: &mut Criterion) {
    let builder = ThreadBuilder::new().unwrap();
    let mut group = c.benchmark_group("build");

    for size in [10, 100, 500] {
        let thread = synthetic_thread(size);
        group.bench_with_input(BenchmarkId::new("replies", size), &thread, |b, replies| {
            b.iter(|| builder.build(black_box(replies)))
        });
    }

    group.finish();
}

fn bench_clean(c: &mut Criterion) {
    let cleaner = ContentCleaner::new(&CleanConfig::default()).unwrap();
    let text = "本帖最后由 op 于 2025-12-7 08:39 编辑\n1point3acres\nalice wrote at 2025-12-07 08:00\nActual reply text";

    c.bench_function("clean", |b| b.iter(|| cleaner.clean(black_box(text))));
}

fn bench_render(c: &mut Criterion) {
    let builder = ThreadBuilder::new().unwrap();
    let thread = builder.build(&synthetic_thread(500));
    let config = Default::default();

    c.bench_function("render_forest", |b| b.iter(|| render_forest(black_box(&thread.forest), &config)));
}

criterion_group!(benches, bench_build, bench_clean, bench_render);
criterion_main!(benches);
