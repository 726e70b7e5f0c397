//! Benchmark – `callview::Dispatcher` on plain and call-style messages
#![allow(missing_docs)]

use std::time::Duration;

use callview::{CallSyntaxTokenizer, CommandTable, Dispatcher, PlainTokenizer, Tokenizer};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// A call-style message with `args` string arguments, and the equivalent
/// space-delimited message.
fn make_messages(args: usize) -> (String, String) {
    let mut call = String::from("bot.tags.set(");
    let mut plain = String::from("bot.tags.set");
    for i in 0..args {
        if i > 0 {
            call.push_str(", ");
        }
        call.push_str(&format!("\"value {i}\""));
        plain.push_str(&format!(" \"value {i}\""));
    }
    call.push(')');
    (call, plain)
}

fn dispatcher<T: Tokenizer>(tokenizer: T) -> Dispatcher<T> {
    let mut commands = CommandTable::new();
    commands.register("tags.set", ["tags.add"]);
    Dispatcher::new(tokenizer, ["bot."], commands)
}

fn bench_dispatch(c: &mut Criterion) {
    let call_syntax = dispatcher(CallSyntaxTokenizer::default());
    let plain = dispatcher(PlainTokenizer);

    let mut group = c.benchmark_group("dispatch");
    for &args in &[1usize, 8, 64] {
        let (call_message, plain_message) = make_messages(args);

        group.bench_with_input(
            BenchmarkId::new("call_syntax", args),
            &call_message,
            |b, m| b.iter(|| black_box(call_syntax.dispatch(black_box(m)).unwrap())),
        );
        group.bench_with_input(
            BenchmarkId::new("call_syntax_plain_message", args),
            &plain_message,
            |b, m| b.iter(|| black_box(call_syntax.dispatch(black_box(m)).unwrap())),
        );
        group.bench_with_input(BenchmarkId::new("plain", args), &plain_message, |b, m| {
            b.iter(|| black_box(plain.dispatch(black_box(m)).unwrap()));
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_dispatch }
criterion_main!(benches);
