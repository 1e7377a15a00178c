// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use iced_notify::ui::dialogs::{DialogQueue, DialogRegistry, DialogRequest, RegistrySettings};
use iced_notify::ui::notifications::Manager;
use std::hint::black_box;
use std::time::{Duration, Instant};

fn registry_churn_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_churn");

    // Every submit past the bound evicts the oldest live dialog.
    group.bench_function("submit_with_eviction", |b| {
        b.iter_batched(
            || DialogRegistry::new(RegistrySettings::default()),
            |mut registry| {
                for i in 0..100 {
                    let signal = registry.submit(DialogRequest::info(format!("#{i}"), ""));
                    black_box(signal);
                }
                registry.tick_at(Instant::now() + Duration::from_secs(1));
                black_box(registry.len())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("queue_drain", |b| {
        b.iter_batched(
            || (DialogRegistry::default(), DialogQueue::new()),
            |(mut registry, mut queue)| {
                let signals: Vec<_> = (0..50)
                    .map(|i| queue.enqueue(DialogRequest::info(format!("#{i}"), ""), &mut registry))
                    .collect();
                while let Some(id) = queue.in_flight() {
                    registry.confirm(id);
                    if queue.drain(&mut registry).is_none() {
                        break;
                    }
                }
                black_box(signals.len())
            },
            BatchSize::SmallInput,
        );
    });

    group.bench_function("toast_push_and_expire", |b| {
        b.iter_batched(
            Manager::new,
            |mut toasts| {
                for i in 0..100 {
                    toasts.info(format!("toast {i}"));
                }
                black_box(toasts.tick_at(Instant::now() + Duration::from_secs(5)))
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, registry_churn_benchmark);
criterion_main!(benches);
