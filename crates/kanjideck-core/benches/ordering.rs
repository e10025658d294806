use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kanjideck_core::{DeckOrder, ItemKind, KanjiGraph, NodeId, StaticProvider};

const TIERS: [(&str, usize); 3] = [("small", 200), ("medium", 2_000), ("large", 8_000)];

/// A layered synthetic catalog: 16 radicals, `kanji` kanji using up to three
/// radicals and one earlier kanji each.
fn synthetic_catalog(kanji: usize) -> (StaticProvider, Vec<String>) {
    let radicals: Vec<String> = (0..16)
        .filter_map(|i| char::from_u32(0x2F00 + i))
        .map(String::from)
        .collect();
    let characters: Vec<String> = (0..kanji)
        .filter_map(|i| char::from_u32(0x4E00 + u32::try_from(i).unwrap_or(0)))
        .map(String::from)
        .collect();

    let mut provider = StaticProvider::new();
    for (i, c) in characters.iter().enumerate() {
        let mut components: Vec<(&str, ItemKind)> = (0..3)
            .map(|k| (radicals[(i * 7 + k) % radicals.len()].as_str(), ItemKind::Primitive))
            .collect();
        if i > 0 {
            components.push((characters[(i * 31) % i].as_str(), ItemKind::Character));
        }
        provider = provider.with_components(c, ItemKind::Character, &components);
    }

    let words = characters
        .windows(2)
        .map(|pair| pair.concat())
        .collect();
    (provider, words)
}

fn bench_ordering(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordering.tiered");

    for (name, size) in TIERS {
        let (provider, words) = synthetic_catalog(size);
        group.throughput(Throughput::Elements(words.len() as u64));

        group.bench_with_input(BenchmarkId::new("build", name), &words, |b, words| {
            b.iter(|| {
                let mut graph = KanjiGraph::new(&provider);
                for word in words {
                    graph.add(word);
                }
                black_box(graph.len())
            });
        });

        let mut graph = KanjiGraph::new(&provider);
        for word in &words {
            graph.add(word);
        }

        group.bench_function(BenchmarkId::new("complexity", name), |b| {
            b.iter(|| {
                let all: Vec<NodeId> = graph.nodes().collect();
                black_box(graph.order_by_complexity(all))
            });
        });

        for order in DeckOrder::ALL {
            group.bench_function(BenchmarkId::new(order.as_str(), name), |b| {
                b.iter(|| black_box(graph.sequence(order)));
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_ordering);
criterion_main!(benches);
