use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fuzzy_trie::{levenshtein_str, Lexicon, RadixTrie};
use rand::{rngs::StdRng, Rng, SeedableRng};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

fn random_words(count: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(3..12);
            (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect()
        })
        .collect()
}

/// Flip one char in each word to produce near-miss queries
fn typo_queries(words: &[String], seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    words
        .iter()
        .map(|w| {
            let mut chars: Vec<char> = w.chars().collect();
            let at = rng.gen_range(0..chars.len());
            chars[at] = ALPHABET[rng.gen_range(0..ALPHABET.len())] as char;
            chars.into_iter().collect()
        })
        .collect()
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for size in [1_000, 10_000] {
        let words = random_words(size, 7);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| {
                let mut trie = RadixTrie::new();
                for w in words {
                    trie.insert(w);
                }
                black_box(trie.len())
            })
        });
    }
    group.finish();
}

fn bench_fuzzy(c: &mut Criterion) {
    let words = random_words(10_000, 7);
    let lex: Lexicon = words.iter().map(|w| (w.as_str(), "")).collect();
    let queries = typo_queries(&words[..100], 11);

    let mut group = c.benchmark_group("fuzzy_lookup");
    group.throughput(Throughput::Elements(queries.len() as u64));
    for max_edits in [0, 1, 2] {
        group.bench_with_input(
            BenchmarkId::from_parameter(max_edits),
            &max_edits,
            |b, &max_edits| {
                b.iter(|| {
                    for q in &queries {
                        black_box(lex.fuzzy_lookup(q, max_edits, 10).unwrap());
                    }
                })
            },
        );
    }

    // Baseline: scan every word with the distance helper
    group.bench_function("linear_scan_2", |b| {
        b.iter(|| {
            for q in &queries {
                let hits = words.iter().filter(|w| levenshtein_str(q, w) <= 2).count();
                black_box(hits);
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_insert, bench_fuzzy);
criterion_main!(benches);
