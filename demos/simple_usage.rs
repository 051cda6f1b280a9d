/*!
simple_usage.rs

Example demonstrating:
- compile-time corpus embedding using the `include_corpus!` proc-macro (returns a ready `Lexicon`)
- runtime construction of a `Lexicon` from `(line, weight)` pairs

Run with:
    cargo run --example simple_usage

Note: the `include_corpus!` macro expects the path you pass to be relative to the crate root
(evaluated using `CARGO_MANIFEST_DIR`). This example uses `tests/data/corpus.txt`.
*/

use fuzzylex::{include_corpus, Lexicon, LexiconConfig, Suggestion};

fn print_suggestions(title: &str, suggestions: &[Suggestion]) {
    println!("-- {} ({} suggestions) --", title, suggestions.len());
    for s in suggestions {
        println!(
            "  word: {:<12} distance: {:>2} frequency: {}",
            s.word, s.distance, s.frequency
        );
    }
}

fn example_compile_time() {
    let lexicon = include_corpus!("tests/data/corpus.txt", max_distance = 2, weighted = true);

    println!("=== Compile-time embedded corpus ===");

    let exact = lexicon.suggest("world", 2, 10);
    print_suggestions("Lookup for 'world'", &exact);

    let suggestions = lexicon.suggest("helo", 2, 10);
    print_suggestions("Suggestions for 'helo'", &suggestions);

    let top = lexicon.suggest_top("teso", 2, 3);
    print_suggestions("Top 3 for 'teso'", &top);
}

fn example_runtime_build() {
    println!("\n=== Runtime-built lexicon ===");

    let corpus = vec![
        ("hello world", 3usize),
        ("hell help", 1),
        ("test tost", 2),
        ("apple apply applied", 1),
        ("kitten", 5),
    ];

    let lexicon = Lexicon::from_iter(LexiconConfig::default(), corpus);
    println!("{:?}", lexicon);

    let s1 = lexicon.suggest("appl", 1, 10);
    print_suggestions("Suggestions for 'appl' (runtime)", &s1);

    let s2 = lexicon.suggest("sitting", 3, 10);
    print_suggestions("Suggestions for 'sitting' (runtime)", &s2);
}

fn main() {
    println!("fuzzylex example: compile-time macro and runtime builder\n");

    example_compile_time();
    example_runtime_build();

    println!("\nDone.");
}
