use criterion::{criterion_group, criterion_main, Criterion};

use quill_analysis::comments::{flatten, parse_document, FlattenOptions, Sections};
use quill_analysis::matching::{evaluate, MatchMode, PhraseRule, TemplateContext};
use quill_analysis::rules::{Dispatcher, RuleCatalog, Symbol, SymbolKind, TypeRef};

const DOC: &str = r#"<summary>
    Gets or sets the number of items held in the cache before eviction starts.
    </summary>
    <value>The item count.</value>
    <exception cref="T:System.ArgumentOutOfRangeException">The value is negative.</exception>"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_document", |b| b.iter(|| parse_document(DOC)));
}

fn bench_evaluate(c: &mut Criterion) {
    let parsed = parse_document(DOC);
    let sections = Sections::extract(&parsed.comment);
    let text = sections
        .summary()
        .map(|s| flatten(&s.element, &FlattenOptions::default()))
        .unwrap_or_default();
    let starts = PhraseRule::new("B1", MatchMode::StartsWith, ["Gets ", "Gets or sets ", "Sets "]);
    let forbidden = PhraseRule::new(
        "B2",
        MatchMode::MustNotContainAnyOf,
        ["fire", "fired", "fires", "firing", "info"],
    );
    let ctx = TemplateContext::default();

    c.bench_function("evaluate_starts_with", |b| b.iter(|| evaluate(&starts, &text, &ctx)));
    c.bench_function("evaluate_must_not_contain", |b| {
        b.iter(|| evaluate(&forbidden, &text, &ctx))
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(RuleCatalog::builtin().unwrap(), Default::default());
    let symbols: Vec<Symbol> = (0..100)
        .map(|i| {
            Symbol::new(SymbolKind::Property, &format!("Count{i}"))
                .with_return_type(TypeRef::new("System", "Int32"))
                .with_documentation(DOC)
        })
        .collect();

    c.bench_function("analyze_single", |b| b.iter(|| dispatcher.analyze(&symbols[0])));
    c.bench_function("analyze_batch_100", |b| b.iter(|| dispatcher.analyze_batch(&symbols)));
}

criterion_group!(benches, bench_parse, bench_evaluate, bench_dispatch);
criterion_main!(benches);
