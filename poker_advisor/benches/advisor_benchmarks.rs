use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use poker_advisor::{
    DecisionEngine, EngineConfig, EquityOracle, MonteCarloOracle, OpponentTracker, Position,
    Situation, cards::parse_cards, oracle::evaluate_seven,
};
use std::sync::Arc;

fn hand(s: &str) -> [poker_advisor::Card; 2] {
    let cards = parse_cards(s).unwrap();
    [cards[0], cards[1]]
}

/// Benchmark seven-card showdown scoring
fn bench_evaluate_seven(c: &mut Criterion) {
    let cards = parse_cards("AsKsQsJsTs2h3d").unwrap();
    let cards: [poker_advisor::Card; 7] = cards.try_into().unwrap();

    c.bench_function("evaluate_seven", |b| {
        b.iter(|| evaluate_seven(cards));
    });
}

/// Benchmark Monte Carlo equity at increasing iteration budgets
fn bench_monte_carlo_equity(c: &mut Criterion) {
    let oracle = MonteCarloOracle::seeded(1);
    let board = parse_cards("Kc8s2d").unwrap();

    let mut group = c.benchmark_group("monte_carlo_equity");
    for iterations in [1_000u32, 10_000] {
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |b, &iterations| {
                b.iter(|| {
                    oracle
                        .equity(hand("AhKd"), &board, 1, iterations, None)
                        .unwrap()
                });
            },
        );
    }
    group.finish();
}

/// Benchmark a full decision (texture, economics, blend, EV, selection)
fn bench_full_decision(c: &mut Criterion) {
    let engine = DecisionEngine::new(
        Arc::new(MonteCarloOracle::seeded(1)),
        Arc::new(OpponentTracker::new(30)),
        EngineConfig::default().with_iterations(5_000),
    );
    let situation = Situation::new(
        hand("QhQd"),
        parse_cards("2s7h9c").unwrap(),
        120.0,
        40.0,
        600.0,
        Position::Co,
        None,
        2,
    )
    .unwrap();

    c.bench_function("full_decision", |b| {
        b.iter(|| engine.decide(&situation));
    });
}

criterion_group!(
    benches,
    bench_evaluate_seven,
    bench_monte_carlo_equity,
    bench_full_decision
);
criterion_main!(benches);
