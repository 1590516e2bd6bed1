use criterion::{criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;
use waypoint_routing::{
    solver::bfs::shortest_path, Coord, GridConfig, NoRevisitStrategy, OrderPolicy, PathingGrid,
    RevisitPolicy, RoutingEngine,
};

/// Random `n` by `n` configuration from corner to corner with `n_required` free required
/// points. Blocked cells are drawn with probability 0.2 until every marker is connected.
fn random_config(n: usize, n_required: usize, seed: u64) -> GridConfig {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = Coord::new(0, 0);
    let end = Coord::new(n as i32 - 1, n as i32 - 1);
    loop {
        let blocked: Vec<Coord> = (0..n as i32)
            .flat_map(|row| (0..n as i32).map(move |col| Coord::new(row, col)))
            .filter(|c| *c != start && *c != end && rng.gen_bool(0.2))
            .collect();
        let grid = PathingGrid::new(n, &blocked);
        if !grid.reachable(&start, &end) {
            continue;
        }
        let mut required = Vec::new();
        while required.len() < n_required {
            let c = Coord::new(rng.gen_range(0..n as i32), rng.gen_range(0..n as i32));
            if grid.reachable(&start, &c) {
                required.push(c);
            }
        }
        return GridConfig::new(n, start, end)
            .with_blocked(blocked)
            .with_required(required);
    }
}

fn bench_bfs(c: &mut Criterion) {
    for n in [32, 128] {
        let config = random_config(n, 0, 0);
        let grid = PathingGrid::from_config(&config);
        let (start, end) = (config.start.unwrap(), config.end.unwrap());
        c.bench_function(format!("bfs {n}x{n}").as_str(), |b| {
            b.iter(|| black_box(shortest_path(&grid, start, end, None)))
        });
    }
}

fn bench_policies(c: &mut Criterion) {
    let config = random_config(32, 8, 1);
    for (order, revisit) in [
        (OrderPolicy::AsSpecified, RevisitPolicy::Allowed),
        (OrderPolicy::AsSpecified, RevisitPolicy::Forbidden),
        (OrderPolicy::Optimize, RevisitPolicy::Allowed),
    ] {
        let config = config.clone().with_policies(order, revisit);
        let engine = RoutingEngine::default();
        c.bench_function(
            format!("32x32, 8 required, {order:?} {revisit:?}").as_str(),
            |b| b.iter(|| black_box(engine.route(&config))),
        );
    }
}

fn bench_no_revisit_strategies(c: &mut Criterion) {
    let config = random_config(5, 2, 2)
        .with_policies(OrderPolicy::Optimize, RevisitPolicy::Forbidden);
    for strategy in [
        NoRevisitStrategy::GlobalSearch,
        NoRevisitStrategy::OrderThenSegments,
    ] {
        let engine = RoutingEngine::new(strategy);
        c.bench_function(format!("5x5, 2 required, {strategy:?}").as_str(), |b| {
            b.iter(|| black_box(engine.route(&config)))
        });
    }
}

fn bench_held_karp_scaling(c: &mut Criterion) {
    for n_required in [4, 8, 12] {
        let config = random_config(32, n_required, 3)
            .with_policies(OrderPolicy::Optimize, RevisitPolicy::Allowed);
        let engine = RoutingEngine::default();
        c.bench_function(format!("held-karp, {n_required} required").as_str(), |b| {
            b.iter(|| black_box(engine.route(&config)))
        });
    }
}

criterion_group!(
    benches,
    bench_bfs,
    bench_policies,
    bench_no_revisit_strategies,
    bench_held_karp_scaling,
);
criterion_main!(benches);
