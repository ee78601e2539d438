use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use voltroute_lib::{
    search_route, search_route_with, AllPairsPlanner, Graph, RouteRequest, SearchStrategy,
    SiteRoles,
};

const SIDE: usize = 12;

/// Square grid, cost 3 per step, recharge sites on every fourth column.
static GRID: Lazy<Graph> = Lazy::new(|| {
    let mut graph = Graph::new();
    for row in 0..SIDE {
        for col in 0..SIDE {
            let roles = if col % 4 == 2 && row % 2 == 0 {
                SiteRoles::recharge()
            } else {
                SiteRoles::default()
            };
            let id = graph.add_site(roles);
            if col > 0 {
                graph.add_connection(id - 1, id, 3).expect("grid edge");
            }
            if row > 0 {
                graph.add_connection(id - SIDE, id, 3).expect("grid edge");
            }
        }
    }
    graph
});
static PREPARED: Lazy<AllPairsPlanner> = Lazy::new(|| AllPairsPlanner::prepare(&GRID));

fn corner_to_corner(strategy: SearchStrategy) -> RouteRequest {
    RouteRequest::new(0, SIDE * SIDE - 1, 24).with_strategy(strategy)
}

fn benchmark_pathfinding(c: &mut Criterion) {
    let graph = &*GRID;

    c.bench_function("bfs_grid_corners", |b| {
        let request = corner_to_corner(SearchStrategy::Breadth);
        b.iter(|| {
            let route = search_route(graph, &request).expect("valid request");
            black_box(route.map(|r| r.total_cost))
        });
    });

    c.bench_function("cost_ordered_grid_corners", |b| {
        let request = corner_to_corner(SearchStrategy::CostOrdered);
        b.iter(|| {
            let route = search_route(graph, &request).expect("valid request");
            black_box(route.map(|r| r.total_cost))
        });
    });

    c.bench_function("all_pairs_prepared_grid_corners", |b| {
        let planner = &*PREPARED;
        let request = corner_to_corner(SearchStrategy::AllPairs);
        b.iter(|| {
            let route = search_route_with(planner, graph, &request).expect("valid request");
            black_box(route.map(|r| r.recharge_stops.len()))
        });
    });
}

criterion_group!(benches, benchmark_pathfinding);
criterion_main!(benches);
