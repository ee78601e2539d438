//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use voltroute_lib::{Cost, Graph, RouteResult, SiteId, SiteRoles};

/// Path to fixtures directory used by tests.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Five sites in a line, cost 10 per hop, a recharge site in the middle.
#[allow(dead_code)]
pub fn line_network() -> Graph {
    let mut graph = Graph::new();
    for id in 0..5 {
        let roles = match id {
            0 => SiteRoles::depot(),
            2 => SiteRoles::recharge(),
            4 => SiteRoles::customer(),
            _ => SiteRoles::default(),
        };
        graph.add_site(roles);
    }
    for id in 1..5 {
        graph.add_connection(id - 1, id, 10).expect("valid connection");
    }
    graph
}

/// Random connected-ish network: a spanning chain plus extra edges, roughly a
/// quarter of the sites flagged as recharge points.
#[allow(dead_code)]
pub fn random_network(rng: &mut StdRng, sites: usize, extra_edges: usize) -> Graph {
    let mut graph = Graph::new();
    for _ in 0..sites {
        let roles = if rng.gen_bool(0.25) {
            SiteRoles::recharge()
        } else {
            SiteRoles::default()
        };
        graph.add_site(roles);
    }
    for id in 1..sites {
        let other = rng.gen_range(0..id);
        graph
            .add_connection(other, id, rng.gen_range(1..=20))
            .expect("fresh pair");
    }
    for _ in 0..extra_edges {
        let a = rng.gen_range(0..sites);
        let b = rng.gen_range(0..sites);
        if a != b && graph.connection_cost(a, b).is_none() {
            graph
                .add_connection(a, b, rng.gen_range(1..=20))
                .expect("fresh pair");
        }
    }
    graph
}

#[allow(dead_code)]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Replay a route hop by hop and check it never needs more than `limit`
/// between the origin or a recharge stop and the next recharge stop or the
/// destination.
#[allow(dead_code)]
pub fn assert_battery_feasible(graph: &Graph, route: &RouteResult, limit: Cost) {
    let mut stops = route.recharge_stops.iter().copied().peekable();
    let mut battery = limit;
    for (position, pair) in route.path.windows(2).enumerate() {
        let at: SiteId = pair[0];
        if position > 0 && stops.peek() == Some(&at) {
            stops.next();
            battery = limit;
        }
        let cost = graph
            .connection_cost(pair[0], pair[1])
            .expect("route uses existing connections");
        battery -= cost;
        assert!(
            battery >= 0,
            "battery ran out between {} and {} on {:?}",
            pair[0],
            pair[1],
            route
        );
    }
    assert!(stops.next().is_none(), "unused recharge stops in {route:?}");
}
