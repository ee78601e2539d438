use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap, VecDeque};

use tracing::{debug, warn};

use super::{QueueEntry, RouteRequest, RouteResult};
use crate::graph::{Cost, Graph, SiteId};

/// Order in which pending states are expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Frontier {
    Fifo,
    CostOrdered,
}

/// One step of a partial route. Paths are shared through parent links.
#[derive(Debug, Clone, Copy)]
struct Label {
    site: SiteId,
    parent: Option<usize>,
    recharged: bool,
}

#[derive(Debug, Clone, Copy)]
struct State {
    label: usize,
    battery: Cost,
    cost: Cost,
}

enum Queue {
    Fifo(VecDeque<State>),
    Heap {
        heap: BinaryHeap<QueueEntry>,
        states: Vec<State>,
    },
}

impl Queue {
    fn new(frontier: Frontier) -> Self {
        match frontier {
            Frontier::Fifo => Queue::Fifo(VecDeque::new()),
            Frontier::CostOrdered => Queue::Heap {
                heap: BinaryHeap::new(),
                states: Vec::new(),
            },
        }
    }

    fn push(&mut self, state: State) {
        match self {
            Queue::Fifo(queue) => queue.push_back(state),
            Queue::Heap { heap, states } => {
                heap.push(QueueEntry {
                    cost: state.cost,
                    seq: states.len(),
                    index: states.len(),
                });
                states.push(state);
            }
        }
    }

    fn pop(&mut self) -> Option<State> {
        match self {
            Queue::Fifo(queue) => queue.pop_front(),
            Queue::Heap { heap, states } => heap.pop().map(|entry| states[entry.index]),
        }
    }
}

/// Explore `(site, battery)` states from the origin until the destination is
/// dequeued. Assumes the request was validated and origin != destination.
pub(super) fn explore(
    graph: &Graph,
    request: &RouteRequest,
    frontier: Frontier,
) -> Option<RouteResult> {
    let limit = request.battery_limit;
    let mut labels = vec![Label {
        site: request.origin,
        parent: None,
        recharged: false,
    }];
    let mut queue = Queue::new(frontier);
    queue.push(State {
        label: 0,
        battery: limit,
        cost: 0,
    });

    // (site, battery on arrival) -> cheapest cost already expanded
    let mut best: HashMap<(SiteId, Cost), Cost> = HashMap::new();
    let mut expansions = 0usize;

    while let Some(state) = queue.pop() {
        let site = labels[state.label].site;
        if site == request.destination {
            debug!(expansions, cost = state.cost, ?frontier, "route found");
            return Some(build_result(&labels, state.label, state.cost));
        }

        match best.entry((site, state.battery)) {
            Entry::Occupied(entry) if *entry.get() <= state.cost => continue,
            Entry::Occupied(mut entry) => {
                entry.insert(state.cost);
            }
            Entry::Vacant(entry) => {
                entry.insert(state.cost);
            }
        }

        if let Some(budget) = request.max_expansions {
            if expansions >= budget {
                warn!(
                    budget,
                    origin = request.origin,
                    destination = request.destination,
                    "search budget exhausted before reaching destination"
                );
                return None;
            }
        }
        expansions += 1;

        let mut battery = state.battery;
        let is_recharge = graph.site(site).is_some_and(|s| s.is_recharge());
        if state.label != 0 && is_recharge && !recharged_along(&labels, state.label, site) {
            labels[state.label].recharged = true;
            battery = limit;
        }

        for edge in graph.neighbours(site) {
            if edge.cost > battery {
                continue;
            }
            let remaining = battery - edge.cost;
            let Some(cost) = state.cost.checked_add(edge.cost) else {
                continue;
            };
            if best
                .get(&(edge.target, remaining))
                .is_some_and(|&seen| seen <= cost)
            {
                continue;
            }

            labels.push(Label {
                site: edge.target,
                parent: Some(state.label),
                recharged: false,
            });
            queue.push(State {
                label: labels.len() - 1,
                battery: remaining,
                cost,
            });
        }
    }

    debug!(expansions, ?frontier, "frontier exhausted without a route");
    None
}

/// Whether the partial route ending at `label` already recharged at `site`.
fn recharged_along(labels: &[Label], label: usize, site: SiteId) -> bool {
    let mut current = Some(label);
    while let Some(index) = current {
        let step = labels[index];
        if step.site == site && step.recharged {
            return true;
        }
        current = step.parent;
    }
    false
}

fn build_result(labels: &[Label], last: usize, total_cost: Cost) -> RouteResult {
    let mut path = Vec::new();
    let mut recharge_stops = Vec::new();
    let mut current = Some(last);
    while let Some(index) = current {
        let step = labels[index];
        path.push(step.site);
        if step.recharged {
            recharge_stops.push(step.site);
        }
        current = step.parent;
    }
    path.reverse();
    recharge_stops.reverse();

    RouteResult {
        path,
        total_cost,
        recharge_stops,
    }
}
