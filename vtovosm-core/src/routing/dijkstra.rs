use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;

use super::overlay::{RouteNode, RouteOverlay};

#[derive(Copy, Clone)]
struct State {
    cost: f64,
    node: RouteNode,
}

// Min-heap by cost, ties broken by node for a deterministic pop order
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for State {}

/// Shortest path from `start` to `target` by cumulative edge length.
///
/// Returns the total length and the visited nodes, both ends included, or
/// `None` if `target` cannot be reached.
pub(crate) fn dijkstra_path(
    overlay: &RouteOverlay<'_>,
    start: RouteNode,
    target: RouteNode,
) -> Option<(f64, Vec<RouteNode>)> {
    if !overlay.contains(start) || !overlay.contains(target) {
        return None;
    }

    let mut distances: HashMap<RouteNode, f64> = HashMap::new();
    let mut predecessors: HashMap<RouteNode, RouteNode> = HashMap::new();
    let mut heap = BinaryHeap::new();

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        // Skip if we've found a better path
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in overlay.neighbors(node) {
            let next_cost = cost + edge.length;

            match distances.entry(edge.to) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: edge.to,
                    });
                    predecessors.insert(edge.to, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: edge.to,
                        });
                        predecessors.insert(edge.to, node);
                    }
                }
            }
        }
    }

    let total = *distances.get(&target)?;

    // Follow predecessors backward from target to start
    let mut path = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        path.push(current);
    }
    path.reverse();

    Some((total, path))
}
