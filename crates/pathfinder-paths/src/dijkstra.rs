use crate::bfs::{DistanceMap, UNREACHABLE};
use crate::frontier::Frontier;
use crate::node::{Cost, NodeId};
use crate::traits::Map;

/// Compute a multi-source Dijkstra cost map.
///
/// Every accessible source starts at cost 0. Expansion stops when the
/// cumulative [`Map::move_cost`] would exceed `max_cost`.
pub fn dijkstra_map<M: Map + ?Sized>(map: &M, sources: &[NodeId], max_cost: Cost) -> DistanceMap {
    let mut dist = DistanceMap::new(map.node_count());
    let mut settled = vec![false; map.node_count()];
    let mut open: Frontier<NodeId, Cost> = Frontier::new();

    for &src in sources {
        if src.index() >= dist.costs.len() || !map.is_accessible(src) {
            continue;
        }
        if dist.costs[src.index()] == UNREACHABLE {
            dist.costs[src.index()] = 0;
            open.insert(src, 0);
        }
    }

    let mut nbuf = Vec::with_capacity(8);

    while let Some((current, current_cost)) = open.remove_min() {
        settled[current.index()] = true;
        dist.reached.push(current);

        nbuf.clear();
        map.neighbors_of(current, &mut nbuf);

        for &n in nbuf.iter() {
            if settled[n.index()] || !map.is_accessible(n) {
                continue;
            }
            let tentative = current_cost + map.move_cost(current, n);
            if tentative > max_cost {
                continue;
            }
            let known = dist.costs[n.index()];
            if known == UNREACHABLE {
                dist.costs[n.index()] = tentative;
                open.insert(n, tentative);
            } else if tentative < known {
                dist.costs[n.index()] = tentative;
                open.reinsert(n, tentative);
            }
        }
    }

    dist
}
