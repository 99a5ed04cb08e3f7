use crate::cell::CellId;
use crate::FxIndexMap;

/// Predecessor map of a search. The source maps to [None]. Insertion order is discovery order.
pub type CameFrom = FxIndexMap<CellId, Option<CellId>>;

/// Walks predecessor links from `target` back towards the source, yielding `target` first.
/// Yields nothing if `target` was never recorded. The walk is capped at one link per recorded
/// cell, so a corrupt map containing a cycle cannot make it spin forever.
pub fn trace_back(target: CellId, came_from: &CameFrom) -> impl Iterator<Item = CellId> + '_ {
    let start = came_from.contains_key(&target).then_some(target);
    std::iter::successors(start, move |node| came_from.get(node).copied().flatten())
        .take(came_from.len())
}

/// The path from the source to `target` in source-to-target order, or an empty path when
/// `target` is absent from `came_from`.
pub fn reconstruct(target: CellId, came_from: &CameFrom) -> Vec<CellId> {
    let mut path = trace_back(target, came_from).collect::<Vec<_>>();
    path.reverse();
    path
}
