//! Uniform-cost search over an arbitrary hashable state, modelled on
//! [pathfinding's dijkstra function](https://docs.rs/pathfinding/latest/pathfinding/directed/dijkstra/index.html).
//! States live in an insertion-ordered arena so that parent links are plain indices and ties
//! between equally cheap states are broken by discovery order.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::debug;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Marks the root of a parent arena.
pub const NO_PARENT: usize = usize::MAX;

struct SmallestCostHolder<K> {
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for the max-heap: cheapest first, then earliest discovered
        match other.cost.cmp(&self.cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Walks parent links from `start` back to the root of the arena and returns the nodes in
/// root-to-`start` order.
pub fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut path = Vec::new();
    let mut i = start;
    while let Some((node, value)) = parents.get_index(i) {
        path.push(node.clone());
        i = parent(value);
    }
    path.reverse();
    path
}

/// Reusable buffers of a uniform-cost search. `parents` maps every reached state to its parent
/// index and the best cost found for it.
pub struct SearchContext<N, C> {
    to_see: BinaryHeap<SmallestCostHolder<C>>,
    pub parents: FxIndexMap<N, (usize, C)>,
}

impl<N, C> Default for SearchContext<N, C> {
    fn default() -> Self {
        SearchContext {
            to_see: BinaryHeap::new(),
            parents: FxIndexMap::default(),
        }
    }
}

impl<N, C> SearchContext<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands states cheapest first until `success` holds for a popped state, returning the
    /// path of states leading to it and its cost. A state is only re-queued when reached at a
    /// strictly lower cost.
    pub fn uniform_cost<FN, IN, FS>(
        &mut self,
        start: &N,
        mut successors: FN,
        mut success: FS,
    ) -> Option<(Vec<N>, C)>
    where
        FN: FnMut(&N) -> IN,
        IN: IntoIterator<Item = (N, C)>,
        FS: FnMut(&N) -> bool,
    {
        self.to_see.clear();
        self.parents.clear();
        self.to_see.push(SmallestCostHolder {
            cost: Zero::zero(),
            index: 0,
        });
        self.parents.insert(start.clone(), (NO_PARENT, Zero::zero()));
        let mut expanded = 0usize;
        while let Some(SmallestCostHolder { cost, index }) = self.to_see.pop() {
            let successors = {
                let (node, &(_, c)) = self.parents.get_index(index)?;
                if success(node) {
                    debug!(
                        "Goal reached after expanding {} of {} states",
                        expanded,
                        self.parents.len()
                    );
                    let path = reverse_path(&self.parents, |&(p, _)| p, index);
                    return Some((path, cost));
                }
                // A state may sit in the heap several times if a cheaper way to it was found
                // later; only the entry matching the best cost is expanded.
                if cost > c {
                    continue;
                }
                expanded += 1;
                successors(node)
            };
            for (successor, move_cost) in successors {
                let new_cost = cost + move_cost;
                let n;
                match self.parents.entry(successor) {
                    Vacant(e) => {
                        n = e.index();
                        e.insert((index, new_cost));
                    }
                    Occupied(mut e) => {
                        if e.get().1 > new_cost {
                            n = e.index();
                            e.insert((index, new_cost));
                        } else {
                            continue;
                        }
                    }
                }
                self.to_see.push(SmallestCostHolder {
                    cost: new_cost,
                    index: n,
                });
            }
        }
        debug!("Frontier exhausted after expanding {} states", expanded);
        None
    }
}
