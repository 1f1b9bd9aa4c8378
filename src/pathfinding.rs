//! Dijkstra's and A* pathfinding on top of an indexed heap
//!
//! This module provides generic implementations of Dijkstra's shortest path
//! algorithm and A* search. The open set is an [`IndexedHeap`] keyed by node
//! index: when a cheaper route to an open node is found, its priority is
//! updated in place with [`change_priority`](IndexedHeap::change_priority)
//! instead of pushing a duplicate entry. Every node is therefore in the open
//! set at most once, and each poll settles a node for good.
//!
//! # Design
//!
//! Only lightweight `usize` indices are stored in the heap. A fast hash map
//! (FxHash) maps node states to their index, and a vector indexed by that
//! index holds the per-node bookkeeping (cost so far, predecessor, closed
//! flag). Because node indices are dense, the heap can use
//! [`DenseIndex`](crate::storage::DenseIndex) as its position index.
//!
//! Dijkstra is A* with `h(n) = 0`.
//!
//! # Example
//!
//! ```rust
//! use indexed_heaps::pathfinding::{SearchNode, dijkstra};
//! use indexed_heaps::IndexedMinHeap;
//!
//! // Node carries its goal coordinates
//! #[derive(Clone, PartialEq, Eq, Hash)]
//! struct GridPos { x: i32, y: i32, goal_x: i32, goal_y: i32 }
//!
//! impl SearchNode for GridPos {
//!     type Cost = u32;
//!
//!     fn successors(&self) -> Vec<(Self, Self::Cost)> {
//!         vec![
//!             (GridPos { x: self.x + 1, y: self.y, ..*self }, 1),
//!             (GridPos { x: self.x - 1, y: self.y, ..*self }, 1),
//!             (GridPos { x: self.x, y: self.y + 1, ..*self }, 1),
//!             (GridPos { x: self.x, y: self.y - 1, ..*self }, 1),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.x == self.goal_x && self.y == self.goal_y
//!     }
//! }
//!
//! let start = GridPos { x: 0, y: 0, goal_x: 2, goal_y: 2 };
//!
//! let (path, cost) = dijkstra::<_, IndexedMinHeap<_, _>>(&start).unwrap();
//! assert_eq!(cost, 4); // Manhattan distance
//! assert_eq!(path.len(), 5);
//! ```

use crate::traits::{HeapError, IndexedHeap};
use log::debug;
use rustc_hash::FxHashMap;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::{Add, ControlFlow};

/// Trait for types that can be used as costs in pathfinding algorithms.
///
/// This requires the type to be orderable, copyable, and support addition.
/// `Default` supplies the zero cost of the start node.
pub trait Cost: Ord + Copy + Add<Output = Self> + Default {}

impl<T> Cost for T where T: Ord + Copy + Add<Output = Self> + Default {}

/// Trait for nodes in a search graph.
///
/// Implement this trait for your node type to use Dijkstra's or A* algorithms.
/// The node carries all context needed to generate successors and to decide
/// whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// The cost type for edge weights
    type Cost: Cost;

    /// Returns all successor nodes along with the cost to reach them.
    fn successors(&self) -> Vec<(Self, Self::Cost)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can provide a heuristic estimate for A* search.
///
/// The heuristic must be admissible (never overestimate the true cost)
/// for A* to find optimal paths.
pub trait AStarNode: SearchNode {
    /// Returns a heuristic estimate of the cost from this node to any goal.
    fn heuristic(&self) -> Self::Cost;
}

/// Heap priority for the open set, ordered by f-score only.
///
/// Lower costs have higher priority (min-heap behavior).
#[derive(Debug, Clone, Copy)]
pub struct PriorityCost<C> {
    /// The f-score: g + h (where h=0 for Dijkstra)
    pub f_score: C,
    /// The actual cost from start (g-score)
    pub g_score: C,
}

impl<C: Ord> PartialEq for PriorityCost<C> {
    fn eq(&self, other: &Self) -> bool {
        self.f_score == other.f_score
    }
}

impl<C: Ord> Eq for PriorityCost<C> {}

impl<C: Ord> PartialOrd for PriorityCost<C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: Ord> Ord for PriorityCost<C> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_score.cmp(&other.f_score)
    }
}

/// Index of a discovered node; this is the value stored in the heap.
pub type NodeIndex = usize;

/// Bookkeeping for each discovered node.
struct NodeEntry<N: SearchNode> {
    node: N,
    /// Best known cost from start
    g_score: N::Cost,
    /// Predecessor on the best known path
    came_from: Option<NodeIndex>,
    /// Settled: polled from the open set, cost is final
    closed: bool,
}

/// Optional bounds on a search.
#[derive(Debug, Clone, Copy)]
struct SearchLimits<C> {
    max_cost: Option<C>,
    max_nodes: Option<usize>,
}

impl<C> SearchLimits<C> {
    fn unbounded() -> Self {
        SearchLimits {
            max_cost: None,
            max_nodes: None,
        }
    }
}

/// The closed/discovered set of a search, keyed by dense node indices.
struct PathFinder<N: SearchNode> {
    nodes: Vec<NodeEntry<N>>,
    state_to_index: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode> PathFinder<N> {
    fn new() -> Self {
        PathFinder {
            nodes: Vec::new(),
            state_to_index: FxHashMap::default(),
        }
    }

    /// Registers a newly discovered node and returns its index.
    fn discover(&mut self, node: N, g_score: N::Cost, came_from: Option<NodeIndex>) -> NodeIndex {
        let index = self.nodes.len();
        self.state_to_index.insert(node.clone(), index);
        self.nodes.push(NodeEntry {
            node,
            g_score,
            came_from,
            closed: false,
        });
        index
    }

    /// Offers a route of cost `g_score` to `neighbor` through `from`.
    ///
    /// New nodes enter the open set; open nodes with a worse known cost get
    /// their priority lowered; settled nodes are left alone.
    fn relax<H>(
        &mut self,
        heap: &mut H,
        from: NodeIndex,
        neighbor: N,
        g_score: N::Cost,
        h_score: N::Cost,
    ) -> Result<(), HeapError>
    where
        H: IndexedHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        let priority = PriorityCost {
            f_score: g_score + h_score,
            g_score,
        };

        let known = self.state_to_index.get(&neighbor).copied();
        match known {
            None => {
                let index = self.discover(neighbor, g_score, Some(from));
                heap.add(index, priority)
            }
            Some(index) => {
                let entry = &mut self.nodes[index];
                if entry.closed || g_score >= entry.g_score {
                    return Ok(());
                }
                entry.g_score = g_score;
                entry.came_from = Some(from);
                heap.change_priority(&index, priority)
            }
        }
    }

    /// Reconstructs the path from start to the given node index.
    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = Vec::new();

        loop {
            let entry = &self.nodes[current];
            path.push(entry.node.clone());

            match entry.came_from {
                Some(prev) => current = prev,
                None => break,
            }
        }

        path.reverse();
        path
    }
}

/// Settles nodes in order of f-score, calling `visit` on each one.
///
/// Returns the value `visit` breaks with, or `None` when the open set runs
/// dry or a limit is hit.
fn explore<N, H, R>(
    start: &N,
    heuristic: impl Fn(&N) -> N::Cost,
    limits: SearchLimits<N::Cost>,
    mut visit: impl FnMut(&PathFinder<N>, NodeIndex) -> ControlFlow<R>,
) -> Result<Option<R>, HeapError>
where
    N: SearchNode,
    H: IndexedHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut heap = H::new();
    let mut finder = PathFinder::new();

    let start_index = finder.discover(start.clone(), N::Cost::default(), None);
    heap.add(
        start_index,
        PriorityCost {
            f_score: heuristic(start),
            g_score: N::Cost::default(),
        },
    )?;

    let mut settled = 0usize;

    while let Ok(current) = heap.poll() {
        if let Some(max) = limits.max_nodes {
            if settled >= max {
                debug!("search stopped: node limit {} reached", max);
                return Ok(None);
            }
        }
        settled += 1;

        let entry = &mut finder.nodes[current];
        entry.closed = true;
        let current_g = entry.g_score;
        let current_node = entry.node.clone();

        if let ControlFlow::Break(found) = visit(&finder, current) {
            debug!(
                "search finished after settling {} nodes ({} still open)",
                settled,
                heap.len()
            );
            return Ok(Some(found));
        }

        for (neighbor, edge_cost) in current_node.successors() {
            let tentative_g = current_g + edge_cost;

            if let Some(max) = limits.max_cost {
                if tentative_g > max {
                    continue;
                }
            }

            let h = heuristic(&neighbor);
            finder.relax(&mut heap, current, neighbor, tentative_g, h)?;
        }
    }

    debug!("search exhausted after settling {} nodes", settled);
    Ok(None)
}

/// Visitor that stops at the first settled goal node.
fn stop_at_goal<N: SearchNode>(
    finder: &PathFinder<N>,
    index: NodeIndex,
) -> ControlFlow<(Vec<N>, N::Cost)> {
    let entry = &finder.nodes[index];
    if entry.node.is_goal() {
        ControlFlow::Break((finder.reconstruct_path(index), entry.g_score))
    } else {
        ControlFlow::Continue(())
    }
}

const OPEN_SET_INVARIANT: &str = "open set must hold exactly the discovered, unsettled nodes";

/// Runs Dijkstra's algorithm from the start node until `is_goal()` returns true.
///
/// # Type Parameters
/// - `N`: The node type implementing [`SearchNode`]
/// - `H`: The open-set heap implementing [`IndexedHeap`]
///
/// # Returns
/// - `Some((path, cost))` if a path is found; the path includes start and goal
/// - `None` if no path exists
///
/// # Example
/// ```rust
/// use indexed_heaps::pathfinding::{SearchNode, dijkstra};
/// use indexed_heaps::{DenseIndex, IndexedMinHeap};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// struct Node {
///     value: i32,
///     goal: i32,
/// }
///
/// impl SearchNode for Node {
///     type Cost = u32;
///
///     fn successors(&self) -> Vec<(Self, u32)> {
///         if self.value < 100 {
///             vec![(Node { value: self.value + 1, goal: self.goal }, 1)]
///         } else {
///             vec![]
///         }
///     }
///
///     fn is_goal(&self) -> bool {
///         self.value == self.goal
///     }
/// }
///
/// let start = Node { value: 0, goal: 5 };
/// let result = dijkstra::<_, IndexedMinHeap<_, _, DenseIndex>>(&start);
/// let (path, cost) = result.unwrap();
/// assert_eq!(cost, 5);
/// assert_eq!(path.len(), 6);
/// ```
pub fn dijkstra<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: SearchNode,
    H: IndexedHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    explore::<N, H, _>(
        start,
        |_| N::Cost::default(),
        SearchLimits::unbounded(),
        stop_at_goal,
    )
    .expect(OPEN_SET_INVARIANT)
}

/// Runs A* search from the start node until `is_goal()` returns true.
///
/// Uses the node's `heuristic()` method to guide the search.
///
/// # Returns
/// - `Some((path, cost))` if a path is found
/// - `None` if no path exists
pub fn astar<N, H>(start: &N) -> Option<(Vec<N>, N::Cost)>
where
    N: AStarNode,
    H: IndexedHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    explore::<N, H, _>(
        start,
        |n| n.heuristic(),
        SearchLimits::unbounded(),
        stop_at_goal,
    )
    .expect(OPEN_SET_INVARIANT)
}

/// Builder for pathfinding queries with more configuration options.
///
/// The node type's `is_goal()` method determines when to stop.
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    limits: SearchLimits<N::Cost>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            limits: SearchLimits::unbounded(),
        }
    }

    /// Sets the maximum path cost to explore.
    pub fn max_cost(mut self, cost: N::Cost) -> Self {
        self.limits.max_cost = Some(cost);
        self
    }

    /// Sets the maximum number of nodes to settle.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.limits.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured settings.
    pub fn dijkstra<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        H: IndexedHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        explore::<N, H, _>(
            &self.start,
            |_| N::Cost::default(),
            self.limits,
            stop_at_goal,
        )
        .expect(OPEN_SET_INVARIANT)
    }

    /// Runs A* search with the configured settings.
    pub fn astar<H>(self) -> Option<(Vec<N>, N::Cost)>
    where
        N: AStarNode,
        H: IndexedHeap<NodeIndex, PriorityCost<N::Cost>>,
    {
        explore::<N, H, _>(&self.start, |n| n.heuristic(), self.limits, stop_at_goal)
            .expect(OPEN_SET_INVARIANT)
    }
}

/// Returns all nodes reachable from the start within a given cost budget.
///
/// Nodes are returned in nondecreasing order of cost, each exactly once,
/// starting with `start` itself at cost zero.
pub fn reachable_within<N, H>(start: &N, max_cost: N::Cost) -> Vec<(N, N::Cost)>
where
    N: SearchNode,
    H: IndexedHeap<NodeIndex, PriorityCost<N::Cost>>,
{
    let mut result = Vec::new();
    let limits = SearchLimits {
        max_cost: Some(max_cost),
        max_nodes: None,
    };

    explore::<N, H, ()>(start, |_| N::Cost::default(), limits, |finder, index| {
        let entry = &finder.nodes[index];
        result.push((entry.node.clone(), entry.g_score));
        ControlFlow::Continue(())
    })
    .expect(OPEN_SET_INVARIANT);

    result
}
