use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use thiserror::Error;

use crate::board::HexBoard;
use crate::hex::CubeCoord;

/// Ways a run can be refused or a route reconstruction can fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint handed to [`SearchEngine::start`] is off the board or
    /// sits on a wall.
    #[error("endpoint {0} is off the board or walled")]
    InvalidEndpoint(CubeCoord),
    /// No completed route is available to walk back through.
    #[error("no recorded path between the endpoints")]
    NoPathRecorded,
}

/// Frontier discipline for a run. Chosen when the run starts; switching
/// afterwards only affects the next run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum SearchMode {
    /// Uniform flood fill. Every hop costs one, terrain weights are ignored.
    #[default]
    Bfs,
    /// Weighted best-first expansion ordered by cost so far plus the hex
    /// distance left to the goal.
    AStar,
}

/// Lifecycle of a search run. `Found` and `Exhausted` are terminal until the
/// next [`SearchEngine::start`] or [`SearchEngine::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No run is loaded.
    #[default]
    Idle,
    /// A run is underway; the frontier still holds candidates.
    Running,
    /// The goal was popped from the frontier.
    Found,
    /// The frontier drained without reaching the goal.
    Exhausted,
}

/// Heap entry for the weighted frontier.
///
/// The ordering is reversed so `BinaryHeap` pops the smallest estimate
/// first, and equal estimates fall back to insertion order so ties resolve
/// first-in-first-out rather than by heap internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenNode {
    f: u32,
    g: u32,
    seq: u64,
    coord: CubeCoord,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum Frontier {
    Fifo(VecDeque<CubeCoord>),
    Best(BinaryHeap<OpenNode>),
}

impl Default for Frontier {
    fn default() -> Self {
        Self::Fifo(VecDeque::new())
    }
}

/// Incremental pathfinding over a [`HexBoard`].
///
/// The engine owns the run bookkeeping (frontier, predecessor links, cost
/// map) while the board keeps the per-tile display flags. One call to
/// [`step`](Self::step) expands at most one frontier entry, so a caller can
/// pace a run however it likes; the engine itself never consults a clock.
#[derive(Resource, Default)]
pub struct SearchEngine {
    phase: SearchPhase,
    endpoints: Option<(CubeCoord, CubeCoord)>,
    frontier: Frontier,
    came_from: HashMap<CubeCoord, CubeCoord>,
    cost_so_far: HashMap<CubeCoord, u32>,
    seq: u64,
}

impl SearchEngine {
    // ── Run control ────────────────────────────────────────────────

    /// Begins a fresh run from `origin` towards `goal`, discarding any
    /// previous run and clearing the board's visited/path marks.
    ///
    /// Both endpoints must be on the board and unwalled; otherwise the
    /// offending coordinate comes back as [`SearchError::InvalidEndpoint`]
    /// and the engine stays as it was.
    pub fn start(
        &mut self,
        board: &mut HexBoard,
        origin: CubeCoord,
        goal: CubeCoord,
        mode: SearchMode,
    ) -> Result<(), SearchError> {
        for endpoint in [origin, goal] {
            if board.get(endpoint).is_none_or(|tile| tile.is_wall) {
                return Err(SearchError::InvalidEndpoint(endpoint));
            }
        }

        board.clear_search_marks();
        self.came_from = HashMap::new();
        self.cost_so_far = HashMap::new();
        self.seq = 0;
        self.frontier = match mode {
            SearchMode::Bfs => Frontier::Fifo(VecDeque::from([origin])),
            SearchMode::AStar => {
                let mut heap = BinaryHeap::new();
                heap.push(OpenNode {
                    f: origin.distance_to(goal),
                    g: 0,
                    seq: 0,
                    coord: origin,
                });
                Frontier::Best(heap)
            }
        };

        // The origin is discovered at cost zero and has no predecessor.
        self.cost_so_far.insert(origin, 0);
        board.mark_visited(origin);
        self.endpoints = Some((origin, goal));
        self.phase = SearchPhase::Running;
        Ok(())
    }

    /// Expands at most one frontier entry and reports the resulting phase.
    ///
    /// Outside `Running` this is a no-op. An empty frontier flips the run to
    /// `Exhausted`; popping the goal flips it to `Found`. Walls painted
    /// after a tile was queued are honored here, when the tile is popped,
    /// so a freshly walled tile is skipped instead of expanded.
    pub fn step(&mut self, board: &mut HexBoard) -> SearchPhase {
        if self.phase != SearchPhase::Running {
            return self.phase;
        }
        let Some((_, goal)) = self.endpoints else {
            return self.phase;
        };

        let current = match &mut self.frontier {
            Frontier::Fifo(queue) => match queue.pop_front() {
                Some(coord) => coord,
                None => {
                    self.phase = SearchPhase::Exhausted;
                    return self.phase;
                }
            },
            Frontier::Best(heap) => match heap.pop() {
                Some(node) => {
                    // A cheaper route may have superseded this entry while it
                    // waited in the heap. Dropping it consumes the step.
                    let recorded = self.cost_so_far.get(&node.coord).copied();
                    if recorded.is_some_and(|g| node.g > g) {
                        return self.phase;
                    }
                    node.coord
                }
                None => {
                    self.phase = SearchPhase::Exhausted;
                    return self.phase;
                }
            },
        };

        if board.get(current).is_none_or(|tile| tile.is_wall) {
            return self.phase;
        }
        if current == goal {
            self.phase = SearchPhase::Found;
            return self.phase;
        }

        let current_cost = self.cost_so_far.get(&current).copied().unwrap_or(0);
        let neighbors: Vec<CubeCoord> = board.neighbors(current).collect();

        match &mut self.frontier {
            Frontier::Fifo(queue) => {
                for neighbor in neighbors {
                    let walled = board.get(neighbor).is_none_or(|tile| tile.is_wall);
                    if walled || self.cost_so_far.contains_key(&neighbor) {
                        continue;
                    }
                    self.cost_so_far.insert(neighbor, current_cost + 1);
                    self.came_from.insert(neighbor, current);
                    board.mark_visited(neighbor);
                    queue.push_back(neighbor);
                }
            }
            Frontier::Best(heap) => {
                for neighbor in neighbors {
                    let Some(tile) = board.get(neighbor) else {
                        continue;
                    };
                    if tile.is_wall {
                        continue;
                    }
                    let tentative = current_cost + tile.cost;
                    let improves = self.cost_so_far.get(&neighbor).is_none_or(|&g| tentative < g);
                    if !improves {
                        continue;
                    }
                    self.cost_so_far.insert(neighbor, tentative);
                    self.came_from.insert(neighbor, current);
                    board.mark_visited(neighbor);
                    self.seq += 1;
                    heap.push(OpenNode {
                        f: tentative + neighbor.distance_to(goal),
                        g: tentative,
                        seq: self.seq,
                        coord: neighbor,
                    });
                }
            }
        }

        self.phase
    }

    /// Forgets the current run entirely and returns to `Idle`. Board flags
    /// are left alone; the next [`start`](Self::start) clears them.
    pub fn stop(&mut self) {
        *self = Self::default();
    }

    // ── Inspection ─────────────────────────────────────────────────

    /// Where the current run stands.
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Coordinates currently queued for expansion. Order is meaningful for
    /// the FIFO frontier only.
    pub fn frontier_coords(&self) -> Vec<CubeCoord> {
        match &self.frontier {
            Frontier::Fifo(queue) => queue.iter().copied().collect(),
            Frontier::Best(heap) => heap.iter().map(|node| node.coord).collect(),
        }
    }

    /// How many tiles the current run has discovered so far.
    pub fn discovered_count(&self) -> usize {
        self.cost_so_far.len()
    }

    /// Accumulated cost recorded for `coord`, if the run has reached it.
    pub fn cost_at(&self, coord: CubeCoord) -> Option<u32> {
        self.cost_so_far.get(&coord).copied()
    }

    /// Walks the predecessor links back from the goal and returns the route
    /// in origin-to-goal order. Fails with [`SearchError::NoPathRecorded`]
    /// when no run is loaded or the links do not reach the origin.
    pub fn reconstruct_path(&self) -> Result<Vec<CubeCoord>, SearchError> {
        let (origin, goal) = self.endpoints.ok_or(SearchError::NoPathRecorded)?;

        let mut path = vec![goal];
        let mut current = goal;
        while current != origin {
            match self.came_from.get(&current) {
                Some(prev) => {
                    current = *prev;
                    path.push(current);
                }
                None => return Err(SearchError::NoPathRecorded),
            }
        }
        path.reverse();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardBounds;
    use crate::hex::{HexLayout, offset_to_cube};

    fn board(top: i32, bottom: i32, left: i32, right: i32) -> HexBoard {
        HexBoard::new(
            HexLayout::default(),
            BoardBounds {
                top,
                bottom,
                left,
                right,
            },
        )
    }

    fn run_until_settled(engine: &mut SearchEngine, board: &mut HexBoard) -> SearchPhase {
        for _ in 0..10_000 {
            let phase = engine.step(board);
            if phase != SearchPhase::Running {
                return phase;
            }
        }
        panic!("search did not settle");
    }

    /// Exhaustive minimum over simple paths; fine for the tiny test grids.
    fn cheapest_route_cost(board: &HexBoard, from: CubeCoord, to: CubeCoord) -> Option<u32> {
        fn walk(
            board: &HexBoard,
            at: CubeCoord,
            to: CubeCoord,
            seen: &mut Vec<CubeCoord>,
            cost: u32,
            best: &mut Option<u32>,
        ) {
            if at == to {
                *best = Some(best.map_or(cost, |b| b.min(cost)));
                return;
            }
            let neighbors: Vec<CubeCoord> = board.neighbors(at).collect();
            for n in neighbors {
                let tile = board.get(n).unwrap();
                if tile.is_wall || seen.contains(&n) {
                    continue;
                }
                seen.push(n);
                walk(board, n, to, seen, cost + tile.cost, best);
                seen.pop();
            }
        }

        let mut best = None;
        walk(board, from, to, &mut vec![from], 0, &mut best);
        best
    }

    fn assert_contiguous(board: &HexBoard, path: &[CubeCoord]) {
        for pair in path.windows(2) {
            assert_eq!(pair[0].distance_to(pair[1]), 1, "path must step between neighbors");
        }
        for coord in path {
            assert!(board.get(*coord).is_some(), "path must stay on the board");
        }
    }

    // ── frontier ordering ──────────────────────────────────────────

    #[test]
    fn open_nodes_pop_cheapest_first_then_fifo() {
        let coord = CubeCoord::axial(0, 0);
        let mut heap = BinaryHeap::new();
        heap.push(OpenNode { f: 3, g: 3, seq: 1, coord });
        heap.push(OpenNode { f: 2, g: 2, seq: 2, coord });
        heap.push(OpenNode { f: 2, g: 2, seq: 3, coord });

        let order: Vec<(u32, u64)> = std::iter::from_fn(|| heap.pop())
            .map(|n| (n.f, n.seq))
            .collect();
        assert_eq!(order, vec![(2, 2), (2, 3), (3, 1)]);
    }

    // ── start validation ───────────────────────────────────────────

    #[test]
    fn start_rejects_off_grid_endpoints() {
        let mut b = board(0, 4, 0, 4);
        let mut engine = SearchEngine::default();
        let off = CubeCoord::axial(40, 40);
        let err = engine
            .start(&mut b, off, CubeCoord::axial(0, 0), SearchMode::Bfs)
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidEndpoint(off));
        assert_eq!(engine.phase(), SearchPhase::Idle);
    }

    #[test]
    fn start_rejects_walled_goal() {
        let mut b = board(0, 4, 0, 4);
        let goal = CubeCoord::axial(2, 2);
        b.set_wall(goal, true);
        let mut engine = SearchEngine::default();
        let err = engine
            .start(&mut b, CubeCoord::axial(0, 0), goal, SearchMode::AStar)
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidEndpoint(goal));
        assert_eq!(engine.phase(), SearchPhase::Idle);
        assert_eq!(engine.discovered_count(), 0);
    }

    #[test]
    fn starting_again_clears_the_previous_run() {
        let mut b = board(0, 4, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(2, 2);
        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();
        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);
        for coord in engine.reconstruct_path().unwrap() {
            b.mark_path(coord);
        }

        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();
        assert_eq!(engine.phase(), SearchPhase::Running);
        assert_eq!(engine.discovered_count(), 1, "only the origin is rediscovered");
        let marked: Vec<CubeCoord> = b
            .all_tiles()
            .filter(|(_, t)| t.visited || t.is_path)
            .map(|(c, _)| c)
            .collect();
        assert_eq!(marked, vec![origin], "stale marks must be wiped");
    }

    // ── breadth-first runs ─────────────────────────────────────────

    #[test]
    fn bfs_finds_a_shortest_route_across_open_ground() {
        let mut b = board(0, 4, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let goal = offset_to_cube(4, 4);
        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();

        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);
        let path = engine.reconstruct_path().unwrap();
        assert_eq!(path.first(), Some(&origin));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(path.len() as u32, origin.distance_to(goal) + 1);
        assert_contiguous(&b, &path);
        assert_eq!(engine.cost_at(goal), Some(origin.distance_to(goal)));
    }

    #[test]
    fn bfs_routes_around_walls() {
        let mut b = board(0, 1, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(4, 0);
        b.set_wall(CubeCoord::axial(2, 0), true);

        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();
        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);

        let path = engine.reconstruct_path().unwrap();
        assert!(!path.contains(&CubeCoord::axial(2, 0)));
        assert_eq!(path.len(), 6, "the detour through the lower row adds one hop");
        assert_contiguous(&b, &path);
        assert_eq!(engine.cost_at(goal), Some(5));
    }

    #[test]
    fn bfs_ignores_terrain_cost() {
        let mut b = board(0, 1, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(4, 0);
        b.set_terrain_cost(CubeCoord::axial(2, 0), 5);

        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();
        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);

        let path = engine.reconstruct_path().unwrap();
        assert_eq!(path.len(), 5, "hop count wins, the pricey tile is crossed anyway");
        assert!(path.contains(&CubeCoord::axial(2, 0)));
        assert_eq!(engine.cost_at(goal), Some(4));
    }

    #[test]
    fn visited_marks_appear_at_discovery_not_expansion() {
        let mut b = board(0, 4, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let mut engine = SearchEngine::default();
        engine
            .start(&mut b, origin, offset_to_cube(4, 4), SearchMode::Bfs)
            .unwrap();

        // One step pops the origin and queues its neighbors.
        assert_eq!(engine.step(&mut b), SearchPhase::Running);
        for neighbor in b.neighbors(origin).collect::<Vec<_>>() {
            assert!(
                b.get(neighbor).unwrap().visited,
                "queued neighbors must already carry the visited mark"
            );
        }
        assert_eq!(engine.frontier_coords().len(), engine.discovered_count() - 1);
    }

    // ── weighted runs ──────────────────────────────────────────────

    #[test]
    fn weighted_search_detours_around_expensive_ground() {
        let mut b = board(0, 1, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(4, 0);
        b.set_terrain_cost(CubeCoord::axial(2, 0), 5);

        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::AStar).unwrap();
        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);

        let path = engine.reconstruct_path().unwrap();
        assert!(!path.contains(&CubeCoord::axial(2, 0)), "the river tile is worth avoiding");
        assert_contiguous(&b, &path);
        assert_eq!(engine.cost_at(goal), cheapest_route_cost(&b, origin, goal));
    }

    #[test]
    fn weighted_search_improves_an_open_route_when_a_cheaper_one_appears() {
        // Diamond of tiles where the first route into (1, 1) costs 3 via the
        // expensive (1, 0) and is later relaxed to 2 via (0, 1).
        let mut b = board(0, 1, 0, 2);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(2, 0);
        b.set_terrain_cost(CubeCoord::axial(1, 0), 2);

        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::AStar).unwrap();
        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);

        assert_eq!(engine.cost_at(CubeCoord::axial(1, 1)), Some(2));
        assert_eq!(engine.cost_at(goal), cheapest_route_cost(&b, origin, goal));
    }

    #[test]
    fn equal_cost_ties_keep_the_first_discovered_route() {
        // Two cost-1 routes of equal length reach (1, 1); the insertion-order
        // tie break pops (1, 0) first, and the equal-cost rediscovery via
        // (0, 1) must not rewrite the predecessor link.
        let mut b = board(0, 1, 0, 1);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(1, 1);

        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::AStar).unwrap();
        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);

        let path = engine.reconstruct_path().unwrap();
        assert_eq!(
            path,
            vec![origin, CubeCoord::axial(1, 0), goal],
            "ties must resolve towards the earlier queue entry"
        );
    }

    #[test]
    fn repeated_runs_take_the_same_route() {
        for mode in [SearchMode::Bfs, SearchMode::AStar] {
            let mut b = board(0, 4, 0, 6);
            b.set_wall(CubeCoord::axial(2, 1), true);
            b.set_wall(CubeCoord::axial(1, 2), true);
            let origin = CubeCoord::axial(0, 0);
            let goal = offset_to_cube(4, 6);

            let mut engine = SearchEngine::default();
            engine.start(&mut b, origin, goal, mode).unwrap();
            assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);
            let first = engine.reconstruct_path().unwrap();

            engine.start(&mut b, origin, goal, mode).unwrap();
            assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);
            assert_eq!(engine.reconstruct_path().unwrap(), first);
        }
    }

    // ── termination ────────────────────────────────────────────────

    #[test]
    fn origin_equal_to_goal_is_found_in_one_step() {
        let mut b = board(0, 4, 0, 4);
        let spot = CubeCoord::axial(1, 1);
        let mut engine = SearchEngine::default();
        engine.start(&mut b, spot, spot, SearchMode::Bfs).unwrap();

        assert_eq!(engine.step(&mut b), SearchPhase::Found);
        assert_eq!(engine.reconstruct_path().unwrap(), vec![spot]);
    }

    #[test]
    fn sealed_goal_exhausts_the_frontier() {
        let mut b = board(0, 0, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(4, 0);
        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();

        // Legal at start time, walled while the run is underway.
        b.set_wall(goal, true);
        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Exhausted);
        assert!(engine.reconstruct_path().is_err());
    }

    #[test]
    fn wall_painted_on_a_queued_tile_is_honored_at_its_pop() {
        let mut b = board(0, 0, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(4, 0);
        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();

        // March the single-row flood until the goal sits in the queue.
        while !engine.frontier_coords().contains(&goal) {
            assert_eq!(engine.step(&mut b), SearchPhase::Running);
        }
        b.set_wall(goal, true);

        // Its pop is consumed by the wall check instead of reporting Found.
        assert_eq!(engine.step(&mut b), SearchPhase::Running);
        assert_eq!(engine.step(&mut b), SearchPhase::Exhausted);
    }

    #[test]
    fn a_superseded_heap_entry_burns_its_pop() {
        // (1, 1) enters the heap at cost 3 through the pricey (1, 0), then is
        // relaxed to 2 via (0, 1) while still queued. Sealing the goal forces
        // the run to drain past the stale duplicate: its pop is discarded
        // without expanding anything, and the seventh pop finds the frontier
        // empty.
        let mut b = board(0, 1, 0, 2);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(2, 0);
        b.set_terrain_cost(CubeCoord::axial(1, 0), 2);
        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::AStar).unwrap();

        b.set_wall(goal, true);
        for _ in 0..6 {
            assert_eq!(engine.step(&mut b), SearchPhase::Running);
        }
        assert_eq!(engine.discovered_count(), 5);
        assert_eq!(engine.cost_at(CubeCoord::axial(1, 1)), Some(2));
        assert_eq!(engine.step(&mut b), SearchPhase::Exhausted);
    }

    #[test]
    fn terminal_phases_are_sticky() {
        let mut b = board(0, 0, 0, 1);
        let origin = CubeCoord::axial(0, 0);
        let goal = CubeCoord::axial(1, 0);
        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();

        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Found);
        assert_eq!(engine.step(&mut b), SearchPhase::Found);
        assert_eq!(engine.step(&mut b), SearchPhase::Found);

        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();
        b.set_wall(goal, true);
        assert_eq!(run_until_settled(&mut engine, &mut b), SearchPhase::Exhausted);
        let discovered = engine.discovered_count();
        assert_eq!(engine.step(&mut b), SearchPhase::Exhausted);
        assert_eq!(engine.discovered_count(), discovered, "a settled run must not grow");
    }

    #[test]
    fn stepping_an_idle_engine_does_nothing() {
        let mut b = board(0, 4, 0, 4);
        let mut engine = SearchEngine::default();
        assert_eq!(engine.step(&mut b), SearchPhase::Idle);
        assert_eq!(engine.discovered_count(), 0);
        assert!(b.all_tiles().all(|(_, t)| !t.visited));
    }

    // ── stop + reconstruction ──────────────────────────────────────

    #[test]
    fn stop_discards_the_run() {
        let mut b = board(0, 4, 0, 4);
        let mut engine = SearchEngine::default();
        engine
            .start(
                &mut b,
                CubeCoord::axial(0, 0),
                CubeCoord::axial(2, 2),
                SearchMode::Bfs,
            )
            .unwrap();
        engine.step(&mut b);
        engine.step(&mut b);
        assert!(engine.discovered_count() > 1);

        engine.stop();
        assert_eq!(engine.phase(), SearchPhase::Idle);
        assert!(engine.frontier_coords().is_empty());
        assert_eq!(engine.discovered_count(), 0);
        assert_eq!(engine.reconstruct_path(), Err(SearchError::NoPathRecorded));
    }

    #[test]
    fn reconstruction_without_a_run_fails() {
        let engine = SearchEngine::default();
        assert_eq!(engine.reconstruct_path(), Err(SearchError::NoPathRecorded));
    }

    #[test]
    fn reconstruction_mid_run_fails_until_the_goal_is_linked() {
        let mut b = board(0, 4, 0, 4);
        let origin = CubeCoord::axial(0, 0);
        let goal = offset_to_cube(4, 4);
        let mut engine = SearchEngine::default();
        engine.start(&mut b, origin, goal, SearchMode::Bfs).unwrap();

        assert_eq!(
            engine.reconstruct_path(),
            Err(SearchError::NoPathRecorded),
            "the goal has no predecessor link yet"
        );
    }
}
