use crate::tower::{Challenge, Signature, Solution, Tower};
use crate::{seeded_hasher, HashMap};
use ahash::RandomState;
use anyhow::{anyhow, Result};
use log::{debug, trace};
use logging_timer::time;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::VecDeque;

#[derive(Serialize, Deserialize, Default)]
pub struct Hyperparameters {
    /// Abort once this many distinct states have been stored.
    #[serde(default)]
    pub max_states: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultMode {
    MoveCount,
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    MoveCount(u32),
    /// Every state from the initial tower to the restored one, inclusive.
    Path(Vec<Tower>),
}

impl SearchResult {
    pub fn move_count(&self) -> u32 {
        match self {
            SearchResult::MoveCount(count) => *count,
            SearchResult::Path(path) => path.len().saturating_sub(1) as u32,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub expanded: usize,
    pub generated: usize,
    pub visited: usize,
}

struct Node {
    tower: Tower,
    predecessor: Option<usize>,
}

/// Breadth-first search over tower states.
///
/// Discovered states live in an append-only arena; each node points at the
/// node it was reached from. The index maps canonical signatures to arena
/// slots, so a state is stored once no matter how its non-target rods are
/// ordered.
pub struct TowerSearch {
    nodes: Vec<Node>,
    index: HashMap<Signature, usize>,
    frontier: VecDeque<usize>,
    max_states: Option<usize>,
    stats: SearchStats,
}

impl Default for TowerSearch {
    fn default() -> Self {
        Self::with_hasher(RandomState::new())
    }
}

impl TowerSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hasher(hasher: RandomState) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::with_hasher(hasher),
            frontier: VecDeque::new(),
            max_states: None,
            stats: SearchStats::default(),
        }
    }

    pub fn with_max_states(mut self, max_states: Option<usize>) -> Self {
        self.max_states = max_states;
        self
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn tower(&self, id: usize) -> &Tower {
        &self.nodes[id].tower
    }

    pub fn is_visited(&self, tower: &Tower) -> bool {
        self.index.contains_key(&Signature::of(tower))
    }

    /// Stores `tower` unless an equivalent state is already known. Returns the
    /// new arena slot, or `None` when the earlier entry was kept.
    pub fn mark_visited(&mut self, tower: Tower, predecessor: Option<usize>) -> Option<usize> {
        let signature = Signature::of(&tower);
        if self.index.contains_key(&signature) {
            return None;
        }
        let id = self.nodes.len();
        self.nodes.push(Node { tower, predecessor });
        self.index.insert(signature, id);
        self.stats.visited += 1;
        Some(id)
    }

    /// Runs the search from `initial` and returns the arena slot of the first
    /// restored state found, or `None` once every reachable state is exhausted.
    pub fn run(&mut self, initial: Tower) -> Result<Option<usize>> {
        self.nodes.clear();
        self.index.clear();
        self.frontier.clear();
        self.stats = SearchStats::default();

        let restored = initial.is_restored();
        let root = self
            .mark_visited(initial, None)
            .ok_or_else(|| anyhow!("Search state was not reset"))?;
        if restored {
            return Ok(Some(root));
        }
        self.frontier.push_back(root);

        while let Some(current) = self.frontier.pop_front() {
            self.stats.expanded += 1;
            let tower = &self.nodes[current].tower;
            trace!("expanding {}", tower);
            let candidates: Vec<Tower> = tower.moves().map(|mv| tower.apply_move(mv)).collect();
            for next in candidates {
                self.stats.generated += 1;
                let restored = next.is_restored();
                let Some(id) = self.mark_visited(next, Some(current)) else {
                    continue;
                };
                if restored {
                    debug!("restored after {} moves ({:?})", self.nodes[id].tower.move_count, self.stats);
                    return Ok(Some(id));
                }
                if let Some(max_states) = self.max_states {
                    if self.nodes.len() > max_states {
                        return Err(anyhow!(
                            "Search stored more than {} states without restoring the tower",
                            max_states
                        ));
                    }
                }
                self.frontier.push_back(id);
            }
        }

        debug!("search space exhausted ({:?})", self.stats);
        Ok(None)
    }

    /// States from the root to `terminal`, in move order.
    pub fn reconstruct_path(&self, terminal: usize) -> Vec<Tower> {
        let mut path = Vec::new();
        let mut cursor = Some(terminal);
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            path.push(node.tower.clone());
            cursor = node.predecessor;
        }
        path.reverse();
        path
    }
}

/// Minimum number of moves that stacks every disc onto rod 1.
///
/// `disc_positions[i]` is the rod (1-based) that disc `i + 1` starts on.
/// Invalid input is an error; an unsolvable arrangement is `Ok(None)`.
#[time]
pub fn solve(
    disc_positions: &[usize],
    num_rods: usize,
    mode: ResultMode,
) -> Result<Option<SearchResult>> {
    let challenge = Challenge::new(disc_positions.to_vec(), num_rods)?;
    let mut search = TowerSearch::new();
    let Some(terminal) = search.run(challenge.initial_tower())? else {
        return Ok(None);
    };
    Ok(Some(match mode {
        ResultMode::MoveCount => SearchResult::MoveCount(search.tower(terminal).move_count),
        ResultMode::Path => SearchResult::Path(search.reconstruct_path(terminal)),
    }))
}

pub fn solve_challenge(
    challenge: &Challenge,
    save_solution: &dyn Fn(&Solution) -> Result<()>,
    hyperparameters: &Option<Map<String, Value>>,
) -> Result<()> {
    let hyperparameters = match hyperparameters {
        Some(hyperparameters) => {
            serde_json::from_value::<Hyperparameters>(Value::Object(hyperparameters.clone()))
                .map_err(|e| anyhow!("Failed to parse hyperparameters: {}", e))?
        }
        None => Hyperparameters::default(),
    };

    let mut search = TowerSearch::with_hasher(seeded_hasher(&challenge.seed))
        .with_max_states(hyperparameters.max_states);
    match search.run(challenge.initial_tower())? {
        Some(terminal) => {
            let path = search.reconstruct_path(terminal);
            save_solution(&Solution::from_path(&path)?)
        }
        None => {
            debug!("no solution for {:?}", challenge.disc_positions);
            Ok(())
        }
    }
}
