//! Multi-rod tower rearrangement.
//!
//! Discs start scattered over `num_rods` rods and must end up stacked on
//! rod 1, one move at a time, never placing a disc above a smaller one.

pub mod baselines;
mod signature;
mod state;

pub use baselines::bfs::{solve, ResultMode, SearchResult, SearchStats, TowerSearch};
pub use signature::*;
pub use state::*;

use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, fmt, str::FromStr};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Track {
    pub num_discs: usize,
    pub num_rods: usize,
}

impl FromStr for Track {
    type Err = anyhow::Error;

    /// Parses `num_discs=<n>,num_rods=<m>` (keys in any order).
    fn from_str(s: &str) -> Result<Self> {
        let mut num_discs = None;
        let mut num_rods = None;
        for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("Expected key=value, got '{}'", pair))?;
            let value: usize = value
                .trim()
                .parse()
                .map_err(|e| anyhow!("Invalid value for '{}': {}", key, e))?;
            match key.trim() {
                "num_discs" => num_discs = Some(value),
                "num_rods" => num_rods = Some(value),
                other => return Err(anyhow!("Unknown track key '{}'", other)),
            }
        }
        Ok(Self {
            num_discs: num_discs.ok_or_else(|| anyhow!("Missing num_discs"))?,
            num_rods: num_rods.ok_or_else(|| anyhow!("Missing num_rods"))?,
        })
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "num_discs={},num_rods={}", self.num_discs, self.num_rods)
    }
}

impl TryFrom<Vec<i32>> for Track {
    type Error = anyhow::Error;

    fn try_from(arr: Vec<i32>) -> Result<Self> {
        match arr.as_slice() {
            &[num_discs, num_rods] if num_discs >= 0 && num_rods >= 0 => Ok(Self {
                num_discs: num_discs as usize,
                num_rods: num_rods as usize,
            }),
            _ => Err(anyhow!("Expected [num_discs, num_rods], got {:?}", arr)),
        }
    }
}

impl Into<Vec<i32>> for Track {
    fn into(self) -> Vec<i32> {
        vec![self.num_discs as i32, self.num_rods as i32]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub moves: Vec<Move>,
}

impl Solution {
    pub fn new() -> Self {
        Self { moves: Vec::new() }
    }

    /// Recovers the moves between consecutive states of a search path.
    pub fn from_path(path: &[Tower]) -> Result<Self> {
        let moves = path
            .windows(2)
            .enumerate()
            .map(|(i, w)| {
                w[0].move_between(&w[1])
                    .ok_or_else(|| anyhow!("States {} and {} are not one move apart", i, i + 1))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { moves })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Challenge {
    pub seed: [u8; 32],
    pub num_rods: usize,
    /// `disc_positions[i]` is the rod (1-based) holding disc `i + 1`.
    pub disc_positions: Vec<usize>,
}

impl Challenge {
    pub fn new(disc_positions: Vec<usize>, num_rods: usize) -> Result<Self> {
        let challenge = Self {
            seed: [0; 32],
            num_rods,
            disc_positions,
        };
        challenge.validate()?;
        Ok(challenge)
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        if track.num_discs == 0 {
            return Err(anyhow!("num_discs must be at least 1"));
        }
        if track.num_rods < 3 {
            return Err(anyhow!("num_rods must be at least 3"));
        }
        let mut rng = SmallRng::from_seed(seed.clone());
        let disc_positions = (0..track.num_discs)
            .map(|_| rng.gen_range(1..=track.num_rods))
            .collect();
        Ok(Self {
            seed: seed.clone(),
            num_rods: track.num_rods,
            disc_positions,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_rods == 0 {
            return Err(anyhow!("num_rods must be at least 1"));
        }
        if self.disc_positions.is_empty() {
            return Err(anyhow!("Disc assignment is empty"));
        }
        if let Some((idx, &rod)) = self
            .disc_positions
            .iter()
            .enumerate()
            .find(|&(_, &rod)| rod == 0 || rod > self.num_rods)
        {
            return Err(anyhow!(
                "Disc {} is on rod {}, expected a rod in 1..={}",
                idx + 1,
                rod,
                self.num_rods
            ));
        }
        Ok(())
    }

    pub fn num_discs(&self) -> usize {
        self.disc_positions.len()
    }

    pub fn initial_tower(&self) -> Tower {
        Tower::from_assignment(&self.disc_positions, self.num_rods)
    }

    /// Replays `solution` from the initial tower and returns the final state.
    pub fn apply_solution(&self, solution: &Solution) -> Result<Tower> {
        let mut tower = self.initial_tower();
        for (i, &mv) in solution.moves.iter().enumerate() {
            if !tower.is_legal_move(mv) {
                return Err(anyhow!("Move {} ({}) is illegal on {}", i, mv, tower));
            }
            tower = tower.apply_move(mv);
        }
        Ok(tower)
    }

    conditional_pub!(
        fn compute_baseline(&self) -> Result<Solution> {
            let solution = RefCell::new(None);
            let save_solution_fn = |s: &Solution| -> Result<()> {
                *solution.borrow_mut() = Some(s.clone());
                Ok(())
            };
            baselines::bfs::solve_challenge(self, &save_solution_fn, &None)?;
            solution
                .into_inner()
                .ok_or_else(|| anyhow!("No arrangement of moves restores this tower"))
        }
    );

    conditional_pub!(
        fn verify_solution(&self, solution: &Solution) -> Result<()> {
            self.validate()?;
            let tower = self.apply_solution(solution)?;
            if !tower.is_restored() {
                return Err(anyhow!(
                    "Rod 1 holds {} of {} discs after {} moves",
                    tower.rod(1).len(),
                    self.num_discs(),
                    solution.moves.len()
                ));
            }
            let baseline = self.compute_baseline()?;
            if solution.moves.len() > baseline.moves.len() {
                Err(anyhow!(
                    "Number of moves ({}) is greater than optimal ({})",
                    solution.moves.len(),
                    baseline.moves.len()
                ))
            } else {
                Ok(())
            }
        }
    );
}
