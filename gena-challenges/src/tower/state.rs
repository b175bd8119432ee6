use serde::{Deserialize, Serialize};
use std::fmt;

pub type Disc = u32;

/// Moves the top disc of rod `from` onto rod `to`. Rods are numbered from 1.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}

impl Move {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

/// A snapshot of the puzzle: which discs sit on which rod, and how many moves
/// it took to get here.
///
/// Each rod is stored bottom to top, so the movable disc is the last element.
/// Reading a rod top to bottom always gives strictly increasing disc numbers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Tower {
    pub move_count: u32,
    rods: Vec<Vec<Disc>>,
}

impl Tower {
    /// Places disc `i + 1` on rod `disc_positions[i]`. Discs sharing a rod are
    /// stacked with the smallest on top.
    ///
    /// Panics if a position is outside `1..=num_rods`; callers validate
    /// through [`crate::tower::Challenge`] first.
    pub fn from_assignment(disc_positions: &[usize], num_rods: usize) -> Self {
        let mut rods = vec![Vec::new(); num_rods];
        for (idx, &rod) in disc_positions.iter().enumerate().rev() {
            rods[rod - 1].push(idx as Disc + 1);
        }
        let tower = Self {
            move_count: 0,
            rods,
        };
        tower.check_invariants();
        tower
    }

    /// Builds a tower from rods listed top to bottom, e.g. `vec![vec![1, 3], vec![2]]`.
    pub fn from_rods(rods: Vec<Vec<Disc>>) -> Self {
        let tower = Self {
            move_count: 0,
            rods: rods
                .into_iter()
                .map(|rod| rod.into_iter().rev().collect())
                .collect(),
        };
        tower.check_invariants();
        tower
    }

    pub fn num_rods(&self) -> usize {
        self.rods.len()
    }

    pub fn num_discs(&self) -> usize {
        self.rods.iter().map(Vec::len).sum()
    }

    /// Discs on `rod`, bottom to top.
    pub fn rod(&self, rod: usize) -> &[Disc] {
        &self.rods[rod - 1]
    }

    pub fn rods(&self) -> &[Vec<Disc>] {
        &self.rods
    }

    pub fn top(&self, rod: usize) -> Option<Disc> {
        self.rods.get(rod.wrapping_sub(1))?.last().copied()
    }

    /// True once rod 1 holds every disc.
    pub fn is_restored(&self) -> bool {
        self.rods[0].len() == self.num_discs()
    }

    /// Independent copy with the move counter cleared.
    pub fn detached(&self) -> Self {
        Self {
            move_count: 0,
            rods: self.rods.clone(),
        }
    }

    pub fn is_legal_move(&self, mv: Move) -> bool {
        if mv.from == mv.to || mv.to == 0 || mv.to > self.num_rods() {
            return false;
        }
        match (self.top(mv.from), self.top(mv.to)) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(moving), Some(target)) => target > moving,
        }
    }

    /// Returns the state after `mv`. Legality is the caller's responsibility.
    pub fn apply_move(&self, mv: Move) -> Self {
        debug_assert!(self.is_legal_move(mv), "illegal move {} on {}", mv, self);
        let mut next = self.detached();
        if let Some(disc) = next.rods[mv.from - 1].pop() {
            next.rods[mv.to - 1].push(disc);
        }
        next.move_count = self.move_count + 1;
        next
    }

    /// Legal moves ordered by source rod, then destination rod.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        let num_rods = self.num_rods();
        (1..=num_rods)
            .filter(move |&from| !self.rods[from - 1].is_empty())
            .flat_map(move |from| (1..=num_rods).map(move |to| Move::new(from, to)))
            .filter(move |&mv| self.is_legal_move(mv))
    }

    /// The single legal move that turns `self` into `next`, if there is one.
    pub fn move_between(&self, next: &Tower) -> Option<Move> {
        self.moves()
            .find(|&mv| self.apply_move(mv).rods == next.rods)
    }

    /// Reorders rods 2..=n so that position `k + 2` receives rod `order[k]`.
    /// Rod 1 never moves.
    pub fn permuted(&self, order: &[usize]) -> Self {
        assert_eq!(
            order.len() + 1,
            self.num_rods(),
            "permutation must cover every non-target rod"
        );
        let mut rods = Vec::with_capacity(self.num_rods());
        rods.push(self.rods[0].clone());
        rods.extend(order.iter().map(|&rod| self.rods[rod - 1].clone()));
        let tower = Self {
            move_count: self.move_count,
            rods,
        };
        tower.check_invariants();
        tower
    }

    fn check_invariants(&self) {
        let num_discs = self.num_discs();
        let mut seen = vec![false; num_discs];
        for rod in &self.rods {
            assert!(
                rod.windows(2).all(|w| w[0] > w[1]),
                "rod {:?} has a larger disc above a smaller one",
                rod
            );
            for &disc in rod {
                let slot = (disc as usize)
                    .checked_sub(1)
                    .and_then(|idx| seen.get_mut(idx));
                match slot {
                    Some(slot) if !*slot => *slot = true,
                    _ => panic!("disc {} is out of range or duplicated", disc),
                }
            }
        }
    }
}

impl fmt::Display for Tower {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:", self.move_count)?;
        for rod in &self.rods {
            let discs: Vec<String> = rod.iter().rev().map(|d| d.to_string()).collect();
            write!(f, " [{}]", discs.join(" "))?;
        }
        Ok(())
    }
}
