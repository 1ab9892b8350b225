use std::path::Path;

use strum::{EnumIter, FromRepr, VariantArray};

use super::map::{CellKind, Grid, Pos};
use crate::error::MapError;

/// A move of the agent by one cell
#[derive(EnumIter, VariantArray, FromRepr, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(usize)]
pub enum Action {
    Up = 0,
    Down = 1,
    Right = 2,
    Left = 3,
}

impl Action {
    pub const COUNT: usize = Self::VARIANTS.len();

    /// Index of this action in a row of Q-values
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// A grid map the agent walks across until it stands on the objective
///
/// Keeps the map as loaded alongside a working copy for the current episode, so that
/// bonuses collected during an episode come back after [`reset`](Self::reset).
#[derive(Clone, Debug)]
pub struct GridWorld {
    original: Grid,
    working: Grid,
    pos: Pos,
}

impl GridWorld {
    pub fn new(grid: Grid) -> Self {
        if grid.count(CellKind::Objective) == 0 {
            log::warn!("map has no objective cell, episodes can only end at the step limit");
        }
        Self {
            pos: grid.origin(),
            working: grid.clone(),
            original: grid,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        Grid::load(path).map(Self::new)
    }

    pub fn width(&self) -> usize {
        self.original.width()
    }

    pub fn height(&self) -> usize {
        self.original.height()
    }

    pub fn origin(&self) -> Pos {
        self.original.origin()
    }

    /// Current agent position
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// The map as it stands in the current episode
    pub fn grid(&self) -> &Grid {
        &self.working
    }

    /// The map as loaded
    pub fn original(&self) -> &Grid {
        &self.original
    }

    /// An episode is active until the agent stands on the objective
    pub fn is_active(&self) -> bool {
        self.working[self.pos] != CellKind::Objective
    }

    /// Move the agent, consuming a bonus it lands on
    ///
    /// Moving into the map border leaves the agent in place, which still counts as a step
    /// and pays the reward of the cell it stays on.
    ///
    /// **Returns** `(next_state, reward)` where `next_state` is `None` once the objective is reached
    pub fn step(&mut self, action: Action) -> (Option<Pos>, i64) {
        let (x, y) = self.pos;
        self.pos = match action {
            Action::Up => (x, y.saturating_sub(1)),
            Action::Down => (x, (y + 1).min(self.height() - 1)),
            Action::Right => ((x + 1).min(self.width() - 1), y),
            Action::Left => (x.saturating_sub(1), y),
        };

        let kind = self.working[self.pos];
        let reward = kind.reward();
        match kind {
            CellKind::Objective => return (None, reward),
            CellKind::Bonus => self.working.consume_bonus(self.pos),
            _ => {}
        }

        (Some(self.pos), reward)
    }

    /// Restore the map and put the agent back at the start
    ///
    /// **Returns** the start position
    pub fn reset(&mut self) -> Pos {
        self.working.reset_from(&self.original);
        self.pos = self.original.origin();
        self.pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(map: &str) -> GridWorld {
        GridWorld::new(map.parse().unwrap())
    }

    #[test]
    fn actions() {
        let mut env = world("0,0,0\n0,4,0\n0,0,2");
        env.reset();

        env.step(Action::Up);
        assert_eq!(env.pos(), (1, 0), "Up action works");
        env.step(Action::Left);
        assert_eq!(env.pos(), (0, 0), "Left action works");
        env.step(Action::Down);
        assert_eq!(env.pos(), (0, 1), "Down action works");
        env.step(Action::Right);
        assert_eq!(env.pos(), (1, 1), "Right action works");
    }

    #[test]
    fn border_is_a_wall() {
        let mut env = world("3,0\n4,2");
        assert_eq!(env.reset(), (0, 1));

        assert_eq!(env.step(Action::Left), (Some((0, 1)), 0));
        assert_eq!(env.step(Action::Down), (Some((0, 1)), 0));

        // bonus already collected, so bumping the top edge from it pays nothing
        assert_eq!(env.step(Action::Up), (Some((0, 0)), 1));
        assert_eq!(env.step(Action::Up), (Some((0, 0)), 0));
    }

    #[test]
    fn border_pays_current_cell() {
        let mut env = world("1,2");
        env.reset();
        assert_eq!(env.step(Action::Up), (Some((0, 0)), -100));
        assert_eq!(env.step(Action::Left), (Some((0, 0)), -100));
    }

    #[test]
    fn bonus_consumed_until_reset() {
        let mut env = world("4,3,2");
        env.reset();

        assert_eq!(env.step(Action::Right), (Some((1, 0)), 1));
        assert_eq!(env.grid()[(1, 0)], CellKind::Empty);
        env.step(Action::Left);
        assert_eq!(env.step(Action::Right), (Some((1, 0)), 0), "bonus only pays once");

        env.reset();
        assert_eq!(env.grid()[(1, 0)], CellKind::Bonus);
        assert_eq!(env.grid(), env.original());
    }

    #[test]
    fn objective_ends_episode() {
        let mut env = world("4,2");
        env.reset();
        assert!(env.is_active());
        assert_eq!(env.step(Action::Right), (None, 100));
        assert!(!env.is_active());
    }

    #[test]
    fn action_indices() {
        assert_eq!(Action::COUNT, 4);
        for (i, &action) in Action::VARIANTS.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_repr(i), Some(action));
        }
    }
}
