use crate::{error::AllocationError, gym::Pos};

/// A dense table of action values over a 2D grid of states
///
/// Values are stored contiguously, indexed by `(x, y, action)`, and start at `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    width: usize,
    height: usize,
    actions: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Allocate a zeroed table for a `width` x `height` grid with `actions` actions per cell
    pub fn new(width: usize, height: usize, actions: usize) -> Result<Self, AllocationError> {
        let err = || AllocationError {
            width,
            height,
            depth: actions,
        };
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(actions))
            .ok_or_else(err)?;

        let mut values = Vec::new();
        values.try_reserve_exact(len).map_err(|_| err())?;
        values.resize(len, 0.0);

        Ok(Self {
            width,
            height,
            actions,
            values,
        })
    }

    pub fn get(&self, pos: Pos, action: usize) -> f64 {
        self.values[self.offset(pos) + self.check_action(action)]
    }

    pub fn set(&mut self, pos: Pos, action: usize, value: f64) {
        let i = self.offset(pos) + self.check_action(action);
        self.values[i] = value;
    }

    /// All action values of a state
    pub fn values(&self, pos: Pos) -> &[f64] {
        let start = self.offset(pos);
        &self.values[start..start + self.actions]
    }

    /// Highest action value of a state
    pub fn best_value(&self, pos: Pos) -> f64 {
        self.values(pos)[self.best_action(pos)]
    }

    /// Index of the highest valued action of a state
    ///
    /// Ties go to the lowest index.
    pub fn best_action(&self, pos: Pos) -> usize {
        argmax(self.values(pos))
    }

    fn offset(&self, pos: Pos) -> usize {
        let (x, y) = pos;
        assert!(
            x < self.width && y < self.height,
            "position {pos:?} is outside the {}x{} table",
            self.width,
            self.height
        );
        (y * self.width + x) * self.actions
    }

    fn check_action(&self, action: usize) -> usize {
        assert!(
            action < self.actions,
            "action {action} is out of range for {} actions",
            self.actions
        );
        action
    }
}

/// Index of the first maximum in a slice
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let table = QTable::new(3, 2, 4).unwrap();
        for x in 0..3 {
            for y in 0..2 {
                assert_eq!(table.values((x, y)), &[0.0; 4]);
            }
        }
    }

    #[test]
    fn get_set_is_isolated() {
        let mut table = QTable::new(3, 2, 4).unwrap();
        table.set((2, 1), 3, -4.5);
        assert_eq!(table.get((2, 1), 3), -4.5);

        let touched = table.values.iter().filter(|&&v| v != 0.0).count();
        assert_eq!(touched, 1, "only one entry changed");
        assert_eq!(table.get((1, 1), 3), 0.0);
        assert_eq!(table.get((2, 0), 3), 0.0);
    }

    #[test]
    fn best_action_ties_go_to_lowest_index() {
        let mut table = QTable::new(1, 1, 4).unwrap();
        assert_eq!(table.best_action((0, 0)), 0);

        table.set((0, 0), 1, 2.0);
        table.set((0, 0), 3, 2.0);
        assert_eq!(table.best_action((0, 0)), 1);
        assert_eq!(table.best_value((0, 0)), 2.0);

        table.set((0, 0), 3, 2.5);
        assert_eq!(table.best_action((0, 0)), 3);
    }

    #[test]
    fn best_value_of_negative_values() {
        let mut table = QTable::new(1, 1, 4).unwrap();
        for a in 0..4 {
            table.set((0, 0), a, -(a as f64) - 1.0);
        }
        assert_eq!(table.best_action((0, 0)), 0);
        assert_eq!(table.best_value((0, 0)), -1.0);
    }

    #[test]
    fn oversized_table_fails() {
        let err = QTable::new(usize::MAX, 2, 4).unwrap_err();
        assert_eq!(err.width, usize::MAX);
        assert!(QTable::new(usize::MAX / 8, 1, 4).is_err());
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_position() {
        let table = QTable::new(2, 2, 4).unwrap();
        table.get((2, 0), 0);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_action() {
        let table = QTable::new(2, 2, 4).unwrap();
        table.get((0, 0), 4);
    }
}
