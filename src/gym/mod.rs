pub mod grid_world;
pub mod map;

pub use grid_world::{Action, GridWorld};
pub use map::{CellKind, Grid, Pos};
