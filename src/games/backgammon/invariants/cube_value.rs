//! Cube value invariant.

use super::super::Position;
use super::Invariant;

/// Invariant: the cube shows a power of two, or 0 before a match starts.
pub struct CubeValueInvariant;

impl Invariant<Position> for CubeValueInvariant {
    fn holds(position: &Position) -> bool {
        let cube = position.cube();
        cube == 0 || cube.is_power_of_two()
    }

    fn description() -> &'static str {
        "Cube value is a power of two"
    }
}
