//! Tile coordinates and adjacency geometry

use crate::MapId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tile position on a specific map
///
/// Public actions (extinguish) require the caller to supply the full
/// location of the target, which the gate verifies against the stored row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// The map this tile belongs to
    pub map: MapId,
    /// Tile column
    pub x: i32,
    /// Tile row
    pub y: i32,
}

impl Location {
    /// Create a new location
    pub fn new(map: MapId, x: i32, y: i32) -> Self {
        Self { map, x, y }
    }

    /// Iterate the square ring of tiles within Chebyshev distance `radius`
    ///
    /// The center tile itself is excluded; radius 1 yields the 8 surrounding
    /// tiles. A radius of 0 is treated as 1.
    pub fn neighbors(&self, radius: u8) -> impl Iterator<Item = Location> {
        let r = i32::from(radius.max(1));
        let center = *self;
        (-r..=r).flat_map(move |dy| {
            (-r..=r).filter_map(move |dx| {
                (dx != 0 || dy != 0).then_some(Location {
                    map: center.map,
                    x: center.x + dx,
                    y: center.y + dy,
                })
            })
        })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({},{})", self.map, self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors_radius_one() {
        let loc = Location::new(MapId::new(1), 5, 5);
        let neighbors: Vec<Location> = loc.neighbors(1).collect();

        assert_eq!(neighbors.len(), 8);
        assert!(!neighbors.contains(&loc));
        assert!(neighbors.contains(&Location::new(MapId::new(1), 4, 4)));
        assert!(neighbors.contains(&Location::new(MapId::new(1), 6, 6)));
        assert!(neighbors.contains(&Location::new(MapId::new(1), 5, 4)));
    }

    #[test]
    fn test_neighbors_radius_two() {
        let loc = Location::new(MapId::new(1), 0, 0);
        // 5x5 square minus the center
        assert_eq!(loc.neighbors(2).count(), 24);
    }

    #[test]
    fn test_neighbors_radius_zero_treated_as_one() {
        let loc = Location::new(MapId::new(1), 3, 3);
        assert_eq!(loc.neighbors(0).count(), 8);
    }

    #[test]
    fn test_neighbors_stay_on_map() {
        let loc = Location::new(MapId::new(9), -2, 7);
        assert!(loc.neighbors(1).all(|n| n.map == MapId::new(9)));
    }
}
