//! Conway's B3/S23 rule tables

/// Game of Life rules engine
pub struct LifeRules;

impl LifeRules {
    /// Neighbour counts that keep a live cell alive
    pub const SURVIVAL_COUNTS: [u8; 2] = [2, 3];

    /// Neighbour counts that bring a dead cell to life
    pub const BIRTH_COUNTS: [u8; 1] = [3];

    /// Size of the Moore neighbourhood
    pub const MAX_NEIGHBOUR_COUNT: u8 = 8;

    pub fn survives(neighbour_count: u8) -> bool {
        Self::SURVIVAL_COUNTS.contains(&neighbour_count)
    }

    pub fn is_born(neighbour_count: u8) -> bool {
        Self::BIRTH_COUNTS.contains(&neighbour_count)
    }

    /// Check if a cell should be alive in the next generation given its current state and neighbour count
    pub fn should_be_alive(current_state: bool, neighbour_count: u8) -> bool {
        if current_state {
            Self::survives(neighbour_count)
        } else {
            Self::is_born(neighbour_count)
        }
    }

    pub fn is_valid_neighbour_count(count: u8) -> bool {
        count <= Self::MAX_NEIGHBOUR_COUNT
    }
}
