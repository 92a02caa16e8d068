pub mod game;
pub mod lineup;
pub mod loose;
pub mod matchup;
pub mod player;
pub mod stats;
pub mod team;
pub mod week;
