pub mod game;

pub use game::{
    // Menu choices
    BoardSize, CubeSetup, NextStep,
    // Board and players
    Player, Position,
    // Round results
    RoundSummary, WordRecord,
};
