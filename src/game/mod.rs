// Board search engine and round bookkeeping

pub mod board;
pub mod registry;
pub mod round;
pub mod scorer;
pub mod tracer;

pub use board::Board;
pub use round::Round;
