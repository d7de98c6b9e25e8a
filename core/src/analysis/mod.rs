pub use board::*;

mod board;
