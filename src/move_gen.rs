pub mod attacks;
pub mod generation;

pub use generation::{generate_all_legal_moves, generate_legal_moves_from, generate_pseudo_legal_moves, is_legal};
