//! Conway's Game of Life in the terminal

pub mod config;
pub mod grid;
pub mod input;
pub mod life;
pub mod settings;
pub mod terminal;
