// lib.rs - Game of Life core: grid model, evolution engine, patterns, scheduler

pub mod config;
pub mod engine;
pub mod game;
pub mod grid;
pub mod patterns;
pub mod scheduler;

pub use engine::{NEIGHBOR_OFFSETS, StepOutcome, step};
pub use game::GameOfLife;
pub use grid::Grid;
pub use patterns::{PATTERNS, Pattern};
pub use scheduler::TickScheduler;
