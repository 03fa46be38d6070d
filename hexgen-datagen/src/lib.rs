//! HEXGEN Datagen - Training data from self-play games
//!
//! This crate turns the core engine into datasets:
//! - Seeded game runner
//! - Sequential or parallel batch generation with aggregate statistics
//! - CSV serialization, one file per board size
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 2: generate_batch (phases)
//! - Level 3: play_seeded_game (steps)
//! - Level 4: configuration, CSV formatting

mod batch;
mod config;
pub mod csv;
mod game_runner;

pub use batch::{generate_batch, generate_batch_with_progress, BatchResult, BatchSummary};
pub use config::{DatasetConfig, GenerationConfig, DEFAULT_BOARD_SIZES, DEFAULT_GAMES, DEFAULT_SEED};
pub use csv::{dataset_filename, write_dataset};
pub use game_runner::{play_seeded_game, GameOutcome, GameRunner};
