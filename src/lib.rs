pub mod card;
pub mod cli;
pub mod config;
pub mod game;
pub mod progress;
pub mod rng;
pub mod search;
pub mod simulation;

#[cfg(test)]
mod integration_tests;
