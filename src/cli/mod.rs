//! CLI infrastructure for the Q-learning tic-tac-toe toolkit
//!
//! This module provides the command-line interface for training agents,
//! playing against them, and inspecting or exporting what they learned.

pub mod commands;
pub mod config;
pub mod output;
