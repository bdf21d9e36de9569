//! CLI infrastructure for the symtree driver
//!
//! This module provides the command-line interface for expanding, auditing,
//! comparing and exporting the symmetry-reduced game tree.

pub mod commands;
pub mod config;
pub mod output;
