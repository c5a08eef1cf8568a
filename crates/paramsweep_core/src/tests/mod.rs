//! Scenario tests for the sweep structures
//!
//! Tests are organized by topic:
//! - `sizes` - Size laws and enumeration counts of factors and builders
//! - `cursors` - Cursor arithmetic, end-cursor equality and printing
//! - `mapping` - Linear offset round trips and parameter recovery
//! - `randomness` - Random order permutations and seeded generators
//! - `scenarios` - End-to-end sweeps mixing every factor kind

mod cursors;
