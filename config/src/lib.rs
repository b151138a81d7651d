//! # Config Crate
//!
//! Centralized configuration constants for the pixel-to-mesh pipeline.
//! Coordinate precision, default print dimensions and safety limits are
//! defined here so every crate agrees on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{round_to_precision, COORDINATE_PRECISION, DEFAULT_CELL_SIZE_MM};
//!
//! // Vertex coordinates are rounded before they are used as dedup keys
//! let x = round_to_precision(0.1 + 0.2);
//! assert_eq!(x, 0.3);
//! assert_eq!(COORDINATE_PRECISION, 3);
//! assert!(DEFAULT_CELL_SIZE_MM > 0.0);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Deterministic**: Rounding rules are fixed so identical input gives identical meshes
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
