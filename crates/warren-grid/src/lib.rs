//! Grid primitives shared by every Warren simulator.
//!
//! A [`Point`] is an integer cell coordinate with the origin at the
//! top-left corner (x right-increasing, y down-increasing). A [`Grid`]
//! is an axis-aligned playfield with bounds checks and a deterministic
//! row-major cell enumeration. A [`Frame`] is the width×height×3 colour
//! grid every simulator renders its `screenshot` into.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod frame;
pub mod grid;
pub mod point;

pub use frame::{Frame, Rgb, BLACK};
pub use grid::Grid;
pub use point::Point;
