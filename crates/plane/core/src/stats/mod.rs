//! Stat vector shared by every part.
//!
//! Parts never read each other's stats. Each part derives its own [`Stats`]
//! from its state and catalogs, and the host sums the vectors into an aircraft
//! total. Reliability is the one axis that is not simply summed: parts compute
//! it locally and report it through their own accessors.

pub mod vector;

pub use vector::{AXIS_COUNT, EraNote, Stats};
