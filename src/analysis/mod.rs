//! Manifest analysis core.
//!
//! Pure, synchronous transforms over an in-memory passenger table: age
//! banding, class-relative median classification, last-name extraction,
//! and the grouped aggregation views. Nothing here performs I/O or mutates
//! its input; every function takes the table as an explicit argument and
//! returns a new tidy result.

pub mod aggregate;
pub mod bands;
pub mod median;
pub mod names;
pub mod types;
pub mod utility;
