//! Step definitions for platform record scenarios.

mod given;
mod then;
mod when;
pub mod world;
