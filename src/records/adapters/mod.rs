//! Adapter implementations for record repository ports.

pub mod memory;
pub mod postgres;
