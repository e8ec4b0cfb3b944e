//! Utility Module
//!
//! - [`FpsCounter`]: Frame rate measurement utility

pub mod fps_counter;

pub use fps_counter::FpsCounter;
