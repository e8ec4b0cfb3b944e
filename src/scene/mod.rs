//! Scenes and the scene stack
//!
//! - [`Scene`]: ordered root entities with tree-wide event dispatch
//! - [`SceneManager`]: scene stack plus the window/render/event loop
//! - [`Commands`]: structural changes deferred to the end of a frame

pub mod commands;
pub mod manager;
#[allow(clippy::module_inception)]
pub mod scene;

pub use commands::{Command, Commands};
pub use manager::SceneManager;
pub use scene::{Scene, UpdateHandler};
