//! Error Types
//!
//! This module defines the error types used throughout the scene graph.
//!
//! # Overview
//!
//! The main error type [`SceneError`] covers two families of failures:
//! - Contract violations: duplicate keys, missing children, wrong child types,
//!   popping the last scene. These indicate a bug in the calling code.
//! - Resource failures: fonts that cannot be opened, images that cannot be
//!   decoded, renderers without alpha modulation.
//!
//! Nothing inside the crate catches these. Every fallible operation returns
//! [`Result<T>`] and the host decides what to do with the failure.
//!
//! ```rust,ignore
//! use scenery::errors::Result;
//!
//! fn build(button: &mut Button) -> Result<()> {
//!     button.node_mut().add_child("icon", Image::new(area, "icon.png"))?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

use crate::entity::ChildKey;

/// The main error type for the scene graph.
#[derive(Error, Debug)]
pub enum SceneError {
    // ========================================================================
    // Tree Contract Violations
    // ========================================================================
    /// A child with this key is already attached to the parent.
    #[error("Duplicate child key: {0}")]
    DuplicateKey(ChildKey),

    /// No child is attached under this key.
    #[error("No such child: {0}")]
    NoSuchChild(ChildKey),

    /// A child exists under the key but is not of the requested type.
    #[error("Child {key} is not a {expected}")]
    WrongChildType {
        /// Key of the child that was looked up
        key: ChildKey,
        /// Type name that was requested
        expected: &'static str,
    },

    /// The requested text alignment cannot be laid out.
    #[error("Unsupported text alignment: {0}")]
    UnsupportedAlignment(String),

    // ========================================================================
    // Scene Stack Violations
    // ========================================================================
    /// An operation needed an active scene but the stack is empty.
    #[error("No active scene")]
    NoActiveScene,

    /// Popping would leave the manager without any scene.
    #[error("Cannot pop the last remaining scene")]
    LastScene,

    // ========================================================================
    // Resource Failures
    // ========================================================================
    /// The font file could not be opened or parsed.
    #[error("Invalid font '{path}': {reason}")]
    InvalidFont {
        /// Font path as given by the entity
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The image file could not be loaded into a texture.
    #[error("Texture '{path}' was not loaded: {reason}")]
    TextureLoad {
        /// Image path as given by the entity
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The active renderer cannot modulate texture alpha.
    #[error("The renderer does not support alpha modulation")]
    AlphaModUnsupported,

    /// The texture handle does not belong to the renderer.
    #[error("Unknown texture handle")]
    UnknownTexture,
}

/// Alias for `Result<T, SceneError>`.
pub type Result<T> = std::result::Result<T, SceneError>;
