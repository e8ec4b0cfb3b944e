//! Retained-mode 2D scene graph.
//!
//! A host builds [`Scene`]s out of [`Entity`] trees (rectangles, circles,
//! text, images, buttons), pushes them onto a [`SceneManager`], and hands the
//! manager a [`Platform`] and a [`Renderer`]. The manager then runs the frame
//! loop: input is dispatched into the active scene, the tree is updated and
//! drawn, and deferred [`Commands`] are applied.
//!
//! ```rust,ignore
//! use scenery::prelude::*;
//!
//! let mut scene = Scene::new();
//! let mut button = Button::new(
//!     Rect::new(0.5, 0.5, 0.2, 0.1),
//!     Color::SILVER,
//!     TextAlignment::Center,
//!     "Quit",
//!     "fonts/DejaVuSans.ttf",
//!     24,
//! );
//! button.click_behavior_mut().add_handler(|_, commands| commands.quit());
//! scene.add_entity(button)?;
//!
//! let mut manager = SceneManager::new(Settings::default());
//! manager.push_scene(scene)?;
//! manager.render(&mut platform, &mut canvas)?;
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod assets;
pub mod color;
pub mod entity;
pub mod errors;
pub mod geometry;
pub mod input;
pub mod platform;
pub mod render;
pub mod scene;
pub mod settings;
pub mod shapes;
pub mod utils;

pub use assets::{FontdueRasterizer, Resources, TextCache, TextKey, TextRasterizer};
pub use color::Color;
pub use entity::{
    ChildKey, ClickArgs, Clickable, Drag, DrawContext, Entity, EntityNode, FrameContext, Group,
};
pub use errors::{Result, SceneError};
pub use geometry::{Point, Rect, Scale, WindowSize};
pub use platform::{HeadlessPlatform, Platform, PlatformEvent};
pub use render::{Canvas, Renderer, TextureId};
pub use scene::{Commands, Scene, SceneManager};
pub use settings::Settings;

/// Everything a host usually needs.
pub mod prelude {
    pub use crate::assets::{FontdueRasterizer, Resources};
    pub use crate::color::Color;
    pub use crate::entity::{
        ChildKey, ClickArgs, Clickable, Drag, Entity, EntityNode, Group, KeyArgs, ResizeArgs,
    };
    pub use crate::errors::{Result, SceneError};
    pub use crate::geometry::{Point, Rect, Scale, WindowSize};
    pub use crate::input::{Key, MouseButton};
    pub use crate::platform::{HeadlessPlatform, Platform, PlatformEvent};
    pub use crate::render::{Canvas, Renderer};
    pub use crate::scene::{Commands, Scene, SceneManager};
    pub use crate::settings::Settings;
    pub use crate::shapes::{
        Button, Circle, FillCircle, FillRectangle, Image, Line, Rectangle, TextAlignment,
        TextEntity, Triangle, VisibleWrapper,
    };
}
