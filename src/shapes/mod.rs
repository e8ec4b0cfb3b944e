//! Concrete Entities
//!
//! Drawable building blocks composed from [`EntityNode`] and, for the ones
//! that can be hit, [`ClickBehavior`]:
//!
//! | Entity            | Draws                         | Clickable | Children            |
//! |-------------------|-------------------------------|-----------|---------------------|
//! | [`Line`]          | one segment                   | no        | none                |
//! | [`Rectangle`]     | outline                       | yes       | none                |
//! | [`FillRectangle`] | filled area                   | yes       | none                |
//! | [`Circle`]        | nothing itself                | yes       | N `Line` sides      |
//! | [`FillCircle`]    | horizontal scanlines          | yes       | none                |
//! | [`Triangle`]      | nothing itself                | yes       | 3 `Line` edges      |
//! | [`Image`]         | a cached texture              | yes       | none                |
//! | [`TextEntity`]    | a cached text texture         | no        | none                |
//! | [`Button`]        | nothing itself                | yes       | background, border, label |
//! | [`VisibleWrapper`]| nothing itself                | no        | one wrapped entity  |
//!
//! [`EntityNode`]: crate::entity::EntityNode
//! [`ClickBehavior`]: crate::entity::ClickBehavior

/// Implements the `node`/`node_mut` accessors for a struct with a `node` field.
macro_rules! entity_node {
    () => {
        fn node(&self) -> &$crate::entity::EntityNode {
            &self.node
        }

        fn node_mut(&mut self) -> &mut $crate::entity::EntityNode {
            &mut self.node
        }
    };
}

/// Exposes `Self` as its `Clickable` view.
macro_rules! clickable_view {
    () => {
        fn as_clickable(&self) -> Option<&dyn $crate::entity::Clickable> {
            Some(self)
        }

        fn as_clickable_mut(&mut self) -> Option<&mut dyn $crate::entity::Clickable> {
            Some(self)
        }
    };
}

/// Implements the `ClickBehavior` accessors for a struct with a `click` field.
macro_rules! click_behavior {
    () => {
        fn click_behavior(&self) -> &$crate::entity::ClickBehavior {
            &self.click
        }

        fn click_behavior_mut(&mut self) -> &mut $crate::entity::ClickBehavior {
            &mut self.click
        }
    };
}

pub mod button;
pub mod circle;
pub mod image;
pub mod line;
pub mod rectangle;
pub mod text;
pub mod triangle;
pub mod visible_wrapper;

pub use button::{Button, TextAlignment};
pub use circle::{Circle, FillCircle};
pub use image::Image;
pub use line::Line;
pub use rectangle::{FillRectangle, Rectangle};
pub use text::TextEntity;
pub use triangle::Triangle;
pub use visible_wrapper::VisibleWrapper;
