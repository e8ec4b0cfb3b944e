use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::entity::events::EntityEvents;
use crate::entity::{DrawContext, Entity, FrameContext};
use crate::errors::{Result, SceneError};
use crate::geometry::{Rect, Scale, WindowSize};

/// Identifies a child among its siblings.
///
/// Keys are only unique within one parent. `Auto` keys are handed out by
/// [`EntityNode::add_child_auto`] and never collide with user keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChildKey {
    Named(Cow<'static, str>),
    /// A name plus an index, e.g. the segments of a polygon outline.
    Indexed(Cow<'static, str>, usize),
    Auto(u64),
}

impl From<&'static str> for ChildKey {
    fn from(name: &'static str) -> Self {
        Self::Named(Cow::Borrowed(name))
    }
}

impl From<String> for ChildKey {
    fn from(name: String) -> Self {
        Self::Named(Cow::Owned(name))
    }
}

impl From<(&'static str, usize)> for ChildKey {
    fn from((name, index): (&'static str, usize)) -> Self {
        Self::Indexed(Cow::Borrowed(name), index)
    }
}

impl From<&ChildKey> for ChildKey {
    fn from(key: &ChildKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => write!(f, "'{name}'"),
            Self::Indexed(name, index) => write!(f, "'{name}[{index}]'"),
            Self::Auto(id) => write!(f, "#{id}"),
        }
    }
}

/// Basic rendering traits shared by every entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityTraits {
    pub visible: bool,
    pub scale: Scale,
}

impl Default for EntityTraits {
    fn default() -> Self {
        Self {
            visible: true,
            scale: Scale::RelativeToScreen,
        }
    }
}

/// The tree part of an entity.
///
/// Every entity embeds one `EntityNode` and exposes it through
/// [`Entity::node`]. The node owns the children in insertion order, indexes
/// them by [`ChildKey`], and drives their lifecycle:
///
/// - attaching a child assigns its key and calls its [`Entity::init`] before
///   returning;
/// - replacing or removing a child disposes the previous occupant;
/// - disposing the node disposes every child exactly once.
#[derive(Default)]
pub struct EntityNode {
    key: Option<ChildKey>,
    pub traits: EntityTraits,
    pub events: EntityEvents,

    children: Vec<Box<dyn Entity>>,
    index: FxHashMap<ChildKey, usize>,
    next_auto_key: u64,
}

impl EntityNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_scale(scale: Scale) -> Self {
        Self {
            traits: EntityTraits {
                scale,
                ..EntityTraits::default()
            },
            ..Self::default()
        }
    }

    /// Key assigned by the parent at attach time. Roots have none.
    #[must_use]
    pub fn key(&self) -> Option<&ChildKey> {
        self.key.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn scale(&self) -> Scale {
        self.traits.scale
    }

    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.traits.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.traits.visible = visible;
    }

    // ========================================================================
    // Children
    // ========================================================================

    /// Attaches `child` under `key` and initializes it.
    ///
    /// Fails with [`SceneError::DuplicateKey`] without touching the existing
    /// child when the key is taken.
    pub fn add_child(&mut self, key: impl Into<ChildKey>, child: impl Entity) -> Result<()> {
        self.add_boxed_child(key.into(), Box::new(child))
    }

    pub fn add_boxed_child(&mut self, key: ChildKey, mut child: Box<dyn Entity>) -> Result<()> {
        if self.index.contains_key(&key) {
            return Err(SceneError::DuplicateKey(key));
        }

        child.node_mut().key = Some(key.clone());
        child.init()?;

        self.index.insert(key, self.children.len());
        self.children.push(child);
        Ok(())
    }

    /// Attaches `child` under a generated key and returns that key.
    pub fn add_child_auto(&mut self, child: impl Entity) -> Result<ChildKey> {
        let key = ChildKey::Auto(self.next_auto_key);
        self.next_auto_key += 1;
        self.add_boxed_child(key.clone(), Box::new(child))?;
        Ok(key)
    }

    #[must_use]
    pub fn has_child(&self, key: &ChildKey) -> bool {
        self.index.contains_key(key)
    }

    pub fn child(&self, key: impl Into<ChildKey>) -> Result<&dyn Entity> {
        let slot = self.slot(key.into())?;
        Ok(self.children[slot].as_ref())
    }

    pub fn child_mut(&mut self, key: impl Into<ChildKey>) -> Result<&mut dyn Entity> {
        let slot = self.slot(key.into())?;
        Ok(self.children[slot].as_mut())
    }

    /// Looks up a child and downcasts it to `T`.
    pub fn typed_child<T: Entity>(&self, key: impl Into<ChildKey>) -> Result<&T> {
        let key = key.into();
        let slot = self.slot(key.clone())?;
        let any: &dyn Any = &*self.children[slot];
        any.downcast_ref::<T>().ok_or_else(|| SceneError::WrongChildType {
            key,
            expected: type_name::<T>(),
        })
    }

    pub fn typed_child_mut<T: Entity>(&mut self, key: impl Into<ChildKey>) -> Result<&mut T> {
        let key = key.into();
        let slot = self.slot(key.clone())?;
        let any: &mut dyn Any = &mut *self.children[slot];
        any.downcast_mut::<T>().ok_or_else(|| SceneError::WrongChildType {
            key,
            expected: type_name::<T>(),
        })
    }

    /// Replaces the child at `key` with `child`.
    ///
    /// The replacement is initialized first; the previous occupant is then
    /// disposed and dropped.
    pub fn edit_child(&mut self, key: impl Into<ChildKey>, child: impl Entity) -> Result<()> {
        let key = key.into();
        let slot = self.slot(key.clone())?;

        let mut child: Box<dyn Entity> = Box::new(child);
        child.node_mut().key = Some(key);
        child.init()?;

        let mut previous = std::mem::replace(&mut self.children[slot], child);
        previous.dispose();
        Ok(())
    }

    /// Disposes and detaches the child at `key`.
    pub fn remove_child(&mut self, key: impl Into<ChildKey>) -> Result<()> {
        let key = key.into();
        let slot = self.slot(key.clone())?;

        let mut child = self.children.remove(slot);
        self.index.remove(&key);
        for position in self.index.values_mut() {
            if *position > slot {
                *position -= 1;
            }
        }

        child.dispose();
        Ok(())
    }

    /// Disposes and detaches every child.
    pub fn clear_children(&mut self) {
        self.dispose_children();
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Children in insertion order.
    pub fn children(&self) -> std::slice::Iter<'_, Box<dyn Entity>> {
        self.children.iter()
    }

    pub fn children_mut(&mut self) -> std::slice::IterMut<'_, Box<dyn Entity>> {
        self.children.iter_mut()
    }

    pub fn child_keys(&self) -> impl Iterator<Item = &ChildKey> {
        self.children.iter().filter_map(|child| child.node().key())
    }

    fn slot(&self, key: ChildKey) -> Result<usize> {
        self.index
            .get(&key)
            .copied()
            .ok_or(SceneError::NoSuchChild(key))
    }

    // ========================================================================
    // Lifecycle helpers
    // ========================================================================

    pub fn update_children(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        for child in &mut self.children {
            child.update(ctx)?;
        }
        Ok(())
    }

    /// Draws every visible child in insertion order.
    pub fn draw_children(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        for child in &mut self.children {
            if child.is_drawn() {
                child.draw(ctx)?;
            }
        }
        Ok(())
    }

    pub fn dispose_children(&mut self) {
        self.index.clear();
        for mut child in self.children.drain(..) {
            child.dispose();
        }
    }

    // ========================================================================
    // Coordinate conversion
    // ========================================================================

    #[must_use]
    pub fn to_absolute_point(&self, point: Vec2, window: WindowSize) -> Vec2 {
        self.traits.scale.to_absolute_point(point, window)
    }

    #[must_use]
    pub fn to_relative_point(&self, point: Vec2, window: WindowSize) -> Vec2 {
        self.traits.scale.to_relative_point(point, window)
    }

    #[must_use]
    pub fn to_absolute_area(&self, area: Rect, window: WindowSize) -> Rect {
        self.traits.scale.to_absolute_area(area, window)
    }

    #[must_use]
    pub fn to_relative_area(&self, area: Rect, window: WindowSize) -> Rect {
        self.traits.scale.to_relative_area(area, window)
    }

    #[must_use]
    pub fn to_absolute_length(&self, length: f32, window: WindowSize) -> f32 {
        self.traits.scale.to_absolute_length(length, window)
    }
}

impl fmt::Debug for EntityNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityNode")
            .field("key", &self.key)
            .field("traits", &self.traits)
            .field("children", &self.child_keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display() {
        assert_eq!(ChildKey::from("label").to_string(), "'label'");
        assert_eq!(ChildKey::from(("side", 2)).to_string(), "'side[2]'");
        assert_eq!(ChildKey::Auto(7).to_string(), "#7");
    }

    #[test]
    fn default_traits_are_visible_and_relative() {
        let node = EntityNode::new();
        assert!(node.is_visible());
        assert_eq!(node.scale(), Scale::RelativeToScreen);
        assert!(node.key().is_none());
    }
}
