use crate::entity::{ChildKey, Entity, EntityNode};
use crate::errors::Result;

const WRAPPED: &str = "wrapped";

/// Shows or hides one entity without touching its own traits.
///
/// The wrapped entity is attached as the child `"wrapped"` during `init`.
/// While [`visible`](Self::visible) is false the wrapper is skipped by
/// drawing and click dispatch; updates still reach the wrapped entity.
pub struct VisibleWrapper {
    node: EntityNode,
    pending: Option<Box<dyn Entity>>,
    pub visible: bool,
}

impl VisibleWrapper {
    pub fn new(entity: impl Entity) -> Self {
        Self {
            node: EntityNode::new(),
            pending: Some(Box::new(entity)),
            visible: true,
        }
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// The wrapped entity, once attached.
    pub fn inner(&self) -> Result<&dyn Entity> {
        self.node.child(WRAPPED)
    }

    pub fn inner_mut(&mut self) -> Result<&mut dyn Entity> {
        self.node.child_mut(WRAPPED)
    }

    pub fn inner_as<T: Entity>(&self) -> Result<&T> {
        self.node.typed_child(WRAPPED)
    }

    pub fn inner_as_mut<T: Entity>(&mut self) -> Result<&mut T> {
        self.node.typed_child_mut(WRAPPED)
    }
}

impl Entity for VisibleWrapper {
    entity_node!();

    fn init(&mut self) -> Result<()> {
        if let Some(entity) = self.pending.take() {
            self.node.add_boxed_child(ChildKey::from(WRAPPED), entity)?;
        }
        Ok(())
    }

    fn is_drawn(&self) -> bool {
        self.visible && self.node.is_visible()
    }
}

impl std::fmt::Debug for VisibleWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisibleWrapper")
            .field("node", &self.node)
            .field("attached", &self.pending.is_none())
            .field("visible", &self.visible)
            .finish()
    }
}
