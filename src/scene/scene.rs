use std::any::Any;

use crate::entity::{ClickArgs, DrawContext, Entity, FrameContext, KeyArgs, ResizeArgs};
use crate::errors::Result;
use crate::geometry::WindowSize;
use crate::scene::Commands;

pub type UpdateHandler = Box<dyn FnMut(&mut Commands)>;

/// An ordered set of root entities plus tree-wide event dispatch.
///
/// Roots are initialized when the scene is initialized, or immediately when
/// added to a scene that already is. Input is delivered in post-order: every
/// child subtree is fully visited before its parent, and earlier siblings
/// before later ones.
///
/// # Click dispatch
///
/// Within one root, the first visited node that is clickable, interactive,
/// drawn, and contains the cursor receives `on_click` and claims the click.
/// Every other node of that root receives `on_mouse_down` instead. Because of
/// the post-order walk the deepest hit shape wins over its containers.
pub struct Scene {
    id: Option<u32>,
    entities: Vec<Box<dyn Entity>>,
    update_handlers: Vec<UpdateHandler>,
    initialized: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: None,
            entities: Vec::new(),
            update_handlers: Vec::new(),
            initialized: false,
        }
    }

    /// Stack id given by the [`SceneManager`] on push, `None` before that.
    ///
    /// [`SceneManager`]: crate::scene::SceneManager
    #[must_use]
    pub fn id(&self) -> Option<u32> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // ========================================================================
    // Roots
    // ========================================================================

    pub fn add_entity(&mut self, entity: impl Entity) -> Result<()> {
        self.add_boxed_entity(Box::new(entity))
    }

    pub fn add_boxed_entity(&mut self, mut entity: Box<dyn Entity>) -> Result<()> {
        if self.initialized {
            entity.init()?;
        }
        self.entities.push(entity);
        Ok(())
    }

    pub fn entities(&self) -> std::slice::Iter<'_, Box<dyn Entity>> {
        self.entities.iter()
    }

    #[must_use]
    pub fn entity(&self, index: usize) -> Option<&dyn Entity> {
        self.entities.get(index).map(AsRef::as_ref)
    }

    pub fn entity_mut(&mut self, index: usize) -> Option<&mut dyn Entity> {
        self.entities.get_mut(index).map(AsMut::as_mut)
    }

    /// Root at `index` downcast to `T`.
    #[must_use]
    pub fn typed_entity<T: Entity>(&self, index: usize) -> Option<&T> {
        let entity: &dyn Any = &**self.entities.get(index)?;
        entity.downcast_ref()
    }

    pub fn typed_entity_mut<T: Entity>(&mut self, index: usize) -> Option<&mut T> {
        let entity: &mut dyn Any = &mut **self.entities.get_mut(index)?;
        entity.downcast_mut()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Registers a handler fired once per frame before the tree is updated.
    pub fn add_update_handler(&mut self, handler: impl FnMut(&mut Commands) + 'static) {
        self.update_handlers.push(Box::new(handler));
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Initializes every root. Calling it again is a no-op.
    pub fn init(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        for entity in &mut self.entities {
            entity.init()?;
        }
        self.initialized = true;
        log::debug!("Scene {:?} initialized with {} root(s)", self.id, self.entities.len());
        Ok(())
    }

    pub fn on_update(&mut self, commands: &mut Commands) {
        for handler in &mut self.update_handlers {
            handler(commands);
        }
    }

    pub fn update(&mut self, ctx: &FrameContext<'_>) -> Result<()> {
        for entity in &mut self.entities {
            entity.update(ctx)?;
        }
        Ok(())
    }

    pub fn draw(&mut self, ctx: &mut DrawContext<'_>) -> Result<()> {
        for entity in &mut self.entities {
            if entity.is_drawn() {
                entity.draw(ctx)?;
            }
        }
        Ok(())
    }

    /// Disposes and drops every root.
    pub fn dispose(&mut self) {
        for mut entity in self.entities.drain(..) {
            entity.dispose();
        }
        self.initialized = false;
        log::debug!("Scene {:?} disposed", self.id);
    }

    // ========================================================================
    // Input
    // ========================================================================

    pub fn on_click(&mut self, args: &ClickArgs, window: WindowSize, commands: &mut Commands) {
        for entity in &mut self.entities {
            let mut claimed = false;
            dispatch_click(entity.as_mut(), true, args, window, &mut claimed, commands);
        }
    }

    pub fn on_mouse_up(&mut self, args: &ClickArgs, commands: &mut Commands) {
        for entity in &mut self.entities {
            post_order(entity.as_mut(), &mut |e| e.on_mouse_up(args, commands));
        }
    }

    pub fn on_key_down(&mut self, args: &KeyArgs, commands: &mut Commands) {
        for entity in &mut self.entities {
            post_order(entity.as_mut(), &mut |e| e.on_key_down(args, commands));
        }
    }

    pub fn on_window_resized(&mut self, args: &ResizeArgs, commands: &mut Commands) {
        for entity in &mut self.entities {
            post_order(entity.as_mut(), &mut |e| e.on_window_resized(args, commands));
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("id", &self.id)
            .field("entities", &self.entities.len())
            .field("update_handlers", &self.update_handlers.len())
            .field("initialized", &self.initialized)
            .finish()
    }
}

fn post_order(entity: &mut dyn Entity, visit: &mut dyn FnMut(&mut dyn Entity)) {
    for child in entity.node_mut().children_mut() {
        post_order(child.as_mut(), visit);
    }
    visit(entity);
}

fn dispatch_click(
    entity: &mut dyn Entity,
    parent_drawn: bool,
    args: &ClickArgs,
    window: WindowSize,
    claimed: &mut bool,
    commands: &mut Commands,
) {
    let drawn = parent_drawn && entity.is_drawn();
    for child in entity.node_mut().children_mut() {
        dispatch_click(child.as_mut(), drawn, args, window, claimed, commands);
    }

    if !*claimed
        && drawn
        && let Some(clickable) = entity.as_clickable_mut()
        && clickable.clickable_traits().interactive
        && clickable.contains(args.position, window)
    {
        log::trace!("Click at {} claimed", args.position);
        clickable.on_click(args, commands);
        *claimed = true;
        return;
    }

    entity.on_mouse_down(args, commands);
}
