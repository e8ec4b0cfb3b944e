use crate::color::Color;
use crate::entity::Entity;
use crate::scene::Scene;

/// A structural change requested while the tree is being walked.
pub enum Command {
    PushScene(Scene),
    PopScene,
    AddEntity(Box<dyn Entity>),
    SetBackground(Color),
    SetTargetFps(u32),
    Quit,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PushScene(scene) => write!(f, "PushScene({} roots)", scene.len()),
            Self::PopScene => f.write_str("PopScene"),
            Self::AddEntity(_) => f.write_str("AddEntity"),
            Self::SetBackground(color) => write!(f, "SetBackground({color})"),
            Self::SetTargetFps(fps) => write!(f, "SetTargetFps({fps})"),
            Self::Quit => f.write_str("Quit"),
        }
    }
}

/// Queue of deferred scene-level changes.
///
/// Handlers and entity hooks cannot reach the scene stack while the active
/// scene is being traversed. They record what they want here instead, and
/// the [`SceneManager`](crate::scene::SceneManager) applies the queue in order
/// once the frame has been drawn.
#[derive(Debug, Default)]
pub struct Commands {
    queue: Vec<Command>,
}

impl Commands {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_scene(&mut self, scene: Scene) {
        self.queue.push(Command::PushScene(scene));
    }

    pub fn pop_scene(&mut self) {
        self.queue.push(Command::PopScene);
    }

    /// Adds a root entity to whichever scene is active when the queue is applied.
    pub fn add_entity(&mut self, entity: impl Entity) {
        self.queue.push(Command::AddEntity(Box::new(entity)));
    }

    pub fn set_background(&mut self, color: Color) {
        self.queue.push(Command::SetBackground(color));
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.queue.push(Command::SetTargetFps(fps));
    }

    pub fn quit(&mut self) {
        self.queue.push(Command::Quit);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Removes and returns all queued commands in submission order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Command> {
        self.queue.drain(..)
    }
}
