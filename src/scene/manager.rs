use crate::assets::Resources;
use crate::color::Color;
use crate::entity::{ClickArgs, DrawContext, Entity, FrameContext, KeyArgs, ResizeArgs};
use crate::errors::{Result, SceneError};
use crate::geometry::WindowSize;
use crate::input::{ButtonState, Input};
use crate::platform::{Platform, PlatformEvent};
use crate::render::Renderer;
use crate::scene::{Command, Commands, Scene};
use crate::settings::Settings;
use crate::utils::FpsCounter;

/// Owns the scene stack and drives the frame loop.
///
/// Only the top of the stack is active: it alone is updated, drawn and fed
/// input. Pushing initializes the new scene; popping disposes the old one.
///
/// One frame:
///
/// 1. poll every pending platform event and dispatch it to the active scene;
/// 2. fire the scene's update handlers, then update the tree;
/// 3. clear to the background color, draw the tree, present;
/// 4. destroy textures evicted from the text cache;
/// 5. apply the [`Commands`] queued during the frame.
pub struct SceneManager {
    scenes: Vec<Scene>,
    settings: Settings,
    resources: Resources,
    input: Input,
    commands: Commands,
    fps: FpsCounter,
    window: WindowSize,
    last_frame_ms: Option<u64>,
    next_scene_id: u32,
    quit_requested: bool,
}

impl SceneManager {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_resources(settings, Resources::default())
    }

    #[must_use]
    pub fn with_resources(settings: Settings, resources: Resources) -> Self {
        let window = WindowSize::new(settings.width, settings.height);
        let mut input = Input::new();
        input.inject_resize(window.width, window.height);

        Self {
            scenes: Vec::new(),
            settings,
            resources,
            input,
            commands: Commands::new(),
            fps: FpsCounter::new(),
            window,
            last_frame_ms: None,
            next_scene_id: 1,
            quit_requested: false,
        }
    }

    // ========================================================================
    // Scene stack
    // ========================================================================

    /// Initializes `scene`, numbers it, and makes it the active scene.
    ///
    /// Ids count up from 1 per manager and are never reused.
    pub fn push_scene(&mut self, mut scene: Scene) -> Result<()> {
        scene.init()?;
        let id = self.next_scene_id;
        self.next_scene_id += 1;
        scene.assign_id(id);
        log::info!("Pushed scene {id} (depth {})", self.scenes.len() + 1);
        self.scenes.push(scene);
        Ok(())
    }

    /// Disposes the active scene and reactivates the one below it.
    ///
    /// Fails with [`SceneError::LastScene`] when only one scene remains.
    pub fn pop_scene(&mut self) -> Result<()> {
        match self.scenes.len() {
            0 => return Err(SceneError::NoActiveScene),
            1 => return Err(SceneError::LastScene),
            _ => {}
        }

        if let Some(mut scene) = self.scenes.pop() {
            if !self.commands.is_empty() {
                log::warn!("Popping scene {} with {} queued command(s)", scene.id().unwrap_or_default(), self.commands.len());
            }
            scene.dispose();
            log::info!("Popped scene {} (depth {})", scene.id().unwrap_or_default(), self.scenes.len());
        }
        Ok(())
    }

    #[must_use]
    pub fn active_scene(&self) -> Option<&Scene> {
        self.scenes.last()
    }

    pub fn active_scene_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.last_mut()
    }

    #[must_use]
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    pub fn add_entity_to_active_scene(&mut self, entity: impl Entity) -> Result<()> {
        self.add_boxed_entity_to_active_scene(Box::new(entity))
    }

    fn add_boxed_entity_to_active_scene(&mut self, entity: Box<dyn Entity>) -> Result<()> {
        self.scenes
            .last_mut()
            .ok_or(SceneError::NoActiveScene)?
            .add_boxed_entity(entity)
    }

    // ========================================================================
    // Configuration and state
    // ========================================================================

    pub fn set_background(&mut self, color: Color) {
        self.settings.background = color;
    }

    #[must_use]
    pub fn background(&self) -> Color {
        self.settings.background
    }

    pub fn set_target_fps(&mut self, fps: u32) {
        self.settings.target_fps = fps;
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    #[must_use]
    pub fn input(&self) -> &Input {
        &self.input
    }

    #[must_use]
    pub fn window_size(&self) -> WindowSize {
        self.window
    }

    /// Rate measured over the last full second.
    #[must_use]
    pub fn current_fps(&self) -> f32 {
        self.fps.current_fps
    }

    /// Commands applied at the end of the next frame.
    pub fn commands(&mut self) -> &mut Commands {
        &mut self.commands
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Opens the window and runs frames until the platform or a command quits.
    pub fn render(&mut self, platform: &mut dyn Platform, renderer: &mut dyn Renderer) -> Result<()> {
        platform.create_window(&self.settings.title, self.settings.width, self.settings.height)?;
        self.window = platform.window_size();
        self.input.inject_resize(self.window.width, self.window.height);
        if self.window.width == 0 || self.window.height == 0 {
            log::warn!("Window has a zero-sized dimension: {}x{}", self.window.width, self.window.height);
        }

        log::info!(
            "Render loop started: '{}' {}x{} at {} fps",
            self.settings.title,
            self.window.width,
            self.window.height,
            self.settings.target_fps
        );

        self.quit_requested = false;
        self.last_frame_ms = None;
        let mut frames = 0_u64;

        loop {
            let frame_start = platform.ticks();
            let keep_running = self.frame(platform, renderer)?;
            frames += 1;
            if !keep_running {
                break;
            }

            let budget = self.settings.frame_budget_ms();
            let elapsed = platform.ticks().saturating_sub(frame_start);
            if elapsed < budget {
                platform.delay(budget - elapsed);
            }
        }

        log::info!("Render loop stopped after {frames} frame(s)");
        Ok(())
    }

    /// Runs one frame. Returns `false` once quitting was requested.
    pub fn frame(&mut self, platform: &mut dyn Platform, renderer: &mut dyn Renderer) -> Result<bool> {
        let now = platform.ticks();
        let delta_ms = self.last_frame_ms.map_or(0, |last| now.saturating_sub(last));
        self.last_frame_ms = Some(now);

        self.input.start_frame();
        while let Some(event) = platform.poll_event() {
            if !self.dispatch_event(event) {
                return Ok(false);
            }
        }
        self.window = platform.window_size();
        self.input.inject_mouse_position(platform.mouse_position());

        let window = self.window;
        if let Some(scene) = self.scenes.last_mut() {
            scene.on_update(&mut self.commands);
            let ctx = FrameContext {
                window,
                delta_ms,
                input: &self.input,
            };
            scene.update(&ctx)?;
        }

        renderer.set_draw_color(self.settings.background);
        renderer.clear();
        if let Some(scene) = self.scenes.last_mut() {
            let mut ctx = DrawContext {
                renderer: &mut *renderer,
                resources: &self.resources,
                window,
                delta_ms,
            };
            scene.draw(&mut ctx)?;
        }
        renderer.present();

        self.resources.collect_garbage(renderer);
        if let Some(fps) = self.fps.tick(delta_ms) {
            log::debug!("{fps:.1} fps");
        }

        self.apply_commands()?;
        Ok(!self.quit_requested)
    }

    /// Feeds one platform event into the input state and the active scene.
    /// Returns `false` for a quit event.
    fn dispatch_event(&mut self, event: PlatformEvent) -> bool {
        log::trace!("Platform event: {event:?}");
        if let PlatformEvent::WindowResized { width, height } = event {
            self.window = WindowSize::new(width, height);
        }

        let window = self.window;
        let scene = self.scenes.last_mut();
        let commands = &mut self.commands;

        match event {
            PlatformEvent::Quit => {
                log::info!("Quit requested by the platform");
                return false;
            }
            PlatformEvent::MouseDown { x, y, button } => {
                let args = ClickArgs::new(x, y, button);
                self.input.inject_mouse_position(args.position);
                self.input.inject_mouse_button(button, ButtonState::Pressed);
                if let Some(scene) = scene {
                    scene.on_click(&args, window, commands);
                }
            }
            PlatformEvent::MouseUp { x, y, button } => {
                let args = ClickArgs::new(x, y, button);
                self.input.inject_mouse_position(args.position);
                self.input.inject_mouse_button(button, ButtonState::Released);
                if let Some(scene) = scene {
                    scene.on_mouse_up(&args, commands);
                }
            }
            PlatformEvent::KeyDown { key } => {
                self.input.inject_key(key, ButtonState::Pressed);
                if let Some(scene) = scene {
                    scene.on_key_down(&KeyArgs { key }, commands);
                }
            }
            PlatformEvent::KeyUp { key } => {
                self.input.inject_key(key, ButtonState::Released);
            }
            PlatformEvent::WindowResized { width, height } => {
                self.input.inject_resize(width, height);
                if let Some(scene) = scene {
                    scene.on_window_resized(&ResizeArgs { size: window }, commands);
                }
            }
        }
        true
    }

    fn apply_commands(&mut self) -> Result<()> {
        let queued: Vec<Command> = self.commands.drain().collect();
        for command in queued {
            log::trace!("Applying {command:?}");
            match command {
                Command::PushScene(scene) => self.push_scene(scene)?,
                Command::PopScene => self.pop_scene()?,
                Command::AddEntity(entity) => self.add_boxed_entity_to_active_scene(entity)?,
                Command::SetBackground(color) => self.set_background(color),
                Command::SetTargetFps(fps) => self.set_target_fps(fps),
                Command::Quit => self.quit_requested = true,
            }
        }
        Ok(())
    }

    /// Disposes every scene, then releases every cached texture.
    pub fn dispose(&mut self, renderer: &mut dyn Renderer) {
        while let Some(mut scene) = self.scenes.pop() {
            scene.dispose();
        }
        self.resources.collect_garbage(renderer);
        self.resources.clear(renderer);
        log::info!("Scene manager disposed");
    }
}

impl std::fmt::Debug for SceneManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneManager")
            .field("scenes", &self.scenes)
            .field("settings", &self.settings)
            .field("window", &self.window)
            .field("queued_commands", &self.commands.len())
            .finish_non_exhaustive()
    }
}
