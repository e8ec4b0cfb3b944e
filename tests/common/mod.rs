//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use image::{Rgba, RgbaImage};
use scenery::assets::{Resources, TextRasterizer};
use scenery::entity::{DrawContext, Entity, EntityNode, FrameContext};
use scenery::input::Input;
use scenery::render::Canvas;
use scenery::{Color, Result, WindowSize};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Rasterizer producing solid boxes: `size / 2` pixels per character, `size` tall.
#[derive(Debug, Default, Clone)]
pub struct BoxRasterizer {
    pub rasterized: Rc<Cell<usize>>,
    pub measured: Rc<Cell<usize>>,
}

impl TextRasterizer for BoxRasterizer {
    fn measure(&mut self, _font: &str, size: u32, text: &str) -> Result<(u32, u32)> {
        self.measured.set(self.measured.get() + 1);
        Ok((text.chars().count() as u32 * size / 2, size))
    }

    fn rasterize(&mut self, _font: &str, size: u32, text: &str, color: Color) -> Result<RgbaImage> {
        self.rasterized.set(self.rasterized.get() + 1);
        let width = text.chars().count() as u32 * size / 2;
        Ok(RgbaImage::from_pixel(width, size, Rgba::from(color)))
    }
}

pub fn test_resources() -> (Resources, BoxRasterizer) {
    let rasterizer = BoxRasterizer::default();
    (Resources::with_rasterizer(rasterizer.clone()), rasterizer)
}

pub const WINDOW: WindowSize = WindowSize::new(1000, 600);

/// Draws `entity` once onto `canvas`.
pub fn draw_once(entity: &mut dyn Entity, canvas: &mut Canvas, resources: &Resources) -> Result<()> {
    let window = WindowSize::new(canvas.width(), canvas.height());
    let mut ctx = DrawContext {
        renderer: canvas,
        resources,
        window,
        delta_ms: 16,
    };
    entity.draw(&mut ctx)
}

/// Updates `entity` once with the given input state.
pub fn update_once(entity: &mut dyn Entity, input: &Input, window: WindowSize) -> Result<()> {
    let ctx = FrameContext {
        window,
        delta_ms: 16,
        input,
    };
    entity.update(&ctx)
}

/// Shared record of lifecycle calls.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Entity that records its lifecycle calls and input notifications.
pub struct Probe {
    node: EntityNode,
    name: &'static str,
    journal: Journal,
}

impl Probe {
    pub fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            node: EntityNode::new(),
            name,
            journal: Rc::clone(journal),
        }
    }

    fn record(&self, what: &str) {
        self.journal.borrow_mut().push(format!("{what}:{}", self.name));
    }
}

impl Entity for Probe {
    fn node(&self) -> &EntityNode {
        &self.node
    }

    fn node_mut(&mut self) -> &mut EntityNode {
        &mut self.node
    }

    fn init(&mut self) -> Result<()> {
        self.record("init");
        Ok(())
    }

    fn dispose(&mut self) {
        self.record("dispose");
        self.node.dispose_children();
    }

    fn on_mouse_down(&mut self, _: &scenery::ClickArgs, _: &mut scenery::Commands) {
        self.record("down");
    }

    fn on_mouse_up(&mut self, _: &scenery::ClickArgs, _: &mut scenery::Commands) {
        self.record("up");
    }

    fn on_key_down(&mut self, _: &scenery::entity::KeyArgs, _: &mut scenery::Commands) {
        self.record("key");
    }
}

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn entries(journal: &Journal, prefix: &str) -> Vec<String> {
    journal
        .borrow()
        .iter()
        .filter(|entry| entry.starts_with(prefix))
        .cloned()
        .collect()
}
