#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Data Defence adapters.

mod pointer;
mod text;

pub use self::pointer::{PointerEvent, PointerTracker};
pub use self::text::wrap_text;

use anyhow::Result as AnyResult;
use data_defence_core::{Hitbox, PathObstacle, PlacementHighlight, TowerId, TowerKind};
use glam::Vec2;
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb_u8(255, 255, 255);
    /// Opaque red used for warnings and blocked placements.
    pub const RED: Self = Self::from_rgb_u8(255, 0, 0);
    /// Opaque green used for affordable prices and free placements.
    pub const GREEN: Self = Self::from_rgb_u8(0, 255, 0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position in window units, when the cursor is inside the window.
    pub cursor: Option<Vec2>,
    /// Pointer transitions detected on this frame, in the order they happened.
    pub pointer_events: Vec<PointerEvent>,
}

/// Immutable snapshot describing a tower in the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTower {
    /// Identifier allocated to the tower by the world.
    pub id: TowerId,
    /// Kind of tower, used to pick its fill colour.
    pub kind: TowerKind,
    /// Centre of the tower.
    pub position: Vec2,
    /// Shape drawn for the tower.
    pub hitbox: Hitbox,
    /// Whether the tower is held by the player.
    pub selected: bool,
    /// Placement outline shown while the tower is dragged.
    pub highlight: Option<PlacementHighlight>,
}

/// Icon drawn on the shop bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShopIconPresentation {
    /// Centre of the icon.
    pub position: Vec2,
    /// Scaled icon size.
    pub size: Vec2,
    /// Kind of tower sold by the item.
    pub kind: TowerKind,
}

/// Horizontal bar along the bottom of the window listing buyable towers.
#[derive(Clone, Debug, PartialEq)]
pub struct ShopBarPresentation {
    /// Centre of the bar background.
    pub center: Vec2,
    /// Size of the bar background.
    pub size: Vec2,
    /// Background fill.
    pub color: Color,
    /// Item icons in catalog order.
    pub items: Vec<ShopIconPresentation>,
}

/// Horizontal alignment of a text label around its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The position marks the left edge of each line.
    Left,
    /// The position marks the horizontal centre of each line.
    Center,
}

/// Text drawn on top of the scene.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    /// Text content.
    pub text: String,
    /// Anchor point of the first line's baseline.
    pub position: Vec2,
    /// Font size in window units.
    pub font_size: f32,
    /// Fill colour.
    pub color: Color,
    /// Horizontal alignment.
    pub anchor: TextAnchor,
    /// Maximum line width; longer text is wrapped at word boundaries.
    pub wrap_width: Option<f32>,
}

/// Side panel background and its labels.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelPresentation {
    /// Top-left corner of the panel background.
    pub top_left: Vec2,
    /// Size of the panel background.
    pub size: Vec2,
    /// Background fill.
    pub color: Color,
    /// Labels drawn on the panel.
    pub labels: Vec<TextLabel>,
}

/// Scene description combining the map, the shop bar and the info panel.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Path obstacles towers may not overlap.
    pub obstacles: Vec<PathObstacle>,
    /// Fill used for path obstacles.
    pub path_color: Color,
    /// Towers in draw order, including a tower that is being dragged.
    pub towers: Vec<SceneTower>,
    /// Shop bar along the bottom edge.
    pub shop: ShopBarPresentation,
    /// Info panel along the right edge.
    pub panel: PanelPresentation,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Size of the created window.
    pub window_size: Vec2,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    pub fn new<T>(
        window_title: T,
        window_size: Vec2,
        clear_color: Color,
        scene: Scene,
    ) -> Result<Self, RenderingError>
    where
        T: Into<String>,
    {
        if !(window_size.x >= 1.0 && window_size.y >= 1.0) {
            return Err(RenderingError::InvalidWindowSize {
                width: window_size.x,
                height: window_size.y,
            });
        }

        Ok(Self {
            window_title: window_title.into(),
            window_size,
            clear_color,
            scene,
        })
    }
}

/// Rendering backend capable of presenting Data Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta, the
    /// pointer input captured by the adapter, and may mutate the scene before
    /// it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The window must be at least one unit in each dimension.
    InvalidWindowSize {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWindowSize { width, height } => {
                write!(f, "window size must be positive (received {width}x{height})")
            }
        }
    }
}

impl Error for RenderingError {}
