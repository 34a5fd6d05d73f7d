#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Data Defence shop and info panel.
//!
//! This crate defines the vocabulary that connects the authoritative world,
//! the shop and info panel systems, and the rendering adapters. The shop
//! mutates the world exclusively through the narrow [`GameState`] capability
//! and reports what happened as [`ShopEvent`] values, which the info panel
//! consumes to update its readout.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Title shown by hosts when the experience boots.
pub const GAME_TITLE: &str = "Data Defence";

/// Amount of "data", the currency spent on towers.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Data(u32);

impl Data {
    /// Creates a new currency amount.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric amount.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether this balance is enough to pay the provided price.
    #[must_use]
    pub const fn covers(&self, price: Data) -> bool {
        price.0 <= self.0
    }

    /// Subtracts a price from the balance, returning `None` when it would underflow.
    #[must_use]
    pub const fn checked_sub(self, price: Data) -> Option<Data> {
        match self.0.checked_sub(price.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }
}

/// Number of lives the player has left.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lives(u32);

impl Lives {
    /// Creates a new lives counter.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric amount of lives.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Read-only pair of counters shown by the info panel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Resources {
    /// Currency available to the player.
    pub data: Data,
    /// Lives the player has left.
    pub lives: Lives,
}

impl Resources {
    /// Creates a new resource snapshot.
    #[must_use]
    pub const fn new(data: Data, lives: Lives) -> Self {
        Self { data, lives }
    }
}

/// Unique identifier assigned to a tower in the placed-towers list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Index of an item within the shop catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShopItemId(usize);

impl ShopItemId {
    /// Creates a new shop item identifier from its catalog position.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based position of the item in the catalog.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

/// Types of towers that can be bought from the shop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// General purpose tower.
    Basic,
    /// Fast firing, short range tower.
    Rapid,
    /// Slow, high damage tower.
    Heavy,
}

/// Bounding shape centred on an entity's position, used for collision tests.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Hitbox {
    /// Circle with the provided radius.
    Circle {
        /// Radius in world units.
        radius: f32,
    },
    /// Axis-aligned rectangle with the provided dimensions.
    Rect {
        /// Width in world units.
        width: f32,
        /// Height in world units.
        height: f32,
    },
}

impl Hitbox {
    /// Reports whether this shape placed at `center` overlaps `other` placed at `other_center`.
    ///
    /// Shapes that merely touch are treated as overlapping.
    #[must_use]
    pub fn overlaps(self, center: Vec2, other: Hitbox, other_center: Vec2) -> bool {
        match (self, other) {
            (Self::Circle { radius }, Self::Circle { radius: other_radius }) => {
                let reach = radius + other_radius;
                center.distance_squared(other_center) <= reach * reach
            }
            (Self::Rect { .. }, Self::Rect { .. }) => {
                let reach = (self.half_extents() + other.half_extents()).abs();
                let offset = (center - other_center).abs();
                offset.x <= reach.x && offset.y <= reach.y
            }
            (Self::Circle { radius }, Self::Rect { .. }) => {
                circle_overlaps_rect(center, radius, other_center, other.half_extents())
            }
            (Self::Rect { .. }, Self::Circle { radius }) => {
                circle_overlaps_rect(other_center, radius, center, self.half_extents())
            }
        }
    }

    /// Reports whether a circular probe of `probe_radius` at `point` touches this shape.
    #[must_use]
    pub fn contains_probe(self, center: Vec2, point: Vec2, probe_radius: f32) -> bool {
        self.overlaps(
            center,
            Hitbox::Circle {
                radius: probe_radius.max(0.0),
            },
            point,
        )
    }

    /// Half of the shape's axis-aligned bounding box.
    #[must_use]
    pub fn half_extents(self) -> Vec2 {
        match self {
            Self::Circle { radius } => Vec2::splat(radius),
            Self::Rect { width, height } => Vec2::new(width, height) * 0.5,
        }
    }
}

fn circle_overlaps_rect(circle: Vec2, radius: f32, rect: Vec2, half_extents: Vec2) -> bool {
    let half_extents = half_extents.abs();
    let offset = circle - rect;
    let closest = offset.clamp(-half_extents, half_extents);
    (offset - closest).length_squared() <= radius * radius
}

/// Visual verdict attached to a tower while it is being dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementHighlight {
    /// Tower can be dropped at its current position (drawn green).
    Placeable,
    /// Tower overlaps an obstacle or another tower (drawn red).
    NotPlaceable,
}

/// Placeable game entity bought from the shop.
///
/// Cloning a tower produces an independent instance; the shop relies on this
/// to turn a catalog prototype into a new tower per purchase.
#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    kind: TowerKind,
    position: Vec2,
    hitbox: Hitbox,
    activated: bool,
    selected: bool,
    highlight: Option<PlacementHighlight>,
}

impl Tower {
    /// Creates an inactive, unselected tower at the origin.
    #[must_use]
    pub const fn new(kind: TowerKind, hitbox: Hitbox) -> Self {
        Self {
            kind,
            position: Vec2::ZERO,
            hitbox,
            activated: false,
            selected: false,
            highlight: None,
        }
    }

    /// Kind of tower.
    #[must_use]
    pub const fn kind(&self) -> TowerKind {
        self.kind
    }

    /// Centre of the tower in world units.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Moves the tower to the provided world position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Bounding shape used for collision tests.
    #[must_use]
    pub const fn hitbox(&self) -> Hitbox {
        self.hitbox
    }

    /// Whether the tower participates in combat.
    #[must_use]
    pub const fn is_activated(&self) -> bool {
        self.activated
    }

    /// Whether the tower is currently held by the player.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Placement highlight shown around the tower, if any.
    #[must_use]
    pub const fn highlight(&self) -> Option<PlacementHighlight> {
        self.highlight
    }

    /// Replaces the placement highlight.
    pub fn set_highlight(&mut self, highlight: Option<PlacementHighlight>) {
        self.highlight = highlight;
    }

    /// Marks the tower as held: excluded from combat and drawn as selected.
    pub fn pick_up(&mut self) {
        self.activated = false;
        self.selected = true;
    }

    /// Marks the tower as placed: active in combat and no longer held.
    pub fn finalize(&mut self) {
        self.activated = true;
        self.selected = false;
        self.highlight = None;
    }

    /// Reports whether this tower's hitbox overlaps another tower's hitbox.
    #[must_use]
    pub fn overlaps_tower(&self, other: &Tower) -> bool {
        self.hitbox
            .overlaps(self.position, other.hitbox, other.position)
    }

    /// Reports whether this tower's hitbox overlaps a path obstacle.
    #[must_use]
    pub fn overlaps_obstacle(&self, obstacle: &PathObstacle) -> bool {
        self.hitbox
            .overlaps(self.position, obstacle.hitbox, obstacle.center)
    }
}

/// Static piece of the enemy path that towers may not be placed on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathObstacle {
    /// Centre of the obstacle in world units.
    pub center: Vec2,
    /// Shape covered by the obstacle.
    pub hitbox: Hitbox,
}

impl PathObstacle {
    /// Creates a new obstacle descriptor.
    #[must_use]
    pub const fn new(center: Vec2, hitbox: Hitbox) -> Self {
        Self { center, hitbox }
    }
}

/// Tower stored in the shared placed-towers list together with its identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTower {
    /// Identifier allocated when the tower was appended.
    pub id: TowerId,
    /// Tower state.
    pub tower: Tower,
}

/// Commands that configure the world outside of shop interactions.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Resets the currency and lives counters.
    ConfigureResources {
        /// Currency available to the player.
        data: Data,
        /// Lives the player starts with.
        lives: Lives,
    },
    /// Replaces the path obstacles that towers may not overlap.
    ConfigurePath {
        /// Obstacles tracing the enemy path.
        obstacles: Vec<PathObstacle>,
    },
}

/// Outcomes reported by the shop while handling pointer input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShopEvent {
    /// The player pressed on a shop item, which should now be shown in detail.
    ItemInspected {
        /// Item under the pointer.
        item: ShopItemId,
    },
    /// The player could not afford the item they tried to buy.
    PurchaseRejected {
        /// Item the player tried to buy.
        item: ShopItemId,
        /// Price of the item.
        price: Data,
        /// Data the player had available.
        available: Data,
    },
    /// A purchased tower was picked up and is now being dragged.
    HoldStarted {
        /// Item the tower was cloned from.
        item: ShopItemId,
        /// Identifier of the held tower in the placed list.
        tower: TowerId,
    },
    /// The held tower was dropped on a free spot and paid for.
    PlacementCommitted {
        /// Item the tower was cloned from.
        item: ShopItemId,
        /// Identifier of the placed tower.
        tower: TowerId,
        /// Data deducted from the player.
        price: Data,
    },
    /// The held tower was dropped on a blocked spot and discarded.
    PlacementCancelled {
        /// Item the tower was cloned from.
        item: ShopItemId,
        /// Identifier the discarded tower had while held.
        tower: TowerId,
    },
}

/// Narrow view of the shared game state that UI systems are allowed to touch.
///
/// Implementors own the currency counter, lives, the placed-towers list and
/// the path obstacles. Callers receive exclusive access for the duration of a
/// single pointer event.
pub trait GameState {
    /// Currency currently available.
    fn data(&self) -> Data;

    /// Lives the player has left.
    fn lives(&self) -> Lives;

    /// Deducts `price` from the currency counter.
    ///
    /// Returns `false` and leaves the counter untouched when the balance does
    /// not cover the price.
    fn spend_data(&mut self, price: Data) -> bool;

    /// Appends a tower to the placed-towers list and returns its identifier.
    fn add_tower(&mut self, tower: Tower) -> TowerId;

    /// Mutable access to a placed tower.
    fn tower_mut(&mut self, id: TowerId) -> Option<&mut Tower>;

    /// Removes a tower from the placed-towers list.
    fn remove_tower(&mut self, id: TowerId) -> Option<Tower>;

    /// Placed towers in insertion order.
    fn towers(&self) -> &[PlacedTower];

    /// Path obstacles towers may not overlap.
    fn path_obstacles(&self) -> &[PathObstacle];

    /// Captures both counters shown by the info panel.
    fn resources(&self) -> Resources {
        Resources::new(self.data(), self.lives())
    }
}
