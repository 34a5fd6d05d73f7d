#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shop system that turns pointer input into tower purchases.
//!
//! The shop lays out a fixed row of purchasable items, starts a drag session
//! when the player presses on an affordable item, gives live placement
//! feedback while the tower is dragged, and validates the drop against path
//! obstacles and other towers on release. All shared state is reached through
//! the [`GameState`] capability; outcomes are reported as [`ShopEvent`]s.

mod catalog;

pub use self::catalog::{
    Catalog, CatalogError, ShopItemTemplate, DEFAULT_ITEM_SCALE, SUPPORTED_CATALOG_VERSION,
};

use data_defence_core::{
    Data, GameState, Hitbox, PlacementHighlight, ShopEvent, ShopItemId, TowerId,
};
use glam::Vec2;

/// Horizontal distance between the centres of neighbouring shop items.
pub const ITEM_SPACING: f32 = 112.0;

/// Horizontal distance from the bar's left edge to the first item's centre.
pub const FIRST_ITEM_OFFSET: f32 = 78.0;

/// Width of the shop bar background.
pub const SHOP_BAR_WIDTH: f32 = 1280.0;

/// Height of the shop bar background.
pub const SHOP_BAR_HEIGHT: f32 = 156.0;

/// Edge length of an item icon before its scale is applied.
pub const ICON_EDGE: f32 = 32.0;

/// Radius of the probe used to hit-test pointer presses against item icons.
pub const POINTER_PROBE_RADIUS: f32 = 4.0;

/// Catalog entry laid out on the shop bar.
#[derive(Clone, Debug, PartialEq)]
pub struct ShopItem {
    id: ShopItemId,
    template: ShopItemTemplate,
    position: Vec2,
}

impl ShopItem {
    /// Identifier of the item, matching its catalog position.
    #[must_use]
    pub const fn id(&self) -> ShopItemId {
        self.id
    }

    /// Template describing the item.
    #[must_use]
    pub const fn template(&self) -> &ShopItemTemplate {
        &self.template
    }

    /// Centre of the item's icon.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Size of the item's icon after scaling.
    #[must_use]
    pub fn icon_size(&self) -> Vec2 {
        Vec2::splat(ICON_EDGE * self.template.scale())
    }

    /// Reports whether a pointer press at `point` lands on the item's icon.
    #[must_use]
    pub fn is_hit(&self, point: Vec2) -> bool {
        let size = self.icon_size();
        Hitbox::Rect {
            width: size.x,
            height: size.y,
        }
        .contains_probe(self.position, point, POINTER_PROBE_RADIUS)
    }
}

/// Record of a purchased tower that is being dragged but not yet paid for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DragSession {
    item: ShopItemId,
    tower: TowerId,
    price: Data,
}

impl DragSession {
    /// Item the held tower was cloned from.
    #[must_use]
    pub const fn item(&self) -> ShopItemId {
        self.item
    }

    /// Identifier of the held tower in the placed-towers list.
    #[must_use]
    pub const fn tower(&self) -> TowerId {
        self.tower
    }

    /// Price recorded when the session started.
    #[must_use]
    pub const fn price(&self) -> Data {
        self.price
    }
}

/// Shop bar and its drag-and-drop state machine.
#[derive(Clone, Debug)]
pub struct Shop {
    items: Vec<ShopItem>,
    anchor: Vec2,
    holding: Option<DragSession>,
}

impl Shop {
    /// Lays out the catalog left-to-right on a bar centred at `anchor`.
    #[must_use]
    pub fn new(catalog: Catalog, anchor: Vec2) -> Self {
        let bar_left = anchor.x - SHOP_BAR_WIDTH * 0.5;
        let items = catalog
            .into_items()
            .into_iter()
            .enumerate()
            .map(|(index, template)| ShopItem {
                id: ShopItemId::new(index),
                template,
                position: Vec2::new(
                    bar_left + FIRST_ITEM_OFFSET + ITEM_SPACING * index as f32,
                    anchor.y,
                ),
            })
            .collect();

        Self {
            items,
            anchor,
            holding: None,
        }
    }

    /// Items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[ShopItem] {
        &self.items
    }

    /// Looks up an item by identifier.
    #[must_use]
    pub fn item(&self, id: ShopItemId) -> Option<&ShopItem> {
        self.items.get(id.index())
    }

    /// First item, in catalog order, whose icon is hit by a press at `point`.
    #[must_use]
    pub fn item_at(&self, point: Vec2) -> Option<&ShopItem> {
        self.items.iter().find(|item| item.is_hit(point))
    }

    /// Centre of the shop bar background.
    #[must_use]
    pub const fn background_anchor(&self) -> Vec2 {
        self.anchor
    }

    /// Active drag session, if the player is holding a tower.
    #[must_use]
    pub const fn session(&self) -> Option<DragSession> {
        self.holding
    }

    /// Whether the player is currently holding a tower.
    #[must_use]
    pub const fn is_holding(&self) -> bool {
        self.holding.is_some()
    }

    /// Handles a pointer press, starting a drag session on an affordable item.
    pub fn on_pointer_down<S>(&mut self, point: Vec2, state: &mut S, out: &mut Vec<ShopEvent>)
    where
        S: GameState + ?Sized,
    {
        if self.holding.is_some() {
            tracing::debug!(?point, "ignoring press while a tower is held");
            return;
        }

        let Some(item) = self.item_at(point) else {
            tracing::debug!(?point, "press did not hit a shop item");
            return;
        };

        let id = item.id;
        let price = item.template.price();
        out.push(ShopEvent::ItemInspected { item: id });

        let available = state.data();
        if !available.covers(price) {
            out.push(ShopEvent::PurchaseRejected {
                item: id,
                price,
                available,
            });
            return;
        }

        let mut tower = item.template.tower().clone();
        tower.set_position(point);
        tower.pick_up();
        let tower = state.add_tower(tower);

        self.holding = Some(DragSession {
            item: id,
            tower,
            price,
        });
        out.push(ShopEvent::HoldStarted { item: id, tower });
        tracing::debug!(item = id.index(), tower = tower.get(), "picked up tower");
    }

    /// Moves the held tower and refreshes its placement highlight.
    pub fn on_pointer_drag<S>(&mut self, point: Vec2, delta: Vec2, state: &mut S)
    where
        S: GameState + ?Sized,
    {
        let Some(session) = self.holding else {
            return;
        };

        let Some(blocked) = move_held_tower(state, session.tower, point) else {
            tracing::warn!(tower = session.tower.get(), "held tower vanished while dragging");
            self.holding = None;
            return;
        };

        let highlight = if blocked {
            PlacementHighlight::NotPlaceable
        } else {
            PlacementHighlight::Placeable
        };
        if let Some(tower) = state.tower_mut(session.tower) {
            tower.set_highlight(Some(highlight));
        }
        tracing::trace!(?point, ?delta, blocked, "dragged held tower");
    }

    /// Drops the held tower, committing or cancelling the purchase.
    pub fn on_pointer_up<S>(&mut self, point: Vec2, state: &mut S, out: &mut Vec<ShopEvent>)
    where
        S: GameState + ?Sized,
    {
        let Some(session) = self.holding.take() else {
            return;
        };
        let DragSession { item, tower, price } = session;

        let Some(blocked) = move_held_tower(state, tower, point) else {
            tracing::warn!(tower = tower.get(), "held tower vanished before release");
            return;
        };

        if blocked {
            let _ = state.remove_tower(tower);
            out.push(ShopEvent::PlacementCancelled { item, tower });
            tracing::info!(item = item.index(), "placement blocked, purchase cancelled");
            return;
        }

        if !state.spend_data(price) {
            let _ = state.remove_tower(tower);
            out.push(ShopEvent::PurchaseRejected {
                item,
                price,
                available: state.data(),
            });
            return;
        }

        if let Some(placed) = state.tower_mut(tower) {
            placed.finalize();
        }
        out.push(ShopEvent::PlacementCommitted { item, tower, price });
        tracing::info!(
            item = item.index(),
            tower = tower.get(),
            price = price.get(),
            "tower placed"
        );
    }
}

/// Moves the held tower to `point` and reports whether it collides.
///
/// Returns `None` when the tower is no longer in the placed-towers list.
fn move_held_tower<S>(state: &mut S, held: TowerId, point: Vec2) -> Option<bool>
where
    S: GameState + ?Sized,
{
    state.tower_mut(held)?.set_position(point);
    Some(placement_blocked(&*state, held))
}

/// Reports whether the held tower overlaps a path obstacle or any other placed tower.
fn placement_blocked<S>(state: &S, held: TowerId) -> bool
where
    S: GameState + ?Sized,
{
    let towers = state.towers();
    let Some(tower) = towers
        .iter()
        .find(|placed| placed.id == held)
        .map(|placed| &placed.tower)
    else {
        return true;
    };

    state
        .path_obstacles()
        .iter()
        .any(|obstacle| tower.overlaps_obstacle(obstacle))
        || towers
            .iter()
            .filter(|placed| placed.id != held)
            .any(|placed| tower.overlaps_tower(&placed.tower))
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_defence_core::{Tower, TowerKind};

    fn template(name: &str, price: u32) -> ShopItemTemplate {
        ShopItemTemplate::new(
            name,
            "test item",
            Data::new(price),
            Tower::new(TowerKind::Basic, Hitbox::Circle { radius: 16.0 }),
        )
    }

    fn three_item_shop(anchor: Vec2) -> Shop {
        Shop::new(
            Catalog::new(vec![
                template("first", 10),
                template("second", 20),
                template("third", 30),
            ]),
            anchor,
        )
    }

    #[test]
    fn items_are_laid_out_left_to_right_with_fixed_spacing() {
        let anchor = Vec2::new(SHOP_BAR_WIDTH * 0.5, 800.0);
        let shop = three_item_shop(anchor);

        let positions: Vec<Vec2> = shop.items().iter().map(ShopItem::position).collect();
        assert_eq!(
            positions,
            vec![
                Vec2::new(78.0, 800.0),
                Vec2::new(190.0, 800.0),
                Vec2::new(302.0, 800.0),
            ]
        );
        assert_eq!(shop.background_anchor(), anchor);
    }

    #[test]
    fn layout_is_relative_to_anchor() {
        let shop = three_item_shop(Vec2::new(SHOP_BAR_WIDTH * 0.5 + 100.0, 40.0));
        let first = shop.items()[0].position();
        let second = shop.items()[1].position();

        assert_eq!(first, Vec2::new(178.0, 40.0));
        assert_eq!(second.x - first.x, ITEM_SPACING);
    }

    #[test]
    fn item_ids_follow_catalog_order() {
        let shop = three_item_shop(Vec2::new(640.0, 0.0));
        for (index, item) in shop.items().iter().enumerate() {
            assert_eq!(item.id(), ShopItemId::new(index));
            assert_eq!(shop.item(item.id()), Some(item));
        }
        assert!(shop.item(ShopItemId::new(3)).is_none());
    }

    #[test]
    fn item_at_uses_probe_radius_around_icon() {
        let shop = three_item_shop(Vec2::new(640.0, 100.0));
        let first = shop.items()[0].position();
        let half_icon = ICON_EDGE * DEFAULT_ITEM_SCALE * 0.5;

        let edge_hit = first + Vec2::new(half_icon + POINTER_PROBE_RADIUS - 0.5, 0.0);
        assert_eq!(
            shop.item_at(edge_hit).map(ShopItem::id),
            Some(ShopItemId::new(0))
        );

        let gap = first + Vec2::new(ITEM_SPACING * 0.5, 0.0);
        assert!(shop.item_at(gap).is_none(), "gap between icons is not a hit");
    }

    #[test]
    fn overlapping_icons_resolve_to_first_catalog_entry() {
        let wide = template("wide", 10).with_scale(8.0);
        let shop = Shop::new(
            Catalog::new(vec![wide, template("narrow", 20)]),
            Vec2::new(640.0, 100.0),
        );
        let second = shop.items()[1].position();

        assert_eq!(
            shop.item_at(second).map(ShopItem::id),
            Some(ShopItemId::new(0)),
            "first match in catalog order wins"
        );
    }
}
