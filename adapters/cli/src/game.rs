//! Frame wiring between pointer input, the shop, the info panel and the scene.

use data_defence_core::{GameState, ShopEvent, ShopItemId};
use data_defence_rendering::{
    Color, FrameInput, PanelPresentation, PointerEvent, Scene, SceneTower, ShopBarPresentation,
    ShopIconPresentation, TextAnchor, TextLabel,
};
use data_defence_system_info_panel::{InfoPanel, ItemDetails, LabelAlign, LabelTone, PanelLabel};
use data_defence_system_shop::{Catalog, Shop, FIRST_ITEM_OFFSET, SHOP_BAR_HEIGHT, SHOP_BAR_WIDTH};
use data_defence_world::{query, World};
use glam::Vec2;

const PATH_COLOR: Color = Color::from_rgb_u8(92, 72, 48);
const SHOP_COLOR: Color = Color::from_rgb_u8(24, 48, 32);
const PANEL_COLOR: Color = Color::from_rgb_u8(16, 24, 72);

/// Host-side state driven once per rendered frame.
#[derive(Debug)]
pub(crate) struct Game {
    world: World,
    shop: Shop,
    panel: InfoPanel,
    events: Vec<ShopEvent>,
    labels: Vec<PanelLabel>,
}

impl Game {
    /// Lays out the shop along the bottom edge and the panel along the right edge.
    pub(crate) fn new(world: World, catalog: Catalog, window_size: Vec2) -> Self {
        let anchor = Vec2::new(SHOP_BAR_WIDTH * 0.5, window_size.y - FIRST_ITEM_OFFSET);
        Self {
            world,
            shop: Shop::new(catalog, anchor),
            panel: InfoPanel::new(window_size),
            events: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Routes this frame's pointer events and refreshes `scene`.
    pub(crate) fn frame(&mut self, input: &FrameInput, scene: &mut Scene) {
        self.events.clear();
        for event in &input.pointer_events {
            match *event {
                PointerEvent::Pressed { position } => {
                    self.shop
                        .on_pointer_down(position, &mut self.world, &mut self.events);
                }
                PointerEvent::Dragged { position, delta } => {
                    self.shop.on_pointer_drag(position, delta, &mut self.world);
                }
                PointerEvent::Released { position } => {
                    self.shop
                        .on_pointer_up(position, &mut self.world, &mut self.events);
                }
            }
        }

        let shop = &self.shop;
        self.panel.handle(&self.events, |id| describe_item(shop, id));
        self.panel.tick();
        self.populate_scene(scene);
    }

    /// Builds a scene describing the current state.
    pub(crate) fn scene(&mut self) -> Scene {
        let mut scene = Scene {
            obstacles: Vec::new(),
            path_color: PATH_COLOR,
            towers: Vec::new(),
            shop: ShopBarPresentation {
                center: self.shop.background_anchor(),
                size: Vec2::new(SHOP_BAR_WIDTH, SHOP_BAR_HEIGHT),
                color: SHOP_COLOR,
                items: Vec::new(),
            },
            panel: PanelPresentation {
                top_left: self.panel.top_left(),
                size: self.panel.size(),
                color: PANEL_COLOR,
                labels: Vec::new(),
            },
        };
        self.populate_scene(&mut scene);
        scene
    }

    fn populate_scene(&mut self, scene: &mut Scene) {
        scene.obstacles.clear();
        scene
            .obstacles
            .extend_from_slice(query::path_obstacles(&self.world));

        scene.towers.clear();
        scene
            .towers
            .extend(query::towers(&self.world).iter().map(|placed| SceneTower {
                id: placed.id,
                kind: placed.tower.kind(),
                position: placed.tower.position(),
                hitbox: placed.tower.hitbox(),
                selected: placed.tower.is_selected(),
                highlight: placed.tower.highlight(),
            }));

        scene.shop.items.clear();
        scene
            .shop
            .items
            .extend(self.shop.items().iter().map(|item| ShopIconPresentation {
                position: item.position(),
                size: item.icon_size(),
                kind: item.template().tower().kind(),
            }));

        self.labels.clear();
        self.panel.view(self.world.resources(), &mut self.labels);
        scene.panel.labels.clear();
        scene
            .panel
            .labels
            .extend(self.labels.drain(..).map(to_text_label));
    }
}

fn describe_item(shop: &Shop, id: ShopItemId) -> Option<ItemDetails> {
    let template = shop.item(id)?.template();
    Some(ItemDetails {
        name: template.name().to_owned(),
        description: template.description().to_owned(),
        price: template.price(),
    })
}

fn to_text_label(label: PanelLabel) -> TextLabel {
    TextLabel {
        text: label.text,
        position: label.position,
        font_size: label.font_size,
        color: tone_color(label.tone),
        anchor: match label.align {
            LabelAlign::Left => TextAnchor::Left,
            LabelAlign::Center => TextAnchor::Center,
        },
        wrap_width: label.wrap_width,
    }
}

fn tone_color(tone: LabelTone) -> Color {
    match tone {
        LabelTone::Normal => Color::WHITE,
        LabelTone::Warning | LabelTone::Unaffordable => Color::RED,
        LabelTone::Affordable => Color::GREEN,
    }
}
