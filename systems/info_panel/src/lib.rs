#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Info panel system that mirrors the player's resources and shop activity.
//!
//! The panel sits on the right edge of the window. It shows the current data
//! and lives counters, a short-lived warning line, and the details of the
//! shop item the player last pressed on. It never touches the world; it
//! learns about the shop through [`ShopEvent`]s and reads the counters from a
//! [`Resources`] snapshot when asked for its labels.

mod warning;

pub use self::warning::{WarningMessage, WARNING_LIFETIME_FRAMES};

use data_defence_core::{Data, Resources, ShopEvent, ShopItemId};
use glam::Vec2;

/// Warning raised when the player presses on an item they cannot afford.
pub const INSUFFICIENT_DATA_WARNING: &str = "Not enough data to buy";

/// Width of the panel, measured from the right edge of the window.
pub const PANEL_WIDTH: f32 = 256.0;

/// Distance from the top of the window to the stats box.
pub const STATS_BOX_TOP: f32 = 118.0;

/// Horizontal inset of both boxes from the panel's left edge.
pub const BOX_MARGIN: f32 = 11.0;

/// Vertical distance between the stats box and the info box.
pub const INFO_BOX_GAP: f32 = 132.0;

/// Offset of the first label from the top-left corner of its box.
pub const LABEL_OFFSET: Vec2 = Vec2::new(16.0, 48.0);

/// Width the item description is wrapped to.
pub const DESCRIPTION_WRAP_WIDTH: f32 = 192.0;

/// Multiplier applied to the panel's base font sizes.
pub const FONT_SCALE: f32 = 4.0;

const HEADING_FONT_SIZE: f32 = 5.0 * FONT_SCALE;
const BODY_FONT_SIZE: f32 = 4.0 * FONT_SCALE;
const DETAIL_FONT_SIZE: f32 = 3.0 * FONT_SCALE;
const WARNING_DROP: f32 = 175.0;

/// Semantic colour of a label; backends map tones to concrete colours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelTone {
    /// Regular white text.
    Normal,
    /// Red warning text.
    Warning,
    /// Price the player can pay (green).
    Affordable,
    /// Price the player cannot pay (red).
    Unaffordable,
}

/// Horizontal alignment of a label relative to its position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelAlign {
    /// The position marks the left edge of the text.
    Left,
    /// The position marks the horizontal centre of the text.
    Center,
}

/// Text the panel wants drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PanelLabel {
    /// Text content.
    pub text: String,
    /// Anchor point in window coordinates, y pointing down.
    pub position: Vec2,
    /// Font size in window units.
    pub font_size: f32,
    /// Colour role of the text.
    pub tone: LabelTone,
    /// How the text is aligned around `position`.
    pub align: LabelAlign,
    /// Maximum line width, when the text should be wrapped.
    pub wrap_width: Option<f32>,
}

impl PanelLabel {
    fn left(text: String, position: Vec2, font_size: f32, tone: LabelTone) -> Self {
        Self {
            text,
            position,
            font_size,
            tone,
            align: LabelAlign::Left,
            wrap_width: None,
        }
    }

    fn centered(text: String, position: Vec2, font_size: f32, tone: LabelTone) -> Self {
        Self {
            text,
            position,
            font_size,
            tone,
            align: LabelAlign::Center,
            wrap_width: None,
        }
    }
}

/// Details of a shop item as shown in the info box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemDetails {
    /// Display name.
    pub name: String,
    /// Longer description, wrapped when drawn.
    pub description: String,
    /// Purchase price.
    pub price: Data,
}

/// Side panel state: warning line and inspected item.
#[derive(Clone, Debug)]
pub struct InfoPanel {
    top_left: Vec2,
    size: Vec2,
    warning: WarningMessage,
    inspected: Option<ItemDetails>,
}

impl InfoPanel {
    /// Creates a panel docked to the right edge of a window of `window_size`.
    #[must_use]
    pub fn new(window_size: Vec2) -> Self {
        Self {
            top_left: Vec2::new(window_size.x - PANEL_WIDTH, 0.0),
            size: Vec2::new(PANEL_WIDTH, window_size.y),
            warning: WarningMessage::new(),
            inspected: None,
        }
    }

    /// Top-left corner of the panel background.
    #[must_use]
    pub const fn top_left(&self) -> Vec2 {
        self.top_left
    }

    /// Size of the panel background.
    #[must_use]
    pub const fn size(&self) -> Vec2 {
        self.size
    }

    /// Warning line state.
    #[must_use]
    pub const fn warning(&self) -> &WarningMessage {
        &self.warning
    }

    /// Item currently shown in the info box, if any.
    #[must_use]
    pub const fn inspected(&self) -> Option<&ItemDetails> {
        self.inspected.as_ref()
    }

    /// Shows `text` on the warning line and restarts its countdown.
    pub fn set_warning(&mut self, text: impl Into<String>) {
        self.warning.set(text);
    }

    /// Advances the warning countdown by one frame.
    pub fn tick(&mut self) {
        self.warning.tick();
    }

    /// Updates the panel from the events the shop emitted this frame.
    ///
    /// `describe` resolves an inspected item to the details shown in the info
    /// box. Items it cannot resolve leave the previous selection in place.
    pub fn handle<F>(&mut self, events: &[ShopEvent], mut describe: F)
    where
        F: FnMut(ShopItemId) -> Option<ItemDetails>,
    {
        for event in events {
            match *event {
                ShopEvent::ItemInspected { item } => match describe(item) {
                    Some(details) => self.inspected = Some(details),
                    None => {
                        tracing::warn!(item = item.index(), "inspected item has no details");
                    }
                },
                ShopEvent::PurchaseRejected {
                    item,
                    price,
                    available,
                } => {
                    tracing::debug!(
                        item = item.index(),
                        price = price.get(),
                        available = available.get(),
                        "purchase rejected"
                    );
                    self.set_warning(INSUFFICIENT_DATA_WARNING);
                }
                ShopEvent::HoldStarted { .. }
                | ShopEvent::PlacementCommitted { .. }
                | ShopEvent::PlacementCancelled { .. } => {}
            }
        }
    }

    /// Appends the labels describing the panel for the provided resources.
    pub fn view(&self, resources: Resources, out: &mut Vec<PanelLabel>) {
        let stats_box = Vec2::new(self.top_left.x + BOX_MARGIN, self.top_left.y + STATS_BOX_TOP);
        let info_box = stats_box + Vec2::new(0.0, INFO_BOX_GAP);
        let middle = self.top_left.x + self.size.x * 0.5;

        out.push(PanelLabel::left(
            format!("Data: {}", resources.data.get()),
            stats_box + LABEL_OFFSET,
            HEADING_FONT_SIZE,
            LabelTone::Normal,
        ));
        out.push(PanelLabel::left(
            format!("Lives: {}", resources.lives.get()),
            stats_box
                + Vec2::new(
                    LABEL_OFFSET.x,
                    LABEL_OFFSET.y * 2.0 + 2.0 * FONT_SCALE,
                ),
            HEADING_FONT_SIZE,
            LabelTone::Normal,
        ));

        if !self.warning.text().is_empty() {
            out.push(PanelLabel::left(
                self.warning.text().to_owned(),
                info_box + Vec2::new(LABEL_OFFSET.x, LABEL_OFFSET.y + WARNING_DROP),
                DETAIL_FONT_SIZE,
                LabelTone::Warning,
            ));
        }

        let Some(item) = &self.inspected else {
            return;
        };

        out.push(PanelLabel::centered(
            item.name.clone(),
            Vec2::new(middle, info_box.y + LABEL_OFFSET.y),
            HEADING_FONT_SIZE,
            LabelTone::Normal,
        ));
        out.push(PanelLabel {
            wrap_width: Some(DESCRIPTION_WRAP_WIDTH),
            ..PanelLabel::centered(
                item.description.clone(),
                Vec2::new(middle, info_box.y + LABEL_OFFSET.y * 2.0),
                BODY_FONT_SIZE,
                LabelTone::Normal,
            )
        });

        let tone = if resources.data.covers(item.price) {
            LabelTone::Affordable
        } else {
            LabelTone::Unaffordable
        };
        out.push(PanelLabel::centered(
            format!("{} Data", item.price.get()),
            Vec2::new(middle, info_box.y + LABEL_OFFSET.y * 3.0),
            DETAIL_FONT_SIZE,
            tone,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_defence_core::Lives;

    const WINDOW: Vec2 = Vec2::new(1536.0, 896.0);

    fn firewall() -> ItemDetails {
        ItemDetails {
            name: "Firewall".to_owned(),
            description: "Blocks packets.".to_owned(),
            price: Data::new(30),
        }
    }

    fn labels(panel: &InfoPanel, data: u32) -> Vec<PanelLabel> {
        let mut out = Vec::new();
        panel.view(Resources::new(Data::new(data), Lives::new(7)), &mut out);
        out
    }

    #[test]
    fn panel_is_docked_to_the_right_edge() {
        let panel = InfoPanel::new(WINDOW);
        assert_eq!(panel.top_left(), Vec2::new(1280.0, 0.0));
        assert_eq!(panel.size(), Vec2::new(PANEL_WIDTH, 896.0));
    }

    #[test]
    fn idle_panel_shows_only_counters() {
        let panel = InfoPanel::new(WINDOW);
        let out = labels(&panel, 42);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].text, "Data: 42");
        assert_eq!(out[0].position, Vec2::new(1280.0 + 11.0 + 16.0, 118.0 + 48.0));
        assert_eq!(out[0].font_size, 20.0);
        assert_eq!(out[1].text, "Lives: 7");
        assert_eq!(out[1].position.y, 118.0 + 104.0);
        assert!(out.iter().all(|label| label.tone == LabelTone::Normal));
    }

    #[test]
    fn warning_line_is_red_and_small() {
        let mut panel = InfoPanel::new(WINDOW);
        panel.set_warning("nope");
        let out = labels(&panel, 0);

        let warning = out
            .iter()
            .find(|label| label.text == "nope")
            .expect("warning label is shown");
        assert_eq!(warning.tone, LabelTone::Warning);
        assert_eq!(warning.font_size, 12.0);
        assert_eq!(warning.align, LabelAlign::Left);
    }

    #[test]
    fn inspected_item_is_centred_and_priced() {
        let mut panel = InfoPanel::new(WINDOW);
        panel.handle(
            &[ShopEvent::ItemInspected {
                item: ShopItemId::new(0),
            }],
            |_| Some(firewall()),
        );

        let affordable = labels(&panel, 30);
        assert_eq!(affordable.len(), 5);
        let name = &affordable[2];
        assert_eq!(name.text, "Firewall");
        assert_eq!(name.align, LabelAlign::Center);
        assert_eq!(name.position.x, 1280.0 + 128.0);
        assert_eq!(affordable[3].wrap_width, Some(DESCRIPTION_WRAP_WIDTH));
        assert_eq!(affordable[3].font_size, 16.0);
        assert_eq!(affordable[4].text, "30 Data");
        assert_eq!(affordable[4].tone, LabelTone::Affordable);

        let unaffordable = labels(&panel, 29);
        assert_eq!(unaffordable[4].tone, LabelTone::Unaffordable);
    }

    #[test]
    fn rejected_purchase_raises_insufficient_data_warning() {
        let mut panel = InfoPanel::new(WINDOW);
        panel.handle(
            &[
                ShopEvent::ItemInspected {
                    item: ShopItemId::new(1),
                },
                ShopEvent::PurchaseRejected {
                    item: ShopItemId::new(1),
                    price: Data::new(30),
                    available: Data::new(10),
                },
            ],
            |_| Some(firewall()),
        );

        assert_eq!(panel.warning().text(), INSUFFICIENT_DATA_WARNING);
        assert_eq!(panel.inspected(), Some(&firewall()));
    }

    #[test]
    fn unknown_item_keeps_previous_selection() {
        let mut panel = InfoPanel::new(WINDOW);
        let inspect = |index| ShopEvent::ItemInspected {
            item: ShopItemId::new(index),
        };
        panel.handle(&[inspect(0)], |_| Some(firewall()));
        panel.handle(&[inspect(9)], |_| None);

        assert_eq!(panel.inspected(), Some(&firewall()));
    }
}
