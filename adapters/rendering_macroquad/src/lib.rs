#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Data Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment, so
//! the adapter depends on macroquad without its default `audio` feature.
//!
//! Every frame the adapter polls the left mouse button, turns it into
//! [`PointerEvent`](data_defence_rendering::PointerEvent)s, hands them to the
//! host's update closure and then draws the scene in window coordinates.

use anyhow::Result;
use data_defence_core::{Hitbox, PlacementHighlight, TowerKind};
use data_defence_rendering::{
    wrap_text, Color, FrameInput, PanelPresentation, PointerTracker, Presentation,
    RenderingBackend, Scene, SceneTower, ShopBarPresentation, TextAnchor, TextLabel,
};
use glam::Vec2;
use macroquad::input::{
    is_key_pressed, is_mouse_button_down, mouse_position, KeyCode, MouseButton,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

const OUTLINE_THICKNESS: f32 = 3.0;
const LINE_SPACING: f32 = 1.2;

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration, render: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.render_accum += render;

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            let Some(removed) = self.frame_times.pop_front() else {
                break;
            };
            self.window_duration = self.window_duration.saturating_sub(removed);
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let avg_render = self.render_accum / self.frames.max(1);

        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.render_accum = Duration::ZERO;

        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_render,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            window_size,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_size.x.round() as i32,
            window_height: window_size.y.round() as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut pointer = PointerTracker::new();
            let mut fps_counter = FpsCounter::default();

            loop {
                if KeyboardShortcuts::poll().quit_requested {
                    tracing::info!("quit requested");
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(&mut pointer);

                update_scene(frame_dt, frame_input, &mut scene);

                let render_start = Instant::now();
                macroquad::window::clear_background(background);
                draw_obstacles(&scene);
                draw_towers(&scene.towers);
                draw_shop_bar(&scene.shop);
                draw_panel(&scene.panel);
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(frame_dt, render_duration);
                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_render,
                    }) = fps_metrics
                    {
                        tracing::info!(
                            fps = per_second,
                            fps_10s = trailing_ten_seconds,
                            render_ms = avg_render.as_secs_f64() * 1_000.0,
                            "frame timing"
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input(pointer: &mut PointerTracker) -> FrameInput {
    let (x, y) = mouse_position();
    let cursor = Vec2::new(x, y);
    let mut pointer_events = Vec::new();
    pointer.update(
        cursor,
        is_mouse_button_down(MouseButton::Left),
        &mut pointer_events,
    );

    FrameInput {
        cursor: Some(cursor),
        pointer_events,
    }
}

fn draw_obstacles(scene: &Scene) {
    let color = to_macroquad_color(scene.path_color);
    for obstacle in &scene.obstacles {
        fill_hitbox(obstacle.center, obstacle.hitbox, color);
    }
}

fn draw_towers(towers: &[SceneTower]) {
    for tower in towers {
        let mut fill = tower_fill(tower.kind);
        if tower.selected {
            fill = fill.lighten(0.35);
        }
        fill_hitbox(tower.position, tower.hitbox, to_macroquad_color(fill));

        if let Some(highlight) = tower.highlight {
            outline_hitbox(
                tower.position,
                tower.hitbox,
                to_macroquad_color(highlight_color(highlight)),
            );
        }
    }
}

fn draw_shop_bar(shop: &ShopBarPresentation) {
    let top_left = shop.center - shop.size * 0.5;
    macroquad::shapes::draw_rectangle(
        top_left.x,
        top_left.y,
        shop.size.x,
        shop.size.y,
        to_macroquad_color(shop.color),
    );

    for icon in &shop.items {
        let corner = icon.position - icon.size * 0.5;
        macroquad::shapes::draw_rectangle(
            corner.x,
            corner.y,
            icon.size.x,
            icon.size.y,
            to_macroquad_color(tower_fill(icon.kind)),
        );
        macroquad::shapes::draw_rectangle_lines(
            corner.x,
            corner.y,
            icon.size.x,
            icon.size.y,
            2.0,
            to_macroquad_color(Color::WHITE),
        );
    }
}

fn draw_panel(panel: &PanelPresentation) {
    macroquad::shapes::draw_rectangle(
        panel.top_left.x,
        panel.top_left.y,
        panel.size.x,
        panel.size.y,
        to_macroquad_color(panel.color),
    );

    for label in &panel.labels {
        let font_size = label.font_size.max(1.0).round() as u16;
        let measure =
            |line: &str| macroquad::text::measure_text(line, None, font_size, 1.0).width;
        for (line, origin) in layout_label(label, measure) {
            let _ = macroquad::text::draw_text(
                &line,
                origin.x,
                origin.y,
                label.font_size,
                to_macroquad_color(label.color),
            );
        }
    }
}

/// Splits a label into lines and computes the baseline origin of each.
fn layout_label<M>(label: &TextLabel, mut measure: M) -> Vec<(String, Vec2)>
where
    M: FnMut(&str) -> f32,
{
    let lines = match label.wrap_width {
        Some(width) => wrap_text(&label.text, width, &mut measure),
        None => vec![label.text.clone()],
    };

    lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let x = match label.anchor {
                TextAnchor::Left => label.position.x,
                TextAnchor::Center => label.position.x - measure(&line) * 0.5,
            };
            let y = label.position.y + index as f32 * label.font_size * LINE_SPACING;
            (line, Vec2::new(x, y))
        })
        .collect()
}

fn tower_fill(kind: TowerKind) -> Color {
    match kind {
        TowerKind::Basic => Color::from_rgb_u8(64, 160, 255),
        TowerKind::Rapid => Color::from_rgb_u8(255, 200, 40),
        TowerKind::Heavy => Color::from_rgb_u8(170, 80, 220),
    }
}

fn highlight_color(highlight: PlacementHighlight) -> Color {
    match highlight {
        PlacementHighlight::Placeable => Color::GREEN,
        PlacementHighlight::NotPlaceable => Color::RED,
    }
}

fn fill_hitbox(center: Vec2, hitbox: Hitbox, color: macroquad::color::Color) {
    match hitbox {
        Hitbox::Circle { radius } => {
            macroquad::shapes::draw_circle(center.x, center.y, radius, color);
        }
        Hitbox::Rect { width, height } => {
            macroquad::shapes::draw_rectangle(
                center.x - width * 0.5,
                center.y - height * 0.5,
                width,
                height,
                color,
            );
        }
    }
}

fn outline_hitbox(center: Vec2, hitbox: Hitbox, color: macroquad::color::Color) {
    match hitbox {
        Hitbox::Circle { radius } => {
            macroquad::shapes::draw_circle_lines(
                center.x,
                center.y,
                radius,
                OUTLINE_THICKNESS,
                color,
            );
        }
        Hitbox::Rect { width, height } => {
            macroquad::shapes::draw_rectangle_lines(
                center.x - width * 0.5,
                center.y - height * 0.5,
                width,
                height,
                OUTLINE_THICKNESS,
                color,
            );
        }
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monospace(text: &str) -> f32 {
        text.chars().count() as f32 * 8.0
    }

    fn label(text: &str, anchor: TextAnchor, wrap_width: Option<f32>) -> TextLabel {
        TextLabel {
            text: text.to_owned(),
            position: Vec2::new(100.0, 50.0),
            font_size: 10.0,
            color: Color::WHITE,
            anchor,
            wrap_width,
        }
    }

    #[test]
    fn left_anchored_label_starts_at_position() {
        let lines = layout_label(&label("Data: 100", TextAnchor::Left, None), monospace);
        assert_eq!(lines, vec![("Data: 100".to_owned(), Vec2::new(100.0, 50.0))]);
    }

    #[test]
    fn centered_wrapped_label_centres_every_line() {
        let lines = layout_label(
            &label("aaaa bb cccc", TextAnchor::Center, Some(64.0)),
            monospace,
        );

        let texts: Vec<&str> = lines.iter().map(|(line, _)| line.as_str()).collect();
        assert_eq!(texts, vec!["aaaa bb", "cccc"]);
        assert_eq!(lines[0].1, Vec2::new(72.0, 50.0));
        assert_eq!(lines[1].1.x, 84.0);
        assert!((lines[1].1.y - 62.0).abs() < 1e-3, "second line sits one line height lower");
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let frame = Duration::from_millis(100);
        let render = Duration::from_millis(4);

        for _ in 0..9 {
            assert!(counter.record_frame(frame, render).is_none());
        }
        let metrics = counter
            .record_frame(frame, render)
            .expect("one second elapsed");

        assert!((metrics.per_second - 10.0).abs() < 1e-3);
        assert!((metrics.trailing_ten_seconds - 10.0).abs() < 1e-3);
        assert_eq!(metrics.avg_render, render);
        assert!(counter.record_frame(frame, render).is_none(), "counter resets");
    }

    #[test]
    fn highlight_colours_match_placement_verdict() {
        assert_eq!(highlight_color(PlacementHighlight::Placeable), Color::GREEN);
        assert_eq!(highlight_color(PlacementHighlight::NotPlaceable), Color::RED);
        assert_ne!(tower_fill(TowerKind::Basic), tower_fill(TowerKind::Heavy));
    }
}
