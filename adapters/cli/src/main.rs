#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Data Defence shop and info panel.

mod game;
mod map;

use std::{fs, path::Path, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use data_defence_core::{Command, Data, Lives};
use data_defence_rendering::{Color, Presentation, RenderingBackend};
use data_defence_rendering_macroquad::MacroquadBackend;
use data_defence_system_shop::Catalog;
use data_defence_world::{self as world, query, World};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use self::game::Game;

/// Catalog used when `--catalog` is not provided.
pub(crate) const DEFAULT_CATALOG: &str = include_str!("../../../assets/catalog.toml");

const WINDOW_SIZE: Vec2 = Vec2::new(1536.0, 896.0);
const CLEAR_COLOR: Color = Color::from_rgb_u8(28, 92, 44);

/// Command-line arguments for the Data Defence binary.
#[derive(Parser, Debug)]
#[command(name = "data-defence")]
#[command(about = "Buy towers from the shop and drag them onto the map")]
struct Args {
    /// Shop catalog TOML file; the built-in catalog is used when omitted
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Data the player starts with
    #[arg(long, default_value_t = 100)]
    data: u32,

    /// Lives the player starts with
    #[arg(long, default_value_t = 20)]
    lives: u32,

    /// Synchronise presentation with the display refresh rate (default)
    #[arg(long, overrides_with = "no_vsync")]
    vsync: bool,

    /// Render frames as fast as possible
    #[arg(long, overrides_with = "vsync")]
    no_vsync: bool,

    /// Log frame timing once per second
    #[arg(long)]
    show_fps: bool,
}

impl Args {
    fn vsync_enabled(&self) -> bool {
        self.vsync || !self.no_vsync
    }
}

/// Entry point for the Data Defence command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let catalog = load_catalog(args.catalog.as_deref())?;
    tracing::info!(items = catalog.len(), "loaded shop catalog");

    let mut state = World::new();
    world::apply(
        &mut state,
        Command::ConfigureResources {
            data: Data::new(args.data),
            lives: Lives::new(args.lives),
        },
    );
    world::apply(
        &mut state,
        Command::ConfigurePath {
            obstacles: map::default_path(),
        },
    );

    let mut game = Game::new(state, catalog, WINDOW_SIZE);
    let presentation = Presentation::new(
        query::title(game.world()),
        WINDOW_SIZE,
        CLEAR_COLOR,
        game.scene(),
    )?;

    MacroquadBackend::new()
        .with_vsync(args.vsync_enabled())
        .with_show_fps(args.show_fps)
        .run(presentation, move |_dt, input, scene| {
            game.frame(&input, scene);
        })
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Catalog::from_toml_str(DEFAULT_CATALOG).context("built-in catalog is invalid");
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    Catalog::from_toml_str(&contents)
        .with_context(|| format!("failed to parse catalog {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_catalog_parses() {
        let catalog = load_catalog(None).expect("built-in catalog should parse");
        let names: Vec<&str> = catalog.items().iter().map(|item| item.name()).collect();
        assert_eq!(names, vec!["Firewall", "Scanner", "Honeypot"]);
    }

    #[test]
    fn missing_catalog_file_reports_path() {
        let error = load_catalog(Some(Path::new("does/not/exist.toml")))
            .expect_err("missing file must fail");
        assert!(format!("{error:#}").contains("does/not/exist.toml"));
    }

    #[test]
    fn vsync_defaults_on_and_last_flag_wins() {
        let parse = |args: &[&str]| {
            Args::parse_from(std::iter::once("data-defence").chain(args.iter().copied()))
        };

        assert!(parse(&[]).vsync_enabled());
        assert!(!parse(&["--no-vsync"]).vsync_enabled());
        assert!(parse(&["--no-vsync", "--vsync"]).vsync_enabled());

        let args = parse(&["--data", "50", "--lives", "3", "--show-fps"]);
        assert_eq!((args.data, args.lives, args.show_fps), (50, 3, true));
        assert!(args.catalog.is_none());
    }
}
