#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Data Defence.
//!
//! The world owns the shared resources the shop and info panel operate on:
//! the currency counter, the lives counter, the placed-towers list and the
//! path obstacles. Systems reach it through the [`GameState`] capability or
//! the read-only [`query`] functions.

mod towers;

use data_defence_core::{
    Command, Data, GameState, Lives, PathObstacle, PlacedTower, Tower, TowerId, GAME_TITLE,
};

use self::towers::TowerRegistry;

const DEFAULT_DATA: Data = Data::new(100);
const DEFAULT_LIVES: Lives = Lives::new(20);

/// Represents the authoritative Data Defence world state.
#[derive(Debug)]
pub struct World {
    title: &'static str,
    data: Data,
    lives: Lives,
    towers: TowerRegistry,
    path_obstacles: Vec<PathObstacle>,
}

impl World {
    /// Creates a new world with default resources and no path.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: GAME_TITLE,
            data: DEFAULT_DATA,
            lives: DEFAULT_LIVES,
            towers: TowerRegistry::new(),
            path_obstacles: Vec::new(),
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world.
pub fn apply(world: &mut World, command: Command) {
    match command {
        Command::ConfigureResources { data, lives } => {
            world.data = data;
            world.lives = lives;
        }
        Command::ConfigurePath { obstacles } => {
            world.path_obstacles = obstacles;
        }
    }
}

impl GameState for World {
    fn data(&self) -> Data {
        self.data
    }

    fn lives(&self) -> Lives {
        self.lives
    }

    fn spend_data(&mut self, price: Data) -> bool {
        match self.data.checked_sub(price) {
            Some(remaining) => {
                self.data = remaining;
                true
            }
            None => false,
        }
    }

    fn add_tower(&mut self, tower: Tower) -> TowerId {
        self.towers.insert(tower)
    }

    fn tower_mut(&mut self, id: TowerId) -> Option<&mut Tower> {
        self.towers.get_mut(id)
    }

    fn remove_tower(&mut self, id: TowerId) -> Option<Tower> {
        self.towers.remove(id)
    }

    fn towers(&self) -> &[PlacedTower] {
        self.towers.as_slice()
    }

    fn path_obstacles(&self) -> &[PathObstacle] {
        &self.path_obstacles
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use data_defence_core::{Data, Lives, PathObstacle, PlacedTower, Tower, TowerId};

    use super::World;

    /// Retrieves the title hosts may display to players.
    #[must_use]
    pub fn title(world: &World) -> &'static str {
        world.title
    }

    /// Currency currently available to the player.
    #[must_use]
    pub fn data(world: &World) -> Data {
        world.data
    }

    /// Lives the player has left.
    #[must_use]
    pub fn lives(world: &World) -> Lives {
        world.lives
    }

    /// Placed towers in insertion order, including a tower that is being dragged.
    #[must_use]
    pub fn towers(world: &World) -> &[PlacedTower] {
        world.towers.as_slice()
    }

    /// Looks up a single placed tower.
    #[must_use]
    pub fn tower(world: &World, id: TowerId) -> Option<&Tower> {
        world.towers.get(id)
    }

    /// Path obstacles towers may not overlap.
    #[must_use]
    pub fn path_obstacles(world: &World) -> &[PathObstacle] {
        &world.path_obstacles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_defence_core::{Hitbox, TowerKind};
    use glam::Vec2;

    #[test]
    fn new_world_uses_default_resources() {
        let world = World::new();
        assert_eq!(query::data(&world), DEFAULT_DATA);
        assert_eq!(query::lives(&world), DEFAULT_LIVES);
        assert!(query::towers(&world).is_empty());
        assert!(query::path_obstacles(&world).is_empty());
        assert_eq!(query::title(&world), GAME_TITLE);
    }

    #[test]
    fn apply_configures_resources_and_path() {
        let mut world = World::new();
        apply(
            &mut world,
            Command::ConfigureResources {
                data: Data::new(50),
                lives: Lives::new(3),
            },
        );
        let obstacle = PathObstacle::new(
            Vec2::new(10.0, 10.0),
            Hitbox::Rect {
                width: 5.0,
                height: 5.0,
            },
        );
        apply(
            &mut world,
            Command::ConfigurePath {
                obstacles: vec![obstacle],
            },
        );

        assert_eq!(world.resources().data, Data::new(50));
        assert_eq!(world.resources().lives, Lives::new(3));
        assert_eq!(query::path_obstacles(&world), &[obstacle]);
    }

    #[test]
    fn spend_data_refuses_to_overdraw() {
        let mut world = World::new();
        apply(
            &mut world,
            Command::ConfigureResources {
                data: Data::new(10),
                lives: Lives::new(1),
            },
        );

        assert!(!world.spend_data(Data::new(30)));
        assert_eq!(query::data(&world), Data::new(10));
        assert!(world.spend_data(Data::new(10)));
        assert_eq!(query::data(&world), Data::new(0));
    }

    #[test]
    fn towers_can_be_added_mutated_and_removed() {
        let mut world = World::new();
        let id = world.add_tower(Tower::new(
            TowerKind::Rapid,
            Hitbox::Circle { radius: 6.0 },
        ));

        world
            .tower_mut(id)
            .expect("tower was just added")
            .set_position(Vec2::new(3.0, 4.0));
        assert_eq!(
            query::tower(&world, id).map(Tower::position),
            Some(Vec2::new(3.0, 4.0))
        );

        assert!(world.remove_tower(id).is_some());
        assert!(query::tower(&world, id).is_none());
        assert!(GameState::towers(&world).is_empty());
    }
}
