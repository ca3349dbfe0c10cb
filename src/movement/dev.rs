//! Movement domain: the test room used until real levels exist.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::hair::GrabSurface;
use crate::movement::{GameLayer, Ground, MovementTuning, TileGrid, Wall};

/// Spawns a static block whose edges sit on tile boundaries.
fn spawn_block(
    commands: &mut Commands,
    grid: &TileGrid,
    min_cell: IVec2,
    cells: IVec2,
    color: Color,
    layers: CollisionLayers,
) -> Entity {
    let size = cells.as_vec2() * grid.cell_size;
    let center = grid.cell_to_world(min_cell) + size * 0.5;
    commands
        .spawn((
            Sprite {
                color,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(center.extend(0.0)),
            RigidBody::Static,
            Collider::rectangle(size.x, size.y),
            layers,
        ))
        .id()
}

pub(crate) fn spawn_test_room(
    mut commands: Commands,
    grid: Res<TileGrid>,
    tuning: Res<MovementTuning>,
) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);
    let grab_color = Color::srgb(0.8, 0.6, 0.2);

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Hair]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Hair]);
    let grab_layers =
        CollisionLayers::new(GameLayer::GrabSurface, [GameLayer::Player, GameLayer::Hair]);

    // Ledges stay within a comfortable jump.
    let reachable = (tuning.boost_jump_height() * 0.8).floor().max(1.0) as i32;

    // Floor: top at y = 0
    let floor = spawn_block(
        &mut commands,
        &grid,
        IVec2::new(-12, -1),
        IVec2::new(24, 1),
        ground_color,
        ground_layers,
    );
    commands.entity(floor).insert(Ground);

    // Side walls
    for x in [-13, 12] {
        let wall = spawn_block(
            &mut commands,
            &grid,
            IVec2::new(x, -1),
            IVec2::new(1, 14),
            wall_color,
            wall_layers,
        );
        commands.entity(wall).insert(Wall);
    }

    // Ledges for safe-edge practice
    for (x, width, height) in [(-8, 3, reachable), (4, 2, reachable), (7, 3, reachable * 2)] {
        let ledge = spawn_block(
            &mut commands,
            &grid,
            IVec2::new(x, height - 1),
            IVec2::new(width, 1),
            platform_color,
            ground_layers,
        );
        commands.entity(ledge).insert(Ground);
    }

    // Grab surfaces: a ceiling beam and a hanging hook
    for (min_cell, cells) in [
        (IVec2::new(-6, 5), IVec2::new(8, 1)),
        (IVec2::new(5, 4), IVec2::new(1, 1)),
    ] {
        let surface = spawn_block(
            &mut commands,
            &grid,
            min_cell,
            cells,
            grab_color,
            grab_layers,
        );
        commands.entity(surface).insert(GrabSurface);
    }

    info!("Test room spawned (ledge step {} tiles)", reachable);
}
