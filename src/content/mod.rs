//! Content domain: tunables loaded from `assets/data/tuning.ron`.

mod loader;
mod validation;
#[cfg(test)]
mod tests;

pub use loader::{ContentLoadError, TuningFile, load_tuning, parse_tuning};
pub use validation::{ValidationError, validate_hair, validate_movement};

use bevy::prelude::*;
use std::path::Path;

const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, apply_tuning_file);
    }
}

/// Overrides the tuning resources from disk. A section that fails
/// validation keeps its defaults.
fn apply_tuning_file(mut commands: Commands) {
    let file = match load_tuning(Path::new(DATA_DIR)) {
        Ok(file) => file,
        Err(e) => {
            warn!("{}; using default tuning", e);
            return;
        }
    };

    let hair_errors = validate_hair(&file.hair);
    if hair_errors.is_empty() {
        commands.insert_resource(file.hair);
    } else {
        for e in &hair_errors {
            error!("Invalid tuning: {}", e);
        }
        warn!("Keeping default hair tuning");
    }

    let movement_errors = validate_movement(&file.movement);
    if movement_errors.is_empty() {
        commands.insert_resource(file.movement);
    } else {
        for e in &movement_errors {
            error!("Invalid tuning: {}", e);
        }
        warn!("Keeping default movement tuning");
    }

    info!("Loaded tuning from {}/tuning.ron", DATA_DIR);
}
