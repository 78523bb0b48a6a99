use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

/// Mount state of the morph field. `Visible` is entered once, when the
/// trigger gate fires; entering spawns and starts the field, exiting
/// despawns it.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum MorphFieldVisibility {
    #[default]
    Hidden,
    Visible,
}

#[derive(Component)]
pub struct FpsText;
