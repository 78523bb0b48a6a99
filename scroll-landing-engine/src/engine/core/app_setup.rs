use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::constants::render_settings::{CAMERA_DISTANCE, CAMERA_FOV_DEGREES, CLEAR_COLOUR};
use crate::engine::assets::landing_manifest::LandingManifest;
use crate::engine::core::app_state::{AppState, MorphFieldVisibility};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::manifest_loader::{
    ManifestLoader, install_manifest_system, start_loading,
};
use crate::engine::navigation::events::{
    ContainerScrolled, SectionChangedEvent, SeekRequestEvent,
};
use crate::engine::scene::landing_ui::{
    spawn_landing_ui, update_section_overlays, update_section_scroll,
};
use crate::engine::shaders::StarMaterial;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::engine::systems::navigation_input::{
    advance_scroll_container, apply_seek_requests, dispatch_scroll_events,
    handle_navigation_shortcuts, handle_skip_button, handle_touch_swipes, handle_wheel_scroll,
    handle_window_resize, notify_section_changes, publish_section_changes, tick_navigator,
};
use crate::engine::systems::starfield::{
    fire_trigger_gate, mount_morph_field, spawn_drift_layers, spin_morph_field, step_morph_field,
    unmount_morph_field, update_drift_layers,
};
use crate::rpc::web_rpc::WebRpcPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::core::app_state::FpsText;
#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::fps_text_update_system;

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .init_state::<MorphFieldVisibility>()
        .add_plugins(MaterialPlugin::<StarMaterial>::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers LandingManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<LandingManifest>::new(&["json"]))
        .add_plugins(WebRpcPlugin)
        .insert_resource(ClearColor(CLEAR_COLOUR));

    app.init_resource::<ManifestLoader>()
        .add_event::<SeekRequestEvent>()
        .add_event::<ContainerScrolled>()
        .add_event::<SectionChangedEvent>();

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            install_manifest_system.run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            OnEnter(AppState::Running),
            (spawn_landing_ui, spawn_drift_layers),
        )
        .add_systems(OnEnter(MorphFieldVisibility::Visible), mount_morph_field)
        .add_systems(OnExit(MorphFieldVisibility::Visible), unmount_morph_field);

    // Input is turned into seeks and container motion first, then the
    // navigator consumes the resulting scroll events.
    let navigation_systems = (
        handle_window_resize,
        handle_navigation_shortcuts, // Native shortcuts or no-op for WASM
        handle_skip_button,
        apply_seek_requests,
        handle_touch_swipes,
        handle_wheel_scroll,
        advance_scroll_container,
        dispatch_scroll_events,
        tick_navigator,
        publish_section_changes,
        notify_section_changes,
    )
        .chain();

    let starfield_systems = (
        fire_trigger_gate,
        update_drift_layers,
        (step_morph_field, spin_morph_field)
            .chain()
            .run_if(in_state(MorphFieldVisibility::Visible)),
    )
        .chain();

    let shell_systems = (
        update_section_scroll,
        update_section_overlays,
        fps_notification_system,
    );

    app.add_systems(
        Update,
        (navigation_systems, starfield_systems, shell_systems)
            .chain()
            .run_if(in_state(AppState::Running)),
    );

    // Add fps_text_update_system only for native builds.
    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Update, fps_text_update_system);
    }

    app
}

fn spawn_backdrop_camera(commands: &mut Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_backdrop_camera(&mut commands);

    #[cfg(not(target_arch = "wasm32"))]
    {
        create_native_overlays(&mut commands);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn create_native_overlays(commands: &mut Commands) {
    commands.spawn((
        Text::new("FPS: "),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb(1., 0., 0.)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(12.0),
            ..default()
        },
        // Above the landing UI, which is spawned later.
        GlobalZIndex(10),
        FpsText,
    ));
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
