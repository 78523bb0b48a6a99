use bevy::prelude::*;
use bevy::render::view::NoFrustumCulling;
use bevy::window::PrimaryWindow;

use crate::constants::particle_settings::{MORPH_SPIN_X_PER_FRAME, MORPH_SPIN_Y_PER_FRAME};
use crate::constants::render_settings::{CAMERA_DISTANCE, CAMERA_FOV_DEGREES};
use crate::engine::assets::landing_manifest::LandingManifest;
use crate::engine::core::app_state::MorphFieldVisibility;
use crate::engine::mesh::star_mesh::{create_star_mesh, write_star_positions};
use crate::engine::navigation::events::ContainerScrolled;
use crate::engine::navigation::scroll_container::ScrollContainer;
use crate::engine::particles::buffer::{ParticleBuffer, WorldViewport};
use crate::engine::particles::drift_layer::{DriftLayer, strip_fraction_for_width};
use crate::engine::particles::morph_field::MorphField;
use crate::engine::particles::trigger_gate::TriggerGate;
use crate::engine::shaders::StarMaterial;
use crate::rpc::web_rpc::WebRpcInterface;

/// Accumulated whole-cloud rotation of the morph field.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct MorphSpin {
    pub pitch: f32,
    pub yaw: f32,
}

impl MorphSpin {
    /// Advance one rendered frame and return the resulting orientation.
    pub fn step(&mut self) -> Quat {
        self.pitch += MORPH_SPIN_X_PER_FRAME;
        self.yaw += MORPH_SPIN_Y_PER_FRAME;
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// World extent of the `z = 0` plane seen by the backdrop camera.
fn drift_viewport(window: &Window) -> WorldViewport {
    WorldViewport::from_perspective(
        window.width(),
        window.height(),
        CAMERA_FOV_DEGREES.to_radians(),
        CAMERA_DISTANCE,
    )
}

/// Spawn one entity per band and layer. Positions are laid out on the first
/// update once the viewport is known.
pub fn spawn_drift_layers(
    mut commands: Commands,
    manifest: Res<LandingManifest>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StarMaterial>>,
) {
    let drift = &manifest.drift;
    for anchor in &drift.bands {
        for config in &drift.layers {
            let layer = DriftLayer::new(*anchor, *config).with_step(drift.step_per_frame);
            let mesh = meshes.add(create_star_mesh(layer.buffer()));
            let material = materials.add(StarMaterial::new(config.size, config.opacity));

            commands.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::default(),
                NoFrustumCulling,
                layer,
                Name::new(format!("Drift layer ({}, {} stars)", anchor.as_str(), config.count)),
            ));
        }
    }

    info!(
        "Spawned {} drift layers across {} bands",
        drift.bands.len() * drift.layers.len(),
        drift.bands.len()
    );
}

/// Relayout on viewport changes, then drift every layer one step.
pub fn update_drift_layers(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut layers: Query<(&mut DriftLayer, &Mesh3d)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };

    let viewport = drift_viewport(window);
    let height_fraction = strip_fraction_for_width(window.width());
    let mut rng = rand::thread_rng();

    for (mut layer, mesh_handle) in &mut layers {
        let relaid = layer.sync_layout(&mut rng, viewport, height_fraction);
        let drifted = layer.tick();
        if !(relaid || drifted) {
            continue;
        }
        if let Some(mesh) = meshes.get_mut(&mesh_handle.0) {
            write_star_positions(mesh, layer.buffer());
        }
    }
}

/// Watch container offsets and mount the morph field the first time the
/// page scrolls past the trigger threshold.
pub fn fire_trigger_gate(
    mut scrolled: EventReader<ContainerScrolled>,
    container: Res<ScrollContainer>,
    mut gate: ResMut<TriggerGate>,
    mut next_visibility: ResMut<NextState<MorphFieldVisibility>>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in scrolled.read() {
        if gate.observe(event.scroll_top, container.viewport_height()) {
            next_visibility.set(MorphFieldVisibility::Visible);
            rpc_interface.send_notification(
                "animation_triggered",
                serde_json::json!({ "scroll_top": event.scroll_top }),
            );
        }
    }
}

/// Spawn and start the morph field. It stays hidden until its first buffer.
pub fn mount_morph_field(
    mut commands: Commands,
    manifest: Res<LandingManifest>,
    time: Res<Time>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StarMaterial>>,
) {
    let settings = manifest.morph;
    let mut field = MorphField::new(settings);
    field.start(time.elapsed());

    let placeholder = ParticleBuffer::zeroed(settings.particle_count);
    commands.spawn((
        Mesh3d(meshes.add(create_star_mesh(&placeholder))),
        MeshMaterial3d(materials.add(StarMaterial::new(settings.point_size, 1.0))),
        Transform::default(),
        Visibility::Hidden,
        NoFrustumCulling,
        MorphSpin::default(),
        field,
        Name::new("Morph field"),
    ));
}

pub fn step_morph_field(
    time: Res<Time>,
    mut fields: Query<(&mut MorphField, &Mesh3d, &mut Visibility)>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    let now = time.elapsed();
    let mut rng = rand::thread_rng();

    for (mut field, mesh_handle, mut visibility) in &mut fields {
        let Some(buffer) = field.tick(now, &mut rng) else {
            continue;
        };
        if let Some(mesh) = meshes.get_mut(&mesh_handle.0) {
            write_star_positions(mesh, buffer);
        }
        if *visibility == Visibility::Hidden {
            *visibility = Visibility::Inherited;
        }
    }
}

/// Spin continues after the morph has settled.
pub fn spin_morph_field(mut fields: Query<(&mut MorphSpin, &mut Transform), With<MorphField>>) {
    for (mut spin, mut transform) in &mut fields {
        transform.rotation = spin.step();
    }
}

pub fn unmount_morph_field(mut commands: Commands, fields: Query<Entity, With<MorphField>>) {
    for entity in &fields {
        commands.entity(entity).despawn();
    }
    debug!("Morph field unmounted");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_accumulates_per_frame() {
        let mut spin = MorphSpin::default();
        for _ in 0..10 {
            spin.step();
        }
        assert!((spin.yaw - 10.0 * MORPH_SPIN_Y_PER_FRAME).abs() < 1e-6);
        assert!((spin.pitch - 10.0 * MORPH_SPIN_X_PER_FRAME).abs() < 1e-6);
    }

    #[test]
    fn drift_viewport_matches_camera_frustum() {
        let window = Window {
            resolution: (1600.0, 800.0).into(),
            ..default()
        };
        let viewport = drift_viewport(&window);
        let expected_height = 2.0 * CAMERA_DISTANCE * (CAMERA_FOV_DEGREES.to_radians() * 0.5).tan();
        assert!((viewport.height - expected_height).abs() < 1e-4);
        assert!((viewport.width - 2.0 * expected_height).abs() < 1e-3);
    }
}
