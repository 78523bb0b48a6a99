use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::render_settings::MANIFEST_PATH;
use crate::engine::assets::landing_manifest::{LandingManifest, ManifestError};
use crate::engine::assets::sections::SectionList;
use crate::engine::core::app_state::AppState;
use crate::engine::navigation::scroll_container::ScrollContainer;
use crate::engine::navigation::section_navigator::SectionNavigator;
use crate::engine::particles::trigger_gate::TriggerGate;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<LandingManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading landing manifest from: {}", MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(MANIFEST_PATH));
}

/// Validate a manifest and build the section list it describes.
pub fn prepare_page(manifest: &LandingManifest) -> Result<SectionList, ManifestError> {
    manifest.validate()?;
    SectionList::new(manifest.sections.clone())
}

/// Wait for the manifest, then install the page resources and start running.
/// A missing, unreadable or invalid manifest falls back to the built-in page.
pub fn install_manifest_system(
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<LandingManifest>>,
    asset_server: Res<AssetServer>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut commands: Commands,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Some(handle) = &manifest_loader.handle else {
        return;
    };

    let candidate = if let Some(manifest) = manifests.get(handle) {
        manifest.clone()
    } else if matches!(
        asset_server.get_load_state(handle),
        Some(LoadState::Failed(_))
    ) {
        warn!("Landing manifest failed to load, using built-in page");
        LandingManifest::default()
    } else {
        return;
    };

    let (manifest, sections) = match prepare_page(&candidate) {
        Ok(sections) => (candidate, sections),
        Err(err) => {
            warn!("Landing manifest rejected ({}), using built-in page", err);
            let fallback = LandingManifest::default();
            match prepare_page(&fallback) {
                Ok(sections) => (fallback, sections),
                Err(err) => {
                    error!("Built-in landing page is invalid: {}", err);
                    return;
                }
            }
        }
    };

    let viewport_height = windows.single().map(|window| window.height()).unwrap_or(0.0);

    let mut container = ScrollContainer::new(sections.len());
    container.resize(viewport_height);

    commands.insert_resource(SectionNavigator::new(
        sections.len(),
        viewport_height,
        manifest.navigation,
    ));
    commands.insert_resource(container);
    commands.insert_resource(TriggerGate::default());

    info!(
        "✓ Landing page ready: {} sections, {} morph stars",
        sections.len(),
        manifest.morph.particle_count
    );
    commands.insert_resource(sections);
    commands.insert_resource(manifest);

    info!("→ Transitioning to Running state");
    next_state.set(AppState::Running);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::sections::Section;

    #[test]
    fn valid_manifest_yields_its_sections() {
        let manifest = LandingManifest {
            sections: vec![Section::new("A", "a", "plum"), Section::new("B", "b", "khaki")],
            ..Default::default()
        };
        assert_eq!(prepare_page(&manifest).unwrap().len(), 2);
    }

    #[test]
    fn invalid_manifest_is_reported() {
        let mut manifest = LandingManifest::default();
        manifest.navigation.snap_cooldown_ms = 10;
        assert!(matches!(
            prepare_page(&manifest),
            Err(ManifestError::InvalidNavigation(_))
        ));
    }
}
