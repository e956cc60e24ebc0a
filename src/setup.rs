// ./src/setup.rs
use crate::globe::{ArcDescriptor, GlobeArcs, GlobeBundle, GlobeConfig};
use crate::render::camera::spawn_camera_rig;
use bevy::prelude::*;

const GLOBE_CONFIG_JSON: &str = include_str!("../assets/globe_config.json");
const ARCS_JSON: &str = include_str!("../assets/arcs.json");

/// Liest die eingebettete Konfiguration. Fehler werden geloggt, dann gilt die
/// Standard-Konfiguration.
fn load_config() -> GlobeConfig {
    match GlobeConfig::from_json(GLOBE_CONFIG_JSON) {
        Ok(config) => config,
        Err(err) => {
            error!("Globe config could not be parsed, using defaults: {}", err);
            GlobeConfig::default()
        }
    }
}

fn load_arcs() -> Vec<ArcDescriptor> {
    match ArcDescriptor::list_from_json(ARCS_JSON) {
        Ok(arcs) => arcs,
        Err(err) => {
            error!("Arc list could not be parsed, starting empty: {}", err);
            Vec::new()
        }
    }
}

pub fn setup_scene(mut commands: Commands) {
    let config = load_config();
    let arcs = load_arcs();
    info!("Spawning globe with {} arcs", arcs.len());

    // Kamera und Licht hängen von der aufgelösten Konfiguration ab
    let resolved = config.resolve();
    spawn_camera_rig(&mut commands, &resolved);

    commands.spawn((
        GlobeBundle::new(config, GlobeArcs(arcs)),
        Name::new("Globe"),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_assets_parse() {
        assert!(GlobeConfig::from_json(GLOBE_CONFIG_JSON).is_ok());
        let arcs = ArcDescriptor::list_from_json(ARCS_JSON).expect("arcs parse");
        assert!(!arcs.is_empty());
    }

    #[test]
    fn embedded_config_overrides_defaults() {
        let resolved = load_config().resolve();
        assert_eq!(resolved.globe_color, "#062056");
        assert_eq!(resolved.max_rings, 3.0);
    }
}
