//! Scene loading: presets and JSON scene files.

use std::path::Path;

use thiserror::Error;

use crate::presets;
use crate::scene::SceneDescription;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown scene preset '{0}' (available: {list})", list = presets::NAMES.join(", "))]
    UnknownPreset(String),

    #[error("Surface {index} references unknown material '{material}'")]
    UnknownMaterial { index: usize, material: String },

    #[error("Sphere {index} has non-positive radius {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("Light {index} has zero area or no facing direction")]
    DegenerateLight { index: usize },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

impl SceneDescription {
    /// Look up a built-in scene by name.
    pub fn preset(name: &str) -> SceneResult<Self> {
        match name {
            presets::OPEN => Ok(presets::open()),
            presets::HEX_ROOM => Ok(presets::hex_room()),
            _ => Err(SceneError::UnknownPreset(name.to_string())),
        }
    }

    /// Parse a scene from JSON text and validate it.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Serialize the scene as pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load a scene from a preset name or a JSON file path.
///
/// Preset names win over file names. A file without a `name` field takes
/// its file stem.
pub fn load_scene(source: &str) -> SceneResult<SceneDescription> {
    if presets::NAMES.contains(&source) {
        return SceneDescription::preset(source);
    }

    let path = Path::new(source);
    let is_file_name = path.extension().is_some_and(|ext| ext == "json");
    if !is_file_name && !path.exists() {
        return Err(SceneError::UnknownPreset(source.to_string()));
    }

    let text = std::fs::read_to_string(path)?;
    let mut scene = SceneDescription::from_json_str(&text)?;
    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unnamed")
            .to_string();
    }

    log::info!(
        "Loaded scene '{}' from {}: {} surfaces, {} lights",
        scene.name,
        path.display(),
        scene.surfaces.len(),
        scene.lights.len()
    );

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Shape;

    #[test]
    fn test_presets_by_name() {
        for name in presets::NAMES {
            let scene = load_scene(name).unwrap();
            assert_eq!(scene.name, *name);
        }
    }

    #[test]
    fn test_unknown_preset() {
        let err = load_scene("definitely-not-a-scene").unwrap_err();
        assert!(matches!(err, SceneError::UnknownPreset(_)));
        assert!(err.to_string().contains("hex-room"));
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "materials": { "grey": { "type": "lambert", "albedo": [0.8, 0.8, 0.8] } },
            "surfaces": [
                { "shape": { "type": "plane", "point": [0, 0, -0.75], "normal": [0, 0, 1] },
                  "material": "grey" }
            ],
            "lights": [
                { "corner": [2, -2, 5], "edge1": [0, 4, 0], "edge2": [4, 0, 0],
                  "radiance": [1, 1, 1] }
            ]
        }"#;

        let scene = SceneDescription::from_json_str(json).unwrap();
        assert_eq!(scene.camera.eye.x, -1.0);
        assert_eq!(scene.surfaces.len(), 1);
        assert!(matches!(scene.surfaces[0].shape, Shape::Plane { .. }));
        assert_eq!(scene.lights[0].to_light().area(), 16.0);
    }

    #[test]
    fn test_from_json_str_validates() {
        let json = r#"{
            "surfaces": [
                { "shape": { "type": "sphere", "center": [3, 0, 0], "radius": 1 },
                  "material": "missing" }
            ]
        }"#;
        assert!(matches!(
            SceneDescription::from_json_str(json),
            Err(SceneError::UnknownMaterial { .. })
        ));
    }

    #[test]
    fn test_missing_scene_file() {
        assert!(matches!(
            load_scene("no/such/scene.json"),
            Err(SceneError::Io(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            SceneDescription::from_json_str("{ not json"),
            Err(SceneError::Parse(_))
        ));
    }

    #[test]
    fn test_load_scene_file() {
        let path = std::env::temp_dir().join(format!("ember-scene-{}.json", std::process::id()));
        let mut description = presets::open();
        description.name.clear();
        std::fs::write(&path, description.to_json().unwrap()).unwrap();

        let scene = load_scene(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(scene.name, path.file_stem().unwrap().to_str().unwrap());
        assert_eq!(scene.surfaces, presets::open().surfaces);
    }
}
