use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// One placeable model: a glTF source file plus the named scene inside it
/// that actually gets spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Asset path of the glTF source.
    pub source: String,
    /// Named scene within the source.
    pub part: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_scale() -> f32 {
    1.0
}

/// Placeable model catalogue as a Bevy asset. Mirrors the JSON structure
/// exactly.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub models: Vec<CatalogEntry>,
}

impl ModelCatalog {
    pub fn get_by_name(&self, name: &str) -> Option<&CatalogEntry> {
        self.models.iter().find(|entry| entry.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_parses_with_defaulted_scale() {
        let catalog: ModelCatalog = serde_json::from_str(
            r#"{
                "models": [
                    { "name": "biplane", "source": "models/biplane.gltf", "part": "biplane" },
                    { "name": "crate", "source": "models/crate.gltf", "part": "crate", "scale": 0.5 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.models.len(), 2);
        assert_eq!(catalog.models[0].scale, 1.0);
        assert_eq!(catalog.get_by_name("crate").unwrap().scale, 0.5);
        assert!(catalog.get_by_name("teapot").is_none());
    }
}
