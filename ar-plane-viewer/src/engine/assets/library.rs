use std::collections::HashMap;

use bevy::gltf::Gltf;
use bevy::prelude::*;

use crate::engine::assets::catalog::ModelCatalog;

/// A catalogue entry resolved to a spawnable scene handle.
#[derive(Debug, Clone)]
pub struct PlaceableModel {
    pub name: String,
    pub scene: Handle<Scene>,
    pub scale: f32,
}

/// Models ready to place. Entries appear as their glTF sources finish
/// loading, so the library can trail the catalogue for a few frames.
#[derive(Resource, Debug, Default)]
pub struct ModelLibrary {
    models: Vec<PlaceableModel>,
    failed: Vec<String>,
}

impl ModelLibrary {
    pub fn get(&self, name: &str) -> Option<&PlaceableModel> {
        self.models.iter().find(|model| model.name == name)
    }

    /// Earliest resolved model, the fallback when nothing is selected.
    pub fn first(&self) -> Option<&PlaceableModel> {
        self.models.first()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|model| model.name.as_str())
    }

    /// Adds a resolved model, replacing any previous entry with the same
    /// name.
    pub fn insert(&mut self, model: PlaceableModel) {
        if let Some(existing) = self.models.iter_mut().find(|m| m.name == model.name) {
            *existing = model;
        } else {
            self.models.push(model);
        }
    }
}

/// Pending glTF loads, keyed by catalogue name.
#[derive(Resource, Debug, Default)]
pub struct ModelSourceHandles {
    pub sources: HashMap<String, Handle<Gltf>>,
}

/// Moves models whose glTF source has finished loading into the library.
/// A source missing the named part is recorded as failed and reported
/// once rather than retried every frame.
pub fn resolve_model_library(
    catalog: Option<Res<ModelCatalog>>,
    handles: Res<ModelSourceHandles>,
    gltfs: Res<Assets<Gltf>>,
    mut library: ResMut<ModelLibrary>,
) {
    let Some(catalog) = catalog else {
        return;
    };
    for entry in &catalog.models {
        if library.get(&entry.name).is_some() || library.failed.contains(&entry.name) {
            continue;
        }
        let Some(handle) = handles.sources.get(&entry.name) else {
            continue;
        };
        let Some(gltf) = gltfs.get(handle) else {
            continue;
        };
        match gltf.named_scenes.get(entry.part.as_str()) {
            Some(scene) => {
                library.insert(PlaceableModel {
                    name: entry.name.clone(),
                    scene: scene.clone(),
                    scale: entry.scale,
                });
                info!("model '{}' ready (part '{}')", entry.name, entry.part);
            }
            None => {
                warn!(
                    "model '{}': no scene named '{}' in {}",
                    entry.name, entry.part, entry.source
                );
                library.failed.push(entry.name.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(name: &str, scale: f32) -> PlaceableModel {
        PlaceableModel {
            name: name.to_owned(),
            scene: Handle::default(),
            scale,
        }
    }

    #[test]
    fn insert_replaces_entries_by_name() {
        let mut library = ModelLibrary::default();
        library.insert(model("biplane", 1.0));
        library.insert(model("crate", 0.5));
        library.insert(model("biplane", 2.0));

        assert_eq!(library.len(), 2);
        assert_eq!(library.get("biplane").unwrap().scale, 2.0);
        assert_eq!(library.first().unwrap().name, "biplane");
        let names: Vec<_> = library.names().collect();
        assert_eq!(names, vec!["biplane", "crate"]);
    }
}
