//! Learning path records returned by the backend.
//!
//! Progress changes are applied through closed update types so the set of
//! mutable fields is fixed at compile time.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A generated learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    /// Path id
    pub id: String,

    /// Display title (usually the target role)
    pub title: String,

    /// Ordered modules
    #[serde(default)]
    pub modules: Vec<LearningModule>,
}

/// One module of a learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningModule {
    /// Module id
    pub id: String,

    /// Module title
    pub title: String,

    /// Whether the learner marked the module done
    #[serde(default)]
    pub completed: bool,

    /// Study resources
    #[serde(default)]
    pub resources: Vec<LearningResource>,
}

/// A single study resource (course, article, video).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningResource {
    /// Resource id
    pub id: String,

    /// Resource title
    pub title: String,

    /// Link to the material
    #[serde(default)]
    pub url: Option<String>,

    /// Free-form resource type ("video", "course", ...)
    #[serde(rename = "type", default)]
    pub resource_type: Option<String>,

    /// Whether the learner finished it
    #[serde(default)]
    pub completed: bool,
}

/// Fields of a [`LearningModule`] that may change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleUpdate {
    /// New completion state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl ModuleUpdate {
    /// Update that sets the completion flag.
    pub fn completed(done: bool) -> Self {
        Self {
            completed: Some(done),
        }
    }
}

/// Fields of a [`LearningResource`] that may change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUpdate {
    /// New completion state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl ResourceUpdate {
    /// Update that sets the completion flag.
    pub fn completed(done: bool) -> Self {
        Self {
            completed: Some(done),
        }
    }
}

impl LearningModule {
    /// Apply an update in place.
    pub fn apply(&mut self, update: ModuleUpdate) {
        if let Some(done) = update.completed {
            self.completed = done;
        }
    }
}

impl LearningResource {
    /// Apply an update in place.
    pub fn apply(&mut self, update: ResourceUpdate) {
        if let Some(done) = update.completed {
            self.completed = done;
        }
    }
}

impl LearningPath {
    /// Apply an update to the module with the given id.
    pub fn update_module(&mut self, module_id: &str, update: ModuleUpdate) -> Result<()> {
        let module = self
            .modules
            .iter_mut()
            .find(|m| m.id == module_id)
            .ok_or_else(|| Error::ModuleNotFound(module_id.to_string()))?;
        module.apply(update);
        Ok(())
    }

    /// Apply an update to a resource inside a module.
    pub fn update_resource(
        &mut self,
        module_id: &str,
        resource_id: &str,
        update: ResourceUpdate,
    ) -> Result<()> {
        let module = self
            .modules
            .iter_mut()
            .find(|m| m.id == module_id)
            .ok_or_else(|| Error::ModuleNotFound(module_id.to_string()))?;
        let resource = module
            .resources
            .iter_mut()
            .find(|r| r.id == resource_id)
            .ok_or_else(|| Error::ResourceNotFound {
                module: module_id.to_string(),
                resource: resource_id.to_string(),
            })?;
        resource.apply(update);
        Ok(())
    }

    /// Fraction of completed modules in `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        if self.modules.is_empty() {
            return 0.0;
        }
        let done = self.modules.iter().filter(|m| m.completed).count();
        done as f32 / self.modules.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_path() -> LearningPath {
        serde_json::from_str(
            r#"{
                "id": "lp-1",
                "title": "Backend Engineer",
                "modules": [
                    {"id": "m1", "title": "Rust basics", "resources": [
                        {"id": "r1", "title": "The Book", "url": "https://doc.rust-lang.org/book/", "type": "book"}
                    ]},
                    {"id": "m2", "title": "Async", "completed": true}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_deserialize_backend_shape() {
        let path = sample_path();
        assert_eq!(path.modules.len(), 2);
        assert_eq!(path.modules[0].resources[0].resource_type.as_deref(), Some("book"));
        assert!(!path.modules[0].completed);
        assert!(path.modules[1].resources.is_empty());
    }

    #[test]
    fn test_update_module_and_progress() {
        let mut path = sample_path();
        assert_eq!(path.progress(), 0.5);

        path.update_module("m1", ModuleUpdate::completed(true)).unwrap();
        assert_eq!(path.progress(), 1.0);

        // An empty update leaves the record untouched
        path.update_module("m1", ModuleUpdate::default()).unwrap();
        assert!(path.modules[0].completed);
    }

    #[test]
    fn test_update_resource() {
        let mut path = sample_path();
        path.update_resource("m1", "r1", ResourceUpdate::completed(true))
            .unwrap();
        assert!(path.modules[0].resources[0].completed);
    }

    #[test]
    fn test_update_unknown_ids() {
        let mut path = sample_path();
        assert!(matches!(
            path.update_module("nope", ModuleUpdate::completed(true)),
            Err(Error::ModuleNotFound(_))
        ));
        assert!(matches!(
            path.update_resource("m1", "nope", ResourceUpdate::completed(true)),
            Err(Error::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let json = serde_json::to_string(&ModuleUpdate::default()).unwrap();
        assert_eq!(json, "{}");
        let json = serde_json::to_string(&ResourceUpdate::completed(false)).unwrap();
        assert_eq!(json, r#"{"completed":false}"#);
    }
}
