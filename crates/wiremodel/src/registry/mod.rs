//! Process-wide schema registry.
//!
//! Model schemas are declared once, validated at declaration, and shared
//! immutably afterwards. The registry supports concurrent readers; the
//! first successful declaration of a name wins and later declarations of
//! the same name return the already-published schema.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

use serde_json::Value;

use crate::schema::{model_from_json, validate_model, ModelSchema, Walker};

#[derive(Debug, Default)]
struct RegistryInner {
    models: HashMap<String, Arc<ModelSchema>>,
}

/// Registry of model schemas, keyed by model name.
///
/// Cloning is cheap; clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and publish a schema.
    ///
    /// If a schema with the same name is already published, the existing
    /// one is returned unchanged.
    pub fn declare(&self, schema: ModelSchema) -> Result<Arc<ModelSchema>, String> {
        {
            let inner = self.inner.read().unwrap();
            if let Some(existing) = inner.models.get(&schema.name) {
                return Ok(Arc::clone(existing));
            }
        }
        validate_model(&schema)?;
        let mut inner = self.inner.write().unwrap();
        let entry = inner
            .models
            .entry(schema.name.clone())
            .or_insert_with(|| Arc::new(schema));
        Ok(Arc::clone(entry))
    }

    /// Lazily construct and publish a schema.
    ///
    /// The closure runs only when `name` has not been declared yet; the
    /// built schema must carry that name.
    pub fn declare_with<F>(&self, name: &str, build: F) -> Result<Arc<ModelSchema>, String>
    where
        F: FnOnce() -> ModelSchema,
    {
        {
            let inner = self.inner.read().unwrap();
            if let Some(existing) = inner.models.get(name) {
                return Ok(Arc::clone(existing));
            }
        }
        let schema = build();
        if schema.name != name {
            return Err("NAME_MISMATCH".into());
        }
        self.declare(schema)
    }

    /// Parse and declare a schema shipped as JSON data.
    pub fn load_json(&self, json: &Value) -> Result<Arc<ModelSchema>, String> {
        self.declare(model_from_json(json)?)
    }

    /// Look up a declared schema. Never fails for a declared model.
    pub fn schema_for(&self, name: &str) -> Result<Arc<ModelSchema>, String> {
        let inner = self.inner.read().unwrap();
        inner
            .models
            .get(name)
            .cloned()
            .ok_or_else(|| format!("Model not found: {}", name))
    }

    pub fn contains(&self, name: &str) -> bool {
        let inner = self.inner.read().unwrap();
        inner.models.contains_key(name)
    }

    /// Declared model names, sorted.
    pub fn names(&self) -> Vec<String> {
        let inner = self.inner.read().unwrap();
        let mut names: Vec<String> = inner.models.keys().cloned().collect();
        names.sort();
        names
    }

    /// Verify that every model reference resolves to a declared schema.
    pub fn check(&self) -> Result<(), String> {
        let inner = self.inner.read().unwrap();
        let mut names: Vec<&String> = inner.models.keys().collect();
        names.sort();
        for name in names {
            for referenced in Walker::model_refs(&inner.models[name]) {
                if !inner.models.contains_key(&referenced) {
                    return Err(format!(
                        "Dangling model reference: {} -> {}",
                        name, referenced
                    ));
                }
            }
        }
        Ok(())
    }
}

/// The process-wide default registry, lazily initialized.
pub fn global() -> &'static SchemaRegistry {
    static GLOBAL: OnceLock<SchemaRegistry> = OnceLock::new();
    GLOBAL.get_or_init(SchemaRegistry::new)
}
