//! Schema traversal.

use super::schema::{FieldKind, ModelSchema};

/// Walks every field kind in a model schema, calling the visitor for each
/// node, container elements included.
pub struct Walker;

impl Walker {
    pub fn walk(model: &ModelSchema, on_kind: &mut dyn FnMut(&FieldKind)) {
        for field in &model.fields {
            Self::walk_kind(&field.kind, on_kind);
        }
    }

    fn walk_kind(kind: &FieldKind, on_kind: &mut dyn FnMut(&FieldKind)) {
        on_kind(kind);
        match kind {
            FieldKind::List(inner) | FieldKind::Map(inner) => {
                Self::walk_kind(inner, on_kind);
            }
            FieldKind::Scalar(_)
            | FieldKind::Enum(_)
            | FieldKind::Model(_)
            | FieldKind::Mixed => {}
        }
    }

    /// Names of all models referenced by `model`'s fields, in declaration
    /// order, duplicates included.
    pub fn model_refs(model: &ModelSchema) -> Vec<String> {
        let mut refs = Vec::new();
        Self::walk(model, &mut |kind| {
            if let FieldKind::Model(name) = kind {
                refs.push(name.clone());
            }
        });
        refs
    }
}
