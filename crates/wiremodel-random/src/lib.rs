//! Random wire values conforming to wiremodel schemas.
//!
//! Generates decodable JSON inputs for a declared model: required fields
//! are always present, optional fields appear with a configurable
//! probability, nullable fields are sometimes null, and enum fields draw
//! from their declared values. Pair with a seeded RNG for reproducible
//! fuzzing of the decode/encode round trip.

use rand::Rng;
use serde_json::{Map, Number, Value};

use wiremodel::{EnumSchema, FieldKind, ModelSchema, ScalarKind, SchemaRegistry};

const TOKEN_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_";

/// Knobs for the generator.
#[derive(Debug, Clone, Copy)]
pub struct RandomModelOptions {
    /// Probability that an optional field is present.
    pub optional_probability: f64,
    /// Probability that a present nullable field is null.
    pub null_probability: f64,
    /// Upper bound on generated list/map sizes.
    pub max_items: usize,
    /// Depth at which optional fields stop being generated, bounding
    /// recursion through nested models.
    pub max_depth: usize,
}

impl Default for RandomModelOptions {
    fn default() -> Self {
        Self {
            optional_probability: 0.5,
            null_probability: 0.25,
            max_items: 4,
            max_depth: 6,
        }
    }
}

/// Generates random wire values that conform to a model schema.
pub struct RandomModel<'a> {
    registry: &'a SchemaRegistry,
    options: RandomModelOptions,
}

impl<'a> RandomModel<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            options: RandomModelOptions::default(),
        }
    }

    pub fn with_options(registry: &'a SchemaRegistry, options: RandomModelOptions) -> Self {
        Self { registry, options }
    }

    /// Generate a wire value for the named model.
    pub fn gen<R: Rng>(&self, rng: &mut R, model: &str) -> Result<Value, String> {
        let schema = self.registry.schema_for(model)?;
        self.gen_model(rng, &schema, 0)
    }

    fn gen_model<R: Rng>(
        &self,
        rng: &mut R,
        schema: &ModelSchema,
        depth: usize,
    ) -> Result<Value, String> {
        let mut out = Map::new();
        for field in &schema.fields {
            if !field.required
                && (depth >= self.options.max_depth
                    || !rng.gen_bool(self.options.optional_probability))
            {
                continue;
            }
            if field.nullable && rng.gen_bool(self.options.null_probability) {
                out.insert(field.wire_key().to_string(), Value::Null);
                continue;
            }
            let value = self.gen_kind(rng, &field.kind, depth)?;
            out.insert(field.wire_key().to_string(), value);
        }
        Ok(Value::Object(out))
    }

    fn gen_kind<R: Rng>(
        &self,
        rng: &mut R,
        kind: &FieldKind,
        depth: usize,
    ) -> Result<Value, String> {
        match kind {
            FieldKind::Scalar(scalar) => Ok(self.gen_scalar(rng, *scalar)),
            FieldKind::Enum(e) => Ok(self.gen_enum(rng, e)),
            FieldKind::Model(name) => {
                let schema = self.registry.schema_for(name)?;
                self.gen_model(rng, &schema, depth + 1)
            }
            FieldKind::List(element) => {
                let len = rng.gen_range(0..=self.options.max_items);
                let mut items = Vec::with_capacity(len);
                for _ in 0..len {
                    items.push(self.gen_kind(rng, element, depth + 1)?);
                }
                Ok(Value::Array(items))
            }
            FieldKind::Map(value_kind) => {
                let len = rng.gen_range(0..=self.options.max_items);
                let mut out = Map::new();
                while out.len() < len {
                    let key = self.gen_token(rng);
                    let value = self.gen_kind(rng, value_kind, depth + 1)?;
                    out.insert(key, value);
                }
                Ok(Value::Object(out))
            }
            FieldKind::Mixed => Ok(self.gen_mixed(rng)),
        }
    }

    fn gen_scalar<R: Rng>(&self, rng: &mut R, scalar: ScalarKind) -> Value {
        match scalar {
            ScalarKind::Bool => Value::Bool(rng.gen_bool(0.5)),
            ScalarKind::Int => Value::Number(Number::from(rng.gen_range(-100_000i64..=100_000))),
            ScalarKind::Uint => Value::Number(Number::from(rng.gen_range(0u64..=100_000))),
            ScalarKind::Float => {
                let v = (rng.gen::<f64>() - 0.5) * 2_000_000.0;
                Number::from_f64(v)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::Number(0.into()))
            }
            ScalarKind::Str => Value::String(self.gen_token(rng)),
        }
    }

    fn gen_enum<R: Rng>(&self, rng: &mut R, e: &EnumSchema) -> Value {
        // Declared values are never empty for a registered schema.
        e.values[rng.gen_range(0..e.values.len())].clone()
    }

    fn gen_mixed<R: Rng>(&self, rng: &mut R) -> Value {
        match rng.gen_range(0..6) {
            0 => Value::Null,
            1 => Value::Bool(rng.gen_bool(0.5)),
            2 => Value::Number(Number::from(rng.gen_range(-1_000i64..=1_000))),
            3 => Value::String(self.gen_token(rng)),
            4 => {
                let len = rng.gen_range(0..=self.options.max_items);
                Value::Array(
                    (0..len)
                        .map(|_| Value::Number(Number::from(rng.gen_range(0u64..100))))
                        .collect(),
                )
            }
            _ => {
                let len = rng.gen_range(0..=self.options.max_items);
                let mut out = Map::new();
                while out.len() < len {
                    out.insert(self.gen_token(rng), Value::Bool(rng.gen_bool(0.5)));
                }
                Value::Object(out)
            }
        }
    }

    fn gen_token<R: Rng>(&self, rng: &mut R) -> String {
        let len = rng.gen_range(1..=10);
        (0..len)
            .map(|_| TOKEN_CHARS[rng.gen_range(0..TOKEN_CHARS.len())] as char)
            .collect()
    }
}
