use serde_json::Value;

/// Scalar wire types.
///
/// `Int` and `Uint` only accept integral JSON numbers; `Float` accepts any
/// JSON number, since JSON has a single numeric type. No coercion across
/// JSON-native types is ever performed (a numeric string is not a number).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Float,
    Str,
}

impl ScalarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Uint => "uint",
            Self::Float => "float",
            Self::Str => "str",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(self, Self::Int | Self::Uint)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(self, Self::Uint)
    }
}

/// The set of permitted wire values for an enum field.
///
/// Enums are open by default: an undeclared wire value decodes to its raw
/// form so that upstream API additions do not break older clients. Setting
/// `strict` selects rejection instead.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    /// Declared wire values (JSON strings or integers).
    pub values: Vec<Value>,
    /// Reject undeclared wire values instead of preserving them raw.
    pub strict: bool,
}

impl EnumSchema {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            strict: false,
        }
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// The value kind of a field; determines recursive decode/encode behavior.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Enum(EnumSchema),
    /// Reference to another model, resolved through the schema registry.
    Model(String),
    List(Box<FieldKind>),
    Map(Box<FieldKind>),
    /// Any JSON value, passed through untyped.
    Mixed,
}

impl FieldKind {
    /// Returns the "kind" string identifier for this field kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(s) => s.as_str(),
            Self::Enum(_) => "enum",
            Self::Model(_) => "model",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Mixed => "mixed",
        }
    }
}

/// One named field of a model.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    /// In-memory field name.
    pub name: String,
    /// Wire key, when it differs from the field name.
    pub wire: Option<String>,
    pub required: bool,
    pub nullable: bool,
    pub kind: FieldKind,
    /// Default applied on the direct-construction path only; a decoded
    /// instance never materializes defaults for keys the wire did not send.
    pub default: Option<Value>,
    pub description: Option<String>,
}

impl FieldSchema {
    /// A required, non-nullable field named `name`.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            wire: None,
            required: true,
            nullable: false,
            kind,
            default: None,
            description: None,
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Use a wire key different from the in-memory field name.
    pub fn wire(mut self, key: impl Into<String>) -> Self {
        self.wire = Some(key.into());
        self
    }

    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// The key this field uses on the wire.
    pub fn wire_key(&self) -> &str {
        self.wire.as_deref().unwrap_or(&self.name)
    }
}

/// Ordered field declarations for one model type.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
    /// Reject unknown wire keys during decode instead of capturing them
    /// into the overflow bag. Default is permissive capture.
    pub strict: bool,
    pub description: Option<String>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            fields,
            strict: false,
            description: None,
        }
    }

    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_by_wire_key(&self, key: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.wire_key() == key)
    }
}
