use prost_reflect::{Cardinality, FieldDescriptor, Kind};
use prost_rulecheck_types::{ConstraintDescriptor, FieldRulesExt};

use crate::error::CompilationError;

/// Protobuf scalar and enum kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum ScalarKind {
    Double,
    Float,
    Int32,
    Int64,
    Uint32,
    Uint64,
    Sint32,
    Sint64,
    Fixed32,
    Fixed64,
    Sfixed32,
    Sfixed64,
    Bool,
    String,
    Bytes,
    Enum,
}

/// The declared type of a field, as the schema reflection layer reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// A singular scalar or enum.
    Scalar(ScalarKind),
    /// A singular embedded message, identified by its full name.
    Message(String),
    /// A repeated field of the given element type.
    Repeated(Box<FieldType>),
    /// A map field.
    Map {
        /// Kind of the map keys.
        key: ScalarKind,
        /// Type of the map values.
        value: Box<FieldType>,
    },
}

impl FieldType {
    /// Shorthand for a singular scalar type.
    #[must_use]
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }

    /// Shorthand for a singular embedded message type.
    #[must_use]
    pub fn message(full_name: impl Into<String>) -> Self {
        Self::Message(full_name.into())
    }

    /// Returns true for embedded messages, including the well-known wrappers.
    #[must_use]
    pub fn is_embed(&self) -> bool {
        matches!(self, Self::Message(_))
    }

    /// Returns true for repeated (list) fields. Maps are not repeated.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        matches!(self, Self::Repeated(_))
    }

    /// Returns true for map fields.
    #[must_use]
    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map { .. })
    }

    /// Returns the element type of a repeated field or the value type of a map.
    #[must_use]
    pub fn element(&self) -> Option<&FieldType> {
        match self {
            Self::Repeated(element) | Self::Map { value: element, .. } => Some(element),
            Self::Scalar(_) | Self::Message(_) => None,
        }
    }
}

/// A field to validate: name, presence requirement, type and constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    full_name: String,
    required: bool,
    ty: FieldType,
    rules: Option<ConstraintDescriptor>,
}

impl Field {
    /// Create an optional, unconstrained field.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        let name = name.into();
        Self {
            full_name: name.clone(),
            name,
            required: false,
            ty,
            rules: None,
        }
    }

    /// Mark the field as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the fully-qualified name used as the compiled-rules cache key.
    #[must_use]
    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = full_name.into();
        self
    }

    /// Attach constraints.
    #[must_use]
    pub fn with_rules(mut self, rules: impl Into<ConstraintDescriptor>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    /// Snapshot a `prost-reflect` field descriptor, reading its
    /// `(validate.rules)` option.
    ///
    /// # Errors
    ///
    /// Returns a `CompilationError` if the option is present but malformed.
    pub fn from_descriptor(desc: &FieldDescriptor) -> Result<Self, CompilationError> {
        let rules = desc.field_rules().map_err(|err| CompilationError {
            cause: format!("{err:#}"),
        })?;
        Ok(Self {
            name: desc.name().to_string(),
            full_name: desc.full_name().to_string(),
            required: desc.cardinality() == Cardinality::Required,
            ty: field_type_of(desc),
            rules,
        })
    }

    /// The field name, used to look the value up in the input record.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully-qualified field name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Whether the field is declared required.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// The declared field type.
    #[must_use]
    pub fn field_type(&self) -> &FieldType {
        &self.ty
    }

    /// The attached constraint descriptor, if any.
    #[must_use]
    pub fn rules(&self) -> Option<&ConstraintDescriptor> {
        self.rules.as_ref()
    }
}

fn field_type_of(desc: &FieldDescriptor) -> FieldType {
    if desc.is_map() {
        if let Kind::Message(entry) = desc.kind() {
            return FieldType::Map {
                key: scalar_or_enum(&entry.map_entry_key_field().kind()),
                value: Box::new(element_type(&entry.map_entry_value_field().kind())),
            };
        }
    }
    let element = element_type(&desc.kind());
    if desc.is_list() {
        FieldType::Repeated(Box::new(element))
    } else {
        element
    }
}

fn element_type(kind: &Kind) -> FieldType {
    match kind {
        Kind::Message(message) => FieldType::Message(message.full_name().to_string()),
        other => FieldType::Scalar(scalar_or_enum(other)),
    }
}

fn scalar_or_enum(kind: &Kind) -> ScalarKind {
    match kind {
        Kind::Double => ScalarKind::Double,
        Kind::Float => ScalarKind::Float,
        Kind::Int32 => ScalarKind::Int32,
        Kind::Int64 => ScalarKind::Int64,
        Kind::Uint32 => ScalarKind::Uint32,
        Kind::Uint64 => ScalarKind::Uint64,
        Kind::Sint32 => ScalarKind::Sint32,
        Kind::Sint64 => ScalarKind::Sint64,
        Kind::Fixed32 => ScalarKind::Fixed32,
        Kind::Fixed64 => ScalarKind::Fixed64,
        Kind::Sfixed32 => ScalarKind::Sfixed32,
        Kind::Sfixed64 => ScalarKind::Sfixed64,
        Kind::Bool => ScalarKind::Bool,
        Kind::String => ScalarKind::String,
        Kind::Bytes => ScalarKind::Bytes,
        // Map keys are never messages; treat anything else as an enum.
        Kind::Enum(_) | Kind::Message(_) => ScalarKind::Enum,
    }
}
