//! Message types for `validate/validate.proto`.
//!
//! Written against the schema by hand with prost derive macros; field numbers
//! match the `.proto` definitions exactly. The schema is proto2, so every
//! scalar constraint is `optional` and tracks presence.

/// Field number of the `(validate.rules)` extension on `google.protobuf.FieldOptions`.
pub const RULES_EXTENSION_NUMBER: u32 = 1071;

/// Constraints attached to a single field.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FieldRules {
    #[prost(message, optional, tag = "17")]
    pub message: Option<MessageRules>,
    #[prost(
        oneof = "field_rules::Type",
        tags = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 18, 19, 20, 21, 22"
    )]
    pub r#type: Option<field_rules::Type>,
}

/// Nested types for [`FieldRules`].
pub mod field_rules {
    /// The per-kind constraint payload. At most one arm is set.
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Type {
        #[prost(message, tag = "1")]
        Float(super::FloatRules),
        #[prost(message, tag = "2")]
        Double(super::DoubleRules),
        #[prost(message, tag = "3")]
        Int32(super::Int32Rules),
        #[prost(message, tag = "4")]
        Int64(super::Int64Rules),
        #[prost(message, tag = "5")]
        Uint32(super::UInt32Rules),
        #[prost(message, tag = "6")]
        Uint64(super::UInt64Rules),
        #[prost(message, tag = "7")]
        Sint32(super::SInt32Rules),
        #[prost(message, tag = "8")]
        Sint64(super::SInt64Rules),
        #[prost(message, tag = "9")]
        Fixed32(super::Fixed32Rules),
        #[prost(message, tag = "10")]
        Fixed64(super::Fixed64Rules),
        #[prost(message, tag = "11")]
        Sfixed32(super::SFixed32Rules),
        #[prost(message, tag = "12")]
        Sfixed64(super::SFixed64Rules),
        #[prost(message, tag = "13")]
        Bool(super::BoolRules),
        #[prost(message, tag = "14")]
        String(super::StringRules),
        #[prost(message, tag = "15")]
        Bytes(super::BytesRules),
        #[prost(message, tag = "16")]
        Enum(super::EnumRules),
        #[prost(message, tag = "18")]
        Repeated(super::RepeatedRules),
        #[prost(message, tag = "19")]
        Map(super::MapRules),
        #[prost(message, tag = "20")]
        Any(super::AnyRules),
        #[prost(message, tag = "21")]
        Duration(super::DurationRules),
        #[prost(message, tag = "22")]
        Timestamp(super::TimestampRules),
    }
}

macro_rules! numeric_rules {
    ($(#[$doc:meta])* $name:ident, $value_ty:ty, $proto_ty:ident) => {
        $(#[$doc])*
        #[derive(Clone, PartialEq, ::prost::Message)]
        pub struct $name {
            #[prost($proto_ty, optional, tag = "1")]
            pub r#const: Option<$value_ty>,
            #[prost($proto_ty, optional, tag = "2")]
            pub lt: Option<$value_ty>,
            #[prost($proto_ty, optional, tag = "3")]
            pub lte: Option<$value_ty>,
            #[prost($proto_ty, optional, tag = "4")]
            pub gt: Option<$value_ty>,
            #[prost($proto_ty, optional, tag = "5")]
            pub gte: Option<$value_ty>,
            #[prost($proto_ty, repeated, packed = "false", tag = "6")]
            pub r#in: Vec<$value_ty>,
            #[prost($proto_ty, repeated, packed = "false", tag = "7")]
            pub not_in: Vec<$value_ty>,
            #[prost(bool, optional, tag = "8")]
            pub ignore_empty: Option<bool>,
        }
    };
}

numeric_rules!(
    /// Constraints for `float` fields.
    FloatRules, f32, float
);
numeric_rules!(
    /// Constraints for `double` fields.
    DoubleRules, f64, double
);
numeric_rules!(
    /// Constraints for `int32` fields.
    Int32Rules, i32, int32
);
numeric_rules!(
    /// Constraints for `int64` fields.
    Int64Rules, i64, int64
);
numeric_rules!(
    /// Constraints for `uint32` fields.
    UInt32Rules, u32, uint32
);
numeric_rules!(
    /// Constraints for `uint64` fields.
    UInt64Rules, u64, uint64
);
numeric_rules!(
    /// Constraints for `sint32` fields.
    SInt32Rules, i32, sint32
);
numeric_rules!(
    /// Constraints for `sint64` fields.
    SInt64Rules, i64, sint64
);
numeric_rules!(
    /// Constraints for `fixed32` fields.
    Fixed32Rules, u32, fixed32
);
numeric_rules!(
    /// Constraints for `fixed64` fields.
    Fixed64Rules, u64, fixed64
);
numeric_rules!(
    /// Constraints for `sfixed32` fields.
    SFixed32Rules, i32, sfixed32
);
numeric_rules!(
    /// Constraints for `sfixed64` fields.
    SFixed64Rules, i64, sfixed64
);

/// Constraints for `bool` fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BoolRules {
    #[prost(bool, optional, tag = "1")]
    pub r#const: Option<bool>,
}

/// Constraints for `string` fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct StringRules {
    #[prost(string, optional, tag = "1")]
    pub r#const: Option<String>,
    #[prost(uint64, optional, tag = "19")]
    pub len: Option<u64>,
    #[prost(uint64, optional, tag = "2")]
    pub min_len: Option<u64>,
    #[prost(uint64, optional, tag = "3")]
    pub max_len: Option<u64>,
    #[prost(string, optional, tag = "6")]
    pub pattern: Option<String>,
    #[prost(string, optional, tag = "7")]
    pub prefix: Option<String>,
    #[prost(string, optional, tag = "8")]
    pub suffix: Option<String>,
    #[prost(string, optional, tag = "9")]
    pub contains: Option<String>,
    #[prost(string, repeated, tag = "10")]
    pub r#in: Vec<String>,
    #[prost(string, repeated, tag = "11")]
    pub not_in: Vec<String>,
    #[prost(bool, optional, tag = "26")]
    pub ignore_empty: Option<bool>,
}

/// Constraints for `bytes` fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BytesRules {
    #[prost(bytes = "vec", optional, tag = "1")]
    pub r#const: Option<Vec<u8>>,
    #[prost(uint64, optional, tag = "13")]
    pub len: Option<u64>,
    #[prost(uint64, optional, tag = "2")]
    pub min_len: Option<u64>,
    #[prost(uint64, optional, tag = "3")]
    pub max_len: Option<u64>,
    #[prost(bytes = "vec", optional, tag = "5")]
    pub prefix: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub suffix: Option<Vec<u8>>,
    #[prost(bytes = "vec", optional, tag = "7")]
    pub contains: Option<Vec<u8>>,
    #[prost(bytes = "vec", repeated, tag = "8")]
    pub r#in: Vec<Vec<u8>>,
    #[prost(bytes = "vec", repeated, tag = "9")]
    pub not_in: Vec<Vec<u8>>,
    #[prost(bool, optional, tag = "14")]
    pub ignore_empty: Option<bool>,
}

/// Constraints for enum fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EnumRules {
    #[prost(int32, optional, tag = "1")]
    pub r#const: Option<i32>,
    #[prost(bool, optional, tag = "2")]
    pub defined_only: Option<bool>,
    #[prost(int32, repeated, packed = "false", tag = "3")]
    pub r#in: Vec<i32>,
    #[prost(int32, repeated, packed = "false", tag = "4")]
    pub not_in: Vec<i32>,
}

/// Constraints applied to an embedded message field as a whole.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MessageRules {
    #[prost(bool, optional, tag = "1")]
    pub skip: Option<bool>,
    #[prost(bool, optional, tag = "2")]
    pub required: Option<bool>,
}

/// Constraints for repeated fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RepeatedRules {
    #[prost(uint64, optional, tag = "1")]
    pub min_items: Option<u64>,
    #[prost(uint64, optional, tag = "2")]
    pub max_items: Option<u64>,
    #[prost(bool, optional, tag = "3")]
    pub unique: Option<bool>,
    #[prost(message, optional, boxed, tag = "4")]
    pub items: Option<Box<FieldRules>>,
    #[prost(bool, optional, tag = "5")]
    pub ignore_empty: Option<bool>,
}

/// Constraints for map fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MapRules {
    #[prost(uint64, optional, tag = "1")]
    pub min_pairs: Option<u64>,
    #[prost(uint64, optional, tag = "2")]
    pub max_pairs: Option<u64>,
    #[prost(bool, optional, tag = "3")]
    pub no_sparse: Option<bool>,
    #[prost(message, optional, boxed, tag = "4")]
    pub keys: Option<Box<FieldRules>>,
    #[prost(message, optional, boxed, tag = "5")]
    pub values: Option<Box<FieldRules>>,
    #[prost(bool, optional, tag = "6")]
    pub ignore_empty: Option<bool>,
}

/// Constraints for `google.protobuf.Any` fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AnyRules {
    #[prost(bool, optional, tag = "1")]
    pub required: Option<bool>,
    #[prost(string, repeated, tag = "2")]
    pub r#in: Vec<String>,
    #[prost(string, repeated, tag = "3")]
    pub not_in: Vec<String>,
}

/// Constraints for `google.protobuf.Duration` fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DurationRules {
    #[prost(bool, optional, tag = "1")]
    pub required: Option<bool>,
    #[prost(message, optional, tag = "2")]
    pub r#const: Option<::prost_types::Duration>,
    #[prost(message, optional, tag = "3")]
    pub lt: Option<::prost_types::Duration>,
    #[prost(message, optional, tag = "4")]
    pub lte: Option<::prost_types::Duration>,
    #[prost(message, optional, tag = "5")]
    pub gt: Option<::prost_types::Duration>,
    #[prost(message, optional, tag = "6")]
    pub gte: Option<::prost_types::Duration>,
    #[prost(message, repeated, tag = "7")]
    pub r#in: Vec<::prost_types::Duration>,
    #[prost(message, repeated, tag = "8")]
    pub not_in: Vec<::prost_types::Duration>,
}

/// Constraints for `google.protobuf.Timestamp` fields.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TimestampRules {
    #[prost(bool, optional, tag = "1")]
    pub required: Option<bool>,
    #[prost(message, optional, tag = "2")]
    pub r#const: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "3")]
    pub lt: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "4")]
    pub lte: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "5")]
    pub gt: Option<::prost_types::Timestamp>,
    #[prost(message, optional, tag = "6")]
    pub gte: Option<::prost_types::Timestamp>,
    #[prost(bool, optional, tag = "7")]
    pub lt_now: Option<bool>,
    #[prost(bool, optional, tag = "8")]
    pub gt_now: Option<bool>,
    #[prost(message, optional, tag = "9")]
    pub within: Option<::prost_types::Duration>,
}
