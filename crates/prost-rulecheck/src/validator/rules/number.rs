use std::fmt::{self, Display};
use std::ops::Bound;

use prost_rulecheck_types::{
    DoubleRules, Fixed32Rules, Fixed64Rules, FloatRules, Int32Rules, Int64Rules, SFixed32Rules,
    SFixed64Rules, SInt32Rules, SInt64Rules, UInt32Rules, UInt64Rules,
};

use crate::error::ConversionError;
use crate::value::RawValue;

/// A numeric type the constraint compiler can be instantiated for.
pub trait Number: Copy + PartialOrd + Display + Send + Sync + 'static {
    /// Name of the target representation, e.g. `"int32"`.
    const TYPE_NAME: &'static str;

    /// The zero value, used to honor `ignore_empty`.
    const ZERO: Self;

    /// Convert a raw caller-supplied value.
    ///
    /// # Errors
    ///
    /// Returns a `ConversionError` when the value does not parse or does not
    /// fit this type.
    fn from_raw(raw: &RawValue) -> Result<Self, ConversionError>;
}

macro_rules! integer_number {
    ($ty:ty, $name:literal) => {
        impl Number for $ty {
            const TYPE_NAME: &'static str = $name;
            const ZERO: Self = 0;

            fn from_raw(raw: &RawValue) -> Result<Self, ConversionError> {
                let wide: i128 = match raw {
                    RawValue::Text(text) => text.trim().parse::<i128>().map_err(|err| {
                        ConversionError::new(raw, $name, err.to_string())
                    })?,
                    RawValue::Int(v) => i128::from(*v),
                    RawValue::Uint(v) => i128::from(*v),
                    RawValue::Float(v) => {
                        if !v.is_finite() || v.fract() != 0.0 {
                            return Err(ConversionError::new(raw, $name, "not an integer"));
                        }
                        if v.abs() > 2f64.powi(64) {
                            return Err(ConversionError::new(raw, $name, "out of range"));
                        }
                        #[allow(clippy::cast_possible_truncation)]
                        let wide = *v as i128;
                        wide
                    }
                    RawValue::Bool(_) => {
                        return Err(ConversionError::new(raw, $name, "not a number"));
                    }
                };
                <$ty>::try_from(wide).map_err(|_| ConversionError::new(raw, $name, "out of range"))
            }
        }
    };
}

integer_number!(u32, "uint32");
integer_number!(u64, "uint64");
integer_number!(i32, "int32");
integer_number!(i64, "int64");

fn parse_f64(raw: &RawValue, target: &'static str) -> Result<f64, ConversionError> {
    match raw {
        RawValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|err| ConversionError::new(raw, target, err.to_string())),
        #[allow(clippy::cast_precision_loss)]
        RawValue::Int(v) => Ok(*v as f64),
        #[allow(clippy::cast_precision_loss)]
        RawValue::Uint(v) => Ok(*v as f64),
        RawValue::Float(v) => Ok(*v),
        RawValue::Bool(_) => Err(ConversionError::new(raw, target, "not a number")),
    }
}

impl Number for f64 {
    const TYPE_NAME: &'static str = "double";
    const ZERO: Self = 0.0;

    fn from_raw(raw: &RawValue) -> Result<Self, ConversionError> {
        parse_f64(raw, Self::TYPE_NAME)
    }
}

impl Number for f32 {
    const TYPE_NAME: &'static str = "float";
    const ZERO: Self = 0.0;

    fn from_raw(raw: &RawValue) -> Result<Self, ConversionError> {
        let wide = parse_f64(raw, Self::TYPE_NAME)?;
        if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
            return Err(ConversionError::new(raw, Self::TYPE_NAME, "out of range"));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(wide as f32)
    }
}

/// Read access to a numeric constraint payload. Every rule is optional and
/// its presence is tracked independently of its value.
pub trait NumericRules {
    /// The element type the rules constrain.
    type Value: Number;

    /// Whether an empty value skips validation.
    fn ignore_empty(&self) -> bool;
    /// Exact value required.
    fn const_value(&self) -> Option<Self::Value>;
    /// Exclusive upper bound.
    fn lt(&self) -> Option<Self::Value>;
    /// Inclusive upper bound.
    fn lte(&self) -> Option<Self::Value>;
    /// Exclusive lower bound.
    fn gt(&self) -> Option<Self::Value>;
    /// Inclusive lower bound.
    fn gte(&self) -> Option<Self::Value>;
    /// Allowed values.
    fn in_list(&self) -> &[Self::Value];
    /// Excluded values.
    fn not_in_list(&self) -> &[Self::Value];
}

macro_rules! numeric_rules {
    ($($rules_ty:ty => $value_ty:ty),* $(,)?) => {
        $(
            impl NumericRules for $rules_ty {
                type Value = $value_ty;

                fn ignore_empty(&self) -> bool {
                    self.ignore_empty.unwrap_or(false)
                }

                fn const_value(&self) -> Option<$value_ty> {
                    self.r#const
                }

                fn lt(&self) -> Option<$value_ty> {
                    self.lt
                }

                fn lte(&self) -> Option<$value_ty> {
                    self.lte
                }

                fn gt(&self) -> Option<$value_ty> {
                    self.gt
                }

                fn gte(&self) -> Option<$value_ty> {
                    self.gte
                }

                fn in_list(&self) -> &[$value_ty] {
                    &self.r#in
                }

                fn not_in_list(&self) -> &[$value_ty] {
                    &self.not_in
                }
            }
        )*
    };
}

numeric_rules!(
    FloatRules => f32,
    DoubleRules => f64,
    Int32Rules => i32,
    Int64Rules => i64,
    UInt32Rules => u32,
    UInt64Rules => u64,
    SInt32Rules => i32,
    SInt64Rules => i64,
    Fixed32Rules => u32,
    Fixed64Rules => u64,
    SFixed32Rules => i32,
    SFixed64Rules => i64,
);

/// A compiled, stateless predicate over a numeric value.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberRule<T> {
    /// Value must equal the constant.
    Const(T),
    /// Value must be below the bound.
    Lt(T),
    /// Value must be at or below the bound.
    Lte(T),
    /// Value must be above the bound.
    Gt(T),
    /// Value must be at or above the bound.
    Gte(T),
    /// Value must lie within the interval; if the interval is empty or
    /// inverted, value must lie outside it.
    Range {
        /// `Excluded` for `gt`, `Included` for `gte`.
        lower: Bound<T>,
        /// `Excluded` for `lt`, `Included` for `lte`.
        upper: Bound<T>,
    },
    /// Value must be one of the listed values.
    In(Vec<T>),
    /// Value must not be one of the listed values.
    NotIn(Vec<T>),
}

impl<T: Number> NumberRule<T> {
    /// The rule's suffix in a dotted rule id, e.g. `gte_lt` or
    /// `gt_lte_exclusive`.
    #[must_use]
    pub fn rule_name(&self) -> &'static str {
        match self {
            Self::Const(_) => "const",
            Self::Lt(_) => "lt",
            Self::Lte(_) => "lte",
            Self::Gt(_) => "gt",
            Self::Gte(_) => "gte",
            Self::Range { lower, upper } => {
                let inverted = !range_is_inclusive(lower, upper);
                match (lower, upper, inverted) {
                    (Bound::Excluded(_), Bound::Excluded(_), false) => "gt_lt",
                    (Bound::Excluded(_), Bound::Excluded(_), true) => "gt_lt_exclusive",
                    (Bound::Excluded(_), _, false) => "gt_lte",
                    (Bound::Excluded(_), _, true) => "gt_lte_exclusive",
                    (_, Bound::Excluded(_), false) => "gte_lt",
                    (_, Bound::Excluded(_), true) => "gte_lt_exclusive",
                    (_, _, false) => "gte_lte",
                    (_, _, true) => "gte_lte_exclusive",
                }
            }
            Self::In(_) => "in",
            Self::NotIn(_) => "not_in",
        }
    }

    /// Apply the rule to a value, returning the failure message on rejection.
    ///
    /// # Errors
    ///
    /// Returns the human-readable reason when the value does not satisfy the rule.
    pub fn check(&self, v: T) -> Result<(), String> {
        let ok = match self {
            Self::Const(c) => v == *c,
            Self::Lt(lt) => v < *lt,
            Self::Lte(lte) => v <= *lte,
            Self::Gt(gt) => v > *gt,
            Self::Gte(gte) => v >= *gte,
            Self::Range { lower, upper } => {
                let inside = above(v, lower) && below(v, upper);
                if range_is_inclusive(lower, upper) {
                    inside
                } else {
                    // Inverted bounds: values between them are rejected.
                    above(v, lower) || below(v, upper)
                }
            }
            Self::In(list) => list.contains(&v),
            Self::NotIn(list) => !list.contains(&v),
        };
        if ok { Ok(()) } else { Err(self.to_string()) }
    }
}

fn above<T: PartialOrd>(v: T, lower: &Bound<T>) -> bool {
    match lower {
        Bound::Included(b) => v >= *b,
        Bound::Excluded(b) => v > *b,
        Bound::Unbounded => true,
    }
}

fn below<T: PartialOrd>(v: T, upper: &Bound<T>) -> bool {
    match upper {
        Bound::Included(b) => v <= *b,
        Bound::Excluded(b) => v < *b,
        Bound::Unbounded => true,
    }
}

/// Whether the bounds describe a non-empty interval. Otherwise the range is
/// exclusive and accepts values outside `[upper, lower]`.
fn range_is_inclusive<T: PartialOrd>(lower: &Bound<T>, upper: &Bound<T>) -> bool {
    match (lower, upper) {
        (Bound::Included(lo), Bound::Included(hi)) => lo <= hi,
        (Bound::Included(lo) | Bound::Excluded(lo), Bound::Included(hi) | Bound::Excluded(hi)) => {
            lo < hi
        }
        _ => true,
    }
}

fn join<T: Display>(list: &[T]) -> String {
    list.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl<T: Number> Display for NumberRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Const(c) => write!(f, "value must equal {c}"),
            Self::Lt(lt) => write!(f, "value must be less than {lt}"),
            Self::Lte(lte) => write!(f, "value must be less than or equal to {lte}"),
            Self::Gt(gt) => write!(f, "value must be greater than {gt}"),
            Self::Gte(gte) => write!(f, "value must be greater than or equal to {gte}"),
            Self::Range { lower, upper } => {
                let (open, lo) = match lower {
                    Bound::Included(lo) => ('[', lo.to_string()),
                    Bound::Excluded(lo) => ('(', lo.to_string()),
                    Bound::Unbounded => ('(', "-inf".to_string()),
                };
                let (close, hi) = match upper {
                    Bound::Included(hi) => (']', hi.to_string()),
                    Bound::Excluded(hi) => (')', hi.to_string()),
                    Bound::Unbounded => (')', "inf".to_string()),
                };
                if range_is_inclusive(lower, upper) {
                    write!(f, "value must be in range {open}{lo}, {hi}{close}")
                } else {
                    let gt = if open == '(' { "greater than" } else { "greater than or equal to" };
                    let lt = if close == ')' { "less than" } else { "less than or equal to" };
                    write!(f, "value must be {gt} {lo} or {lt} {hi}")
                }
            }
            Self::In(list) => write!(f, "value must be in list [{}]", join(list)),
            Self::NotIn(list) => write!(f, "value must not be in list [{}]", join(list)),
        }
    }
}

/// Compile a numeric constraint payload into its ordered rule list:
/// const, then range or single bounds, then `in`, then `not_in`.
///
/// A lower and an upper bound together compile to one [`NumberRule::Range`].
/// `ignore_empty` produces no rule; callers honor it before running the list.
pub fn compile<R: NumericRules>(rules: &R) -> Vec<NumberRule<R::Value>> {
    let mut out = Vec::new();

    if let Some(c) = rules.const_value() {
        out.push(NumberRule::Const(c));
    }

    let has_lower = rules.gt().is_some() || rules.gte().is_some();
    let has_upper = rules.lt().is_some() || rules.lte().is_some();

    if has_lower && has_upper {
        // The strict bound wins when both forms are set on one side.
        let lower = match (rules.gt(), rules.gte()) {
            (Some(gt), _) => Bound::Excluded(gt),
            (None, Some(gte)) => Bound::Included(gte),
            (None, None) => Bound::Unbounded,
        };
        let upper = match (rules.lt(), rules.lte()) {
            (Some(lt), _) => Bound::Excluded(lt),
            (None, Some(lte)) => Bound::Included(lte),
            (None, None) => Bound::Unbounded,
        };
        out.push(NumberRule::Range { lower, upper });
    } else {
        out.extend(rules.lt().map(NumberRule::Lt));
        out.extend(rules.lte().map(NumberRule::Lte));
        out.extend(rules.gt().map(NumberRule::Gt));
        out.extend(rules.gte().map(NumberRule::Gte));
    }

    if !rules.in_list().is_empty() {
        out.push(NumberRule::In(rules.in_list().to_vec()));
    }
    if !rules.not_in_list().is_empty() {
        out.push(NumberRule::NotIn(rules.not_in_list().to_vec()));
    }

    out
}

#[cfg(test)]
mod tests {
    use std::ops::Bound;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use prost_rulecheck_types::{DoubleRules, FloatRules, Int32Rules, UInt32Rules, UInt64Rules};

    use super::{Number, NumberRule, compile};
    use crate::value::RawValue;

    fn failures<T: Number>(rules: &[NumberRule<T>], v: T) -> Vec<String> {
        rules.iter().filter_map(|rule| rule.check(v).err()).collect()
    }

    #[test]
    fn empty_payload_compiles_to_no_rules() {
        assert!(compile(&Int32Rules::default()).is_empty());
    }

    #[test]
    fn lower_and_upper_bound_compile_to_one_range() {
        let rules = compile(&Int32Rules {
            gt: Some(1),
            lt: Some(10),
            ..Int32Rules::default()
        });
        assert_eq!(
            rules,
            vec![NumberRule::Range {
                lower: Bound::Excluded(1),
                upper: Bound::Excluded(10),
            }]
        );
        assert_eq!(rules[0].rule_name(), "gt_lt");

        assert!(rules[0].check(5).is_ok());
        for v in [-3, 1, 10, 42] {
            assert_eq!(
                rules[0].check(v),
                Err("value must be in range (1, 10)".to_string())
            );
        }
    }

    #[test]
    fn half_open_and_closed_ranges_respect_endpoints() {
        let left_closed = compile(&Int32Rules {
            gte: Some(1),
            lt: Some(10),
            ..Int32Rules::default()
        });
        assert!(left_closed[0].check(1).is_ok());
        assert_eq!(
            left_closed[0].check(10),
            Err("value must be in range [1, 10)".to_string())
        );

        let right_closed = compile(&Int32Rules {
            gt: Some(1),
            lte: Some(10),
            ..Int32Rules::default()
        });
        assert!(right_closed[0].check(1).is_err());
        assert!(right_closed[0].check(10).is_ok());
        assert_eq!(right_closed[0].rule_name(), "gt_lte");

        let closed = compile(&Int32Rules {
            gte: Some(1),
            lte: Some(10),
            ..Int32Rules::default()
        });
        assert!(closed[0].check(1).is_ok());
        assert!(closed[0].check(10).is_ok());
        assert_eq!(closed[0].rule_name(), "gte_lte");
    }

    #[test]
    fn single_sided_bounds_compile_independently() {
        let rules = compile(&Int32Rules {
            lt: Some(10),
            lte: Some(5),
            ..Int32Rules::default()
        });
        assert_eq!(rules, vec![NumberRule::Lt(10), NumberRule::Lte(5)]);
        assert_eq!(
            failures(&rules, 7),
            vec!["value must be less than or equal to 5".to_string()]
        );

        let rules = compile(&UInt64Rules {
            gte: Some(0),
            ..UInt64Rules::default()
        });
        assert_eq!(rules, vec![NumberRule::Gte(0)]);
    }

    #[test]
    fn strict_bound_wins_when_both_forms_are_set() {
        let rules = compile(&Int32Rules {
            gt: Some(0),
            gte: Some(-5),
            lt: Some(10),
            lte: Some(20),
            ..Int32Rules::default()
        });
        assert_eq!(
            rules,
            vec![NumberRule::Range {
                lower: Bound::Excluded(0),
                upper: Bound::Excluded(10),
            }]
        );
    }

    #[test]
    fn inverted_bounds_accept_values_outside_the_gap() {
        let rules = compile(&Int32Rules {
            gt: Some(10),
            lt: Some(5),
            ..Int32Rules::default()
        });
        assert_eq!(rules[0].rule_name(), "gt_lt_exclusive");
        assert!(rules[0].check(11).is_ok());
        assert!(rules[0].check(4).is_ok());
        assert_eq!(
            rules[0].check(7),
            Err("value must be greater than 10 or less than 5".to_string())
        );
    }

    #[test]
    fn const_is_checked_independently_of_range() {
        let rules = compile(&Int32Rules {
            r#const: Some(5),
            gte: Some(0),
            lte: Some(10),
            ..Int32Rules::default()
        });
        assert_eq!(failures(&rules, 5), Vec::<String>::new());
        assert_eq!(
            failures(&rules, 6),
            vec!["value must equal 5".to_string()]
        );
    }

    #[test]
    fn not_in_checks_its_own_set() {
        let rules = compile(&Int32Rules {
            r#in: vec![1, 2, 3],
            not_in: vec![2],
            ..Int32Rules::default()
        });
        assert_eq!(
            rules,
            vec![NumberRule::In(vec![1, 2, 3]), NumberRule::NotIn(vec![2])]
        );
        assert_eq!(
            failures(&rules, 2),
            vec!["value must not be in list [2]".to_string()]
        );
        assert_eq!(
            failures(&rules, 4),
            vec!["value must be in list [1, 2, 3]".to_string()]
        );
        assert!(failures(&rules, 1).is_empty());
    }

    #[test]
    fn compiled_order_is_const_range_in_not_in() {
        let rules = compile(&Int32Rules {
            r#const: Some(3),
            gt: Some(0),
            r#in: vec![3],
            not_in: vec![4],
            ..Int32Rules::default()
        });
        let names: Vec<_> = rules.iter().map(NumberRule::rule_name).collect();
        assert_eq!(names, vec!["const", "gt", "in", "not_in"]);
    }

    #[test]
    fn nan_fails_comparison_rules() {
        let rules = compile(&DoubleRules {
            gt: Some(0.0),
            ..DoubleRules::default()
        });
        assert!(rules[0].check(f64::NAN).is_err());
        assert!(rules[0].check(0.5).is_ok());
    }

    #[test]
    fn integer_coercion_range_checks_the_target_width() {
        assert_eq!(i32::from_raw(&RawValue::from(" 42 ")), Ok(42));
        assert_eq!(u64::from_raw(&RawValue::Int(7)), Ok(7));
        assert_eq!(i64::from_raw(&RawValue::Float(3.0)), Ok(3));

        let err = i32::from_raw(&RawValue::from("2147483648")).expect_err("too wide");
        assert_eq!(err.target, "int32");
        assert_eq!(err.reason, "out of range");

        assert!(u32::from_raw(&RawValue::Int(-1)).is_err());
        assert!(i32::from_raw(&RawValue::Float(1.5)).is_err());
        assert!(i32::from_raw(&RawValue::from("abc")).is_err());
        assert!(i32::from_raw(&RawValue::Bool(true)).is_err());
    }

    #[test]
    fn float_coercion_parses_text() {
        assert_eq!(f64::from_raw(&RawValue::from("12.5")), Ok(12.5));
        assert_eq!(f32::from_raw(&RawValue::Int(2)), Ok(2.0));
        assert!(f32::from_raw(&RawValue::from("1e40")).is_err());
        assert!(f64::from_raw(&RawValue::from("twelve")).is_err());
    }

    proptest! {
        #[test]
        fn open_range_accepts_exactly_the_interior(
            a in -1000_i64..1000,
            width in 1_i64..1000,
            v in -3000_i64..3000,
        ) {
            let b = a + width;
            let rules = compile(&prost_rulecheck_types::Int64Rules {
                gt: Some(a),
                lt: Some(b),
                ..prost_rulecheck_types::Int64Rules::default()
            });
            prop_assert_eq!(rules.len(), 1);
            let verdict = rules[0].check(v);
            prop_assert_eq!(verdict.is_ok(), a < v && v < b);
            if let Err(message) = verdict {
                prop_assert_eq!(message, format!("value must be in range ({a}, {b})"));
            }
        }

        #[test]
        fn closed_range_accepts_both_endpoints(a in any::<i32>(), b in any::<i32>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let rules = compile(&Int32Rules {
                gte: Some(lo),
                lte: Some(hi),
                ..Int32Rules::default()
            });
            prop_assert!(rules[0].check(lo).is_ok());
            prop_assert!(rules[0].check(hi).is_ok());
        }

        #[test]
        fn left_closed_u32_range(
            a in 0_u32..10_000,
            width in 1_u32..10_000,
            v in 0_u32..30_000,
        ) {
            let b = a + width;
            let rules = compile(&UInt32Rules {
                gte: Some(a),
                lt: Some(b),
                ..UInt32Rules::default()
            });
            prop_assert_eq!(rules.len(), 1);
            prop_assert_eq!(rules[0].rule_name(), "gte_lt");
            prop_assert!(rules[0].check(a).is_ok());
            prop_assert!(rules[0].check(b).is_err());
            let verdict = rules[0].check(v);
            prop_assert_eq!(verdict.is_ok(), a <= v && v < b);
            if let Err(message) = verdict {
                prop_assert_eq!(message, format!("value must be in range [{a}, {b})"));
            }
        }

        #[test]
        fn right_closed_u32_range(
            a in 0_u32..10_000,
            width in 1_u32..10_000,
            v in 0_u32..30_000,
        ) {
            let b = a + width;
            let rules = compile(&UInt32Rules {
                gt: Some(a),
                lte: Some(b),
                ..UInt32Rules::default()
            });
            prop_assert_eq!(rules[0].rule_name(), "gt_lte");
            prop_assert!(rules[0].check(a).is_err());
            prop_assert!(rules[0].check(b).is_ok());
            let verdict = rules[0].check(v);
            prop_assert_eq!(verdict.is_ok(), a < v && v <= b);
            if let Err(message) = verdict {
                prop_assert_eq!(message, format!("value must be in range ({a}, {b}]"));
            }
        }

        #[test]
        fn left_closed_f32_range(
            a in -1000.0_f32..1000.0,
            width in 0.5_f32..1000.0,
            v in -3000.0_f32..3000.0,
        ) {
            let b = a + width;
            let rules = compile(&FloatRules {
                gte: Some(a),
                lt: Some(b),
                ..FloatRules::default()
            });
            prop_assert_eq!(rules.len(), 1);
            prop_assert!(rules[0].check(a).is_ok());
            prop_assert!(rules[0].check(b).is_err());
            let verdict = rules[0].check(v);
            prop_assert_eq!(verdict.is_ok(), a <= v && v < b);
            if let Err(message) = verdict {
                prop_assert_eq!(message, format!("value must be in range [{a}, {b})"));
            }
        }

        #[test]
        fn right_closed_f32_range(
            a in -1000.0_f32..1000.0,
            width in 0.5_f32..1000.0,
            v in -3000.0_f32..3000.0,
        ) {
            let b = a + width;
            let rules = compile(&FloatRules {
                gt: Some(a),
                lte: Some(b),
                ..FloatRules::default()
            });
            prop_assert!(rules[0].check(a).is_err());
            prop_assert!(rules[0].check(b).is_ok());
            let verdict = rules[0].check(v);
            prop_assert_eq!(verdict.is_ok(), a < v && v <= b);
            if let Err(message) = verdict {
                prop_assert_eq!(message, format!("value must be in range ({a}, {b}]"));
            }
        }
    }
}
