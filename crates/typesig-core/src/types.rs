//! Concrete argument types produced by resolving a [`TypeNode`](crate::ast::TypeNode).
//!
//! Parameter slots keep their [`IntegerParameter`] so that variables such as
//! `P` or `L1` survive until an inference pass binds them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ast::IntegerParameter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Nullability {
    #[default]
    Required,
    Nullable,
}

impl Nullability {
    pub fn from_flag(nullable: bool) -> Self {
        if nullable {
            Nullability::Nullable
        } else {
            Nullability::Required
        }
    }

    pub fn is_nullable(self) -> bool {
        self == Nullability::Nullable
    }
}

/// Scalar types that take no parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarKind {
    Boolean,
    I8,
    I16,
    I32,
    I64,
    Fp32,
    Fp64,
    String,
    Binary,
    Timestamp,
    TimestampTz,
    Date,
    Time,
    IntervalYear,
    IntervalDay,
    Uuid,
}

impl ScalarKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarKind::Boolean => "boolean",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::Fp32 => "fp32",
            ScalarKind::Fp64 => "fp64",
            ScalarKind::String => "string",
            ScalarKind::Binary => "binary",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::TimestampTz => "timestamp_tz",
            ScalarKind::Date => "date",
            ScalarKind::Time => "time",
            ScalarKind::IntervalYear => "interval_year",
            ScalarKind::IntervalDay => "interval_day",
            ScalarKind::Uuid => "uuid",
        }
    }
}

/// Sub-second precision codes accepted by `precision_timestamp<N>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimestampPrecision {
    Seconds = 0,
    DeciSeconds = 1,
    CentiSeconds = 2,
    MilliSeconds = 3,
    EMinus4Seconds = 4,
    EMinus5Seconds = 5,
    MicroSeconds = 6,
    EMinus7Seconds = 7,
    EMinus8Seconds = 8,
    NanoSeconds = 9,
}

impl TryFrom<i32> for TimestampPrecision {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => TimestampPrecision::Seconds,
            1 => TimestampPrecision::DeciSeconds,
            2 => TimestampPrecision::CentiSeconds,
            3 => TimestampPrecision::MilliSeconds,
            4 => TimestampPrecision::EMinus4Seconds,
            5 => TimestampPrecision::EMinus5Seconds,
            6 => TimestampPrecision::MicroSeconds,
            7 => TimestampPrecision::EMinus7Seconds,
            8 => TimestampPrecision::EMinus8Seconds,
            9 => TimestampPrecision::NanoSeconds,
            other => return Err(other),
        })
    }
}

/// Discriminant of a [`FuncArgType`], for identity comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Scalar(ScalarKind),
    FixedChar,
    VarChar,
    FixedBinary,
    Decimal,
    PrecisionTimestamp,
    PrecisionTimestampTz,
    List,
    Map,
    Struct,
    Any,
    Extension,
}

/// Argument of an extension type after resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtensionArg {
    Integer(IntegerParameter),
    Type(FuncArgType),
}

/// A function argument or return type with its parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FuncArgType {
    Scalar {
        kind: ScalarKind,
        nullability: Nullability,
    },
    FixedChar {
        length: IntegerParameter,
        nullability: Nullability,
    },
    VarChar {
        length: IntegerParameter,
        nullability: Nullability,
    },
    FixedBinary {
        length: IntegerParameter,
        nullability: Nullability,
    },
    Decimal {
        precision: IntegerParameter,
        scale: IntegerParameter,
        nullability: Nullability,
    },
    PrecisionTimestamp {
        precision: IntegerParameter,
        nullability: Nullability,
    },
    PrecisionTimestampTz {
        precision: IntegerParameter,
        nullability: Nullability,
    },
    List {
        element: Box<FuncArgType>,
        nullability: Nullability,
    },
    Map {
        key: Box<FuncArgType>,
        value: Box<FuncArgType>,
        nullability: Nullability,
    },
    Struct {
        fields: Vec<FuncArgType>,
        nullability: Nullability,
    },
    /// Matches any type during inference
    Any { nullability: Nullability },
    /// A type contributed by a catalog extension
    Extension {
        name: String,
        args: Vec<ExtensionArg>,
        nullability: Nullability,
    },
}

impl FuncArgType {
    pub fn scalar(kind: ScalarKind, nullability: Nullability) -> Self {
        FuncArgType::Scalar { kind, nullability }
    }

    pub fn decimal(
        precision: IntegerParameter,
        scale: IntegerParameter,
        nullability: Nullability,
    ) -> Self {
        FuncArgType::Decimal {
            precision,
            scale,
            nullability,
        }
    }

    pub fn list(element: FuncArgType, nullability: Nullability) -> Self {
        FuncArgType::List {
            element: Box::new(element),
            nullability,
        }
    }

    pub fn map(key: FuncArgType, value: FuncArgType, nullability: Nullability) -> Self {
        FuncArgType::Map {
            key: Box::new(key),
            value: Box::new(value),
            nullability,
        }
    }

    pub fn structure(fields: Vec<FuncArgType>, nullability: Nullability) -> Self {
        FuncArgType::Struct {
            fields,
            nullability,
        }
    }

    pub fn any(nullability: Nullability) -> Self {
        FuncArgType::Any { nullability }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            FuncArgType::Scalar { kind, .. } => TypeKind::Scalar(*kind),
            FuncArgType::FixedChar { .. } => TypeKind::FixedChar,
            FuncArgType::VarChar { .. } => TypeKind::VarChar,
            FuncArgType::FixedBinary { .. } => TypeKind::FixedBinary,
            FuncArgType::Decimal { .. } => TypeKind::Decimal,
            FuncArgType::PrecisionTimestamp { .. } => TypeKind::PrecisionTimestamp,
            FuncArgType::PrecisionTimestampTz { .. } => TypeKind::PrecisionTimestampTz,
            FuncArgType::List { .. } => TypeKind::List,
            FuncArgType::Map { .. } => TypeKind::Map,
            FuncArgType::Struct { .. } => TypeKind::Struct,
            FuncArgType::Any { .. } => TypeKind::Any,
            FuncArgType::Extension { .. } => TypeKind::Extension,
        }
    }

    pub fn nullability(&self) -> Nullability {
        match self {
            FuncArgType::Scalar { nullability, .. }
            | FuncArgType::FixedChar { nullability, .. }
            | FuncArgType::VarChar { nullability, .. }
            | FuncArgType::FixedBinary { nullability, .. }
            | FuncArgType::Decimal { nullability, .. }
            | FuncArgType::PrecisionTimestamp { nullability, .. }
            | FuncArgType::PrecisionTimestampTz { nullability, .. }
            | FuncArgType::List { nullability, .. }
            | FuncArgType::Map { nullability, .. }
            | FuncArgType::Struct { nullability, .. }
            | FuncArgType::Any { nullability }
            | FuncArgType::Extension { nullability, .. } => *nullability,
        }
    }

    pub fn with_nullability(mut self, value: Nullability) -> Self {
        match &mut self {
            FuncArgType::Scalar { nullability, .. }
            | FuncArgType::FixedChar { nullability, .. }
            | FuncArgType::VarChar { nullability, .. }
            | FuncArgType::FixedBinary { nullability, .. }
            | FuncArgType::Decimal { nullability, .. }
            | FuncArgType::PrecisionTimestamp { nullability, .. }
            | FuncArgType::PrecisionTimestampTz { nullability, .. }
            | FuncArgType::List { nullability, .. }
            | FuncArgType::Map { nullability, .. }
            | FuncArgType::Struct { nullability, .. }
            | FuncArgType::Any { nullability }
            | FuncArgType::Extension { nullability, .. } => *nullability = value,
        }
        self
    }

    /// Precision code of a timestamp type, when it is concrete and one of the
    /// known codes. Other values are carried through resolution unchanged.
    pub fn timestamp_precision(&self) -> Option<TimestampPrecision> {
        match self {
            FuncArgType::PrecisionTimestamp { precision, .. }
            | FuncArgType::PrecisionTimestampTz { precision, .. } => precision
                .as_concrete()
                .and_then(|value| TimestampPrecision::try_from(value).ok()),
            _ => None,
        }
    }

    /// Variables referenced anywhere in this type, in order of appearance
    pub fn variables(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            FuncArgType::FixedChar { length, .. }
            | FuncArgType::VarChar { length, .. }
            | FuncArgType::FixedBinary { length, .. } => push_variable(length, out),
            FuncArgType::Decimal {
                precision, scale, ..
            } => {
                push_variable(precision, out);
                push_variable(scale, out);
            }
            FuncArgType::PrecisionTimestamp { precision, .. }
            | FuncArgType::PrecisionTimestampTz { precision, .. } => push_variable(precision, out),
            FuncArgType::List { element, .. } => element.collect_variables(out),
            FuncArgType::Map { key, value, .. } => {
                key.collect_variables(out);
                value.collect_variables(out);
            }
            FuncArgType::Struct { fields, .. } => {
                for field in fields {
                    field.collect_variables(out);
                }
            }
            FuncArgType::Extension { args, .. } => {
                for arg in args {
                    match arg {
                        ExtensionArg::Integer(param) => push_variable(param, out),
                        ExtensionArg::Type(ty) => ty.collect_variables(out),
                    }
                }
            }
            FuncArgType::Scalar { .. } | FuncArgType::Any { .. } => {}
        }
    }
}

fn push_variable<'a>(param: &'a IntegerParameter, out: &mut Vec<&'a str>) {
    if let IntegerParameter::Variable(name) = param {
        out.push(name.as_str());
    }
}

fn write_head(f: &mut fmt::Formatter<'_>, name: &str, nullability: Nullability) -> fmt::Result {
    f.write_str(name)?;
    if nullability.is_nullable() {
        f.write_str("?")?;
    }
    Ok(())
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T], sep: &str) -> fmt::Result {
    f.write_str("<")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(">")
}

impl fmt::Display for ExtensionArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtensionArg::Integer(param) => write!(f, "{param}"),
            ExtensionArg::Type(ty) => write!(f, "{ty}"),
        }
    }
}

impl fmt::Display for FuncArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nullability = self.nullability();
        match self {
            FuncArgType::Scalar { kind, .. } => write_head(f, kind.as_str(), nullability),
            FuncArgType::FixedChar { length, .. } => {
                write_head(f, "fixedchar", nullability)?;
                write!(f, "<{length}>")
            }
            FuncArgType::VarChar { length, .. } => {
                write_head(f, "varchar", nullability)?;
                write!(f, "<{length}>")
            }
            FuncArgType::FixedBinary { length, .. } => {
                write_head(f, "fixedbinary", nullability)?;
                write!(f, "<{length}>")
            }
            FuncArgType::Decimal {
                precision, scale, ..
            } => {
                write_head(f, "decimal", nullability)?;
                write!(f, "<{precision},{scale}>")
            }
            FuncArgType::PrecisionTimestamp { precision, .. } => {
                write_head(f, "precision_timestamp", nullability)?;
                write!(f, "<{precision}>")
            }
            FuncArgType::PrecisionTimestampTz { precision, .. } => {
                write_head(f, "precision_timestamp_tz", nullability)?;
                write!(f, "<{precision}>")
            }
            FuncArgType::List { element, .. } => {
                write_head(f, "list", nullability)?;
                write!(f, "<{element}>")
            }
            FuncArgType::Map { key, value, .. } => {
                write_head(f, "map", nullability)?;
                write!(f, "<{key}, {value}>")
            }
            FuncArgType::Struct { fields, .. } => {
                write_head(f, "struct", nullability)?;
                write_list(f, fields, ", ")
            }
            FuncArgType::Any { .. } => write_head(f, "any", nullability),
            FuncArgType::Extension { name, args, .. } => {
                write_head(f, name, nullability)?;
                if args.is_empty() {
                    return Ok(());
                }
                let sep = if args.iter().all(|a| matches!(a, ExtensionArg::Integer(_))) {
                    ","
                } else {
                    ", "
                };
                write_list(f, args, sep)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_codes() {
        assert_eq!(
            TimestampPrecision::try_from(5),
            Ok(TimestampPrecision::EMinus5Seconds)
        );
        assert_eq!(TimestampPrecision::EMinus5Seconds as i32, 5);
        assert_eq!(TimestampPrecision::try_from(10), Err(10));
        assert_eq!(TimestampPrecision::try_from(-1), Err(-1));
    }

    #[test]
    fn test_timestamp_precision_view() {
        let ts = FuncArgType::PrecisionTimestamp {
            precision: IntegerParameter::concrete(6),
            nullability: Nullability::Required,
        };
        assert_eq!(ts.timestamp_precision(), Some(TimestampPrecision::MicroSeconds));

        let out_of_range = FuncArgType::PrecisionTimestampTz {
            precision: IntegerParameter::concrete(12),
            nullability: Nullability::Nullable,
        };
        assert_eq!(out_of_range.timestamp_precision(), None);

        let variable = FuncArgType::PrecisionTimestamp {
            precision: IntegerParameter::variable("P"),
            nullability: Nullability::Required,
        };
        assert_eq!(variable.timestamp_precision(), None);
        assert_eq!(
            FuncArgType::scalar(ScalarKind::I8, Nullability::Required).timestamp_precision(),
            None
        );
    }

    #[test]
    fn test_kind_and_nullability() {
        let ty = FuncArgType::list(
            FuncArgType::scalar(ScalarKind::I32, Nullability::Nullable),
            Nullability::Required,
        );
        assert_eq!(ty.kind(), TypeKind::List);
        assert_eq!(ty.nullability(), Nullability::Required);

        let ty = ty.with_nullability(Nullability::Nullable);
        assert_eq!(ty.nullability(), Nullability::Nullable);
        match ty {
            FuncArgType::List { element, .. } => {
                assert_eq!(element.kind(), TypeKind::Scalar(ScalarKind::I32))
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_display_matches_signature_syntax() {
        let ty = FuncArgType::map(
            FuncArgType::decimal(
                IntegerParameter::variable("P"),
                IntegerParameter::variable("S"),
                Nullability::Required,
            ),
            FuncArgType::structure(
                vec![
                    FuncArgType::scalar(ScalarKind::I16, Nullability::Nullable),
                    FuncArgType::any(Nullability::Required),
                ],
                Nullability::Nullable,
            ),
            Nullability::Nullable,
        );
        assert_eq!(ty.to_string(), "map?<decimal<P,S>, struct?<i16?, any>>");
    }

    #[test]
    fn test_variables_in_order() {
        let ty = FuncArgType::structure(
            vec![
                FuncArgType::VarChar {
                    length: IntegerParameter::variable("L1"),
                    nullability: Nullability::Required,
                },
                FuncArgType::decimal(
                    IntegerParameter::concrete(38),
                    IntegerParameter::variable("S"),
                    Nullability::Required,
                ),
            ],
            Nullability::Required,
        );
        assert_eq!(ty.variables(), vec!["L1", "S"]);
    }
}
