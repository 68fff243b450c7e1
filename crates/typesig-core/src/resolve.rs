//! Conversion of parsed [`TypeNode`]s into concrete [`FuncArgType`]s
//!
//! Every node is checked against its catalog [`ArgRule`](crate::catalog::ArgRule)
//! before its class builds the value, so the per-class code below only ever
//! sees argument lists of the right length and kind.

use crate::ast::{IntegerParameter, TypeArg, TypeNode};
use crate::catalog::{TypeCatalog, TypeClass};
use crate::error::SignatureError;
use crate::types::{ExtensionArg, FuncArgType, Nullability};

pub fn resolve(catalog: &TypeCatalog, node: &TypeNode) -> Result<FuncArgType, SignatureError> {
    let entry = catalog
        .lookup(&node.name)
        .ok_or_else(|| SignatureError::unknown_type(&node.name))?;
    entry.class.rule().check(node)?;

    let nullability = Nullability::from_flag(node.nullable);
    let resolved = match entry.class {
        TypeClass::Scalar(kind) => FuncArgType::Scalar { kind, nullability },
        TypeClass::FixedChar => FuncArgType::FixedChar {
            length: integer_at(node, 0)?,
            nullability,
        },
        TypeClass::VarChar => FuncArgType::VarChar {
            length: integer_at(node, 0)?,
            nullability,
        },
        TypeClass::FixedBinary => FuncArgType::FixedBinary {
            length: integer_at(node, 0)?,
            nullability,
        },
        TypeClass::Decimal => FuncArgType::Decimal {
            precision: integer_at(node, 0)?,
            scale: integer_at(node, 1)?,
            nullability,
        },
        TypeClass::PrecisionTimestamp => FuncArgType::PrecisionTimestamp {
            precision: integer_at(node, 0)?,
            nullability,
        },
        TypeClass::PrecisionTimestampTz => FuncArgType::PrecisionTimestampTz {
            precision: integer_at(node, 0)?,
            nullability,
        },
        TypeClass::List => FuncArgType::List {
            element: Box::new(type_at(catalog, node, 0)?),
            nullability,
        },
        TypeClass::Map => FuncArgType::Map {
            key: Box::new(type_at(catalog, node, 0)?),
            value: Box::new(type_at(catalog, node, 1)?),
            nullability,
        },
        TypeClass::Struct => FuncArgType::Struct {
            fields: (0..node.args.len())
                .map(|i| type_at(catalog, node, i))
                .collect::<Result<_, _>>()?,
            nullability,
        },
        TypeClass::Any => FuncArgType::Any { nullability },
        TypeClass::Extension(_) => FuncArgType::Extension {
            name: node.name.clone(),
            args: node
                .args
                .iter()
                .map(|arg| match arg {
                    TypeArg::Integer(param) => Ok(ExtensionArg::Integer(param.clone())),
                    TypeArg::Type(inner) => resolve(catalog, inner).map(ExtensionArg::Type),
                })
                .collect::<Result<_, _>>()?,
            nullability,
        },
    };

    tracing::trace!(name = %node.name, kind = ?resolved.kind(), "resolved type");
    Ok(resolved)
}

fn integer_at(node: &TypeNode, index: usize) -> Result<IntegerParameter, SignatureError> {
    match node.args.get(index) {
        Some(TypeArg::Integer(param)) => Ok(param.clone()),
        _ => Err(SignatureError::arity(
            &node.name,
            format!("argument {} must be an integer parameter", index + 1),
        )),
    }
}

fn type_at(
    catalog: &TypeCatalog,
    node: &TypeNode,
    index: usize,
) -> Result<FuncArgType, SignatureError> {
    match node.args.get(index) {
        Some(TypeArg::Type(inner)) => resolve(catalog, inner),
        _ => Err(SignatureError::arity(
            &node.name,
            format!("argument {} must be a type", index + 1),
        )),
    }
}
