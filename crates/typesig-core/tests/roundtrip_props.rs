//! Property tests: rendered trees parse back to themselves
//!
//! Generated type names come from the built-in catalog and variable names are
//! upper-case, so the parser's shape-based classification of arguments always
//! agrees with how the tree was built.

use proptest::prelude::*;
use typesig_core::{Expr, IntegerParameter, TypeArg, TypeNode};

fn type_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "boolean", "i16", "i64", "fp64", "string", "decimal", "varchar", "list", "map", "struct",
        "any", "any1", "anyT",
    ])
    .prop_map(String::from)
}

fn variable_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Z][A-Z0-9]{0,2}").expect("valid regex")
}

fn integer_parameter() -> impl Strategy<Value = IntegerParameter> {
    prop_oneof![
        any::<i32>().prop_map(IntegerParameter::Concrete),
        variable_name().prop_map(IntegerParameter::Variable),
    ]
}

fn type_node() -> impl Strategy<Value = TypeNode> {
    let leaf = (type_name(), any::<bool>()).prop_map(|(name, nullable)| TypeNode::simple(name, nullable));
    leaf.prop_recursive(4, 32, 4, |inner| {
        let arg = prop_oneof![
            inner.prop_map(TypeArg::Type),
            integer_parameter().prop_map(TypeArg::Integer),
        ];
        (type_name(), any::<bool>(), prop::collection::vec(arg, 1..4))
            .prop_map(|(name, nullable, args)| TypeNode::new(name, nullable, args))
    })
}

proptest! {
    #[test]
    fn rendered_tree_parses_back_to_itself(node in type_node()) {
        let rendered = node.to_string();
        let reparsed = typesig_core::parse(&rendered).unwrap();
        prop_assert_eq!(reparsed.to_string(), rendered);
        prop_assert_eq!(reparsed, Expr::Type(node));
    }

    #[test]
    fn extra_whitespace_renders_canonically(node in type_node()) {
        let canonical = node.to_string();
        let spaced = canonical
            .replace(',', " , ")
            .replace('<', " < ")
            .replace('>', " > ")
            .replace('?', " ? ");
        let reparsed = typesig_core::parse(&format!("  {spaced}  ")).unwrap();
        prop_assert_eq!(reparsed.to_string(), canonical);
    }

    #[test]
    fn bare_integers_are_number_literals(value in any::<i32>()) {
        let text = value.to_string();
        prop_assert_eq!(typesig_core::parse(&text).unwrap(), Expr::Number(text));
    }
}
