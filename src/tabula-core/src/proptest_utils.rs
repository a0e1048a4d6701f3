//! Property-based testing utilities for tabula-core.
//!
//! Strategies for values, labels and data types, and the serde and
//! conversion properties they must satisfy.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use crate::label::Label;
    use crate::types::{DataType, Value, conforms};

    // =========================================================================
    // Arbitrary Strategies
    // =========================================================================

    /// Strategy for generating Value instances that roundtrip through JSON.
    /// Uses integer-representable floats to avoid JSON precision issues.
    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(Value::Int64),
            any::<i32>().prop_map(|i| Value::Float64(f64::from(i))),
            ".*".prop_map(Value::String),
            prop::collection::vec(any::<u8>(), 0..32).prop_map(Value::Binary),
        ];
        leaf.prop_recursive(2, 16, 4, |inner| {
            prop::collection::vec(inner, 0..4).prop_map(Value::List)
        })
    }

    fn arb_label() -> impl Strategy<Value = Label> {
        let scalar = prop_oneof![
            any::<i64>().prop_map(Label::Int),
            "[a-zA-Z_][a-zA-Z0-9_]{0,12}".prop_map(Label::Str),
        ];
        prop_oneof![
            scalar.clone(),
            prop::collection::vec(scalar, 2..4).prop_map(Label::Tuple),
        ]
    }

    fn arb_data_type() -> impl Strategy<Value = DataType> {
        prop_oneof![
            Just(DataType::Null),
            Just(DataType::Bool),
            Just(DataType::Int64),
            Just(DataType::Float64),
            Just(DataType::String),
            Just(DataType::Binary),
            Just(DataType::List),
            Just(DataType::Object),
        ]
    }

    // =========================================================================
    // Properties
    // =========================================================================

    proptest! {
        #[test]
        fn value_serde_roundtrip(value in arb_value()) {
            let json = serde_json::to_string(&value).unwrap();
            let back: Value = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(value, back);
        }

        #[test]
        fn label_serde_roundtrip(label in arb_label()) {
            let json = serde_json::to_string(&label).unwrap();
            let back: Label = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(label, back);
        }

        #[test]
        fn label_value_roundtrip(label in arb_label()) {
            let back = Label::try_from(label.to_value()).unwrap();
            prop_assert_eq!(label, back);
        }

        #[test]
        fn data_type_common_supertype_symmetric(a in arb_data_type(), b in arb_data_type()) {
            prop_assert_eq!(a.common_supertype(&b), b.common_supertype(&a));
        }

        #[test]
        fn data_type_name_parses_back(dt in arb_data_type()) {
            let parsed: DataType = dt.display_name().parse().unwrap();
            prop_assert_eq!(parsed, dt);
        }

        #[test]
        fn everything_conforms_to_object(value in arb_value()) {
            prop_assert!(conforms(&value, &DataType::Object));
        }
    }
}
