//! Integration tests for reading through lenses.
//!
//! Tests cover:
//! - Result shape (`Single` vs `Many`) decided by the lens alone
//! - Negative indices
//! - Every descent error with its step position
//! - Read-only behavior of `view`

#![forbid(unsafe_code)]

use pathlens::error::{LensError, StepPosition};
use pathlens::optics::{EACH, KEYS, Lens, VALUES, View, focus, index, key, view};
use pathlens::value::{Shape, Value};
use pathlens::{dict, lens, list};
use rstest::{fixture, rstest};

#[fixture]
fn inventory() -> Value {
    dict! {
        "shelves" => list![
            dict! { "name" => "a", "items" => list![1, 2, 3] },
            dict! { "name" => "b", "items" => list![] },
            dict! { "name" => "c", "items" => list![4] }
        ],
        "owner" => "alice"
    }
}

// =============================================================================
// Result shape
// =============================================================================

mod result_shape {
    use super::*;

    #[rstest]
    fn test_direct_lens_yields_single(inventory: Value) {
        assert_eq!(
            view(&inventory, &lens![key("shelves"), index(0), key("name")]).unwrap(),
            View::Single("a".into())
        );
    }

    #[rstest]
    fn test_traversal_yields_many_even_for_one_result(inventory: Value) {
        let result = view(&inventory, &lens![key("shelves"), index(2), key("items"), EACH]);
        assert_eq!(result.unwrap(), View::Many(vec![4.into()]));
    }

    #[rstest]
    fn test_traversal_over_empty_container_yields_empty_many(inventory: Value) {
        let result = view(&inventory, &lens![key("shelves"), index(1), key("items"), EACH]);
        assert_eq!(result.unwrap(), View::Many(vec![]));
    }

    #[rstest]
    fn test_nested_traversals_flatten_in_order(inventory: Value) {
        let result = view(&inventory, &lens![key("shelves"), EACH, key("items"), EACH]);
        assert_eq!(
            result.unwrap(),
            View::Many(vec![1.into(), 2.into(), 3.into(), 4.into()])
        );
    }

    #[rstest]
    fn test_keys_of_each_entry(inventory: Value) {
        let result = view(&inventory, &lens![key("shelves"), EACH, KEYS]).unwrap();
        assert_eq!(
            result.into_values(),
            vec![
                Value::from("name"),
                Value::from("items"),
                Value::from("name"),
                Value::from("items"),
                Value::from("name"),
                Value::from("items"),
            ]
        );
    }

    #[rstest]
    fn test_values_on_root_dict(inventory: Value) {
        let result = view(&inventory, &VALUES).unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.into_values()[1], Value::from("alice"));
    }

    #[rstest]
    fn test_identity_yields_whole_root(inventory: Value) {
        assert_eq!(
            view(&inventory, &Lens::identity()).unwrap(),
            View::Single(inventory.clone())
        );
    }
}

// =============================================================================
// Negative indices
// =============================================================================

mod negative_indices {
    use super::*;

    #[rstest]
    #[case(-1, 30)]
    #[case(-2, 20)]
    #[case(-3, 10)]
    #[case(0, 10)]
    #[case(2, 30)]
    fn test_index_resolution(#[case] position: i64, #[case] expected: i32) {
        let document = list![10, 20, 30];
        assert_eq!(
            view(&document, &index(position)).unwrap(),
            View::Single(expected.into())
        );
    }

    #[rstest]
    #[case(3)]
    #[case(-4)]
    #[case(i64::MIN)]
    #[case(i64::MAX)]
    fn test_index_out_of_range(#[case] position: i64) {
        let document = list![10, 20, 30];
        assert_eq!(
            view(&document, &index(position)),
            Err(LensError::IndexOutOfRange {
                index: position,
                length: 3,
                at: StepPosition::at(0),
            })
        );
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use super::*;

    #[rstest]
    fn test_missing_key_reports_position(inventory: Value) {
        assert_eq!(
            view(&inventory, &lens![key("shelves"), index(0), key("colour")]),
            Err(LensError::KeyNotFound {
                key: "colour".to_string(),
                at: StepPosition::at(2),
            })
        );
    }

    #[rstest]
    #[case(lens![key("owner"), key("name")], Shape::Dict, 1)]
    #[case(lens![key("owner"), index(0)], Shape::List, 1)]
    #[case(lens![key("owner"), EACH], Shape::List, 1)]
    #[case(lens![key("owner"), VALUES], Shape::Dict, 1)]
    #[case(lens![key("owner"), KEYS], Shape::Dict, 1)]
    #[case(lens![key("shelves"), key("a")], Shape::Dict, 1)]
    #[case(lens![index(0)], Shape::List, 0)]
    fn test_shape_mismatch(
        inventory: Value,
        #[case] path: Lens,
        #[case] expected: Shape,
        #[case] position: usize,
    ) {
        let error = view(&inventory, &path).unwrap_err();
        assert!(matches!(error, LensError::Shape { expected: e, .. } if e == expected));
        assert_eq!(error.position(), Some(position));
    }

    #[rstest]
    fn test_error_inside_traversal_aborts_whole_view() {
        let document = list![dict! { "x" => 1 }, Value::from(2), dict! { "x" => 3 }];
        assert_eq!(
            view(&document, &lens![EACH, key("x")]),
            Err(LensError::Shape {
                expected: Shape::Dict,
                found: Shape::Scalar,
                at: StepPosition::at(1),
            })
        );
    }

    #[rstest]
    fn test_error_message_is_readable(inventory: Value) {
        let error = view(&inventory, &lens![key("shelves"), index(9)]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "index 9 out of range for list of length 3 at step 1"
        );
    }
}

// =============================================================================
// Read-only guarantees
// =============================================================================

mod read_only {
    use super::*;

    #[rstest]
    fn test_view_does_not_modify_root(inventory: Value) {
        let before = inventory.clone();
        let _ = view(&inventory, &lens![key("shelves"), EACH, key("items"), EACH]).unwrap();
        let _ = view(&inventory, &lens![key("missing")]).unwrap_err();
        assert_eq!(inventory, before);
    }

    #[rstest]
    fn test_viewed_values_are_independent_copies(inventory: Value) {
        let mut items = view(&inventory, &lens![key("shelves"), index(0), key("items")])
            .unwrap()
            .into_value();
        items.list_append(Value::from(99)).unwrap();

        assert_eq!(
            focus(&inventory, &lens![key("shelves"), index(0), key("items")]).unwrap(),
            &list![1, 2, 3]
        );
    }

    #[rstest]
    fn test_lens_method_matches_free_function(inventory: Value) {
        let path = lens![key("shelves"), EACH, key("name")];
        assert_eq!(path.view(&inventory), view(&inventory, &path));
    }
}
