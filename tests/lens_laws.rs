//! Property-based tests for lens laws.
//!
//! This module verifies that path lenses satisfy the usual laws on every
//! location they can focus:
//!
//! - **SetView Law**: `set(d, p, v); view(d, p) == Single(v)`
//! - **ViewSet Law**: `set(d, p, view(d, p))` leaves `d` unchanged
//! - **SetSet Law**: `set(set(d, p, v1), p, v2) == set(d, p, v2)`
//! - **Identity Law**: `update(d, p, |x| x)` leaves `d` unchanged
//!
//! and that composition and the path syntax behave structurally.

#![forbid(unsafe_code)]

use pathlens::optics::{EACH, KEYS, Lens, Step, VALUES, View, compose, set, update, view};
use pathlens::value::Value;
use proptest::prelude::*;
use proptest::sample::Index;

// =============================================================================
// Strategies
// =============================================================================

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::null()),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
        "[a-z]{1,4}",
    ]
}

fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(4, 48, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::List),
            prop::collection::vec((key_strategy(), inner), 0..5).prop_map(Value::dict),
        ]
    })
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        "\\PC{0,8}".prop_map(Step::Key),
        any::<i64>().prop_map(Step::Index),
        Just(Step::Each),
        Just(Step::Keys),
        Just(Step::Values),
    ]
}

fn lens_strategy() -> impl Strategy<Value = Lens> {
    prop::collection::vec(step_strategy(), 0..6).prop_map(Lens::from_steps)
}

/// Walks `document` and builds a traversal-free lens to an existing location,
/// picking one child per level from `choices`.
fn valid_path(document: &Value, choices: &[(Index, bool)]) -> Lens {
    let mut steps = Vec::new();
    let mut current = document;
    for (choice, from_end) in choices {
        match current {
            Value::List(elements) if !elements.is_empty() => {
                let position = choice.index(elements.len());
                let written = if *from_end {
                    i64::try_from(position).unwrap() - i64::try_from(elements.len()).unwrap()
                } else {
                    i64::try_from(position).unwrap()
                };
                steps.push(Step::Index(written));
                current = &elements[position];
            }
            Value::Dict(entries) if !entries.is_empty() => {
                let (name, child) = entries.get_index(choice.index(entries.len())).unwrap();
                steps.push(Step::Key(name.clone()));
                current = child;
            }
            _ => break,
        }
    }
    Lens::from_steps(steps)
}

fn choices_strategy() -> impl Strategy<Value = Vec<(Index, bool)>> {
    prop::collection::vec((any::<Index>(), any::<bool>()), 0..6)
}

// =============================================================================
// Lens laws on direct paths
// =============================================================================

proptest! {
    /// SetView Law: viewing after setting yields the set value
    #[test]
    fn prop_set_view_law(
        document in value_strategy(),
        choices in choices_strategy(),
        replacement in value_strategy(),
    ) {
        let path = valid_path(&document, &choices);
        let mut target = document;
        set(&mut target, &path, replacement.clone()).unwrap();
        prop_assert_eq!(view(&target, &path).unwrap(), View::Single(replacement));
    }

    /// ViewSet Law: setting the viewed value back changes nothing
    #[test]
    fn prop_view_set_law(document in value_strategy(), choices in choices_strategy()) {
        let path = valid_path(&document, &choices);
        let current = view(&document, &path).unwrap().into_value();
        let mut target = document.clone();
        set(&mut target, &path, current).unwrap();
        prop_assert_eq!(target, document);
    }

    /// SetSet Law: the second of two sets wins
    #[test]
    fn prop_set_set_law(
        document in value_strategy(),
        choices in choices_strategy(),
        first in value_strategy(),
        second in value_strategy(),
    ) {
        let path = valid_path(&document, &choices);

        let mut twice = document.clone();
        set(&mut twice, &path, first).unwrap();
        set(&mut twice, &path, second.clone()).unwrap();

        let mut once = document;
        set(&mut once, &path, second).unwrap();

        prop_assert_eq!(twice, once);
    }

    /// Identity Law: updating with the identity function changes nothing
    #[test]
    fn prop_identity_update_law(document in value_strategy(), choices in choices_strategy()) {
        let path = valid_path(&document, &choices);
        let mut target = document.clone();
        update(&mut target, &path, |value| value).unwrap();
        prop_assert_eq!(target, document);
    }
}

// =============================================================================
// Traversals
// =============================================================================

proptest! {
    /// Each focuses exactly one location per list element
    #[test]
    fn prop_each_focuses_every_element(elements in prop::collection::vec(value_strategy(), 0..8)) {
        let document = Value::List(elements.clone());
        prop_assert_eq!(view(&document, &EACH).unwrap(), View::Many(elements));
    }

    /// Keys and Values agree with the dict's own iteration order
    #[test]
    fn prop_keys_and_values_follow_insertion_order(
        entries in prop::collection::vec((key_strategy(), scalar_strategy()), 0..8),
    ) {
        let document = Value::dict(entries);
        let dict = document.as_dict().unwrap();

        let keys: Vec<Value> = dict.keys().map(|name| Value::from(name.as_str())).collect();
        let values: Vec<Value> = dict.values().cloned().collect();

        prop_assert_eq!(view(&document, &KEYS).unwrap(), View::Many(keys));
        prop_assert_eq!(view(&document, &VALUES).unwrap(), View::Many(values));
    }

    /// Updating through Each with the identity leaves nested lists unchanged
    #[test]
    fn prop_identity_update_through_each(
        rows in prop::collection::vec(prop::collection::vec(scalar_strategy(), 0..4), 0..4),
    ) {
        let document = Value::List(rows.into_iter().map(Value::List).collect());
        let mut target = document.clone();
        update(&mut target, &pathlens::lens![EACH, EACH], |value| value).unwrap();
        prop_assert_eq!(target, document);
    }
}

// =============================================================================
// Structural properties of lenses
// =============================================================================

proptest! {
    /// Composition is associative
    #[test]
    fn prop_compose_associative(
        first in lens_strategy(),
        second in lens_strategy(),
        third in lens_strategy(),
    ) {
        let left = first.compose(&second).compose(&third);
        let right = first.compose(&second.compose(&third));
        prop_assert_eq!(&left, &right);
        prop_assert_eq!(left, compose([&first, &second, &third]));
    }

    /// The identity lens is a two-sided unit of composition
    #[test]
    fn prop_compose_identity(path in lens_strategy()) {
        prop_assert_eq!(path.compose(&Lens::identity()), path.clone());
        prop_assert_eq!(Lens::identity().compose(&path), path);
    }

    /// Path syntax round-trips through Display and FromStr
    #[test]
    fn prop_path_syntax_round_trip(path in lens_strategy()) {
        let text = path.to_string();
        prop_assert_eq!(text.parse::<Lens>().unwrap(), path);
    }

    /// The value encoding round-trips
    #[test]
    fn prop_value_encoding_round_trip(path in lens_strategy()) {
        let encoded = Value::from(&path);
        prop_assert_eq!(Lens::try_from(&encoded).unwrap(), path);
    }
}
