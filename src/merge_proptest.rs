//! Property-based tests for the two merge functions.
//!
//! `deep_merge` layers configuration and replaces on conflict; `append_merge`
//! accumulates file rules and never drops an entry.

#[cfg(test)]
mod proptest_tests {
    use crate::config::{deep_merge, deep_merge_all};
    use crate::rules::{append_merge, FileRule, FileRuleContribution, Matcher, MatcherLists};
    use proptest::prelude::*;
    use serde_json::{json, Map, Value};

    fn leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i32>().prop_map(|n| json!(n)),
            "[a-z]{0,6}".prop_map(Value::String),
        ]
    }

    fn json_value() -> impl Strategy<Value = Value> {
        leaf().prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-d]", inner, 0..4)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    fn json_object() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-d]", json_value(), 0..5)
            .prop_map(|entries| Value::Object(entries.into_iter().collect()))
    }

    fn patterns() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z]{1,5}", 0..5)
    }

    fn matchers(patterns: &[String]) -> Vec<Matcher> {
        patterns.iter().map(|p| Matcher::new(p).unwrap()).collect()
    }

    fn as_strs(matchers: &[Matcher]) -> Vec<String> {
        matchers.iter().map(|m| m.as_str().to_string()).collect()
    }

    // ============================================================================
    // deep_merge property tests
    // ============================================================================

    proptest! {
        /// Property: merging a value with itself changes nothing
        #[test]
        fn deep_merge_is_idempotent(value in json_value()) {
            prop_assert_eq!(deep_merge(value.clone(), value.clone()), value);
        }

        /// Property: the empty object is an identity on both sides for objects
        #[test]
        fn deep_merge_empty_object_is_identity(value in json_object()) {
            let empty = Value::Object(Map::new());
            prop_assert_eq!(deep_merge(value.clone(), empty.clone()), value.clone());
            prop_assert_eq!(deep_merge(empty, value.clone()), value);
        }

        /// Property: non-object changes always win, arrays and nulls included
        #[test]
        fn deep_merge_non_objects_replace(base in json_object(), changes in json_object()) {
            let merged = deep_merge(base.clone(), changes.clone());
            for (key, change) in changes.as_object().unwrap() {
                let base_is_object = base.get(key).is_some_and(Value::is_object);
                if !change.is_object() || !base_is_object {
                    prop_assert_eq!(&merged[key], change);
                }
            }
        }

        /// Property: keys of both sides survive, base keys first
        #[test]
        fn deep_merge_keeps_every_key_in_order(base in json_object(), changes in json_object()) {
            let merged = deep_merge(base.clone(), changes.clone());
            let keys: Vec<&String> = merged.as_object().unwrap().keys().collect();

            let mut expected: Vec<&String> = base.as_object().unwrap().keys().collect();
            for key in changes.as_object().unwrap().keys() {
                if !expected.contains(&key) {
                    expected.push(key);
                }
            }
            prop_assert_eq!(keys, expected);
        }

        /// Property: arrays of objects are replaced, never merged element-wise
        #[test]
        fn deep_merge_arrays_of_objects_replace(
            base in prop::collection::vec(json_object(), 0..4),
            changes in prop::collection::vec(json_object(), 0..4),
        ) {
            let merged = deep_merge(json!({ "list": base }), json!({ "list": changes.clone() }));
            prop_assert_eq!(&merged["list"], &Value::Array(changes));
        }

        /// Property: folding layers equals merging them pairwise from `{}`
        #[test]
        fn deep_merge_all_is_a_left_fold(
            a in json_object(),
            b in json_object(),
            c in json_object(),
        ) {
            let folded = deep_merge_all(vec![a.clone(), b.clone(), c.clone()]);
            let pairwise = deep_merge(deep_merge(a, b), c);
            prop_assert_eq!(folded, pairwise);
        }
    }

    // ============================================================================
    // append_merge property tests
    // ============================================================================

    proptest! {
        /// Property: lists are concatenated in order, duplicates kept
        #[test]
        fn append_merge_concatenates(
            existing in patterns(),
            added in patterns(),
            globs in patterns(),
        ) {
            let rule = FileRule {
                paths: MatcherLists { include: matchers(&existing), exclude: vec![] },
                ..FileRule::default()
            };
            let mut contribution = FileRuleContribution {
                paths: MatcherLists { include: matchers(&added), exclude: matchers(&added) },
                ..FileRuleContribution::default()
            };
            contribution.files.glob.include = globs.clone();

            let merged = append_merge(rule, contribution);

            let mut expected = existing.clone();
            expected.extend(added.iter().cloned());
            prop_assert_eq!(as_strs(&merged.paths.include), expected);
            prop_assert_eq!(as_strs(&merged.paths.exclude), added);
            prop_assert_eq!(merged.files.glob.include, globs);
        }

        /// Property: merging an empty contribution leaves the rule unchanged
        #[test]
        fn append_merge_empty_contribution_is_identity(existing in patterns()) {
            let rule = FileRule {
                extension: Some(Matcher::new("x").unwrap()),
                files: crate::rules::FileMatchers {
                    include: matchers(&existing),
                    ..Default::default()
                },
                ..FileRule::default()
            };
            let merged = append_merge(rule.clone(), FileRuleContribution::default());
            prop_assert_eq!(merged, rule);
        }

        /// Property: a list only ever grows
        #[test]
        fn append_merge_never_shrinks(
            steps in prop::collection::vec(patterns(), 1..5),
        ) {
            let mut rule = FileRule::default();
            let mut previous = 0;
            for step in &steps {
                let contribution = FileRuleContribution {
                    paths: MatcherLists { include: matchers(step), exclude: vec![] },
                    ..FileRuleContribution::default()
                };
                rule = append_merge(rule, contribution);
                prop_assert_eq!(rule.paths.include.len(), previous + step.len());
                previous = rule.paths.include.len();
            }
        }
    }
}
