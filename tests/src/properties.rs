//! # Property Tests
//!
//! Invariants of the signature scheme, the literal codec and the namespace
//! filter over generated inputs.

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use plug_rpc::codec::QueryCodec;
    use plug_rpc::{sign, verify, Namespace, ParameterSet, RawQuery};
    use proptest::prelude::*;
    use serde_json::json;

    use crate::fixtures::{builder, data, json_body, service_with};

    fn to_set(map: &BTreeMap<String, String>) -> ParameterSet {
        let pairs: Vec<(&str, &str)> = map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        data(&pairs)
    }

    proptest! {
        #[test]
        fn prop_signature_is_deterministic(
            params in prop::collection::btree_map("[a-z]{1,8}", "x[a-z0-9]{0,8}", 0..6),
            secret in "[a-zA-Z0-9]{1,16}",
        ) {
            let set = to_set(&params);
            let first = sign(&set, &secret);
            prop_assert_eq!(first.len(), 32);
            prop_assert_eq!(&first, &sign(&set, &secret));
            prop_assert!(verify(&first, &set, &secret));
        }

        #[test]
        fn prop_signature_detects_changed_value(
            params in prop::collection::btree_map("[a-z]{1,8}", "x[a-z0-9]{0,8}", 1..6),
            suffix in "[a-z]{1,4}",
        ) {
            let set = to_set(&params);
            let signature = sign(&set, "s3cr3t");

            let mut tampered = params.clone();
            if let Some(value) = tampered.values_mut().next() {
                value.push_str(&suffix);
            }
            prop_assert!(!verify(&signature, &to_set(&tampered), "s3cr3t"));
        }

        #[test]
        fn prop_signature_depends_on_secret(
            params in prop::collection::btree_map("[a-z]{1,8}", "x[a-z0-9]{0,8}", 0..6),
            a in "[a-z]{4,12}",
            b in "[A-Z]{4,12}",
        ) {
            let set = to_set(&params);
            prop_assert_ne!(sign(&set, &a), sign(&set, &b));
        }

        #[test]
        fn prop_literal_tokens_survive_decode(
            params in prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9_.,:-]{0,12}", 1..8),
        ) {
            let query: Vec<String> = params.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
            let query = query.join("&");

            let decoded = QueryCodec::decode(&RawQuery::from(format!("?{}", query))).unwrap();
            prop_assert_eq!(decoded.len(), params.len());
            prop_assert_eq!(QueryCodec::encode(&decoded), query);
        }

        #[test]
        fn prop_namespace_keeps_only_prefixed_keys(
            inside in prop::collection::btree_map("[a-z]{1,8}", "[a-z]{1,8}", 0..5),
            outside in prop::collection::btree_map("[A-Z]{1,8}", "[a-z]{1,8}", 0..5),
        ) {
            let namespace = Namespace::default();
            let mut pairs: Vec<(String, String)> = inside
                .iter()
                .map(|(k, v)| (namespace.qualify(k), v.clone()))
                .collect();
            pairs.extend(outside.iter().map(|(k, v)| (k.clone(), v.clone())));

            let raw: RawQuery = pairs.into_iter().collect();
            let filtered = namespace.filter(QueryCodec::decode(&raw).unwrap());

            let keys: Vec<&String> = filtered.keys().collect();
            let expected: Vec<&String> = inside.keys().collect();
            prop_assert_eq!(keys, expected);
        }

        #[test]
        fn prop_version_ignores_other_input(
            noise in prop::collection::btree_map("p[a-z]{0,7}", "[a-z0-9]{0,8}", 0..6),
        ) {
            let service = service_with(builder().debug(true));
            let mut query = String::from("?buttplug_method=_version");
            for (key, value) in &noise {
                query.push_str(&format!("&buttplug_{}={}&{}={}", key, value, key, value));
            }

            let body = json_body(&service.handle(&RawQuery::from(query)).body);
            prop_assert_eq!(body, json!({"method": "_version", "success": true, "response": 0.1}));
        }
    }
}
