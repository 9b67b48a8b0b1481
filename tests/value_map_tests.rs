#[cfg(test)]
mod tests {
    use remold::output::from_json;
    use remold::{MapError, Value, value_map};
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        from_json(json)
    }

    fn map(data: serde_json::Value, schema: serde_json::Value) -> Value {
        value_map(&v(data), &v(schema), false).unwrap()
    }

    // ========================================================================
    // Scalar translation
    // ========================================================================

    #[test]
    fn test_translates_through_enum_table() {
        let mapped = map(
            json!({"status": "ACTIVE"}),
            json!({"status": {"translated": {"ACTIVE": 1, "INACTIVE": 0}}}),
        );

        assert_eq!(mapped, v(json!({"translated": 1})));
    }

    #[test]
    fn test_default_fallback() {
        let mapped = map(
            json!({"status": "UNKNOWN"}),
            json!({"status": {"translated": {"ACTIVE": 1, "$default": -1}}}),
        );

        assert_eq!(mapped, v(json!({"translated": -1})));
    }

    #[test]
    fn test_keep_original_sentinel() {
        let mapped = map(
            json!({"status": "PENDING"}),
            json!({"status": {"translated": {"ACTIVE": 1, "INACTIVE": 0, "$default": "$same$"}}}),
        );

        assert_eq!(mapped, v(json!({"translated": "PENDING"})));
    }

    #[test]
    fn test_no_match_and_no_default_is_missing() {
        let data = v(json!({"status": "UNKNOWN"}));
        let schema = v(json!({"status": {"translated": {"ACTIVE": 1}}}));

        let mapped = value_map(&data, &schema, false).unwrap();
        assert_eq!(mapped.as_object().unwrap()["translated"], Value::Missing);

        let stripped = value_map(&data, &schema, true).unwrap();
        assert!(!stripped.as_object().unwrap().contains_key("translated"));
    }

    #[test]
    fn test_multiple_destination_fields() {
        let mapped = map(
            json!({"grade": "A"}),
            json!({"grade": {
                "score": {"A": 90, "B": 80},
                "passed": {"A": true, "B": true, "$default": false}
            }}),
        );

        assert_eq!(mapped, v(json!({"score": 90, "passed": true})));
    }

    #[test]
    fn test_self_pointer_keeps_field_name() {
        let mapped = map(
            json!({"status": "ACTIVE"}),
            json!({"status": {"this": {"ACTIVE": "on", "INACTIVE": "off"}}}),
        );

        assert_eq!(mapped, v(json!({"status": "on"})));
    }

    #[test]
    fn test_numeric_values_match_string_keys() {
        let mapped = map(
            json!({"code": 2}),
            json!({"code": {"label": {"1": "one", "2": "two"}}}),
        );

        assert_eq!(mapped, v(json!({"label": "two"})));
    }

    // ========================================================================
    // Structure handling
    // ========================================================================

    #[test]
    fn test_unmapped_keys_pass_through() {
        let mapped = map(
            json!({"status": "ACTIVE", "untouched": {"deep": [1, 2]}}),
            json!({"status": {"this": {"ACTIVE": 1}}}),
        );

        assert_eq!(
            mapped,
            v(json!({"status": 1, "untouched": {"deep": [1, 2]}}))
        );
    }

    #[test]
    fn test_recurses_into_objects() {
        let mapped = map(
            json!({"vehicle": {"status": "INACTIVE", "plate": "X1"}}),
            json!({"vehicle": {"status": {"this": {"ACTIVE": 1, "INACTIVE": 0}}}}),
        );

        assert_eq!(
            mapped,
            v(json!({"vehicle": {"status": 0, "plate": "X1"}}))
        );
    }

    #[test]
    fn test_array_of_objects_recurses_elementwise() {
        let mapped = map(
            json!({"cars": [
                {"status": "ACTIVE", "plate": "X1"},
                {"status": "INACTIVE", "plate": "X2"}
            ]}),
            json!({"cars": [
                {"status": {"this": {"ACTIVE": 1, "INACTIVE": 0}}}
            ]}),
        );

        assert_eq!(
            mapped,
            v(json!({"cars": [
                {"status": 1, "plate": "X1"},
                {"status": 0, "plate": "X2"}
            ]}))
        );
    }

    #[test]
    fn test_scalar_array_groups_per_destination() {
        let mapped = map(
            json!({"codes": ["A", "B", "A"]}),
            json!({"codes": {
                "numbers": {"A": 1, "B": 2},
                "labels": {"A": "alpha", "B": "beta"}
            }}),
        );

        assert_eq!(
            mapped,
            v(json!({"numbers": [1, 2, 1], "labels": ["alpha", "beta", "alpha"]}))
        );
    }

    #[test]
    fn test_scalar_array_skips_untranslated_sparsely() {
        // no null padding for the element with no translation and no default
        let mapped = map(
            json!({"codes": ["A", "X", "B"]}),
            json!({"codes": {"numbers": {"A": 1, "B": 2}}}),
        );

        assert_eq!(mapped, v(json!({"numbers": [1, 2]})));
    }

    #[test]
    fn test_object_in_scalar_position_is_fatal() {
        // a keyed schema entry declares scalar translation; an object cannot
        // be pushed through an enum table
        let result = value_map(
            &v(json!({"codes": ["A", {"nested": true}]})),
            &v(json!({"codes": {"numbers": {"A": 1}}})),
            false,
        );
        assert!(matches!(result, Err(MapError::ObjectInScalarPosition(_))));
    }
}
