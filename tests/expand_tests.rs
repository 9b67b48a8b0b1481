#[cfg(test)]
mod tests {
    use remold::expand::{expand, expand_alternative};
    use remold::output::from_json;
    use remold::pointer::resolve;
    use remold::{Grammar, MapError, Value};
    use serde_json::json;

    fn v(json: serde_json::Value) -> Value {
        from_json(json)
    }

    // ========================================================================
    // Pointer resolution
    // ========================================================================

    #[test]
    fn test_resolve_without_pointer_is_identity() {
        let grammar = Grammar::global();
        assert_eq!(resolve(grammar, "a.b.c", "x.y").unwrap(), "a.b.c");
    }

    #[test]
    fn test_resolve_default_drop_count() {
        let grammar = Grammar::global();
        assert_eq!(
            resolve(grammar, "@this.name", "cars[1]").unwrap(),
            "cars[1].name"
        );
    }

    #[test]
    fn test_resolve_drop_counts() {
        let grammar = Grammar::global();
        assert_eq!(resolve(grammar, "@this1", "a.b.c").unwrap(), "a.b");
        assert_eq!(resolve(grammar, "@this2", "a.b.c").unwrap(), "a");
        assert_eq!(resolve(grammar, "@this3", "a.b.c").unwrap(), "");
    }

    #[test]
    fn test_resolve_overflow_is_fatal() {
        let grammar = Grammar::global();
        let result = resolve(grammar, "@this4", "a.b.c");
        assert!(matches!(result, Err(MapError::PointerOverflow { .. })));
    }

    #[test]
    fn test_resolve_replaces_every_occurrence() {
        let grammar = Grammar::global();
        assert_eq!(
            resolve(grammar, "@this.a:@this.b", "root").unwrap(),
            "root.a:root.b"
        );
    }

    // ========================================================================
    // Single-path expansion
    // ========================================================================

    #[test]
    fn test_expand_fans_out_over_array_length() {
        let grammar = Grammar::global();
        let data = v(json!({"cars": [{}, {}, {}]}));
        assert_eq!(
            expand_alternative(grammar, &data, "cars", "").unwrap(),
            vec!["cars[0]", "cars[1]", "cars[2]"]
        );
    }

    #[test]
    fn test_expand_non_array_yields_single_path() {
        let grammar = Grammar::global();
        let data = v(json!({"car": {"plate": "X1"}}));
        assert_eq!(
            expand_alternative(grammar, &data, "car", "").unwrap(),
            vec!["car"]
        );
    }

    #[test]
    fn test_expand_missing_head_is_not_an_array() {
        let grammar = Grammar::global();
        let data = v(json!({}));
        let result = expand_alternative(grammar, &data, "cars", "");
        assert!(matches!(result, Err(MapError::NotAnArray(_))));

        // the union-level expander treats that as zero paths
        assert!(expand(grammar, &data, "cars", "").unwrap().is_empty());
    }

    #[test]
    fn test_expand_nested_cartesian() {
        let grammar = Grammar::global();
        let data = v(json!({
            "cars": [
                {"drivers": [{"name": "A"}]},
                {"drivers": [{"name": "B"}, {"name": "C"}]}
            ]
        }));

        assert_eq!(
            expand_alternative(grammar, &data, "cars.drivers", "").unwrap(),
            vec!["cars[0].drivers[0]", "cars[1].drivers[0]", "cars[1].drivers[1]"]
        );
    }

    #[test]
    fn test_expand_drops_dead_nested_branches_silently() {
        let grammar = Grammar::global();
        let data = v(json!({
            "cars": [
                {"drivers": [{"name": "A"}]},
                {"color": "red"},
                {"drivers": [{"name": "B"}]}
            ]
        }));

        assert_eq!(
            expand_alternative(grammar, &data, "cars.drivers", "").unwrap(),
            vec!["cars[0].drivers[0]", "cars[2].drivers[0]"]
        );
    }

    #[test]
    fn test_expand_union_preserves_order() {
        let grammar = Grammar::global();
        let data = v(json!({"x": [1, 2, 3], "y": [4, 5]}));
        assert_eq!(
            expand(grammar, &data, "x $$and y", "").unwrap(),
            vec!["x[0]", "x[1]", "x[2]", "y[0]", "y[1]"]
        );
    }

    #[test]
    fn test_expand_union_with_one_dead_alternative() {
        let grammar = Grammar::global();
        let data = v(json!({"y": [4, 5]}));
        assert_eq!(
            expand(grammar, &data, "x $$and y", "").unwrap(),
            vec!["y[0]", "y[1]"]
        );
    }

    #[test]
    fn test_expand_pointer_head_merges_with_first_field() {
        // @this alone cannot be resolved; it stays glued to `drivers`
        let grammar = Grammar::global();
        let data = v(json!({
            "cars": [
                {"drivers": [{"name": "A"}, {"name": "B"}]}
            ]
        }));

        assert_eq!(
            expand_alternative(grammar, &data, "@this.drivers", "cars[0]").unwrap(),
            vec!["cars[0].drivers[0]", "cars[0].drivers[1]"]
        );
    }

    #[test]
    fn test_expand_through_non_array_intermediate() {
        let grammar = Grammar::global();
        let data = v(json!({"garage": {"cars": [{"id": 1}, {"id": 2}]}}));
        assert_eq!(
            expand_alternative(grammar, &data, "garage.cars", "").unwrap(),
            vec!["garage.cars[0]", "garage.cars[1]"]
        );
    }
}
