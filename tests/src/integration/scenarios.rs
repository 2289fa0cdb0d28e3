//! # Request Scenarios
//!
//! Full pipeline runs: literal and structured queries, namespace filtering,
//! signature checks, reserved methods, handler failures and JSONP.

#[cfg(test)]
mod tests {
    use plug_rpc::{sign, PlugConfig, PlugService, RawQuery, SignedQuery};
    use serde_json::json;

    use crate::fixtures::{builder, data, json_body, service, service_with, SECRET};

    const FOO_BAR_SIGNATURE: &str = "cceb7a875c9c08ccd4b034044713b5ff";

    // =============================================================================
    // SCENARIO A: reserved version method
    // =============================================================================

    #[test]
    fn test_version_with_wrong_signature_is_rejected() {
        let response = service().handle(&RawQuery::from(
            "buttplug_method=version&buttplug_signature=x",
        ));
        assert_eq!(
            response.body,
            r#"{"method":"version","success":false,"error":{"message":"Invalid signature","code":403}}"#
        );
    }

    #[test]
    fn test_version_with_debug_binding_ignores_signature() {
        let service = service_with(builder().debug(true));
        let response = service.handle(&RawQuery::from(
            "buttplug_method=version&buttplug_signature=x",
        ));
        assert_eq!(
            response.body,
            r#"{"method":"version","success":true,"response":0.1}"#
        );
    }

    #[test]
    fn test_version_with_matching_signature() {
        let signature = sign(&data(&[]), SECRET);
        let query = format!("buttplug_method=version&buttplug_signature={}", signature);
        let response = service().handle(&RawQuery::from(query));
        assert_eq!(json_body(&response.body)["response"], json!(0.1));
    }

    // =============================================================================
    // SCENARIO B: correctly signed call
    // =============================================================================

    #[test]
    fn test_signed_call_succeeds() {
        assert_eq!(sign(&data(&[("foo", "bar")]), SECRET), FOO_BAR_SIGNATURE);

        let query = format!(
            "http://example.com/api?buttplug_method=echo&buttplug_foo=bar&buttplug_signature={}",
            FOO_BAR_SIGNATURE
        );
        let response = service().handle(&RawQuery::from(query));
        assert_eq!(
            response.body,
            r#"{"method":"echo","success":true,"response":{"foo":"bar"}}"#
        );
    }

    #[test]
    fn test_unrelated_query_noise_is_ignored() {
        let query = format!(
            "?utm_source=mail&buttplug_method=echo&page=2&buttplug_foo=bar&buttplug_signature={}",
            FOO_BAR_SIGNATURE
        );
        let body = json_body(&service().handle(&RawQuery::from(query)).body);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["response"], json!({"foo": "bar"}));
    }

    #[test]
    fn test_signed_structured_query() {
        let query = SignedQuery::new("greet", SECRET).param("name", "Ada");
        let body = json_body(&service().handle(&query.to_raw_query()).body);
        assert_eq!(body["response"], json!("Hello, Ada!"));
    }

    #[test]
    fn test_json_parameters_reach_handler_decoded() {
        let query = SignedQuery::new("echo", SECRET)
            .param("list", "[1,2,3]")
            .param("obj", r#"{"a":{"b":null}}"#)
            .param("zero", "0")
            .param("text", "plain");
        let body = json_body(&service().handle(&query.to_raw_query()).body);
        assert_eq!(
            body["response"],
            json!({"list": [1, 2, 3], "obj": {"a": {"b": null}}, "zero": "0", "text": "plain"})
        );
    }

    #[test]
    fn test_json_quoted_method_dispatches() {
        let service = service_with(builder().debug(true));
        let response = service.handle(&RawQuery::from(r#"?buttplug_method="echo"&buttplug_x=1"#));
        assert_eq!(
            response.body,
            r#"{"method":"echo","success":true,"response":{"x":1}}"#
        );
    }

    #[test]
    fn test_empty_namespace_uses_bare_keys() {
        let config = PlugConfig {
            input_namespace: String::new(),
            ..Default::default()
        };
        let service = PlugService::new(config, builder().build().unwrap()).unwrap();
        let query = format!("?method=echo&foo=bar&signature={}", FOO_BAR_SIGNATURE);
        let body = json_body(&service.handle(&RawQuery::from(query)).body);
        assert_eq!(body["response"], json!({"foo": "bar"}));
    }

    // =============================================================================
    // SCENARIO C: signature off by one character
    // =============================================================================

    #[test]
    fn test_signature_off_by_one_character() {
        let query = "?buttplug_method=echo&buttplug_foo=bar&buttplug_signature=cceb7a875c9c08ccd4b034044713b5fe";
        let response = service().handle(&RawQuery::from(query));
        assert_eq!(
            response.body,
            r#"{"method":"echo","success":false,"error":{"message":"Invalid signature","code":403}}"#
        );
    }

    #[test]
    fn test_signature_is_case_sensitive() {
        let query = format!(
            "?buttplug_method=echo&buttplug_foo=bar&buttplug_signature={}",
            FOO_BAR_SIGNATURE.to_uppercase()
        );
        let body = json_body(&service().handle(&RawQuery::from(query)).body);
        assert_eq!(body["error"]["code"], json!(403));
    }

    #[test]
    fn test_tampered_value_is_rejected() {
        let query = format!(
            "?buttplug_method=echo&buttplug_foo=baz&buttplug_signature={}",
            FOO_BAR_SIGNATURE
        );
        let body = json_body(&service().handle(&RawQuery::from(query)).body);
        assert_eq!(body["error"]["message"], json!("Invalid signature"));
    }

    #[test]
    fn test_missing_signature() {
        let body = json_body(&service().handle(&RawQuery::from("?buttplug_method=echo&x=1")).body);
        assert_eq!(
            body,
            json!({"method": "echo", "success": false, "error": {"message": "No signature", "code": 401}})
        );
    }

    // =============================================================================
    // SCENARIO D: unknown method
    // =============================================================================

    #[test]
    fn test_unknown_method() {
        let query = SignedQuery::new("nonexistent", SECRET);
        let body = json_body(&service().handle(&query.to_raw_query()).body);
        assert_eq!(
            body,
            json!({"method": "nonexistent", "success": false, "error": {"message": "Unknown method", "code": 405}})
        );
    }

    // =============================================================================
    // SCENARIO E: listing disabled
    // =============================================================================

    #[test]
    fn test_listing_disabled_regardless_of_signature() {
        let service = service_with(builder().list_methods(false));

        for signature in ["bogus", "0123456789abcdef0123456789abcdef"] {
            let query = format!(
                "?buttplug_method=listMethods&buttplug_signature={}",
                signature
            );
            assert_eq!(
                service.handle(&RawQuery::from(query)).body,
                r#"{"method":"listMethods","success":false,"error":{"message":"Method listing has been disabled","code":401}}"#
            );
        }

        let signed = SignedQuery::new("_listMethods", SECRET);
        let body = json_body(&service.handle(&signed.to_raw_query()).body);
        assert_eq!(body["error"]["code"], json!(401));
    }

    #[test]
    fn test_listing_enabled() {
        let query = SignedQuery::new("_listMethods", SECRET);
        let body = json_body(&service().handle(&query.to_raw_query()).body);
        assert_eq!(body["response"], json!(["echo", "explode", "fail", "greet"]));
    }

    // =============================================================================
    // SCENARIO F: JSONP
    // =============================================================================

    #[test]
    fn test_callback_wraps_body() {
        let query = format!(
            "?buttplug_method=echo&buttplug_foo=bar&buttplug_callback=cb&buttplug_signature={}",
            FOO_BAR_SIGNATURE
        );
        let response = service().handle(&RawQuery::from(query));
        assert_eq!(
            response.body,
            r#"cb({"method":"echo","success":true,"response":{"foo":"bar"}});"#
        );
        assert_eq!(response.content_type, r#"text/plain; charset="utf-8""#);
    }

    #[test]
    fn test_callback_is_not_signed() {
        // Signature covers data only; the callback can change freely
        let query = format!(
            "?buttplug_method=echo&buttplug_foo=bar&buttplug_callback=other.fn&buttplug_signature={}",
            FOO_BAR_SIGNATURE
        );
        let response = service().handle(&RawQuery::from(query));
        assert!(response.body.starts_with("other.fn({"));
    }

    #[test]
    fn test_unsafe_callback_is_ignored() {
        let query = format!(
            "?buttplug_method=echo&buttplug_foo=bar&buttplug_callback=alert(1)&buttplug_signature={}",
            FOO_BAR_SIGNATURE
        );
        let response = service().handle(&RawQuery::from(query));
        assert!(response.body.starts_with('{'));
    }

    // =============================================================================
    // FAILURES
    // =============================================================================

    #[test]
    fn test_no_request() {
        let response = service().handle(&RawQuery::from("no-delimiters-here"));
        assert_eq!(
            response.body,
            r#"{"method":null,"success":false,"error":{"message":"No request","code":0}}"#
        );
    }

    #[test]
    fn test_handler_failure_default_message() {
        let query = SignedQuery::new("fail", SECRET);
        let body = json_body(&service().handle(&query.to_raw_query()).body);
        assert_eq!(
            body["error"],
            json!({"message": "Method call failed", "code": 500})
        );
    }

    #[test]
    fn test_typed_method_invalid_params() {
        let query = SignedQuery::new("greet", SECRET).param("nom", "Ada");
        let body = json_body(&service().handle(&query.to_raw_query()).body);
        assert_eq!(body["error"]["code"], json!(400));
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid params: "));
    }

    #[test]
    fn test_panic_is_masked() {
        let query = SignedQuery::new("explode", SECRET);
        let body = json_body(&service().handle(&query.to_raw_query()).body);
        assert_eq!(body["error"], json!({"message": "Server error", "code": 500}));
    }

    #[test]
    fn test_panic_detail_in_debug() {
        let service = service_with(builder().debug(true));
        let body = json_body(&service.handle(&RawQuery::from("?buttplug_method=explode&")).body);
        assert_eq!(
            body["error"],
            json!({"message": "Server error: explode called", "code": 500})
        );
    }

    #[test]
    fn test_binding_without_secret() {
        let binding = plug_rpc::HandlerBinding::builder().build();
        let response = PlugService::respond_once(
            binding,
            &RawQuery::from("?buttplug_method=echo&"),
            PlugConfig::default(),
        );
        assert_eq!(
            json_body(&response.body)["error"],
            json!({"message": "Handler binding must contain a secret key", "code": 500})
        );
    }
}
