//! # HTTP Adapter
//!
//! Router-level tests: one binding shared by several services, GET and
//! POST transports, concurrent callers.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use plug_rpc::adapters::http::router;
    use plug_rpc::{PlugConfig, PlugService, SignedQuery};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::fixtures::{builder, json_body, SECRET};

    fn app() -> Router {
        let binding = Arc::new(builder().build().unwrap());
        router(PlugService::with_shared(PlugConfig::default(), binding).unwrap())
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, json_body(std::str::from_utf8(&bytes).unwrap()))
    }

    fn get(query: &SignedQuery) -> Request<Body> {
        Request::get(format!("/?{}", query.to_query_string()))
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_percent_encoded_values_verify() {
        let query = SignedQuery::new("echo", SECRET)
            .param("msg", "a&b=c d?")
            .param("path", "/tmp/x+y");

        let (status, body) = send(app(), get(&query)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], json!({"msg": "a&b=c d?", "path": "/tmp/x+y"}));
    }

    #[tokio::test]
    async fn test_rejections_answer_ok() {
        let request = Request::get("/?buttplug_method=echo&buttplug_signature=nope")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["error"], json!({"message": "Invalid signature", "code": 403}));
    }

    #[tokio::test]
    async fn test_post_body_overrides_query() {
        let signed = SignedQuery::new("greet", SECRET).param("name", "Ada");
        let request = Request::post("/?buttplug_method=echo&buttplug_name=Bob")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(signed.to_query_string()))
            .unwrap();

        let (_, body) = send(app(), request).await;
        assert_eq!(body["method"], json!("greet"));
        assert_eq!(body["response"], json!("Hello, Ada!"));
    }

    #[tokio::test]
    async fn test_jsonp_over_http() {
        let query = SignedQuery::new("_version", SECRET).callback("handlers.onVersion");
        let response = app().oneshot(get(&query)).await.unwrap();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        assert_eq!(
            std::str::from_utf8(&bytes).unwrap(),
            r#"handlers.onVersion({"method":"_version","success":true,"response":0.1});"#
        );
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_binding() {
        let app = app();
        let mut tasks = Vec::new();

        for i in 0..16 {
            let app = app.clone();
            tasks.push(tokio::spawn(async move {
                let query = SignedQuery::new("echo", SECRET).param("n", format!("{}", i + 1));
                send(app, get(&query)).await
            }));
        }

        for (i, task) in tasks.into_iter().enumerate() {
            let (status, body) = task.await.unwrap();
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["response"], json!({"n": i + 1}));
        }
    }

    #[tokio::test]
    async fn test_two_services_one_binding() {
        let binding = Arc::new(builder().build().unwrap());
        let api = PlugConfig {
            input_namespace: "api".into(),
            namespace_separator: ".".into(),
            ..Default::default()
        };
        let default_app =
            router(PlugService::with_shared(PlugConfig::default(), binding.clone()).unwrap());
        let api_app = router(PlugService::with_shared(api, binding.clone()).unwrap());
        assert_eq!(Arc::strong_count(&binding), 3);

        let query = SignedQuery::new("_listMethods", SECRET);
        let (_, body) = send(default_app, get(&query)).await;
        assert_eq!(body["success"], json!(true));

        let namespaced = query.namespace(plug_rpc::Namespace::new("api", "."));
        let (_, body) = send(api_app, get(&namespaced)).await;
        assert_eq!(body["response"], json!(["echo", "explode", "fail", "greet"]));
    }
}
