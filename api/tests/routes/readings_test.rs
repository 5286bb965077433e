#[cfg(test)]
mod tests {
    use crate::helpers::{get_json, make_test_app};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use chrono::DateTime;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn values(json: &Value) -> Vec<f64> {
        json.as_array()
            .expect("expected a JSON array")
            .iter()
            .map(|r| r["value"].as_f64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn empty_store_returns_empty_collections() {
        let app = make_test_app().await;

        let (status, data) = get_json(&app.router, "/api/data").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(data, json!([]));

        let (status, current) = get_json(&app.router, "/api/current").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(current, json!({}));
    }

    #[tokio::test]
    async fn malformed_payload_is_skipped_between_valid_ones() {
        let app = make_test_app().await;
        app.publish_all(&[
            br#"{"humidity": 42.5}"#,
            br#"{"humidity": 43.1}"#,
            b"not-json",
            br#"{"humidity": 44.0}"#,
        ])
        .await;

        let (status, data) = get_json(&app.router, "/api/data").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(values(&data), vec![44.0, 43.1, 42.5]);

        let (status, current) = get_json(&app.router, "/api/current").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(current["value"], 44.0);
        assert_eq!(current["id"], data[0]["id"]);
    }

    #[tokio::test]
    async fn readings_carry_id_value_and_iso_timestamp() {
        let app = make_test_app().await;
        app.publish_all(&[br#"{"humidity": 61.75}"#]).await;

        let (_, current) = get_json(&app.router, "/api/current").await;
        let obj = current.as_object().unwrap();

        assert_eq!(obj.len(), 3);
        assert!(obj["id"].is_i64());
        assert_eq!(obj["value"], 61.75);
        let ts = obj["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(ts).is_ok(), "not ISO-8601: {ts}");
    }

    #[tokio::test]
    async fn data_is_capped_at_one_hundred_newest() {
        let app = make_test_app().await;
        for i in 0..150 {
            let payload = format!(r#"{{"humidity": {i}}}"#);
            app.publish_all(&[payload.as_bytes()]).await;
        }

        let (status, data) = get_json(&app.router, "/api/data").await;
        assert_eq!(status, StatusCode::OK);

        let got = values(&data);
        let expected: Vec<f64> = (50..150).rev().map(|i| i as f64).collect();
        assert_eq!(got.len(), 100);
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn data_is_newest_first_by_id() {
        let app = make_test_app().await;
        app.publish_all(&[
            br#"{"humidity": 1}"#,
            br#"{"humidity": 2}"#,
            br#"{"humidity": 3}"#,
        ])
        .await;

        let (_, data) = get_json(&app.router, "/api/data").await;
        let ids: Vec<i64> = data
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_i64().unwrap())
            .collect();

        assert!(ids.windows(2).all(|w| w[0] > w[1]), "ids not descending: {ids:?}");
    }

    #[tokio::test]
    async fn invalid_messages_do_not_change_results() {
        let app = make_test_app().await;
        app.publish_all(&[br#"{"humidity": 30}"#]).await;
        let (_, before) = get_json(&app.router, "/api/data").await;

        app.publish_all(&[
            br#"{"humidity": "dry"}"#,
            br#"{"moisture": 30}"#,
            br#"{"humidity": null}"#,
            b"{",
        ])
        .await;

        let (_, after) = get_json(&app.router, "/api/data").await;
        assert_eq!(before, after);
        assert_eq!(app.store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let app = make_test_app().await;
        app.publish_all(&[br#"{"humidity": 10}"#, br#"{"humidity": 20}"#])
            .await;

        let (_, first) = get_json(&app.router, "/api/data").await;
        let (_, second) = get_json(&app.router, "/api/data").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn storage_failure_is_a_server_error() {
        let app = make_test_app().await;
        app.store.db().clone().close().await.unwrap();

        let (status, json) = get_json(&app.router, "/api/data").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);

        let (status, _) = get_json(&app.router, "/api/current").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn dashboard_origin_is_allowed() {
        let app = make_test_app().await;
        let origin = "http://localhost:3000";

        let preflight = Request::builder()
            .method("OPTIONS")
            .uri("/api/current")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(preflight).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            origin
        );

        let req = Request::builder()
            .method("GET")
            .uri("/api/data")
            .header(header::ORIGIN, origin)
            .body(Body::empty())
            .unwrap();
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            origin
        );
    }
}
