#[cfg(test)]
mod tests {
    use crate::helpers::{get_json, make_test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn health_check_returns_ok_json() {
        let app = make_test_app().await;

        let (status, json) = get_json(&app.router, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["status"], "ok");
        assert_eq!(json["data"]["ingestor"]["state"], "disconnected");
        assert_eq!(json["message"], "Health check passed");
    }

    #[tokio::test]
    async fn health_check_reflects_ingest_counters() {
        let app = make_test_app().await;
        app.publish_all(&[br#"{"humidity": 50}"#, b"garbage", br#"{"level": 3}"#])
            .await;

        let (_, json) = get_json(&app.router, "/api/health").await;
        let ingestor = &json["data"]["ingestor"];

        assert_eq!(ingestor["received"], 3);
        assert_eq!(ingestor["stored"], 1);
        assert_eq!(ingestor["decode_errors"], 1);
        assert_eq!(ingestor["missing_field"], 1);
    }
}
