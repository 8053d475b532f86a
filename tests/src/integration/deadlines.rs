//! # Deadline Expiry Flows
//!
//! A slow evaluate call must surface as a deadline error, and the session
//! must still be released. Runs under tokio's paused clock so the standard
//! five-second evaluate budget expires instantly.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use cg_04_request_orchestration::{QueryRequest, RequestOrchestrator};
    use serde_json::json;

    use crate::fixtures::{enroll, script, Consortium, ScriptedBackend};

    #[tokio::test(start_paused = true)]
    async fn test_slow_evaluate_surfaces_deadline_and_releases_session() {
        let consortium = Consortium::new(&[&["settlement_bridge"]]);
        let client = enroll("alice");
        consortium.register(1, "alice", &client.cert_pem);

        // The peer answers after ten seconds; the evaluate budget is five.
        let backend = Arc::new(
            ScriptedBackend::new(script(&[(
                "settlement_bridge",
                Ok(r#"{"id":"u-1","name":"alice","balance":"1"}"#),
            )]))
            .with_delay(Duration::from_secs(10)),
        );
        let orchestrator = RequestOrchestrator::with_backend(
            Arc::clone(&consortium.registry),
            consortium.resolver(),
            Arc::clone(&backend) as _,
        );

        let request: QueryRequest = serde_json::from_value(json!({
            "privateKey": client.key_pem,
            "certificate": client.cert_pem,
            "query": "user_balance",
        }))
        .unwrap();
        let response = orchestrator.handle(request).await;

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], false);
        assert!(
            body["error"].as_str().unwrap().contains("deadline exceeded"),
            "unexpected error: {}",
            body["error"]
        );
        assert_eq!(backend.opens(), 1);
        assert_eq!(backend.releases(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_evaluate_inside_budget_succeeds() {
        let consortium = Consortium::new(&[&["settlement_bridge"]]);
        let client = enroll("alice");
        consortium.register(1, "alice", &client.cert_pem);

        let backend = Arc::new(
            ScriptedBackend::new(script(&[(
                "settlement_bridge",
                Ok(r#"{"id":"u-1","name":"alice","balance":"1"}"#),
            )]))
            .with_delay(Duration::from_secs(3)),
        );
        let orchestrator = RequestOrchestrator::with_backend(
            Arc::clone(&consortium.registry),
            consortium.resolver(),
            Arc::clone(&backend) as _,
        );

        let request: QueryRequest = serde_json::from_value(json!({
            "privateKey": client.key_pem,
            "certificate": client.cert_pem,
            "query": "user_balance",
        }))
        .unwrap();
        let response = orchestrator.handle(request).await;

        assert!(response.success);
        assert_eq!(backend.releases(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_slow_instance_delays_but_does_not_fail_aggregation() {
        // Aggregation waits for every instance to settle; a slow instance
        // that still beats its own deadline contributes to the sum.
        let consortium = Consortium::new(&[&["v1", "v2"]]);
        let client = enroll("alice");
        consortium.register(1, "alice", &client.cert_pem);

        let backend = Arc::new(
            ScriptedBackend::new(script(&[
                ("v1", Ok(r#"{"id":"u-1","name":"alice","balance":"10"}"#)),
                ("v2", Ok(r#"{"id":"u-1","name":"alice","balance":"20"}"#)),
            ]))
            .with_delay(Duration::from_secs(4)),
        );
        let orchestrator = RequestOrchestrator::with_backend(
            Arc::clone(&consortium.registry),
            consortium.resolver(),
            Arc::clone(&backend) as _,
        );

        let request: QueryRequest = serde_json::from_value(json!({
            "privateKey": client.key_pem,
            "certificate": client.cert_pem,
            "query": "aggregated_balance",
        }))
        .unwrap();
        let response = orchestrator.handle(request).await;

        let body = serde_json::to_value(&response).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["user_balance"]["balance"], 30);
    }
}
