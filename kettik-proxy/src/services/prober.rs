//! Fallback prober for the verification-check endpoint.
//!
//! The upstream API has gone through several path aliases for the same
//! logical "check this code" operation. Rather than chase the current one,
//! the prober walks a fixed ordered candidate list with the same payload
//! and keeps the first 200. On exhaustion the LAST attempt's reply is
//! returned, not the first: callers see whatever the most recent alias had
//! to say. Candidate order is significant.

use crate::error::ProxyError;
use crate::services::upstream::{UpstreamAuth, UpstreamClient, UpstreamResponse};

/// Result of walking the candidate list.
#[derive(Debug)]
pub enum ProbeOutcome {
    /// A candidate answered 200; later candidates were never tried.
    Succeeded {
        attempts: usize,
        response: UpstreamResponse,
    },
    /// Every candidate answered non-200; `last` is the final attempt's
    /// reply (last-wins policy).
    Exhausted {
        attempts: usize,
        last: UpstreamResponse,
    },
}

impl ProbeOutcome {
    /// The reply to hand back to the client, under either outcome.
    pub fn into_inner(self) -> UpstreamResponse {
        match self {
            ProbeOutcome::Succeeded { response, .. } => response,
            ProbeOutcome::Exhausted { last, .. } => last,
        }
    }
}

/// Ordered list of upstream paths to try for one logical operation.
#[derive(Clone, Debug)]
pub struct FallbackProber {
    candidates: Vec<String>,
}

impl FallbackProber {
    pub fn new(candidates: &[String]) -> Result<Self, ProxyError> {
        if candidates.is_empty() {
            return Err(ProxyError::Config(
                "no verification endpoints configured".into(),
            ));
        }
        Ok(Self {
            candidates: candidates.to_vec(),
        })
    }

    /// POST `payload` to each candidate in order until one answers 200.
    /// Transport failures abort the probe; the fallback list covers path
    /// aliases, not flaky transport.
    pub async fn probe(
        &self,
        client: &UpstreamClient,
        payload: &serde_json::Value,
    ) -> Result<ProbeOutcome, ProxyError> {
        let mut last = None;

        for (attempt, path) in self.candidates.iter().enumerate() {
            let response = client
                .post_json(path, &UpstreamAuth::Service, payload)
                .await?;

            if response.is_ok() {
                tracing::debug!(path = %path, attempts = attempt + 1, "verification probe succeeded");
                return Ok(ProbeOutcome::Succeeded {
                    attempts: attempt + 1,
                    response,
                });
            }

            tracing::debug!(path = %path, status = response.status, "verification probe candidate failed");
            last = Some(response);
        }

        // `new` rejects empty candidate lists, so `last` is always set here.
        let last = last.ok_or_else(|| {
            ProxyError::Config("no verification endpoints configured".into())
        })?;

        tracing::warn!(
            attempts = self.candidates.len(),
            status = last.status,
            "verification probe exhausted all candidates"
        );

        Ok(ProbeOutcome::Exhausted {
            attempts: self.candidates.len(),
            last,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use secrecy::Secret;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidates() -> Vec<String> {
        vec![
            "/auth/verify-code/".to_string(),
            "/auth/verify/".to_string(),
            "/auth/check-verification/".to_string(),
            "/auth/bot/check/".to_string(),
        ]
    }

    async fn client_for(server: &MockServer) -> UpstreamClient {
        UpstreamClient::new(UpstreamConfig {
            base_url: server.uri(),
            bot_api_key: Secret::new("test-bot-key".to_string()),
            dev_chat_id: None,
            timeout_secs: 5,
            verify_paths: candidates(),
        })
        .unwrap()
    }

    #[test]
    fn empty_candidate_list_is_a_config_error() {
        assert!(matches!(
            FallbackProber::new(&[]),
            Err(ProxyError::Config(_))
        ));
    }

    #[tokio::test]
    async fn stops_on_first_200() {
        let server = MockServer::start().await;
        let payload = json!({"phone_number": "+996700000000", "code": "0000"});

        Mock::given(method("POST"))
            .and(path("/auth/verify-code/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "not found"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/verify/"))
            .respond_with(ResponseTemplate::new(405).set_body_json(json!({"detail": "nope"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/check-verification/"))
            .and(body_json(&payload))
            .and(header("X-Bot-API-Key", "test-bot-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/bot/check/"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let prober = FallbackProber::new(&candidates()).unwrap();
        let outcome = prober.probe(&client_for(&server).await, &payload).await.unwrap();

        match outcome {
            ProbeOutcome::Succeeded { attempts, response } => {
                assert_eq!(attempts, 3);
                assert_eq!(response.status, 200);
                assert_eq!(response.body, json!({"ok": true}));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn exhaustion_returns_the_last_attempt() {
        let server = MockServer::start().await;
        let payload = json!({"phone_number": "+996700000000", "code": "9999"});

        for (candidate, status, body) in [
            ("/auth/verify-code/", 404, json!({"detail": "first"})),
            ("/auth/verify/", 404, json!({"detail": "second"})),
            ("/auth/check-verification/", 404, json!({"detail": "third"})),
            ("/auth/bot/check/", 400, json!({"detail": "invalid code"})),
        ] {
            Mock::given(method("POST"))
                .and(path(candidate))
                .respond_with(ResponseTemplate::new(status).set_body_json(body))
                .expect(1)
                .mount(&server)
                .await;
        }

        let prober = FallbackProber::new(&candidates()).unwrap();
        let outcome = prober.probe(&client_for(&server).await, &payload).await.unwrap();

        match outcome {
            ProbeOutcome::Exhausted { attempts, last } => {
                assert_eq!(attempts, 4);
                assert_eq!(last.status, 400);
                assert_eq!(last.body, json!({"detail": "invalid code"}));
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn candidate_order_is_preserved() {
        let server = MockServer::start().await;
        let payload = json!({"phone_number": "+996700000000", "code": "0000"});

        // First candidate wins outright; nothing else may be called.
        Mock::given(method("POST"))
            .and(path("/auth/verify-code/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "t"})))
            .expect(1)
            .mount(&server)
            .await;
        for candidate in ["/auth/verify/", "/auth/check-verification/", "/auth/bot/check/"] {
            Mock::given(method("POST"))
                .and(path(candidate))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&server)
                .await;
        }

        let prober = FallbackProber::new(&candidates()).unwrap();
        let outcome = prober.probe(&client_for(&server).await, &payload).await.unwrap();

        match outcome {
            ProbeOutcome::Succeeded { attempts, .. } => assert_eq!(attempts, 1),
            other => panic!("expected success, got {:?}", other),
        }
    }
}
