//! Sequential contract runner.
//!
//! Steps run strictly one after another on the caller's task. Each step is
//! sent, fully evaluated and (if it passed) allowed to write the session
//! context before the next one starts.

use crate::context::{ContextKey, SessionContext};
use crate::contract::{Auth, Step, Suite};
use crate::error::{ContextError, ContractError, ContractResult};
use crate::report::{CapturedResponse, Failure, StepOutcome, StepStatus, SuiteReport};
use crate::schema::SchemaValidator;
use chrono::Utc;
use contract_common::{HttpConfig, build_http_client};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// Path of the client registration endpoint.
pub const REGISTRATION_PATH: &str = "/api-clients/";

/// Status and raw body text of a response.
struct RawResponse {
    status: u16,
    text: String,
}

/// Runs steps and suites against one base URL.
#[derive(Debug)]
pub struct ContractRunner<V> {
    http: Client,
    base_url: Url,
    schemas: V,
}

impl<V: SchemaValidator> ContractRunner<V> {
    /// Create a runner from an existing HTTP client.
    #[must_use]
    pub const fn new(http: Client, base_url: Url, schemas: V) -> Self {
        Self {
            http,
            base_url,
            schemas,
        }
    }

    /// Create a runner with a client built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(base_url: Url, config: &HttpConfig, schemas: V) -> ContractResult<Self> {
        let http = build_http_client(config)?;
        Ok(Self::new(http, base_url, schemas))
    }

    /// Base URL every path is resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Schema validator in use.
    #[must_use]
    pub const fn schemas(&self) -> &V {
        &self.schemas
    }

    /// Resolve a path against the base URL, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> ContractResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{}", path.trim_start_matches('/')))?)
    }

    /// Register a client and store the issued access token in `ctx`.
    ///
    /// Any 2xx status is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::Registration`] on a non-2xx status,
    /// [`ContractError::MissingToken`] if the body has no non-empty
    /// `accessToken`, and [`ContractError::Transport`] if the call fails.
    /// Returns [`ContractError::Context`] without sending anything if `ctx`
    /// already holds a token.
    #[instrument(skip(self, ctx, client_email))]
    pub async fn register_client(
        &self,
        ctx: &mut SessionContext,
        client_name: &str,
        client_email: &str,
    ) -> ContractResult<SecretString> {
        if ctx.contains(ContextKey::AccessToken) {
            return Err(ContextError::AlreadySet(ContextKey::AccessToken).into());
        }
        let url = self.endpoint(REGISTRATION_PATH)?;
        let body = json!({
            "clientName": client_name,
            "clientEmail": client_email,
        });

        let response = self.http.post(url).json(&body).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ContractError::Registration {
                status: status.as_u16(),
                body: text,
            });
        }

        let payload: Value = serde_json::from_str(&text)?;
        let token = payload
            .get("accessToken")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .ok_or(ContractError::MissingToken)?;

        ctx.record(ContextKey::AccessToken, token)?;
        info!(status = status.as_u16(), "client registered");
        Ok(SecretString::from(token.to_owned()))
    }

    /// Run one step, recording every assertion failure.
    ///
    /// Never returns an error: transport problems, missing dependencies and
    /// assertion mismatches all end up in the returned outcome. A step that
    /// needs the access token is skipped when registration did not succeed.
    #[instrument(skip_all, fields(step = %step.name, method = %step.request.method))]
    pub async fn run_step(&self, step: &Step, ctx: &mut SessionContext) -> StepOutcome {
        let needs_token = step.auth == Auth::Bearer
            || step
                .dependencies()
                .is_ok_and(|deps| deps.contains(&ContextKey::AccessToken));
        if needs_token && !ctx.contains(ContextKey::AccessToken) {
            warn!("no access token in session, skipping");
            return StepOutcome::skipped(
                &step.name,
                "no access token: client registration did not succeed",
            );
        }

        let started = Instant::now();
        let (failures, response) = match self.send(step, ctx).await {
            Ok(raw) => {
                let (failures, body) = self.evaluate(step, &raw, ctx);
                let response = CapturedResponse {
                    status: raw.status,
                    body,
                };
                (failures, Some(response))
            }
            Err(failure) => (vec![failure], None),
        };
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        let status = if failures.is_empty() {
            info!(elapsed_ms, "step passed");
            StepStatus::Passed
        } else {
            for failure in &failures {
                warn!(%failure, "assertion failed");
            }
            StepStatus::Failed { failures }
        };

        StepOutcome {
            name: step.name.clone(),
            status,
            response,
            elapsed_ms,
        }
    }

    /// Render and send the step's request.
    async fn send(&self, step: &Step, ctx: &SessionContext) -> Result<RawResponse, Failure> {
        let invalid = |message: String| Failure::InvalidRequest { message };

        let deps = step.dependencies().map_err(|e| invalid(e.to_string()))?;
        if let Some(&key) = deps.iter().find(|&&key| !ctx.contains(key)) {
            return Err(Failure::MissingDependency { key });
        }

        let path = ctx
            .render_path(&step.request.path)
            .map_err(|e| invalid(e.to_string()))?;
        let url = self.endpoint(&path).map_err(|e| invalid(e.to_string()))?;
        debug!(%url, "sending request");

        let mut request = self.http.request(step.request.method.into(), url);
        for (name, value) in &step.request.headers {
            let value = ctx.render(value).map_err(|e| invalid(e.to_string()))?;
            request = request.header(name.as_str(), value);
        }
        if let Some(token) = ctx.access_token().filter(|_| step.auth == Auth::Bearer) {
            request = request.bearer_auth(token.expose_secret());
        }
        if let Some(body) = &step.request.body {
            let body = ctx.render_value(body).map_err(|e| invalid(e.to_string()))?;
            request = request.json(&body);
        }

        let transport = |e: reqwest::Error| Failure::Transport {
            message: e.to_string(),
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(transport)?;
        debug!(status, bytes = text.len(), "response received");

        Ok(RawResponse { status, text })
    }

    /// Check every expectation, then apply extractions if nothing failed.
    fn evaluate(
        &self,
        step: &Step,
        raw: &RawResponse,
        ctx: &mut SessionContext,
    ) -> (Vec<Failure>, Option<Value>) {
        let mut failures = Vec::new();
        let expect = &step.expect;

        if let Err(failure) = expect.status.check(raw.status) {
            failures.push(failure);
        }

        let blank = raw.text.trim().is_empty();
        let body = if blank {
            None
        } else {
            match serde_json::from_str::<Value>(&raw.text) {
                Ok(value) => Some(value),
                Err(e) => {
                    if step.inspects_body() {
                        failures.push(Failure::NotJson {
                            reason: e.to_string(),
                        });
                    }
                    None
                }
            }
        };

        if expect.empty_body && !blank {
            failures.push(Failure::UnexpectedBody {
                actual: raw.text.clone(),
            });
        }

        for field in &expect.fields {
            if let Err(failure) = field.check(body.as_ref()) {
                failures.push(failure);
            }
        }

        if let Some(schema) = &expect.schema {
            let null = Value::Null;
            if let Err(err) = self.schemas.validate(schema, body.as_ref().unwrap_or(&null)) {
                failures.push(Failure::Schema {
                    schema: schema.clone(),
                    violations: err.into_messages(),
                });
            }
        }

        if failures.is_empty() {
            failures.extend(Self::extract(step, body.as_ref(), ctx));
        }

        (failures, body)
    }

    /// Copy the declared fields into the context, all or nothing.
    fn extract(step: &Step, body: Option<&Value>, ctx: &mut SessionContext) -> Vec<Failure> {
        let mut values = Vec::with_capacity(step.extract.len());
        let mut failures = Vec::new();

        for extraction in &step.extract {
            let value = body
                .and_then(|b| b.pointer(&extraction.pointer))
                .and_then(|v| match v {
                    Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                });
            match value {
                Some(value) => values.push((extraction, value)),
                None => failures.push(Failure::Extraction {
                    pointer: extraction.pointer.clone(),
                    key: extraction.into,
                }),
            }
        }
        if !failures.is_empty() {
            return failures;
        }

        for (extraction, value) in values {
            if let Err(e) = ctx.record(extraction.into, value) {
                error!(error = %e, "cannot store extracted value");
                failures.push(Failure::Extraction {
                    pointer: extraction.pointer.clone(),
                    key: extraction.into,
                });
            } else {
                debug!(key = %extraction.into, "stored extracted value");
            }
        }
        failures
    }

    /// Validate and run a suite with a freshly generated client email.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::InvalidSuite`] (or a context error) if the
    /// suite cannot run as declared. Setup and step failures are reported in
    /// the returned [`SuiteReport`], not as errors.
    pub async fn run_suite(&self, suite: &Suite) -> ContractResult<SuiteReport> {
        self.run_suite_with(suite, SessionContext::with_generated_email())
            .await
    }

    /// Validate and run a suite with a caller-provided context.
    ///
    /// Registration is skipped when `ctx` already holds an access token.
    ///
    /// # Errors
    ///
    /// Same as [`ContractRunner::run_suite`].
    #[instrument(skip_all, fields(suite = %suite.name))]
    pub async fn run_suite_with(
        &self,
        suite: &Suite,
        mut ctx: SessionContext,
    ) -> ContractResult<SuiteReport> {
        suite.validate(&self.schemas)?;
        let started_at = Utc::now();
        info!(steps = suite.steps.len(), base_url = %self.base_url, "starting suite");

        let mut setup_error = None;
        let registration = suite
            .registration
            .as_ref()
            .filter(|_| !ctx.contains(ContextKey::AccessToken));
        if suite.registration.is_some() && registration.is_none() {
            info!("access token supplied by caller, skipping registration");
        }
        if let Some(registration) = registration {
            let email = ctx.client_email().to_owned();
            match self
                .register_client(&mut ctx, &registration.client_name, &email)
                .await
            {
                Ok(_) => {}
                Err(err) if err.is_setup_failure() => {
                    error!(error = %err, "client registration failed, dependent steps will be skipped");
                    setup_error = Some(err.to_string());
                }
                Err(err) => return Err(err),
            }
        }

        let mut outcomes = Vec::with_capacity(suite.steps.len());
        for step in &suite.steps {
            outcomes.push(self.run_step(step, &mut ctx).await);
        }

        let report = SuiteReport::from_outcomes(&suite.name, setup_error, outcomes, started_at);
        if report.ok {
            info!(reason = %report.reason, "suite passed");
        } else {
            warn!(reason = %report.reason, "suite failed");
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::HttpMethod;
    use crate::schema::SchemaRegistry;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runner(server: &MockServer) -> ContractRunner<SchemaRegistry> {
        let schemas = SchemaRegistry::new()
            .with_schema(
                "created",
                &json!({
                    "type": "object",
                    "properties": {"created": {"type": "boolean"}, "orderId": {"type": "string"}},
                    "required": ["created", "orderId"]
                }),
            )
            .unwrap();
        ContractRunner::new(Client::new(), Url::parse(&server.uri()).unwrap(), schemas)
    }

    fn authed_ctx() -> SessionContext {
        let mut ctx = SessionContext::new("qa@example.com");
        ctx.record(ContextKey::AccessToken, "tok-123").unwrap();
        ctx
    }

    fn submit_order() -> Step {
        Step::new("submit", HttpMethod::Post, "/orders/")
            .bearer()
            .with_body(json!({"bookId": 5, "customerName": "ali"}))
            .expect_status(201)
            .expect_field("/created", true)
            .expect_schema("created")
            .extract("/orderId", ContextKey::OrderId)
    }

    #[tokio::test]
    async fn test_register_client_accepts_any_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api-clients/"))
            .and(body_json(json!({"clientName": "qa", "clientEmail": "qa@example.com"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "tok-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut ctx = SessionContext::new("qa@example.com");
        let token = runner(&server)
            .register_client(&mut ctx, "qa", "qa@example.com")
            .await
            .unwrap();

        assert_eq!(token.expose_secret(), "tok-1");
        assert_eq!(ctx.get(ContextKey::AccessToken), Some("tok-1"));
    }

    #[tokio::test]
    async fn test_register_client_rejects_non_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api-clients/"))
            .respond_with(
                ResponseTemplate::new(409)
                    .set_body_json(json!({"error": "API client already registered."})),
            )
            .mount(&server)
            .await;

        let mut ctx = SessionContext::new("qa@example.com");
        let err = runner(&server)
            .register_client(&mut ctx, "qa", "qa@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ContractError::Registration { status: 409, .. }));
        assert!(!ctx.contains(ContextKey::AccessToken));
    }

    #[tokio::test]
    async fn test_register_client_requires_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api-clients/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"accessToken": ""})))
            .mount(&server)
            .await;

        let mut ctx = SessionContext::new("qa@example.com");
        let err = runner(&server)
            .register_client(&mut ctx, "qa", "qa@example.com")
            .await
            .unwrap_err();

        assert!(matches!(err, ContractError::MissingToken));
        assert!(err.is_setup_failure());
    }

    #[tokio::test]
    async fn test_passing_step_extracts_value() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders/"))
            .and(header("Authorization", "Bearer tok-123"))
            .and(body_json(json!({"bookId": 5, "customerName": "ali"})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"created": true, "orderId": "ord-1"})),
            )
            .mount(&server)
            .await;

        let mut ctx = authed_ctx();
        let outcome = runner(&server).run_step(&submit_order(), &mut ctx).await;

        assert!(outcome.passed(), "{outcome:?}");
        assert_eq!(outcome.response.as_ref().map(|r| r.status), Some(201));
        assert_eq!(ctx.order_id(), Some("ord-1"));
    }

    #[tokio::test]
    async fn test_failing_step_does_not_extract() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"created": true, "orderId": "ord-1"})),
            )
            .mount(&server)
            .await;

        let mut ctx = authed_ctx();
        let outcome = runner(&server).run_step(&submit_order(), &mut ctx).await;

        assert_eq!(
            outcome.failures(),
            &[Failure::Status {
                expected: "201".to_string(),
                actual: 200
            }]
        );
        assert_eq!(ctx.order_id(), None);
    }

    #[tokio::test]
    async fn test_all_failures_are_collected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"created": false})))
            .mount(&server)
            .await;

        let mut ctx = authed_ctx();
        let outcome = runner(&server).run_step(&submit_order(), &mut ctx).await;

        let failures = outcome.failures();
        assert_eq!(failures.len(), 3, "{failures:?}");
        assert!(matches!(failures[0], Failure::Status { actual: 400, .. }));
        assert!(matches!(failures[1], Failure::Field { .. }));
        assert!(matches!(failures[2], Failure::Schema { .. }));
    }

    #[tokio::test]
    async fn test_bearer_step_without_token_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut ctx = SessionContext::new("qa@example.com");
        let outcome = runner(&server).run_step(&submit_order(), &mut ctx).await;

        assert!(outcome.was_skipped());
    }

    #[tokio::test]
    async fn test_missing_order_id_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let step = Step::new("fetch", HttpMethod::Get, "/orders/{orderId}").bearer();
        let mut ctx = authed_ctx();
        let outcome = runner(&server).run_step(&step, &mut ctx).await;

        assert_eq!(
            outcome.failures(),
            &[Failure::MissingDependency {
                key: ContextKey::OrderId
            }]
        );
        assert!(outcome.response.is_none());
    }

    #[tokio::test]
    async fn test_empty_body_expectation() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/orders/ord-1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("gone"))
            .mount(&server)
            .await;

        let step = Step::new("delete", HttpMethod::Delete, "/orders/{orderId}")
            .bearer()
            .expect_status(204)
            .expect_empty_body();
        let mut ctx = authed_ctx();
        ctx.record(ContextKey::OrderId, "ord-1").unwrap();
        let outcome = runner(&server).run_step(&step, &mut ctx).await;

        assert_eq!(
            outcome.failures(),
            &[
                Failure::Status {
                    expected: "204".to_string(),
                    actual: 200
                },
                Failure::UnexpectedBody {
                    actual: "gone".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_body_expectation_passes_on_blank_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/orders/ord-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let step = Step::new("update", HttpMethod::Patch, "/orders/{orderId}")
            .bearer()
            .with_body(json!({"customerName": "abuakar"}))
            .expect_status(204)
            .expect_empty_body();
        let mut ctx = authed_ctx();
        ctx.record(ContextKey::OrderId, "ord-1").unwrap();

        assert!(runner(&server).run_step(&step, &mut ctx).await.passed());
    }

    #[tokio::test]
    async fn test_order_id_is_sent_as_one_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let step = Step::new("delete", HttpMethod::Delete, "/orders/{orderId}")
            .bearer()
            .expect_status(204);
        for order_id in ["../books/3", "abc?force=true", "a/b", "x#frag"] {
            let mut ctx = authed_ctx();
            ctx.record(ContextKey::OrderId, order_id).unwrap();
            let outcome = runner(&server).run_step(&step, &mut ctx).await;
            assert!(outcome.passed(), "{order_id}: {outcome:?}");
        }

        let paths: Vec<String> = server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|r| {
                assert!(r.url.query().is_none() && r.url.fragment().is_none());
                r.url.path().to_string()
            })
            .collect();
        assert_eq!(
            paths,
            vec![
                "/orders/..%2Fbooks%2F3",
                "/orders/abc%3Fforce%3Dtrue",
                "/orders/a%2Fb",
                "/orders/x%23frag",
            ]
        );
    }

    #[tokio::test]
    async fn test_dot_segment_order_id_is_not_sent() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let step = Step::new("delete", HttpMethod::Delete, "/orders/{orderId}").bearer();
        let mut ctx = authed_ctx();
        ctx.record(ContextKey::OrderId, "..").unwrap();
        let outcome = runner(&server).run_step(&step, &mut ctx).await;

        assert!(matches!(outcome.failures(), [Failure::InvalidRequest { .. }]));
        assert!(outcome.response.is_none());
    }

    #[tokio::test]
    async fn test_token_placeholder_without_token_is_skipped() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let step = Step::new("legacy auth", HttpMethod::Get, "/orders")
            .with_header("X-Api-Token", "{accessToken}");
        assert_eq!(step.auth, Auth::None);
        let mut ctx = SessionContext::new("qa@example.com");
        let outcome = runner(&server).run_step(&step, &mut ctx).await;

        assert!(outcome.was_skipped(), "{outcome:?}");
    }

    #[tokio::test]
    async fn test_register_client_refuses_second_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"accessToken": "tok-2"})))
            .expect(0)
            .mount(&server)
            .await;

        let mut ctx = authed_ctx();
        let err = runner(&server)
            .register_client(&mut ctx, "qa", "qa@example.com")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContractError::Context(ContextError::AlreadySet(ContextKey::AccessToken))
        ));
        assert_eq!(ctx.get(ContextKey::AccessToken), Some("tok-123"));
    }

    #[tokio::test]
    async fn test_supplied_token_skips_registration() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api-clients/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"accessToken": "tok-2"})))
            .expect(0)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/orders"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let suite = Suite::new("orders")
            .with_registration("qa")
            .step(Step::new("list", HttpMethod::Get, "/orders").bearer().expect_status(200));
        let report = runner(&server)
            .run_suite_with(&suite, authed_ctx())
            .await
            .unwrap();

        assert!(report.ok, "{}", report.reason);
        assert!(report.setup_error.is_none());
    }

    #[tokio::test]
    async fn test_non_json_body_fails_field_checks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/books/3"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let step = Step::new("book", HttpMethod::Get, "/books/3").expect_field("/id", 3);
        let mut ctx = SessionContext::new("qa@example.com");
        let outcome = runner(&server).run_step(&step, &mut ctx).await;

        let failures = outcome.failures();
        assert!(matches!(failures[0], Failure::NotJson { .. }));
        assert!(matches!(failures[1], Failure::Field { actual: None, .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_step_failure() {
        let runner = ContractRunner::new(
            Client::new(),
            Url::parse("http://127.0.0.1:9").unwrap(),
            SchemaRegistry::new(),
        );
        let step = Step::new("list", HttpMethod::Get, "/books");
        let mut ctx = SessionContext::new("qa@example.com");
        let outcome = runner.run_step(&step, &mut ctx).await;

        assert!(matches!(outcome.failures(), [Failure::Transport { .. }]));
    }

    #[tokio::test]
    async fn test_base_path_prefix_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let base = Url::parse(&format!("{}/api/v1/", server.uri())).unwrap();
        let runner = ContractRunner::new(Client::new(), base, SchemaRegistry::new());
        let step = Step::new("list", HttpMethod::Get, "books").expect_status(200);
        let mut ctx = SessionContext::new("qa@example.com");

        assert!(runner.run_step(&step, &mut ctx).await.passed());
    }
}
