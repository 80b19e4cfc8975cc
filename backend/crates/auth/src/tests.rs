//! HTTP-level tests for the auth router
//!
//! Drives the full router (guard middleware included) against the in-memory store.

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use platform::clock::{Clock, ManualClock};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::application::config::AuthConfig;
    use crate::infra::memory::InMemoryCredentialStore;
    use crate::presentation::router::auth_router_generic;

    struct TestApp {
        router: Router,
        clock: Arc<ManualClock>,
    }

    struct LoggedIn {
        user_id: String,
        access_token: String,
        refresh_token: String,
    }

    impl TestApp {
        fn new() -> Self {
            let clock = Arc::new(ManualClock::starting_now());
            let store = InMemoryCredentialStore::new(clock.clone());
            let router = auth_router_generic(store, &AuthConfig::development(), clock.clone());
            Self { router, clock }
        }

        async fn send(&self, req: Request<Body>) -> (StatusCode, Value) {
            let response = self.router.clone().oneshot(req).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, body)
        }

        async fn register(&self, login: &str, role: &str) -> (StatusCode, Value) {
            self.send(json_request(
                "POST",
                "/registration",
                json!({
                    "login": login,
                    "email": format!("{login}@example.com"),
                    "password": "password123",
                    "role": role,
                    "first_name": "Alice",
                    "last_name": "Liddell",
                    "birth_date": "04-05-1990",
                }),
                None,
            ))
            .await
        }

        async fn login(&self, login: &str, password: &str) -> (StatusCode, Value) {
            let req = Request::builder()
                .method("POST")
                .uri("/authentication")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(format!("username={login}&password={password}")))
                .unwrap();
            self.send(req).await
        }

        /// Register and log in, returning ids and tokens
        async fn user(&self, login: &str, role: &str) -> LoggedIn {
            let (status, _) = self.register(login, role).await;
            assert_eq!(status, StatusCode::CREATED);
            let (status, body) = self.login(login, "password123").await;
            assert_eq!(status, StatusCode::OK, "{body}");
            LoggedIn {
                user_id: body["user_id"].as_str().unwrap().to_string(),
                access_token: body["access_token"].as_str().unwrap().to_string(),
                refresh_token: body["refresh_token"].as_str().unwrap().to_string(),
            }
        }

        async fn get_user(&self, id: &str, token: &str) -> (StatusCode, Value) {
            let req = Request::builder()
                .method("GET")
                .uri(format!("/users/{id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap();
            self.send(req).await
        }

        async fn delete_user(&self, id: &str, token: &str) -> (StatusCode, Value) {
            let req = Request::builder()
                .method("DELETE")
                .uri(format!("/users/{id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap();
            self.send(req).await
        }

        async fn get_profile(&self, id: &str, token: &str) -> (StatusCode, Value) {
            let req = Request::builder()
                .method("GET")
                .uri(format!("/users/{id}/profile"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap();
            self.send(req).await
        }

        async fn update_profile(&self, id: &str, body: Value, token: &str) -> (StatusCode, Value) {
            self.send(json_request(
                "PATCH",
                &format!("/users/{id}/profile"),
                body,
                Some(token),
            ))
            .await
        }

        async fn block_user(&self, id: &str, blocked: bool, token: &str) -> (StatusCode, Value) {
            self.send(json_request(
                "PATCH",
                &format!("/users/{id}"),
                json!({ "blocked": blocked }),
                Some(token),
            ))
            .await
        }
    }

    fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    /// Payload of a token, signature unchecked
    fn token_claims(token: &str) -> Value {
        let mut validation = jsonwebtoken::Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        jsonwebtoken::decode::<Value>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(&[]),
            &validation,
        )
        .unwrap()
        .claims
    }

    const OTHER_ID: &str = "7f1d3c2e-52b4-4a8e-9c61-3f0a2b9d8e11";

    #[tokio::test]
    async fn test_login_returns_token_pair_with_expiries() {
        let app = TestApp::new();
        app.register("alice", "moderator").await;

        let (status, body) = app.login("alice", "password123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["login"], "alice");
        assert_eq!(body["role"], "moderator");
        assert!(body["user_id"].is_string());

        let now = app.clock.now().timestamp();
        let access = token_claims(body["access_token"].as_str().unwrap());
        let refresh = token_claims(body["refresh_token"].as_str().unwrap());
        assert_eq!(access["sub"], "alice");
        assert_eq!(access["exp"], now + 5 * 60);
        assert_eq!(refresh["exp"], now + 24 * 3600);
    }

    #[tokio::test]
    async fn test_login_failures() {
        let app = TestApp::new();
        app.register("alice", "user").await;

        let (status, body) = app.login("alice", "wrong").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Incorrect login or password");

        let (status, body) = app.login("nobody", "password123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Incorrect login or password");
    }

    #[tokio::test]
    async fn test_blocked_login_rejected_without_tokens() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        let moderator = app.user("mod", "moderator").await;

        let (status, body) = app
            .block_user(&alice.user_id, true, &moderator.access_token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["blocked"], true);

        let (status, body) = app.login("alice", "password123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "User is blocked");
        assert!(body.get("access_token").is_none());

        // Existing tokens stop working too
        let (status, _) = app.get_user(&alice.user_id, &alice.access_token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_self_action_on_moderator_route() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        let bob = app.user("bob", "user").await;

        let (status, body) = app.get_user(&alice.user_id, &alice.access_token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["login"], "alice");
        assert!(body.get("password").is_none());
        assert!(body.get("password_hash").is_none());

        let (status, body) = app.get_user(&bob.user_id, &alice.access_token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "Forbidden");
    }

    #[tokio::test]
    async fn test_block_route_has_no_self_exemption() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        let (status, _) = app
            .block_user(&alice.user_id, false, &alice.access_token)
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_moderator_reads_anyone() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        let moderator = app.user("mod", "moderator").await;

        let (status, _) = app.get_user(&alice.user_id, &moderator.access_token).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app.get_user(OTHER_ID, &moderator.access_token).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found");
    }

    #[tokio::test]
    async fn test_bearer_and_token_errors() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;

        let req = Request::builder()
            .uri(format!("/users/{}", alice.user_id))
            .body(Body::empty())
            .unwrap();
        let (status, body) = app.send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Did not get credentials");

        let (status, body) = app.get_user(&alice.user_id, "not-a-token").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "Could not validate credentials");

        let (status, _) = app.get_user(&alice.user_id, &alice.refresh_token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        app.clock.advance(chrono::Duration::minutes(5));
        let (status, _) = app.get_user(&alice.user_id, &alice.access_token).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_refresh_flow() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        app.clock.advance(chrono::Duration::minutes(30));

        let (status, body) = app
            .send(json_request(
                "POST",
                "/authentication/token",
                json!({ "refresh_token": alice.refresh_token }),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["refresh_token"], alice.refresh_token.as_str());

        let access = body["access_token"].as_str().unwrap();
        assert_ne!(access, alice.access_token);
        let (status, _) = app.get_user(&alice.user_id, access).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .send(json_request(
                "POST",
                "/authentication/token",
                json!({ "refresh_token": alice.access_token }),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_self_delete_is_logical_and_final() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        let moderator = app.user("mod", "moderator").await;

        let (status, body) = app.delete_user(&alice.user_id, &alice.access_token).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);

        let (status, body) = app.get_user(&alice.user_id, &alice.access_token).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "The user does not exist anymore");

        let (status, body) = app.get_user(&alice.user_id, &moderator.access_token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_active"], false);
        assert!(body["deleted_at"].is_string());

        let (status, _) = app.login("alice", "password123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_requires_admin_for_others() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        let moderator = app.user("mod", "moderator").await;
        let admin = app.user("root", "admin").await;

        let (status, _) = app.delete_user(&alice.user_id, &moderator.access_token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = app.delete_user(&alice.user_id, &admin.access_token).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app.delete_user(OTHER_ID, &admin.access_token).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_registration_rejections() {
        let app = TestApp::new();
        let (status, body) = app.register("alice", "user").await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["user_id"].is_string());

        let (status, body) = app.register("alice", "user").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["detail"],
            "Login is already used. Please choose different login"
        );

        let (status, _) = app.register("bob", "superuser").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_registration_creates_profile() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;

        let (status, body) = app.get_profile(&alice.user_id, &alice.access_token).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], alice.user_id.as_str());
        assert_eq!(body["first_name"], "Alice");
        assert_eq!(body["last_name"], "Liddell");
        assert_eq!(body["birth_date"], "1990-05-04");
        assert_eq!(body["second_name"], Value::Null);
    }

    #[tokio::test]
    async fn test_profiles_are_readable_by_any_user() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        let bob = app.user("bob", "user").await;

        let (status, _) = app.get_profile(&alice.user_id, &bob.access_token).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app.get_profile(OTHER_ID, &bob.access_token).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Profile not found");

        let req = Request::builder()
            .uri(format!("/users/{}/profile", alice.user_id))
            .body(Body::empty())
            .unwrap();
        let (status, _) = app.send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_update() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;

        let (status, body) = app
            .update_profile(
                &alice.user_id,
                json!({ "about": "Down the rabbit hole", "birth_date": "01-01-1991" }),
                &alice.access_token,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["about"], "Down the rabbit hole");
        assert_eq!(body["birth_date"], "1991-01-01");
        assert_eq!(body["first_name"], "Alice");

        let (status, body) = app
            .update_profile(
                &alice.user_id,
                json!({ "birth_date": "1991-01-01" }),
                &alice.access_token,
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Invalid birth date: expected DD-MM-YYYY");
    }

    #[tokio::test]
    async fn test_profile_edit_rule_admits_every_role() {
        let app = TestApp::new();
        let alice = app.user("alice", "user").await;
        let bob = app.user("bob", "user").await;

        // USER already satisfies the requirement, so the target is not consulted
        let (status, body) = app
            .update_profile(&alice.user_id, json!({ "about": "edited" }), &bob.access_token)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["about"], "edited");
    }

    #[tokio::test]
    async fn test_registration_requires_valid_birth_date() {
        let app = TestApp::new();
        let (status, body) = app
            .send(json_request(
                "POST",
                "/registration",
                json!({
                    "login": "alice",
                    "email": "alice@example.com",
                    "password": "password123",
                    "role": "user",
                    "first_name": "Alice",
                    "last_name": "Liddell",
                    "birth_date": "1990-05-04",
                }),
                None,
            ))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Invalid birth date: expected DD-MM-YYYY");

        let (status, _) = app.login("alice", "password123").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
