//! Integration tests for the HTTP control plane adapter.
//!
//! A wiremock server stands in for the control plane.

use std::time::Duration;

use cloudnginx_client::{
    AccessToken, AuthError, ClientConfig, CloudProvider, DeployError, DeploymentFormController,
    Event, HttpControlPlane, Role, SessionController, View, connect, status,
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

const TIMEOUT: Duration = Duration::from_secs(2);

fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        request_timeout_secs: 2,
        ..ClientConfig::default()
    }
}

fn control_plane(server: &MockServer) -> HttpControlPlane {
    HttpControlPlane::new(&config_for(server)).expect("valid config")
}

async fn mock_login(server: &MockServer, template: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "username": "alice", "password": "secret" })))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_success_over_http() {
    init_test_tracing();
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "role": "developer",
            "access_token": "jwt-123"
        })),
    )
    .await;

    let mut session = SessionController::new(control_plane(&server), TIMEOUT);
    let role = session.login("alice", "secret").await.unwrap();

    assert_eq!(role, Role::Developer);
    assert_eq!(View::route(session.session()), View::DeveloperConsole);
    assert_eq!(
        session.session().access_token().map(|t| t.as_str()),
        Some("jwt-123")
    );
}

#[tokio::test]
async fn test_login_success_false_is_invalid_credentials() {
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "success": false })),
    )
    .await;

    let mut session = SessionController::new(control_plane(&server), TIMEOUT);
    assert_eq!(
        session.login("alice", "secret").await,
        Err(AuthError::InvalidCredentials)
    );
    assert!(!session.session().is_authenticated());
}

#[tokio::test]
async fn test_login_401_is_invalid_credentials() {
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid credentials" })),
    )
    .await;

    let mut session = SessionController::new(control_plane(&server), TIMEOUT);
    assert_eq!(
        session.login("alice", "secret").await,
        Err(AuthError::InvalidCredentials)
    );
}

#[tokio::test]
async fn test_login_server_error_is_unavailable() {
    let server = MockServer::start().await;
    mock_login(&server, ResponseTemplate::new(503)).await;

    let mut session = SessionController::new(control_plane(&server), TIMEOUT);
    assert_eq!(
        session.login("alice", "secret").await,
        Err(AuthError::AuthUnavailable)
    );
}

#[tokio::test]
async fn test_login_garbage_body_is_unavailable() {
    let server = MockServer::start().await;
    mock_login(&server, ResponseTemplate::new(200).set_body_string("<html>")).await;

    let mut session = SessionController::new(control_plane(&server), TIMEOUT);
    assert_eq!(
        session.login("alice", "secret").await,
        Err(AuthError::AuthUnavailable)
    );
}

#[tokio::test]
async fn test_login_unreachable_is_unavailable() {
    let server = MockServer::start().await;
    let config = config_for(&server);
    drop(server);

    let mut session = SessionController::new(HttpControlPlane::new(&config).unwrap(), TIMEOUT);
    assert_eq!(
        session.login("alice", "secret").await,
        Err(AuthError::AuthUnavailable)
    );
}

#[tokio::test]
async fn test_deploy_sends_request_and_token() {
    init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/deploy"))
        .and(header("authorization", "Bearer jwt-123"))
        .and(body_json(json!({
            "cloud_provider": "aws",
            "domain": "example.com",
            "namespace": "team-a",
            "appname": "nginx-1"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "public_url": "https://1.2.3.4" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut form = DeploymentFormController::new(control_plane(&server), TIMEOUT);
    form.set_domain("example.com");
    form.set_cloud_provider(CloudProvider::Aws);
    form.set_namespace("team-a");
    form.set_app_name("nginx-1");

    let token = AccessToken::from("jwt-123".to_string());
    let result = form.submit(Some(&token)).await.unwrap();

    let fragment = status::render(&result).expect("a link fragment");
    assert_eq!(fragment.link.href, "https://1.2.3.4");
}

#[tokio::test]
async fn test_invalid_form_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/deploy"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut form = DeploymentFormController::new(control_plane(&server), TIMEOUT);
    form.set_domain("not a domain");

    assert!(matches!(
        form.submit(None).await,
        Err(DeployError::InvalidRequest(_))
    ));
}

#[tokio::test]
async fn test_slow_deploy_times_out_and_keeps_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/deploy"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "public_url": "https://1.2.3.4" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let mut form =
        DeploymentFormController::new(control_plane(&server), Duration::from_millis(200));
    form.set_domain("example.com");
    form.set_cloud_provider(CloudProvider::Aws);

    assert_eq!(form.submit(None).await, Err(DeployError::DeployUnavailable));
    assert_eq!(form.form().domain().value(), "example.com");
    assert_eq!(form.form().cloud_provider(), CloudProvider::Aws);
}

#[tokio::test]
async fn test_full_session_over_http() {
    let server = MockServer::start().await;
    mock_login(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "success": true, "role": "developer" })),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/deploy"))
        .and(body_json(json!({ "cloud_provider": "gcp", "domain": "shop.example.org" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "public_url": "http://34.1.2.3" })),
        )
        .mount(&server)
        .await;

    let mut app = connect(&config_for(&server)).unwrap();
    app.handle(Event::UsernameChanged("alice".to_string())).await;
    app.handle(Event::PasswordChanged("secret".to_string())).await;
    app.handle(Event::LoginClicked).await;
    assert_eq!(app.view(), View::DeveloperConsole);

    app.handle(Event::DomainChanged("shop.example.org".to_string())).await;
    app.handle(Event::DeployClicked).await;
    assert_eq!(app.result().public_url, "http://34.1.2.3");

    app.handle(Event::LogoutClicked).await;
    assert_eq!(app.view(), View::Login);
    assert!(app.result().is_empty());
}
