use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use http_body_util::BodyExt;
use remotectl_adapter_http_axum::router;
use remotectl_adapter_http_axum::state::AppState;
use remotectl_adapter_kasa::KasaConnector;
use remotectl_adapter_redfish_reqwest::ReqwestConnector;
use remotectl_app::function::FunctionRunner;
use remotectl_app::settings::{FunctionSettings, PlugSettings, RedfishSettings};
use remotectl_domain::outcome::Family;
use serde_json::{Value, json};
use tower::ServiceExt;

/// Plain HTTP controller with one system that powers on in no time and
/// takes `delay` to list its systems.
async fn fake_controller(delay: Duration) -> String {
    let app = Router::new()
        .route(
            "/redfish/v1/Systems",
            get(move || async move {
                tokio::time::sleep(delay).await;
                axum::Json(json!({"Members": [{"@odata.id": "/redfish/v1/Systems/1"}]}))
            }),
        )
        .route(
            "/redfish/v1/Systems/1",
            get(|| async { axum::Json(json!({"Id": "1", "PowerState": "Off"})) }),
        )
        .route(
            "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset",
            post(|body: String| async move {
                if body == r#"{"ResetType":"On"}"# {
                    StatusCode::NO_CONTENT
                } else {
                    StatusCode::BAD_REQUEST
                }
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A port nothing listens on, neither TCP nor UDP.
async fn unused_port() -> u16 {
    let socket = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.local_addr().unwrap().port()
}

fn redfish_settings(host: &str) -> RedfishSettings {
    RedfishSettings {
        host: Some(host.to_string()),
        username: Some("admin".to_string()),
        password: Some("secret".to_string()),
        insecure: true,
    }
}

fn app(settings: FunctionSettings) -> Router {
    let runner = FunctionRunner::new(settings, ReqwestConnector, KasaConnector);
    router::build(AppState::new(runner, Family::Redfish))
}

async fn call(app: Router, uri: &str, body: &str) -> Value {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn should_answer_health_check() {
    let response = app(FunctionSettings::default())
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn should_power_on_system_through_controller() {
    let host = fake_controller(Duration::ZERO).await;
    let settings = FunctionSettings {
        redfish: redfish_settings(&host),
        ..FunctionSettings::default()
    };

    let body = call(
        app(settings),
        "/redfish",
        r#"{"action": "power_control", "power_action": "On"}"#,
    )
    .await;

    assert_eq!(
        body,
        json!({"success": "Power action 'On' initiated successfully"})
    );
}

#[tokio::test]
async fn should_return_system_info_for_empty_body() {
    let host = fake_controller(Duration::ZERO).await;
    let settings = FunctionSettings {
        redfish: redfish_settings(&host),
        ..FunctionSettings::default()
    };

    let body = call(app(settings), "/", "").await;

    assert_eq!(body, json!({"Id": "1", "PowerState": "Off"}));
}

#[tokio::test]
async fn should_report_missing_controller_configuration() {
    let settings = FunctionSettings {
        redfish: RedfishSettings {
            host: Some("10.0.0.5".to_string()),
            ..RedfishSettings::default()
        },
        ..FunctionSettings::default()
    };

    let body = call(app(settings), "/redfish", r#"{"action": "power_state"}"#).await;

    assert_eq!(
        body,
        json!({"error": "Missing required configuration: username, password"})
    );
}

#[tokio::test]
async fn should_list_available_actions_for_unknown_plug_action() {
    let body = call(
        app(FunctionSettings::default()),
        "/plug",
        r#"{"action": "reboot"}"#,
    )
    .await;

    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Unknown action: reboot"));
    assert_eq!(
        body["available_actions"],
        json!([
            "discover",
            "get_device_list",
            "get_device",
            "toggle_device",
            "set_device_state"
        ])
    );
}

#[tokio::test]
async fn should_report_absent_plug_on_toggle() {
    let settings = FunctionSettings {
        plug: PlugSettings {
            discovery_timeout_ms: 100,
            broadcast_address: "127.0.0.1".to_string(),
            port: unused_port().await,
        },
        ..FunctionSettings::default()
    };

    let body = call(
        app(settings),
        "/plug",
        r#"{"action": "toggle_device", "ip_address": "127.0.0.1"}"#,
    )
    .await;

    assert_eq!(
        body,
        json!({"success": false, "error": "Device not found at 127.0.0.1"})
    );
}

#[tokio::test]
async fn should_cancel_invocation_past_deadline() {
    let host = fake_controller(Duration::from_secs(5)).await;
    let settings = FunctionSettings {
        redfish: redfish_settings(&host),
        deadline: Duration::from_millis(200),
        ..FunctionSettings::default()
    };

    let body = call(app(settings), "/redfish", r#"{"action": "system_info"}"#).await;

    assert_eq!(body, json!({"error": "Operation timed out or was cancelled"}));
}
