//! # remotectl-adapter-redfish-reqwest
//!
//! Redfish adapter: JSON over HTTPS to a management controller (HPE iLO and
//! friends) using `reqwest`.
//!
//! ## Responsibilities
//! - Build the service root `https://<host>/redfish/v1/` from the configured host
//! - Authenticate every request with HTTP basic auth
//! - Decode JSON bodies, treating an empty body as `{}`
//! - Map every failure into an "API request failed: …" [`DeviceError`]
//!
//! ## Dependency rule
//! Depends on `remotectl-app` (port traits) and `remotectl-domain`.

mod error;

pub use error::RedfishError;

use std::fmt;

use remotectl_app::ports::{RedfishConnector, RedfishCredentials, RedfishTransport};
use remotectl_domain::error::DeviceError;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, Url};
use serde_json::Value;

const SERVICE_ROOT: &str = "redfish/v1/";

/// Builds a [`RedfishSession`] per invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReqwestConnector;

impl RedfishConnector for ReqwestConnector {
    type Transport = RedfishSession;

    fn connect(&self, credentials: &RedfishCredentials) -> Result<RedfishSession, DeviceError> {
        Ok(RedfishSession::open(credentials)?)
    }
}

/// An HTTP client bound to one controller's service root.
pub struct RedfishSession {
    client: Client,
    root: Url,
    username: String,
    password: String,
}

impl fmt::Debug for RedfishSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedfishSession")
            .field("root", &self.root.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl RedfishSession {
    /// Build the client. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`RedfishError::InvalidHost`] for a host that does not form a
    /// URL, or [`RedfishError::Http`] when the TLS backend cannot be set up.
    pub fn open(credentials: &RedfishCredentials) -> Result<Self, RedfishError> {
        let root = service_root(&credentials.host)?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .danger_accept_invalid_certs(credentials.insecure)
            .build()?;

        tracing::debug!(%root, insecure = credentials.insecure, "redfish session opened");
        Ok(Self {
            client,
            root,
            username: credentials.username.clone(),
            password: credentials.password.clone(),
        })
    }

    #[cfg(test)]
    fn root(&self) -> &Url {
        &self.root
    }

    /// Resolve a collection name or an `@odata.id` path.
    fn resolve(&self, path: &str) -> Result<Url, RedfishError> {
        self.root
            .join(path)
            .map_err(|_| RedfishError::InvalidPath(path.to_string()))
    }

    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, RedfishError> {
        let url = self.resolve(path)?;
        tracing::debug!(%method, %url, "redfish request");

        let mut request = self
            .client
            .request(method, url)
            .basic_auth(&self.username, Some(&self.password));
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await?.error_for_status()?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl RedfishTransport for RedfishSession {
    async fn get(&self, path: &str) -> Result<Value, DeviceError> {
        Ok(self.request(Method::GET, path, None).await?)
    }

    async fn post(&self, path: &str, body: Value) -> Result<Value, DeviceError> {
        Ok(self.request(Method::POST, path, Some(body)).await?)
    }
}

/// `https://<host>/redfish/v1/`, keeping the scheme when `host` has one.
fn service_root(host: &str) -> Result<Url, RedfishError> {
    let host = host.trim().trim_end_matches('/');
    let base = if host.contains("://") {
        format!("{host}/{SERVICE_ROOT}")
    } else {
        format!("https://{host}/{SERVICE_ROOT}")
    };
    Url::parse(&base).map_err(|err| RedfishError::InvalidHost {
        host: host.to_string(),
        reason: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::{HeaderMap as AxumHeaders, StatusCode};
    use axum::routing::{get, post};
    use serde_json::json;

    fn credentials(host: &str) -> RedfishCredentials {
        RedfishCredentials {
            host: host.to_string(),
            username: "admin".to_string(),
            password: "secret".to_string(),
            insecure: true,
        }
    }

    fn authorized(headers: &AxumHeaders) -> bool {
        // "admin:secret" in base64
        headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            == Some("Basic YWRtaW46c2VjcmV0")
    }

    /// A fake controller serving a single system on plain HTTP.
    async fn fake_controller() -> String {
        let app = Router::new()
            .route(
                "/redfish/v1/Systems",
                get(|headers: AxumHeaders| async move {
                    if !authorized(&headers) {
                        return Err(StatusCode::UNAUTHORIZED);
                    }
                    Ok(axum::Json(
                        json!({"Members": [{"@odata.id": "/redfish/v1/Systems/1"}]}),
                    ))
                }),
            )
            .route(
                "/redfish/v1/Systems/1",
                get(|| async { axum::Json(json!({"Id": "1", "PowerState": "On"})) }),
            )
            .route(
                "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset",
                post(|headers: AxumHeaders, body: String| async move {
                    let content_type = headers
                        .get("content-type")
                        .and_then(|value| value.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    if content_type == "application/json" && body == r#"{"ResetType":"On"}"# {
                        StatusCode::NO_CONTENT
                    } else {
                        StatusCode::BAD_REQUEST
                    }
                }),
            )
            .route("/redfish/v1/Broken", get(|| async { "<html>oops</html>" }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn should_build_https_root_for_bare_host() {
        let root = service_root("ilo.example.com").unwrap();
        assert_eq!(root.as_str(), "https://ilo.example.com/redfish/v1/");
    }

    #[test]
    fn should_keep_explicit_scheme() {
        let root = service_root("http://10.0.0.5:8080/").unwrap();
        assert_eq!(root.as_str(), "http://10.0.0.5:8080/redfish/v1/");
    }

    #[test]
    fn should_reject_unparsable_host() {
        let err = service_root("ilo host with spaces").unwrap_err();
        assert!(matches!(err, RedfishError::InvalidHost { .. }));
    }

    #[test]
    fn should_resolve_relative_and_absolute_paths() {
        let session = RedfishSession::open(&credentials("ilo.local")).unwrap();
        assert_eq!(
            session.resolve("Systems").unwrap().as_str(),
            "https://ilo.local/redfish/v1/Systems"
        );
        assert_eq!(
            session.resolve("/redfish/v1/Chassis/1/Thermal").unwrap().as_str(),
            "https://ilo.local/redfish/v1/Chassis/1/Thermal"
        );
    }

    #[test]
    fn should_connect_without_network_traffic() {
        let session = ReqwestConnector.connect(&credentials("192.0.2.1")).unwrap();
        assert_eq!(session.root().host_str(), Some("192.0.2.1"));
    }

    #[tokio::test]
    async fn should_get_collection_with_basic_auth() {
        let host = fake_controller().await;
        let session = RedfishSession::open(&credentials(&host)).unwrap();
        let systems = session.get("Systems").await.unwrap();
        assert_eq!(systems["Members"][0]["@odata.id"], json!("/redfish/v1/Systems/1"));

        let system = session.get("/redfish/v1/Systems/1").await.unwrap();
        assert_eq!(system["PowerState"], json!("On"));
    }

    #[tokio::test]
    async fn should_decode_empty_body_as_empty_object() {
        let host = fake_controller().await;
        let session = RedfishSession::open(&credentials(&host)).unwrap();
        let reply = session
            .post(
                "/redfish/v1/Systems/1/Actions/ComputerSystem.Reset",
                json!({"ResetType": "On"}),
            )
            .await
            .unwrap();
        assert_eq!(reply, json!({}));
    }

    #[tokio::test]
    async fn should_fail_on_error_status() {
        let host = fake_controller().await;
        let session = RedfishSession::open(&RedfishCredentials {
            password: "wrong".to_string(),
            ..credentials(&host)
        })
        .unwrap();
        let err = session.get("Systems").await.unwrap_err();
        assert!(err.message().starts_with("API request failed: "));
        assert!(err.message().contains("401"));
    }

    #[tokio::test]
    async fn should_fail_on_missing_resource() {
        let host = fake_controller().await;
        let session = RedfishSession::open(&credentials(&host)).unwrap();
        let err = session.get("Chassis").await.unwrap_err();
        assert!(err.message().contains("404"));
    }

    #[tokio::test]
    async fn should_fail_on_non_json_body() {
        let host = fake_controller().await;
        let session = RedfishSession::open(&credentials(&host)).unwrap();
        let err = session.get("Broken").await.unwrap_err();
        assert!(err.message().starts_with("API request failed: invalid JSON body"));
    }

    #[tokio::test]
    async fn should_fail_when_controller_is_unreachable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let session = RedfishSession::open(&credentials(&format!("http://{addr}"))).unwrap();
        let err = session.get("Systems").await.unwrap_err();
        assert!(err.message().starts_with("API request failed: "));
    }
}
