//! Server assembly for the study portal.
//!
//! Loads [`ServerConfig`], builds the CORS layer and wraps
//! [`portal_api::api_router`] with request tracing. The binary in `main.rs`
//! only wires these together.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use axum::{Router, http::HeaderValue};
use portal_api::{AppState, api_router, drive::DEFAULT_PROBE_BASE};
use portal_core::store::PortalStore;
use serde::Deserialize;
use tower_http::{
  cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, from `config.toml` overlaid by `PORTAL_*`
/// environment variables.
///
/// Not `Debug`: it carries the admin passcode.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:             String,
  pub port:             u16,
  pub store_dir:        PathBuf,
  pub database:         String,
  pub admin_passcode:   String,
  pub cors_origins:     String,
  pub drive_probe_base: String,
}

impl ServerConfig {
  /// Load from the TOML file at `path` (optional) and the environment.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::from_source(config::File::from(path).required(false))
  }

  fn from_source<T>(file: T) -> anyhow::Result<Self>
  where
    T: config::Source + Send + Sync + 'static,
  {
    let settings = config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8001)?
      .set_default("store_dir", ".")?
      .set_default("database", "portal")?
      .set_default("cors_origins", "*")?
      .set_default("drive_probe_base", DEFAULT_PROBE_BASE)?
      .add_source(file)
      .add_source(config::Environment::with_prefix("PORTAL"))
      .build()
      .context("failed to read configuration")?;

    let cfg: ServerConfig = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    if cfg.admin_passcode.is_empty() {
      anyhow::bail!("admin_passcode must not be empty");
    }
    Ok(cfg)
  }

  /// `<store_dir>/<database>.sqlite3`, with a leading `~` expanded.
  pub fn store_path(&self) -> PathBuf {
    expand_tilde(&self.store_dir).join(format!("{}.sqlite3", self.database))
  }

  pub fn bind_address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── HTTP layers ──────────────────────────────────────────────────────────────

/// Build the CORS layer for `origins`: `*` or a comma-separated list.
///
/// The wildcard allows everything without credentials. An explicit list
/// allows credentials and mirrors the preflight's method and headers.
pub fn cors_layer(origins: &str) -> anyhow::Result<CorsLayer> {
  if origins.trim() == "*" {
    return Ok(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    );
  }

  let list = origins
    .split(',')
    .map(str::trim)
    .filter(|o| !o.is_empty())
    .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin {o:?}")))
    .collect::<anyhow::Result<Vec<_>>>()?;
  if list.is_empty() {
    anyhow::bail!("cors_origins lists no origins");
  }

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(list))
      .allow_credentials(true)
      .allow_methods(AllowMethods::mirror_request())
      .allow_headers(AllowHeaders::mirror_request()),
  )
}

/// The full application: API routes, CORS and per-request tracing.
pub fn app<S>(state: AppState<S>, cors: CorsLayer) -> Router
where
  S: PortalStore + Send + Sync + 'static,
{
  api_router(state)
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use config::FileFormat;
  use portal_api::{AdminSecret, DriveValidator};
  use portal_store_sqlite::SqliteStore;
  use tower::ServiceExt;

  use super::*;

  fn from_toml(toml: &str) -> anyhow::Result<ServerConfig> {
    ServerConfig::from_source(config::File::from_str(toml, FileFormat::Toml))
  }

  #[test]
  fn defaults_fill_everything_but_the_passcode() {
    let cfg = from_toml(r#"admin_passcode = "pw""#).unwrap();
    assert_eq!(cfg.bind_address(), "0.0.0.0:8001");
    assert_eq!(cfg.cors_origins, "*");
    assert_eq!(cfg.drive_probe_base, DEFAULT_PROBE_BASE);
    assert_eq!(cfg.store_path(), PathBuf::from("./portal.sqlite3"));
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml(
      r#"
        admin_passcode = "pw"
        port           = 9000
        store_dir      = "/var/lib/portal"
        database       = "toolkit"
      "#,
    )
    .unwrap();
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.store_path(), PathBuf::from("/var/lib/portal/toolkit.sqlite3"));
  }

  #[test]
  fn passcode_is_required_and_non_empty() {
    assert!(from_toml("").is_err());
    assert!(from_toml(r#"admin_passcode = """#).is_err());
  }

  #[test]
  fn invalid_cors_origins_are_rejected() {
    assert!(cors_layer("https://ok.example, bad\u{7f}origin").is_err());
    assert!(cors_layer(" , ").is_err());
  }

  async fn app_with_cors(origins: &str) -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let drive = DriveValidator::with_probe_base(DEFAULT_PROBE_BASE).unwrap();
    let state = AppState::new(store, AdminSecret::new("pw"), drive);
    app(state, cors_layer(origins).unwrap())
  }

  fn get_with_origin(origin: &str) -> Request<Body> {
    Request::builder()
      .uri("/api/papers")
      .header(header::ORIGIN, origin)
      .body(Body::empty())
      .unwrap()
  }

  #[tokio::test]
  async fn wildcard_cors_allows_any_origin() {
    let app = app_with_cors("*").await;
    let resp = app.oneshot(get_with_origin("https://anywhere.example")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
  }

  #[tokio::test]
  async fn listed_cors_origins_are_echoed_with_credentials() {
    let origins = "https://portal.example, https://admin.example";

    let resp = app_with_cors(origins)
      .await
      .oneshot(get_with_origin("https://admin.example"))
      .await
      .unwrap();
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "https://admin.example");
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");

    let resp = app_with_cors(origins)
      .await
      .oneshot(get_with_origin("https://evil.example"))
      .await
      .unwrap();
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
  }

  #[tokio::test]
  async fn preflight_mirrors_requested_headers() {
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/api/papers")
      .header(header::ORIGIN, "https://portal.example")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-admin-passcode")
      .body(Body::empty())
      .unwrap();
    let resp = app_with_cors("https://portal.example").await.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS], "x-admin-passcode");
  }
}
