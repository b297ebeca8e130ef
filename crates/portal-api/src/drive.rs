//! Google Drive share-link normalisation.
//!
//! A URL containing `/d/<file id>` is treated as a Drive share link. The
//! validator sends one HEAD request to the direct-download endpoint for that
//! id, without following redirects, and accepts the link only if Drive serves
//! it without bouncing to the login page. Accepted links are rewritten to the
//! canonical direct-download form. Any other URL passes through untouched.

use std::{sync::LazyLock, time::Duration};

use regex::Regex;
use reqwest::{StatusCode, header::LOCATION, redirect::Policy};
use thiserror::Error;

/// Where the probe is sent in production.
pub const DEFAULT_PROBE_BASE: &str = "https://drive.google.com";

/// The probe is never retried; a slow Drive fails the write.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

static DRIVE_FILE_ID: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("Drive id regex is valid") // Static pattern, safe to panic
});

#[derive(Debug, Error)]
pub enum DriveError {
  #[error("Google Drive file is not public. Set access to 'Anyone with the link'.")]
  NotPublic { file_id: String },

  #[error("could not reach Google Drive to verify the link: {0}")]
  Unreachable(#[source] reqwest::Error),
}

/// Extract the Drive file id from a share URL, if it is one.
pub fn extract_file_id(url: &str) -> Option<&str> {
  DRIVE_FILE_ID
    .captures(url)
    .and_then(|c| c.get(1))
    .map(|m| m.as_str())
}

/// The canonical direct-download URL for a Drive file.
pub fn canonical_url(file_id: &str) -> String {
  format!("{DEFAULT_PROBE_BASE}/uc?export=download&id={file_id}")
}

/// `true` if a redirect target is a sign-in page rather than the file.
fn is_login_redirect(location: &str) -> bool {
  location.contains("accounts.google.com") || location.contains("ServiceLogin")
}

/// Checks Drive links for public access before they are stored.
#[derive(Clone)]
pub struct DriveValidator {
  client:     reqwest::Client,
  probe_base: String,
}

impl DriveValidator {
  /// A validator probing `probe_base`, normally [`DEFAULT_PROBE_BASE`].
  pub fn with_probe_base(probe_base: impl Into<String>) -> Result<Self, reqwest::Error> {
    let client = reqwest::Client::builder()
      .redirect(Policy::none())
      .timeout(PROBE_TIMEOUT)
      .build()?;
    Ok(Self {
      client,
      probe_base: probe_base.into().trim_end_matches('/').to_owned(),
    })
  }

  /// Normalise `url`: non-Drive URLs are returned unchanged, public Drive
  /// links are rewritten to [`canonical_url`], anything else is an error.
  pub async fn normalize(&self, url: &str) -> Result<String, DriveError> {
    let Some(file_id) = extract_file_id(url) else {
      return Ok(url.to_owned());
    };

    if self.is_public(file_id).await? {
      Ok(canonical_url(file_id))
    } else {
      tracing::warn!(file_id, "rejected Drive link that is not publicly shared");
      Err(DriveError::NotPublic { file_id: file_id.to_owned() })
    }
  }

  async fn is_public(&self, file_id: &str) -> Result<bool, DriveError> {
    let response = self
      .client
      .head(format!("{}/uc?export=download&id={file_id}", self.probe_base))
      .send()
      .await
      .map_err(|e| {
        tracing::warn!(file_id, error = %e, "Drive probe failed");
        DriveError::Unreachable(e)
      })?;

    let redirected_to_login = response
      .headers()
      .get(LOCATION)
      .and_then(|v| v.to_str().ok())
      .is_some_and(is_login_redirect);
    if redirected_to_login {
      return Ok(false);
    }

    Ok(matches!(response.status(), StatusCode::OK | StatusCode::FOUND))
  }
}

#[cfg(test)]
mod tests {
  use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
  };

  use super::*;

  #[test]
  fn extracts_id_from_share_links() {
    assert_eq!(extract_file_id("https://drive.google.com/file/d/ABC123/view"), Some("ABC123"));
    assert_eq!(
      extract_file_id("https://drive.google.com/file/d/1a-B_c/view?usp=sharing"),
      Some("1a-B_c")
    );
    assert_eq!(extract_file_id("https://example.com/x.pdf"), None);
    assert_eq!(extract_file_id("https://drive.google.com/drive/folders/xyz"), None);
  }

  #[test]
  fn canonical_form() {
    assert_eq!(canonical_url("ABC123"), "https://drive.google.com/uc?export=download&id=ABC123");
  }

  async fn probe_responds(template: ResponseTemplate) -> (MockServer, DriveValidator) {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
      .and(path("/uc"))
      .and(query_param("export", "download"))
      .and(query_param("id", "ABC123"))
      .respond_with(template)
      .mount(&server)
      .await;
    let validator = DriveValidator::with_probe_base(server.uri()).unwrap();
    (server, validator)
  }

  #[tokio::test]
  async fn public_file_is_normalised() {
    let (_server, v) = probe_responds(ResponseTemplate::new(200)).await;
    let url = v.normalize("https://drive.google.com/file/d/ABC123/view").await.unwrap();
    assert_eq!(url, "https://drive.google.com/uc?export=download&id=ABC123");
  }

  #[tokio::test]
  async fn redirect_to_content_is_accepted() {
    let (_server, v) = probe_responds(
      ResponseTemplate::new(302)
        .insert_header("location", "https://drive.usercontent.google.com/download?id=ABC123"),
    )
    .await;
    assert!(v.normalize("https://drive.google.com/file/d/ABC123/view").await.is_ok());
  }

  #[tokio::test]
  async fn redirect_to_login_is_not_public() {
    let (_server, v) = probe_responds(
      ResponseTemplate::new(302)
        .insert_header("location", "https://accounts.google.com/ServiceLogin?continue=x"),
    )
    .await;
    let err = v.normalize("https://drive.google.com/file/d/ABC123/view").await.unwrap_err();
    assert!(matches!(err, DriveError::NotPublic { ref file_id } if file_id == "ABC123"));
  }

  #[tokio::test]
  async fn other_statuses_are_not_public() {
    for status in [403, 404, 500] {
      let (_server, v) = probe_responds(ResponseTemplate::new(status)).await;
      assert!(
        matches!(
          v.normalize("https://drive.google.com/file/d/ABC123/view").await,
          Err(DriveError::NotPublic { .. })
        ),
        "status {status} should be rejected"
      );
    }
  }

  #[tokio::test]
  async fn unreachable_probe_is_distinct_from_not_public() {
    // Bind then release a port so nothing is listening on it.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let v = DriveValidator::with_probe_base(format!("http://127.0.0.1:{port}")).unwrap();
    let err = v.normalize("https://drive.google.com/file/d/ABC123/view").await.unwrap_err();
    assert!(matches!(err, DriveError::Unreachable(_)), "got {err}");
  }

  #[tokio::test]
  async fn non_drive_urls_pass_through_without_probing() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;
    let v = DriveValidator::with_probe_base(server.uri()).unwrap();
    let url = "https://example.com/notes.pdf";
    assert_eq!(v.normalize(url).await.unwrap(), url);
  }
}
