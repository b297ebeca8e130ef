//! Shared-passcode admin guard.
//!
//! Admin routes require the `X-Admin-Passcode` header to equal the passcode
//! configured at startup. Guarded handlers take the [`Admin`] extractor;
//! `POST /api/admin/verify` calls [`check_passcode`] directly so it can tell a
//! missing header apart from a wrong one.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, request::Parts},
};
use portal_core::store::PortalStore;
use sha2::{Digest, Sha256};

use crate::{AppState, error::ApiError};

/// Request header carrying the admin passcode.
pub const PASSCODE_HEADER: &str = "x-admin-passcode";

/// The configured admin passcode.
///
/// Only a SHA-256 digest is kept. Digests are compared in full without an
/// early exit. This is best effort, not a guaranteed constant-time
/// comparison: the compiler may still shortcut the fold.
#[derive(Clone)]
pub struct AdminSecret {
  digest: [u8; 32],
}

impl AdminSecret {
  pub fn new(passcode: &str) -> Self {
    Self { digest: digest(passcode) }
  }

  pub fn matches(&self, supplied: &str) -> bool {
    let supplied = digest(supplied);
    self
      .digest
      .iter()
      .zip(supplied.iter())
      .fold(0u8, |acc, (a, b)| acc | std::hint::black_box(a ^ b))
      == 0
  }
}

fn digest(value: &str) -> [u8; 32] {
  let mut out = [0u8; 32];
  out.copy_from_slice(&Sha256::digest(value.as_bytes()));
  out
}

/// Why a passcode check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasscodeError {
  /// No `X-Admin-Passcode` header at all.
  Missing,
  /// Header present but not equal to the configured passcode.
  Invalid,
}

/// Check the passcode header in `headers` against `secret`.
pub fn check_passcode(headers: &HeaderMap, secret: &AdminSecret) -> Result<(), PasscodeError> {
  let value = headers.get(PASSCODE_HEADER).ok_or(PasscodeError::Missing)?;
  let supplied = value.to_str().map_err(|_| PasscodeError::Invalid)?;
  if secret.matches(supplied) {
    Ok(())
  } else {
    Err(PasscodeError::Invalid)
  }
}

/// Zero-size marker: present in the handler means the caller supplied the
/// admin passcode. Missing and wrong passcodes both reject with 401.
pub struct Admin;

impl<S> FromRequestParts<AppState<S>> for Admin
where
  S: PortalStore + Send + Sync + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    check_passcode(&parts.headers, &state.admin).map_err(|_| ApiError::Unauthorized)?;
    Ok(Admin)
  }
}
