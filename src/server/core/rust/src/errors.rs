/* src/server/core/rust/src/errors.rs */

use std::fmt;

/// Error surfaced by page fetches, sources and renderers.
/// `Clone` so one failed shared fetch can be handed to every waiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageError {
  code: String,
  message: String,
  status: u16,
}

fn default_status(code: &str) -> u16 {
  match code {
    "VALIDATION_ERROR" => 400,
    "NOT_FOUND" => 404,
    "FETCH_ERROR" => 502,
    _ => 500,
  }
}

impl PageError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    Self { code: code.into(), message: message.into(), status }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self { code, message: message.into(), status }
  }

  pub fn validation(msg: impl Into<String>) -> Self {
    Self::with_code("VALIDATION_ERROR", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  /// Upstream content could not be read.
  pub fn fetch(msg: impl Into<String>) -> Self {
    Self::with_code("FETCH_ERROR", msg)
  }

  /// A section renderer failed.
  pub fn render(msg: impl Into<String>) -> Self {
    Self::with_code("RENDER_ERROR", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }
}

impl fmt::Display for PageError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for PageError {}
