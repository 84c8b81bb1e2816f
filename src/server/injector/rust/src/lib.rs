/* src/server/injector/rust/src/lib.rs */

//! Comment-slot HTML templates.
//!
//! ```text
//! <!--pw:title-->                 escaped text
//! <!--pw:body:html-->             raw HTML
//! <!--pw:cta.link:attr:href--><a> attribute on the next tag
//! <!--pw:if:subtitle-->..<!--pw:else-->..<!--pw:endif:subtitle-->
//! <!--pw:each:items-->..<!--pw:$.title-->..<!--pw:endeach-->
//! ```

mod ast;
mod helpers;
mod parser;
mod render;
mod token;

use std::borrow::Cow;

pub use helpers::escape_html;
pub use parser::{DiagnosticKind, ParseDiagnostic};

use render::{RenderContext, render, splice_attrs};
use serde_json::Value;

/// Render `template` against `data`.
pub fn inject(template: &str, data: &Value) -> String {
  inject_with_diagnostics(template, data).0
}

/// Like [`inject`], also returning diagnostics for unbalanced blocks.
pub fn inject_with_diagnostics(template: &str, data: &Value) -> (String, Vec<ParseDiagnostic>) {
  // NUL delimits attribute markers; valid HTML never contains it.
  let clean: Cow<'_, str> =
    if template.contains('\0') { Cow::Owned(template.replace('\0', "")) } else { Cow::Borrowed(template) };
  let tokens = token::tokenize(&clean);
  let (nodes, diagnostics) = parser::parse(&tokens);

  let mut ctx = RenderContext::default();
  let mut html = String::with_capacity(clean.len());
  render(&nodes, data, &mut ctx, &mut html);
  if !ctx.attrs.is_empty() {
    html = splice_attrs(&html, &ctx.attrs);
  }
  (html, diagnostics)
}

/// Parse-only check used when loading templates from disk.
pub fn check_template(template: &str) -> Vec<ParseDiagnostic> {
  parser::parse(&token::tokenize(template)).1
}
