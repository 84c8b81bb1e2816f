/* src/server/injector/rust/src/render.rs */

use std::fmt::Write;

use serde_json::Value;

use crate::ast::Node;
use crate::helpers::{escape_html, is_boolean_attr, is_truthy, resolve, stringify};

/// Attributes collected during rendering. Each one leaves a `\0{index}\0`
/// marker in the output that [`splice_attrs`] later moves into the next tag.
#[derive(Default)]
pub(crate) struct RenderContext {
  pub(crate) attrs: Vec<(String, String)>,
}

pub(crate) fn render(nodes: &[Node], data: &Value, ctx: &mut RenderContext, out: &mut String) {
  for node in nodes {
    match node {
      Node::Text(text) => out.push_str(text),
      Node::Slot { path, raw } => {
        let value = stringify(resolve(path, data).unwrap_or(&Value::Null));
        if *raw {
          out.push_str(&value);
        } else {
          out.push_str(&escape_html(&value));
        }
      }
      Node::Attr { path, name } => {
        let value = match resolve(path, data) {
          None | Some(Value::Null) => continue,
          Some(v) if is_boolean_attr(name) => {
            if !is_truthy(v) {
              continue;
            }
            String::new()
          }
          Some(v) => escape_html(&stringify(v)),
        };
        let _ = write!(out, "\0{}\0", ctx.attrs.len());
        ctx.attrs.push((name.clone(), value));
      }
      Node::If { path, then, otherwise } => {
        let branch = if resolve(path, data).is_some_and(is_truthy) { then } else { otherwise };
        render(branch, data, ctx, out);
      }
      Node::Each { path, body } => {
        let Some(Value::Array(items)) = resolve(path, data) else { continue };
        let mut scope = match data {
          Value::Object(map) => map.clone(),
          _ => serde_json::Map::new(),
        };
        if let Some(outer) = scope.get("$").cloned() {
          scope.insert("$$".into(), outer);
        }
        for item in items {
          scope.insert("$".into(), item.clone());
          let scoped = Value::Object(scope.clone());
          render(body, &scoped, ctx, out);
        }
      }
    }
  }
}

/// Move every pending attribute marker into the tag that follows it.
/// Markers with no following tag are dropped.
pub(crate) fn splice_attrs(html: &str, attrs: &[(String, String)]) -> String {
  let mut out = String::with_capacity(html.len() + attrs.len() * 16);
  let mut pending: Vec<usize> = Vec::new();
  let mut rest = html;

  while let Some(i) = rest.find(['\0', '<']) {
    out.push_str(&rest[..i]);
    let after = &rest[i + 1..];
    if rest.as_bytes()[i] == 0 {
      let end = after.find('\0').unwrap_or(after.len());
      if let Ok(idx) = after[..end].parse::<usize>() {
        pending.push(idx);
      }
      rest = after.get(end + 1..).unwrap_or("");
      continue;
    }

    out.push('<');
    let name_len = after.find(|c: char| c.is_whitespace() || c == '>' || c == '/').unwrap_or(after.len());
    let opens_tag = after.starts_with(|c: char| c.is_ascii_alphabetic());
    if opens_tag && !pending.is_empty() {
      out.push_str(&after[..name_len]);
      for idx in pending.drain(..) {
        if let Some((name, value)) = attrs.get(idx) {
          let _ = write!(out, r#" {name}="{value}""#);
        }
      }
      rest = &after[name_len..];
    } else {
      rest = after;
    }
  }
  out.push_str(rest);
  out
}
