/* src/server/injector/rust/src/parser.rs */

use crate::ast::Node;
use crate::token::Token;

/// Mismatched or unclosed block directive found while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDiagnostic {
  pub kind: DiagnosticKind,
  pub directive: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
  /// `endif:x`, `endeach` or `else` with no open block.
  UnmatchedBlockClose,
  /// `if:x` or `each:x` that reached the end of the template.
  UnclosedBlock,
}

struct Parser<'t, 'a> {
  tokens: &'t [Token<'a>],
  pos: usize,
  diagnostics: Vec<ParseDiagnostic>,
}

pub(crate) fn parse(tokens: &[Token<'_>]) -> (Vec<Node>, Vec<ParseDiagnostic>) {
  let mut parser = Parser { tokens, pos: 0, diagnostics: Vec::new() };
  let (nodes, _) = parser.block(&|_| false);
  (nodes, parser.diagnostics)
}

impl Parser<'_, '_> {
  /// Parse until a directive accepted by `stop`; returns the nodes and the
  /// stop directive (consumed), or `None` at end of input.
  fn block(&mut self, stop: &dyn Fn(&str) -> bool) -> (Vec<Node>, Option<String>) {
    let tokens = self.tokens;
    let mut nodes = Vec::new();
    while let Some(token) = tokens.get(self.pos) {
      self.pos += 1;
      let directive = match token {
        Token::Text(text) => {
          nodes.push(Node::Text((*text).to_string()));
          continue;
        }
        Token::Marker(directive) => *directive,
      };
      if stop(directive) {
        return (nodes, Some(directive.to_string()));
      }
      nodes.push(match directive {
        d if d.starts_with("if:") => self.if_block(&d[3..]),
        d if d.starts_with("each:") => self.each_block(&d[5..]),
        d if d == "else" || d == "endeach" || d.starts_with("endif:") => {
          self.diagnostics.push(ParseDiagnostic {
            kind: DiagnosticKind::UnmatchedBlockClose,
            directive: d.to_string(),
          });
          continue;
        }
        d => match d.split_once(":attr:") {
          Some((path, name)) => Node::Attr { path: path.to_string(), name: name.to_string() },
          None => match d.strip_suffix(":html") {
            Some(path) => Node::Slot { path: path.to_string(), raw: true },
            None => Node::Slot { path: d.to_string(), raw: false },
          },
        },
      });
    }
    (nodes, None)
  }

  fn if_block(&mut self, path: &str) -> Node {
    let endif = format!("endif:{path}");
    let (then, close) = self.block(&|d| d == "else" || d == endif);
    let (otherwise, close) = if close.as_deref() == Some("else") {
      self.block(&|d| d == endif)
    } else {
      (Vec::new(), close)
    };
    if close.is_none() {
      self.unclosed(format!("if:{path}"));
    }
    Node::If { path: path.to_string(), then, otherwise }
  }

  fn each_block(&mut self, path: &str) -> Node {
    let (body, close) = self.block(&|d| d == "endeach");
    if close.is_none() {
      self.unclosed(format!("each:{path}"));
    }
    Node::Each { path: path.to_string(), body }
  }

  fn unclosed(&mut self, directive: String) {
    self.diagnostics.push(ParseDiagnostic { kind: DiagnosticKind::UnclosedBlock, directive });
  }
}
