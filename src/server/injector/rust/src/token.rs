/* src/server/injector/rust/src/token.rs */

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Token<'a> {
  Text(&'a str),
  /// Directive body between `<!--pw:` and `-->`.
  Marker(&'a str),
}

pub(crate) const MARKER_OPEN: &str = "<!--pw:";
pub(crate) const MARKER_CLOSE: &str = "-->";

pub(crate) fn tokenize(template: &str) -> Vec<Token<'_>> {
  let mut tokens = Vec::new();
  let mut rest = template;

  while !rest.is_empty() {
    let Some(open) = rest.find(MARKER_OPEN) else {
      tokens.push(Token::Text(rest));
      break;
    };
    if open > 0 {
      tokens.push(Token::Text(&rest[..open]));
    }
    let body = &rest[open + MARKER_OPEN.len()..];
    let Some(close) = body.find(MARKER_CLOSE) else {
      // unterminated marker stays literal
      tokens.push(Token::Text(&rest[open..]));
      break;
    };
    tokens.push(Token::Marker(body[..close].trim()));
    rest = &body[close + MARKER_CLOSE.len()..];
  }

  tokens
}
