/* src/server/injector/rust/src/ast.rs */

#[derive(Debug)]
pub(crate) enum Node {
  Text(String),
  Slot { path: String, raw: bool },
  Attr { path: String, name: String },
  If { path: String, then: Vec<Node>, otherwise: Vec<Node> },
  Each { path: String, body: Vec<Node> },
}
