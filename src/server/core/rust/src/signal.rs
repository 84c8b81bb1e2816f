/* src/server/core/rust/src/signal.rs */

use tokio::sync::broadcast;

/// Fired after a page is saved so every consumer of that slug refetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUpdated {
  pub slug: String,
}

/// Process-wide page-updated broadcast. Cheap to clone.
#[derive(Debug, Clone)]
pub struct PageUpdates {
  tx: broadcast::Sender<PageUpdated>,
}

impl PageUpdates {
  pub fn new() -> Self {
    let (tx, _) = broadcast::channel(64);
    Self { tx }
  }

  /// Broadcast an update for `slug`. Having no subscribers is fine.
  pub fn publish(&self, slug: &str) {
    tracing::info!(slug, "page updated");
    let _ = self.tx.send(PageUpdated { slug: slug.to_string() });
  }

  pub fn subscribe(&self) -> broadcast::Receiver<PageUpdated> {
    self.tx.subscribe()
  }

  pub fn receiver_count(&self) -> usize {
    self.tx.receiver_count()
  }
}

impl Default for PageUpdates {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn subscribers_receive_updates() {
    let updates = PageUpdates::new();
    let mut rx = updates.subscribe();
    updates.publish("home");
    assert_eq!(rx.recv().await.ok(), Some(PageUpdated { slug: "home".into() }));
  }

  #[test]
  fn publish_without_subscribers_is_ok() {
    let updates = PageUpdates::new();
    updates.publish("home");
    assert_eq!(updates.receiver_count(), 0);
  }
}
