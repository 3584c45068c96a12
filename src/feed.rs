//! Push-style catalog distribution.
//!
//! The hosted catalog is modeled as a stream of immutable snapshots: a
//! loader publishes a fresh [`CatalogSnapshot`] whenever the backing data
//! changes, and consumers either read the latest snapshot synchronously or
//! hold a subscription and await changes. Dropping a subscription releases
//! it; nothing polls.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::catalog::CatalogSnapshot;

#[derive(Debug, Clone)]
pub struct CatalogFeed {
    tx: Arc<watch::Sender<Arc<CatalogSnapshot>>>,
}

impl CatalogFeed {
    pub fn new(initial: CatalogSnapshot) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(initial));
        CatalogFeed { tx: Arc::new(tx) }
    }

    /// Replace the current snapshot and wake every subscriber.
    pub fn publish(&self, snapshot: CatalogSnapshot) {
        // send_replace never fails: the sender itself holds the channel open.
        self.tx.send_replace(Arc::new(snapshot));
    }

    /// The latest published snapshot.
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> CatalogSubscription {
        CatalogSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live subscription to the catalog feed. Dropping it releases the
/// subscription; there is no explicit unsubscribe call.
#[derive(Debug)]
pub struct CatalogSubscription {
    rx: watch::Receiver<Arc<CatalogSnapshot>>,
}

impl CatalogSubscription {
    pub fn current(&self) -> Arc<CatalogSnapshot> {
        self.rx.borrow().clone()
    }

    /// Wait for the next published snapshot. Returns `None` once the feed
    /// itself has been dropped.
    pub async fn changed(&mut self) -> Option<Arc<CatalogSnapshot>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Advertisement, Product};
    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    fn snapshot(n: usize) -> CatalogSnapshot {
        CatalogSnapshot {
            products: (0..n)
                .map(|i| Product {
                    id: Uuid::new_v4(),
                    name: format!("Fruit {i}"),
                    price: BigDecimal::from(100),
                    image: String::new(),
                    description: None,
                })
                .collect(),
            advertisements: vec![Advertisement {
                id: Uuid::new_v4(),
                image: "https://img.example/ad.jpg".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn subscribers_see_published_snapshots() {
        let feed = CatalogFeed::new(snapshot(1));
        let mut sub = feed.subscribe();
        assert_eq!(sub.current().products.len(), 1);

        feed.publish(snapshot(3));
        let latest = sub.changed().await.expect("feed still open");
        assert_eq!(latest.products.len(), 3);
        assert_eq!(feed.current().products.len(), 3);
    }

    #[tokio::test]
    async fn dropping_a_subscription_releases_it() {
        let feed = CatalogFeed::new(snapshot(0));
        let sub = feed.subscribe();
        let other = feed.subscribe();
        assert_eq!(feed.subscriber_count(), 2);

        drop(sub);
        assert_eq!(feed.subscriber_count(), 1);
        drop(other);
        assert_eq!(feed.subscriber_count(), 0);

        // Publishing with no subscribers still updates the snapshot.
        feed.publish(snapshot(2));
        assert_eq!(feed.current().products.len(), 2);
    }

    #[tokio::test]
    async fn changed_resolves_none_after_the_feed_is_gone() {
        let feed = CatalogFeed::new(snapshot(0));
        let mut sub = feed.subscribe();
        drop(feed);
        assert!(sub.changed().await.is_none());
    }
}
