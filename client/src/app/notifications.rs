//! Notification center
//!
//! Shows one transient message at a time. A new message replaces the
//! previous one immediately; each message is dismissed after its lifetime
//! unless a newer one has already taken its place.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::entities::{Notification, NotificationKind};
use crate::domain::ports::FeedView;

pub struct NotificationCenter<V>
where
    V: FeedView + 'static,
{
    view: Arc<V>,
    lifetime: Duration,
    next_id: AtomicU64,
    current: Arc<Mutex<Option<u64>>>,
}

impl<V> NotificationCenter<V>
where
    V: FeedView + 'static,
{
    pub fn new(view: Arc<V>, lifetime: Duration) -> Self {
        Self {
            view,
            lifetime,
            next_id: AtomicU64::new(1),
            current: Arc::new(Mutex::new(None)),
        }
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Success, message.into())
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.show(NotificationKind::Error, message.into())
    }

    /// Id of the message currently shown, if any
    #[cfg(test)]
    pub fn current(&self) -> Option<u64> {
        *self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn show(&self, kind: NotificationKind, message: String) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            kind,
            message,
        };

        let previous = self
            .current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(id);
        if let Some(previous) = previous {
            self.view.dismiss_notification(previous);
        }

        tracing::debug!(notification_id = id, kind = %kind, "Showing notification");
        self.view.show_notification(&notification);

        let view = self.view.clone();
        let current = self.current.clone();
        let lifetime = self.lifetime;
        tokio::spawn(async move {
            tokio::time::sleep(lifetime).await;
            let expired = {
                let mut current = current
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner());
                if *current == Some(id) {
                    *current = None;
                    true
                } else {
                    false
                }
            };
            if expired {
                view.dismiss_notification(id);
            }
        });

        id
    }
}
