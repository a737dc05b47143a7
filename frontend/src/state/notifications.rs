//! Toast notifications shown on top of every screen.

use std::time::{Duration, Instant};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct NotificationCenter {
    toasts: Vec<Toast>,
    lifetime: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(Duration::from_millis(4000))
    }
}

impl NotificationCenter {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            lifetime,
        }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>, now: Instant) -> Uuid {
        let toast = Toast {
            id: Uuid::new_v4(),
            level,
            message: message.into(),
            expires_at: now + self.lifetime,
        };
        let id = toast.id;
        self.toasts.push(toast);
        id
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) -> Uuid {
        self.push(ToastLevel::Success, message, now)
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) -> Uuid {
        self.push(ToastLevel::Error, message, now)
    }

    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drop expired toasts; returns how many were removed
    pub fn tick(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        before - self.toasts.len()
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toasts_expire() {
        let now = Instant::now();
        let mut center = NotificationCenter::new(Duration::from_secs(2));
        center.error("Failed to delete bank", now);
        center.success("Saved", now + Duration::from_secs(1));

        assert_eq!(center.tick(now + Duration::from_millis(2500)), 1);
        assert_eq!(center.visible().len(), 1);
        assert_eq!(center.visible()[0].level, ToastLevel::Success);
    }

    #[test]
    fn test_dismiss() {
        let mut center = NotificationCenter::default();
        let id = center.error("nope", Instant::now());
        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        assert!(center.visible().is_empty());
    }
}
