/// Notified when stored credentials are dropped because they could not be
/// refreshed. A UI typically navigates to its login screen here.
pub trait SessionObserver: Send + Sync {
    fn session_expired(&self);
}

/// Ignores session expiry.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSessionObserver;

impl SessionObserver for NoopSessionObserver {
    fn session_expired(&self) {}
}

impl<F> SessionObserver for F
where
    F: Fn() + Send + Sync,
{
    fn session_expired(&self) {
        self()
    }
}
