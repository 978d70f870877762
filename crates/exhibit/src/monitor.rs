//! Restart-on-crash supervision
//!
//! A monitor keeps one role alive: whenever the role fails it logs the
//! error chain, waits, and starts it again. While its gate is closed it
//! only wakes up periodically to check again.

use std::convert::Infallible;
use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;
use tracing::{error, info};

use crate::config::MonitorConfig;

#[derive(Debug, Clone)]
pub struct Monitor {
    name: String,
    restart_delay: Duration,
    idle_poll: Duration,
}

impl Monitor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            restart_delay: Duration::from_secs(5),
            idle_poll: Duration::from_secs(60),
        }
    }

    pub fn from_config(name: impl Into<String>, config: &MonitorConfig) -> Self {
        Self::new(name)
            .with_restart_delay(Duration::from_secs(config.restart_delay_secs))
            .with_idle_poll(Duration::from_secs(config.idle_poll_secs))
    }

    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    pub fn with_idle_poll(mut self, poll: Duration) -> Self {
        self.idle_poll = poll;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run `task` forever, restarting it after every failure
    pub async fn supervise<F, Fut, T, E>(&self, task: F) -> Infallible
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: StdError,
    {
        self.supervise_when(|| true, task).await
    }

    /// Like [`Monitor::supervise`], but only starts `task` while `gate` is open
    pub async fn supervise_when<G, F, Fut, T, E>(&self, mut gate: G, mut task: F) -> Infallible
    where
        G: FnMut() -> bool,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: StdError,
    {
        info!(monitor = %self.name, "===== {} monitor started =====", self.name);

        loop {
            if !gate() {
                tokio::time::sleep(self.idle_poll).await;
                continue;
            }

            info!(monitor = %self.name, ">>> {} starting", self.name);
            match task().await {
                Ok(_) => {}
                Err(e) => {
                    error!(
                        monitor = %self.name,
                        error = %error_chain(&e),
                        "[ERROR] {} crashed, restarting in {:?}",
                        self.name,
                        self.restart_delay
                    );
                    tokio::time::sleep(self.restart_delay).await;
                }
            }
        }
    }
}

/// `outer: inner: root` rendering of an error and its sources
pub fn error_chain(err: &dyn StdError) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use thiserror::Error;

    #[derive(Error, Debug)]
    #[error("round failed")]
    struct RoundFailed(#[source] std::io::Error);

    #[test]
    fn test_error_chain_includes_sources() {
        let err = RoundFailed(std::io::Error::other("disk gone"));
        assert_eq!(error_chain(&err), "round failed: disk gone");
    }

    #[tokio::test(start_paused = true)]
    async fn test_restarts_after_delay() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let monitor = Monitor::new("test").with_restart_delay(Duration::from_secs(5));

        let counter = attempts.clone();
        let run = monitor.supervise(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(std::io::Error::other("boom"))
            }
        });

        let _ = tokio::time::timeout(Duration::from_secs(12), run).await;
        // attempts at t=0, 5, 10
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_gate_never_runs_task() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let monitor = Monitor::new("closed").with_idle_poll(Duration::from_secs(60));

        let counter = attempts.clone();
        let run = monitor.supervise_when(
            || false,
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<(), std::io::Error>(())
                }
            },
        );

        let _ = tokio::time::timeout(Duration::from_secs(600), run).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gate_opens_later() {
        let open = Arc::new(AtomicBool::new(false));
        let attempts = Arc::new(AtomicUsize::new(0));
        let monitor = Monitor::new("gated")
            .with_idle_poll(Duration::from_secs(60))
            .with_restart_delay(Duration::from_secs(5));

        let gate_flag = open.clone();
        let counter = attempts.clone();
        let run = monitor.supervise_when(
            move || gate_flag.load(Ordering::SeqCst),
            move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_secs(1000)).await;
                    Ok::<(), std::io::Error>(())
                }
            },
        );

        let opener = open.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(90)).await;
            opener.store(true, Ordering::SeqCst);
        });

        let _ = tokio::time::timeout(Duration::from_secs(300), run).await;
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
