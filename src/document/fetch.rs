//! Bounded retry and timeout around document source calls

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use super::model::{Collection, Node, TextStyle, Variable};
use super::source::{DocumentSource, SourceError};
use crate::config::FetchOptions;

/// Wraps a [`DocumentSource`], applying a timeout to every call and retrying
/// failed calls a bounded number of times.
#[derive(Debug)]
pub struct Fetcher<S> {
    source: S,
    timeout: Duration,
    attempts: u32,
}

impl<S: DocumentSource> Fetcher<S> {
    pub fn new(source: S, options: &FetchOptions) -> Self {
        Self {
            source,
            timeout: Duration::from_millis(options.timeout_ms),
            attempts: options.retries.saturating_add(1),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn call<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T, SourceError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, SourceError>>,
    {
        let mut last = SourceError::Unavailable(what.to_string());
        for attempt in 1..=self.attempts {
            match tokio::time::timeout(self.timeout, op()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => {
                    warn!(what, attempt, error = %e, "document fetch failed");
                    last = e;
                }
                Err(_) => {
                    warn!(what, attempt, "document fetch timed out");
                    last = SourceError::Timeout {
                        what: what.to_string(),
                        attempts: attempt,
                    };
                }
            }
        }
        Err(last)
    }

    pub async fn text_styles(&self) -> Result<Vec<TextStyle>, SourceError> {
        let source = &self.source;
        self.call("text styles", move || source.text_styles()).await
    }

    pub async fn collections(&self) -> Result<Vec<Collection>, SourceError> {
        let source = &self.source;
        self.call("collections", move || source.collections()).await
    }

    pub async fn collection(&self, id: &str) -> Result<Option<Collection>, SourceError> {
        let source = &self.source;
        self.call("collection", move || source.collection(id)).await
    }

    pub async fn variable(&self, id: &str) -> Result<Option<Variable>, SourceError> {
        let source = &self.source;
        self.call("variable", move || source.variable(id)).await
    }

    pub async fn node(&self, id: &str) -> Result<Option<Node>, SourceError> {
        let source = &self.source;
        self.call("node", move || source.node(id)).await
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Fails the first `failures` calls, then reports an empty document
    struct Flaky {
        failures: u32,
        calls: Cell<u32>,
    }

    impl Flaky {
        fn tick(&self) -> Result<(), SourceError> {
            let n = self.calls.get() + 1;
            self.calls.set(n);
            if n <= self.failures {
                Err(SourceError::Unavailable(format!("call {}", n)))
            } else {
                Ok(())
            }
        }
    }

    impl DocumentSource for Flaky {
        async fn text_styles(&self) -> Result<Vec<TextStyle>, SourceError> {
            self.tick().map(|_| vec![])
        }
        async fn collections(&self) -> Result<Vec<Collection>, SourceError> {
            self.tick().map(|_| vec![])
        }
        async fn collection(&self, _id: &str) -> Result<Option<Collection>, SourceError> {
            self.tick().map(|_| None)
        }
        async fn variable(&self, _id: &str) -> Result<Option<Variable>, SourceError> {
            self.tick().map(|_| None)
        }
        async fn node(&self, _id: &str) -> Result<Option<Node>, SourceError> {
            self.tick().map(|_| None)
        }
    }

    struct Stalled;

    impl DocumentSource for Stalled {
        async fn text_styles(&self) -> Result<Vec<TextStyle>, SourceError> {
            std::future::pending().await
        }
        async fn collections(&self) -> Result<Vec<Collection>, SourceError> {
            std::future::pending().await
        }
        async fn collection(&self, _id: &str) -> Result<Option<Collection>, SourceError> {
            std::future::pending().await
        }
        async fn variable(&self, _id: &str) -> Result<Option<Variable>, SourceError> {
            std::future::pending().await
        }
        async fn node(&self, _id: &str) -> Result<Option<Node>, SourceError> {
            std::future::pending().await
        }
    }

    fn options(retries: u32) -> FetchOptions {
        FetchOptions {
            timeout_ms: 20,
            retries,
        }
    }

    #[tokio::test]
    async fn test_retry_recovers() {
        let fetcher = Fetcher::new(
            Flaky {
                failures: 2,
                calls: Cell::new(0),
            },
            &options(2),
        );
        assert!(fetcher.collections().await.is_ok());
        assert_eq!(fetcher.source().calls.get(), 3);
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let fetcher = Fetcher::new(
            Flaky {
                failures: 5,
                calls: Cell::new(0),
            },
            &options(1),
        );
        let result = fetcher.variable("v").await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
        assert_eq!(fetcher.source().calls.get(), 2);
    }

    #[tokio::test]
    async fn test_timeout() {
        let fetcher = Fetcher::new(Stalled, &options(0));
        let result = fetcher.collection("c").await;
        assert!(matches!(
            result,
            Err(SourceError::Timeout { attempts: 1, .. })
        ));
    }
}
