//! Concurrent write dispatch.

use std::future::Future;

use futures_util::{
    FutureExt, StreamExt,
    future::BoxFuture,
    stream::FuturesUnordered,
};

/// The writes of one reconciliation phase, driven to completion together.
pub(crate) struct WriteSet<'a, E> {
    pending: FuturesUnordered<BoxFuture<'a, Result<(), E>>>,
}

impl<'a, E> WriteSet<'a, E> {
    pub(crate) fn new() -> Self {
        Self {
            pending: FuturesUnordered::new(),
        }
    }

    pub(crate) fn push<F>(&mut self, write: F)
    where
        F: Future<Output = Result<(), E>> + Send + 'a,
    {
        self.pending.push(write.boxed());
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    /// Waits for every write and returns the first failure in completion order.
    ///
    /// Siblings of a failed write are not cancelled; their results are discarded and the
    /// enclosing transaction is expected to roll back.
    pub(crate) async fn run(self) -> Result<(), E> {
        let mut pending = self.pending;
        let mut first_error = None;

        while let Some(result) = pending.next().await {
            if let Err(error) = result
                && first_error.is_none()
            {
                first_error = Some(error);
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn runs_every_write() {
        let done = AtomicUsize::new(0);
        let mut writes: WriteSet<'_, ()> = WriteSet::new();

        for _ in 0..4 {
            writes.push(async {
                done.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        assert_eq!(writes.len(), 4);
        assert_eq!(writes.run().await, Ok(()));
        assert_eq!(done.load(Ordering::SeqCst), 4, "all writes should complete");
    }

    #[tokio::test]
    async fn failure_does_not_stop_siblings() {
        let done = AtomicUsize::new(0);
        let mut writes = WriteSet::new();

        writes.push(async { Err("first") });

        for _ in 0..3 {
            writes.push(async {
                done.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }

        assert_eq!(writes.run().await, Err("first"));
        assert_eq!(done.load(Ordering::SeqCst), 3, "siblings still run");
    }

    #[tokio::test]
    async fn reports_only_the_first_error() {
        let mut writes = WriteSet::new();

        writes.push(async { Err(1) });
        writes.push(async {
            tokio::task::yield_now().await;
            Err(2)
        });

        assert_eq!(writes.run().await, Err(1));
    }

    #[tokio::test]
    async fn empty_set_succeeds() {
        let writes: WriteSet<'_, ()> = WriteSet::new();

        assert_eq!(writes.run().await, Ok(()));
    }
}
