use std::future::Future;

use anyhow::{Context, Result};
use tokio::{
    runtime::Runtime,
    sync::mpsc::{UnboundedReceiver, UnboundedSender, error::TryRecvError, unbounded_channel},
};

use crate::api::{CancelHandle, CancelSignal, RequestOptions};

/// Runs requests on a tokio runtime and hands their results back to the UI
/// thread, which drains them between frames.
pub(crate) struct Fetcher<M> {
    runtime: Runtime,
    sender: UnboundedSender<M>,
    receiver: UnboundedReceiver<M>,
    cancel: CancelHandle,
}

impl<M: Send + 'static> Fetcher<M> {
    pub(crate) fn new() -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("custdesk-fetch")
            .enable_all()
            .build()
            .context("failed to start the request runtime")?;
        let (sender, receiver) = unbounded_channel();
        Ok(Self {
            runtime,
            sender,
            receiver,
            cancel: CancelHandle::new(),
        })
    }

    /// Options for a request that is cancelled when the screen goes away.
    pub(crate) fn options(&self) -> RequestOptions {
        RequestOptions::new().with_signal(self.signal())
    }

    pub(crate) fn signal(&self) -> CancelSignal {
        self.cancel.signal()
    }

    pub(crate) fn spawn<F>(&self, request: F)
    where
        F: Future<Output = M> + Send + 'static,
    {
        let sender = self.sender.clone();
        self.runtime.spawn(async move {
            let message = request.await;
            if sender.send(message).is_err() {
                tracing::debug!("screen closed before the response arrived");
            }
        });
    }

    /// Everything that completed since the last call.
    pub(crate) fn drain(&mut self) -> Vec<M> {
        let mut messages = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }
        messages
    }
}

impl<M> Drop for Fetcher<M> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
