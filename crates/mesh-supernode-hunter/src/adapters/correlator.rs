//! Async query dispatch.
//!
//! `TokioCorrelator` turns each issued query into a task that awaits the
//! transport under a timeout and reports a [`QueryCompletion`] on a channel.
//! The driver drains that channel into the service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::{Address, Dict, MessageError, OutboundQuery, QueryCompletion, QueryReply};
use crate::ports::QueryCorrelator;

/// Request/response transport to other overlay nodes.
#[async_trait]
pub trait QueryTransport: Send + Sync + 'static {
    /// Send `message` to `target` and wait for its reply.
    ///
    /// Returns the reply body and the address it came from.
    async fn request(&self, target: Address, message: Dict) -> Result<(Dict, Address), TransportError>;
}

/// Transport failures. The correlator reports all of them as timeouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No route to the target.
    #[error("node unreachable: {0}")]
    Unreachable(Address),
    /// Socket or session failure.
    #[error("transport I/O failed: {0}")]
    Io(String),
    /// The reply could not be decoded.
    #[error("undecodable reply: {0}")]
    Decode(#[from] MessageError),
}

/// Correlator backed by Tokio tasks.
///
/// Each issued query runs in its own task; its completion is delivered
/// exactly once on the channel returned by [`TokioCorrelator::new`]. When the
/// receiver has been dropped the completion is discarded.
pub struct TokioCorrelator<T: QueryTransport> {
    transport: Arc<T>,
    timeout: Duration,
    completions: mpsc::UnboundedSender<QueryCompletion>,
    runtime: Handle,
    in_flight: Arc<AtomicUsize>,
}

impl<T: QueryTransport> TokioCorrelator<T> {
    /// Create a correlator and the receiving end of its completion channel.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(transport: Arc<T>, timeout: Duration) -> (Self, mpsc::UnboundedReceiver<QueryCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let correlator = Self {
            transport,
            timeout,
            completions: tx,
            runtime: Handle::current(),
            in_flight: Arc::new(AtomicUsize::new(0)),
        };
        (correlator, rx)
    }

    /// Queries issued but not yet completed.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Relaxed)
    }
}

impl<T: QueryTransport> QueryCorrelator for TokioCorrelator<T> {
    fn issue(&self, query: OutboundQuery) {
        let OutboundQuery { message, context } = query;
        let transport = Arc::clone(&self.transport);
        let completions = self.completions.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let timeout = self.timeout;

        in_flight.fetch_add(1, Ordering::Relaxed);
        self.runtime.spawn(async move {
            let target = context.target;
            let reply = match tokio::time::timeout(timeout, transport.request(target, message)).await {
                Ok(Ok((message, responder))) => QueryReply::Reply { message, responder },
                Ok(Err(e)) => {
                    debug!(target = %target, kind = %context.kind, error = %e, "Query failed");
                    QueryReply::Timeout
                }
                Err(_) => QueryReply::Timeout,
            };
            in_flight.fetch_sub(1, Ordering::Relaxed);

            if completions.send(QueryCompletion { context, reply }).is_err() {
                trace!(target = %target, "Completion receiver gone, dropping");
            }
        });
    }
}

impl<T: QueryTransport> std::fmt::Debug for TokioCorrelator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokioCorrelator")
            .field("timeout", &self.timeout)
            .field("in_flight", &self.in_flight())
            .finish_non_exhaustive()
    }
}
