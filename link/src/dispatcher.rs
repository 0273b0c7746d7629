//! Async Dispatcher: background workers, single delivery context.
//!
//! Each dispatched operation runs as its own task on the tokio runtime
//! (no concurrency cap, no ordering between operations). Its terminal event
//! is pushed onto one unbounded queue, and the queue has exactly one
//! consumer, the [`EventStream`]. Callbacks for one stream are therefore
//! never concurrent, while events of different operations arrive in
//! completion order rather than issue order.
//!
//! There is no cancellation: a running invocation always ends in exactly
//! one delivery, even if its worker panics.

use std::future::Future;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use log::debug;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::{
    error::{AirtableLinkError, Result},
    event_handlers::DispatchHooks,
    events::{OperationKind, TableEvent},
};

/// Per-invocation lifecycle: `Pending -> Running -> {Delivered, Failed}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum InvocationState {
    Pending = 0,
    Running = 1,
    /// Success event queued for the delivery context
    Delivered = 2,
    /// Failure event queued for the delivery context
    Failed = 3,
}

impl InvocationState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => InvocationState::Pending,
            1 => InvocationState::Running,
            2 => InvocationState::Delivered,
            _ => InvocationState::Failed,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, InvocationState::Delivered | InvocationState::Failed)
    }
}

/// Observe-only handle to a dispatched operation.
#[derive(Debug, Clone)]
pub struct InvocationHandle {
    id: u64,
    kind: OperationKind,
    state: Arc<AtomicU8>,
}

impl InvocationHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn state(&self) -> InvocationState {
        InvocationState::from_u8(self.state.load(Ordering::Acquire))
    }
}

/// One terminal event, tagged with the invocation that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub invocation_id: u64,
    pub operation: OperationKind,
    pub event: TableEvent,
}

/// Consumer of delivered events.
pub trait EventSink {
    fn on_event(&mut self, delivery: Delivery);
}

impl<F> EventSink for F
where
    F: FnMut(Delivery),
{
    fn on_event(&mut self, delivery: Delivery) {
        self(delivery)
    }
}

/// Spawns operations and routes their outcomes to the [`EventStream`].
#[derive(Clone)]
pub struct AsyncDispatcher {
    runtime: Handle,
    sender: mpsc::UnboundedSender<Delivery>,
    next_id: Arc<AtomicU64>,
    hooks: DispatchHooks,
}

impl AsyncDispatcher {
    /// Dispatcher spawning onto `runtime`, plus the single delivery stream.
    pub fn new(runtime: Handle) -> (Self, EventStream) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self {
            runtime,
            sender,
            next_id: Arc::new(AtomicU64::new(1)),
            hooks: DispatchHooks::default(),
        };
        (dispatcher, EventStream { receiver })
    }

    /// Dispatcher bound to the runtime of the calling context.
    pub fn from_current() -> Result<(Self, EventStream)> {
        let runtime = Handle::try_current().map_err(|e| {
            AirtableLinkError::ConfigurationError(format!("No tokio runtime available: {}", e))
        })?;
        Ok(Self::new(runtime))
    }

    pub fn with_hooks(mut self, hooks: DispatchHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// Run `work` on a worker and deliver its outcome.
    ///
    /// `Err` becomes [`TableEvent::Failed`]; a panic becomes `Failed` with
    /// [`AirtableLinkError::InternalError`].
    pub fn dispatch<F>(&self, kind: OperationKind, work: F) -> InvocationHandle
    where
        F: Future<Output = Result<TableEvent>> + Send + 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let state = Arc::new(AtomicU8::new(InvocationState::Pending as u8));
        let handle = InvocationHandle {
            id,
            kind,
            state: Arc::clone(&state),
        };

        debug!("[AIRTABLE_DISPATCH] #{} {} dispatched", id, kind);
        self.hooks.emit_dispatch(id, kind);

        let worker_state = Arc::clone(&state);
        let worker = self.runtime.spawn(async move {
            worker_state.store(InvocationState::Running as u8, Ordering::Release);
            work.await
        });

        let sender = self.sender.clone();
        let hooks = self.hooks.clone();
        self.runtime.spawn(async move {
            let event = match worker.await {
                Ok(Ok(event)) => event,
                Ok(Err(error)) => TableEvent::failed(kind, error),
                Err(join_error) => TableEvent::failed(
                    kind,
                    AirtableLinkError::InternalError(format!(
                        "{} worker did not complete: {}",
                        kind, join_error
                    )),
                ),
            };

            let terminal = if event.is_failure() {
                InvocationState::Failed
            } else {
                InvocationState::Delivered
            };
            state.store(terminal as u8, Ordering::Release);

            let delivery = Delivery {
                invocation_id: id,
                operation: kind,
                event,
            };
            debug!(
                "[AIRTABLE_DISPATCH] #{} {} finished with {}",
                id,
                kind,
                delivery.event.name()
            );
            hooks.emit_deliver(&delivery);
            if sender.send(delivery).is_err() {
                debug!("[AIRTABLE_DISPATCH] #{} event dropped: stream closed", id);
            }
        });

        handle
    }
}

/// The single delivery context: the only place outcomes surface.
///
/// The stream ends once every dispatcher clone is dropped and all
/// in-flight invocations have delivered.
pub struct EventStream {
    receiver: mpsc::UnboundedReceiver<Delivery>,
}

impl EventStream {
    pub async fn next(&mut self) -> Option<Delivery> {
        self.receiver.recv().await
    }

    /// Next delivery if one is already queued.
    pub fn try_next(&mut self) -> Option<Delivery> {
        self.receiver.try_recv().ok()
    }

    /// Blocking receive for callers outside the async runtime.
    ///
    /// Panics if called from within an async execution context.
    pub fn recv_blocking(&mut self) -> Option<Delivery> {
        self.receiver.blocking_recv()
    }

    /// Hand the next delivery to `sink`. Returns `false` once the stream ended.
    pub async fn deliver_next<S: EventSink>(&mut self, sink: &mut S) -> bool {
        match self.next().await {
            Some(delivery) => {
                sink.on_event(delivery);
                true
            },
            None => false,
        }
    }

    /// Pump every delivery into `sink` until the stream ends.
    pub async fn drain_into<S: EventSink>(&mut self, sink: &mut S) {
        while self.deliver_next(sink).await {}
    }
}
