//! Dispatch lifecycle hooks.
//!
//! Optional callbacks for tracing what the dispatcher does:
//!
//! - [`on_dispatch`](DispatchHooks::on_dispatch): an operation was handed to a worker
//! - [`on_deliver`](DispatchHooks::on_deliver): its terminal event was queued for delivery
//!
//! Hooks run on the worker side, not on the delivery context; keep them cheap.
//!
//! # Example
//!
//! ```rust
//! use airtable_link::DispatchHooks;
//!
//! let hooks = DispatchHooks::new()
//!     .on_dispatch(|id, kind| println!("#{} {} started", id, kind))
//!     .on_deliver(|d| println!("#{} -> {}", d.invocation_id, d.event.name()));
//! assert!(hooks.has_any());
//! ```

use std::fmt;
use std::sync::Arc;

use crate::{dispatcher::Delivery, events::OperationKind};

pub type OnDispatchCallback = Arc<dyn Fn(u64, OperationKind) + Send + Sync>;

pub type OnDeliverCallback = Arc<dyn Fn(&Delivery) + Send + Sync>;

#[derive(Clone, Default)]
pub struct DispatchHooks {
    pub(crate) on_dispatch: Option<OnDispatchCallback>,
    pub(crate) on_deliver: Option<OnDeliverCallback>,
}

impl fmt::Debug for DispatchHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchHooks")
            .field("on_dispatch", &self.on_dispatch.is_some())
            .field("on_deliver", &self.on_deliver.is_some())
            .finish()
    }
}

impl DispatchHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the invocation id and operation kind before the worker is spawned.
    pub fn on_dispatch(mut self, f: impl Fn(u64, OperationKind) + Send + Sync + 'static) -> Self {
        self.on_dispatch = Some(Arc::new(f));
        self
    }

    /// Called with each delivery just before it enters the queue.
    pub fn on_deliver(mut self, f: impl Fn(&Delivery) + Send + Sync + 'static) -> Self {
        self.on_deliver = Some(Arc::new(f));
        self
    }

    pub fn has_any(&self) -> bool {
        self.on_dispatch.is_some() || self.on_deliver.is_some()
    }

    pub(crate) fn emit_dispatch(&self, invocation_id: u64, kind: OperationKind) {
        if let Some(cb) = &self.on_dispatch {
            cb(invocation_id, kind);
        }
    }

    pub(crate) fn emit_deliver(&self, delivery: &Delivery) {
        if let Some(cb) = &self.on_deliver {
            cb(delivery);
        }
    }
}
