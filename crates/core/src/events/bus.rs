// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process fan-out of run events

use super::subscription::{SubscriberId, Subscription};
use crate::effect::Event;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

struct Route {
    subscription: Subscription,
    tx: EventSender,
}

#[derive(Default)]
struct Routes {
    by_id: HashMap<SubscriberId, Route>,
    /// Sees every event regardless of patterns
    tap: Option<EventSender>,
}

/// Delivers each published event to every subscription that accepts it
///
/// Clones share one routing table, so a driver can publish while a view
/// layer holding another clone subscribes. Routes whose receiver was dropped
/// are removed on the next publish that notices.
#[derive(Clone, Default)]
pub struct EventBus {
    routes: Arc<RwLock<Routes>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription; an existing one with the same id is replaced
    pub fn subscribe(&self, subscription: Subscription) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
        routes
            .by_id
            .insert(subscription.id.clone(), Route { subscription, tx });
        rx
    }

    pub fn unsubscribe(&self, id: &SubscriberId) {
        let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
        routes.by_id.remove(id);
    }

    /// Receiver for every event, replacing any earlier one
    pub fn set_global_handler(&self) -> EventReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
        routes.tap = Some(tx);
        rx
    }

    /// Publish `event`, returning how many subscriptions received it
    pub fn publish(&self, event: &Event) -> usize {
        let name = event.name();
        let mut delivered = 0;
        let mut stale = false;
        {
            let routes = self.routes.read().unwrap_or_else(|e| e.into_inner());
            if let Some(tap) = &routes.tap {
                let _ = tap.send(event.clone());
            }
            for route in routes.by_id.values() {
                if !route.subscription.accepts(&name, event.run_id()) {
                    continue;
                }
                match route.tx.send(event.clone()) {
                    Ok(()) => delivered += 1,
                    Err(_) => stale = true,
                }
            }
        }

        if stale {
            let mut routes = self.routes.write().unwrap_or_else(|e| e.into_inner());
            routes.by_id.retain(|id, route| {
                let open = !route.tx.is_closed();
                if !open {
                    tracing::debug!(subscriber = %id.0, "dropped closed subscriber");
                }
                open
            });
        }
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.routes
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .by_id
            .len()
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;
