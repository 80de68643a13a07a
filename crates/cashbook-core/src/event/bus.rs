//! Typed application events shared between widgets.

use std::collections::{HashMap, VecDeque};

use cashbook_types::{BalanceError, BalanceSnapshot};

use crate::dom::NodeId;

/// Events widgets publish to coordinate with each other.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Open the dialog matched by `target_selector`; focus returns to
    /// `trigger` when it closes.
    DialogOpen { target_selector: String, trigger: Option<NodeId> },
    DialogClose,
    SelectAllRender,
    StickyHeaderRender,
    RunningTotalRender,
    /// Completion of a balance refresh request.
    BalancesLoaded(Result<BalanceSnapshot, BalanceError>),
}

/// Discriminant of [`AppEvent`], used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    DialogOpen,
    DialogClose,
    SelectAllRender,
    StickyHeaderRender,
    RunningTotalRender,
    BalancesLoaded,
}

impl AppEvent {
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::DialogOpen { .. } => EventKind::DialogOpen,
            Self::DialogClose => EventKind::DialogClose,
            Self::SelectAllRender => EventKind::SelectAllRender,
            Self::StickyHeaderRender => EventKind::StickyHeaderRender,
            Self::RunningTotalRender => EventKind::RunningTotalRender,
            Self::BalancesLoaded(_) => EventKind::BalancesLoaded,
        }
    }

    pub fn dialog_open(target_selector: impl Into<String>, trigger: Option<NodeId>) -> Self {
        Self::DialogOpen { target_selector: target_selector.into(), trigger }
    }
}

/// Subscribers per event kind plus a FIFO of published events.
///
/// Publishing only queues; the page drains the queue once the current
/// handler has returned, so a subscriber never runs inside its publisher.
#[derive(Debug)]
pub struct EventBus<S> {
    subscribers: HashMap<EventKind, Vec<S>>,
    pending: VecDeque<AppEvent>,
}

impl<S> Default for EventBus<S> {
    fn default() -> Self {
        Self { subscribers: HashMap::new(), pending: VecDeque::new() }
    }
}

impl<S> EventBus<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, kind: EventKind, subscriber: S) {
        self.subscribers.entry(kind).or_default().push(subscriber);
    }

    pub fn publish(&mut self, event: AppEvent) {
        tracing::trace!(kind = ?event.kind(), "Event published");
        self.pending.push_back(event);
    }

    /// Oldest undelivered event.
    pub fn next_pending(&mut self) -> Option<AppEvent> {
        self.pending.pop_front()
    }

    /// Subscribers of `kind` in subscription order.
    pub fn subscribers(&self, kind: EventKind) -> &[S] {
        self.subscribers.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_is_fifo() {
        let mut bus: EventBus<u8> = EventBus::new();
        bus.publish(AppEvent::DialogClose);
        bus.publish(AppEvent::RunningTotalRender);

        assert_eq!(bus.next_pending(), Some(AppEvent::DialogClose));
        assert_eq!(bus.next_pending(), Some(AppEvent::RunningTotalRender));
        assert!(bus.is_idle());
    }

    #[test]
    fn test_subscribers_by_kind() {
        let mut bus = EventBus::new();
        bus.subscribe(EventKind::DialogOpen, 1);
        bus.subscribe(EventKind::DialogOpen, 2);
        bus.subscribe(EventKind::DialogClose, 3);

        assert_eq!(bus.subscribers(EventKind::DialogOpen), &[1, 2]);
        assert!(bus.subscribers(EventKind::BalancesLoaded).is_empty());
        assert_eq!(
            AppEvent::dialog_open("#incomplete-batch-dialogue", None).kind(),
            EventKind::DialogOpen
        );
    }
}
