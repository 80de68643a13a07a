//! DOM events as delivered to handlers, and the application event bus.

mod bus;

pub use bus::{AppEvent, EventBus, EventKind};

use crate::dom::NodeId;

/// DOM event types the widgets listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Change,
    KeyUp,
    KeyDown,
    KeyPress,
    Submit,
    Scroll,
    Resize,
    Load,
    BeforeUnload,
}

impl EventType {
    pub const ALL: [Self; 10] = [
        Self::Click,
        Self::Change,
        Self::KeyUp,
        Self::KeyDown,
        Self::KeyPress,
        Self::Submit,
        Self::Scroll,
        Self::Resize,
        Self::Load,
        Self::BeforeUnload,
    ];

    /// Name used by `addEventListener`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Change => "change",
            Self::KeyUp => "keyup",
            Self::KeyDown => "keydown",
            Self::KeyPress => "keypress",
            Self::Submit => "submit",
            Self::Scroll => "scroll",
            Self::Resize => "resize",
            Self::Load => "load",
            Self::BeforeUnload => "beforeunload",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Fired on `window` rather than on an element.
    pub const fn is_window(self) -> bool {
        matches!(self, Self::Scroll | Self::Resize | Self::Load | Self::BeforeUnload)
    }
}

/// Legacy `keyCode` of a keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(u32);

impl Key {
    pub const ENTER: Self = Self(13);
    pub const ESCAPE: Self = Self(27);

    pub const fn from_code(code: u32) -> Self {
        Self(code)
    }

    pub const fn code(self) -> u32 {
        self.0
    }
}

/// An event entering the page, from the browser or from a widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub kind: EventType,
    /// Element the event was fired on; `None` for window events
    pub target: Option<NodeId>,
    pub key: Option<Key>,
}

impl UiEvent {
    pub const fn on(kind: EventType, target: NodeId) -> Self {
        Self { kind, target: Some(target), key: None }
    }

    pub const fn window(kind: EventType) -> Self {
        Self { kind, target: None, key: None }
    }

    pub const fn key(kind: EventType, target: Option<NodeId>, key: Key) -> Self {
        Self { kind, target, key: Some(key) }
    }
}

/// An event as seen by a single handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    kind: EventType,
    target: Option<NodeId>,
    current: Option<NodeId>,
    key: Option<Key>,
    default_prevented: bool,
    return_value: Option<String>,
}

impl DomEvent {
    pub fn new(event: &UiEvent) -> Self {
        Self {
            kind: event.kind,
            target: event.target,
            current: None,
            key: event.key,
            default_prevented: false,
            return_value: None,
        }
    }

    pub const fn kind(&self) -> EventType {
        self.kind
    }

    pub const fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Element the handler was bound to, or the delegate match.
    /// Falls back to the target for document-level handlers.
    pub fn current(&self) -> Option<NodeId> {
        self.current.or(self.target)
    }

    pub(crate) fn set_current(&mut self, current: Option<NodeId>) {
        self.current = current;
    }

    pub const fn key(&self) -> Option<Key> {
        self.key
    }

    pub fn is_key(&self, key: Key) -> bool {
        self.key == Some(key)
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Message for the browser's leave-page prompt.
    pub fn set_return_value(&mut self, message: impl Into<String>) {
        self.return_value = Some(message.into());
    }

    pub fn return_value(&self) -> Option<&str> {
        self.return_value.as_deref()
    }

    pub(crate) fn into_return_value(self) -> Option<String> {
        self.return_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_names_round_trip() {
        for kind in EventType::ALL {
            assert_eq!(EventType::from_name(kind.name()), Some(kind));
        }
        assert_eq!(EventType::from_name("dblclick"), None);
        assert!(EventType::Scroll.is_window());
        assert!(!EventType::Click.is_window());
    }

    #[test]
    fn test_current_falls_back_to_target() {
        let target = NodeId::from_raw(3);
        let mut event = DomEvent::new(&UiEvent::on(EventType::Click, target));
        assert_eq!(event.current(), Some(target));

        event.set_current(Some(NodeId::from_raw(1)));
        assert_eq!(event.current(), Some(NodeId::from_raw(1)));
    }

    #[test]
    fn test_key_and_default() {
        let mut event = DomEvent::new(&UiEvent::key(EventType::KeyUp, None, Key::ESCAPE));
        assert!(event.is_key(Key::ESCAPE));
        assert!(!event.is_key(Key::ENTER));
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }
}
