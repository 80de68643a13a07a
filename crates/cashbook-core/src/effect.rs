//! Side effects widgets request from the host.

/// Work only the browser can do. Widgets queue these through
/// [`Context::effect`](crate::component::Context::effect) and the host
/// performs them after dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `window.print()`
    Print,
    /// Load `url` in a hidden frame and print it
    PrintUrl { url: String },
    /// `GET url`; the host publishes `AppEvent::BalancesLoaded` with the result
    FetchBalances { url: String },
    /// Analytics page view
    PageView { location: String },
}
