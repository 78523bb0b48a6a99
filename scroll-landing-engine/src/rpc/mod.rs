//! JSON-RPC 2.0 communication layer for the embedding page.
//!
//! When the engine runs inside an iframe, the host page drives navigation and
//! listens for section changes through `postMessage`:
//!
//! ```text
//! Host (parent window)  <──postMessage──>  Engine (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! On native builds the listener is not installed and outgoing messages are
//! dropped, so the same systems run on both targets.
//!
//! ## Requests
//!
//! - `seek_to {index}`: Smooth-scroll to section `index` (clamped)
//! - `skip_to_end`: Jump to the final section
//! - `get_navigation_state`: Current index, count, snapping and trigger flags
//! - `get_fps`: Retrieve current frame rate
//!
//! ```typescript
//! iframe.contentWindow.postMessage(
//!   JSON.stringify({ jsonrpc: "2.0", method: "seek_to", params: { index: 2 }, id: 1 }),
//!   "*",
//! );
//! ```
//!
//! ## Notifications
//!
//! - `section_changed {index, count, is_final}`
//! - `animation_triggered {scroll_top}`: the morph field has been mounted
//! - `fps_update {fps}`: smoothed frame rate every half second
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error (e.g. state queried before the page loaded)

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
