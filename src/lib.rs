// Library exports for the viewmux binary and integration tests.
//
// The two components live in their own crates and are re-exported here:
//
//   - `input` (viewmux-input): focus-routed input session demultiplexer
//   - `a11y`  (viewmux-a11y):  accessibility identifier bridge
//
// Each component is owned by one `parking_lot::Mutex` per embedding session
// (see `session::EmbeddingSession`). Never hold one component's lock while
// calling into the other, or into a host endpoint.

/// Application version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod fixture;
pub mod session;
pub mod walker;

pub use viewmux_a11y as a11y;
pub use viewmux_config as config;
pub use viewmux_input as input;

pub use fixture::TreeFixture;
pub use session::EmbeddingSession;
pub use viewmux_a11y::{SharedBridge, shared_bridge};
pub use viewmux_input::{SharedDemuxer, shared};
pub use walker::{TreeWalker, WalkedNode};
