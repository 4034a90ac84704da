//! Focus-routed input session demultiplexing for viewmux.
//!
//! A host with a single input session talks to a [`ForwardingSession`]; an
//! [`InputDemuxer`] decides which registered target actually serves each
//! call:
//!
//! - [`InputSession`]: the session protocol every endpoint implements
//! - [`TargetHandle`]: a focusable target that lazily produces its endpoint
//! - [`SessionCall`] / [`SessionReply`]: explicit form of a routed call
//! - [`FocusSignal`] / [`FocusIntentDetector`]: how the host reports focus
//!   acquisition

mod attributes;
mod call;
mod demuxer;
mod focus;
mod forwarding;
mod session;
mod target;

pub use attributes::EditorAttributes;
pub use call::{SessionCall, SessionReply};
pub use demuxer::{DefaultCreator, InputDemuxer};
pub use focus::{FocusIntentDetector, FocusSignal, RestartRequest};
pub use forwarding::{ForwardingSession, SharedDemuxer, shared};
pub use session::{
    CommandData, CompletionInfo, CorrectionInfo, EditorAction, ExtractedText,
    ExtractedTextRequest, InputSession, KeyAction, KeyEvent,
};
pub use target::{TargetHandle, TargetId};
