//! Dejapaw Common Library
//!
//! オーバーレイ(WASM)とCLIで共有されるキャプチャの中核

pub mod types;
pub mod error;
pub mod registry;
pub mod filter;
pub mod cursor;
pub mod drag;
pub mod validation;
pub mod record;
pub mod store;

#[cfg(test)]
mod testing;

pub use types::{Field, FieldType, FieldValue, PanelPosition, CURRENCY_CODES};
pub use error::{Error, Result};
pub use registry::{resolve, CaptureContext, CaptureSpec, CaptureTrigger};
pub use filter::{is_panel_event, TreeNode};
pub use cursor::{CaptureCursor, CaptureOutcome, CursorSnapshot, CursorState, ListenerBinder};
pub use drag::DragTracker;
pub use validation::is_ready;
pub use record::{assemble, Record, Sink, SubmitError, SubmitState};
pub use store::{initial_values, StoreData};
