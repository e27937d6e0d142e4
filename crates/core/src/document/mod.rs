//! Source document model: kinds, directions, and the status machine.

pub mod kind;
pub mod status;

pub use kind::{Direction, DocumentKind, PayMode};
pub use status::DocumentStatus;
