//! Reversal of posted journals.
//!
//! A reversal never edits history. The lines the posting wrote stay where
//! they are, flagged reversed, and a mirror journal with the sides swapped
//! is booked next to them so the pair nets to zero. The mirror carries the
//! same reference as the original and is flagged from birth, which is what
//! makes a second reversal attempt fail rather than reverse the reversal.
//!
//! Alongside the mirror, [`ReversalService::plan`] lists the side effects
//! the posting left behind so the repository layer can retire them in the
//! same unit of work: stock movements to undo, settlement or explanation
//! rows to remove, and the document status to wind back.

pub mod mirror;
pub mod service;

pub use mirror::{PostedLine, mirror_journal};
pub use service::{BankCascade, ReversalPlan, ReversalService};
