//! Post-commit notification seam.

use folio_shared::types::{DocumentId, JournalId};

use crate::document::kind::DocumentKind;

/// Receives a best-effort signal after a posting commits.
///
/// Implementations must not fail the posting: the journal is already
/// durable by the time this runs, so a notifier that errors logs and moves
/// on.
pub trait PostedNotifier: Send + Sync {
    /// Called once per successful posting, after commit.
    fn journal_posted(&self, document: DocumentId, kind: DocumentKind, journal: JournalId);
}

/// Notifier that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl PostedNotifier for NoopNotifier {
    fn journal_posted(&self, _document: DocumentId, _kind: DocumentKind, _journal: JournalId) {}
}
