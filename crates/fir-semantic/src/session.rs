//! Lookup interface shared by original and dependent resolution states.

use std::sync::Arc;

use fir_syntax::SyntaxTree;

use crate::element::FirElement;
use crate::record::{DeclarationRecord, FileRecord};
use crate::symbol::DeclRef;

/// A resolved view of one file.
///
/// Implementations are immutable from the caller's point of view; any caching
/// is internal and computes each value at most once.
pub trait ResolutionSession: Send + Sync {
    /// The tree this session analyses.
    fn tree(&self) -> &Arc<SyntaxTree>;

    fn file_record(&self) -> &Arc<FileRecord>;

    /// Record of a non-local declaration, `None` for local declarations,
    /// non-declarations and nodes of unrelated trees.
    fn record_for(&self, declaration: DeclRef) -> Option<Arc<DeclarationRecord>>;

    /// The resolved file, with top-level declarations as shared records.
    fn file_element(&self) -> Arc<FirElement>;

    fn file_name(&self) -> &str {
        self.tree().file_name()
    }
}
