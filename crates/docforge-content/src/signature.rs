//! Signature provider contract.

use docforge_model::{AdditionalModifiers, ContentNode, Documentable};

/// Renders the declaration signature of one documentable.
///
/// One implementation is selected per run and shared by every content
/// builder, so implementations must be pure and thread-safe.
pub trait SignatureProvider: Send + Sync {
    /// Render the signature of `documentable` as a content node.
    fn signature(&self, documentable: &dyn Documentable) -> ContentNode;

    /// Lowercased [`AdditionalModifiers`] of `documentable`, each followed by
    /// a space (`"inline suspend "`), or an empty string when absent.
    fn additional_modifiers(&self, documentable: &dyn Documentable) -> String {
        documentable
            .extra()
            .get::<AdditionalModifiers>()
            .map(|modifiers| {
                modifiers
                    .0
                    .iter()
                    .map(|name| format!("{} ", name.to_lowercase()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
