use thiserror::Error;

/// Failures of the stack's mutating operations.
///
/// `AtCapacity` is the only user-facing condition; frontends surface it as
/// a non-fatal notice. `OutOfRange` rejects bad indices with no mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
    #[error("layer stack is full ({capacity} layers)")]
    AtCapacity { capacity: usize },

    #[error("layer index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}
