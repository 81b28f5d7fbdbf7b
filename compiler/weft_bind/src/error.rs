//! Binding errors.

use weft_ir::MalformedToken;
use weft_schema::LoadError;

/// Failure of a binding step that cannot continue.
///
/// Missing-but-optional information, such as a model type with no schema
/// counterpart, is never an error; it shows up as `None` in return values.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// A referenced provider package could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A resource or invocation token is not `package:module:member`.
    #[error(transparent)]
    MalformedToken(#[from] MalformedToken),
}
