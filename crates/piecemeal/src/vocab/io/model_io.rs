//! # Model Loading

use crate::{
    errors::PMResult,
    types::TokenType,
    vocab::{Vocabulary, io::ModelProto},
};

/// Load a [`Vocabulary`] from serialized model bytes.
///
/// ## Arguments
/// * `bytes` - The complete model file contents.
///
/// ## Returns
/// The validated vocabulary; or [`PMError::MalformedModel`](crate::PMError::MalformedModel),
/// in which case nothing is retained.
pub fn load_model_bytes<T: TokenType>(bytes: &[u8]) -> PMResult<Vocabulary<T>> {
    Vocabulary::from_proto(&ModelProto::parse(bytes)?)
}

/// Load a [`Vocabulary`] from a model file.
///
/// ## Arguments
/// * `path` - The path to the ``.model`` file.
#[cfg(feature = "std")]
pub fn load_model_path<T, P>(path: P) -> PMResult<Vocabulary<T>>
where
    T: TokenType,
    P: AsRef<std::path::Path>,
{
    let path = path.as_ref();
    log::debug!("loading model from {}", path.display());
    load_model_bytes(&std::fs::read(path)?)
}

/// Load a [`Vocabulary`] from a [`Read`](std::io::Read) stream.
///
/// ## Arguments
/// * `reader` - A stream positioned at the start of a model.
#[cfg(feature = "std")]
pub fn read_model<T, R>(mut reader: R) -> PMResult<Vocabulary<T>>
where
    T: TokenType,
    R: std::io::Read,
{
    let mut bytes = crate::alloc::vec::Vec::new();
    reader.read_to_end(&mut bytes)?;
    load_model_bytes(&bytes)
}

/// Save a [`ModelProto`] to a model file.
///
/// ## Arguments
/// * `model` - The model to save.
/// * `path` - The path to save the model to.
#[cfg(feature = "std")]
pub fn save_model_path<P: AsRef<std::path::Path>>(
    model: &ModelProto,
    path: P,
) -> PMResult<()> {
    std::fs::write(path, model.to_bytes())?;
    Ok(())
}
