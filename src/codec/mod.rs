//! PDF codec abstraction.
//!
//! The batch layer never touches PDF objects directly. It hands raw bytes to a
//! [`PdfCodec`], which parses them, unlocks the document if it is encrypted and
//! returns a rebuilt copy that carries no encryption dictionary.

pub mod lopdf_codec;

pub use lopdf_codec::LopdfCodec;

use thiserror::Error;

/// Result type alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Failure reported by a codec, without file context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Bytes are not a readable PDF
    #[error("parse failed: {0}")]
    Parse(String),

    /// Document is encrypted and the supplied password does not open it
    #[error("decryption failed: {0}")]
    Decrypt(String),

    /// Rebuilt document could not be serialized
    #[error("serialization failed: {0}")]
    Serialize(String),
}

/// An unencrypted rendition of one input document.
#[derive(Debug, Clone)]
pub struct UnprotectedPdf {
    /// Serialized PDF, ready to be written
    pub bytes: Vec<u8>,

    /// Pages copied into the new document
    pub page_count: usize,

    /// Whether the source carried an encryption dictionary
    pub was_encrypted: bool,
}

/// Security state of a document, as reported by [`PdfCodec::inspect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityInfo {
    /// The file has an encryption dictionary
    pub encrypted: bool,

    /// The supplied password opens the document
    pub unlocked: bool,

    /// Page count, known only once the document is unlocked
    pub page_count: Option<usize>,
}

/// Capability to read, unlock and rewrite PDF documents.
pub trait PdfCodec: Send + Sync {
    /// Parses `source`, decrypts it with `password` when encrypted, and copies
    /// every page in order into a new document serialized without encryption.
    fn strip(&self, source: &[u8], password: &str) -> CodecResult<UnprotectedPdf>;

    /// Reports the security state of `source` without producing output.
    fn inspect(&self, source: &[u8], password: &str) -> CodecResult<SecurityInfo>;

    /// Returns a human-readable name for this codec.
    fn name(&self) -> &str;
}
