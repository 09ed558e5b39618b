//! Batch removal of PDF encryption and permission restrictions.
//!
//! Every `*.pdf` file in an input directory is opened, unlocked with the empty
//! password if it is encrypted, and its pages are copied into a new document
//! written to the output directory without any encryption dictionary. Files
//! that already have a same-named copy in the output directory are skipped,
//! which makes interrupted runs safe to repeat.
//!
//! # Architecture
//!
//! - [`batch`]: directory walking, idempotent skipping and per-file reporting
//! - [`codec`]: the PDF capability, with a `lopdf`-backed implementation
//! - [`config`]: input/output locations and the file pattern
//! - [`error`]: error taxonomy separating per-file from run-level failures
//!
//! # Quick Start
//!
//! ```no_run
//! use pdf_unlock::{BatchStripper, StripConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stripper = BatchStripper::with_lopdf();
//! let report = stripper.run(&StripConfig::new("./data", "./processed"))?;
//!
//! println!("{}", report);
//! # Ok(())
//! # }
//! ```
//!
//! # Examples
//!
//! ## Single file
//!
//! ```no_run
//! use pdf_unlock::{BatchStripper, FileOutcome};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stripper = BatchStripper::with_lopdf();
//! let outcome = stripper.strip_security(
//!     Path::new("locked.pdf"),
//!     Path::new("unlocked.pdf"),
//! )?;
//!
//! if let FileOutcome::Stripped { pages, .. } = outcome {
//!     println!("{} page(s) written", pages);
//! }
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod codec;
pub mod config;
pub mod error;

pub use batch::{BatchReport, BatchStripper, FileOutcome, FileReport};
pub use codec::{CodecError, LopdfCodec, PdfCodec, SecurityInfo, UnprotectedPdf};
pub use config::StripConfig;
pub use error::{StripError, StripResult};
