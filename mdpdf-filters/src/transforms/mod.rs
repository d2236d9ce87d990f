//! Concrete document transforms
//!
//! These are the rewrites the `mdpdf` filter runs when preparing a document for a LaTeX/PDF
//! writer:
//!
//! - [`CodeListing`]: folds code blocks that follow a paragraph into that paragraph as raw
//!   `lstlisting` environments.
//! - [`TypesetMeta`]: the page, font and preamble options injected as document metadata.

pub mod code_listing;
pub mod typeset_meta;

pub use code_listing::CodeListing;
pub use typeset_meta::TypesetMeta;
