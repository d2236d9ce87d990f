//! Pandoc JSON filters for typesetting markdown as PDF
//!
//!     Pandoc hands a filter its document AST as JSON on stdin and reads the rewritten AST
//!     back from stdout. This crate holds everything between those two points; it is a pure
//!     library and never reads stdin, prints, or looks at the environment. The `mdpdf`
//!     binary in mdpdf-cli does the process plumbing.
//!
//! Architecture
//!
//!     The AST stays as `serde_json::Value` throughout. Pandoc's JSON is a moving target
//!     across API versions, and the walker only needs two facts about it: nodes are
//!     mappings with a `"t"` tag (and maybe a `"c"` payload), and everything else is
//!     arrays, mappings and scalars to recurse through.
//!
//!     .
//!     ├── error.rs            # FilterError
//!     ├── node.rs             # Element kinds, arity-checked construction, node view
//!     ├── walk.rs             # Action trait, Rewrite, the walker
//!     ├── filter.rs           # Parse / walk per action / serialize
//!     ├── text.rs             # stringify, attributes
//!     ├── meta.rs             # Meta value helpers, metadata replacement
//!     ├── pipeline.rs         # Actions + metadata as one run
//!     └── transforms
//!         ├── code_listing.rs # Code blocks folded into paragraphs as listings
//!         └── typeset_meta.rs # Page/font/preamble metadata
//!
//! Core Algorithm
//!
//!     See ./walk.rs. Every node inside a sequence is offered to the action, which may
//!     keep it, replace it, or splice any number of values in its place (none deletes it).
//!     Whatever ends up in the tree is walked again with the same action.
//!
//! Testing
//!
//!     Unit tests sit next to the code. tests/walk_properties.rs checks the walker's
//!     invariants with proptest over generated trees.

pub mod error;
pub mod filter;
pub mod meta;
pub mod node;
pub mod pipeline;
pub mod text;
pub mod transforms;
pub mod walk;

pub use error::{FilterError, Result};
pub use filter::{apply_filters, apply_filters_to_document, parse_document, serialize_document};
pub use node::{ElementKind, NodeRef};
pub use pipeline::Pipeline;
pub use text::{attributes, stringify, Attributes};
pub use walk::{from_fn, walk, Action, FnAction, Meta, Rewrite};
