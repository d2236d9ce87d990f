//! Typesetting metadata injected into the document
//!
//! The LaTeX template reads page size, margins, fonts and extra preamble lines from
//! document metadata. [`TypesetMeta`] holds those options and replaces the document's
//! metadata with them. The preamble is passed as raw TeX so pandoc copies it verbatim.

use crate::error::Result;
use crate::meta::{inject_meta, meta_raw, meta_string};
use crate::walk::Meta;
use serde_json::Value;

/// Preamble loading the listing package and the style used for merged code blocks.
pub const DEFAULT_HEADER_INCLUDES: &str = r"\usepackage{listings}
\usepackage[x11names]{xcolor}
\lstset{
    basicstyle=\fontsize{10pt}{13pt}\ttfamily\color{Green4!5!black},
    frame=tRBl,
    breakatwhitespace=false,
    keywordstyle=\color{Green4!50!black},
    commentstyle=\color{Gray0!50!black},
    stringstyle=\color{Orange4!50!black},
    breaklines=true,
    xleftmargin=2.5em,
    showstringspaces=false,
}
\usepackage{graphicx}
\usepackage{import}";

/// Page, font and preamble options for the LaTeX writer.
///
/// Empty values are left out of the generated metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TypesetMeta {
    pub cjk_mainfont: String,
    pub papersize: String,
    pub geometry: String,
    pub fontsize: String,
    pub header_includes: String,
    /// Raw format the preamble is tagged with.
    pub raw_format: String,
}

impl Default for TypesetMeta {
    fn default() -> Self {
        TypesetMeta {
            cjk_mainfont: "AR PL KaitiM GB".to_string(),
            papersize: "a4".to_string(),
            geometry: "right=3cm, left=3cm, top=3.5cm, bottom=3.5cm".to_string(),
            fontsize: "12pt".to_string(),
            header_includes: DEFAULT_HEADER_INCLUDES.to_string(),
            raw_format: "tex".to_string(),
        }
    }
}

impl TypesetMeta {
    /// The metadata mapping for these options.
    pub fn to_meta(&self) -> Meta {
        let mut meta = Meta::new();
        let strings = [
            ("CJKmainfont", &self.cjk_mainfont),
            ("papersize", &self.papersize),
            ("geometry", &self.geometry),
            ("fontsize", &self.fontsize),
        ];
        for (key, value) in strings {
            if !value.is_empty() {
                meta.insert(key.to_string(), meta_string(value.as_str()));
            }
        }
        if !self.header_includes.is_empty() {
            meta.insert(
                "header-includes".to_string(),
                meta_raw(&self.raw_format, self.header_includes.as_str()),
            );
        }
        meta
    }

    /// Replace the metadata of `doc` with these options.
    pub fn apply(&self, doc: &mut Value) -> Result<()> {
        inject_meta(doc, self.to_meta())
    }
}
