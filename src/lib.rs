//! # pressbox
//!
//! Rendering and analysis for the league portal's rich-text article bodies.
//!
//! The editor stores an article as a document tree (`{ "root": { "children": [...] } }`).
//! This crate reads that tree and derives everything the site needs from it:
//!
//! - [`html`]: the tree serialized to an escaped HTML fragment
//! - [`text`]: plain text, truncated excerpts and smart excerpts
//! - [`analysis`]: structural counts, feature flags and a complexity label
//! - [`read_time`]: the user-facing "N min read" estimate
//! - [`seo`]: meta descriptions and keywords
//!
//! Architecture
//!
//!     The pipeline runs one way. Untyped input is resolved into a [`Content`] (empty, an HTML
//!     string, or a typed [`Document`]), and every operation is a pure function of that content.
//!
//!     .
//!     ├── content.rs        # untyped input → Content
//!     ├── tree              # Document / Node model and the Visitor walk
//!     ├── html              # HtmlWriter primitives and the serializer
//!     ├── text              # tag stripping, tree text, truncation, excerpts
//!     ├── analysis.rs       # ContentAnalysis
//!     ├── read_time.rs      # ReadTime and the content-type policies
//!     ├── seo.rs            # meta description, keywords
//!     ├── diagnostics.rs    # DiagnosticSink, LogSink
//!     └── error.rs          # ContentError
//!
//! Failure Policy
//!
//!     Rendering must never take a page down. Internals return `Result<_, ContentError>`; the
//!     public entry points report the error to a [`DiagnosticSink`] and return a neutral value
//!     (`""`, zero counts). The `*_with` variants take an [`HtmlSerializer`], whose depth limit
//!     and sink then govern every derived view: HTML, text, analysis, reading time and SEO. Unknown node kinds are not errors: their children are flattened into
//!     the parent's output.

pub mod analysis;
pub mod content;
pub mod diagnostics;
pub mod error;
pub mod html;
pub mod read_time;
pub mod seo;
pub mod text;
pub mod tree;

pub use analysis::{analyze_content, analyze_content_with, Complexity, ContentAnalysis};
pub use content::Content;
pub use diagnostics::{DiagnosticSink, LogSink};
pub use error::ContentError;
pub use html::{serialize_to_html, HtmlSerializer, SerializerOptions};
pub use read_time::{
    calculate_news_read_time, calculate_read_time, calculate_read_time_range,
    calculate_read_time_range_with, calculate_read_time_with, calculate_sports_read_time,
    ContentType, ReadTime, ReadTimeOptions, ReadTimeRange, ReadingSpeed,
};
pub use seo::{
    extract_keywords, generate_meta_description, generate_seo_metadata,
    generate_seo_metadata_with, KeywordOptions, SeoMetadata, SeoOptions,
};
pub use text::{
    extract_plain_text, extract_plain_text_with, extract_smart_excerpt,
    extract_smart_excerpt_with, MaxLength,
};
pub use tree::{Document, Node};
