//! Stratadoc Core - Static API documentation engine
//!
//! This crate turns a reflected symbol model into render-ready page data:
//! - Model: symbol descriptors supplied by a reflection front end
//! - Classify: sorts a class's members into a canonical bucket structure
//! - Namespace: parent/child namespace hierarchy and per-namespace listings
//! - Routing: deterministic output paths for namespaces, symbols and sources
//! - Linking: auto-linking of bare names and return type formatting
//! - Generator: renders every page before anything is written

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types shared across the engine
pub mod error;

/// Symbol descriptors and the reflection adapter
pub mod model;

/// Member classification engine
pub mod classify;

/// Namespace hierarchy resolver
pub mod namespace;

/// Per-namespace constant store capability
pub mod constants;

/// Symbol index with name lookups
pub mod index;

/// Symbol routing resolver
pub mod routing;

/// Auto-link and return type formatting helpers
pub mod linking;

/// Page data bags handed to renderers
pub mod pages;

/// Source view highlighting
pub mod source;

/// Built-in HTML renderer
pub mod html;

/// Site configuration (`stratadoc.toml`)
pub mod config;

/// Page generation orchestration
pub mod generator;

pub use classify::{classify, MemberBucket};
pub use config::Config;
pub use constants::{ConstantStore, MemoryConstantStore};
pub use error::{
    ClassifyError, ConfigError, ConstantStoreError, GenerateError, ModelError, RenderError, RouteError,
};
pub use generator::{ErrorPolicy, GenerationReport, Generator, RenderedPage};
pub use html::{HtmlRenderer, Renderer};
pub use index::{SymbolIndex, SymbolLookup};
pub use linking::{Linker, LookupKind};
pub use model::{
    ClassDescriptor, ClassKind, FunctionDescriptor, Member, MemberKind, Staticness, SymbolModel,
    SymbolRef, TraitUse, Visibility,
};
pub use namespace::{children_of, NamespaceContents, NamespaceNode, NamespaceResolver, ROOT_NAMESPACE};
pub use pages::{ActivePage, Page, SiteContext};
pub use routing::{Route, RouteKind, Router};
pub use source::{FsSourceReader, PlainHighlighter, SourceHighlighter, SourceReader};
