/* src/server/core/rust/src/lib.rs */

pub mod cache;
pub mod errors;
pub mod loader;
pub mod page_data;
pub mod preview;
pub mod registry;
pub mod renderer;
pub mod section;
pub mod service;
pub mod signal;
pub mod site;
pub mod source;
mod templates;

// Re-exports for ergonomic use
pub use cache::{PAGE_TTL, TtlCache, keys};
pub use errors::PageError;
pub use loader::{ComponentLoader, LoadedEntry, LoadedMap};
pub use page_data::{PageData, PageState};
pub use preview::{DEFAULT_DEBOUNCE, LivePreview, PreviewEntry, PreviewSession};
pub use registry::{
  ComponentRegistry, RendererLoader, RendererRef, SectionCallbacks, SectionProps, SectionRenderer,
  TemplateRenderer,
};
pub use renderer::{DynamicPageRenderer, PageView, RenderedSection};
pub use section::SectionCache;
pub use service::{CacheTtls, PageService, validate_document};
pub use signal::{PageUpdated, PageUpdates};
pub use site::Site;
pub use source::{ContentSource, DirSource, MemorySource, validate_slug};

pub use pagewright_engine as engine;
pub use pagewright_injector as injector;
