/* src/server/engine/rust/src/lib.rs */

pub mod fields;
pub mod hash;
pub mod kind;
pub mod normalize;
pub mod page;
pub mod preview;
pub mod section;
pub mod variant;

// Public API re-exports
pub use hash::content_hash;
pub use kind::{ComponentKind, did_you_mean};
pub use normalize::normalize_props;
pub use page::{
  PageFormat, SectionEntry, SkeletonKind, component_type, detect_format, entries, is_visible,
  load_signature, skeleton_kind, updated_at, visible_sections,
};
pub use preview::{content_key, entry_key, entry_snapshot, transform_for_preview};
pub use section::{Theme, section_fingerprint, section_props};
pub use variant::{Variant, validate_variant};

#[cfg(test)]
mod tests;
