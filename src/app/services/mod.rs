//! Services layer - the playground's pipeline and persistence.
//!
//! - Debouncing and document composition
//! - Export to a single page or an archive
//! - Session persistence
//! - Syntax highlighting

pub mod compose;
pub mod debounce;
pub mod export;
pub mod session;
pub mod syntax;
