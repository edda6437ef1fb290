//! Context reference resolution.
//!
//! Provides:
//! - `HomeEnv` - Explicit home-directory environment for `~` expansion
//! - `ContextReference` - Local path or remote URL classification
//! - `ContextResolver` - Turn a reference into `ResolvedContext` text
//! - `ContextLoader` - The file/HTTP I/O seam, with `HttpFileLoader` as default

pub mod error;
pub mod home;
pub mod loader;
pub mod reference;
pub mod resolver;

pub use error::{ResolutionError, ResolutionErrorKind};
pub use home::HomeEnv;
pub use loader::{ContextLoader, FETCH_TIMEOUT, HttpFileLoader};
pub use reference::ContextReference;
pub use resolver::{ContextResolver, ResolvedContext};
