//! Repository loading for Quay.
//!
//! The remote host hands us a real nested tree ([`RemoteNode`]); the store
//! is a flat path map. [`RepoLoader`] is the translation layer between the
//! two shapes: it walks the fetched tree depth-first, creates directories
//! before their descendants, fetches file content one file at a time, and
//! reports [`LoadProgress`] as it goes. Individual file failures are
//! logged and skipped; only a failure to fetch the tree itself aborts the
//! load.

pub mod generate;
mod loader;
mod progress;
mod remote;

pub use generate::{GeneratedEntry, GeneratedProject, Generator, MockGenerator, TechnicalDetails};
pub use loader::{CancelToken, RepoLoader};
pub use progress::LoadProgress;
pub use remote::{RemoteError, RemoteKind, RemoteNode, RemoteSource, StaticSource};
