//! Query orchestration for Lookout.
//!
//! A [`Request`] names a [`Category`] and its parameters. The
//! [`Orchestrator`] validates it, checks the category's provider is
//! configured, and runs one adapter. The result is a [`ResultEnvelope`] that
//! echoes the parameters and holds the items gathered plus any error.
//! [`ResultPersister`] writes envelopes to timestamped JSON files.
//!
//! Nothing on this path returns `Err` to the caller: validation, configuration
//! and provider failures become `envelope.error`, and write failures become a
//! [`PersistedArtifact`] with status `error`.

pub mod adapter;
pub mod model;
pub mod orchestrator;
pub mod persist;
pub mod source;

pub use adapter::AdapterOutput;
pub use model::{Category, Params, Request, ResultEnvelope, ResultItem};
pub use orchestrator::{Orchestrator, OrchestratorBuilder};
pub use persist::{artifact_name, ArtifactStatus, PersistedArtifact, ResultPersister};
pub use source::{MediaSource, SearchSource, SocialSource};
