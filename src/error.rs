//! Setup errors.
//!
//! Only construction-time failures are surfaced as errors. Everything that can
//! go wrong during a running frame (missing textures, bad source rects, unknown
//! actions) is logged and degraded locally instead.

use thiserror::Error;

/// A core subsystem could not be constructed.
///
/// The caller must treat the subsystem as unusable.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A collaborator that the subsystem cannot work without is absent.
    #[error("missing required collaborator: {0}")]
    MissingCollaborator(&'static str),
    /// The native audio device did not come up.
    #[error("audio device could not be initialized")]
    AudioDevice,
}
