//! Error types for the Mira SDK.

use crate::models::media::MediaType;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures produced by the authentication path.
///
/// Kept separate from [`Error`] (and `Clone`) because a single authentication
/// outcome is broadcast to every fetch operation queued on the gate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No API key was resolvable from the call, the builder, or bundled
    /// configuration.
    #[error("no API key available (argument, builder, or configuration)")]
    MissingApiKey,

    /// The API key exchange was attempted and did not produce a usable token.
    #[error("token exchange failed: {0}")]
    ExchangeFailed(String),

    /// Authentication has not completed for this client.
    #[error("not authenticated")]
    NotAuthenticated,
}

/// Unified SDK error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Authentication failure (see [`AuthError`]).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request never completed: DNS, connect, TLS, or protocol failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The server answered with a non-success status code.
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The server answered successfully but the expected `media` payload was
    /// absent. Distinct from [`Error::Transport`] so callers can tell "nothing
    /// to return" apart from "could not ask".
    #[error("response did not contain the expected media payload")]
    MissingPayload,

    /// The media item's type precludes the requested scene operation.
    #[error("media {id} has type `{media_type}`, operation requires `3d`")]
    InvalidMediaForOperation { id: String, media_type: MediaType },

    /// A `3d` media item shipped without a glb file to load.
    #[error("media {0} has no glb file")]
    MissingGlbFile(String),

    /// The scene loader failed to fetch or parse the model.
    #[error("failed to load scene: {0}")]
    SceneLoad(String),

    /// Invalid client or endpoint configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Credential storage I/O failure.
    #[error("storage error at {path}: {message}")]
    StorageIo { path: String, message: String },

    /// Credential (de)serialization failure.
    #[error("storage serialization error: {0}")]
    StorageSerialization(String),

    /// System keyring failure.
    #[cfg(feature = "keyring")]
    #[error("keyring error: {0}")]
    Keyring(String),
}

impl Error {
    pub(crate) fn storage_io(
        path: impl AsRef<std::path::Path>,
        message: impl Into<String>,
    ) -> Self {
        Self::StorageIo {
            path: path.as_ref().display().to_string(),
            message: message.into(),
        }
    }
}
