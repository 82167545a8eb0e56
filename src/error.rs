use thiserror::Error;

use crate::lifecycle::LifecycleState;

/// Problems with a single parameter value or lookup
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("unknown parameter `{0}`")]
    UnknownField(String),

    #[error("parameter `{field}` expects a {expected} value")]
    KindMismatch { field: String, expected: &'static str },

    #[error("parameter `{0}` must be a finite number")]
    NotFinite(String),

    #[error("cannot parse `{value}` for parameter `{field}`")]
    Unparsable { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    #[error("parameter panel has been destroyed")]
    Destroyed,

    #[error(transparent)]
    Param(#[from] ParamError),
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// The host could not provide a drawable surface. Fatal for the session.
    #[error("no drawable surface: {0}")]
    SurfaceUnavailable(String),

    #[error("session is {0:?}, expected Running")]
    NotRunning(LifecycleState),

    #[error("session cannot start from {0:?}")]
    AlreadyStarted(LifecycleState),

    #[error("frame failed: {0}")]
    Render(String),

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error(transparent)]
    Param(#[from] ParamError),
}
