use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the heatcal workspace.
///
/// Degenerate inputs (no data, zero width, empty periods, clicks while a
/// transition runs) are not errors: the engine returns early instead. This
/// type covers configuration mistakes, renderer failures and a closed
/// component.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HeatcalError {
    /// A colour string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Invalid input argument or configuration value.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The renderer failed to draw or animate.
    #[error("{renderer} failed: {msg}")]
    Renderer {
        /// Renderer name that failed.
        renderer: String,
        /// Human-readable error message.
        msg: String,
    },

    /// The component's event loop has stopped.
    #[error("heatmap is closed")]
    Closed,
}

impl HeatcalError {
    /// Helper: build a `Renderer` error with the renderer name and message.
    pub fn renderer(renderer: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Renderer {
            renderer: renderer.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build an `InvalidArg` error.
    pub fn invalid_arg(msg: impl Into<String>) -> Self {
        Self::InvalidArg(msg.into())
    }
}
