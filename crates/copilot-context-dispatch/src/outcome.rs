//! Per-request phases and terminal outcomes.

use std::fmt;

/// Where a chat request currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPhase {
    Idle,
    ResolvingContext,
    SelectingModel,
    Composing,
    Dispatching,
    Streaming,
    Done,
}

impl RequestPhase {
    /// Stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ResolvingContext => "resolving_context",
            Self::SelectingModel => "selecting_model",
            Self::Composing => "composing",
            Self::Dispatching => "dispatching",
            Self::Streaming => "streaming",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for RequestPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a chat request ended.
///
/// Every outcome except `Completed` wrote exactly one explanatory fragment
/// to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// The reply was relayed in full.
    Completed { fragments: usize },
    /// No model matched the requested vendor and family.
    ModelUnavailable,
    /// A failure was caught and reported.
    Failed { phase: RequestPhase, message: String },
}

impl HandleOutcome {
    /// Whether the reply was relayed in full.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}
