//! Typed transcript entries.

/// One entry in a reply transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Markdown text shown to the user.
    Markdown(String),
    /// The host has finished with this request.
    Finished,
}

impl Fragment {
    /// Rough in-memory size, used for history bounds.
    #[must_use]
    pub fn approx_bytes(&self) -> usize {
        const OVERHEAD: usize = 8;
        match self {
            Self::Markdown(s) => s.len() + OVERHEAD,
            Self::Finished => OVERHEAD,
        }
    }
}
