//! Fetch lifecycle shared by both screens.

/// Outer state of a screen's data fetch.
///
/// `Uninitialized -> Loading -> {Error | Ready}`, and `Error | Ready -> Loading`
/// on retry/refresh. Local edits never touch this state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Uninitialized,
    Loading,
    Error(String),
    Ready,
}

impl LoadState {
    /// Enter `Loading`. Returns `false` if a load is already in flight.
    pub fn start(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        *self = LoadState::Loading;
        true
    }

    /// Finish the in-flight load successfully.
    pub fn succeed(&mut self) {
        if self.is_loading() {
            *self = LoadState::Ready;
        }
    }

    /// Finish the in-flight load with an error message.
    pub fn fail(&mut self, message: impl Into<String>) {
        if self.is_loading() {
            *self = LoadState::Error(message.into());
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready)
    }

    /// Error message, if the last load failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}
