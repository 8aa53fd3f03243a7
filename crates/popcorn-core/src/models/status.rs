use serde::{Deserialize, Serialize};

/// Lifecycle of one kind of fetch as seen by the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}
