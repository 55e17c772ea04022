use thiserror::Error;

/// Failures reported by the presentation layer while driving the overlay.
/// Malformed option data is never an error; it degrades to missing labels/ids instead.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("building the overlay failed")]
    Present(#[source] anyhow::Error),
    #[error("showing the overlay failed")]
    Show(#[source] anyhow::Error),
    #[error("dismissing the overlay failed")]
    Dismiss(#[source] anyhow::Error),
}
