use thiserror::Error;

use crate::panel::PanelError;
use crate::variables::DocumentError;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Panel error: {0}")]
    Panel(#[from] PanelError),
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),
    #[error("No browser window")]
    NoWindow,
    #[error("Invalid overlay options: {0}")]
    Options(String),
}
