//! Toolbar-driven figure interactions.
//!
//! The toolbar only tracks which interaction is installed on a figure; the
//! pan/zoom interaction itself is created and run by the figure host.

mod toolbar;

use serde::{Deserialize, Serialize};

pub use toolbar::{FigureHost, Toolbar, ToolbarAction, ToolbarState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionMode {
    #[default]
    Idle,
    Panning,
}
