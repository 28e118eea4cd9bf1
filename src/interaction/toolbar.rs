use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScaleResult;

use super::InteractionMode;

/// Figure-side operations the toolbar drives.
///
/// `Interaction` is whatever handle the host uses for an installed
/// interaction (a widget id, a boxed controller, ...).
pub trait FigureHost {
    type Interaction: Clone + fmt::Debug;

    /// Currently installed interaction, if any.
    fn interaction(&self) -> Option<Self::Interaction>;
    fn set_interaction(&mut self, interaction: Option<Self::Interaction>);
    /// Builds a pan/zoom interaction bound to the figure's data scales.
    fn create_panzoom(&mut self) -> ScaleResult<Self::Interaction>;
    /// Restores the scales a pan/zoom interaction has moved.
    fn reset_scales(&mut self, panzoom: &Self::Interaction);
    fn close_interaction(&mut self, interaction: Self::Interaction);
    fn save_png(&mut self) -> ScaleResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolbarAction {
    PanZoom,
    Reset,
    Save,
}

/// Public toolbar state exposed to host views (e.g. to highlight the
/// pan/zoom button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarState {
    pub mode: InteractionMode,
    pub has_figure: bool,
    pub has_panzoom: bool,
}

/// Pan/zoom, reset and save controls for one figure.
pub struct Toolbar<F: FigureHost> {
    figure: Option<F>,
    panning: bool,
    panzoom: Option<F::Interaction>,
    cached_interaction: Option<F::Interaction>,
}

impl<F: FigureHost + fmt::Debug> fmt::Debug for Toolbar<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Toolbar")
            .field("figure", &self.figure)
            .field("panning", &self.panning)
            .field("panzoom", &self.panzoom)
            .field("cached_interaction", &self.cached_interaction)
            .finish()
    }
}

impl<F: FigureHost> Default for Toolbar<F> {
    fn default() -> Self {
        Self {
            figure: None,
            panning: false,
            panzoom: None,
            cached_interaction: None,
        }
    }
}

impl<F: FigureHost> Toolbar<F> {
    #[must_use]
    pub fn new(figure: F) -> Self {
        Self {
            figure: Some(figure),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn figure(&self) -> Option<&F> {
        self.figure.as_ref()
    }

    pub fn figure_mut(&mut self) -> Option<&mut F> {
        self.figure.as_mut()
    }

    /// Replaces the controlled figure and returns the previous one.
    ///
    /// Pan/zoom state belongs to the old figure and is dropped with it.
    pub fn set_figure(&mut self, figure: Option<F>) -> Option<F> {
        self.panning = false;
        self.panzoom = None;
        self.cached_interaction = None;
        std::mem::replace(&mut self.figure, figure)
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    #[must_use]
    pub fn panzoom(&self) -> Option<&F::Interaction> {
        self.panzoom.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> ToolbarState {
        ToolbarState {
            mode: if self.panning {
                InteractionMode::Panning
            } else {
                InteractionMode::Idle
            },
            has_figure: self.figure.is_some(),
            has_panzoom: self.panzoom.is_some(),
        }
    }

    pub fn dispatch(&mut self, action: ToolbarAction) -> ScaleResult<()> {
        match action {
            ToolbarAction::PanZoom => self.toggle_panzoom(),
            ToolbarAction::Reset => {
                self.reset();
                Ok(())
            }
            ToolbarAction::Save => self.save_png(),
        }
    }

    /// Installs the pan/zoom interaction, or restores the interaction it
    /// replaced when already panning.
    ///
    /// The pan/zoom interaction is created once and reused across toggles.
    pub fn toggle_panzoom(&mut self) -> ScaleResult<()> {
        if self.panning {
            if let Some(figure) = self.figure.as_mut() {
                figure.set_interaction(self.cached_interaction.clone());
            }
            self.panning = false;
            debug!("pan/zoom disabled");
            return Ok(());
        }

        if let Some(figure) = self.figure.as_mut() {
            let panzoom = if let Some(panzoom) = self.panzoom.clone() {
                panzoom
            } else {
                let created = figure.create_panzoom()?;
                debug!(panzoom = ?created, "created pan/zoom interaction");
                self.panzoom = Some(created.clone());
                created
            };
            self.cached_interaction = figure.interaction();
            figure.set_interaction(Some(panzoom));
        }
        self.panning = true;
        debug!(cached = ?self.cached_interaction, "pan/zoom enabled");
        Ok(())
    }

    /// Resets the scales moved by pan/zoom and discards the interaction.
    pub fn reset(&mut self) {
        let Some(figure) = self.figure.as_mut() else {
            return;
        };
        if self.panning {
            figure.set_interaction(self.cached_interaction.clone());
        }
        if let Some(panzoom) = self.panzoom.take() {
            figure.reset_scales(&panzoom);
            figure.close_interaction(panzoom);
        }
        self.panning = false;
        debug!("toolbar reset");
    }

    pub fn save_png(&mut self) -> ScaleResult<()> {
        match self.figure.as_mut() {
            Some(figure) => figure.save_png(),
            None => Ok(()),
        }
    }
}
