// src/config/state.rs
use crate::{data::Leaderboard, filter::Query, model::Participant};
use super::options::AppOptions;

#[derive(Clone, Debug)]
pub struct GuiState {
    /// Search box, status combo and sort column
    pub query: Query,

    pub window_w: u32,
    pub window_h: u32,

    /// `original_index` of the row whose badge lists are expanded.
    /// Names can repeat, so the row position is the identity.
    pub expanded: Option<usize>,
}

impl Default for GuiState {
    fn default() -> Self {
        Self {
            query: Query::default(),
            window_w: 1100,
            window_h: 760,
            expanded: None,
        }
    }
}

impl GuiState {
    pub fn is_expanded(&self, p: &Participant) -> bool {
        self.expanded == Some(p.original_index)
    }

    /// Clicking the open row closes it; any other row replaces it.
    pub fn toggle_expanded(&mut self, ix: usize) {
        self.expanded = if self.expanded == Some(ix) { None } else { Some(ix) };
    }

    pub fn expanded_in<'a>(&self, board: &'a Leaderboard) -> Option<&'a Participant> {
        let ix = self.expanded?;
        board.participants().iter().find(|p| p.original_index == ix)
    }
}

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub options: AppOptions,
    pub gui: GuiState,
}
