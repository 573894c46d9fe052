//! Sequenced display of pane groups
//!
//! [`SubplotSequence`] keeps an ordered list of pane groups and shows one
//! group at a time. While the display runs, Right/Down step forward and
//! Left/Up step back; stepping never wraps. A text indicator at the
//! bottom of the figure shows the position, e.g.
//! `Use ← → arrow keys to navigate plots (2/5)`.

use pwdb_core::prelude::*;

use crate::figure::{HorizontalAlign, PaneId, TextAnnotation, TextId, VerticalAlign};
use crate::input_key::InputKey;
use crate::surface::{SubscriptionId, Surface};

#[cfg(test)]
mod tests;

/// Fixed part of the position indicator
pub const NAVIGATION_INSTRUCTION: &str = "Use ← → arrow keys to navigate plots";

/// Panes to register as one group
///
/// Single panes, flat lists and subplot grids all flatten to an ordered
/// list of panes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaneGroup {
    Single(PaneId),
    Many(Vec<PaneId>),
    Grid(Vec<Vec<PaneId>>),
}

impl PaneGroup {
    pub fn into_panes(self) -> Vec<PaneId> {
        match self {
            PaneGroup::Single(pane) => vec![pane],
            PaneGroup::Many(panes) => panes,
            PaneGroup::Grid(rows) => rows.into_iter().flatten().collect(),
        }
    }
}

impl From<PaneId> for PaneGroup {
    fn from(pane: PaneId) -> Self {
        PaneGroup::Single(pane)
    }
}

impl From<Vec<PaneId>> for PaneGroup {
    fn from(panes: Vec<PaneId>) -> Self {
        PaneGroup::Many(panes)
    }
}

impl From<&[PaneId]> for PaneGroup {
    fn from(panes: &[PaneId]) -> Self {
        PaneGroup::Many(panes.to_vec())
    }
}

impl From<Vec<Vec<PaneId>>> for PaneGroup {
    fn from(rows: Vec<Vec<PaneId>>) -> Self {
        PaneGroup::Grid(rows)
    }
}

/// Logical navigation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Advance,
    Retreat,
}

impl NavCommand {
    pub fn from_key(key: InputKey) -> Option<Self> {
        match key {
            InputKey::Right | InputKey::Down => Some(NavCommand::Advance),
            InputKey::Left | InputKey::Up => Some(NavCommand::Retreat),
            _ => None,
        }
    }
}

/// Indicator annotation placed centered along the bottom edge
fn indicator_annotation() -> TextAnnotation {
    TextAnnotation {
        h_align: HorizontalAlign::Center,
        v_align: VerticalAlign::Bottom,
        font_size: 9.0,
        color: "gray".to_string(),
        alpha: 0.8,
        ..TextAnnotation::new(NAVIGATION_INSTRUCTION, 0.5, 0.01)
    }
}

/// Navigation state, kept apart from the surface so the key handler can
/// borrow both at once
#[derive(Debug, Default)]
struct Navigator {
    groups: Vec<Vec<PaneId>>,
    current: Option<usize>,
    indicator: Option<TextId>,
}

impl Navigator {
    fn indicator_text(&self) -> Option<String> {
        let current = self.current?;
        Some(format!(
            "{} ({}/{})",
            NAVIGATION_INSTRUCTION,
            current + 1,
            self.groups.len()
        ))
    }

    fn set_group_visible<S: Surface>(&self, surface: &mut S, index: usize, visible: bool) {
        for pane in &self.groups[index] {
            surface.set_visible(*pane, visible);
        }
    }

    fn update_indicator<S: Surface>(&self, surface: &mut S) {
        if let (Some(id), Some(text)) = (self.indicator, self.indicator_text()) {
            surface.set_text(id, &text);
        }
    }

    fn step<S: Surface>(&mut self, surface: &mut S, command: NavCommand) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let next = match command {
            NavCommand::Advance if current + 1 < self.groups.len() => current + 1,
            NavCommand::Retreat if current > 0 => current - 1,
            _ => return false,
        };

        self.current = Some(next);
        self.set_group_visible(surface, current, false);
        self.set_group_visible(surface, next, true);
        self.update_indicator(surface);
        surface.request_redraw();
        trace!("Showing group {} of {}", next + 1, self.groups.len());
        true
    }

    fn on_key<S: Surface>(&mut self, surface: &mut S, key: InputKey) {
        if let Some(command) = NavCommand::from_key(key) {
            self.step(surface, command);
        }
    }
}

/// Shows one group of panes at a time on a surface
pub struct SubplotSequence<S: Surface> {
    surface: S,
    nav: Navigator,
    subscription: Option<SubscriptionId>,
}

impl<S: Surface> SubplotSequence<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            nav: Navigator::default(),
            subscription: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nav.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nav.groups.is_empty()
    }

    /// Registered groups in navigation order
    pub fn groups(&self) -> impl Iterator<Item = &[PaneId]> {
        self.nav.groups.iter().map(Vec::as_slice)
    }

    /// Index of the displayed group; `None` until [`show`](Self::show)
    pub fn current(&self) -> Option<usize> {
        self.nav.current
    }

    pub fn indicator(&self) -> Option<TextId> {
        self.nav.indicator
    }

    /// Indicator text for the current position
    pub fn indicator_text(&self) -> Option<String> {
        self.nav.indicator_text()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Append a group of panes
    ///
    /// Fails without changing the sequence when the group is empty or
    /// names a pane the surface does not own. A group added after the
    /// display has started is hidden until navigated to.
    pub fn add(&mut self, group: impl Into<PaneGroup>) -> Result<()> {
        let panes = group.into().into_panes();
        if panes.is_empty() {
            return Err(Error::invalid_argument("a view group needs at least one pane"));
        }
        if let Some(pane) = panes.iter().find(|p| !self.surface.contains(**p)) {
            return Err(Error::invalid_argument(format!(
                "pane {} is not drawable on this surface",
                pane.index()
            )));
        }

        if let Some(current) = self.nav.current {
            for pane in panes.iter().filter(|p| !self.nav.groups[current].contains(p)) {
                self.surface.set_visible(*pane, false);
            }
        }
        self.nav.groups.push(panes);
        self.nav.update_indicator(&mut self.surface);
        debug!("Added view group {}", self.nav.groups.len());
        Ok(())
    }

    /// Step without a key press; returns whether the position changed
    pub fn navigate(&mut self, command: NavCommand) -> bool {
        self.nav.step(&mut self.surface, command)
    }

    /// Display the first group and run the surface until it is closed
    pub fn show(&mut self) -> Result<()> {
        if self.nav.groups.is_empty() {
            return Err(Error::empty_state("no view groups have been added"));
        }

        self.nav.current = Some(0);
        for index in 0..self.nav.groups.len() {
            self.nav.set_group_visible(&mut self.surface, index, false);
        }
        self.nav.set_group_visible(&mut self.surface, 0, true);

        let indicator = match self.nav.indicator {
            Some(id) => id,
            None => {
                let id = self.surface.add_text(indicator_annotation());
                self.nav.indicator = Some(id);
                id
            }
        };
        if let Some(text) = self.nav.indicator_text() {
            self.surface.set_text(indicator, &text);
        }

        if self.subscription.is_none() {
            self.subscription = Some(self.surface.connect_key_press());
        }
        self.surface.request_redraw();
        info!("Showing {} view groups", self.nav.groups.len());

        let nav = &mut self.nav;
        self.surface
            .show(&mut |surface: &mut S, key: InputKey| nav.on_key(surface, key))
    }
}
