//! Terminal-backed display surface

use pwdb_app::{Figure, InputKey, PaneId, SubscriptionId, Surface, TextAnnotation, TextId};
use pwdb_core::prelude::*;
use ratatui::DefaultTerminal;

use crate::event::{self, TerminalEvent};
use crate::terminal;
use crate::widgets::FigureView;

/// Draws a [`Figure`] full-screen and feeds key presses to the sequence
/// controller
///
/// `q`, `Esc` and `Ctrl+C` end [`Surface::show`]; other keys reach the
/// handler once [`Surface::connect_key_press`] has been called.
pub struct TerminalSurface {
    figure: Figure,
    subscribed: bool,
    redraw_requested: bool,
}

impl TerminalSurface {
    pub fn new(figure: Figure) -> Self {
        Self {
            figure,
            subscribed: false,
            redraw_requested: true,
        }
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn into_figure(self) -> Figure {
        self.figure
    }

    /// Route one key press; returns false when the display should close
    fn handle_key(
        &mut self,
        key: InputKey,
        on_key: &mut dyn FnMut(&mut Self, InputKey),
    ) -> bool {
        if key.is_quit() {
            debug!("Closing display on {:?}", key);
            return false;
        }
        if self.subscribed {
            on_key(self, key);
        }
        true
    }

    fn run_loop(
        &mut self,
        term: &mut DefaultTerminal,
        on_key: &mut dyn FnMut(&mut Self, InputKey),
    ) -> Result<()> {
        loop {
            if self.redraw_requested {
                self.redraw_requested = false;
                term.draw(|frame| frame.render_widget(FigureView::new(&self.figure), frame.area()))?;
            }

            match event::poll()? {
                Some(TerminalEvent::Key(key)) => {
                    if !self.handle_key(key, on_key) {
                        return Ok(());
                    }
                }
                Some(TerminalEvent::Resize) => self.redraw_requested = true,
                None => {}
            }
        }
    }
}

impl Surface for TerminalSurface {
    fn contains(&self, pane: PaneId) -> bool {
        self.figure.contains(pane)
    }

    fn set_visible(&mut self, pane: PaneId, visible: bool) {
        if !self.figure.set_visible(pane, visible) {
            warn!("Ignoring visibility change of unknown pane {}", pane.index());
        }
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn add_text(&mut self, text: TextAnnotation) -> TextId {
        self.figure.add_text(text)
    }

    fn set_text(&mut self, id: TextId, content: &str) {
        if !self.figure.set_text(id, content) {
            warn!("Ignoring update of unknown text annotation");
        }
    }

    fn connect_key_press(&mut self) -> SubscriptionId {
        self.subscribed = true;
        SubscriptionId(0)
    }

    fn show(&mut self, on_key: &mut dyn FnMut(&mut Self, InputKey)) -> Result<()> {
        let mut term = terminal::init()?;
        self.redraw_requested = true;
        let result = self.run_loop(&mut term, on_key);
        terminal::restore();
        result
    }
}
