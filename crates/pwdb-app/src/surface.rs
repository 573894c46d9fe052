//! Display surface abstraction
//!
//! A surface owns a [`Figure`](crate::figure::Figure)'s panes and is
//! the only thing the sequence controller talks to. The terminal UI
//! implements it for real; tests implement it with recording doubles.

use pwdb_core::Result;

use crate::figure::{PaneId, TextAnnotation, TextId};
use crate::input_key::InputKey;

/// Handle returned when subscribing to key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(pub usize);

pub trait Surface {
    /// Whether `pane` belongs to this surface
    fn contains(&self, pane: PaneId) -> bool;

    fn set_visible(&mut self, pane: PaneId, visible: bool);

    /// Ask for a redraw at the next opportunity
    fn request_redraw(&mut self);

    fn add_text(&mut self, text: TextAnnotation) -> TextId;

    fn set_text(&mut self, id: TextId, content: &str);

    /// Start delivering key presses to the handler passed to [`Surface::show`]
    fn connect_key_press(&mut self) -> SubscriptionId;

    /// Run the display loop until the user closes it
    ///
    /// While running, each key press is passed to `on_key` together with
    /// the surface, one at a time.
    fn show(&mut self, on_key: &mut dyn FnMut(&mut Self, InputKey)) -> Result<()>
    where
        Self: Sized;
}
