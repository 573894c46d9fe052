//! # pwdb-app - Figure Model and Plot Orchestration
//!
//! Everything between the data files and the terminal: the [`Figure`]
//! arena of panes, the [`Surface`] trait a display implements, the
//! [`SubplotSequence`] controller that pages through pane groups, user
//! configuration, and the `plot` command's planning and figure building.
//!
//! This crate never touches the terminal. Key presses arrive as
//! [`InputKey`] values, converted by whichever frontend drives the surface.

pub mod config;
pub mod figure;
pub mod input_key;
pub mod plot;
pub mod sequence;
pub mod surface;

pub use config::{load_settings, Settings};
pub use figure::{
    Axes, Figure, GridCell, HorizontalAlign, PaneId, Series, TextAnnotation, TextId, VerticalAlign,
};
pub use input_key::InputKey;
pub use plot::{build_panes, plan, PlotOptions, PlotPlan, SignalSelection};
pub use sequence::{NavCommand, PaneGroup, SubplotSequence, NAVIGATION_INSTRUCTION};
pub use surface::{SubscriptionId, Surface};
