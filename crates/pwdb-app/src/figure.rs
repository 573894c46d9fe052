//! Figure model: panes (axes) laid out on subplot grids, plus free text
//!
//! A [`Figure`] is a plain arena. Panes and text annotations are added
//! once and addressed by copyable handles afterwards; nothing is ever
//! removed, so a handle stays valid for the life of the figure.
//!
//! Every figure gets a process-unique id that its handles carry, so a
//! handle from one figure is never mistaken for a pane of another.

use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_FIGURE_ID: AtomicUsize = AtomicUsize::new(0);

/// Handle to a pane owned by a [`Figure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PaneId {
    figure: usize,
    index: usize,
}

impl PaneId {
    /// Position of the pane within its figure
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Handle to a text annotation owned by a [`Figure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextId {
    figure: usize,
    index: usize,
}

/// Position of a pane within its subplot grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub nrows: u16,
    pub ncols: u16,
    pub row: u16,
    pub col: u16,
}

impl GridCell {
    /// The single cell of a 1x1 grid
    pub const FULL: GridCell = GridCell {
        nrows: 1,
        ncols: 1,
        row: 0,
        col: 0,
    };
}

/// One plotted line
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// A single plotting pane
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub grid: bool,
    pub legend: bool,
    pub visible: bool,
    pub cell: GridCell,
}

impl Axes {
    pub fn new(cell: GridCell) -> Self {
        Self {
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
            series: Vec::new(),
            grid: false,
            legend: false,
            visible: true,
            cell,
        }
    }

    pub fn plot(&mut self, label: impl Into<String>, points: Vec<(f64, f64)>) {
        self.series.push(Series {
            label: label.into(),
            points,
        });
    }

    /// Smallest box holding every finite point, as `([x0, x1], [y0, y1])`
    pub fn data_bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut points = self
            .series
            .iter()
            .flat_map(|s| s.points.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite());
        let &(x, y) = points.next()?;
        let init = ([x, x], [y, y]);
        Some(points.fold(init, |([x0, x1], [y0, y1]), &(x, y)| {
            ([x0.min(x), x1.max(x)], [y0.min(y), y1.max(y)])
        }))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    Top,
    Center,
    #[default]
    Bottom,
}

/// Text placed at relative figure coordinates
///
/// `x` and `y` run from 0.0 to 1.0 with the origin at the bottom left.
/// `color` is a color name understood by the renderer (e.g. `"gray"`).
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub content: String,
    pub x: f64,
    pub y: f64,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
    pub font_size: f32,
    pub color: String,
    pub alpha: f32,
}

impl TextAnnotation {
    pub fn new(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            content: content.into(),
            x,
            y,
            h_align: HorizontalAlign::Left,
            v_align: VerticalAlign::Bottom,
            font_size: 10.0,
            color: "white".to_string(),
            alpha: 1.0,
        }
    }
}

/// Panes and text annotations of one display
///
/// A clone keeps the id, so handles stay valid on the copy.
#[derive(Debug, Clone)]
pub struct Figure {
    id: usize,
    panes: Vec<Axes>,
    texts: Vec<TextAnnotation>,
}

impl Default for Figure {
    fn default() -> Self {
        Self {
            id: NEXT_FIGURE_ID.fetch_add(1, Ordering::Relaxed),
            panes: Vec::new(),
            texts: Vec::new(),
        }
    }
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    fn pane_slot(&self, pane: PaneId) -> Option<usize> {
        (pane.figure == self.id && pane.index < self.panes.len()).then_some(pane.index)
    }

    fn text_slot(&self, id: TextId) -> Option<usize> {
        (id.figure == self.id && id.index < self.texts.len()).then_some(id.index)
    }

    pub fn add_axes(&mut self, cell: GridCell) -> PaneId {
        self.panes.push(Axes::new(cell));
        PaneId {
            figure: self.id,
            index: self.panes.len() - 1,
        }
    }

    /// Add an `nrows` x `ncols` grid of panes, row-major
    pub fn subplots(&mut self, nrows: u16, ncols: u16) -> Vec<Vec<PaneId>> {
        (0..nrows)
            .map(|row| {
                (0..ncols)
                    .map(|col| {
                        self.add_axes(GridCell {
                            nrows,
                            ncols,
                            row,
                            col,
                        })
                    })
                    .collect()
            })
            .collect()
    }

    pub fn contains(&self, pane: PaneId) -> bool {
        self.pane_slot(pane).is_some()
    }

    pub fn pane(&self, pane: PaneId) -> Option<&Axes> {
        self.pane_slot(pane).and_then(|i| self.panes.get(i))
    }

    pub fn pane_mut(&mut self, pane: PaneId) -> Option<&mut Axes> {
        let index = self.pane_slot(pane)?;
        self.panes.get_mut(index)
    }

    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn panes(&self) -> impl Iterator<Item = (PaneId, &Axes)> {
        let figure = self.id;
        self.panes
            .iter()
            .enumerate()
            .map(move |(index, a)| (PaneId { figure, index }, a))
    }

    pub fn visible_panes(&self) -> impl Iterator<Item = (PaneId, &Axes)> {
        self.panes().filter(|(_, a)| a.visible)
    }

    /// Returns false if the pane does not exist
    pub fn set_visible(&mut self, pane: PaneId, visible: bool) -> bool {
        match self.pane_mut(pane) {
            Some(axes) => {
                axes.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn add_text(&mut self, text: TextAnnotation) -> TextId {
        self.texts.push(text);
        TextId {
            figure: self.id,
            index: self.texts.len() - 1,
        }
    }

    pub fn text(&self, id: TextId) -> Option<&TextAnnotation> {
        self.text_slot(id).and_then(|i| self.texts.get(i))
    }

    /// Returns false if the annotation does not exist
    pub fn set_text(&mut self, id: TextId, content: &str) -> bool {
        match self.text_slot(id).and_then(|i| self.texts.get_mut(i)) {
            Some(text) => {
                text.content = content.to_string();
                true
            }
            None => false,
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextAnnotation> {
        self.texts.iter()
    }
}
