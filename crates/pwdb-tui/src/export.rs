//! Text export of single panes
//!
//! Each exported pane is rendered into an off-screen buffer of the
//! configured size and written as plain text to `Figure_NNNN.txt`.
//! Numbering continues after any `Figure_*.txt` already present anywhere
//! below the export directory.

use std::fs;
use std::path::{Path, PathBuf};

use pwdb_app::config::ExportSettings;
use pwdb_app::{Figure, PaneId};
use pwdb_core::prelude::*;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use walkdir::WalkDir;

use crate::widgets::PaneChart;

const FIGURE_PREFIX: &str = "Figure_";
const FIGURE_EXTENSION: &str = "txt";

/// Buffer contents as text, one line per row, trailing blanks removed
pub fn buffer_to_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::new();
    for y in area.y..area.bottom() {
        let mut line = String::new();
        for x in area.x..area.right() {
            line.push_str(buf[(x, y)].symbol());
        }
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}

fn is_figure_file(path: &Path) -> bool {
    let name_matches = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(FIGURE_PREFIX));
    name_matches && path.extension().is_some_and(|e| e == FIGURE_EXTENSION)
}

/// Number of exported figures already below `dir`
fn count_existing(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && is_figure_file(entry.path()))
        .count()
}

/// Writes panes as numbered text figures
#[derive(Debug)]
pub struct FigureExporter {
    dir: PathBuf,
    settings: ExportSettings,
    next_number: usize,
}

impl FigureExporter {
    /// Create `dir` if needed and pick up numbering after existing figures
    pub fn new(dir: impl Into<PathBuf>, settings: ExportSettings) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating export directory {}", dir.display()))?;
        let next_number = count_existing(&dir) + 1;
        debug!("Exporting figures to {} from {}", dir.display(), next_number);
        Ok(Self {
            dir,
            settings,
            next_number,
        })
    }

    /// Number the next export will use
    pub fn next_number(&self) -> usize {
        self.next_number
    }

    /// Render `pane` to text
    pub fn render(&self, figure: &Figure, pane: PaneId) -> Result<String> {
        let axes = figure.pane(pane).ok_or_else(|| {
            Error::invalid_argument(format!("pane {} is not in the figure", pane.index()))
        })?;
        let area = Rect::new(0, 0, self.settings.width, self.settings.height);
        let mut buf = Buffer::empty(area);
        PaneChart::new(axes).render(area, &mut buf);
        Ok(buffer_to_text(&buf))
    }

    /// Write `pane` to the next `Figure_NNNN.txt`
    pub fn export(&mut self, figure: &Figure, pane: PaneId) -> Result<PathBuf> {
        let text = self.render(figure, pane)?;
        let path = self.dir.join(format!(
            "{}{:04}.{}",
            FIGURE_PREFIX, self.next_number, FIGURE_EXTENSION
        ));
        fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
        self.next_number += 1;
        info!("Saved {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pwdb_app::GridCell;
    use tempfile::TempDir;

    fn one_pane_figure() -> (Figure, PaneId) {
        let mut figure = Figure::new();
        let pane = figure.add_axes(GridCell::FULL);
        if let Some(axes) = figure.pane_mut(pane) {
            axes.title = "pwdb_0001: Radial_P (Left Radial Artery)".to_string();
            axes.plot("Complete", vec![(0.0, 70.0), (0.5, 120.0), (1.0, 80.0)]);
        }
        (figure, pane)
    }

    fn small() -> ExportSettings {
        ExportSettings {
            width: 60,
            height: 16,
        }
    }

    #[test]
    fn test_numbering_starts_at_one() {
        let dir = TempDir::new().unwrap();
        let (figure, pane) = one_pane_figure();
        let mut exporter = FigureExporter::new(dir.path().join("out"), small()).unwrap();

        let first = exporter.export(&figure, pane).unwrap();
        let second = exporter.export(&figure, pane).unwrap();
        assert_eq!(first.file_name().unwrap(), "Figure_0001.txt");
        assert_eq!(second.file_name().unwrap(), "Figure_0002.txt");

        let text = fs::read_to_string(first).unwrap();
        assert_eq!(text.lines().count(), 16);
        assert!(text.contains("Radial_P"));
    }

    #[test]
    fn test_numbering_continues_after_existing_figures() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Figure_0001.txt"), "").unwrap();
        fs::create_dir_all(dir.path().join("old")).unwrap();
        fs::write(dir.path().join("old/Figure_0007.txt"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(dir.path().join("Figure_0003.pdf"), "").unwrap();

        let exporter = FigureExporter::new(dir.path(), small()).unwrap();
        assert_eq!(exporter.next_number(), 3);
    }

    #[test]
    fn test_unknown_pane_is_rejected() {
        let dir = TempDir::new().unwrap();
        let (figure, _) = one_pane_figure();
        let mut other = Figure::new();
        other.add_axes(GridCell::FULL);
        let foreign = other.add_axes(GridCell::FULL);

        let mut exporter = FigureExporter::new(dir.path(), small()).unwrap();
        assert!(matches!(
            exporter.export(&figure, foreign),
            Err(Error::InvalidArgument { .. })
        ));
        assert_eq!(exporter.next_number(), 1);
    }

    #[test]
    fn test_buffer_to_text_trims_rows() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        buf.set_string(1, 0, "ab", ratatui::style::Style::default());
        assert_eq!(buffer_to_text(&buf), " ab\n\n");
    }
}
