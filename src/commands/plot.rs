//! `pwdb plot`

use std::io::Write;
use std::path::PathBuf;

use pwdb_app::{build_panes, plan, Figure, PlotOptions, PlotPlan, Settings, SubplotSequence};
use pwdb_core::prelude::*;
use pwdb_tui::{FigureExporter, TerminalSurface};

/// What a run produced before any interactive display
#[derive(Debug)]
pub struct PlotOutcome {
    pub plan: PlotPlan,
    /// Empty when stopped by `--query`
    pub figure: Figure,
    pub exported: Vec<PathBuf>,
}

/// Print the traced path and, when verbose, the selected signal names
fn report_selection(
    plan: &PlotPlan,
    options: &PlotOptions,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(steps) = &plan.path {
        writeln!(out, "tracing path:")?;
        for step in steps {
            match &step.prefix {
                Some(prefix) => writeln!(out, "  {}: {}", step.site, prefix)?,
                None => writeln!(out, "  {}: -", step.site)?,
            }
        }
    }
    if options.verbose > 0 {
        let names: Vec<String> = plan.signals.iter().map(ToString::to_string).collect();
        writeln!(out, "sig_names = [{}]", names.join(", "))?;
    }
    Ok(())
}

/// Plan, build and export the figure without showing it
pub fn prepare(
    options: &PlotOptions,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<PlotOutcome> {
    let plan = plan(options, settings)?;
    report_selection(&plan, options, out)?;

    let mut figure = Figure::new();
    let mut exported = Vec::new();
    if options.query {
        return Ok(PlotOutcome {
            plan,
            figure,
            exported,
        });
    }

    let panes = build_panes(&plan, options, settings, &mut figure)?;
    if let Some(dir) = &options.dir {
        let mut exporter = FigureExporter::new(dir, settings.export)?;
        for pane in &panes {
            exported.push(exporter.export(&figure, *pane)?);
        }
    }

    Ok(PlotOutcome {
        plan,
        figure,
        exported,
    })
}

/// Run the plot command, showing the figures one at a time unless
/// `--batch` or `--query` was given
pub fn run(options: &PlotOptions, settings: &Settings, out: &mut impl Write) -> Result<()> {
    let outcome = prepare(options, settings, out)?;
    if options.query || options.batch {
        return Ok(());
    }

    let panes: Vec<_> = outcome.figure.panes().map(|(id, _)| id).collect();
    if panes.is_empty() {
        warn!("Nothing to plot");
        writeln!(out, "nothing to plot")?;
        return Ok(());
    }

    let mut sequence = SubplotSequence::new(TerminalSurface::new(outcome.figure));
    for pane in panes {
        sequence.add(pane)?;
    }
    sequence.show()
}
