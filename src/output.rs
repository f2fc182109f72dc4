//! Output formatting for a built dashboard.
//!
//! Supports a plain-text report, JSON serialization, and CSV for the table
//! listing. Everything is written to a caller-supplied writer (stdout in the
//! CLI); nothing is written to disk.

use anyhow::Result;
use clap::ValueEnum;
use csv::WriterBuilder;
use std::io::Write;
use tracing::debug;

use crate::dashboard::Dashboard;
use crate::presentation::TableRow;
use crate::region::Region;

/// How a dashboard is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
    /// Table listing only.
    Csv,
}

/// Writes the dashboard in the requested format.
pub fn render<W: Write>(out: W, dashboard: &Dashboard<'_>, format: Format) -> Result<()> {
    match format {
        Format::Text => write_text(out, dashboard),
        Format::Json => write_json(out, dashboard),
        Format::Csv => write_table_csv(out, &dashboard.table),
    }
}

/// Logs the dashboard using Rust's debug pretty-print format.
pub fn print_pretty(dashboard: &Dashboard<'_>) {
    debug!("{:#?}", dashboard);
}

/// Writes the dashboard as pretty-printed JSON.
pub fn write_json<W: Write>(mut out: W, dashboard: &Dashboard<'_>) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, dashboard)?;
    writeln!(out)?;
    Ok(())
}

/// Writes the table rows as CSV with a header line.
pub fn write_table_csv<W: Write>(out: W, rows: &[TableRow]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(out);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes a human-readable report of every section.
pub fn write_text<W: Write>(mut out: W, dashboard: &Dashboard<'_>) -> Result<()> {
    for warning in &dashboard.warnings {
        writeln!(out, "ERROR: {warning}")?;
    }

    match &dashboard.stats {
        Some(stats) => {
            writeln!(out, "Minimum Elevation: {} ft", stats.min)?;
            writeln!(out, "Maximum Elevation: {} ft", stats.max)?;
            writeln!(out, "Average Elevation: {} ft", stats.display_mean())?;
        }
        None => writeln!(out, "Elevation statistics unavailable (no airports shown).")?,
    }

    if let Some(sample) = &dashboard.sample {
        writeln!(out, "{sample}")?;
    }

    writeln!(out)?;
    writeln!(out, "== {}", dashboard.title)?;
    match &dashboard.charts {
        Some(charts) => {
            for tc in &charts.type_counts {
                writeln!(out, "  {:<16} {:>5}  ({:.1}%)", tc.kind, tc.count, tc.percent)?;
            }

            writeln!(out)?;
            writeln!(out, "== Elevation Distribution by Type")?;
            for d in &charts.distribution {
                writeln!(
                    out,
                    "  {:<16} min {} | q1 {} | median {} | q3 {} | max {}",
                    d.kind, d.min, d.q1, d.median, d.q3, d.max
                )?;
            }

            writeln!(out)?;
            writeln!(
                out,
                "== Map of Airports ({} points, centre {:.4}, {:.4}, zoom {})",
                charts.map_points.len(),
                charts.map_view.latitude,
                charts.map_view.longitude,
                charts.map_view.zoom
            )?;
        }
        None => {
            if let Some(msg) = dashboard.empty_message {
                writeln!(out, "{msg}")?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "== Airport Table")?;
    for row in &dashboard.table {
        writeln!(
            out,
            "  {} | {} | {} | {} | {}",
            row.name.as_deref().unwrap_or(""),
            row.municipality.as_deref().unwrap_or(""),
            row.kind,
            row.elevation_ft
                .feet()
                .map(|e| e.to_string())
                .unwrap_or_default(),
            row.scheduled_service
        )?;
    }

    if let Some(hits) = &dashboard.search {
        writeln!(out)?;
        writeln!(out, "== Search Results")?;
        for hit in hits {
            writeln!(
                out,
                "  {} | {} | {}",
                hit.name,
                hit.municipality.as_deref().unwrap_or(""),
                hit.kind
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Total airports shown: {}", dashboard.summary.total)?;
    writeln!(out, "Number of airport types: {}", dashboard.summary.distinct_types)?;
    if let Some(lat) = dashboard.summary.mean_latitude {
        writeln!(out, "Average latitude: {lat}")?;
    }

    Ok(())
}

/// Lists supported regions, one `CODE<TAB>Name` per line.
pub fn write_regions<W: Write>(mut out: W) -> Result<()> {
    for region in Region::ALL {
        writeln!(out, "{}\t{}", region.code(), region.display_name())?;
    }
    Ok(())
}
