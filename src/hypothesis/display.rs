//! # Tabular display of hypotheses
//!
//! Borrowing display adaptor printing a [`HypothesisCatalog`] as terminal tables with
//! [`comfy-table`].
//!
//! ## Layouts
//!
//! - **Compact** (`{}`): the full summary,
//!   `Features | Lowest RMSD | Frame | Count | Length | Percent`, by decreasing count.
//! - **Alternate** (`{:#}`): the summary followed by the frame-wise mapping
//!   `Frame ID | RMSD | Features`, in trajectory order.
//!
//! Values are rounded the way the report prints them (3 decimals for RMSD, 1 for percent).
//!
//! ## Example
//!
//! ```rust,ignore
//! use dynophore::hypothesis::display::CatalogDisplayExt;
//!
//! println!("{}", catalog.show());
//! println!("{:#}", catalog.show().with_frames(&frames));
//! ```
//!
//! [`comfy-table`]: https://crates.io/crates/comfy-table
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::{
    hypothesis::{HypothesisCatalog, SummaryRow},
    trajectory::FrameTable,
};

/// Display adaptor over a borrowed catalog.
pub struct CatalogDisplay<'a> {
    catalog: &'a HypothesisCatalog,
    frames: Option<&'a FrameTable>,
}

impl<'a> CatalogDisplay<'a> {
    pub fn new(catalog: &'a HypothesisCatalog) -> Self {
        Self {
            catalog,
            frames: None,
        }
    }

    /// Attach the frame table printed in alternate mode.
    pub fn with_frames(mut self, frames: &'a FrameTable) -> Self {
        self.frames = Some(frames);
        self
    }

    fn render_summary(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Features"),
            Cell::new("Lowest RMSD"),
            Cell::new("Frame"),
            Cell::new("Count"),
            Cell::new("Length"),
            Cell::new("Percent"),
        ]);

        for row in self.catalog.by_count().into_iter().map(SummaryRow::from) {
            let SummaryRow {
                features,
                lowest_rmsd,
                frame,
                count,
                length,
                percent,
            } = row;
            table.add_row(Row::from(vec![
                Cell::new(features),
                Cell::new(format!("{lowest_rmsd:.3}")).set_alignment(CellAlignment::Right),
                Cell::new(frame).set_alignment(CellAlignment::Right),
                Cell::new(count).set_alignment(CellAlignment::Right),
                Cell::new(length).set_alignment(CellAlignment::Right),
                Cell::new(format!("{percent:.1}")).set_alignment(CellAlignment::Right),
            ]));
        }

        table.to_string()
    }

    fn render_frames(frames: &FrameTable) -> String {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Frame ID"),
            Cell::new("RMSD"),
            Cell::new("Features"),
        ]);

        for record in frames {
            table.add_row(Row::from(vec![
                Cell::new(record.frame_id()).set_alignment(CellAlignment::Right),
                Cell::new(format!("{:.3}", record.rmsd())).set_alignment(CellAlignment::Right),
                Cell::new(record.signature_label()),
            ]));
        }

        table.to_string()
    }
}

impl fmt::Display for CatalogDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Hypotheses (n={}, frames={}, unmatched={})",
            self.catalog.len(),
            self.catalog.total_frames(),
            self.catalog.unmatched_frames()
        )?;
        writeln!(f, "{}", self.render_summary())?;

        if f.alternate() {
            if let Some(frames) = self.frames {
                writeln!(f, "Frame-wise mapping (n={})", frames.total_frames())?;
                writeln!(f, "{}", Self::render_frames(frames))?;
            }
        }
        Ok(())
    }
}

pub trait CatalogDisplayExt {
    fn show(&self) -> CatalogDisplay<'_>;

    fn show_string(&self) -> String {
        format!("{}", self.show())
    }
}

impl CatalogDisplayExt for HypothesisCatalog {
    fn show(&self) -> CatalogDisplay<'_> {
        CatalogDisplay::new(self)
    }
}
