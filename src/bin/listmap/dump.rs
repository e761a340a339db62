use anyhow::Result;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use std::io::Write;

/// Print every row of a document in order.
///
/// Rows which the map doesn't use are marked as either a `duplicate` of an
/// earlier key or as having a `missing key`.
#[derive(clap::Parser)]
pub struct Opts {
    #[clap(flatten)]
    io: listmap_tools::InputOutput,
}

impl Opts {
    pub fn general_opts(&self) -> &listmap_tools::GeneralOpts {
        self.io.general_opts()
    }

    pub fn run(&self) -> Result<()> {
        let document = self.io.parse_document()?;
        let mut output = self.io.output_writer()?;

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_width(80)
            .set_header(vec!["ROW", "KEY", "VALUE", "STATUS"]);
        if let Some(column) = table.column_mut(0) {
            column.set_cell_alignment(CellAlignment::Right);
        }

        for (row, pair) in document.pairs().iter().enumerate() {
            let (key, status) = match &pair.key {
                Some(key) if document.index_of(key) == Some(row) => (key.as_str(), "ok"),
                Some(key) => (key.as_str(), "duplicate"),
                None => ("", "missing key"),
            };
            table.add_row(vec![
                row.to_string(),
                key.to_string(),
                pair.value.to_string(),
                status.to_string(),
            ]);
        }

        writeln!(output, "{table}")?;
        if let Some(warning) = document.diagnostics().warning() {
            writeln!(output, "{warning}")?;
        }
        Ok(())
    }
}
