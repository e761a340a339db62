use anyhow::{bail, Result};
use std::io::Write;
use termcolor::{Color, ColorSpec, WriteColor};

/// Check that a document's keys are unique.
///
/// Every row which the map doesn't use, because it repeats an earlier key or
/// has no key at all, is reported. The command fails if there are any such
/// rows.
#[derive(clap::Parser)]
pub struct Opts {
    #[clap(flatten)]
    input: listmap_tools::InputArg,

    #[clap(flatten)]
    general: listmap_tools::GeneralOpts,

    /// Succeed even if the document has duplicate or missing keys.
    #[clap(long)]
    allow_duplicates: bool,
}

impl Opts {
    pub fn general_opts(&self) -> &listmap_tools::GeneralOpts {
        &self.general
    }

    pub fn run(&self) -> Result<()> {
        let document = self.input.parse_document()?;
        let diagnostics = document.diagnostics();
        let name = self.input.name();

        for &row in &diagnostics.rejected_rows {
            match document.key_at(row) {
                Some(key) => log::warn!("{name}: row {row} repeats key `{key}`"),
                None => log::warn!("{name}: row {row} has no key"),
            }
        }

        let mut out = self.general.stdout();
        writeln!(
            out,
            "{name}: {} rows, {} distinct keys",
            diagnostics.rows, diagnostics.distinct_keys
        )?;
        if let Some(warning) = diagnostics.warning() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
            write!(out, "warning")?;
            out.reset()?;
            writeln!(out, ": {warning}")?;
        }
        out.flush()?;

        if diagnostics.has_duplicate_keys && !self.allow_duplicates {
            bail!(
                "`{name}` has {} row(s) with a duplicate or missing key",
                diagnostics.rejected_rows.len()
            );
        }
        Ok(())
    }
}
