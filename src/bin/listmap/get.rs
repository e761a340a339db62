use anyhow::{Context, Result};
use std::io::Write;

/// Print the value a document maps a key to.
#[derive(clap::Parser)]
pub struct Opts {
    /// The key to look up.
    key: String,

    #[clap(flatten)]
    input: listmap_tools::InputArg,

    #[clap(flatten)]
    general: listmap_tools::GeneralOpts,
}

impl Opts {
    pub fn general_opts(&self) -> &listmap_tools::GeneralOpts {
        &self.general
    }

    pub fn run(&self) -> Result<()> {
        let document = self.input.parse_document()?;
        let value = document
            .lookup(self.key.as_str())
            .with_context(|| format!("failed to get `{}` from `{}`", self.key, self.input.name()))?;

        let mut out = self.general.stdout();
        writeln!(out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }
}
