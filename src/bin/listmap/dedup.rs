use anyhow::Result;

/// Drop the rows of a document which the map doesn't use.
///
/// Only the first row for each key is kept. Rows without a key are dropped.
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
        let mut document = self.io.parse_document()?;
        let before = document.pairs().len();
        document.dedup();
        log::info!(
            "dropped {} of {before} rows from `{}`",
            before - document.pairs().len(),
            self.io.input_name()
        );
        self.io.write_document(&document)
    }
}
