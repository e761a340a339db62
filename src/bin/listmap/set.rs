use anyhow::Result;

/// Set the value of a key in a document.
///
/// An existing key keeps its position in the list and only has its value
/// replaced. A new key is appended as the last row.
#[derive(clap::Parser)]
pub struct Opts {
    /// The key to set.
    key: String,

    /// The new value, as JSON.
    ///
    /// Text which isn't valid JSON is stored as a string.
    value: String,

    #[clap(flatten)]
    io: listmap_tools::InputOutput,

    /// Always append a new row, even if the key is already present.
    ///
    /// The existing row keeps its value in the map and the new row becomes a
    /// duplicate.
    #[clap(long)]
    append: bool,
}

impl Opts {
    pub fn general_opts(&self) -> &listmap_tools::GeneralOpts {
        self.io.general_opts()
    }

    pub fn run(&self) -> Result<()> {
        let mut document = self.io.parse_document()?;
        let value = listmap_tools::parse_value(&self.value);

        if self.append {
            document.add(self.key.clone(), value);
        } else if let Some(previous) = document.insert(self.key.clone(), value) {
            log::info!("replaced `{}` (was {previous})", self.key);
        }

        self.io.write_document(&document)
    }
}
