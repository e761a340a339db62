use anyhow::{bail, Result};

/// Remove a key from a document.
///
/// The rows after the removed one keep their order. If the document repeats
/// the key further down, that row becomes the key's entry.
#[derive(clap::Parser)]
pub struct Opts {
    /// The key to remove.
    key: String,

    #[clap(flatten)]
    io: listmap_tools::InputOutput,

    /// Only remove the key if it currently has this value.
    #[clap(long, value_name = "VALUE")]
    expect: Option<String>,
}

impl Opts {
    pub fn general_opts(&self) -> &listmap_tools::GeneralOpts {
        self.io.general_opts()
    }

    pub fn run(&self) -> Result<()> {
        let mut document = self.io.parse_document()?;
        let name = self.io.input_name();

        if !document.contains_key(self.key.as_str()) {
            bail!("key `{}` not found in `{name}`", self.key);
        }
        let removed = match &self.expect {
            Some(expected) => {
                let expected = listmap_tools::parse_value(expected);
                match document.remove_matching(self.key.as_str(), &expected) {
                    Some(value) => value,
                    None => bail!("key `{}` does not have the value {expected}", self.key),
                }
            }
            None => match document.remove(self.key.as_str()) {
                Some(value) => value,
                None => bail!("key `{}` not found in `{name}`", self.key),
            },
        };
        log::info!("removed `{}` (was {removed})", self.key);

        self.io.write_document(&document)
    }
}
