//! Shared support for the `listmap` command line tool.
//!
//! Every subcommand reads a document, a JSON array of `{"key": ..., "value":
//! ...}` objects, into a [`ListMap`] and most of them write one back out.
//! The option structs here are flattened into each subcommand so they all
//! accept their input and output the same way.

use anyhow::{Context, Result};
use listmap::ListMap;
use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use termcolor::{ColorChoice, NoColor, StandardStream, WriteColor};

/// The document every subcommand operates on.
///
/// Keys are strings and values are arbitrary JSON.
pub type Document = ListMap<String, serde_json::Value>;

/// Options shared by every subcommand.
#[derive(clap::Parser)]
pub struct GeneralOpts {
    /// Use verbose output (-v info, -vv debug, -vvv trace).
    #[clap(long = "verbose", short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration over whether terminal colors are used in output.
    ///
    /// Supports one of `auto|never|always|always-ansi`.
    #[clap(long = "color", default_value = "auto")]
    pub color: ColorChoice,
}

impl GeneralOpts {
    /// Installs the global logger, honoring `RUST_LOG` over `-v`.
    pub fn init_logger(&self) {
        let default = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
            .format_target(false)
            .init();
    }

    /// Returns a writer for stdout which colors output according to
    /// `--color`.
    pub fn stdout(&self) -> Box<dyn WriteColor> {
        Box::new(StandardStream::stdout(resolve_color(self.color)))
    }
}

// `auto` only means color when a person is looking at the output.
fn resolve_color(color: ColorChoice) -> ColorChoice {
    if color == ColorChoice::Auto && !io::stdout().is_terminal() {
        ColorChoice::Never
    } else {
        color
    }
}

/// A document to read.
#[derive(clap::Parser)]
pub struct InputArg {
    /// Input document to process.
    ///
    /// If not provided or if this is `-` then stdin is read entirely and
    /// processed.
    input: Option<PathBuf>,
}

impl InputArg {
    /// A name for the input suitable for messages.
    pub fn name(&self) -> String {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => path.display().to_string(),
            _ => "<stdin>".to_string(),
        }
    }

    /// Reads the whole input as text.
    pub fn read_text(&self) -> Result<String> {
        let mut text = String::new();
        match &self.input {
            Some(path) if path.as_os_str() != "-" => {
                File::open(path)
                    .and_then(|mut file| file.read_to_string(&mut text))
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
            }
            _ => {
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read <stdin>")?;
            }
        }
        Ok(text)
    }

    /// Reads and parses the input document.
    ///
    /// The document's map is reconciled as part of loading, so a list with
    /// duplicate keys still loads; callers decide whether that is an error.
    pub fn parse_document(&self) -> Result<Document> {
        let text = self.read_text()?;
        let document: Document = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse `{}` as a list of pairs", self.name()))?;
        log::debug!("loaded {}: {}", self.name(), document.diagnostics());
        Ok(document)
    }
}

/// Where to write a result.
#[derive(clap::Parser)]
pub struct OutputArg {
    /// Where to place output.
    ///
    /// If not provided then stdout is used.
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl OutputArg {
    /// Opens the output for writing.
    ///
    /// Files never receive color codes.
    pub fn output_writer(&self, color: ColorChoice) -> Result<Box<dyn WriteColor>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("failed to create `{}`", path.display()))?;
                Ok(Box::new(NoColor::new(file)))
            }
            None => Ok(Box::new(StandardStream::stdout(resolve_color(color)))),
        }
    }

    /// Writes `document` as pretty-printed JSON.
    pub fn write_document(&self, document: &Document) -> Result<()> {
        if document.has_duplicate_keys() {
            log::warn!("{}", listmap::DUPLICATE_KEYS_WARNING);
        }
        let mut output = self.output_writer(ColorChoice::Never)?;
        serde_json::to_writer_pretty(&mut output, document)?;
        writeln!(output)?;
        output.flush()?;
        Ok(())
    }
}

/// An input document, an output location and the general options.
#[derive(clap::Parser)]
pub struct InputOutput {
    #[clap(flatten)]
    input: InputArg,

    #[clap(flatten)]
    output: OutputArg,

    #[clap(flatten)]
    general: GeneralOpts,
}

impl InputOutput {
    /// See [`InputArg::parse_document`].
    pub fn parse_document(&self) -> Result<Document> {
        self.input.parse_document()
    }

    /// See [`InputArg::name`].
    pub fn input_name(&self) -> String {
        self.input.name()
    }

    /// See [`OutputArg::output_writer`].
    pub fn output_writer(&self) -> Result<Box<dyn WriteColor>> {
        self.output.output_writer(self.general.color)
    }

    /// See [`OutputArg::write_document`].
    pub fn write_document(&self, document: &Document) -> Result<()> {
        self.output.write_document(document)
    }

    /// The general options.
    pub fn general_opts(&self) -> &GeneralOpts {
        &self.general
    }
}

/// Parses a value given on the command line.
///
/// Anything which isn't valid JSON is taken as a plain string, so `foo`
/// works as well as `"foo"`.
pub fn parse_value(text: &str) -> serde_json::Value {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => serde_json::Value::String(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_value_accepts_json_and_bare_strings() {
        assert_eq!(parse_value("1"), json!(1));
        assert_eq!(parse_value("[true, null]"), json!([true, null]));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
        assert_eq!(parse_value("bare"), json!("bare"));
        assert_eq!(parse_value(""), json!(""));
    }
}
