use anyhow::Result;
use clap::Parser;
use std::io;
use std::process::ExitCode;

macro_rules! subcommands {
    ($(
        $(#[$attr:meta])*
        ($name:ident, $string:tt)
    )*) => {
        $(
            #[cfg(feature = $string)]
            mod $name;
        )*

        #[derive(Parser)]
        #[clap(version)]
        #[allow(non_camel_case_types)]
        enum ListMapTool {
            $(
                #[cfg(feature = $string)]
                $(#[$attr])*
                $name($name::Opts),
            )*
        }

        impl ListMapTool {
            fn general_opts(&self) -> &listmap_tools::GeneralOpts {
                match *self {
                    $(
                        #[cfg(feature = $string)]
                        Self::$name(ref opts) => opts.general_opts(),
                    )*
                }
            }

            fn run(self) -> Result<()> {
                match self {
                    $(
                        #[cfg(feature = $string)]
                        Self::$name(opts) => opts.run(),
                    )*
                }
            }
        }
    }
}

subcommands! {
    (check, "check")
    (dump, "dump")
    (get, "get")
    (set, "set")
    (remove, "remove")
    (dedup, "dedup")
}

fn main() -> ExitCode {
    let tool = <ListMapTool as Parser>::parse();
    tool.general_opts().init_logger();
    let err = match tool.run() {
        Ok(()) => return ExitCode::SUCCESS,
        Err(e) => e,
    };
    // If an error happened and it's connected to something like `EPIPE` then
    // don't print out an error and instead just silently exit with a failure.
    // This prevents stray messages when the stdout pipe is closed, for
    // example when piping a large dump into `head`.
    if let Some(io) = err.downcast_ref::<io::Error>() {
        if io.kind() == io::ErrorKind::BrokenPipe {
            return ExitCode::FAILURE;
        }
    }
    eprintln!("Error: {err:?}");
    ExitCode::FAILURE
}

#[test]
fn verify_cli() {
    use clap::CommandFactory;
    ListMapTool::command().debug_assert()
}
