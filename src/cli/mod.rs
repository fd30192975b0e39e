mod args;
mod output;

pub(crate) use args::{
    CliArgs, Command, ControlsArgs, OutputFormat, PaletteArgs, RegistryArgs, parse_cli,
};
pub(crate) use output::{print_json, print_plain};
