use clap::Parser;
use std::path::PathBuf;

/// Province map state painter.
///
/// Partition a province-colored map into named states and export them as a
/// structured text file.
#[derive(Parser, Debug)]
#[command(
    name = "statepainter",
    about = "Partition a province-colored map into named states"
)]
pub struct CliArgs {
    /// Province map image to open at startup.
    #[arg(value_name = "MAP.png")]
    pub map: Option<PathBuf>,

    /// Destination for "Export All States" (skips the save dialog).
    #[arg(short, long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}
