use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod call;
pub mod drive;
pub mod info;
pub mod roundtrip;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the fixed driver sequence against a registered device.
    Drive(DriveArgs),
    /// Write a message through a stream session and drain it back.
    Roundtrip(RoundtripArgs),
    /// Issue a single control call by raw opcode number.
    Call(CallArgs),
    /// Show device constants and diagnostics.
    Info(InfoArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Drive(args) => drive::run(args, format),
        Command::Roundtrip(args) => roundtrip::run(args, format),
        Command::Call(args) => call::run(args, format),
        Command::Info(args) => info::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DriveArgs {
    /// Seed the buffer through a stream session before the sequence runs.
    #[arg(long)]
    pub seed: Option<String>,
}

#[derive(Args, Debug)]
pub struct RoundtripArgs {
    /// Message to write.
    pub text: String,
    /// Maximum bytes per stream read while draining.
    #[arg(long, default_value = "16")]
    pub chunk: usize,
}

#[derive(Args, Debug)]
pub struct CallArgs {
    /// Raw opcode number (0 = SET_MESSAGE, 1 = GET_MESSAGE, 2 = GET_NTH_BYTE).
    pub opcode: u32,
    /// Message payload for SET_MESSAGE.
    #[arg(long, conflicts_with = "index")]
    pub data: Option<String>,
    /// Byte index for GET_NTH_BYTE.
    #[arg(long)]
    pub index: Option<usize>,
    /// Seed the buffer through a stream session before the call.
    #[arg(long)]
    pub seed: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct InfoArgs {}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
