use std::sync::Arc;

use msgdev_device::Device;

use crate::cmd::RoundtripArgs;
use crate::exit::{device_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_roundtrip, OutputFormat, RoundtripReport};

pub fn run(args: RoundtripArgs, format: OutputFormat) -> CliResult<i32> {
    if args.chunk == 0 {
        return Err(CliError::new(USAGE, "--chunk must be greater than zero"));
    }

    let device = Arc::new(Device::new());
    let mut session = device
        .open()
        .map_err(|err| device_error("open failed", err))?;

    let written = session.write(args.text.as_bytes());
    let mut drained = Vec::new();
    loop {
        let bytes = session.read(args.chunk);
        if bytes.is_empty() {
            break;
        }
        drained.extend_from_slice(&bytes);
    }
    session.close();

    let report = RoundtripReport {
        requested: args.text.len(),
        written,
        truncated: written < args.text.len(),
        drained: String::from_utf8_lossy(&drained).into_owned(),
    };
    print_roundtrip(&report, format);
    Ok(SUCCESS)
}
