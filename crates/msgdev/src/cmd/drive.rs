use std::sync::Arc;

use msgdev_client::{ClientError, DeviceClient};
use msgdev_device::{Device, DeviceRegistry, DEVICE_NAME};

use crate::cmd::DriveArgs;
use crate::exit::{CliError, CliResult, DRIVER_FAILURE, INTERNAL, SUCCESS};
use crate::output::{print_drive, DriveReport, OutputFormat};

/// The fixed message the driver stores as its final step.
const DRIVER_MESSAGE: &str = "Message passed by control call\n";

pub fn run(args: DriveArgs, format: OutputFormat) -> CliResult<i32> {
    let report = execute(&args)?;
    print_drive(&report, format);
    Ok(SUCCESS)
}

fn execute(args: &DriveArgs) -> CliResult<DriveReport> {
    let registry = DeviceRegistry::new();
    registry
        .register(DEVICE_NAME, Arc::new(Device::new()))
        .map_err(|err| CliError::new(INTERNAL, format!("device registration failed: {err}")))?;

    let client = DeviceClient::resolve(&registry, DEVICE_NAME)
        .map_err(|err| sequence_failure("resolve", err))?;

    if let Some(seed) = &args.seed {
        let mut session = client.open().map_err(|err| sequence_failure("open", err))?;
        session.write(seed.as_bytes());
        session.close();
    }

    // The legacy sequence, in order; the first failure ends it.
    let session = client.open().map_err(|err| sequence_failure("open", err))?;
    let nth_byte = client
        .get_nth_byte()
        .map_err(|err| sequence_failure("get_nth_byte", err))?;
    let message = client
        .get_message()
        .map_err(|err| sequence_failure("get_message", err))?;
    let stored = client
        .set_message(DRIVER_MESSAGE)
        .map_err(|err| sequence_failure("set_message", err))?;
    session.close();

    let _ = registry.unregister(DEVICE_NAME);

    Ok(DriveReport {
        nth_byte,
        message,
        stored,
    })
}

/// The driver terminates on the first failed call, naming the call, with
/// the legacy -1 exit code.
fn sequence_failure(call: &str, err: ClientError) -> CliError {
    CliError::new(DRIVER_FAILURE, format!("{call} failed: {err}"))
}
