use std::sync::Arc;

use msgdev_client::DEST_CAPACITY;
use msgdev_control::{Opcode, TRANSFER_CAP};
use msgdev_device::{Device, DeviceRegistry, DEVICE_NAME};

use crate::cmd::InfoArgs;
use crate::exit::{device_error, CliResult, SUCCESS};
use crate::output::{print_info, InfoReport, OpcodeInfo, OutputFormat};

pub fn run(_args: InfoArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = DeviceRegistry::new();
    let device = Arc::new(Device::new());
    registry
        .register(DEVICE_NAME, Arc::clone(&device))
        .map_err(|err| device_error("registration failed", err))?;

    let report = InfoReport {
        name: DEVICE_NAME,
        capacity: device.capacity(),
        transfer_cap: TRANSFER_CAP,
        dest_capacity: DEST_CAPACITY,
        open: device.is_open(),
        usage: device.usage(),
        message_len: device.message_len(),
        opcodes: Opcode::ALL
            .iter()
            .map(|op| OpcodeInfo {
                number: op.raw(),
                name: op.name(),
            })
            .collect(),
    };

    let _ = registry.unregister(DEVICE_NAME);
    print_info(&report, format);
    Ok(SUCCESS)
}
