use std::sync::Arc;

use msgdev_client::DeviceClient;
use msgdev_control::Opcode;
use msgdev_device::Device;

use crate::cmd::CallArgs;
use crate::exit::{client_error, control_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_call, CallReport, OutputFormat};

pub fn run(args: CallArgs, format: OutputFormat) -> CliResult<i32> {
    let opcode =
        Opcode::try_from(args.opcode).map_err(|err| control_error("dispatch failed", err))?;

    let client = DeviceClient::new(Arc::new(Device::new()));
    if let Some(seed) = &args.seed {
        let mut session = client
            .open()
            .map_err(|err| client_error("open failed", err))?;
        session.write(seed.as_bytes());
        session.close();
    }

    let report = match opcode {
        Opcode::SetMessage => {
            let data = args
                .data
                .as_deref()
                .ok_or_else(|| CliError::new(USAGE, "SET_MESSAGE requires --data"))?;
            let stored = client
                .set_message(data)
                .map_err(|err| client_error("set_message failed", err))?;
            CallReport::stored(opcode, stored)
        }
        Opcode::GetMessage => {
            let text = client
                .get_message()
                .map_err(|err| client_error("get_message failed", err))?;
            CallReport::text(opcode, text)
        }
        Opcode::GetNthByte => {
            let index = args
                .index
                .ok_or_else(|| CliError::new(USAGE, "GET_NTH_BYTE requires --index"))?;
            let byte = client
                .nth_byte(index)
                .map_err(|err| client_error("nth_byte failed", err))?;
            CallReport::byte(opcode, byte)
        }
    };

    print_call(&report, format);
    Ok(SUCCESS)
}
