use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use msgdev_control::Opcode;
use serde::Serialize;

const SCHEMA_BASE: &str = "https://schemas.3leaps.dev/msgdev/cli/v1";

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
pub struct DriveReport {
    pub nth_byte: String,
    pub message: String,
    pub stored: usize,
}

pub fn print_drive(report: &DriveReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json("drive-report", report),
        OutputFormat::Table => {
            let mut table = new_table(vec!["CALL", "RESULT"]);
            table
                .add_row(vec!["get_nth_byte".to_string(), preview(&report.nth_byte)])
                .add_row(vec!["get_message".to_string(), preview(&report.message)])
                .add_row(vec![
                    "set_message".to_string(),
                    format!("stored {} bytes", report.stored),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("get_nth_byte: {}", preview(&report.nth_byte));
            println!("get_message: {}", preview(&report.message));
            println!("set_message: stored {} bytes", report.stored);
        }
        OutputFormat::Raw => {
            print_raw(report.nth_byte.as_bytes());
            print_raw(report.message.as_bytes());
        }
    }
}

#[derive(Serialize)]
pub struct RoundtripReport {
    pub requested: usize,
    pub written: usize,
    pub truncated: bool,
    pub drained: String,
}

pub fn print_roundtrip(report: &RoundtripReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json("roundtrip-report", report),
        OutputFormat::Table => {
            let mut table = new_table(vec!["REQUESTED", "WRITTEN", "TRUNCATED", "DRAINED"]);
            table.add_row(vec![
                report.requested.to_string(),
                report.written.to_string(),
                report.truncated.to_string(),
                preview(&report.drained),
            ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "wrote {} of {} requested bytes",
                report.written, report.requested
            );
            if report.truncated {
                println!("payload exceeded capacity; excess dropped");
            }
            println!("drained: {}", preview(&report.drained));
        }
        OutputFormat::Raw => print_raw(report.drained.as_bytes()),
    }
}

#[derive(Serialize)]
pub struct CallReport {
    pub opcode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byte: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored: Option<usize>,
}

impl CallReport {
    pub fn stored(opcode: Opcode, count: usize) -> Self {
        Self {
            opcode: opcode.name(),
            text: None,
            byte: None,
            stored: Some(count),
        }
    }

    pub fn text(opcode: Opcode, text: String) -> Self {
        Self {
            opcode: opcode.name(),
            text: Some(text),
            byte: None,
            stored: None,
        }
    }

    pub fn byte(opcode: Opcode, byte: u8) -> Self {
        Self {
            opcode: opcode.name(),
            text: None,
            byte: Some(byte),
            stored: None,
        }
    }
}

pub fn print_call(report: &CallReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json("call-report", report),
        OutputFormat::Table => {
            let mut table = new_table(vec!["OPCODE", "RESULT"]);
            table.add_row(vec![report.opcode.to_string(), call_result(report)]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!("{}: {}", report.opcode, call_result(report));
        }
        OutputFormat::Raw => {
            if let Some(text) = &report.text {
                print_raw(text.as_bytes());
            } else if let Some(byte) = report.byte {
                print_raw(&[byte]);
            } else if let Some(stored) = report.stored {
                println!("{stored}");
            }
        }
    }
}

#[derive(Serialize)]
pub struct OpcodeInfo {
    pub number: u32,
    pub name: &'static str,
}

#[derive(Serialize)]
pub struct InfoReport {
    pub name: &'static str,
    pub capacity: usize,
    pub transfer_cap: usize,
    pub dest_capacity: usize,
    pub open: bool,
    pub usage: u64,
    pub message_len: usize,
    pub opcodes: Vec<OpcodeInfo>,
}

pub fn print_info(report: &InfoReport, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_json("info-report", report),
        OutputFormat::Table => {
            let mut table = new_table(vec!["FIELD", "VALUE"]);
            table
                .add_row(vec!["name".to_string(), report.name.to_string()])
                .add_row(vec!["capacity".to_string(), report.capacity.to_string()])
                .add_row(vec![
                    "transfer_cap".to_string(),
                    report.transfer_cap.to_string(),
                ])
                .add_row(vec![
                    "dest_capacity".to_string(),
                    report.dest_capacity.to_string(),
                ])
                .add_row(vec!["open".to_string(), report.open.to_string()])
                .add_row(vec!["usage".to_string(), report.usage.to_string()])
                .add_row(vec![
                    "message_len".to_string(),
                    report.message_len.to_string(),
                ])
                .add_row(vec!["opcodes".to_string(), opcode_list(&report.opcodes)]);
            println!("{table}");
        }
        OutputFormat::Pretty | OutputFormat::Raw => {
            println!("name: {}", report.name);
            println!("capacity: {}", report.capacity);
            println!("transfer_cap: {}", report.transfer_cap);
            println!("dest_capacity: {}", report.dest_capacity);
            println!("open: {}", report.open);
            println!("usage: {}", report.usage);
            println!("message_len: {}", report.message_len);
            println!("opcodes: {}", opcode_list(&report.opcodes));
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn call_result(report: &CallReport) -> String {
    if let Some(text) = &report.text {
        preview(text)
    } else if let Some(byte) = report.byte {
        byte.to_string()
    } else if let Some(stored) = report.stored {
        format!("stored {stored} bytes")
    } else {
        String::new()
    }
}

fn opcode_list(opcodes: &[OpcodeInfo]) -> String {
    opcodes
        .iter()
        .map(|op| format!("{}={}", op.name, op.number))
        .collect::<Vec<_>>()
        .join(", ")
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn preview(text: &str) -> String {
    if text.is_empty() {
        "<empty>".to_string()
    } else {
        text.escape_default().to_string()
    }
}

fn print_json<T: Serialize>(kind: &str, payload: &T) {
    let mut value = serde_json::to_value(payload).unwrap_or(serde_json::Value::Null);
    if let serde_json::Value::Object(map) = &mut value {
        map.insert(
            "schema_id".to_string(),
            serde_json::Value::String(format!("{SCHEMA_BASE}/{kind}.schema.json")),
        );
    }
    println!("{value}");
}
