use serde_json::{json, Value};
use workforce::error::get_error_info;
use workforce::WorkforceError;

pub fn emit_output(command: &str, payload: Value) {
    println!(
        "{}",
        json!({
            "command": command,
            "status": "ok",
            "payload": payload,
        })
    );
}

pub fn emit_error(command: &str, error: &WorkforceError) {
    let fix = get_error_info(error.code()).map(|(_, fix)| fix);
    eprintln!(
        "{}",
        json!({
            "command": command,
            "status": "error",
            "code": error.code(),
            "message": error.to_string(),
            "fix": fix,
        })
    );
}

pub fn exit_status(error: &WorkforceError) -> u8 {
    u8::try_from(error.exit_code()).unwrap_or(1)
}
