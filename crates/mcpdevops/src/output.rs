use serde_json::Value;
use std::io::{self, Write};

pub fn print_json(value: &Value) -> io::Result<()> {
    let rendered = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    let mut out = io::stdout().lock();
    writeln!(out, "{rendered}")
}
