//! Plain-text listing of a log list, one block per log.

use crate::Result;
use crate::schema::LogList;

use std::fmt::Write;

pub fn render_summary(list: &LogList) -> Result<String> {
    let mut out = String::new();
    for (i, log) in list.logs.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let operators = log.operator_names(&list.operators)?;
        writeln!(out, "{}", log.description)?;
        writeln!(out, "  url:         {}", log.url)?;
        writeln!(out, "  operated by: {}", operators.join("; "))?;
    }
    writeln!(
        out,
        "{} logs, {} operators",
        list.logs.len(),
        list.operators.len()
    )?;
    Ok(out)
}
