//! OpenSSL CONF rendering of a CT log list.
//!
//! The schema is the one read by `SSL_CTX_set_ctlog_list_file`: an
//! `enabled_logs` list naming sections, then one section per log.

use crate::Result;
use crate::diagnostics;
use crate::schema::{Log, LogList, Operator};

use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Section name and `enabled_logs` entry for a log.
///
/// The url is unique and reads better in a list than the description. Commas
/// are the list delimiter, so they are stripped.
pub fn log_id(log: &Log) -> String {
    log.url.replace(',', "")
}

/// Join items as an OpenSSL CONF list, stripping commas from each item.
pub fn openssl_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().replace(',', ""))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn enabled_logs_conf(logs: &[Log]) -> String {
    format!("enabled_logs = {}\n", openssl_list(logs.iter().map(log_id)))
}

/// One `[id]` section. Fails if `operated_by` points past `operators`.
pub fn log_conf(log: &Log, operators: &[Operator]) -> Result<String> {
    let operated_by = log.operator_names(operators)?;

    Ok(format!(
        "[{id}]\n\
         description = {description}\n\
         key = {key}\n\
         url = https://{url}\n\
         operated_by = {operated_by}\n",
        id = log_id(log),
        description = log.description,
        key = log.key,
        url = log.url,
        operated_by = openssl_list(operated_by),
    ))
}

/// Stream the whole document to `out`.
///
/// The enabled_logs line goes out first, then the sections separated by a
/// blank line, with nothing after the last one.
pub fn write_openssl_conf<W: Write>(list: &LogList, out: &mut W) -> Result<()> {
    out.write_all(enabled_logs_conf(&list.logs).as_bytes())?;
    out.write_all(b"\n")?;

    let sections = list
        .logs
        .iter()
        .map(|log| log_conf(log, &list.operators))
        .collect::<Result<Vec<_>>>()?;
    out.write_all(sections.join("\n").as_bytes())?;

    Ok(())
}

pub fn render_openssl_conf(list: &LogList) -> Result<String> {
    let mut buf = Vec::new();
    write_openssl_conf(list, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Write the CONF document to `path`, replacing anything already there.
///
/// A failure part way through leaves whatever was written on disk.
pub fn generate_openssl_conf(list: &LogList, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| {
        diagnostics::error_message(format!("create output file {}", path.display()))
    })?;
    let mut out = BufWriter::new(file);

    // Render failures already carry the error prefix.
    write_openssl_conf(list, &mut out)
        .with_context(|| format!("render output file {}", path.display()))?;
    out.flush().with_context(|| {
        diagnostics::error_message(format!("flush output file {}", path.display()))
    })?;

    Ok(())
}
