//! Consumers of decoded values.

use std::io::{self, Write};

use serde_json::Value;

/// Receives the value produced by a successful fetch.
///
/// A failed delivery is reported back to the caller of
/// `JsonFetcher::fetch_into` as `FetchError::Deliver`.
pub trait Sink {
    fn deliver(&mut self, value: Value) -> io::Result<()>;
}

/// Closures are infallible sinks.
impl<F: FnMut(Value)> Sink for F {
    fn deliver(&mut self, value: Value) -> io::Result<()> {
        self(value);
        Ok(())
    }
}

/// Writes each value to stdout as pretty-printed JSON followed by a newline.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn deliver(&mut self, value: Value) -> io::Result<()> {
        write_pretty(&mut io::stdout().lock(), &value)
    }
}

fn write_pretty<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    out.flush()
}
