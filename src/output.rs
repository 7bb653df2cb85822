// src/output.rs
use std::io::Write;

use crate::error::GraphResult;
use crate::types::OutputFormat;

/// Truncate `value` toward zero to the configured number of fractional
/// digits, no rounding: 1.66 prints as "1.6" under the default format.
pub fn format_median(value: f64, format: &OutputFormat) -> String {
    let scale = 10f64.powi(format.decimals as i32);
    let truncated = (value * scale).trunc() / scale;
    format!("{truncated:.prec$}", prec = format.decimals)
}

/// Writes one median line per processed event, in input order.
pub struct MedianWriter<W: Write> {
    out: W,
    format: OutputFormat,
}

impl<W: Write> MedianWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    pub fn write_median(&mut self, value: f64) -> GraphResult<()> {
        writeln!(self.out, "{}", format_median(value, &self.format))?;
        Ok(())
    }

    pub fn flush(&mut self) -> GraphResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
