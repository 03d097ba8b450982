//! Prompts for summarizing a saved dashboard layout of charts

use std::io;

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{Formatter, Serializer};

/// Figures JSON beyond this many characters is cut off
pub const LAYOUT_CHARACTER_LIMIT: usize = 3900;

/// Question recorded for the fallback when a layout summary fails
pub const LAYOUT_FALLBACK_QUESTION: &str = "Summarize the charts and provide insights";

/// Summary request for a list of chart figures, with the figures JSON appended
pub fn layout_prompt(figures: &[Value]) -> String {
    let instruction = format!(
        "The following is a Plotly Dash layout with several charts. Summarize the charts for me \
         and provide some maximums, minimums, trends, notable outliers, etc. Describe the data and \
         content as the user doesn't know it's a layout. The data may be truncated to comply with \
         a max character count. There should be {} charts to follow:\n\n\n",
        figures.len()
    );

    let figures_json = spaced_json(figures);
    let truncated: String = figures_json.chars().take(LAYOUT_CHARACTER_LIMIT).collect();

    instruction + &truncated
}

/// JSON with `", "` and `": "` separators and non-ASCII escaped as `\uXXXX`,
/// so the character window covers the same text a Python dashboard would send.
/// Object keys come out sorted.
fn spaced_json(figures: &[Value]) -> String {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, SpacedFormatter);

    if figures.serialize(&mut serializer).is_err() {
        return Value::Array(figures.to_vec()).to_string();
    }

    String::from_utf8(buffer)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        let mut units = [0u16; 2];

        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units).iter() {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }

        Ok(())
    }
}

/// Dataset description handed to the fallback for a layout summary
pub fn layout_fallback_info(chart_count: usize) -> String {
    format!(
        "Layout contains {} charts. Chart data has been processed and is ready for analysis.",
        chart_count
    )
}
