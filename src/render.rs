use std::io;

use serde::Serialize;
use serde_json::{
    ser::{Formatter, PrettyFormatter},
    Map, Serializer, Value,
};

const INDENT: &[u8] = b"    ";

// Integers beyond this lose precision in an f64, so they print the way a
// browser would after parsing them.
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// Pretty-prints a response the way `JSON.stringify(value, null, 4)` does.
pub fn render(value: &Value) -> Result<String, serde_json::Error> {
    let mut buffer = Vec::new();
    let formatter = JsFormatter::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);

    js_key_order(value).serialize(&mut serializer)?;

    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn array_index(key: &str) -> Option<u32> {
    let index = key.parse::<u32>().ok()?;

    if index == u32::MAX || index.to_string() != key {
        return None;
    }

    Some(index)
}

/// Object keys that are array indices come first in ascending order, the
/// rest keep the order they were received in.
fn js_key_order(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(js_key_order).collect()),
        Value::Object(map) => {
            let mut indexed: Vec<(u32, &String, &Value)> = map
                .iter()
                .filter_map(|(key, value)| array_index(key).map(|index| (index, key, value)))
                .collect();
            indexed.sort_by_key(|(index, _, _)| *index);

            let mut ordered = Map::new();

            for (_, key, value) in indexed {
                ordered.insert(key.clone(), js_key_order(value));
            }

            for (key, value) in map {
                if array_index(key).is_none() {
                    ordered.insert(key.clone(), js_key_order(value));
                }
            }

            Value::Object(ordered)
        }
        other => other.clone(),
    }
}

/// ECMAScript `Number::toString` for a finite double.
fn js_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };

    // `{:e}` yields the shortest round-tripping digits, e.g. `1.697e9`.
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let k = digits.len() as i32;
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (integral, fraction) = digits.split_at(n as usize);
        format!("{}.{}", integral, fraction)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let exponent_sign = if n - 1 < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{}", rest)
        };

        format!("{}{}e{}{}", first, fraction, exponent_sign, (n - 1).abs())
    };

    format!("{}{}", sign, body)
}

struct JsFormatter<'a> {
    pretty: PrettyFormatter<'a>,
}

impl<'a> JsFormatter<'a> {
    fn new() -> Self {
        JsFormatter {
            pretty: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl<'a> Formatter for JsFormatter<'a> {
    fn write_i64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: i64) -> io::Result<()> {
        if value.unsigned_abs() > MAX_SAFE_INTEGER {
            return self.write_f64(writer, value as f64);
        }

        write!(writer, "{}", value)
    }

    fn write_u64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: u64) -> io::Result<()> {
        if value > MAX_SAFE_INTEGER {
            return self.write_f64(writer, value as f64);
        }

        write!(writer, "{}", value)
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(js_number(value).as_bytes())
    }

    fn begin_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_array(writer)
    }

    fn end_array<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array(writer)
    }

    fn begin_array_value<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_array_value(writer, first)
    }

    fn end_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_array_value(writer)
    }

    fn begin_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object(writer)
    }

    fn end_object<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object(writer)
    }

    fn begin_object_key<W: ?Sized + io::Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        self.pretty.begin_object_key(writer, first)
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.begin_object_value(writer)
    }

    fn end_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        self.pretty.end_object_value(writer)
    }
}
