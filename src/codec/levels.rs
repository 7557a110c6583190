//! Delta-offset level codec.
//!
//! On the wire, the first field of every tuple (and the fourth in the
//! double format) is the gap since the end of the previous tuple at the
//! same depth. Decoding replays a running end position to recover
//! absolute offsets; encoding walks the same chain backwards.

use super::{Bar, DecodedLevels, DoubleTuple, SingleTuple};
use crate::parser::schema::Format;
use crate::utils::error::FlamebearerError;
use log::debug;

/// Wire levels: one flat integer row per depth
pub type Levels = Vec<Vec<i64>>;

/// Decode wire levels into absolute-offset tuples
///
/// # Errors
/// * `MalformedEncoding` - truncated level or negative value
pub fn decode(levels: &[Vec<i64>], format: Format) -> Result<DecodedLevels, FlamebearerError> {
    let decoded = match format {
        Format::Single => DecodedLevels::Single(decode_single(levels)?),
        Format::Double => DecodedLevels::Double(decode_double(levels)?),
    };
    debug!(
        "Decoded {} levels ({} nodes, {})",
        decoded.depth(),
        decoded.node_count(),
        format
    );
    Ok(decoded)
}

/// Re-encode absolute tuples into wire levels
///
/// # Errors
/// * `MalformedEncoding` - a tuple starts before the previous sibling ends,
///   or a value does not fit the wire integer type
pub fn encode(decoded: &DecodedLevels) -> Result<Levels, FlamebearerError> {
    match decoded {
        DecodedLevels::Single(levels) => encode_single(levels),
        DecodedLevels::Double(levels) => encode_double(levels),
    }
}

pub fn decode_single(levels: &[Vec<i64>]) -> Result<Vec<Vec<SingleTuple>>, FlamebearerError> {
    let mut decoded = Vec::with_capacity(levels.len());
    for (depth, level) in levels.iter().enumerate() {
        check_width(depth, level, Format::Single)?;
        let mut cursor = 0;
        let mut tuples = Vec::with_capacity(level.len() / Format::Single.tuple_width());
        for t in level.chunks_exact(Format::Single.tuple_width()) {
            let bar = read_bar(depth, &t[0..3], &mut cursor)?;
            let name = read_value(depth, t[3])? as usize;
            tuples.push(SingleTuple { bar, name });
        }
        decoded.push(tuples);
    }
    Ok(decoded)
}

pub fn decode_double(levels: &[Vec<i64>]) -> Result<Vec<Vec<DoubleTuple>>, FlamebearerError> {
    let mut decoded = Vec::with_capacity(levels.len());
    for (depth, level) in levels.iter().enumerate() {
        check_width(depth, level, Format::Double)?;
        let mut left_cursor = 0;
        let mut right_cursor = 0;
        let mut tuples = Vec::with_capacity(level.len() / Format::Double.tuple_width());
        for t in level.chunks_exact(Format::Double.tuple_width()) {
            let left = read_bar(depth, &t[0..3], &mut left_cursor)?;
            let right = read_bar(depth, &t[3..6], &mut right_cursor)?;
            let name = read_value(depth, t[6])? as usize;
            tuples.push(DoubleTuple { left, right, name });
        }
        decoded.push(tuples);
    }
    Ok(decoded)
}

pub fn encode_single(levels: &[Vec<SingleTuple>]) -> Result<Levels, FlamebearerError> {
    let mut encoded = Vec::with_capacity(levels.len());
    for (depth, level) in levels.iter().enumerate() {
        let mut out = Vec::with_capacity(level.len() * Format::Single.tuple_width());
        let mut cursor = 0;
        for t in level {
            write_bar(depth, &t.bar, &mut cursor, &mut out)?;
            out.push(write_value(depth, t.name as u64)?);
        }
        encoded.push(out);
    }
    Ok(encoded)
}

pub fn encode_double(levels: &[Vec<DoubleTuple>]) -> Result<Levels, FlamebearerError> {
    let mut encoded = Vec::with_capacity(levels.len());
    for (depth, level) in levels.iter().enumerate() {
        let mut out = Vec::with_capacity(level.len() * Format::Double.tuple_width());
        let mut left_cursor = 0;
        let mut right_cursor = 0;
        for t in level {
            write_bar(depth, &t.left, &mut left_cursor, &mut out)?;
            write_bar(depth, &t.right, &mut right_cursor, &mut out)?;
            out.push(write_value(depth, t.name as u64)?);
        }
        encoded.push(out);
    }
    Ok(encoded)
}

fn check_width(depth: usize, level: &[i64], format: Format) -> Result<(), FlamebearerError> {
    let width = format.tuple_width();
    if level.len() % width != 0 {
        return Err(FlamebearerError::malformed(
            depth,
            format!(
                "level has {} values, not a multiple of the {} tuple width {}",
                level.len(),
                format,
                width
            ),
        ));
    }
    Ok(())
}

/// Read `(delta, total, self)` and advance `cursor` to the bar's end
fn read_bar(depth: usize, raw: &[i64], cursor: &mut u64) -> Result<Bar, FlamebearerError> {
    let delta = read_value(depth, raw[0])?;
    let total = read_value(depth, raw[1])?;
    let self_ticks = read_value(depth, raw[2])?;

    let offset = cursor
        .checked_add(delta)
        .ok_or_else(|| FlamebearerError::malformed(depth, "offset overflow"))?;
    *cursor = offset
        .checked_add(total)
        .ok_or_else(|| FlamebearerError::malformed(depth, "offset overflow"))?;

    Ok(Bar {
        offset,
        total,
        self_ticks,
    })
}

fn write_bar(
    depth: usize,
    bar: &Bar,
    cursor: &mut u64,
    out: &mut Vec<i64>,
) -> Result<(), FlamebearerError> {
    let delta = bar.offset.checked_sub(*cursor).ok_or_else(|| {
        FlamebearerError::malformed(
            depth,
            format!(
                "tuple at offset {} starts before the previous sibling ends at {}",
                bar.offset, cursor
            ),
        )
    })?;
    out.push(write_value(depth, delta)?);
    out.push(write_value(depth, bar.total)?);
    out.push(write_value(depth, bar.self_ticks)?);
    *cursor = bar.end();
    Ok(())
}

fn read_value(depth: usize, v: i64) -> Result<u64, FlamebearerError> {
    u64::try_from(v).map_err(|_| FlamebearerError::malformed(depth, format!("negative value {}", v)))
}

fn write_value(depth: usize, v: u64) -> Result<i64, FlamebearerError> {
    i64::try_from(v)
        .map_err(|_| FlamebearerError::malformed(depth, format!("value {} exceeds wire range", v)))
}
