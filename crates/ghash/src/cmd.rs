//! Command handlers for the `ghash` CLI.
//!
//! Each handler returns the text to print so the entry point decides where it
//! goes.

use std::{
    fmt::Write,
    hint::black_box,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use geohashkit::{Geohash, Interval, decode_rounded};

/// Coordinates far outside the canonical ranges, used to time normalization.
const WRAPPED_LAT_LNG: (f64, f64) = (3600.7749, -4320.4194);

/// The nine extreme corners of the globe with their descriptions.
const EDGE_CASES: [((f64, f64), &str); 9] = [
    ((-90.0, -180.0), "South Pole with Min Longitude (West)"),
    ((-90.0, 0.0), "South Pole"),
    ((-90.0, 180.0), "South Pole with Max Longitude (East)"),
    ((0.0, -180.0), "Equator and Min Longitude (West)"),
    ((0.0, 0.0), "Equator and Prime Meridian"),
    ((0.0, 180.0), "Equator and Max Longitude (East)"),
    ((90.0, -180.0), "North Pole with Min Longitude (West)"),
    ((90.0, 0.0), "North Pole"),
    ((90.0, 180.0), "North Pole with Max Longitude (East)"),
];

/// Parse a geohash argument, naming it in the error.
fn parse(geohash: &str) -> Result<Geohash> {
    geohash
        .parse()
        .with_context(|| format!("invalid geohash {geohash:?}"))
}

/// Format an interval as `[low, high]`.
fn show(interval: &Interval) -> String {
    format!("[{}, {}]", interval.low, interval.high)
}

/// Encode a coordinate pair.
pub fn encode(lat: f64, lng: f64, length: usize) -> Result<Geohash> {
    Geohash::from_coordinates(lat, lng, length)
        .with_context(|| format!("cannot encode ({lat}, {lng}) at length {length}"))
}

/// Decode a geohash to `lat,lng`, its rounded center, or its two intervals.
pub fn decode(geohash: &str, interval: bool, rounded: bool) -> Result<String> {
    let g = parse(geohash)?;
    if interval {
        let bbox = g.decode_to_interval();
        return Ok(format!("lat: {}\nlng: {}", show(&bbox.lat), show(&bbox.lng)));
    }
    let (lat, lng) = if rounded {
        decode_rounded(g.as_str())?
    } else {
        g.decode()
    };
    Ok(format!("{lat},{lng}"))
}

/// The cells around a geohash, or only its outer ring.
pub fn neighbors(geohash: &str, order: u32, ring: bool) -> Result<Vec<Geohash>> {
    let g = parse(geohash)?;
    let cells = if ring { g.ring(order) } else { g.neighbors(order) };
    cells.with_context(|| format!("cannot list cells around {g}"))
}

/// Geohashes of the nine extreme corners at lengths `1..=max_length`.
pub fn edges(max_length: usize) -> Result<String> {
    let mut out = String::new();
    for ((lat, lng), description) in EDGE_CASES {
        writeln!(out, "[{lat:?}, {lng:?}]: {description}")?;
        for length in 1..=max_length {
            writeln!(out, "  precision {length}: {}", encode(lat, lng, length)?)?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

/// Intervals, sizes and bit stream for every prefix of a geohash.
pub fn precision(geohash: &str) -> Result<String> {
    let g = parse(geohash)?;
    let mut out = String::new();
    for len in 1..=g.len() {
        let prefix = g.prefix(len)?;
        let bbox = prefix.decode_to_interval();
        let bits: String = prefix.bits().map(|b| if b { '1' } else { '0' }).collect();
        writeln!(
            out,
            "{len:02} char(s) range: lat = {}, lng = {}",
            show(&bbox.lat),
            show(&bbox.lng)
        )?;
        writeln!(
            out,
            "{len:02} char(s) size: lat = {}, lng = {}",
            bbox.height(),
            bbox.width()
        )?;
        writeln!(out, "{len:02} char(s) bits: {bits}")?;
    }
    Ok(out)
}

/// One timed operation in a profile report.
struct Timing {
    /// Operation label.
    name: &'static str,
    /// Number of calls made.
    calls: u32,
    /// Total wall-clock time across all calls.
    total: Duration,
}

/// Run `op` `calls` times and record the elapsed time.
fn time<T>(name: &'static str, calls: u32, mut op: impl FnMut() -> Result<T>) -> Result<Timing> {
    let start = Instant::now();
    for _ in 0..calls {
        black_box(op()?);
    }
    Ok(Timing {
        name,
        calls,
        total: start.elapsed(),
    })
}

/// Time each core operation and render the results as a table.
///
/// Construction and neighbor search run a tenth as often as decoding, and
/// normalizing encodes a fifth as often.
pub fn profile(repeat_count: u32, (lat, lng): (f64, f64), geohash: &str) -> Result<String> {
    let g = parse(geohash)?;
    let (wrapped_lat, wrapped_lng) = WRAPPED_LAT_LNG;
    let timings = [
        time("from_coordinates", repeat_count / 10, || {
            Ok(Geohash::from_coordinates(lat, lng, g.len())?)
        })?,
        time("parse", repeat_count / 10, || Ok(geohash.parse::<Geohash>()?))?,
        time("with_coordinates (wrapped)", repeat_count / 5, || {
            Ok(g.with_coordinates(wrapped_lat, wrapped_lng, g.len())?)
        })?,
        time("decode_to_interval", repeat_count, || Ok(g.decode_to_interval()))?,
        time("decode", repeat_count, || Ok(g.decode()))?,
        time("neighbors (order 2)", repeat_count / 10, || Ok(g.neighbors(2)?))?,
    ];

    let mut out = String::new();
    writeln!(out, "{:<28} {:>10} {:>14} {:>12}", "operation", "calls", "total", "per call")?;
    for t in &timings {
        let per_call = t.total.checked_div(t.calls).unwrap_or_default();
        writeln!(
            out,
            "{:<28} {:>10} {:>14} {:>12}",
            t.name,
            t.calls,
            format!("{:.3?}", t.total),
            format!("{per_call:.1?}")
        )?;
    }
    Ok(out)
}
