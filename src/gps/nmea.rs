// src/gps/nmea.rs
//! NMEA-0183 sentence parsing
//!
//! Converts a raw byte buffer of interleaved NMEA sentences into updates on a
//! [`GpsRecord`]. Each decoder touches only the fields its sentence type
//! carries; everything else keeps its last known value. Malformed sentences
//! (bad checksum, missing terminator, too few fields, out-of-range
//! coordinates) are skipped silently so one corrupted sentence never stops
//! the rest of the buffer from being processed.

use super::record::GpsRecord;

/// Sentences beyond this bound in a single buffer are discarded unparsed.
const MAX_SENTENCES: usize = 15;

/// Fields beyond this bound in a single sentence are silently dropped.
const MAX_FIELDS: usize = 25;

/// Length of the `hhmmss.ss` UTC time-of-day copied into `last_measure`.
const TIME_LEN: usize = 9;

/// Parse every complete NMEA sentence in `buffer` and update `record`.
///
/// The buffer is borrowed immutably and never modified. It is split on the
/// `$` start marker; a candidate sentence is decoded only if it contains a
/// `\r\n` terminator and its checksum verifies. Failures are per-sentence
/// and silent: a buffer of garbage leaves the record exactly as it was.
pub fn parse(record: &mut GpsRecord, buffer: &[u8]) {
    let text = String::from_utf8_lossy(buffer);

    for sentence in text.split('$').filter(|s| !s.is_empty()).take(MAX_SENTENCES) {
        if !sentence.contains("\r\n") || !verify_checksum(sentence) {
            continue;
        }

        if sentence.contains("GLL") {
            decode_gll(record, &tokenize(sentence));
        } else if sentence.contains("GSA") {
            decode_gsa(record, &tokenize(sentence));
        } else if sentence.contains("GGA") {
            decode_gga(record, &tokenize(sentence));
        } else if sentence.contains("GSV") {
            decode_gsv(record, &tokenize(sentence));
        }
    }
}

/// Verify the XOR checksum of one sentence body (leading `$` already
/// stripped by the splitter).
///
/// The checksum covers every byte up to the `*` delimiter and is compared
/// against the two hex digits that follow it.
fn verify_checksum(sentence: &str) -> bool {
    let bytes = sentence.as_bytes();
    if bytes.len() < 5 {
        return false;
    }

    let star = match bytes.iter().position(|&b| b == b'*') {
        Some(pos) => pos,
        None => return false,
    };
    if bytes.len() < star + 3 {
        return false;
    }

    let declared = match std::str::from_utf8(&bytes[star + 1..star + 3])
        .ok()
        .and_then(|hex| u8::from_str_radix(hex, 16).ok())
    {
        Some(value) => value,
        None => return false,
    };

    let computed = bytes[..star].iter().fold(0u8, |cs, &b| cs ^ b);
    computed == declared
}

/// Split a sentence into its comma-delimited fields.
///
/// Consecutive commas yield empty fields, order is preserved, and the first
/// field is always the sentence header token (e.g. `GPGLL`). Fields past
/// [`MAX_FIELDS`] are dropped.
fn tokenize(sentence: &str) -> Vec<&str> {
    sentence.split(',').take(MAX_FIELDS).collect()
}

/// Split a fixed-column coordinate field (`DDMM.MMMM` for latitude,
/// `DDDMM.MMMM` for longitude) into whole degrees and decimal minutes.
/// Unparsable columns read as zero; callers validate the result.
fn degrees_minutes(field: &str, degree_digits: usize) -> (i32, f32) {
    let split = degree_digits.min(field.len());
    let degrees = field.get(..split).and_then(|d| d.parse().ok()).unwrap_or(0);
    let minutes = field
        .get(split..)
        .and_then(|m| m.parse().ok())
        .unwrap_or(0.0);
    (degrees, minutes)
}

/// The `hhmmss.ss` prefix of a time field, if the field is long enough to
/// hold one.
fn time_of_day(field: &str) -> Option<&str> {
    field.get(..TIME_LEN)
}

/// Decode a GLL (geographic position) sentence.
///
/// Latitude and longitude are stored as unsigned magnitudes with the
/// hemisphere kept in the `ns`/`ew` indicator characters; the sign is not
/// applied. GGA uses the opposite convention, see [`decode_gga`].
///
/// A coordinate whose whole-degree or minute component reads as exactly
/// zero rejects the sentence, 0° included.
fn decode_gll(record: &mut GpsRecord, fields: &[&str]) -> bool {
    if fields.len() < 5 {
        return false;
    }

    let ns = match fields[2].chars().next() {
        Some(c @ ('N' | 'S')) => c,
        _ => return false,
    };
    let ew = fields[4].chars().next().unwrap_or(' ');

    let (lat_deg, lat_min) = degrees_minutes(fields[1], 2);
    let (lon_deg, lon_min) = degrees_minutes(fields[3], 3);
    if lat_deg == 0 || lat_min == 0.0 || lon_deg == 0 || lon_min == 0.0 {
        return false;
    }

    record.lat = lat_deg as f64 + lat_min as f64 / 60.0;
    record.lon = lon_deg as f64 + lon_min as f64 / 60.0;
    record.ns = ns;
    record.ew = ew;

    match fields.get(5).and_then(|f| time_of_day(f)) {
        Some(time) => record.last_measure = time.to_string(),
        None => record.last_measure.clear(),
    }

    true
}

/// Decode a GSA (satellite status) sentence.
///
/// The fix flag follows the fix-type field: 2D/3D (values above 1) set it,
/// anything else clears it. The satellite count is the number of non-empty
/// PRN slots, regardless of their content. Position fields are not touched.
fn decode_gsa(record: &mut GpsRecord, fields: &[&str]) -> bool {
    if fields.len() < 15 {
        return false;
    }

    let fix_type: i32 = fields[2].parse().unwrap_or(0);
    record.fix = fix_type > 1;

    record.satellite_count = fields[3..15].iter().filter(|f| !f.is_empty()).count() as u32;

    true
}

/// Decode a GGA (fix data) sentence.
///
/// Latitude and longitude are stored signed, negative for the southern and
/// western hemispheres; this is the opposite of [`decode_gll`]'s
/// unsigned-plus-indicator convention. Coordinates must fall strictly
/// inside (0, 90) and (0, 180) degrees or the sentence is rejected with
/// the record untouched.
///
/// Satellite count, HDOP and altitude only overwrite the record when they
/// read as non-zero; a zero or unparsable field keeps the last good value.
fn decode_gga(record: &mut GpsRecord, fields: &[&str]) -> bool {
    if fields.len() < 10 {
        return false;
    }

    let time = time_of_day(fields[1]);

    let ns = match fields[3].chars().next() {
        Some(c @ ('N' | 'S')) => c,
        _ => return false,
    };
    let (lat_deg, lat_min) = degrees_minutes(fields[2], 2);
    let lat = lat_deg as f64 + lat_min as f64 / 60.0;
    if lat <= 0.0 || lat >= 90.0 {
        return false;
    }

    let ew = match fields[5].chars().next() {
        Some(c @ ('E' | 'W')) => c,
        _ => return false,
    };
    let (lon_deg, lon_min) = degrees_minutes(fields[4], 3);
    let lon = lon_deg as f64 + lon_min as f64 / 60.0;
    if lon <= 0.0 || lon >= 180.0 {
        return false;
    }

    // Both coordinates validated; commit.
    match time {
        Some(time) => record.last_measure = time.to_string(),
        None => record.last_measure.clear(),
    }
    record.lat = if ns == 'S' { -lat } else { lat };
    record.lon = if ew == 'W' { -lon } else { lon };
    record.fix = fields[6].parse::<i32>().unwrap_or(0) > 0;

    let satellites: u32 = fields[7].parse().unwrap_or(0);
    if satellites != 0 {
        record.satellite_count = satellites;
    }
    let hdop: f32 = fields[8].parse().unwrap_or(0.0);
    if hdop != 0.0 {
        record.hdop = hdop;
    }
    let altitude: f32 = fields[9].parse().unwrap_or(0.0);
    if altitude != 0.0 {
        record.altitude = altitude;
    }

    true
}

/// Accept a GSV (satellites in view) sentence.
///
/// Field-count validation only; no record fields are derived from GSV.
fn decode_gsv(_record: &mut GpsRecord, fields: &[&str]) -> bool {
    fields.len() >= 2
}
