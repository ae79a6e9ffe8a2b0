use std::ops::Range;

use tracing::debug;

use crate::error::DecodeError;
use crate::models::{Cursors, ParsedMetar, PartialMetar};
use crate::services::check_provider_errors;

// sky condition prefixes, in the order they are tried
pub const CLOUD_PREFIXES: [&str; 7] = ["VV", "SKC", "CLR", "FEW", "SCT", "BKN", "OVC"];

// station, report time and at least one wind token
const MIN_TOKENS: usize = 3;

// decodes a raw report into its fields, station is only used to label errors
pub fn decode_metar(raw: &str, station: &str) -> Result<ParsedMetar, DecodeError> {
    decode_with_cursors(raw, station).map(|(metar, _)| metar)
}

// same as decode_metar, also returning the token boundaries that were found
pub fn decode_with_cursors(raw: &str, station: &str) -> Result<(ParsedMetar, Cursors), DecodeError> {
    check_provider_errors(raw, station)?;

    let tokens = tokenize(raw);
    if tokens.len() < MIN_TOKENS {
        return Err(DecodeError::Incomplete {
            station: station.to_string(),
            found: tokens.len(),
            partial: PartialMetar {
                station: tokens.first().map(|t| t.to_string()),
                report_time: tokens.get(1).map(|t| t.to_string()),
            },
        });
    }

    let winds = winds_range(&tokens, station)?;
    let visibility = visibility_range(&tokens, &winds, station)?;
    let clouds_start = locate_sky_condition(&tokens);
    let conditions = conditions_range(visibility.end, clouds_start);
    let clouds = clouds_range(&tokens, clouds_start);

    let temp_index = clouds.end;
    let temp_group = token_at(&tokens, temp_index, station, "missing temperature/dew point group")?;
    let (temperature, dew_point) = split_temperature(temp_group, temp_index, station)?;
    let altimeter = token_at(&tokens, temp_index + 1, station, "missing altimeter group")?;
    let remarks = &tokens[temp_index + 2..];

    let cursors = Cursors {
        winds_start: winds.start,
        winds_end: winds.end,
        visibility_end: visibility.end,
        clouds_start,
        clouds_end: clouds.end,
    };
    debug!(station, ?cursors, tokens = tokens.len(), "decoded METAR");

    let metar = ParsedMetar {
        station: tokens[0].to_string(),
        report_time: tokens[1].to_string(),
        winds: owned(&tokens[winds]),
        visibility: tokens[visibility].join(" ").trim().to_string(),
        conditions: owned(&tokens[conditions]),
        clouds: owned(&tokens[clouds]),
        temperature: temperature.to_string(),
        dew_point: dew_point.to_string(),
        altimeter: altimeter.to_string(),
        remarks: owned(remarks),
    };

    Ok((metar, cursors))
}

pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.split_whitespace().collect()
}

// winds start at index 2, or 3 after a modifier like AUTO or CCA, and run up to
// and including the first variable direction token (180V240) anywhere after that
fn winds_range(tokens: &[&str], station: &str) -> Result<Range<usize>, DecodeError> {
    let mut start = 2;
    if tokens.get(start).is_some_and(|t| starts_with_alphabetic(t)) {
        start += 1;
    }

    let end = tokens
        .get(start..)
        .and_then(|rest| rest.iter().position(|t| is_variable_wind(t)))
        .map_or(start + 1, |offset| start + offset + 1);

    if end > tokens.len() {
        return Err(DecodeError::malformed(station, start, "missing wind group"));
    }
    Ok(start..end)
}

// visibility ends one past the first token after the wind token that ends in SM
// and starts where the winds end, or right after the wind token when a variable
// group in the remarks pushed the winds past it
fn visibility_range(
    tokens: &[&str],
    winds: &Range<usize>,
    station: &str,
) -> Result<Range<usize>, DecodeError> {
    let scan_from = winds.start + 1;
    let end = tokens
        .get(scan_from..)
        .and_then(|rest| rest.iter().position(|t| t.ends_with("SM")))
        .map(|offset| scan_from + offset + 1)
        .ok_or_else(|| {
            DecodeError::malformed(station, tokens.len(), "no visibility group ending in SM")
        })?;

    if winds.end > end {
        return Ok(scan_from..end);
    }
    Ok(winds.end..end)
}

// first token anywhere in the report with a sky condition prefix, or the token count
fn locate_sky_condition(tokens: &[&str]) -> usize {
    tokens
        .iter()
        .position(|t| is_sky_condition(t))
        .unwrap_or(tokens.len())
}

// empty at visibility_end when a sky prefix turned up before the visibility group
fn conditions_range(visibility_end: usize, clouds_start: usize) -> Range<usize> {
    visibility_end..clouds_start.max(visibility_end)
}

fn clouds_range(tokens: &[&str], clouds_start: usize) -> Range<usize> {
    let end = tokens[clouds_start..]
        .iter()
        .position(|t| is_temperature_group(t))
        .map_or(tokens.len(), |offset| clouds_start + offset);
    clouds_start..end
}

// splits 15/10 or M05/M10 into temperature and dew point, verbatim
fn split_temperature<'a>(
    group: &'a str,
    index: usize,
    station: &str,
) -> Result<(&'a str, &'a str), DecodeError> {
    match group.split_once('/') {
        Some((temperature, dew_point)) if !dew_point.contains('/') => Ok((temperature, dew_point)),
        _ => Err(DecodeError::malformed(
            station,
            index,
            "temperature group must contain exactly one '/'",
        )),
    }
}

fn token_at<'a>(
    tokens: &[&'a str],
    index: usize,
    station: &str,
    reason: &'static str,
) -> Result<&'a str, DecodeError> {
    tokens
        .get(index)
        .copied()
        .ok_or_else(|| DecodeError::malformed(station, index, reason))
}

pub fn is_sky_condition(token: &str) -> bool {
    CLOUD_PREFIXES.iter().any(|prefix| token.starts_with(prefix))
}

fn is_variable_wind(token: &str) -> bool {
    token.contains('V') && starts_with_digit(token)
}

// a leading M marks a negative temperature
fn is_temperature_group(token: &str) -> bool {
    starts_with_digit(token.strip_prefix('M').unwrap_or(token))
}

fn starts_with_alphabetic(token: &str) -> bool {
    token.chars().next().is_some_and(char::is_alphabetic)
}

fn starts_with_digit(token: &str) -> bool {
    token.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
