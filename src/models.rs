use serde::{Deserialize, Serialize};

use crate::services::Fetcher;

pub struct AppState<F> {
    pub fetcher: F,
}

// a metar split into the fields the decoder recognises, tokens kept verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMetar {
    pub station: String,
    pub report_time: String,
    pub winds: Vec<String>,
    pub visibility: String,
    pub conditions: Vec<String>,
    pub clouds: Vec<String>,
    pub temperature: String,
    pub dew_point: String,
    pub altimeter: String,
    pub remarks: Vec<String>,
}

// token boundaries found while decoding one report. a variable group in the
// remarks can put winds_end past visibility_end, and a station with a sky prefix
// can put clouds_start before it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursors {
    pub winds_start: usize,
    pub winds_end: usize,
    pub visibility_end: usize,
    pub clouds_start: usize,
    pub clouds_end: usize,
}

// whatever could be read from a report too short to decode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialMetar {
    pub station: Option<String>,
    pub report_time: Option<String>,
}

#[derive(Deserialize)]
pub struct MetarQuery {
    pub icao: String,
}

impl<F: Fetcher> AppState<F> {
    pub fn new(fetcher: F) -> Self {
        AppState { fetcher }
    }
}
