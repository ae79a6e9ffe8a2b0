use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use crate::error::{DecodeError, MetarError};
use crate::models::{AppState, MetarQuery, ParsedMetar};
use crate::services::{normalize_station, retrieve_metar, Fetcher};
use crate::utils::{display_list, escape_html, format_stat_value, is_valid_icao};

const INVALID_ICAO: &str = "ICAO codes should be 4 characters (e.g., KJFK, EGLL, YSSY)";

// serves the home page with the search form
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../templates/index.html"))
}

// handles requests to fetch and display metar data for an airport
pub async fn fetch_metar_handler<F: Fetcher>(
    State(state): State<Arc<AppState<F>>>,
    Query(params): Query<MetarQuery>,
) -> Response {
    let icao = normalize_station(&params.icao);

    if !is_valid_icao(&icao) {
        return (StatusCode::BAD_REQUEST, Html(error_page(INVALID_ICAO))).into_response();
    }

    match retrieve_metar(&state.fetcher, &icao).await {
        Ok(metar) => {
            info!(station = %icao, "serving METAR page");
            Html(format_results_page(&metar)).into_response()
        }
        Err(e) => {
            warn!(station = %icao, error = %e, "METAR request failed");
            let message = format!("Error fetching METAR: {}", e);
            (status_for(&e), Html(error_page(&message))).into_response()
        }
    }
}

// same lookup as the page, answered as json
pub async fn api_metar_handler<F: Fetcher>(
    State(state): State<Arc<AppState<F>>>,
    Query(params): Query<MetarQuery>,
) -> Response {
    let icao = normalize_station(&params.icao);

    if !is_valid_icao(&icao) {
        return error_json(StatusCode::BAD_REQUEST, INVALID_ICAO);
    }

    match retrieve_metar(&state.fetcher, &icao).await {
        Ok(metar) => Json(metar).into_response(),
        Err(e) => {
            warn!(station = %icao, error = %e, "METAR api request failed");
            error_json(status_for(&e), &e.to_string())
        }
    }
}

pub fn status_for(error: &MetarError) -> StatusCode {
    match error {
        MetarError::Fetch(_) => StatusCode::BAD_GATEWAY,
        MetarError::Decode(DecodeError::StationNotFound { .. }) => StatusCode::NOT_FOUND,
        MetarError::Decode(DecodeError::ReportUnavailable { .. }) => StatusCode::SERVICE_UNAVAILABLE,
        MetarError::Decode(DecodeError::Incomplete { .. })
        | MetarError::Decode(DecodeError::MalformedReport { .. }) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn error_json(status: StatusCode, message: &str) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

fn error_page(message: &str) -> String {
    include_str!("../templates/error.html").replace("{{ERROR}}", &escape_html(message))
}

// builds the html page that shows all the decoded metar fields
pub fn format_results_page(metar: &ParsedMetar) -> String {
    let conditions = if metar.conditions.is_empty() {
        String::new()
    } else {
        display_list(&metar.conditions)
    };
    let remarks = if metar.remarks.is_empty() {
        String::new()
    } else {
        display_list(&metar.remarks)
    };

    let rows = [
        ("Station", metar.station.clone(), "N/A"),
        ("Report Time", metar.report_time.clone(), "N/A"),
        ("Winds", display_list(&metar.winds), "N/A"),
        ("Visibility", metar.visibility.clone(), "N/A"),
        ("Conditions", conditions, "None"),
        ("Clouds", display_list(&metar.clouds), "N/A"),
        ("Temperature", metar.temperature.clone(), "N/A"),
        ("Dewpoint", metar.dew_point.clone(), "N/A"),
        ("Altimeter", metar.altimeter.clone(), "N/A"),
        ("Remarks", remarks, "None"),
    ];

    let mut stats = String::new();
    for (label, value, default) in rows {
        let (class, value) = format_stat_value(&value, default);
        stats.push_str(&format!(
            r#"        <div class="stat-row">
            <span class="stat-label">{}:</span>
            <span class="stat-value{}">{}</span>
        </div>
"#,
            label,
            class,
            escape_html(&value)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - METAR</title>
    <style>
        body {{
            font-family: monospace;
            max-width: 800px;
            margin: 50px auto;
            padding: 20px;
            line-height: 1.6;
        }}
        .stat-row {{
            margin: 15px 0;
            padding: 10px 0;
            border-bottom: 1px solid #ddd;
        }}
        .stat-label {{
            font-weight: bold;
            display: inline-block;
            width: 150px;
        }}
        .stat-value.empty {{
            color: #999;
            font-style: italic;
        }}
    </style>
</head>
<body>
    <h1><a href="/" style="text-decoration: none;">metar-decode</a></h1>
    <div class="stats">
{}    </div>
    <p><a href="/">Back to home</a></p>
</body>
</html>
"#,
        escape_html(&metar.station),
        stats
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn sample() -> ParsedMetar {
        ParsedMetar {
            station: "CYOW".to_string(),
            report_time: "211800Z".to_string(),
            winds: vec!["28008KT".to_string()],
            visibility: "15SM".to_string(),
            clouds: vec!["FEW250".to_string()],
            temperature: "15".to_string(),
            dew_point: "10".to_string(),
            altimeter: "A3012".to_string(),
            remarks: vec!["RMK".to_string(), "SLP201".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_results_page_lists_fields() {
        let page = format_results_page(&sample());

        assert!(page.contains("[28008KT]"));
        assert!(page.contains("[RMK, SLP201]"));
        assert!(page.contains("A3012"));
        // no conditions reported
        assert!(page.contains(r#"<span class="stat-value empty">None</span>"#));
    }

    #[test]
    fn test_status_mapping() {
        let not_found = MetarError::Decode(DecodeError::StationNotFound {
            station: "ZZZZ".to_string(),
        });
        assert_eq!(status_for(&not_found), StatusCode::NOT_FOUND);

        let unavailable = MetarError::Decode(DecodeError::ReportUnavailable {
            station: "CYOW".to_string(),
        });
        assert_eq!(status_for(&unavailable), StatusCode::SERVICE_UNAVAILABLE);

        let malformed = MetarError::Decode(DecodeError::MalformedReport {
            station: "CYOW".to_string(),
            index: 6,
            reason: "missing altimeter group",
        });
        assert_eq!(status_for(&malformed), StatusCode::UNPROCESSABLE_ENTITY);

        let fetch = MetarError::Fetch(FetchError::MissingApiKey);
        assert_eq!(status_for(&fetch), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_page_escapes_message() {
        let page = error_page("<script>");
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("{{ERROR}}"));
    }
}
