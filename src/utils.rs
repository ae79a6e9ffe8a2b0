// checks that a station code looks like an icao identifier, e.g. CYOW or KJFK
pub fn is_valid_icao(code: &str) -> bool {
    code.len() == 4 && code.chars().all(|c| c.is_ascii_alphanumeric())
}

// renders a token sequence as a bracketed list like [RMK, SLP201]
pub fn display_list(tokens: &[String]) -> String {
    format!("[{}]", tokens.join(", "))
}

// formats a stat value for display, returns a css class and the value to show (or default if empty)
pub fn format_stat_value(value: &str, default: &str) -> (String, String) {
    if value.is_empty() {
        (" empty".to_string(), default.to_string())
    } else {
        ("".to_string(), value.to_string())
    }
}

// escapes text before it is dropped into an html page
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_icao() {
        assert!(is_valid_icao("CYOW"));
        assert!(is_valid_icao("K1G4"));
        assert!(!is_valid_icao("JFK"));
        assert!(!is_valid_icao("KJFK1"));
        assert!(!is_valid_icao("K JF"));
    }

    #[test]
    fn test_display_list() {
        let tokens = vec!["RMK".to_string(), "SLP201".to_string()];
        assert_eq!(display_list(&tokens), "[RMK, SLP201]");
        assert_eq!(display_list(&[]), "[]");
    }

    #[test]
    fn test_format_stat_value() {
        assert_eq!(format_stat_value("", "N/A"), (" empty".to_string(), "N/A".to_string()));
        assert_eq!(format_stat_value("15SM", "N/A"), ("".to_string(), "15SM".to_string()));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>&\"'"), "&lt;b&gt;&amp;&quot;&#39;");
    }
}
