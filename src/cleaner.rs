//! Heuristic cleanup of the free-form metadata Commons attaches to files.
//!
//! Every function here is total: any input, including the empty string,
//! produces a usable display string. Callers map non-string metadata values
//! to `""` before cleaning.

use regex::Regex;
use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

pub const UNKNOWN: &str = "Unknown";

const COMMONS_BASE: &str = "https://commons.wikimedia.org/";

const ENTITIES: &[(&str, &str)] = &[
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#039;", "'"),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    // last, so "&amp;lt;" decodes to "&lt;" and not "<"
    ("&amp;", "&"),
];

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"</?[^>]+(>|$)")
}

fn non_ascii_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"[^\x00-\x7F]+")
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)^\s*(title|english|object name|en)\s*:\s*")
}

fn digits_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"[0-9]+")
}

fn empty_brackets_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"[(\[][\s,;:.\-]*[)\]]")
}

// ASCII word boundaries: "1831年" still yields 1831.
fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?-u:\b)[0-9]{4}(?-u:\b)")
}

fn any_year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"[0-9]{4}")
}

fn century_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)(?-u:\b)([0-9]{1,2})(?:st|nd|rd|th) century(?-u:\b)")
}

/// Strip markup, decode the handful of entities Commons emits, and trim.
pub fn clean_text(text: &str) -> String {
    let mut out = tag_re().replace_all(text, "").into_owned();
    for (entity, replacement) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, replacement);
        }
    }
    out.trim().to_string()
}

pub fn clean_title(title: &str) -> String {
    let mut text = clean_text(title);
    while let Some(found) = label_re().find(&text) {
        text = text[found.end()..].to_string();
    }

    let text = non_ascii_re().replace_all(&text, "");
    let head = text.split([',', ';', '(']).next().unwrap_or_default();
    or_unknown(collapse_whitespace(head))
}

pub fn clean_artist_name(artist: &str) -> String {
    let text = clean_text(artist);
    let text = digits_re().replace_all(&text, "");
    let text = non_ascii_re().replace_all(&text, "");
    let text = empty_brackets_re().replace_all(&text, "");
    let text = collapse_whitespace(&text);
    let text = text.trim_matches(|c: char| c.is_whitespace() || ",;:-".contains(c));
    or_unknown(text.to_string())
}

/// Reduce a date field to a year (`1503`) or a century (`16th century`).
pub fn clean_date(date: &str) -> String {
    let text = clean_text(date);
    if let Some(year) = year_re().find(&text) {
        return year.as_str().to_string();
    }
    century_re()
        .find(&text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Whether a raw `DateTimeOriginal` value is old enough to show.
///
/// A missing date passes. Otherwise the first run of four digits must be before
/// `year_cutoff`; failing that, an "Nth century" token must name a century
/// no later than the one containing the cutoff.
pub fn is_before_cutoff(date: Option<&str>, year_cutoff: u32) -> bool {
    let text = match date.map(clean_text) {
        Some(text) if !text.is_empty() => text,
        _ => return true,
    };

    if let Some(year) = any_year_re()
        .find(&text)
        .and_then(|m| m.as_str().parse::<u32>().ok())
    {
        return year < year_cutoff;
    }

    let last_century = year_cutoff.saturating_sub(1) / 100 + 1;
    century_re()
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|n| n.as_str().parse::<u32>().ok())
        .map_or(false, |century| century <= last_century)
}

/// First http(s) link in the raw Artist markup, made absolute.
pub fn extract_artist_url(artist_html: &str) -> Option<String> {
    let fragment = Html::parse_fragment(artist_html);
    let selector = Selector::parse("a[href]").ok()?;
    let base = Url::parse(COMMONS_BASE).ok()?;

    fragment
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .find(|url| matches!(url.scheme(), "http" | "https"))
        .map(|url| url.to_string())
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn or_unknown(text: String) -> String {
    if text.is_empty() {
        UNKNOWN.to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_tags_and_entities() {
        assert_eq!(
            clean_text("  <span class=\"x\">Tom &amp; Jerry &lt;3</span> "),
            "Tom & Jerry <3"
        );
        assert_eq!(clean_text("<b>unterminated"), "unterminated");
        assert_eq!(clean_text("a<br"), "a");
        assert_eq!(clean_text("&amp;lt;"), "&lt;");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn title_drops_label_and_trailing_detail() {
        assert_eq!(clean_title("Title: Mona Lisa, oil on wood"), "Mona Lisa");
        assert_eq!(clean_title("title:The Night Watch; detail"), "The Night Watch");
        assert_eq!(clean_title("English: Title: Sunflowers (fourth version)"), "Sunflowers");
        assert_eq!(
            clean_title("<div lang=\"en\">The Milkmaid</div>"),
            "The Milkmaid"
        );
    }

    #[test]
    fn title_drops_non_ascii_runs() {
        assert_eq!(clean_title("Nuit étoilée"), "Nuit toile");
        assert_eq!(clean_title("The Great Wave 神奈川沖浪裏"), "The Great Wave");
        assert_eq!(clean_title("Мона Лиза"), UNKNOWN);
    }

    #[test]
    fn title_falls_back_to_unknown() {
        assert_eq!(clean_title(""), UNKNOWN);
        assert_eq!(clean_title("   "), UNKNOWN);
        assert_eq!(clean_title("(untitled)"), UNKNOWN);
        assert_eq!(clean_title("Title:"), UNKNOWN);
    }

    #[test]
    fn artist_strips_life_dates() {
        assert_eq!(
            clean_artist_name("<a href=\"//www.wikidata.org/wiki/Q762\">Leonardo da Vinci</a> (1452–1519)"),
            "Leonardo da Vinci"
        );
        assert_eq!(clean_artist_name("Rembrandt, 1606-1669"), "Rembrandt");
        assert_eq!(clean_artist_name("Claude Monet"), "Claude Monet");
        assert_eq!(clean_artist_name("Hokusai 葛飾北斎 (1760–1849)"), "Hokusai");
    }

    #[test]
    fn artist_falls_back_to_unknown() {
        assert_eq!(clean_artist_name(""), UNKNOWN);
        assert_eq!(clean_artist_name("1606"), UNKNOWN);
        assert_eq!(clean_artist_name("葛飾北斎"), UNKNOWN);
    }

    #[test]
    fn date_extracts_year_or_century() {
        assert_eq!(clean_date("circa 1503"), "1503");
        assert_eq!(clean_date("16th century painting"), "16th century");
        assert_eq!(clean_date("late 17TH Century"), "17TH Century");
        assert_eq!(clean_date("<time datetime=\"1889\">June 1889</time>"), "1889");
        assert_eq!(clean_date("unknown date"), UNKNOWN);
        assert_eq!(clean_date(""), UNKNOWN);
        assert_eq!(clean_date("12345"), UNKNOWN);
        assert_eq!(clean_date("1831年"), "1831");
        assert_eq!(clean_date("1503年頃"), "1503");
        assert_eq!(clean_date("16th century頃"), "16th century");
    }

    #[test]
    fn cutoff_predicate() {
        assert!(is_before_cutoff(None, 1990));
        assert!(is_before_cutoff(Some(""), 1990));
        assert!(is_before_cutoff(Some("circa 1503"), 1990));
        assert!(!is_before_cutoff(Some("2004-05-01"), 1990));
        assert!(!is_before_cutoff(Some("1990"), 1990));
        assert!(is_before_cutoff(Some("16th century"), 1990));
        assert!(is_before_cutoff(Some("20th century"), 1990));
        assert!(!is_before_cutoff(Some("21st century"), 1990));
        assert!(!is_before_cutoff(Some("undated"), 1990));
        assert!(is_before_cutoff(Some("1831年"), 1990));
        assert!(is_before_cutoff(Some("天保2年 (1831)"), 1990));
        assert!(!is_before_cutoff(Some("2001年"), 1990));
    }

    #[test]
    fn artist_url_is_resolved_against_commons() {
        assert_eq!(
            extract_artist_url("<a href=\"//www.wikidata.org/wiki/Q762\">Leonardo</a>").as_deref(),
            Some("https://www.wikidata.org/wiki/Q762")
        );
        assert_eq!(
            extract_artist_url("<a href=\"/wiki/Creator:Rembrandt\">Rembrandt</a>").as_deref(),
            Some("https://commons.wikimedia.org/wiki/Creator:Rembrandt")
        );
        assert_eq!(extract_artist_url("<a href=\"mailto:x@y.z\">x</a>"), None);
        assert_eq!(extract_artist_url("Plain name"), None);
        assert_eq!(extract_artist_url(""), None);
    }
}
