//! Tests for decoder module

use super::*;
use crate::error::Error;
use crate::types::Record;
use pretty_assertions::assert_eq;

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs.iter().copied().collect()
}

// ============================================================================
// DecoderFormat Tests
// ============================================================================

#[test]
fn test_decoder_format_default() {
    assert_eq!(DecoderFormat::default(), DecoderFormat::Csv);
}

#[test]
fn test_decoder_format_parse() {
    assert_eq!("csv".parse::<DecoderFormat>().unwrap(), DecoderFormat::Csv);
    assert_eq!("JSON".parse::<DecoderFormat>().unwrap(), DecoderFormat::Json);
    assert!(matches!(
        "xml".parse::<DecoderFormat>(),
        Err(Error::InvalidConfigValue { .. })
    ));
    assert_eq!(DecoderFormat::Json.to_string(), "json");
}

#[test]
fn test_decoder_for() {
    assert_eq!(decoder_for(DecoderFormat::Csv, None).format(), DecoderFormat::Csv);
    assert_eq!(
        decoder_for(DecoderFormat::Json, Some("categories")).format(),
        DecoderFormat::Json
    );
}

// ============================================================================
// CSV Decoder Tests
// ============================================================================

#[test]
fn test_csv_decoder_single_row() {
    let decoder = CsvDecoder::new();
    let page = decoder.decode("postKey,title\np1,Hello world\n").unwrap();

    assert_eq!(page.len(), 1);
    let only = &page.records[0];
    assert_eq!(only.keys().collect::<Vec<_>>(), vec!["postKey", "title"]);
    assert_eq!(only, &record(&[("postKey", "p1"), ("title", "Hello world")]));
}

#[test]
fn test_csv_decoder_keeps_values_as_strings() {
    let decoder = CsvDecoder::new();
    let page = decoder.decode("replyCount,closed\n007,true\n").unwrap();

    assert_eq!(page.records[0].get("replyCount"), Some("007"));
    assert_eq!(page.records[0].get("closed"), Some("true"));
}

#[test]
fn test_csv_decoder_quoted_fields() {
    let decoder = CsvDecoder::new();
    let body = "postKey,title,textPlain\r\n\
                p1,\"Hello, world\",\"She said \"\"hi\"\"\"\r\n\
                p2,\"Multi\nline\",\"\"\r\n";

    let page = decoder.decode(body).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.records[0].get("title"), Some("Hello, world"));
    assert_eq!(page.records[0].get("textPlain"), Some("She said \"hi\""));
    assert_eq!(page.records[1].get("title"), Some("Multi\nline"));
    assert_eq!(page.records[1].get("textPlain"), Some(""));
}

#[test]
fn test_csv_decoder_skips_blank_lines_and_bom() {
    let decoder = CsvDecoder::new();
    let body = "\u{feff}name,path\n\nGeneral,/general\n\nIdeas,/ideas";

    let page = decoder.decode(body).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.records[0].keys().next(), Some("name"));
    assert_eq!(page.records[1].get("path"), Some("/ideas"));
}

#[test]
fn test_csv_decoder_quote_inside_unquoted_field_is_literal() {
    let decoder = CsvDecoder::new();
    let page = decoder
        .decode("postKey,title\np1,27\" monitor\np2,ok\n")
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.records[0], record(&[("postKey", "p1"), ("title", "27\" monitor")]));
    assert_eq!(page.records[1], record(&[("postKey", "p2"), ("title", "ok")]));
}

#[test]
fn test_csv_decoder_text_after_closing_quote() {
    let decoder = CsvDecoder::new();
    let page = decoder.decode("a,b\n\"x\"y\"z,2\n").unwrap();
    assert_eq!(page.records[0], record(&[("a", "xy\"z"), ("b", "2")]));
}

#[test]
fn test_csv_decoder_keeps_quoted_empty_row() {
    let decoder = CsvDecoder::new();
    let page = decoder.decode("name\nGeneral\n\"\"\n\nIdeas\n").unwrap();

    let names: Vec<_> = page.records.iter().map(|r| r.get("name").unwrap()).collect();
    assert_eq!(names, vec!["General", "", "Ideas"]);
}

#[test]
fn test_csv_decoder_pads_short_rows() {
    let decoder = CsvDecoder::new();
    let page = decoder.decode("a,b,c\n1,2\n").unwrap();

    assert_eq!(page.records[0], record(&[("a", "1"), ("b", "2"), ("c", "")]));
}

#[test]
fn test_csv_decoder_rejects_long_rows() {
    let decoder = CsvDecoder::new();
    let err = decoder.decode("a,b\n1,2,3\n").unwrap_err();
    assert!(matches!(err, Error::CsvParse { .. }));
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn test_csv_decoder_unterminated_quote() {
    let decoder = CsvDecoder::new();
    let err = decoder.decode("a,b\n\"open,2\n").unwrap_err();
    assert!(matches!(err, Error::CsvParse { .. }));
}

#[test]
fn test_csv_decoder_empty_body() {
    let decoder = CsvDecoder::new();
    assert!(decoder.decode("").unwrap().is_empty());
    assert!(decoder.decode("postKey,title\n").unwrap().is_empty());
}

#[test]
fn test_csv_decoder_custom_delimiter() {
    let decoder = CsvDecoder::with_delimiter(';');
    let page = decoder.decode("a;b\n1;2\n").unwrap();
    assert_eq!(page.records[0], record(&[("a", "1"), ("b", "2")]));
}

// ============================================================================
// JSON Decoder Tests
// ============================================================================

#[test]
fn test_json_decoder_named_field() {
    let decoder = JsonDecoder::with_field("categories");
    let body = r#"{"categories": [
        {"name": "General", "type": "forum", "categoryKey": "c1"},
        {"name": "Ideas", "type": "ideas", "categoryKey": "c2"}
    ]}"#;

    let page = decoder.decode(body).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(
        page.records[0],
        record(&[("name", "General"), ("type", "forum"), ("categoryKey", "c1")])
    );
}

#[test]
fn test_json_decoder_flattens_nested_objects() {
    let decoder = JsonDecoder::with_field("posts");
    let body = r#"{"posts": [{
        "postKey": "p1",
        "author": {"name": "Ann", "userKey": "u1"},
        "replyCount": 3,
        "pinned": false,
        "parentKey": null,
        "tags": ["a", "b"]
    }]}"#;

    let page = decoder.decode(body).unwrap();
    let post = &page.records[0];
    assert_eq!(post.get("author.name"), Some("Ann"));
    assert_eq!(post.get("author.userKey"), Some("u1"));
    assert_eq!(post.get("replyCount"), Some("3"));
    assert_eq!(post.get("pinned"), Some("false"));
    assert_eq!(post.get("parentKey"), Some(""));
    assert_eq!(post.get("tags"), Some(r#"["a","b"]"#));
}

#[test]
fn test_json_decoder_missing_field_is_empty_page() {
    let decoder = JsonDecoder::with_field("categories");
    let page = decoder.decode(r#"{"error": null, "total": 0}"#).unwrap();
    assert!(page.is_empty());
}

#[test]
fn test_json_decoder_field_not_array() {
    let decoder = JsonDecoder::with_field("categories");
    let err = decoder.decode(r#"{"categories": "nope"}"#).unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}

#[test]
fn test_json_decoder_top_level_array() {
    let decoder = JsonDecoder::new();
    let page = decoder.decode(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page.records[1].get("id"), Some("2"));
}

#[test]
fn test_json_decoder_non_object_items() {
    let decoder = JsonDecoder::new();
    assert!(decoder.decode("[1, 2]").is_err());
}

#[test]
fn test_json_decoder_invalid_json() {
    let decoder = JsonDecoder::with_field("posts");
    let err = decoder.decode("postKey,title\np1,x").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
}
