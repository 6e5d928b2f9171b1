use super::*;
use crate::document::Document;
use serde_json::json;

fn record(url: &str, load_time: i64) -> ResultRecord {
    let mut view = Document::new();
    view.insert("loadTime".to_owned(), json!(load_time));
    view.insert("firstContentfulPaint".to_owned(), json!(512));
    view.insert("docTime".to_owned(), json!(1_024));
    ResultRecord::new(view, url.to_owned())
}

#[test]
fn text_report_lists_each_timing() -> Result<(), String> {
    let output = render_single(&[record("https://www.example.com", 800)], OutputFormat::Text)
        .map_err(|err| err.to_string())?;
    let expected = "View https://www.example.com (run 1):\n  Load Time: 0.800\n  \
                    First Contentful Paint: 0.512\n  Document Complete Time: 1.024\n  \
                    Fully Loaded Time: 0.000\n";
    if output != expected {
        return Err(format!("Unexpected output:\n{}", output));
    }
    Ok(())
}

#[test]
fn json_report_uses_decimal_strings() -> Result<(), String> {
    let output = render_single(
        &[record("a", 800), record("a", 1_500)],
        OutputFormat::Json,
    )
    .map_err(|err| err.to_string())?;
    let parsed: serde_json::Value =
        serde_json::from_str(&output).map_err(|err| format!("invalid json: {}", err))?;
    let expected = json!([
        {"run": 1, "url": "a", "load_time": "0.800", "first_contentful_paint": "0.512",
         "doc_time": "1.024", "fully_loaded": "0.000"},
        {"run": 2, "url": "a", "load_time": "1.500", "first_contentful_paint": "0.512",
         "doc_time": "1.024", "fully_loaded": "0.000"}
    ]);
    if parsed != expected {
        return Err(format!("Unexpected json: {}", output));
    }
    Ok(())
}

#[test]
fn comparative_report_interleaves_pages() -> Result<(), String> {
    let pairs = [ComparativeResultRecord::new(record("a", 100), record("b", 200))];
    let text = render_comparative(&pairs, OutputFormat::Text).map_err(|err| err.to_string())?;
    let first = text.find("View a (run 1):");
    let second = text.find("View b (run 1):");
    match (first, second) {
        (Some(first), Some(second)) if first < second => {}
        other => return Err(format!("Unexpected layout {:?}:\n{}", other, text)),
    }

    let json = render_comparative(&pairs, OutputFormat::Json).map_err(|err| err.to_string())?;
    let parsed: serde_json::Value =
        serde_json::from_str(&json).map_err(|err| format!("invalid json: {}", err))?;
    if parsed.pointer("/0/second/load_time") != Some(&json!("0.200")) {
        return Err(format!("Unexpected json: {}", json));
    }
    Ok(())
}

#[test]
fn empty_results_render_empty() -> Result<(), String> {
    let text = render_single(&[], OutputFormat::Text).map_err(|err| err.to_string())?;
    let json = render_comparative(&[], OutputFormat::Json).map_err(|err| err.to_string())?;
    if !text.is_empty() || json != "[]" {
        return Err(format!("Unexpected output: {:?} / {:?}", text, json));
    }
    Ok(())
}
