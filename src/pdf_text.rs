use std::collections::BTreeMap;
use std::path::Path;

use encoding_rs::UTF_16BE;
use lopdf::Document;
use lopdf::Object;
use lopdf::content::Content;
use tracing::debug;

use crate::error::ExtractError;
use crate::pages::PageSelection;
use crate::warning::{ExtractWarning, WarningCode};

/// pdf-extract delimits pages with form feeds in its whole-document output.
fn split_text_into_pages(raw_text: &str) -> Vec<String> {
    let mut pages = raw_text
        .split('\u{000C}')
        .map(str::to_string)
        .collect::<Vec<_>>();
    if pages.last().is_some_and(String::is_empty) {
        pages.pop();
    }
    pages
}

fn looks_decoding_broken(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }

    if text.contains("?Identity-H Unimplemented?") {
        return true;
    }

    let total = text.chars().count();
    let replacement = text.matches('\u{FFFD}').count();
    let control = text
        .chars()
        .filter(|ch| ch.is_control() && !matches!(ch, '\n' | '\r' | '\t'))
        .count();

    replacement * 8 > total || control * 5 > total
}

fn decode_pdf_bytes(encoding: Option<&str>, bytes: &[u8]) -> String {
    let decoded = Document::decode_text(encoding, bytes);
    if !looks_decoding_broken(&decoded) {
        return decoded;
    }

    if bytes.starts_with(&[0xFE, 0xFF]) || bytes.starts_with(&[0xFF, 0xFE]) {
        let bytes = if bytes.len() > 2 { &bytes[2..] } else { bytes };
        let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
        if !had_errors && !utf16.is_empty() {
            return utf16.into_owned();
        }
    }

    if let Some(name) = encoding {
        let lower = name.to_ascii_lowercase();
        if lower.contains("utf16")
            || lower.contains("ucs2")
            || lower.contains("identity-h")
            || lower.contains("unicode")
        {
            let (utf16, had_errors) = UTF_16BE.decode_without_bom_handling(bytes);
            if !had_errors && !utf16.is_empty() {
                return utf16.into_owned();
            }
        }
    }

    String::from_utf8_lossy(bytes).to_string()
}

/// Ranks extraction candidates for one page. Roster pages are line-oriented
/// prose, so the signals are line count plus the presence of field-shaped
/// lines, with a heavy penalty for broken decoding.
fn extraction_quality_score(text: &str) -> i64 {
    if text.trim().is_empty() {
        return i64::MIN / 4;
    }

    let mut non_empty_lines = 0_i64;
    let mut field_like_lines = 0_i64;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        non_empty_lines += 1;
        if line.contains('@') || line.contains(", ") || line.contains("MCUT-") {
            field_like_lines += 1;
        }
    }

    let broken_penalty = if looks_decoding_broken(text) { 800 } else { 0 };
    field_like_lines * 40 + non_empty_lines - broken_penalty
}

fn choose_best_text(candidates: &[String]) -> Option<String> {
    candidates
        .iter()
        .max_by_key(|text| extraction_quality_score(text))
        .filter(|text| !text.trim().is_empty())
        .cloned()
}

fn extract_text_from_page_content(document: &Document, page_id: lopdf::ObjectId) -> Option<String> {
    fn collect_text(text: &mut String, encoding: Option<&str>, operands: &[Object]) {
        for operand in operands {
            match operand {
                Object::String(bytes, _) => {
                    text.push_str(&decode_pdf_bytes(encoding, bytes));
                }
                Object::Array(items) => {
                    collect_text(text, encoding, items);
                    text.push(' ');
                }
                Object::Integer(value) => {
                    // Large negative kerning adjustments separate words.
                    if *value < -100 {
                        text.push(' ');
                    }
                }
                _ => {}
            }
        }
    }

    let raw_content = document.get_page_content(page_id).ok()?;
    let content = Content::decode(&raw_content).ok()?;
    let encodings = document
        .get_page_fonts(page_id)
        .into_iter()
        .map(|(name, font)| (name, font.get_font_encoding()))
        .collect::<BTreeMap<Vec<u8>, &str>>();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_encoding = None;
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                if let Some(font_name) = operation
                    .operands
                    .first()
                    .and_then(|operand| operand.as_name().ok())
                {
                    current_encoding = encodings.get(font_name).copied();
                }
            }
            "Tj" | "TJ" | "'" | "\"" => {
                collect_text(&mut current, current_encoding, &operation.operands);
            }
            "T*" | "Td" | "TD" | "ET" => {
                if !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
            }
            _ => {}
        }
    }

    if !current.trim().is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        None
    } else {
        Some(lines.join("\n"))
    }
}

fn extract_selected(
    document: &Document,
    whole_document_text: Option<&str>,
    selection: Option<&PageSelection>,
) -> (Option<String>, Vec<ExtractWarning>) {
    let pages_map = document.get_pages();
    let per_page_fallback = whole_document_text
        .map(split_text_into_pages)
        .filter(|pages| pages.len() == pages_map.len());

    let requested = match selection {
        Some(selection) => selection.iter().collect::<Vec<_>>(),
        None => pages_map.keys().copied().collect::<Vec<_>>(),
    };

    let mut warnings = Vec::new();
    let mut fragments = Vec::new();

    for page_no in requested {
        let Some(page_id) = pages_map.get(&page_no) else {
            debug!(page = page_no, "requested page is out of range");
            warnings.push(
                ExtractWarning::new(
                    WarningCode::PageOutOfRange,
                    format!("page {page_no} is out of range"),
                )
                .with_page(page_no),
            );
            continue;
        };

        let mut candidates = Vec::new();
        if let Some(text) = per_page_fallback
            .as_ref()
            .and_then(|pages| pages.get(page_no as usize - 1))
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text.clone());
        }
        if let Some(text) = extract_text_from_page_content(document, *page_id) {
            candidates.push(text);
        }
        if let Some(text) = document
            .extract_text(&[page_no])
            .ok()
            .filter(|text| !text.trim().is_empty())
        {
            candidates.push(text);
        }

        match choose_best_text(&candidates) {
            Some(text) => fragments.push(text),
            None => {
                warnings.push(
                    ExtractWarning::new(
                        WarningCode::EmptyPageText,
                        format!("page {page_no} yielded no extractable text"),
                    )
                    .with_page(page_no),
                );
            }
        }
    }

    let joined = fragments.join("\n");
    let trimmed = joined.trim();
    let text = if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    };
    (text, warnings)
}

pub(crate) fn read_roster_text(
    input_pdf: &Path,
    selection: Option<&PageSelection>,
) -> Result<(Option<String>, Vec<ExtractWarning>), ExtractError> {
    let document = Document::load(input_pdf)?;
    let whole = pdf_extract::extract_text(input_pdf).ok();
    Ok(extract_selected(&document, whole.as_deref(), selection))
}

pub(crate) fn read_roster_text_from_bytes(
    input_pdf: &[u8],
    selection: Option<&PageSelection>,
) -> Result<(Option<String>, Vec<ExtractWarning>), ExtractError> {
    let document = Document::load_mem(input_pdf)?;
    let whole = pdf_extract::extract_text_from_mem(input_pdf).ok();
    Ok(extract_selected(&document, whole.as_deref(), selection))
}
