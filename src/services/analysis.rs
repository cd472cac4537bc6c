use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while analyzing uploaded content
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Unsupported content type: {0}")]
    Unsupported(String),

    #[error("Content is not valid {expected}: {message}")]
    Malformed { expected: String, message: String },
}

/// Outcome of analyzing one payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisResult {
    ImageAnalysis {
        format: String,
        size_bytes: usize,
        /// Byte entropy scaled to [0, 1], a rough proxy for image detail
        quality_score: f64,
    },
    DocumentAnalysis {
        pdf_version: Option<String>,
        page_count: usize,
        size_bytes: usize,
    },
    TextAnalysis {
        line_count: usize,
        word_count: usize,
        keywords: Vec<String>,
    },
}

/// Content analysis capability
pub trait Analyzer: Send + Sync {
    fn analyze(&self, bytes: &[u8], declared_type: &str) -> Result<AnalysisResult, AnalysisError>;
}

/// Lightweight statistical analyzer for images, PDFs and plain text
#[derive(Debug, Clone, Copy)]
pub struct StatisticsAnalyzer {
    max_keywords: usize,
}

impl StatisticsAnalyzer {
    pub fn new(max_keywords: usize) -> Self {
        Self { max_keywords }
    }
}

impl Default for StatisticsAnalyzer {
    fn default() -> Self {
        Self::new(5)
    }
}

impl Analyzer for StatisticsAnalyzer {
    fn analyze(&self, bytes: &[u8], declared_type: &str) -> Result<AnalysisResult, AnalysisError> {
        // Drop parameters such as "; charset=utf-8"
        let mime = declared_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if mime.starts_with("image/") {
            Ok(analyze_image(bytes))
        } else if mime == "application/pdf" {
            analyze_pdf(bytes)
        } else if mime == "text/plain" {
            analyze_text(bytes, self.max_keywords)
        } else {
            Err(AnalysisError::Unsupported(declared_type.to_string()))
        }
    }
}

fn analyze_image(bytes: &[u8]) -> AnalysisResult {
    let format = if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        "png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpeg"
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        "gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "webp"
    } else {
        "unknown"
    };

    AnalysisResult::ImageAnalysis {
        format: format.to_string(),
        size_bytes: bytes.len(),
        quality_score: byte_entropy(bytes) / 8.0,
    }
}

fn analyze_pdf(bytes: &[u8]) -> Result<AnalysisResult, AnalysisError> {
    if !bytes.starts_with(b"%PDF-") {
        return Err(AnalysisError::Malformed {
            expected: "PDF".to_string(),
            message: "missing %PDF- header".to_string(),
        });
    }

    let header_end = bytes
        .iter()
        .position(|b| *b == b'\n' || *b == b'\r')
        .unwrap_or(bytes.len());
    let pdf_version = std::str::from_utf8(&bytes[5..header_end])
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    Ok(AnalysisResult::DocumentAnalysis {
        pdf_version,
        page_count: count_page_objects(bytes),
        size_bytes: bytes.len(),
    })
}

/// Counts `/Type /Page` objects, skipping `/Type /Pages` tree nodes
fn count_page_objects(bytes: &[u8]) -> usize {
    let text = String::from_utf8_lossy(bytes);
    let mut count = 0;
    let mut rest = text.as_ref();

    while let Some(pos) = rest.find("/Type") {
        rest = &rest[pos + "/Type".len()..];
        let value = rest.trim_start();
        if let Some(after) = value.strip_prefix("/Page") {
            if !after.starts_with('s') {
                count += 1;
            }
        }
    }

    count
}

fn analyze_text(bytes: &[u8], max_keywords: usize) -> Result<AnalysisResult, AnalysisError> {
    let text = std::str::from_utf8(bytes).map_err(|e| AnalysisError::Malformed {
        expected: "UTF-8 text".to_string(),
        message: e.to_string(),
    })?;

    let words: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|w| w.chars().count() >= 3)
        .map(|w| w.to_lowercase())
        .collect();

    let mut frequencies: HashMap<&str, usize> = HashMap::new();
    for word in &words {
        *frequencies.entry(word.as_str()).or_default() += 1;
    }

    // Most frequent first, alphabetical among equals
    let mut ranked: Vec<(&str, usize)> = frequencies.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    Ok(AnalysisResult::TextAnalysis {
        line_count: text.lines().count(),
        word_count: text.split_whitespace().count(),
        keywords: ranked
            .into_iter()
            .take(max_keywords)
            .map(|(word, _)| word.to_string())
            .collect(),
    })
}

/// Shannon entropy of the byte distribution, in bits (0..=8)
fn byte_entropy(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }

    let mut histogram = [0usize; 256];
    for byte in bytes {
        histogram[*byte as usize] += 1;
    }

    let total = bytes.len() as f64;
    histogram
        .iter()
        .filter(|count| **count > 0)
        .map(|count| {
            let p = *count as f64 / total;
            -p * p.log2()
        })
        .sum()
}
