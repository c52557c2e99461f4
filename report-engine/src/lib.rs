//! Report artifacts for completed pipeline runs.
//!
//! Two artifacts are produced from a run's `(input text, extracted data,
//! diagnosis)` triple:
//!
//! - a paginated PDF report with three labeled sections, laid out by
//!   [`layout`] and drawn by [`pdf`] with the built-in Helvetica fonts;
//! - the diagnosis serialized as pretty-printed JSON for download.
//!
//! Layout is deliberately separate from rendering: the page breaks and the
//! 1000-character line truncation are plain arithmetic, tested without
//! touching PDF bytes.

pub mod error;
pub mod layout;
pub mod pdf;

pub use error::*;
pub use layout::*;

use serde_json::Value;

/// Title printed at the top of every report.
pub const REPORT_TITLE: &str = "Automated Medical Report";

/// Filename offered for the PDF download.
pub const REPORT_PDF_FILENAME: &str = "medical_report.pdf";

/// Filename offered for the diagnosis download.
pub const DIAGNOSIS_JSON_FILENAME: &str = "diagnosis.json";

/// Section labels, in render order.
pub const SECTION_PROCESSED_TEXT: &str = "Processed Text:";
pub const SECTION_EXTRACTED: &str = "Extracted Medical Information:";
pub const SECTION_DIAGNOSIS: &str = "Diagnosis:";

/// Lay out the three report sections for one run.
///
/// The extraction and diagnosis payloads are pretty-printed the same way the
/// JSON export is, so the PDF shows the exact downloadable text.
pub fn report_layout(
    input_text: &str,
    extracted_data: &Value,
    diagnosis: &Value,
) -> ReportResult<ReportLayout> {
    let sections = [
        Section::new(SECTION_PROCESSED_TEXT, input_text),
        Section::new(SECTION_EXTRACTED, serde_json::to_string_pretty(extracted_data)?),
        Section::new(SECTION_DIAGNOSIS, serde_json::to_string_pretty(diagnosis)?),
    ];
    Ok(layout::paginate(REPORT_TITLE, &sections))
}

/// Render the full PDF report for one run.
pub fn render_report(
    input_text: &str,
    extracted_data: &Value,
    diagnosis: &Value,
) -> ReportResult<Vec<u8>> {
    let layout = report_layout(input_text, extracted_data, diagnosis)?;
    pdf::render(&layout)
}

/// The diagnosis serialized for download, pretty-printed.
pub fn diagnosis_json(diagnosis: &Value) -> ReportResult<Vec<u8>> {
    Ok(serde_json::to_string_pretty(diagnosis)?.into_bytes())
}
