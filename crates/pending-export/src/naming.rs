//! Download names for rendered workbooks

use pending_utils::sanitize_filename;

const FULL_SUFFIX: &str = "_Summary_JE.xlsx";
const JOURNAL_SUFFIX: &str = "_JE_Only.xlsx";

/// Names of the two artifacts produced for one upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    /// Summary workbook with the journal entry
    pub full: String,
    /// Journal entry template only
    pub journal: String,
}

impl ArtifactNames {
    /// Build names as `<upload_id>_<stem>_Summary_JE.xlsx` and
    /// `<upload_id>_<stem>_JE_Only.xlsx`
    pub fn new(upload_id: &str, original_filename: &str) -> Self {
        let stem = upload_stem(original_filename);
        Self {
            full: format!("{}_{}{}", upload_id, stem, FULL_SUFFIX),
            journal: format!("{}_{}{}", upload_id, stem, JOURNAL_SUFFIX),
        }
    }

    /// Journal-only name paired with a summary workbook name
    pub fn journal_for(name: &str) -> Option<String> {
        if let Some(prefix) = name.strip_suffix(FULL_SUFFIX) {
            Some(format!("{}{}", prefix, JOURNAL_SUFFIX))
        } else if name.ends_with(JOURNAL_SUFFIX) {
            Some(name.to_string())
        } else {
            None
        }
    }
}

/// Sanitized file name without its extension
fn upload_stem(original_filename: &str) -> String {
    let safe = sanitize_filename(original_filename);
    let stem = match safe.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => safe.as_str(),
    };
    let stem = stem
        .split('.')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(".");
    if stem.is_empty() {
        "upload".to_string()
    } else {
        stem
    }
}
