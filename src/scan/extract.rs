//! Per-file metadata extraction

use crate::domain::FileRecord;
use crate::scan::walker::Candidate;
use crate::utils::read_file_safe;

/// Read a candidate and build its record. Returns `None` when the file cannot
/// be read; the caller drops it and carries on.
pub fn extract_record(candidate: &Candidate) -> Option<FileRecord> {
    match read_file_safe(&candidate.absolute_path) {
        Ok((content, encoding)) => {
            if encoding != encoding_rs::UTF_8 {
                tracing::debug!(
                    path = %candidate.relative_path,
                    encoding = encoding.name(),
                    "decoded non-UTF-8 file"
                );
            }
            Some(FileRecord::new(
                candidate.relative_path.clone(),
                candidate.absolute_path.clone(),
                content,
            ))
        }
        Err(err) => {
            tracing::warn!(path = %candidate.relative_path, "skipping unreadable file: {err}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::extract_record;
    use crate::scan::walker::Candidate;
    use std::fs;
    use tempfile::TempDir;

    fn candidate(dir: &TempDir, rel: &str) -> Candidate {
        Candidate { absolute_path: dir.path().join(rel), relative_path: rel.to_string() }
    }

    #[test]
    fn computes_metrics_from_decoded_content() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("a.py"), "x".repeat(40)).expect("write");

        let record = extract_record(&candidate(&tmp, "a.py")).expect("record");
        assert_eq!(record.size_bytes(), 40);
        assert_eq!(record.estimated_tokens(), 10);
        assert_eq!(record.line_count(), 1);
        assert_eq!(record.relative_path(), "a.py");
    }

    #[test]
    fn undecodable_bytes_are_replaced_not_fatal() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("blob"), b"\x00\x80\x81 abc\n").expect("write");

        let record = extract_record(&candidate(&tmp, "blob")).expect("record");
        assert!(record.content().ends_with("abc\n"));
        assert_eq!(record.line_count(), 2);
    }

    #[test]
    fn missing_file_is_dropped() {
        let tmp = TempDir::new().expect("tmp");
        assert!(extract_record(&candidate(&tmp, "gone.py")).is_none());
    }
}
