//! Calibration curve text files.
//!
//! The interchange format is deliberately plain: comment lines start with
//! `*`, data lines are `frequency,level` pairs in table order. Levels are
//! the error curve an external equalizer should apply; the sign flip
//! between trims and levels happens in the store, not here.
//!
//! ```text
//! * freq(Hz) level(dB)
//! 31.5,6
//! 40,6
//! ...
//! ```

use anyhow::{Context, bail};

use oido_cal::CurveRecord;

const HEADER: &str = "* freq(Hz) level(dB)";

/// Formats records as curve file text.
pub fn to_text(records: &[CurveRecord]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&format!("{},{}\n", record.frequency, record.level_db));
    }
    out
}

/// Parses curve file text into records.
///
/// Comment lines (`*` prefix) and blank lines are skipped. Record count
/// and level validity are the store's concern; this only rejects lines
/// that do not parse as a `frequency,level` pair.
pub fn from_text(text: &str) -> anyhow::Result<Vec<CurveRecord>> {
    let mut records = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('*') {
            continue;
        }
        let Some((freq, level)) = line.split_once(',') else {
            bail!("line {}: expected 'frequency,level', got '{line}'", lineno + 1);
        };
        let frequency: f64 = freq
            .trim()
            .parse()
            .with_context(|| format!("line {}: bad frequency '{freq}'", lineno + 1))?;
        let level_db: f64 = level
            .trim()
            .parse()
            .with_context(|| format!("line {}: bad level '{level}'", lineno + 1))?;
        records.push(CurveRecord {
            frequency,
            level_db,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use oido_cal::CalibrationCurve;

    #[test]
    fn test_text_roundtrip() {
        let mut curve = CalibrationCurve::new();
        curve.set(10, 2.5).unwrap();
        curve.set(20, -4.0).unwrap();

        let text = to_text(&curve.export_records());
        let records = from_text(&text).unwrap();

        let mut restored = CalibrationCurve::flat();
        restored.import_records(&records).unwrap();
        assert_eq!(restored, curve);
    }

    #[test]
    fn test_header_and_order() {
        let curve = CalibrationCurve::flat();
        let text = to_text(&curve.export_records());
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("* freq(Hz) level(dB)"));
        assert!(lines.next().unwrap().starts_with("31.5,"));
        assert_eq!(text.lines().count(), 29);
    }

    #[test]
    fn test_comments_and_blanks_skipped() {
        let records = from_text("* a comment\n\n500,1.5\n* another\n630,-2\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].frequency, 500.0);
        assert_eq!(records[1].level_db, -2.0);
    }

    #[test]
    fn test_malformed_line_names_position() {
        let err = from_text("* ok\n500 1.5\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }
}
