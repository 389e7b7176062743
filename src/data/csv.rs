//! CSV parsing and writing for per-user records.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::DataError;
use crate::types::{Arm, RawRecord};

const HEADER: &str = "arm,converted,retained_day7,engagement_score";

/// Load per-user records from a CSV file.
///
/// Expects the `arm,converted,retained_day7,engagement_score` header;
/// arm labels and booleans are case-insensitive, booleans also accept
/// `1`/`0`. Blank lines are skipped.
///
/// # Errors
///
/// Returns [`DataError`] with a 1-indexed line number for malformed
/// rows, and [`DataError::MissingArm`] if an arm has no rows at all.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, DataError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    let mut seen_control = false;
    let mut seen_treatment = false;

    for (index, line_result) in reader.lines().enumerate() {
        let line_num = index + 1;
        let line = line_result?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if index == 0 {
            if !line.eq_ignore_ascii_case(HEADER) {
                return Err(DataError::Parse {
                    line: line_num,
                    message: format!("expected header {:?}, got {:?}", HEADER, line),
                });
            }
            continue;
        }

        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != 4 {
            return Err(DataError::Parse {
                line: line_num,
                message: format!("expected 4 columns, got {}", cells.len()),
            });
        }

        let arm = parse_arm(cells[0], line_num)?;
        let converted = parse_bool(cells[1], "converted", line_num)?;
        let retained_day7 = parse_bool(cells[2], "retained_day7", line_num)?;
        let engagement_score: f64 =
            cells[3].parse().map_err(|_| DataError::InvalidValue {
                line: line_num,
                column: "engagement_score",
                value: cells[3].to_string(),
            })?;
        if !engagement_score.is_finite() || engagement_score < 0.0 {
            return Err(DataError::InvalidValue {
                line: line_num,
                column: "engagement_score",
                value: cells[3].to_string(),
            });
        }

        match arm {
            Arm::Control => seen_control = true,
            Arm::Treatment => seen_treatment = true,
        }
        records.push(RawRecord {
            arm,
            converted,
            retained_day7,
            engagement_score,
        });
    }

    if !seen_control {
        return Err(DataError::MissingArm { arm: Arm::Control });
    }
    if !seen_treatment {
        return Err(DataError::MissingArm { arm: Arm::Treatment });
    }

    Ok(records)
}

/// Write per-user records to a CSV file, header included.
pub fn write_records(path: &Path, records: &[RawRecord]) -> Result<(), DataError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", HEADER)?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{}",
            record.arm, record.converted, record.retained_day7, record.engagement_score
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn parse_arm(cell: &str, line: usize) -> Result<Arm, DataError> {
    if cell.eq_ignore_ascii_case("control") {
        Ok(Arm::Control)
    } else if cell.eq_ignore_ascii_case("treatment") {
        Ok(Arm::Treatment)
    } else {
        Err(DataError::InvalidValue {
            line,
            column: "arm",
            value: cell.to_string(),
        })
    }
}

fn parse_bool(cell: &str, column: &'static str, line: usize) -> Result<bool, DataError> {
    if cell.eq_ignore_ascii_case("true") || cell == "1" {
        Ok(true)
    } else if cell.eq_ignore_ascii_case("false") || cell == "0" {
        Ok(false)
    } else {
        Err(DataError::InvalidValue {
            line,
            column,
            value: cell.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_well_formed_file() {
        let file = write_temp(
            "arm,converted,retained_day7,engagement_score\n\
             control,true,false,287.44\n\
             treatment,0,1,301.02\n",
        );
        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].arm, Arm::Control);
        assert!(records[0].converted);
        assert!(!records[0].retained_day7);
        assert_eq!(records[1].arm, Arm::Treatment);
        assert!(records[1].retained_day7);
    }

    #[test]
    fn rejects_bad_header() {
        let file = write_temp("user,group\ncontrol,1\n");
        assert!(matches!(
            load_records(file.path()),
            Err(DataError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_unknown_arm_with_line_number() {
        let file = write_temp(
            "arm,converted,retained_day7,engagement_score\nvariant_b,true,false,1.0\n",
        );
        match load_records(file.path()) {
            Err(DataError::InvalidValue { line, column, value }) => {
                assert_eq!(line, 2);
                assert_eq!(column, "arm");
                assert_eq!(value, "variant_b");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn rejects_negative_engagement() {
        let file = write_temp(
            "arm,converted,retained_day7,engagement_score\ncontrol,true,false,-1.0\n",
        );
        assert!(matches!(
            load_records(file.path()),
            Err(DataError::InvalidValue { column: "engagement_score", .. })
        ));
    }

    #[test]
    fn missing_arm_is_reported() {
        let file = write_temp(
            "arm,converted,retained_day7,engagement_score\ncontrol,true,false,1.0\n",
        );
        assert!(matches!(
            load_records(file.path()),
            Err(DataError::MissingArm { arm: Arm::Treatment })
        ));
    }

    #[test]
    fn round_trips_through_writer() {
        let records = vec![
            RawRecord {
                arm: Arm::Control,
                converted: true,
                retained_day7: false,
                engagement_score: 12.5,
            },
            RawRecord {
                arm: Arm::Treatment,
                converted: false,
                retained_day7: true,
                engagement_score: 0.0,
            },
        ];
        let file = NamedTempFile::new().unwrap();
        write_records(file.path(), &records).unwrap();
        let loaded = load_records(file.path()).unwrap();
        assert_eq!(loaded, records);
    }
}
