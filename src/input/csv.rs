//! CSV telemetry parsing

use ::csv::{ReaderBuilder, Trim};

use super::InputError;
use crate::telemetry::{Field, RawRow};

/// Parse CSV text with a header row into raw rows numbered from 1
///
/// The header must name every required field; rows are otherwise passed
/// through untouched so the validator can report per-cell problems.
pub fn parse_csv(data: &str) -> Result<Vec<RawRow>, InputError> {
    let data = data.trim_start_matches('\u{feff}').trim();
    if data.is_empty() {
        return Err(InputError::Empty);
    }

    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(data.as_bytes());

    let headers = reader.headers()?.clone();
    check_header(headers.iter())?;

    let mut rows = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let mut row = RawRow::new(index + 1);
        for (name, value) in headers.iter().zip(record.iter()) {
            row.insert(name, value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(rows)
}

/// Fail when the header lacks any required field
pub fn check_header<'a>(names: impl Iterator<Item = &'a str>) -> Result<(), InputError> {
    let names: Vec<&str> = names.collect();
    let missing: Vec<Field> = Field::ALL
        .into_iter()
        .filter(|field| !names.contains(&field.as_str()))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(InputError::MissingColumns(missing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::RawValue;

    const HEADER: &str = "machine_id,runtime_hours,vibration_level,temperature,maintenance_threshold,max_operating_hours,scaling_factor";

    #[test]
    fn test_parse_rows_numbered_from_one() {
        let data = format!("{}\nM1,100,2,50,20,200,3\nM2,40,3,85,35,300,4\n", HEADER);
        let rows = parse_csv(&data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row, 1);
        assert_eq!(rows[1].row, 2);
        assert_eq!(rows[1].get(Field::MachineId), Some(&RawValue::from("M2")));
        assert_eq!(rows[0].get(Field::ScalingFactor), Some(&RawValue::from("3")));
    }

    #[test]
    fn test_bom_and_whitespace_are_stripped() {
        let data = format!("\u{feff}  {}\n M1 , 100 ,2,50,20,200,3\n\n", HEADER);
        let rows = parse_csv(&data).unwrap();
        assert_eq!(rows[0].get(Field::MachineId), Some(&RawValue::from("M1")));
        assert_eq!(rows[0].get(Field::RuntimeHours), Some(&RawValue::from("100")));
    }

    #[test]
    fn test_missing_header_columns() {
        let data = "machine_id,runtime_hours,vibration_level,maintenance_threshold,max_operating_hours\nM1,1,2,3,4\n";
        let err = parse_csv(data).unwrap_err();
        match err {
            InputError::MissingColumns(fields) => {
                assert_eq!(fields, vec![Field::Temperature, Field::ScalingFactor]);
            }
            other => panic!("Expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        assert!(matches!(parse_csv(HEADER), Err(InputError::Empty)));
        assert!(matches!(parse_csv("   \n"), Err(InputError::Empty)));
    }

    #[test]
    fn test_ragged_row_is_a_parse_error() {
        let data = format!("{}\nM1,100,2\n", HEADER);
        assert!(matches!(parse_csv(&data), Err(InputError::Csv(_))));
    }

    #[test]
    fn test_empty_cell_reaches_validator_as_blank() {
        let data = format!("{}\nM1,100,2,,20,200,3\n", HEADER);
        let rows = parse_csv(&data).unwrap();
        assert!(rows[0].get(Field::Temperature).is_none());
    }
}
