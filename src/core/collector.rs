use crate::calendar::Month;
use crate::core::consumption::{validate_reading, MonthlyConsumption};
use crate::errors::{CollectionError, InvalidReading, ReadingError};
use csv::StringRecord;
use indexmap::IndexMap;
use std::io::{BufRead, Read, Write};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// This module acquires the twelve monthly consumption readings, either interactively or from a
/// batch file.

const SEPARATOR_WIDTH: usize = 50;

/// Parse one answer to a consumption prompt. Uses '.' as the decimal separator.
pub fn parse_reading(text: &str) -> Result<f64, ReadingError> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| ReadingError::NotANumber)?;

    validate_reading(value)
}

/// Prompt until a valid non-negative number is entered for the month.
///
/// There is no retry limit: invalid answers are reported and the prompt repeats for as long as
/// input keeps arriving. Only the end of the input stream stops the loop.
pub fn prompt_for_reading(
    month: Month,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<f64, CollectionError> {
    loop {
        write!(output, "Energy consumption (kWh) in {month}: ")?;
        output.flush()?;

        let mut answer = vec![];
        if input.read_until(b'\n', &mut answer)? == 0 {
            return Err(CollectionError::InputClosed(month));
        }
        // undecodable bytes cannot form a number, so they are rejected like any other text
        let line = String::from_utf8_lossy(&answer);

        match parse_reading(&line) {
            Ok(reading) => return Ok(reading),
            Err(err) => {
                debug!(%month, answer = line.trim(), "rejected consumption answer");
                writeln!(output, "{err}")?;
            }
        }
    }
}

/// Interactively collect a consumption reading for every month of the year, in calendar order.
#[instrument(skip_all)]
pub fn collect_consumption(
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<MonthlyConsumption, CollectionError> {
    writeln!(output, "\n{}", "=".repeat(SEPARATOR_WIDTH))?;
    writeln!(output, "        ENERGY CONSUMPTION DATA ENTRY")?;
    writeln!(output, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    writeln!(output, "Enter the consumption (kWh) for each month:\n")?;

    let mut readings = IndexMap::new();
    for month in Month::iter() {
        writeln!(output, "      MONTH: {month}")?;
        let reading = prompt_for_reading(month, &mut input, &mut output)?;
        writeln!(output, "\n{}", "-".repeat(SEPARATOR_WIDTH))?;
        readings.insert(month, reading);
    }

    complete(readings, vec![])
}

const ENERGY_COLUMNS: [&str; 2] = ["kwh", "energy_kwh"];

fn column_index(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.iter().any(|name| header.eq_ignore_ascii_case(name)))
}

/// Read consumption from a CSV file with `month,kwh` columns, one row per month.
///
/// Months may be given by full name or three-letter abbreviation, in any order. Every problem in
/// the file is collected and reported together rather than stopping at the first one.
#[instrument(skip_all)]
pub fn consumption_from_csv(csv: impl Read) -> Result<MonthlyConsumption, CollectionError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv);

    let headers = reader.headers()?.clone();
    let (Some(month_idx), Some(kwh_idx)) = (
        column_index(&headers, &["month"]),
        column_index(&headers, &ENERGY_COLUMNS),
    ) else {
        return Err(CollectionError::MissingColumns);
    };

    let mut readings: IndexMap<Month, f64> = IndexMap::new();
    let mut invalid = vec![];

    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = record
            .position()
            .map_or(row_idx as u64 + 2, |position| position.line());

        let (Some(month_text), Some(kwh_text)) = (record.get(month_idx), record.get(kwh_idx))
        else {
            invalid.push(InvalidReading::Malformed { line });
            continue;
        };

        let Ok(month) = Month::from_str(month_text) else {
            invalid.push(InvalidReading::UnknownMonth {
                line,
                value: month_text.to_string(),
            });
            continue;
        };
        if readings.contains_key(&month) {
            invalid.push(InvalidReading::DuplicateMonth { line, month });
            continue;
        }

        match parse_reading(kwh_text) {
            Ok(reading) => {
                readings.insert(month, reading);
            }
            Err(reason) => invalid.push(InvalidReading::Rejected {
                line,
                month,
                value: kwh_text.to_string(),
                reason,
            }),
        }
    }

    complete(readings, invalid)
}

fn complete(
    readings: IndexMap<Month, f64>,
    mut invalid: Vec<InvalidReading>,
) -> Result<MonthlyConsumption, CollectionError> {
    match MonthlyConsumption::from_validated(&readings) {
        Some(consumption) if invalid.is_empty() => Ok(consumption),
        _ => {
            let rejected = invalid
                .iter()
                .filter_map(|reading| match reading {
                    InvalidReading::Rejected { month, .. } => Some(*month),
                    _ => None,
                })
                .collect::<Vec<_>>();
            invalid.extend(
                Month::iter()
                    .filter(|month| !readings.contains_key(month) && !rejected.contains(month))
                    .map(InvalidReading::MissingMonth),
            );
            Err(CollectionError::InvalidReadings(invalid))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Cursor;

    #[rstest]
    #[case("123.4", Ok(123.4))]
    #[case("  0\n", Ok(0.))]
    #[case("-5", Err(ReadingError::Negative))]
    #[case("abc", Err(ReadingError::NotANumber))]
    #[case("123,4", Err(ReadingError::NotANumber))]
    #[case("", Err(ReadingError::NotANumber))]
    #[case("NaN", Err(ReadingError::NotANumber))]
    fn should_parse_readings(#[case] text: &str, #[case] expected: Result<f64, ReadingError>) {
        assert_eq!(parse_reading(text), expected);
    }

    #[rstest]
    fn should_reprompt_until_valid() {
        let input = Cursor::new("-5\nabc\n123.4\n");
        let mut output: Vec<u8> = vec![];

        let reading = prompt_for_reading(Month::January, input, &mut output).unwrap();
        assert_eq!(reading, 123.4);

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Energy consumption (kWh) in January: ").count(), 3);
        assert!(output.contains("Error: value cannot be negative."));
        assert!(output.contains("Error: enter a valid number (use '.' for decimals)."));
    }

    #[rstest]
    fn should_reprompt_after_undecodable_answer() {
        let input = Cursor::new(b"\xff\xfe\n42\n".to_vec());
        let mut output: Vec<u8> = vec![];

        let reading = prompt_for_reading(Month::January, input, &mut output).unwrap();
        assert_eq!(reading, 42.);

        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Energy consumption (kWh) in January: ").count(), 2);
        assert!(output.contains("Error: enter a valid number (use '.' for decimals)."));
    }

    #[rstest]
    fn should_stop_when_input_ends() {
        let input = Cursor::new("abc\n");
        let result = prompt_for_reading(Month::July, input, Vec::<u8>::new());

        assert!(matches!(
            result,
            Err(CollectionError::InputClosed(Month::July))
        ));
    }

    #[rstest]
    fn should_collect_all_twelve_months() {
        let answers = (1..=12).map(|n| format!("{}\n", n * 10)).collect::<String>();
        let consumption = collect_consumption(Cursor::new(answers), Vec::<u8>::new()).unwrap();

        assert_eq!(consumption.energy_kwh(Month::January), 10.);
        assert_eq!(consumption.energy_kwh(Month::December), 120.);
        assert_eq!(consumption.iter().count(), 12);
    }

    #[rstest]
    fn should_read_batch_file_in_any_order() {
        let csv = "month,kwh\n\
                   Dec,120\nNov,110\nOctober,100\nSep,90\nAugust,80\nJul,70\n\
                   june,60\nMAY,50\nApr,40\nMar,30\nFeb,20\nJanuary,10\n";
        let consumption = consumption_from_csv(csv.as_bytes()).unwrap();

        assert_eq!(
            consumption.iter().map(|(month, _)| month).collect::<Vec<_>>(),
            Month::iter().collect::<Vec<_>>()
        );
        assert_eq!(consumption.energy_kwh(Month::June), 60.);
    }

    #[rstest]
    fn should_report_every_invalid_batch_entry() {
        let csv = "month,kwh\n\
                   Jan,10\nFeb,-5\nMar,abc\nSmarch,30\nJan,11\nApr,40\nMay,50\nJun,60\n\
                   Jul,70\nAug,80\nSep,90\nOct,100\nNov,110\n";
        let Err(CollectionError::InvalidReadings(invalid)) = consumption_from_csv(csv.as_bytes())
        else {
            panic!("expected invalid readings");
        };

        assert_eq!(
            invalid,
            vec![
                InvalidReading::Rejected {
                    line: 3,
                    month: Month::February,
                    value: "-5".to_string(),
                    reason: ReadingError::Negative,
                },
                InvalidReading::Rejected {
                    line: 4,
                    month: Month::March,
                    value: "abc".to_string(),
                    reason: ReadingError::NotANumber,
                },
                InvalidReading::UnknownMonth {
                    line: 5,
                    value: "Smarch".to_string(),
                },
                InvalidReading::DuplicateMonth {
                    line: 6,
                    month: Month::January,
                },
                InvalidReading::MissingMonth(Month::December),
            ]
        );
    }

    #[rstest]
    fn should_report_short_rows_alongside_other_entries() {
        let csv = "month,kwh\nJan\nFeb,-5\n";
        let Err(CollectionError::InvalidReadings(invalid)) = consumption_from_csv(csv.as_bytes())
        else {
            panic!("expected invalid readings");
        };

        assert_eq!(invalid[0], InvalidReading::Malformed { line: 2 });
        assert_eq!(
            invalid[1],
            InvalidReading::Rejected {
                line: 3,
                month: Month::February,
                value: "-5".to_string(),
                reason: ReadingError::Negative,
            }
        );
        // January's row was unreadable, so it is reported missing along with March..December
        assert_eq!(invalid.len(), 2 + 11);
        assert!(invalid.contains(&InvalidReading::MissingMonth(Month::January)));
        assert!(invalid.contains(&InvalidReading::MissingMonth(Month::December)));
    }

    #[rstest]
    fn should_fail_for_batch_file_without_expected_columns() {
        assert!(matches!(
            consumption_from_csv("month,usage\nJan,10\n".as_bytes()),
            Err(CollectionError::MissingColumns)
        ));
    }
}
