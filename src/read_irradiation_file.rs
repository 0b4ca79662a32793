use crate::calendar::Month;
use crate::core::consumption::MonthlyIrradiation;
use crate::errors::IrradiationLoadError;
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder as CsvReaderBuilder;
use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

/// Irradiation tables hold one row per geographic sample point and one column per month, headed
/// JAN..DEC in any case. Values are mean daily irradiation in Wh/m2/day. Other columns (ID, LON,
/// LAT, ANNUAL...) are ignored, as are blank cells.

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Running per-month totals over the data rows of a table.
struct MonthColumnMeans {
    columns: IndexMap<Month, usize>,
    totals: IndexMap<Month, (f64, usize)>,
    rows: usize,
}

impl MonthColumnMeans {
    fn from_headers<'a>(
        headers: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, IrradiationLoadError> {
        let mut found = IndexMap::new();
        for (idx, header) in headers.into_iter().enumerate() {
            if let Some(month) = Month::from_column_header(header) {
                found.entry(month).or_insert(idx);
            }
        }

        // keep calendar order whatever order the columns are in
        let columns = Month::iter()
            .map(|month| {
                found
                    .get(&month)
                    .map(|idx| (month, *idx))
                    .ok_or(IrradiationLoadError::MissingMonthColumn(month))
            })
            .collect::<Result<IndexMap<_, _>, _>>()?;

        Ok(Self {
            columns,
            totals: Month::iter().map(|month| (month, (0., 0))).collect(),
            rows: 0,
        })
    }

    /// Add a data row. `cell` returns the value in a column, `None` for a blank cell, or the raw
    /// text of a cell that is not a number.
    fn add_row(
        &mut self,
        cell: impl Fn(usize) -> Result<Option<f64>, String>,
    ) -> Result<(), IrradiationLoadError> {
        self.rows += 1;
        for (month, idx) in &self.columns {
            let invalid = |value: String| IrradiationLoadError::InvalidValue {
                month: *month,
                row: self.rows,
                value,
            };
            match cell(*idx).map_err(invalid)? {
                Some(value) if value.is_finite() && value >= 0. => {
                    let (total, count) = &mut self.totals[month];
                    *total += value;
                    *count += 1;
                }
                Some(value) => return Err(invalid(value.to_string())),
                None => {}
            }
        }

        Ok(())
    }

    fn finish(self) -> Result<MonthlyIrradiation, IrradiationLoadError> {
        if self.rows == 0 {
            return Err(IrradiationLoadError::NoDataRows);
        }

        self.totals
            .into_iter()
            .map(|(month, (total, count))| {
                if count == 0 {
                    Err(IrradiationLoadError::NoDataRows)
                } else {
                    Ok((month, total / count as f64))
                }
            })
            .collect()
    }
}

fn parse_text_cell(text: &str) -> Result<Option<f64>, String> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    text.parse().map(Some).map_err(|_| text.to_string())
}

fn parse_workbook_cell(cell: Option<&Data>) -> Result<Option<f64>, String> {
    match cell {
        None | Some(Data::Empty) => Ok(None),
        Some(Data::Float(value)) => Ok(Some(*value)),
        Some(Data::Int(value)) => Ok(Some(*value as f64)),
        Some(Data::String(text)) => parse_text_cell(text),
        Some(other) => Err(other.to_string()),
    }
}

/// Reduce a CSV irradiation table to the mean of each month's column.
pub fn irradiation_from_csv(csv: impl Read) -> Result<MonthlyIrradiation, IrradiationLoadError> {
    let mut reader = CsvReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv);

    let headers = reader.headers()?.clone();
    let mut means = MonthColumnMeans::from_headers(headers.iter())?;

    for result in reader.records() {
        let record = result?;
        means.add_row(|idx| parse_text_cell(record.get(idx).unwrap_or_default()))?;
    }

    means.finish()
}

/// Reduce the first sheet of a spreadsheet workbook to the mean of each month's column. The first
/// non-blank row is taken as the header.
pub fn irradiation_from_workbook(path: &Path) -> Result<MonthlyIrradiation, IrradiationLoadError> {
    let mut workbook = open_workbook_auto(path)?;

    let sheet_names = workbook.sheet_names().to_vec();
    let first_sheet = sheet_names.first().ok_or(IrradiationLoadError::NoSheets)?;
    let range = workbook.worksheet_range(first_sheet)?;

    let mut rows = range
        .rows()
        .filter(|row| !row.iter().all(|cell| matches!(cell, Data::Empty)));

    let header = rows
        .next()
        .ok_or(IrradiationLoadError::NoDataRows)?
        .iter()
        .map(|cell| match cell {
            Data::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>();
    let mut means = MonthColumnMeans::from_headers(header.iter().map(String::as_str))?;

    for row in rows {
        means.add_row(|idx| parse_workbook_cell(row.get(idx)))?;
    }

    means.finish()
}

/// Read an irradiation table, choosing the parser from the file extension.
#[instrument]
pub fn read_irradiation_file(path: &Path) -> Result<MonthlyIrradiation, IrradiationLoadError> {
    if !path.is_file() {
        return Err(IrradiationLoadError::FileNotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let irradiation = if extension == "csv" {
        irradiation_from_csv(BufReader::new(File::open(path)?))?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        irradiation_from_workbook(path)?
    } else {
        return Err(IrradiationLoadError::UnsupportedFormat(
            path.display().to_string(),
        ));
    };

    info!(months = irradiation.len(), "loaded irradiation averages");
    Ok(irradiation)
}

/// Load irradiation averages, reporting any failure to `output` and returning an empty map in its
/// place so the rest of the assessment can carry on without solar data.
pub fn load_irradiation(
    path: &Path,
    mut output: impl Write,
) -> std::io::Result<MonthlyIrradiation> {
    match read_irradiation_file(path) {
        Ok(irradiation) => Ok(irradiation),
        Err(err) => {
            warn!(path = %path.display(), "no irradiation data available: {err}");
            writeln!(output, "ERROR! {err}")?;
            Ok(MonthlyIrradiation::new())
        }
    }
}
