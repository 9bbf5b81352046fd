//! CSV data-table loading.
//!
//! The simulator writes one table per run:
//!
//! - phase sweeps:   `t, n, T, M, E`
//! - relaxation:     `T, t, η`
//! - hysteresis:     `H, M`
//!
//! Design goals, in order: strict schema for required columns (clear errors,
//! exit code 2), column lookup by name rather than position, and no analysis
//! logic here. A missing column or unparseable cell is a fatal precondition
//! violation of the loader contract, not something to coerce.

use std::fs::File;
use std::path::Path;

use csv::StringRecord;

use crate::error::AppError;

/// Columns of a phase-sweep run.
#[derive(Debug, Clone, Default)]
pub struct PhaseTable {
    pub time: Vec<f64>,
    pub n: Vec<f64>,
    pub temp: Vec<f64>,
    pub mag: Vec<f64>,
    pub energy: Vec<f64>,
}

/// Columns of a relaxation run.
#[derive(Debug, Clone, Default)]
pub struct RelaxTable {
    pub temp: Vec<f64>,
    pub time: Vec<f64>,
    pub eta: Vec<f64>,
}

/// Columns of a hysteresis run.
#[derive(Debug, Clone, Default)]
pub struct HysTable {
    pub field: Vec<f64>,
    pub mag: Vec<f64>,
}

struct TableReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    path: String,
}

impl TableReader {
    fn open(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display()))
        })?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(file);
        let headers = reader
            .headers()
            .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
            .clone();
        Ok(TableReader {
            reader,
            headers,
            path: path.display().to_string(),
        })
    }

    fn column_index(&self, name: &str) -> Result<usize, AppError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| {
                AppError::new(
                    2,
                    format!("CSV '{}' is missing required column '{name}'", self.path),
                )
            })
    }

    fn read_columns(mut self, indices: &[usize]) -> Result<Vec<Vec<f64>>, AppError> {
        let mut columns: Vec<Vec<f64>> = vec![Vec::new(); indices.len()];
        for (line, record) in self.reader.records().enumerate() {
            let record = record.map_err(|e| {
                AppError::new(2, format!("CSV '{}' row {}: {e}", self.path, line + 2))
            })?;
            for (slot, &idx) in indices.iter().enumerate() {
                let cell = record.get(idx).ok_or_else(|| {
                    AppError::new(
                        2,
                        format!("CSV '{}' row {} is missing column {idx}", self.path, line + 2),
                    )
                })?;
                let value: f64 = cell.parse().map_err(|_| {
                    AppError::new(
                        2,
                        format!(
                            "CSV '{}' row {}: '{cell}' is not a number",
                            self.path,
                            line + 2
                        ),
                    )
                })?;
                columns[slot].push(value);
            }
        }
        Ok(columns)
    }
}

/// Load a phase-sweep table (`t, n, T, M, E`).
pub fn load_phase_table(path: &Path) -> Result<PhaseTable, AppError> {
    let reader = TableReader::open(path)?;
    let idx = [
        reader.column_index("t")?,
        reader.column_index("n")?,
        reader.column_index("T")?,
        reader.column_index("M")?,
        reader.column_index("E")?,
    ];
    let mut cols = reader.read_columns(&idx)?;
    let energy = cols.pop().unwrap_or_default();
    let mag = cols.pop().unwrap_or_default();
    let temp = cols.pop().unwrap_or_default();
    let n = cols.pop().unwrap_or_default();
    let time = cols.pop().unwrap_or_default();
    Ok(PhaseTable {
        time,
        n,
        temp,
        mag,
        energy,
    })
}

/// Load a relaxation table (`T, t, η`).
pub fn load_relax_table(path: &Path) -> Result<RelaxTable, AppError> {
    let reader = TableReader::open(path)?;
    let idx = [
        reader.column_index("T")?,
        reader.column_index("t")?,
        reader.column_index("η")?,
    ];
    let mut cols = reader.read_columns(&idx)?;
    let eta = cols.pop().unwrap_or_default();
    let time = cols.pop().unwrap_or_default();
    let temp = cols.pop().unwrap_or_default();
    Ok(RelaxTable { temp, time, eta })
}

/// Load a hysteresis table (`H, M`).
pub fn load_hys_table(path: &Path) -> Result<HysTable, AppError> {
    let reader = TableReader::open(path)?;
    let idx = [reader.column_index("H")?, reader.column_index("M")?];
    let mut cols = reader.read_columns(&idx)?;
    let mag = cols.pop().unwrap_or_default();
    let field = cols.pop().unwrap_or_default();
    Ok(HysTable { field, mag })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("mag-curves-test-{name}-{}.csv", std::process::id()));
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn phase_table_loads_by_column_name() {
        let path = write_temp_csv(
            "phase",
            "t,n,T,M,E\n0,50,0.1,0.99,-1.9\n1,50,0.2,0.97,-1.8\n",
        );
        let table = load_phase_table(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.temp, vec![0.1, 0.2]);
        assert_eq!(table.mag, vec![0.99, 0.97]);
        assert_eq!(table.n, vec![50.0, 50.0]);
    }

    #[test]
    fn missing_column_is_fatal() {
        let path = write_temp_csv("missing", "t,n,T,E\n0,50,0.1,-1.9\n");
        let err = load_phase_table(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("'M'"));
    }

    #[test]
    fn unparseable_cell_is_fatal() {
        let path = write_temp_csv("badcell", "H,M\n0.1,abc\n");
        let err = load_hys_table(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn relax_table_reads_unicode_header() {
        let path = write_temp_csv("relax", "T,t,η\n0.5,1,0.01\n0.5,2,0.008\n");
        let table = load_relax_table(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(table.eta, vec![0.01, 0.008]);
    }
}
