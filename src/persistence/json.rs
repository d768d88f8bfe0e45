//! JSON storage of sweep results.
//!
//! A result file is one JSON object mapping column names to arrays of
//! numbers in grid order: the boundary column (`amax` or `rhomax`) and
//! the six value columns of [`COLUMN_KEYS`]. serde_json writes the
//! shortest representation that parses back to the same `f64`, so a save /
//! load cycle reproduces every value bit for bit.
use crate::{
    integration::estimate::Estimate,
    persistence::errors::{PersistError, PersistResult},
    sweep::result::{COLUMN_KEYS, SweepResult, SweepRow},
};
use std::{collections::BTreeMap, path::Path};

/// Column name to values, as stored on disk.
pub type Columns = BTreeMap<String, Vec<f64>>;

/// Columns of `result` keyed by their persisted names.
pub fn to_columns(result: &SweepResult) -> Columns {
    result.columns().into_iter().map(|(key, column)| (key, column.to_vec())).collect()
}

/// Rebuild a result from stored columns.
///
/// The boundary column is the single key not in [`COLUMN_KEYS`]. Rows
/// read back carry no θ-search diagnostics.
///
/// # Errors
/// - [`PersistError::MissingKey`] for an absent value or boundary column.
/// - [`PersistError::UnexpectedKeys`] for several boundary candidates.
/// - [`PersistError::LengthMismatch`] for ragged columns.
/// - [`PersistError::InvalidEntry`] for non-finite values or negative
///   standard errors.
pub fn from_columns(mut columns: Columns) -> PersistResult<SweepResult> {
    let mut values = Vec::with_capacity(COLUMN_KEYS.len());
    for key in COLUMN_KEYS {
        let column = columns
            .remove(key)
            .ok_or_else(|| PersistError::MissingKey { key: key.to_string() })?;
        values.push(column);
    }

    let mut candidates = columns.into_iter();
    let (parameter_name, parameters) = match (candidates.next(), candidates.next()) {
        (Some(boundary), None) => boundary,
        (None, _) => return Err(PersistError::MissingKey { key: "amax | rhomax".to_string() }),
        (Some((first, _)), Some((second, _))) => {
            let mut keys = vec![first, second];
            keys.extend(candidates.map(|(key, _)| key));
            return Err(PersistError::UnexpectedKeys { keys });
        }
    };

    let n = parameters.len();
    for (key, column) in COLUMN_KEYS.iter().zip(&values) {
        if column.len() != n {
            return Err(PersistError::LengthMismatch {
                key: key.to_string(),
                expected: n,
                found: column.len(),
            });
        }
    }

    let entry = |pair: usize, index: usize| -> PersistResult<Estimate> {
        let (mean, std_err) = (values[2 * pair][index], values[2 * pair + 1][index]);
        Estimate::new(mean, std_err).map_err(|source| PersistError::InvalidEntry {
            key: COLUMN_KEYS[2 * pair].to_string(),
            index,
            source,
        })
    };
    let rows = parameters
        .iter()
        .enumerate()
        .map(|(index, &parameter)| -> PersistResult<SweepRow> {
            Ok(SweepRow {
                parameter,
                descriptive: entry(0, index)?,
                communication: entry(1, index)?,
                information: entry(2, index)?,
                search: None,
            })
        })
        .collect::<PersistResult<Vec<_>>>()?;
    Ok(SweepResult::new(parameter_name, rows))
}

/// # Errors
/// [`PersistError::Json`] if serialization fails.
pub fn to_json_string(result: &SweepResult) -> PersistResult<String> {
    Ok(serde_json::to_string_pretty(&to_columns(result))?)
}

/// # Errors
/// [`PersistError::Json`] for malformed input, otherwise as [`from_columns`].
pub fn from_json_str(text: &str) -> PersistResult<SweepResult> {
    let columns: Columns = serde_json::from_str(text)?;
    from_columns(columns)
}

/// Write `result` to `path`, replacing any existing file.
///
/// # Errors
/// [`PersistError::Io`] if the file cannot be written.
pub fn save_json(path: impl AsRef<Path>, result: &SweepResult) -> PersistResult<()> {
    let path = path.as_ref();
    let text = to_json_string(result)?;
    std::fs::write(path, text).map_err(|err| PersistError::io(path, err))
}

/// Read a result written by [`save_json`].
///
/// # Errors
/// [`PersistError::Io`] if the file cannot be read, otherwise as
/// [`from_json_str`].
pub fn load_json(path: impl AsRef<Path>) -> PersistResult<SweepResult> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|err| PersistError::io(path, err))?;
    from_json_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweep::result::ThetaSummary;

    fn sample() -> SweepResult {
        let e = |mean: f64, std_err: f64| Estimate { mean, std_err };
        let rows = vec![
            SweepRow {
                parameter: 0.075,
                descriptive: e(0.012_345_678_901_234_5, 1e-9),
                communication: e(1.0 / 3.0, 2.5e-7),
                information: e(0.543_110_414_194_783_6, 0.0),
                search: Some(ThetaSummary { theta: -7.25, converged: true, iterations: 14 }),
            },
            SweepRow {
                parameter: 0.1,
                descriptive: e(0.1 + 0.2, 3e-10),
                communication: e(std::f64::consts::PI / 10.0, 1e-12),
                information: e(0.543_110_414_194_783_6, 0.0),
                search: None,
            },
        ];
        SweepResult::new("amax", rows)
    }

    #[test]
    // Purpose
    // -------
    // Saving then loading reproduces every persisted value exactly; only the
    // θ diagnostics are dropped.
    fn string_round_trip_is_exact() {
        let original = sample();

        let text = to_json_string(&original).unwrap();
        let loaded = from_json_str(&text).unwrap();

        assert_eq!(loaded.parameter_name, "amax");
        assert_eq!(loaded.columns(), original.columns());
        assert!(loaded.rows.iter().all(|r| r.search.is_none()));
    }

    #[test]
    fn file_round_trip_uses_expected_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fig7a.json");

        save_json(&path, &sample()).unwrap();
        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let mut keys: Vec<&str> = raw.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(keys, ["amax", "dilmv", "dilsd", "dipmv", "dipsd", "infomv", "infosd"]);
        assert_eq!(load_json(&path).unwrap().dipmv(), sample().dipmv());
    }

    #[test]
    fn missing_column_is_reported() {
        let mut columns = to_columns(&sample());
        columns.remove("dilsd");

        assert_eq!(
            from_columns(columns),
            Err(PersistError::MissingKey { key: "dilsd".to_string() })
        );
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let mut columns = to_columns(&sample());
        if let Some(column) = columns.get_mut("infomv") {
            column.pop();
        }

        assert_eq!(
            from_columns(columns),
            Err(PersistError::LengthMismatch { key: "infomv".to_string(), expected: 2, found: 1 })
        );
    }

    #[test]
    fn extra_keys_make_boundary_ambiguous() {
        let mut columns = to_columns(&sample());
        columns.insert("rhomax".to_string(), vec![0.0, 0.1]);

        assert!(matches!(
            from_columns(columns),
            Err(PersistError::UnexpectedKeys { keys }) if keys.len() == 2
        ));
    }

    #[test]
    fn negative_error_is_invalid_entry() {
        let mut columns = to_columns(&sample());
        if let Some(column) = columns.get_mut("dipsd") {
            column[1] = -1.0;
        }

        assert!(matches!(
            from_columns(columns),
            Err(PersistError::InvalidEntry { index: 1, .. })
        ));
    }

    #[test]
    fn malformed_json_and_missing_file_are_errors() {
        assert!(matches!(from_json_str("{\"amax\": [0.1,"), Err(PersistError::Json { .. })));
        assert!(matches!(from_json_str("[1, 2]"), Err(PersistError::Json { .. })));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_json(dir.path().join("absent.json")),
            Err(PersistError::Io { kind: std::io::ErrorKind::NotFound, .. })
        ));
    }
}
