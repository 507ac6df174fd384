use std::ops::{Index, IndexMut};

/// A dense, row-major table of action values
///
/// Row `s` holds one value per action for the flattened discrete state `s`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QTable {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl QTable {
    /// Construct a `rows` x `cols` table with every entry set to `value`
    pub fn filled(rows: usize, cols: usize, value: f64) -> Self {
        Self {
            rows,
            cols,
            values: vec![value; rows * cols],
        }
    }

    /// Construct a table from row-major `values`
    ///
    /// **Returns** `None` if `values` does not contain exactly `rows * cols` entries
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Option<Self> {
        (values.len() == rows * cols).then_some(Self { rows, cols, values })
    }

    /// Construct a table from nested rows
    ///
    /// **Returns** `None` if the rows are ragged
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let n_rows = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        Some(Self {
            rows: n_rows,
            cols,
            values: rows.into_iter().flatten().collect(),
        })
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, state: usize) -> &[f64] {
        let start = state * self.cols;
        &self.values[start..start + self.cols]
    }

    /// Index of the largest value in row `state`, the lowest index wins ties
    pub fn argmax(&self, state: usize) -> usize {
        let row = self.row(state);
        (1..row.len()).fold(0, |best, a| if row[a] > row[best] { a } else { best })
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.values.chunks(self.cols.max(1)).map(<[f64]>::to_vec).collect()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

impl Index<(usize, usize)> for QTable {
    type Output = f64;

    fn index(&self, (state, action): (usize, usize)) -> &Self::Output {
        assert!(action < self.cols, "Invalid action: {}", action);
        &self.values[state * self.cols + action]
    }
}

impl IndexMut<(usize, usize)> for QTable {
    fn index_mut(&mut self, (state, action): (usize, usize)) -> &mut Self::Output {
        assert!(action < self.cols, "Invalid action: {}", action);
        &mut self.values[state * self.cols + action]
    }
}
