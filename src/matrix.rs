/// Base calls of reads at a fixed list of variant positions.
///
/// One row per read and one cell per position. An empty cell is a position the read does
/// not cover; `-` is a deletion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReadBaseMatrix {
    pub positions: Vec<u32>,
    pub read_ids: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ReadBaseMatrix {
    pub fn new(positions: Vec<u32>) -> Self {
        Self {
            positions,
            ..Default::default()
        }
    }

    pub fn num_positions(&self) -> usize {
        self.positions.len()
    }

    pub fn num_reads(&self) -> usize {
        self.rows.len()
    }

    pub fn push_row(&mut self, read_id: impl Into<String>, row: Vec<String>) {
        self.read_ids.push(read_id.into());
        self.rows.push(row);
    }

    /// Drops reads without a single call.
    pub fn remove_blank(&mut self) {
        let (read_ids, rows): (Vec<String>, Vec<Vec<String>>) = std::mem::take(&mut self.read_ids)
            .into_iter()
            .zip(std::mem::take(&mut self.rows))
            .filter(|(_, row)| row.iter().any(|cell| !cell.is_empty()))
            .unzip();
        self.read_ids = read_ids;
        self.rows = rows;
    }
}
