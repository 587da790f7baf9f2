use crate::matrix::ReadBaseMatrix;
use crate::utils::Result;
use itertools::Itertools;
use std::io::Write;

/// Writes a base matrix as TSV: a header with an empty first cell followed by the
/// positions, then one line per read.
pub fn write_matrix<W: Write>(writer: &mut W, matrix: &ReadBaseMatrix) -> Result<()> {
    let header = std::iter::once(String::new())
        .chain(matrix.positions.iter().map(|pos| pos.to_string()))
        .join("\t");
    writeln!(writer, "{}", header).map_err(|e| e.to_string())?;
    for (read_id, row) in matrix.read_ids.iter().zip(&matrix.rows) {
        let line = std::iter::once(read_id).chain(row).join("\t");
        writeln!(writer, "{}", line).map_err(|e| e.to_string())?;
    }
    Ok(())
}
