use crate::matrix::ReadBaseMatrix;
use crate::utils::Result;
use std::io::BufRead;

/// Reads a base matrix TSV: a header of `\t<pos>\t<pos>...` followed by one
/// `<read_id>\t<base>...` line per read.
pub fn read_matrix<R: BufRead>(reader: R) -> Result<ReadBaseMatrix> {
    let mut lines = reader.lines();
    let header = match lines.next() {
        Some(line) => line.map_err(|e| format!("Error at matrix line 1: {}", e))?,
        None => return Err("Matrix is missing its header line".to_string()),
    };
    let positions = header
        .split('\t')
        .skip(1)
        .map(|pos| {
            pos.parse::<u32>()
                .map_err(|_| format!("Error at matrix line 1: invalid position '{}'", pos))
        })
        .collect::<Result<Vec<u32>>>()?;

    let mut matrix = ReadBaseMatrix::new(positions);
    for (index, line) in lines.enumerate() {
        let line_number = index + 2;
        let line = line.map_err(|e| format!("Error at matrix line {}: {}", line_number, e))?;
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let read_id = fields.next().unwrap_or_default();
        let row: Vec<String> = fields.map(str::to_string).collect();
        if row.len() != matrix.num_positions() {
            return Err(format!(
                "Error at matrix line {}: expected {} bases, found {}",
                line_number,
                matrix.num_positions(),
                row.len()
            ));
        }
        matrix.push_row(read_id, row);
    }
    Ok(matrix)
}
