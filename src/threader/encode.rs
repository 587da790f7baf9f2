use crate::utils::Result;

/// Channels of a base vector: A, C, G, T, deletion.
pub const NUM_CHANNELS: usize = 5;
pub const DELETION: &str = "-";

pub type BaseVector = [f32; NUM_CHANNELS];

const ZERO: BaseVector = [0.0; NUM_CHANNELS];
const THIRD: f32 = 1.0 / 3.0;

/// Base call symbols in channel order, used to decode one-hot columns.
const CHANNEL_SYMBOLS: [char; NUM_CHANNELS] = ['A', 'C', 'G', 'T', '-'];

/// One-hot (or fractional, for IUPAC ambiguity codes) vector of a base call.
pub fn encode_base(base: &str) -> Option<BaseVector> {
    let vector = match base {
        "A" => [1.0, 0.0, 0.0, 0.0, 0.0],
        "C" => [0.0, 1.0, 0.0, 0.0, 0.0],
        "G" => [0.0, 0.0, 1.0, 0.0, 0.0],
        "T" => [0.0, 0.0, 0.0, 1.0, 0.0],
        DELETION => [0.0, 0.0, 0.0, 0.0, 1.0],
        "M" => [0.5, 0.5, 0.0, 0.0, 0.0],
        "R" => [0.5, 0.0, 0.5, 0.0, 0.0],
        "W" => [0.5, 0.0, 0.0, 0.5, 0.0],
        "S" => [0.0, 0.5, 0.5, 0.0, 0.0],
        "Y" => [0.0, 0.5, 0.0, 0.5, 0.0],
        "K" => [0.0, 0.0, 0.5, 0.5, 0.0],
        "V" => [THIRD, THIRD, THIRD, 0.0, 0.0],
        "H" => [THIRD, THIRD, 0.0, THIRD, 0.0],
        "D" => [THIRD, 0.0, THIRD, THIRD, 0.0],
        "B" => [0.0, THIRD, THIRD, THIRD, 0.0],
        "N" => [0.25, 0.25, 0.25, 0.25, 0.0],
        _ => return None,
    };
    Some(vector)
}

/// Sparse encoding of one matrix row: the covered columns and their vectors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EncodedRow {
    pub indices: Vec<usize>,
    pub vectors: Vec<BaseVector>,
}

impl EncodedRow {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Encodes base-call rows column by column.
///
/// Empty cells are skipped, or with `padding` kept as the zero vector so that every
/// column is present.
pub fn onehot_encode(rows: &[Vec<String>], padding: bool) -> Result<Vec<EncodedRow>> {
    let mut encoded = Vec::with_capacity(rows.len());
    for (row_index, row) in rows.iter().enumerate() {
        let mut encoded_row = EncodedRow::default();
        for (column, base) in row.iter().enumerate() {
            if base.is_empty() {
                if padding {
                    encoded_row.indices.push(column);
                    encoded_row.vectors.push(ZERO);
                }
                continue;
            }
            let vector = encode_base(base).ok_or_else(|| {
                format!(
                    "Unknown base call '{}' in row {} column {}",
                    base, row_index, column
                )
            })?;
            encoded_row.indices.push(column);
            encoded_row.vectors.push(vector);
        }
        encoded.push(encoded_row);
    }
    Ok(encoded)
}

/// Maps hardmaxed prototypes back to base strings, one symbol per column.
///
/// Each column is read at its largest channel, which for a one-hot column is its hot one.
pub fn onehot_decode(prototypes: &[Vec<BaseVector>]) -> Vec<String> {
    prototypes
        .iter()
        .map(|prototype| {
            prototype
                .iter()
                .map(|vector| CHANNEL_SYMBOLS[argmax(vector)])
                .collect()
        })
        .collect()
}

/// Index of the largest channel, lowest index on ties.
pub fn argmax(vector: &BaseVector) -> usize {
    let mut best = 0;
    for channel in 1..NUM_CHANNELS {
        if vector[channel] > vector[best] {
            best = channel;
        }
    }
    best
}
