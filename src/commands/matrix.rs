use crate::cli::MatrixArgs;
use crate::readers::{extract_read_matrix, read_alt_positions};
use crate::utils::{open_output, Result};
use crate::writers::write_matrix;
use std::io::Write;

pub fn matrix(args: MatrixArgs) -> Result<()> {
    let positions = read_alt_positions(&args.vcf_path, args.ploidy)?;
    if positions.is_empty() {
        log::warn!(
            "No informative variant positions in {}",
            args.vcf_path.display()
        );
    } else {
        log::info!("Found {} informative variant positions", positions.len());
    }

    let reference = extract_read_matrix(&args.reference_path, &positions)?;
    let mut reads = extract_read_matrix(&args.reads_path, &positions)?;
    let num_reads = reads.num_reads();
    reads.remove_blank();
    log::info!(
        "{} reference rows, {} of {} reads cover a variant position",
        reference.num_reads(),
        reads.num_reads(),
        num_reads
    );

    for (suffix, matrix) in [
        ("reference.reads_bases.tsv", &reference),
        ("reads.reads_bases.tsv", &reads),
    ] {
        let mut writer = open_output(&args.output_prefix, suffix)?;
        write_matrix(&mut writer, matrix)?;
        writer.flush().map_err(|e| e.to_string())?;
    }
    Ok(())
}
