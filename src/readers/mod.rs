mod read_bam;
mod read_bed;
mod read_gff;
mod read_matrix;
mod read_vcf;

pub use read_bam::extract_read_matrix;
pub use read_bed::read_bed;
pub use read_gff::read_gff;
pub use read_matrix::read_matrix;
pub use read_vcf::read_alt_positions;
