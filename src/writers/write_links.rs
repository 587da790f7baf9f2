use crate::regions::LinkedRegion;
use crate::utils::{open_output, Result};
use std::fs::File;
use std::io::{BufWriter, Write};

const GFF_HEADER: &str = "##gff-version 3";
const FAMILIES_HEADER: &str = "family\tregion_id\tchrom\tstart\tend\tstrand\tploidy";

/// Writes renumbered locus families: their copies, padded primaries and a coordinate summary.
pub struct LinkWriter<W: Write> {
    links: W,
    padded: W,
    families: W,
    flank_len: u32,
}

impl LinkWriter<BufWriter<File>> {
    /// Creates `<prefix>.links.gff3`, `<prefix>.padded.gff3` and `<prefix>.families.tsv`.
    pub fn create(output_prefix: &str, flank_len: u32) -> Result<Self> {
        let links = open_output(output_prefix, "links.gff3")?;
        let padded = open_output(output_prefix, "padded.gff3")?;
        let families = open_output(output_prefix, "families.tsv")?;
        LinkWriter::new(links, padded, families, flank_len)
    }
}

impl<W: Write> LinkWriter<W> {
    pub fn new(mut links: W, mut padded: W, mut families: W, flank_len: u32) -> Result<Self> {
        writeln!(links, "{}", GFF_HEADER).map_err(|e| e.to_string())?;
        writeln!(padded, "{}", GFF_HEADER).map_err(|e| e.to_string())?;
        writeln!(families, "{}", FAMILIES_HEADER).map_err(|e| e.to_string())?;
        Ok(Self {
            links,
            padded,
            families,
            flank_len,
        })
    }

    /// Writes a family whose ids were already rewritten into `family_id`.
    ///
    /// The padded primary is renamed to the family id itself, since it is the reference
    /// every copy and read of the family is aligned against.
    pub fn write(&mut self, family_id: &str, linked: &LinkedRegion) -> Result<()> {
        linked.write_gff(&mut self.links)?;

        let mut padded = linked.pad_primary(self.flank_len);
        padded.update_info_id(family_id);
        padded.write_gff(&mut self.padded)?;

        let ploidy = linked.ploidy();
        for (region_id, region) in linked.region_ids(family_id) {
            writeln!(
                self.families,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                family_id, region_id, region.chrom, region.start, region.end, region.strand, ploidy
            )
            .map_err(|e| e.to_string())?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.links.flush().map_err(|e| e.to_string())?;
        self.padded.flush().map_err(|e| e.to_string())?;
        self.families.flush().map_err(|e| e.to_string())
    }
}
