use super::Region;
use crate::utils::Result;
use std::io::Write;

/// Flanking sequence added around the primary copy before re-mapping.
pub const DEFAULT_PAD_LEN: u32 = 1000;

/// A locus family: the representative copy of a transcript plus every other genomic
/// copy the same transcript evidence maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedRegion {
    pub primary: Region,
    pub secondary: Vec<Region>,
}

impl LinkedRegion {
    pub fn new(primary: Region) -> Self {
        Self {
            primary,
            secondary: Vec::new(),
        }
    }

    pub fn append_secondary(&mut self, region: Region) {
        self.secondary.push(region);
    }

    pub fn update_secondary(&mut self, regions: Vec<Region>) {
        self.secondary = regions;
    }

    /// Primary first, then secondaries in order.
    pub fn flatten(&self) -> impl Iterator<Item = &Region> {
        std::iter::once(&self.primary).chain(self.secondary.iter())
    }

    /// Number of copies in the family, i.e. the number of seed haplotypes.
    pub fn ploidy(&self) -> usize {
        1 + self.secondary.len()
    }

    /// Renames every copy into the `family_id` namespace: `<family_id>.0` for the
    /// primary and `<family_id>.<k>` for the k-th secondary.
    pub fn rewrite_ids(&mut self, family_id: &str) {
        self.primary.update_info_id(&format!("{}.0", family_id));
        for (index, region) in self.secondary.iter_mut().enumerate() {
            region.update_info_id(&format!("{}.{}", family_id, index + 1));
        }
    }

    /// Canonical region ids paired with their regions, in flattened order.
    pub fn region_ids<'a>(
        &'a self,
        family_id: &'a str,
    ) -> impl Iterator<Item = (String, &'a Region)> {
        self.flatten()
            .enumerate()
            .map(move |(index, region)| (format!("{}.{}", family_id, index), region))
    }

    pub fn pad_primary(&self, length: u32) -> Region {
        self.primary.padded(length)
    }

    pub fn write_gff<W: Write>(&self, writer: &mut W) -> Result<()> {
        for region in self.flatten() {
            region.write_gff(writer)?;
        }
        Ok(())
    }
}
