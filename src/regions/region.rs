use super::attributes::rewrite_info_id;
use crate::utils::Result;
use std::{fmt, io::Write, str::FromStr};

/// Source column written to every GFF3 record.
pub const GFF_SOURCE: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            _ => Err(format!("Strand must be '+' or '-', found '{}'", s)),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => f.write_str("+"),
            Strand::Reverse => f.write_str("-"),
        }
    }
}

/// A stranded 0-based half-open interval with GFF3 attributes and nested child features.
///
/// Children (exons of a transcript) always lie on the same chromosome and strand and
/// within `[start, end)` of their parent. The only way to install children is
/// [`Region::set_children`], which validates the whole list first.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
    pub strand: Strand,
    pub info: String,
    children: Vec<Region>,
}

/// Why a candidate child list was rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainmentError {
    pub child_index: usize,
    pub reason: String,
}

impl fmt::Display for ContainmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "child {} rejected ({}); children were cleared",
            self.child_index, self.reason
        )
    }
}

impl Region {
    pub fn new(
        chrom: impl Into<String>,
        start: u32,
        end: u32,
        strand: Strand,
        info: impl Into<String>,
    ) -> Result<Self> {
        if start >= end {
            return Err(format!("Invalid region: start {} >= end {}", start, end));
        }
        Ok(Self {
            chrom: chrom.into(),
            start,
            end,
            strand,
            info: info.into(),
            children: Vec::new(),
        })
    }

    pub fn children(&self) -> &[Region] {
        &self.children
    }

    /// Replaces the child list if every child nests inside this region.
    ///
    /// On the first violation the child list is emptied and the violation returned;
    /// the region itself stays valid.
    pub fn set_children(
        &mut self,
        children: Vec<Region>,
    ) -> std::result::Result<(), ContainmentError> {
        for (child_index, child) in children.iter().enumerate() {
            if let Some(reason) = self.containment_violation(child) {
                self.children.clear();
                return Err(ContainmentError {
                    child_index,
                    reason,
                });
            }
        }
        self.children = children;
        Ok(())
    }

    fn containment_violation(&self, child: &Region) -> Option<String> {
        if child.chrom != self.chrom {
            Some(format!("chromosome {} != {}", child.chrom, self.chrom))
        } else if child.strand != self.strand {
            Some(format!("strand {} != {}", child.strand, self.strand))
        } else if !(self.start <= child.start && child.start < child.end && child.end <= self.end)
        {
            Some(format!(
                "interval {}-{} outside {}-{}",
                child.start, child.end, self.start, self.end
            ))
        } else {
            None
        }
    }

    /// Rewrites the identifiers of this region and all of its children into `new_id`.
    pub fn update_info_id(&mut self, new_id: &str) {
        self.info = rewrite_info_id(&self.info, new_id);
        for child in self.children.iter_mut() {
            child.info = rewrite_info_id(&child.info, new_id);
        }
    }

    /// Copy of this region widened by `length` on both sides.
    ///
    /// The outermost children (first start, last end) move with the parent so the
    /// padded region keeps its children nested; interior children are untouched.
    pub fn padded(&self, length: u32) -> Region {
        let mut region = self.clone();
        region.start = region.start.saturating_sub(length);
        region.end = region.end.saturating_add(length);
        if let Some(first) = region.children.first_mut() {
            first.start = first.start.saturating_sub(length);
        }
        if let Some(last) = region.children.last_mut() {
            last.end = last.end.saturating_add(length);
        }
        region
    }

    pub fn feature_type(&self) -> &'static str {
        if self.children.is_empty() {
            "exon"
        } else {
            "mRNA"
        }
    }

    /// GFF3 record for this region alone (1-based inclusive start).
    pub fn to_gff_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t.\t{}\t.\t{}",
            self.chrom,
            GFF_SOURCE,
            self.feature_type(),
            self.start + 1,
            self.end,
            self.strand,
            self.info
        )
    }

    /// Writes this region followed by each of its children, one record per line.
    pub fn write_gff<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", self.to_gff_line()).map_err(|e| e.to_string())?;
        for child in &self.children {
            writeln!(writer, "{}", child.to_gff_line()).map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}
