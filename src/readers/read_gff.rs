use crate::regions::{Attributes, LinkedRegion, Region, Strand};
use crate::utils::{Reporter, Result};
use std::collections::HashMap;
use std::io::BufRead;

const EXPECTED_FIELD_COUNT: usize = 9;

/// A transcript copy whose exons are still being collected.
struct PendingTranscript {
    region: Region,
    exons: Vec<Region>,
}

struct GeneGroup {
    gene_id: String,
    transcripts: Vec<PendingTranscript>,
}

enum Feature {
    Transcript { gene_id: String, id: Option<String> },
    Exon { parent: String },
}

/// Groups transcript alignments by gene into locus families.
///
/// The first `mRNA` of a gene is the primary copy and every later one a secondary copy.
/// `exon` records belong to the most recent `mRNA` of their gene, whether their `Parent`
/// names the gene or one of its transcripts. Other feature types are ignored. Families are
/// returned in order of first appearance, keyed by gene id.
pub fn read_gff<R: BufRead>(
    reader: R,
    reporter: &dyn Reporter,
) -> Result<Vec<(String, LinkedRegion)>> {
    let mut genes: Vec<GeneGroup> = Vec::new();
    let mut gene_lookup: HashMap<String, usize> = HashMap::new();
    let mut transcript_genes: HashMap<String, String> = HashMap::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| format!("Error at GFF line {}: {}", line_number + 1, e))?;
        let record = parse_record(&line)
            .map_err(|e| format!("Error at GFF line {}: {}", line_number + 1, e))?;
        let Some((feature, region)) = record else {
            continue;
        };

        match feature {
            Feature::Transcript { gene_id, id } => {
                if let Some(id) = id {
                    transcript_genes.insert(id, gene_id.clone());
                }
                let transcript = PendingTranscript {
                    region,
                    exons: Vec::new(),
                };
                match gene_lookup.get(&gene_id) {
                    Some(&index) => genes[index].transcripts.push(transcript),
                    None => {
                        gene_lookup.insert(gene_id.clone(), genes.len());
                        genes.push(GeneGroup {
                            gene_id,
                            transcripts: vec![transcript],
                        });
                    }
                }
            }
            Feature::Exon { parent } => {
                let gene_id = transcript_genes.get(&parent).unwrap_or(&parent);
                let transcript = gene_lookup
                    .get(gene_id)
                    .and_then(|&index| genes[index].transcripts.last_mut())
                    .ok_or_else(|| {
                        format!(
                            "Error at GFF line {}: exon precedes any mRNA of {}",
                            line_number + 1,
                            gene_id
                        )
                    })?;
                transcript.exons.push(region);
            }
        }
    }

    Ok(genes
        .into_iter()
        .filter_map(|gene| link_transcripts(gene, reporter))
        .collect())
}

fn link_transcripts(gene: GeneGroup, reporter: &dyn Reporter) -> Option<(String, LinkedRegion)> {
    let regions: Vec<Region> = gene
        .transcripts
        .into_iter()
        .map(|transcript| {
            let mut region = transcript.region;
            if let Err(err) = region.set_children(transcript.exons) {
                reporter.warn(&format!(
                    "Exons of {} {}:{}-{}: {}",
                    gene.gene_id, region.chrom, region.start, region.end, err
                ));
            }
            region
        })
        .collect();
    let mut regions = regions.into_iter();
    let mut linked = LinkedRegion::new(regions.next()?);
    linked.update_secondary(regions.collect());
    Some((gene.gene_id, linked))
}

fn parse_record(line: &str) -> Result<Option<(Feature, Region)>> {
    if line.trim().is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let split_line: Vec<&str> = line.split_whitespace().collect();
    if split_line.len() != EXPECTED_FIELD_COUNT {
        return Err(format!(
            "Expected {} fields, found {}",
            EXPECTED_FIELD_COUNT,
            split_line.len()
        ));
    }

    let feature_type = split_line[2];
    if feature_type != "mRNA" && feature_type != "exon" {
        return Ok(None);
    }

    let start: u32 = split_line[3]
        .parse()
        .map_err(|_| format!("Invalid start: {}", split_line[3]))?;
    if start == 0 {
        return Err("GFF3 start is 1-based and cannot be 0".to_string());
    }
    let end: u32 = split_line[4]
        .parse()
        .map_err(|_| format!("Invalid end: {}", split_line[4]))?;
    let strand: Strand = split_line[6].parse()?;
    let info = split_line[8];

    let attributes = Attributes::parse(info)?;
    let parent = attributes
        .get("Parent")
        .ok_or_else(|| "Parent attribute missing".to_string())?
        .to_string();

    let feature = if feature_type == "mRNA" {
        Feature::Transcript {
            gene_id: parent,
            id: attributes.get("ID").map(str::to_string),
        }
    } else {
        Feature::Exon { parent }
    };
    let region = Region::new(split_line[0], start - 1, end, strand, info)?;
    Ok(Some((feature, region)))
}
