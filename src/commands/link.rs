use crate::cli::LinkArgs;
use crate::readers::{read_bed, read_gff};
use crate::regions::{reconcile_groups, LinkedRegion};
use crate::utils::{open_text_reader, GenomicRegion, LogReporter, Result};
use crate::writers::LinkWriter;

pub fn link(args: LinkArgs) -> Result<()> {
    let reporter = LogReporter;
    let gff_reader = open_text_reader(&args.gff_path)?;
    let groups = read_gff(gff_reader, &reporter)
        .map_err(|e| format!("{}: {}", args.gff_path.display(), e))?;
    log::info!("Loaded {} candidate families", groups.len());

    let limits = match &args.regions_path {
        Some(path) => {
            let regions = read_bed(open_text_reader(path)?)
                .map_err(|e| format!("{}: {}", path.display(), e))?;
            Some(regions)
        }
        None => None,
    };

    let families = reconcile_groups(groups, args.min_overlap, &reporter);
    log::info!("{} families left after merging", families.len());

    let families = select_families(families, limits.as_deref());

    let mut writer = LinkWriter::create(&args.output_prefix, args.flank_len)?;
    for (index, mut linked) in families.into_iter().enumerate() {
        let family_id = format!("{}{}", args.family_prefix, index);
        linked.rewrite_ids(&family_id);
        writer.write(&family_id, &linked)?;
    }
    writer.flush()?;
    Ok(())
}

/// Drops the gene keys and, with limit intervals, keeps families with a copy inside one.
fn select_families(
    families: Vec<(String, LinkedRegion)>,
    limits: Option<&[GenomicRegion]>,
) -> Vec<LinkedRegion> {
    families
        .into_iter()
        .filter(|(gene_id, linked)| match limits {
            Some(limits) => {
                let keep = linked
                    .flatten()
                    .any(|region| limits.iter().any(|limit| limit.overlaps(region)));
                if !keep {
                    log::debug!("{}: outside limit regions", gene_id);
                }
                keep
            }
            None => true,
        })
        .map(|(_, linked)| linked)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::{Region, Strand};

    fn family(gene: &str, chrom: &str, start: u32) -> (String, LinkedRegion) {
        let region = Region::new(chrom, start, start + 100, Strand::Forward, "").unwrap();
        (gene.to_string(), LinkedRegion::new(region))
    }

    #[test]
    fn limits_keep_overlapping_families_in_order() {
        let families = vec![
            family("g1", "chr1", 0),
            family("g2", "chr2", 500),
            family("g3", "chr1", 1000),
        ];
        let limits = vec![GenomicRegion::new("chr1", 50, 1050).unwrap()];
        let kept = select_families(families.clone(), Some(limits.as_slice()));
        let starts: Vec<u32> = kept.iter().map(|linked| linked.primary.start).collect();
        assert_eq!(starts, vec![0, 1000]);
        assert_eq!(select_families(families, None).len(), 3);
    }

    #[test]
    fn link_writes_renumbered_families() {
        let dir = tempfile::tempdir().unwrap();
        let gff_path = dir.path().join("aligned.gff3");
        std::fs::write(
            &gff_path,
            "chr1\tsrc\tmRNA\t101\t200\t.\t+\t.\tID=t1.mRNA;Name=t1.mRNA;Parent=g1\n\
             chr2\tsrc\tmRNA\t101\t200\t.\t+\t.\tID=t2.mRNA;Name=t2.mRNA;Parent=g1\n\
             chr2\tsrc\tmRNA\t101\t200\t.\t+\t.\tID=t3.mRNA;Name=t3.mRNA;Parent=g2\n\
             chr1\tsrc\tmRNA\t101\t200\t.\t+\t.\tID=t4.mRNA;Name=t4.mRNA;Parent=g2\n\
             chr5\tsrc\tmRNA\t1\t50\t.\t-\t.\tID=t5.mRNA;Name=t5.mRNA;Parent=g3\n",
        )
        .unwrap();
        let prefix = dir.path().join("out").to_str().unwrap().to_string();
        let args = LinkArgs {
            gff_path,
            output_prefix: prefix.clone(),
            regions_path: None,
            min_overlap: 0.5,
            flank_len: 10,
            family_prefix: "fam".to_string(),
        };
        link(args).unwrap();

        let summary = std::fs::read_to_string(format!("{}.families.tsv", prefix)).unwrap();
        let families: Vec<&str> = summary
            .lines()
            .skip(1)
            .map(|line| line.split('\t').next().unwrap())
            .collect();
        // g2 mirrors g1 and is absorbed into it
        assert_eq!(families, vec!["fam0", "fam0", "fam0", "fam0", "fam1"]);

        let padded = std::fs::read_to_string(format!("{}.padded.gff3", prefix)).unwrap();
        assert!(padded.contains("chr1\tsgphase\texon\t91\t210\t.\t+\t.\tID=fam0.mRNA"));
        assert!(padded.contains("chr5\tsgphase\texon\t1\t60\t.\t-\t.\tID=fam1.mRNA"));
    }
}
