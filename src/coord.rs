use std::cmp;
use std::fmt;

use error::{Error, Result};
use gene::{Pos, Strand};

/// A 1-based, closed genomic interval.
/// Always expressed with start <= end, regardless of strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GenomicInterval {
    pub start: Pos,
    pub end: Pos,
}

impl GenomicInterval {
    pub fn len(&self) -> Pos {
        self.end - self.start + 1
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Map a 1-based amino-acid position to the genomic coordinates of its codon.
///
/// Exons must be 1-based, closed, and listed in transcript order. The codon
/// occupies CDS positions `(aa-1)*3+1 ..= (aa-1)*3+3`; every exon overlapping
/// that span contributes a genomic fragment. Fragments are sorted and merged
/// when contiguous, so a codon crossing the junction of genomically adjacent
/// exons still yields a single interval; fragments separated by an intron are
/// reported as separate spans rather than dropped. The result is normally one
/// span, or two when the codon straddles an exon junction.
///
/// Only `Strand::Reverse` flips the coordinate arithmetic: an unannotated
/// strand (`.` in the source) maps like the plus strand.
pub fn map_codon(exons: &[(Pos, Pos)], aa_pos: Pos, strand: Strand) -> Result<Vec<GenomicInterval>> {
    if aa_pos == 0 {
        return Err(Error::CodonNotFound { aa_pos: aa_pos });
    }
    // codon position within the concatenated coding sequence, 1-based;
    // positions too large to represent cannot lie within any coding sequence
    let codon_start = match (aa_pos - 1).checked_mul(3).and_then(|x| x.checked_add(1)) {
        Some(x) => x,
        None => return Err(Error::CodonNotFound { aa_pos: aa_pos }),
    };
    let codon_end = match codon_start.checked_add(2) {
        Some(x) => x,
        None => return Err(Error::CodonNotFound { aa_pos: aa_pos }),
    };

    let mut fragments: Vec<GenomicInterval> = Vec::new();
    let mut running: Pos = 0;
    for &(start, end) in exons {
        let exon_len = end - start + 1;
        let exon_cds_start = running + 1;
        let exon_cds_end = running + exon_len;
        let overlap_start = cmp::max(exon_cds_start, codon_start);
        let overlap_end = cmp::min(exon_cds_end, codon_end);
        if overlap_start <= overlap_end {
            // 0-based offsets into the exon, measured from its transcript-first base
            let offset_start = overlap_start - exon_cds_start;
            let offset_end = overlap_end - exon_cds_start;
            let fragment = if strand == Strand::Reverse {
                // on the minus strand the exon's transcript-first base is its genomic end
                GenomicInterval {
                    start: end - offset_end,
                    end: end - offset_start,
                }
            } else {
                GenomicInterval {
                    start: start + offset_start,
                    end: start + offset_end,
                }
            };
            fragments.push(fragment);
        }
        running += exon_len;
    }

    if fragments.is_empty() {
        return Err(Error::CodonNotFound { aa_pos: aa_pos });
    }

    fragments.sort();
    let mut merged: Vec<GenomicInterval> = Vec::new();
    for fragment in fragments {
        let extend = match merged.last() {
            Some(last) => fragment.start <= last.end + 1,
            None => false,
        };
        if extend {
            let n = merged.len();
            merged[n - 1].end = cmp::max(merged[n - 1].end, fragment.end);
        } else {
            merged.push(fragment);
        }
    }

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use error::Error;

    fn interval(start: Pos, end: Pos) -> GenomicInterval {
        GenomicInterval {
            start: start,
            end: end,
        }
    }

    #[test]
    fn test_first_codon_forward() {
        let exons = vec![(100, 300)];
        let spans = map_codon(&exons, 1, Strand::Forward).unwrap();
        assert_eq!(spans, vec![interval(100, 102)]);
    }

    #[test]
    fn test_first_codon_reverse() {
        // transcript start is the genomic end on the minus strand
        let exons = vec![(100, 300)];
        let spans = map_codon(&exons, 1, Strand::Reverse).unwrap();
        assert_eq!(spans, vec![interval(298, 300)]);
    }

    #[test]
    fn test_codon_length_within_exon() {
        let exons = vec![(100, 300)];
        for aa_pos in 1..67 {
            let spans = map_codon(&exons, aa_pos, Strand::Forward).unwrap();
            assert_eq!(spans.len(), 1);
            assert_eq!(spans[0].len(), 3);

            let spans = map_codon(&exons, aa_pos, Strand::Reverse).unwrap();
            assert_eq!(spans.len(), 1);
            assert_eq!(spans[0].len(), 3);
        }
    }

    #[test]
    fn test_junction_codon_forward() {
        // exon 1 holds CDS bases 1-50; amino acid 17 spans CDS bases 49-51
        let exons = vec![(100, 149), (200, 260)];
        let spans = map_codon(&exons, 17, Strand::Forward).unwrap();
        assert_eq!(spans, vec![interval(148, 149), interval(200, 200)]);
        let total: Pos = spans.iter().map(|x| x.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_junction_codon_reverse() {
        // exon 1 (genomic 200-260) holds CDS bases 1-61; amino acid 21 spans CDS 61-63
        let exons = vec![(200, 260), (100, 149)];
        let spans = map_codon(&exons, 21, Strand::Reverse).unwrap();
        assert_eq!(spans, vec![interval(148, 149), interval(200, 200)]);
    }

    #[test]
    fn test_abutting_exons_merge() {
        // no intron between the exons, so the junction codon is one span
        let exons = vec![(100, 149), (150, 260)];
        let spans = map_codon(&exons, 17, Strand::Forward).unwrap();
        assert_eq!(spans, vec![interval(148, 150)]);
    }

    #[test]
    fn test_last_codon() {
        let exons = vec![(100, 102)];
        let spans = map_codon(&exons, 1, Strand::Forward).unwrap();
        assert_eq!(spans, vec![interval(100, 102)]);
    }

    #[test]
    fn test_codon_out_of_range() {
        let exons = vec![(100, 102)];
        match map_codon(&exons, 2, Strand::Forward) {
            Err(Error::CodonNotFound { aa_pos }) => assert_eq!(aa_pos, 2),
            other => panic!("expected CodonNotFound, got {:?}", other),
        }
        assert!(map_codon(&exons, 0, Strand::Forward).is_err());
        assert!(map_codon(&exons, 1000, Strand::Forward).is_err());
    }

    #[test]
    fn test_codon_position_near_numeric_limit() {
        // codon arithmetic must not wrap around for huge positions
        let exons = vec![(100, 300)];
        for &aa_pos in &[u64::max_value(), u64::max_value() / 3, u64::max_value() / 3 + 1] {
            match map_codon(&exons, aa_pos, Strand::Forward) {
                Err(Error::CodonNotFound { aa_pos: reported }) => assert_eq!(reported, aa_pos),
                other => panic!("expected CodonNotFound, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unknown_strand_maps_like_forward() {
        let exons = vec![(100, 300)];
        let spans = map_codon(&exons, 1, Strand::Unknown).unwrap();
        assert_eq!(spans, vec![interval(100, 102)]);
    }
}
