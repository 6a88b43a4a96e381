use std::convert::AsRef;
use std::fs;
use std::io;
use std::path::Path;

use coord::GenomicInterval;
use error::{Error, Result};
use gene::Strand;
use seq::{self, DnaSeq};

/// Extract the bases covered by `interval` from one record of a FASTA stream.
///
/// Records are scanned in order; only the record whose name (the first
/// whitespace-delimited token of its header) equals `chrom`, compared
/// case-insensitively, is accumulated. All other records are skipped without
/// buffering, and the scan stops as soon as the accumulated sequence covers
/// the interval end, so large multi-chromosome references are never loaded
/// whole. Minus-strand intervals are returned reverse-complemented.
pub fn extract<R: io::BufRead>(
    reader: R,
    chrom: &str,
    strand: Strand,
    interval: &GenomicInterval,
) -> Result<DnaSeq> {
    let start = (interval.start - 1) as usize;
    let end = interval.end as usize;

    let mut inside = false;
    let mut seq: DnaSeq = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.starts_with('>') {
            inside = match record_name(line) {
                Some(name) => name.eq_ignore_ascii_case(chrom),
                None => false,
            };
        } else if inside {
            seq.extend_from_slice(line.as_bytes());
            if seq.len() >= end {
                let mut out: DnaSeq = seq[start..end].to_vec();
                if strand == Strand::Reverse {
                    seq::reverse_complement(&mut out);
                }
                return Ok(out);
            }
        }
    }

    Err(Error::SequenceNotFound {
        chrom: chrom.to_owned(),
        end: interval.end,
    })
}

/// Extract from a FASTA file on disk.
pub fn extract_from_file<P: AsRef<Path>>(
    path: P,
    chrom: &str,
    strand: Strand,
    interval: &GenomicInterval,
) -> Result<DnaSeq> {
    let file = fs::File::open(path)?;
    extract(io::BufReader::new(file), chrom, strand, interval)
}

/// Record name is the first whitespace-delimited token after the marker.
fn record_name(header: &str) -> Option<&str> {
    header[1..].split_whitespace().next()
}
