pub use bio_types::strand::Strand;

pub type Pos = u64;

/// A single coding exon as annotated, belonging to one transcript.
/// All positions are 1-based, closed.
#[derive(Debug, Clone)]
pub struct CdsSegment {
    /// Chromosome or contig name
    pub seqid: String,
    /// Genomic start position
    pub start: Pos,
    /// Genomic end position (inclusive)
    pub end: Pos,
    /// Genomic strand
    pub strand: Strand,
}

/// Reconstructed single-transcript gene model.
/// All positions are 1-based, closed.
#[derive(Debug)]
pub struct GeneModel {
    /// Identifier of the transcript the exons belong to
    pub transcript: String,
    /// Chromosome or contig name
    pub chromosome: String,
    /// Genomic strand
    pub strand: Strand,
    /// Coding exons in transcript order: ascending genomic start on the plus
    /// strand, descending genomic start on the minus strand
    pub exons: Vec<(Pos, Pos)>,
}

impl GeneModel {
    /// Total length of the coding sequence in nucleotides.
    pub fn coding_len(&self) -> Pos {
        self.exons.iter().map(|&(start, end)| end - start + 1).sum()
    }
}

pub fn strand_symbol(strand: Strand) -> char {
    match strand {
        Strand::Forward => '+',
        Strand::Reverse => '-',
        Strand::Unknown => '.',
    }
}

pub fn strand_sign(strand: Strand) -> i8 {
    match strand {
        Strand::Forward => 1,
        Strand::Reverse => -1,
        Strand::Unknown => 0,
    }
}
