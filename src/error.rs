use std::fmt;
use std::io;
use std::num;
use std::result;

use csv;

use gene::Pos;

#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Gff(csv::Error),
    /// Annotation line with non-numeric start or end coordinates.
    ParseCoord(num::ParseIntError),
    /// CDS segments of one transcript disagree on contig or strand.
    InconsistentModel {
        transcript: String,
        seqids: Vec<String>,
        strands: Vec<char>,
    },
    /// Requested amino-acid position lies outside the coding sequence.
    CodonNotFound { aa_pos: Pos },
    /// Chromosome absent from the reference, or interval past its bases.
    SequenceNotFound { chrom: String, end: Pos },
}

pub type Result<T> = result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Io(ref err) => write!(f, "i/o error: {}", err),
            Error::Gff(ref err) => write!(f, "invalid annotation record: {}", err),
            Error::ParseCoord(ref err) => {
                write!(f, "non-numeric coordinate in annotation: {}", err)
            }
            Error::InconsistentModel {
                ref transcript,
                ref seqids,
                ref strands,
            } => write!(
                f,
                "CDS entries for {} have inconsistent seqid/strand: seqids={:?}, strands={:?}",
                transcript, seqids, strands
            ),
            Error::CodonNotFound { aa_pos } => write!(
                f,
                "codon for amino acid {} not found within exons (check the position and exon boundaries)",
                aa_pos
            ),
            Error::SequenceNotFound { ref chrom, end } => write!(
                f,
                "could not find chromosome {} or position {} in the reference",
                chrom, end
            ),
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Error {
        Error::Gff(err)
    }
}

impl From<num::ParseIntError> for Error {
    fn from(err: num::ParseIntError) -> Error {
        Error::ParseCoord(err)
    }
}
