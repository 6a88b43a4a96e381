use std::convert::AsRef;
use std::fs;
use std::io;
use std::path::Path;

use csv;
use multimap::MultiMap;

use error::{Error, Result};
use gene::{Pos, Strand};

/// A GFF3 feature reader.
///
/// Features are tab-delimited with 9 columns; comment lines start with `#`
/// and blank lines are ignored.
pub struct Reader<R: io::Read> {
    inner: csv::Reader<R>,
}

impl Reader<fs::File> {
    /// Read from a given file path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        fs::File::open(path).map(Reader::new)
    }
}

impl<R: io::Read> Reader<R> {
    /// Read from a given reader.
    pub fn new(reader: R) -> Self {
        Reader {
            inner: csv::ReaderBuilder::new()
                .delimiter(b'\t')
                .comment(Some(b'#'))
                .has_headers(false)
                .flexible(true)
                .quoting(false)
                .from_reader(reader),
        }
    }

    /// Iterate over feature records.
    pub fn records(&mut self) -> Records<R> {
        Records {
            inner: self.inner.records(),
        }
    }
}

pub struct Records<'r, R: 'r + io::Read> {
    inner: csv::StringRecordsIter<'r, R>,
}

impl<'r, R: io::Read> Iterator for Records<'r, R> {
    type Item = Result<Record>;

    /// Get next feature record.
    /// Rows with fewer than 9 columns are skipped: annotation dumps often
    /// carry structural artifacts that are not feature lines.
    fn next(&mut self) -> Option<Result<Record>> {
        while let Some(res) = self.inner.next() {
            let row = match res {
                Err(err) => return Some(Err(Error::Gff(err))),
                Ok(row) => row,
            };
            if row.len() < 9 {
                continue;
            }
            return Some(parse_row(&row));
        }
        None
    }
}

/// A GFF3 feature record.
/// Coordinates are kept 1-based, closed, as annotated.
#[derive(Debug)]
pub struct Record {
    /// Chromosome or contig name
    pub seqid: String,
    /// Feature type (third column), e.g. `gene`, `mRNA`, `CDS`
    pub feature_type: String,
    /// Genomic start position
    pub start: Pos,
    /// Genomic end position (inclusive)
    pub end: Pos,
    /// Genomic strand
    pub strand: Strand,
    /// Attribute column parsed into key-value pairs
    pub attributes: MultiMap<String, String>,
}

fn parse_row(row: &csv::StringRecord) -> Result<Record> {
    let start = row[3].parse::<Pos>()?;
    let end = row[4].parse::<Pos>()?;
    Ok(Record {
        seqid: row[0].to_owned(),
        feature_type: row[2].to_owned(),
        start: start,
        end: end,
        strand: parse_strand(&row[6]),
        attributes: parse_attributes(&row[8]),
    })
}

fn parse_strand(x: &str) -> Strand {
    match x {
        "+" => Strand::Forward,
        "-" => Strand::Reverse,
        _ => Strand::Unknown,
    }
}

/// Parse the attribute column into key-value pairs.
///
/// Pairs are semicolon-delimited and split on the first `=`, falling back to
/// the first space for `key value` style attributes. Pairs with neither
/// separator are dropped.
pub fn parse_attributes(x: &str) -> MultiMap<String, String> {
    let mut attrs = MultiMap::new();
    for part in x.trim().split(';') {
        if part.is_empty() {
            continue;
        }
        if let Some(i) = part.find('=') {
            attrs.insert(part[..i].to_owned(), part[i + 1..].to_owned());
        } else if let Some(i) = part.find(' ') {
            attrs.insert(part[..i].to_owned(), part[i + 1..].to_owned());
        }
    }
    attrs
}
