use std::collections::BTreeSet;
use std::fmt;
use std::io;

use linked_hash_map::LinkedHashMap;
use multimap::MultiMap;

use error::{Error, Result};
use gene::{strand_symbol, CdsSegment, GeneModel, Pos, Strand};
use io::gff;

/// Attribute keys inspected for query matches, in priority order.
const ID_KEYS: [&'static str; 6] = ["ID", "Parent", "Name", "gene_id", "transcript_id", "Dbxref"];

/// A near-miss surfaced when no transcript resolves for a query.
/// Diagnostic only; never participates in coordinate computation.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum CandidateMatch {
    /// An identifying attribute whose value contains the query
    Attribute { key: String, value: String },
    /// A CDS parent identifier containing the query
    Parent { id: String },
}

impl fmt::Display for CandidateMatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CandidateMatch::Attribute { ref key, ref value } => write!(f, "{}={}", key, value),
            CandidateMatch::Parent { ref id } => write!(f, "Parent_contains={}", id),
        }
    }
}

/// Outcome of a gene-model lookup.
/// A miss is a value, not an error, so callers can present the diagnostics.
#[derive(Debug)]
pub enum Lookup {
    Found(GeneModel),
    NotFound { diagnostics: Vec<CandidateMatch> },
}

type ParentIndex = LinkedHashMap<String, Vec<CdsSegment>>;

/// Resolve a gene-identifier query to a single transcript's gene model.
///
/// The annotation is streamed exactly once, building an insertion-ordered
/// index of CDS segments per parent transcript and a set of attribute values
/// containing the query. Resolution then applies ranked strategies over the
/// index; the first to yield a transcript wins:
///
/// 1. a parent identifier containing the query;
/// 2. a parent identifier implicated by an attribute match;
/// 3. when no attribute matched at all, a parent containing the query;
/// 4. a parent identifier starting with the query (tolerates truncated or
///    suffix-bearing identifiers such as `.1` isoforms).
///
/// Matching is case-sensitive substring containment, so partial identifiers
/// resolve. A query that resolves nothing yields `Lookup::NotFound` with the
/// sorted candidate matches.
pub fn locate<R: io::Read>(reader: &mut gff::Reader<R>, query: &str) -> Result<Lookup> {
    let mut cds_by_parent: ParentIndex = LinkedHashMap::new();
    let mut diagnostics: BTreeSet<CandidateMatch> = BTreeSet::new();
    let mut implicated: BTreeSet<String> = BTreeSet::new();

    for r in reader.records() {
        let record = r?;
        let attrs = &record.attributes;

        for key in ID_KEYS.iter() {
            let value = match attrs.get(*key) {
                Some(value) => value,
                None => continue,
            };
            if value.contains(query) {
                diagnostics.insert(CandidateMatch::Attribute {
                    key: (*key).to_owned(),
                    value: value.clone(),
                });
                // remember which transcripts this match points at
                if let Some(id) = attrs.get("ID") {
                    implicated.insert(id.clone());
                }
                if let Some(parent) = attrs.get("Parent") {
                    for p in parent.split(',') {
                        implicated.insert(p.to_owned());
                    }
                }
            }
        }

        if record.feature_type == "CDS" {
            for parent in cds_parents(attrs) {
                cds_by_parent
                    .entry(parent)
                    .or_insert_with(Vec::new)
                    .push(CdsSegment {
                        seqid: record.seqid.clone(),
                        start: record.start,
                        end: record.end,
                        strand: record.strand,
                    });
            }
        }
    }

    let attr_matched = !diagnostics.is_empty();
    if !attr_matched {
        for parent in cds_by_parent.keys() {
            if parent.contains(query) {
                diagnostics.insert(CandidateMatch::Parent { id: parent.clone() });
            }
        }
    }

    // ranked resolution: first strategy to yield a transcript wins
    let chosen = by_substring(&cds_by_parent, query)
        .or_else(|| by_implication(&cds_by_parent, &implicated))
        .or_else(|| {
            if attr_matched {
                None
            } else {
                by_substring(&cds_by_parent, query)
            }
        })
        .or_else(|| by_prefix(&cds_by_parent, query));

    let chosen = match chosen {
        Some(id) => id,
        None => {
            return Ok(Lookup::NotFound {
                diagnostics: diagnostics.into_iter().collect(),
            })
        }
    };

    let segments = cds_by_parent
        .remove(&chosen)
        .expect("chosen transcript is indexed");
    build_model(chosen, segments)
}

/// Parent transcript identifiers a CDS record belongs to.
/// `Parent` may be a comma-separated list; the record's own `ID` is the
/// fallback when no parent-like attribute is present.
fn cds_parents(attrs: &MultiMap<String, String>) -> Vec<String> {
    let parent = attrs
        .get("Parent")
        .or_else(|| attrs.get("Gene"))
        .or_else(|| attrs.get("Transcript"));
    match parent {
        Some(p) => p.split(',').map(String::from).collect(),
        None => match attrs.get("ID") {
            Some(id) => vec![id.clone()],
            None => Vec::new(),
        },
    }
}

fn by_substring(index: &ParentIndex, query: &str) -> Option<String> {
    index.keys().find(|p| p.contains(query)).cloned()
}

fn by_implication(index: &ParentIndex, implicated: &BTreeSet<String>) -> Option<String> {
    index.keys().find(|p| implicated.contains(*p)).cloned()
}

fn by_prefix(index: &ParentIndex, query: &str) -> Option<String> {
    index.keys().find(|p| p.starts_with(query)).cloned()
}

/// Validate segment consistency and order exons in transcript order.
fn build_model(transcript: String, segments: Vec<CdsSegment>) -> Result<Lookup> {
    let seqids: BTreeSet<&str> = segments.iter().map(|s| s.seqid.as_str()).collect();
    let strands: BTreeSet<char> = segments.iter().map(|s| strand_symbol(s.strand)).collect();
    if seqids.len() > 1 || strands.len() > 1 {
        // corrupt annotation; cannot be guessed around
        return Err(Error::InconsistentModel {
            transcript: transcript,
            seqids: seqids.into_iter().map(String::from).collect(),
            strands: strands.into_iter().collect(),
        });
    }

    let chromosome = segments[0].seqid.clone();
    let strand = segments[0].strand;

    let mut exons: Vec<(Pos, Pos)> = segments.iter().map(|s| (s.start, s.end)).collect();
    if strand == Strand::Reverse {
        // transcript order is descending genomic order on the minus strand
        exons.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        exons.sort_by(|a, b| a.0.cmp(&b.0));
    }

    Ok(Lookup::Found(GeneModel {
        transcript: transcript,
        chromosome: chromosome,
        strand: strand,
        exons: exons,
    }))
}
