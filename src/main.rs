extern crate clap;
extern crate codonmap;

use std::process;
use std::str;

use clap::{App, Arg};

use codonmap::coord::{self, GenomicInterval};
use codonmap::error::Error;
use codonmap::gene::{strand_sign, strand_symbol, GeneModel, Pos, Strand};
use codonmap::io::{fasta, gff};
use codonmap::locate::{self, CandidateMatch, Lookup};

fn main() {
    let matches = App::new("codonmap")
        .version("0.1.0")
        .about("Map an amino-acid position within a gene to genomic codon coordinates")
        .arg(
            Arg::with_name("gff")
                .help("GFF3 annotation file")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("query")
                .help("Gene or transcript identifier (substring match)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("aa-pos")
                .help("1-based amino-acid position")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("fasta")
                .long("fasta")
                .value_name("FILE")
                .takes_value(true)
                .help("Reference FASTA; also print the codon sequence"),
        )
        .get_matches();

    let gff_fn = matches.value_of("gff").unwrap();
    let query = matches.value_of("query").unwrap().trim();
    let aa_pos: Pos = match matches.value_of("aa-pos").unwrap().parse() {
        Ok(x) if x > 0 => x,
        _ => {
            eprintln!("amino-acid position must be a positive integer");
            process::exit(1);
        }
    };

    let mut reader = match gff::Reader::from_file(gff_fn) {
        Err(why) => {
            eprintln!("could not open {}: {}", gff_fn, why);
            process::exit(1);
        }
        Ok(reader) => reader,
    };

    let model = match locate::locate(&mut reader, query) {
        Err(why) => abort(why),
        Ok(Lookup::NotFound { diagnostics }) => {
            report_miss(query, gff_fn, &diagnostics);
            process::exit(2);
        }
        Ok(Lookup::Found(model)) => model,
    };

    report_model(&model);

    let spans = match coord::map_codon(&model.exons, aa_pos, model.strand) {
        Err(why) => abort(why),
        Ok(spans) => spans,
    };

    report_codon(&model, aa_pos, &spans);

    if let Some(fasta_fn) = matches.value_of("fasta") {
        match codon_sequence(fasta_fn, &model, &spans) {
            Err(why) => abort(why),
            Ok(codon) => println!("Codon sequence (coding strand): {}", codon),
        }
    }
}

fn abort(err: Error) -> ! {
    eprintln!("{}", err);
    process::exit(1);
}

fn report_model(model: &GeneModel) {
    println!(
        "Found CDS on {}, strand {} ({:+}), {} exon(s).",
        model.chromosome,
        strand_symbol(model.strand),
        strand_sign(model.strand),
        model.exons.len()
    );
    println!("Exons (transcript order):");
    for &(start, end) in &model.exons {
        println!("  {}-{}  (length {})", start, end, end - start + 1);
    }
}

fn report_codon(model: &GeneModel, aa_pos: Pos, spans: &[GenomicInterval]) {
    println!(
        "\nAmino acid {} -> codon genomic coordinates (1-based inclusive):",
        aa_pos
    );
    println!("Chromosome: {}", model.chromosome);
    let coords: Vec<String> = spans.iter().map(|x| x.to_string()).collect();
    println!(
        "Genomic codon: {}:{}  (strand {})",
        model.chromosome,
        coords.join(","),
        strand_symbol(model.strand)
    );
    if spans.len() > 1 {
        println!("Note: this codon spans an exon junction; its bases are not contiguous.");
    }
}

fn report_miss(query: &str, gff_fn: &str, diagnostics: &[CandidateMatch]) {
    println!("No CDS found for your query. Diagnostics / matching attributes found in GFF:");
    for m in diagnostics {
        println!("   {}", m);
    }
    println!("\nTip: try running this to find candidate lines in the GFF that contain your query:");
    println!("  grep -n '{}' {} | head -n 50", query, gff_fn);
}

/// Fetch the codon bases span by span, in transcript order, so the
/// concatenated sequence reads 5' to 3' on the coding strand.
fn codon_sequence(
    fasta_fn: &str,
    model: &GeneModel,
    spans: &[GenomicInterval],
) -> Result<String, Error> {
    let ordered: Vec<&GenomicInterval> = if model.strand == Strand::Reverse {
        spans.iter().rev().collect()
    } else {
        spans.iter().collect()
    };
    let mut codon = String::new();
    for span in ordered {
        let seq = fasta::extract_from_file(fasta_fn, &model.chromosome, model.strand, span)?;
        match str::from_utf8(&seq) {
            Ok(s) => codon.push_str(s),
            Err(_) => codon.push('?'),
        }
    }
    Ok(codon)
}
