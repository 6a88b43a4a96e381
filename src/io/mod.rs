pub mod gff;
pub mod fasta;
