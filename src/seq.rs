pub type Nucleotide = u8;

pub type DnaSeq = Vec<Nucleotide>;

/// Watson-Crick complement, normalized to uppercase.
/// Symbols outside {A,C,G,T} (e.g. ambiguity codes) pass through unchanged.
pub fn complement(x: Nucleotide) -> Nucleotide {
    match x {
        b'A' | b'a' => b'T',
        b'C' | b'c' => b'G',
        b'G' | b'g' => b'C',
        b'T' | b't' => b'A',
        _ => x.to_ascii_uppercase(),
    }
}

/// Reverse complement sequence in place.
pub fn reverse_complement(seq: &mut DnaSeq) {
    let n = seq.len();
    for i in 0..(n / 2) {
        let j = n - 1 - i;
        // complement nucleotide and reverse order in-place
        let x = complement(seq[i]);
        seq[i] = complement(seq[j]);
        seq[j] = x;
    }
    if n % 2 == 1 {
        // if sequence length is odd, then the lone middle element has not been touched
        let j = n / 2;
        seq[j] = complement(seq[j]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement() {
        assert_eq!(complement(b'A'), b'T');
        assert_eq!(complement(b'C'), b'G');
        assert_eq!(complement(b'G'), b'C');
        assert_eq!(complement(b'T'), b'A');
        assert_eq!(complement(b'a'), b'T');
        assert_eq!(complement(b'N'), b'N');
        assert_eq!(complement(b'n'), b'N');
    }

    #[test]
    fn test_reverse_complement() {
        let mut seq: DnaSeq = b"AACG".to_vec();
        reverse_complement(&mut seq);
        assert_eq!(seq, b"CGTT".to_vec());

        // odd length
        let mut seq: DnaSeq = b"ACGTN".to_vec();
        reverse_complement(&mut seq);
        assert_eq!(seq, b"NACGT".to_vec());

        // lowercase input is normalized to uppercase
        let mut seq: DnaSeq = b"aacg".to_vec();
        reverse_complement(&mut seq);
        assert_eq!(seq, b"CGTT".to_vec());
    }

    #[test]
    fn test_reverse_complement_involution() {
        let original: DnaSeq = b"ATCGGATTACA".to_vec();
        let mut seq = original.clone();
        reverse_complement(&mut seq);
        reverse_complement(&mut seq);
        assert_eq!(seq, original);
    }
}
