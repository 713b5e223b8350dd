//! Standard genetic code and synonymous codon lookup.
use std::collections::HashMap;

const BASES: &[u8; 4] = b"TCAG";

// Amino acids for all 64 codons, enumerated with each position in TCAG order
const AMINO_ACIDS: &[u8; 64] =
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

const STOP: u8 = b'*';

pub type Codon = [u8; 3];

lazy_static! {
    // Sense codons only, in table order
    static ref CODONS: Vec<(Codon, u8)> = {
        let mut codons = Vec::with_capacity(61);

        for (idx, &aa) in AMINO_ACIDS.iter().enumerate() {
            if aa != STOP {
                let codon = [BASES[idx / 16], BASES[(idx / 4) % 4], BASES[idx % 4]];
                codons.push((codon, aa));
            }
        }

        codons
    };

    static ref FORWARD: HashMap<Codon, u8> = CODONS.iter().cloned().collect();

    static ref BACKWARD: HashMap<u8, Vec<Codon>> = {
        let mut table: HashMap<u8, Vec<Codon>> = HashMap::new();
        for &(codon, aa) in CODONS.iter() {
            table.entry(aa).or_insert_with(Vec::new).push(codon);
        }

        table
    };
}

fn as_codon(codon: &[u8]) -> Option<Codon> {
    match codon {
        [a, b, c] => Some([
            a.to_ascii_uppercase(),
            b.to_ascii_uppercase(),
            c.to_ascii_uppercase(),
        ]),
        _ => None,
    }
}

/// One-letter amino acid for a sense codon; `None` for stops and anything unmapped.
pub fn translate(codon: &[u8]) -> Option<u8> {
    as_codon(codon).and_then(|codon| FORWARD.get(&codon).cloned())
}

/// All codons for an amino acid, in table order.
pub fn codons_for(aa: u8) -> &'static [Codon] {
    match BACKWARD.get(&aa.to_ascii_uppercase()) {
        Some(codons) => codons,
        None => &[],
    }
}

/// The first codon in table order that encodes the same amino acid as
/// `codon` but differs from it.
pub fn first_synonym(codon: &[u8]) -> Option<Codon> {
    let current = as_codon(codon)?;
    let aa = translate(&current)?;

    codons_for(aa)
        .iter()
        .find(|&&candidate| candidate != current)
        .cloned()
}
