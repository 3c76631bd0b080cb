//! Trait-list combination.
//!
//! Morphs and hets are plain string identifiers. Parents' lists are merged
//! into a duplicate-free union that keeps first-seen order, so offspring
//! trait lists are stable for a given pair of parents.

/// Union of two trait lists without duplicates, in first-seen order.
pub fn combine_traits<S: AsRef<str>>(first: &[S], second: &[S]) -> Vec<String> {
    let mut combined: Vec<String> = Vec::with_capacity(first.len() + second.len());
    for gene in first.iter().chain(second.iter()) {
        let gene = gene.as_ref();
        if !combined.iter().any(|g| g == gene) {
            combined.push(gene.to_string());
        }
    }
    combined
}

/// Total genes carried: every morph plus every het.
pub fn gene_count(morph_count: usize, het_count: usize) -> usize {
    morph_count + het_count
}

/// Whether every trait in `traits` appears in at least one of the parents.
pub fn inherited_from<S: AsRef<str>>(traits: &[S], mother: &[S], father: &[S]) -> bool {
    traits.iter().all(|t| {
        let t = t.as_ref();
        mother.iter().any(|m| m.as_ref() == t) || father.iter().any(|f| f.as_ref() == t)
    })
}
