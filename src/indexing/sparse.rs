/// Sparse feature vector with entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from unsorted entries. Zero weights are dropped and repeated
    /// indices are summed.
    pub fn from_entries(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_unstable_by_key(|(index, _)| *index);
        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, weight) in entries {
            match merged.last_mut() {
                Some((last, total)) if *last == index => *total += weight,
                _ => merged.push((index, weight)),
            }
        }
        merged.retain(|(_, weight)| *weight != 0.0);
        Self { entries: merged }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries
            .iter()
            .map(|(_, w)| w * w)
            .sum::<f64>()
            .sqrt()
    }

    /// Scale to unit length. The zero vector stays zero.
    pub fn normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, weight) in &mut self.entries {
                *weight /= norm;
            }
        }
        self
    }

    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_index, a_weight) = self.entries[i];
            let (b_index, b_weight) = other.entries[j];
            match a_index.cmp(&b_index) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_weight * b_weight;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }

    /// Cosine similarity; 0.0 when either side is the zero vector
    pub fn cosine(&self, other: &SparseVector) -> f64 {
        let norms = self.norm() * other.norm();
        if norms == 0.0 {
            return 0.0;
        }
        self.dot(other) / norms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_entries_sorts_and_merges() {
        let v = SparseVector::from_entries(vec![(3, 1.0), (1, 2.0), (3, 0.5), (2, 0.0)]);
        assert_eq!(v.entries(), &[(1, 2.0), (3, 1.5)]);
        assert_eq!(v.nnz(), 2);
    }

    #[test]
    fn test_dot_only_counts_shared_indices() {
        let a = SparseVector::from_entries(vec![(0, 1.0), (2, 3.0)]);
        let b = SparseVector::from_entries(vec![(1, 5.0), (2, 2.0)]);
        assert_eq!(a.dot(&b), 6.0);
    }

    #[test]
    fn test_normalized_has_unit_norm() {
        let v = SparseVector::from_entries(vec![(0, 3.0), (1, 4.0)]).normalized();
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.entries()[0].1 - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_zero_vector_similarity() {
        let zero = SparseVector::default();
        let v = SparseVector::from_entries(vec![(0, 1.0)]);
        assert!(zero.is_zero());
        assert_eq!(zero.cosine(&v), 0.0);
        assert_eq!(zero.clone().normalized(), zero);
    }

    #[test]
    fn test_cosine_of_identical_vectors() {
        let v = SparseVector::from_entries(vec![(0, 2.0), (4, 1.0)]);
        assert!((v.cosine(&v) - 1.0).abs() < 1e-12);
    }
}
