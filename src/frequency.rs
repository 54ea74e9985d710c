/// Occurrence count for every byte value. Absent symbols hold zero and are
/// skipped by [`FrequencyTable::iter`], so callers only ever see the sparse view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable([u64; 256]);

pub fn tally_frequency(bytes: &[u8]) -> FrequencyTable {
    let mut table = FrequencyTable([0; 256]);
    bytes.iter().for_each(|byte| table.0[*byte as usize] += 1);
    table
}

impl FrequencyTable {
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.0[symbol as usize] {
            0 => None,
            count => Some(count),
        }
    }

    /// Present symbols with their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }

    pub fn distinct(&self) -> usize {
        self.0.iter().filter(|count| **count > 0).count()
    }

    pub fn total(&self) -> u64 {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|count| *count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_symbol() {
        let table = tally_frequency(b"AAABBC");

        assert_eq!(table.get(b'A'), Some(3));
        assert_eq!(table.get(b'B'), Some(2));
        assert_eq!(table.get(b'C'), Some(1));
        assert_eq!(table.get(b'D'), None);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn tally_empty_input() {
        let table = tally_frequency(&[]);
        assert!(table.is_empty());
        assert_eq!(table.distinct(), 0);
        assert_eq!(table.iter().count(), 0);
    }

    #[test]
    fn iter_is_sparse_and_ordered() {
        let table = tally_frequency(&[255, 0, 7, 255, 0, 0]);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0, 3), (7, 1), (255, 2)]);
    }

    #[test]
    fn total_matches_input_length_for_full_alphabet() {
        let bytes: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let table = tally_frequency(&bytes);
        assert_eq!(table.distinct(), 256);
        assert_eq!(table.total(), bytes.len() as u64);
    }
}
