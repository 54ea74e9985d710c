use std::collections::BTreeMap;

use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};

use crate::tree::{HuffNode, HuffTree};

pub type Code = BitVec<u8, Msb0>;

/// Symbol to code mapping. `0` is a step to the left child, `1` to the right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable(BTreeMap<u8, Code>);

impl CodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: u8, code: Code) -> Option<Code> {
        self.0.insert(symbol, code)
    }

    pub fn get(&self, symbol: u8) -> Option<&BitSlice<u8, Msb0>> {
        self.0.get(&symbol).map(|code| code.as_bitslice())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BitSlice<u8, Msb0>)> + '_ {
        self.0.iter().map(|(symbol, code)| (*symbol, code.as_bitslice()))
    }

    /// True when every code is non-empty and none starts with another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<_> = self.0.values().collect();
        codes.iter().enumerate().all(|(i, code)| {
            !code.is_empty()
                && codes
                    .iter()
                    .enumerate()
                    .all(|(j, other)| i == j || !other.starts_with(code.as_bitslice()))
        })
    }
}

pub fn generate_code_table(tree: &HuffTree) -> CodeTable {
    let mut table = CodeTable::new();
    let mut path = Code::new();
    walk(tree.root(), &mut path, &mut table);
    table
}

fn walk(node: &HuffNode, path: &mut Code, table: &mut CodeTable) {
    match node {
        HuffNode::Leaf { symbol, .. } => {
            table.insert(*symbol, path.clone());
        }
        HuffNode::Internal { left, right, .. } => {
            path.push(false);
            walk(left, path, table);
            path.pop();

            if let Some(right) = right {
                path.push(true);
                walk(right, path, table);
                path.pop();
            }
        }
    }
}

/// Renders a code as a string of `0`/`1` characters.
pub fn render_code(code: &BitSlice<u8, Msb0>) -> String {
    code.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{frequency::tally_frequency, tree::build_huffman_tree};

    fn table_for(bytes: &[u8]) -> CodeTable {
        generate_code_table(&build_huffman_tree(&tally_frequency(bytes)).unwrap())
    }

    fn rendered(table: &CodeTable) -> Vec<(u8, String)> {
        table
            .iter()
            .map(|(symbol, code)| (symbol, render_code(code)))
            .collect()
    }

    #[test]
    fn aaabbc_codes() {
        let table = table_for(b"AAABBC");
        assert_eq!(
            rendered(&table),
            vec![
                (b'A', "0".to_string()),
                (b'B', "11".to_string()),
                (b'C', "10".to_string()),
            ]
        );
        let len = |s| table.get(s).unwrap().len();
        assert!(len(b'A') <= len(b'B'));
        assert!(len(b'B') <= len(b'C'));
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let table = table_for(&[9; 40]);
        assert_eq!(rendered(&table), vec![(9, "0".to_string())]);
    }

    #[test]
    fn every_present_symbol_has_a_code() {
        let bytes = b"mississippi river";
        let table = table_for(bytes);
        let freqs = tally_frequency(bytes);
        assert_eq!(table.len(), freqs.distinct());
        for (symbol, _) in freqs.iter() {
            assert!(table.get(symbol).is_some());
        }
    }

    #[test]
    fn generated_tables_are_prefix_free() {
        let full: Vec<u8> = (0..=255u8).flat_map(|b| vec![b; b as usize % 7 + 1]).collect();
        for bytes in [&b"AAABBC"[..], b"abracadabra", b"x", &full] {
            assert!(table_for(bytes).is_prefix_free());
        }
    }

    #[test]
    fn prefix_collision_is_detected() {
        let mut table = CodeTable::new();
        table.insert(1, Code::from_iter([true]));
        table.insert(2, Code::from_iter([true, false]));
        assert!(!table.is_prefix_free());

        let mut empty_code = CodeTable::new();
        empty_code.insert(1, Code::new());
        assert!(!empty_code.is_prefix_free());
    }

    #[test]
    fn table_derivation_is_deterministic() {
        let bytes = b"she sells sea shells by the sea shore";
        assert_eq!(table_for(bytes), table_for(bytes));
    }
}
