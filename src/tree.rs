use std::{cmp::Ordering, collections::BinaryHeap, fmt};

use crate::frequency::FrequencyTable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        freq: u64,
    },
    /// `right` is only ever `None` under the synthetic root of a one-symbol
    /// tree, which gives that symbol the code `0`.
    Internal {
        freq: u64,
        left: Box<HuffNode>,
        right: Option<Box<HuffNode>>,
    },
}

impl HuffNode {
    pub fn freq(&self) -> u64 {
        match self {
            HuffNode::Leaf { freq, .. } | HuffNode::Internal { freq, .. } => *freq,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    fn merge(left: HuffNode, right: HuffNode) -> HuffNode {
        HuffNode::Internal {
            freq: left.freq() + right.freq(),
            left: Box::new(left),
            right: Some(Box::new(right)),
        }
    }

    fn display_with_indent(
        &self,
        f: &mut fmt::Formatter<'_>,
        indent: &str,
        last: bool,
    ) -> fmt::Result {
        f.write_str(indent)?;
        f.write_str(if last { "└─ " } else { "├─ " })?;
        match self {
            HuffNode::Leaf { symbol, freq } => writeln!(f, "Count: {freq} (Leaf Value: {symbol})")?,
            HuffNode::Internal { freq, .. } => writeln!(f, "Count: {freq}")?,
        }

        let HuffNode::Internal { left, right, .. } = self else {
            return Ok(());
        };
        let new_indent = if last {
            format!("{indent}    ")
        } else {
            format!("{indent}│   ")
        };
        left.display_with_indent(f, &new_indent, right.is_none())?;
        if let Some(right) = right {
            right.display_with_indent(f, &new_indent, true)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffTree {
    root: HuffNode,
}

impl HuffTree {
    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn freq(&self) -> u64 {
        self.root.freq()
    }
}

impl fmt::Display for HuffTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.display_with_indent(f, "", true)
    }
}

// Heap entry ordered by frequency, then by insertion sequence. Reversed so
// `BinaryHeap` (a max-heap) pops the smallest first.
#[derive(Debug)]
struct Pending {
    freq: u64,
    seq: u32,
    node: HuffNode,
}

impl PartialEq for Pending {
    fn eq(&self, other: &Self) -> bool {
        self.freq == other.freq && self.seq == other.seq
    }
}

impl Eq for Pending {}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .freq
            .cmp(&self.freq)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Builds the Huffman tree for `freq_table`, or `None` when it is empty.
///
/// Leaves are queued in ascending symbol order and every merged node takes the
/// next sequence number, so equal frequencies resolve by insertion order. The
/// first node popped becomes the left child.
pub fn build_huffman_tree(freq_table: &FrequencyTable) -> Option<HuffTree> {
    let mut heap = BinaryHeap::with_capacity(freq_table.distinct());
    let mut seq = 0;
    for (symbol, freq) in freq_table.iter() {
        heap.push(Pending {
            freq,
            seq,
            node: HuffNode::Leaf { symbol, freq },
        });
        seq += 1;
    }

    if heap.len() == 1 {
        let only = heap.pop()?.node;
        return Some(HuffTree {
            root: HuffNode::Internal {
                freq: only.freq(),
                left: Box::new(only),
                right: None,
            },
        });
    }

    while heap.len() > 1 {
        let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
            break;
        };
        let node = HuffNode::merge(left.node, right.node);
        heap.push(Pending {
            freq: node.freq(),
            seq,
            node,
        });
        seq += 1;
    }

    heap.pop().map(|pending| HuffTree { root: pending.node })
}
