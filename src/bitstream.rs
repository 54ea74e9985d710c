use bitvec::{order::Msb0, slice::BitSlice, vec::BitVec};

use crate::{
    code_table::CodeTable,
    error::{CodecError, Corruption, Result},
};

/// Encoded payload, byte aligned, with the number of zero bits appended to
/// the final byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packed {
    pub bytes: Vec<u8>,
    pub padding: u8,
}

pub fn padding_for(total_bits: usize) -> u8 {
    ((8 - total_bits % 8) % 8) as u8
}

pub fn huff_encode(bytes: &[u8], table: &CodeTable) -> Result<Packed> {
    let mut bits: BitVec<u8, Msb0> = BitVec::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let code = table.get(*byte).ok_or(CodecError::MissingCode(*byte))?;
        bits.extend_from_bitslice(code);
    }

    let padding = padding_for(bits.len());
    bits.resize(bits.len() + padding as usize, false);

    Ok(Packed {
        bytes: bits.into_vec(),
        padding,
    })
}

#[derive(Debug, Default)]
struct Branch {
    children: [Option<Box<DecodeNode>>; 2],
}

#[derive(Debug)]
enum DecodeNode {
    Leaf(u8),
    Branch(Branch),
}

/// Prefix tree rebuilt from (symbol, code) pairs. Unlike the frequency tree it
/// can have missing children when the code set is not complete.
#[derive(Debug, Default)]
pub struct DecodeTree {
    root: Branch,
}

impl DecodeTree {
    pub fn from_code_table(table: &CodeTable) -> Result<Self> {
        let mut tree = DecodeTree::default();
        for (symbol, code) in table.iter() {
            tree.insert(symbol, code)?;
        }
        Ok(tree)
    }

    fn insert(&mut self, symbol: u8, code: &BitSlice<u8, Msb0>) -> Result<()> {
        let Some((last, path)) = code.split_last() else {
            return Err(Corruption::ZeroLengthCode(symbol).into());
        };

        let mut branch = &mut self.root;
        for bit in path.iter().by_vals() {
            let child = branch.children[bit as usize]
                .get_or_insert_with(|| Box::new(DecodeNode::Branch(Branch::default())));
            branch = match &mut **child {
                DecodeNode::Branch(next) => next,
                DecodeNode::Leaf(_) => return Err(Corruption::NotPrefixFree(symbol).into()),
            };
        }

        let slot = &mut branch.children[*last as usize];
        if slot.is_some() {
            return Err(Corruption::NotPrefixFree(symbol).into());
        }
        *slot = Some(Box::new(DecodeNode::Leaf(symbol)));
        Ok(())
    }
}

/// Walks `tree` over the payload bits, dropping the trailing `padding` bits.
/// Every symbol must end exactly on a leaf; running out of bits part way
/// through a code is a [`CodecError::TruncatedStream`].
pub fn huff_decode(payload: &[u8], padding: u8, tree: &DecodeTree) -> Result<Vec<u8>> {
    if padding > 7 {
        return Err(Corruption::BadPadding(padding).into());
    }
    let bits = BitSlice::<u8, Msb0>::from_slice(payload);
    let Some(used) = bits.len().checked_sub(padding as usize) else {
        return Err(Corruption::PaddingWithoutPayload {
            padding,
            payload_len: payload.len(),
        }
        .into());
    };

    let mut decoded = Vec::with_capacity(payload.len() * 2);
    let mut branch = &tree.root;
    let mut pending_bits = 0;
    for (position, bit) in bits[..used].iter().by_vals().enumerate() {
        match branch.children[bit as usize].as_deref() {
            Some(DecodeNode::Leaf(symbol)) => {
                decoded.push(*symbol);
                branch = &tree.root;
                pending_bits = 0;
            }
            Some(DecodeNode::Branch(next)) => {
                branch = next;
                pending_bits += 1;
            }
            None => return Err(Corruption::UnmappedPath(position).into()),
        }
    }

    if pending_bits > 0 {
        return Err(CodecError::TruncatedStream { pending_bits });
    }
    Ok(decoded)
}
