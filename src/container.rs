//! On-disk framing for a compressed buffer.
//!
//! ```text
//! [magic:4][symbol_count:2]
//! symbol_count x [symbol:1][code_len:1][code_bits:ceil(code_len / 8)]
//! [padding:1][payload_len:4][payload:payload_len]
//! ```
//!
//! Integers are big-endian. Code bits are stored MSB first and zero filled to
//! the byte boundary. The last magic byte is the format version.

use std::collections::HashSet;

use bitvec::{order::Msb0, slice::BitSlice};

use crate::{
    bitstream::{DecodeTree, Packed},
    code_table::{Code, CodeTable},
    error::{CodecError, Corruption, Result},
};

pub const MAGIC: [u8; 4] = *b"HUF\x01";

/// Size of a container holding no symbols and no payload.
pub const EMPTY_CONTAINER_LEN: usize = MAGIC.len() + 2 + 1 + 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerFile {
    table: CodeTable,
    padding: u8,
    payload: Vec<u8>,
}

impl ContainerFile {
    pub fn new(table: CodeTable, packed: Packed) -> Result<Self> {
        if u32::try_from(packed.bytes.len()).is_err() {
            return Err(CodecError::PayloadTooLarge(packed.bytes.len()));
        }
        check_padding(packed.padding, packed.bytes.len())?;
        let overlong = table.iter().find(|(_, code)| code.len() > u8::MAX as usize);
        if let Some((symbol, code)) = overlong {
            return Err(CodecError::CodeTooLong {
                symbol,
                bits: code.len(),
            });
        }

        Ok(ContainerFile {
            table,
            padding: packed.padding,
            payload: packed.bytes,
        })
    }

    pub fn empty() -> Self {
        ContainerFile {
            table: CodeTable::new(),
            padding: 0,
            payload: Vec::new(),
        }
    }

    pub fn table(&self) -> &CodeTable {
        &self.table
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        serialize_container(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        deserialize_container(bytes).map(|(container, _)| container)
    }
}

pub fn serialize_container(container: &ContainerFile) -> Vec<u8> {
    let table = &container.table;
    let capacity = EMPTY_CONTAINER_LEN + table.len() * 3 + container.payload.len();
    let mut buffer = Vec::with_capacity(capacity);

    buffer.extend_from_slice(&MAGIC);
    buffer.extend_from_slice(&(table.len() as u16).to_be_bytes());
    for (symbol, code) in table.iter() {
        buffer.push(symbol);
        buffer.push(code.len() as u8);
        buffer.extend(code_to_bytes(code));
    }
    buffer.push(container.padding);
    buffer.extend_from_slice(&(container.payload.len() as u32).to_be_bytes());
    buffer.extend_from_slice(&container.payload);

    buffer
}

/// Parses a container and rebuilds the decode tree from its code table.
pub fn deserialize_container(bytes: &[u8]) -> Result<(ContainerFile, DecodeTree)> {
    if !bytes.starts_with(&MAGIC) {
        return Err(Corruption::BadMagic.into());
    }
    let mut reader = Reader {
        bytes: &bytes[MAGIC.len()..],
    };

    let symbol_count = reader.u16("symbol count")?;
    if symbol_count > 256 {
        return Err(Corruption::TooManySymbols(symbol_count).into());
    }

    let mut seen = HashSet::with_capacity(symbol_count as usize);
    let mut table = CodeTable::new();
    for _ in 0..symbol_count {
        let symbol = reader.u8("symbol")?;
        let code_len = reader.u8("code length")? as usize;
        if code_len == 0 {
            return Err(Corruption::ZeroLengthCode(symbol).into());
        }
        if !seen.insert(symbol) {
            return Err(Corruption::DuplicateSymbol(symbol).into());
        }
        let code_bytes = reader.take(code_len.div_ceil(8), "code bits")?;
        let code: Code = BitSlice::<u8, Msb0>::from_slice(code_bytes)[..code_len].to_bitvec();
        table.insert(symbol, code);
    }

    let padding = reader.u8("padding")?;
    let payload_len = reader.u32("payload length")? as usize;
    check_padding(padding, payload_len)?;
    let payload = reader.take(payload_len, "payload")?;
    if !reader.bytes.is_empty() {
        return Err(Corruption::TrailingBytes(reader.bytes.len()).into());
    }

    let tree = DecodeTree::from_code_table(&table)?;
    let container = ContainerFile {
        table,
        padding,
        payload: payload.to_vec(),
    };
    Ok((container, tree))
}

fn check_padding(padding: u8, payload_len: usize) -> Result<()> {
    if padding > 7 {
        return Err(Corruption::BadPadding(padding).into());
    }
    if payload_len == 0 && padding > 0 {
        return Err(Corruption::PaddingWithoutPayload {
            padding,
            payload_len,
        }
        .into());
    }
    Ok(())
}

fn code_to_bytes(code: &BitSlice<u8, Msb0>) -> Vec<u8> {
    let mut bits = code.to_bitvec();
    bits.resize(code.len().div_ceil(8) * 8, false);
    bits.into_vec()
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, needed: usize, field: &'static str) -> Result<&'a [u8]> {
        if self.bytes.len() < needed {
            return Err(Corruption::UnexpectedEof {
                field,
                needed,
                remaining: self.bytes.len(),
            }
            .into());
        }
        let (head, tail) = self.bytes.split_at(needed);
        self.bytes = tail;
        Ok(head)
    }

    fn array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        let mut array = [0; N];
        array.copy_from_slice(self.take(N, field)?);
        Ok(array)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8> {
        self.array::<1>(field).map(|[byte]| byte)
    }

    fn u16(&mut self, field: &'static str) -> Result<u16> {
        self.array(field).map(u16::from_be_bytes)
    }

    fn u32(&mut self, field: &'static str) -> Result<u32> {
        self.array(field).map(u32::from_be_bytes)
    }
}
