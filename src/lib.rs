//! Huffman coding compressor.
//!
//! [`compress`] turns a byte buffer into a self-describing [`ContainerFile`]
//! and [`decompress`] turns the serialized container back into the original
//! bytes. Both run entirely in memory and share no state between calls.
//!
//! ```
//! let container = huffpack::compress(b"AAABBC")?;
//! let bytes = container.to_bytes();
//! assert_eq!(huffpack::decompress(&bytes)?, b"AAABBC");
//! # Ok::<(), huffpack::CodecError>(())
//! ```

pub mod bitstream;
pub mod cli;
pub mod code_table;
pub mod container;
pub mod error;
pub mod frequency;
pub mod fs;
pub mod tree;

use log::{debug, trace};

pub use bitstream::{huff_decode, huff_encode, padding_for, DecodeTree, Packed};
pub use code_table::{generate_code_table, render_code, Code, CodeTable};
pub use container::{deserialize_container, serialize_container, ContainerFile, MAGIC};
pub use error::{CodecError, Corruption, Result};
pub use frequency::{tally_frequency, FrequencyTable};
pub use tree::{build_huffman_tree, HuffNode, HuffTree};

/// Compresses `bytes`. Empty input yields the empty container.
pub fn compress(bytes: &[u8]) -> Result<ContainerFile> {
    let freq_table = tally_frequency(bytes);
    let Some(tree) = build_huffman_tree(&freq_table) else {
        debug!("compress: empty input");
        return Ok(ContainerFile::empty());
    };
    trace!("huffman tree:\n{tree}");

    let table = generate_code_table(&tree);
    if log::log_enabled!(log::Level::Trace) {
        for (symbol, code) in table.iter() {
            trace!("code {symbol:#04x} = {}", render_code(code));
        }
    }

    let packed = huff_encode(bytes, &table)?;
    debug!(
        "compress: {} bytes, {} distinct symbols, {} payload bytes, {} padding bits",
        bytes.len(),
        table.len(),
        packed.bytes.len(),
        packed.padding
    );
    ContainerFile::new(table, packed)
}

/// Restores the original bytes from a serialized container.
pub fn decompress(container_bytes: &[u8]) -> Result<Vec<u8>> {
    let (container, tree) = deserialize_container(container_bytes)?;
    let decoded = huff_decode(container.payload(), container.padding(), &tree)?;
    debug!(
        "decompress: {} container bytes, {} distinct symbols, {} bytes restored",
        container_bytes.len(),
        container.table().len(),
        decoded.len()
    );
    Ok(decoded)
}
