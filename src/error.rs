use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodecError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// A symbol in the input has no entry in the code table. Only a table
    /// built from some other buffer can trigger this.
    #[error("missing code: symbol {0:#04x} has no entry in the code table")]
    MissingCode(u8),
    #[error("corrupt container: {0}")]
    CorruptContainer(#[from] Corruption),
    #[error("truncated stream: payload ended {pending_bits} bit(s) into a code")]
    TruncatedStream { pending_bits: usize },
    #[error("payload of {0} bytes does not fit the container length field")]
    PayloadTooLarge(usize),
    #[error("code for symbol {symbol:#04x} is {bits} bits, the container holds at most 255")]
    CodeTooLong { symbol: u8, bits: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Corruption {
    #[error("magic marker mismatch")]
    BadMagic,
    #[error("needed {needed} byte(s) for {field}, {remaining} remaining")]
    UnexpectedEof {
        field: &'static str,
        needed: usize,
        remaining: usize,
    },
    #[error("{0} byte(s) after the declared payload")]
    TrailingBytes(usize),
    #[error("declared symbol count {0} exceeds the byte alphabet")]
    TooManySymbols(u16),
    #[error("symbol {0:#04x} declared with an empty code")]
    ZeroLengthCode(u8),
    #[error("symbol {0:#04x} declared more than once")]
    DuplicateSymbol(u8),
    #[error("code for symbol {0:#04x} collides with a prefix of another code")]
    NotPrefixFree(u8),
    #[error("padding of {0} bits is outside 0..=7")]
    BadPadding(u8),
    #[error("padding of {padding} bits declared for a {payload_len}-byte payload")]
    PaddingWithoutPayload { padding: u8, payload_len: usize },
    #[error("payload bit path at bit {0} leads to no symbol")]
    UnmappedPath(usize),
}
