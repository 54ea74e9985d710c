use huffpack::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

const FILE_PATH: &str = "./tests/resources/dna_seq_test.txt";

/// Serialize to deserialize test
#[test]
fn serialize_and_deserialize_test() {
    let original: String = std::fs::read_to_string(FILE_PATH).unwrap();

    let bytes = original.as_bytes();
    let freq_table = tally_frequency(bytes);
    let tree = build_huffman_tree(&freq_table).unwrap();
    let table = generate_code_table(&tree);
    let packed = huff_encode(bytes, &table).unwrap();
    let container = ContainerFile::new(table, packed).unwrap();
    let serialized = serialize_container(&container);
    let (parsed, decode_tree) = deserialize_container(&serialized).unwrap();
    let deserialized_bytes = huff_decode(parsed.payload(), parsed.padding(), &decode_tree).unwrap();

    let actual = String::from_utf8_lossy(&deserialized_bytes);

    assert_eq!(actual, original);
}

#[test]
fn dna_compresses_below_a_third() {
    let original = std::fs::read(FILE_PATH).unwrap();
    let serialized = compress(&original).unwrap().to_bytes();
    // four common symbols dominate, so codes average close to two bits
    assert!(serialized.len() * 3 < original.len());
    assert_eq!(decompress(&serialized).unwrap(), original);
}

#[test]
fn aaabbc_scenario() {
    let container = compress(b"AAABBC").unwrap();
    let codes: Vec<(u8, String)> = container
        .table()
        .iter()
        .map(|(symbol, code)| (symbol, render_code(code)))
        .collect();
    assert_eq!(
        codes,
        vec![
            (b'A', "0".to_string()),
            (b'B', "11".to_string()),
            (b'C', "10".to_string()),
        ]
    );
    assert_eq!(container.payload(), [0b0001_1111, 0]);
    assert_eq!(container.padding(), 7);
    assert_eq!(decompress(&container.to_bytes()).unwrap(), b"AAABBC");
}

#[test]
fn full_alphabet_round_trip() {
    let bytes: Vec<u8> = (0..=255u8)
        .flat_map(|b| std::iter::repeat(b).take(b as usize / 16 + 1))
        .collect();
    let container = compress(&bytes).unwrap();
    assert_eq!(container.table().len(), 256);
    assert!(container.table().is_prefix_free());
    assert_eq!(decompress(&container.to_bytes()).unwrap(), bytes);
}

#[test]
fn padding_stays_in_bounds() {
    for len in 1..40usize {
        let bytes: Vec<u8> = (0..len).map(|i| (i * i % 11) as u8).collect();
        let container = compress(&bytes).unwrap();
        let packed_bits: usize = bytes
            .iter()
            .map(|b| container.table().get(*b).unwrap().len())
            .sum();
        let padding = container.padding() as usize;
        assert!(padding <= 7);
        assert_eq!((packed_bits + padding) % 8, 0);
        assert_eq!(container.payload().len() * 8, packed_bits + padding);
    }
}

#[test]
fn corruption_is_reported() {
    let serialized = compress(b"AAABBC").unwrap().to_bytes();

    let mut bad_magic = serialized.clone();
    bad_magic[1] = b'X';
    assert_eq!(
        decompress(&bad_magic),
        Err(CodecError::CorruptContainer(Corruption::BadMagic))
    );

    let truncated = &serialized[..serialized.len() - 1];
    assert!(matches!(
        decompress(truncated),
        Err(CodecError::CorruptContainer(Corruption::UnexpectedEof { .. }))
    ));

    let mut shortened = serialized.clone();
    shortened[13] = 1;
    assert!(matches!(
        decompress(&shortened),
        Err(CodecError::CorruptContainer(_)) | Err(CodecError::TruncatedStream { .. })
    ));
}

#[test]
fn errors_render_their_kind() {
    let err = decompress(b"not a container").unwrap_err();
    assert_eq!(err.to_string(), "corrupt container: magic marker mismatch");
}

#[test]
fn seeded_random_inputs_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for _ in 0..50 {
        let len = rng.gen_range(0..2048);
        let alphabet = rng.gen_range(1..=256u16);
        let bytes: Vec<u8> = (0..len)
            .map(|_| rng.gen_range(0..alphabet) as u8)
            .collect();
        assert_eq!(decompress(&compress(&bytes).unwrap().to_bytes()).unwrap(), bytes);
    }
}
