use huffpack::engine::codes::CodeTable;
use huffpack::engine::frequency::FrequencyTable;
use huffpack::engine::huffman::HuffmanTree;
use huffpack::protocol::{ArtifactHeader, HEADER_SIZE};
use huffpack::{compress, decompress, CodecError, MalformedKind};
use proptest::prelude::*;

fn codes_for(input: &[u8]) -> Option<CodeTable> {
    let freq = FrequencyTable::from_bytes(input).unwrap();
    HuffmanTree::build(&freq).unwrap().map(|tree| CodeTable::from_tree(&tree))
}

proptest! {
    #[test]
    fn any_input_round_trips(input in proptest::collection::vec(any::<u8>(), 0..2048)) {
        let artifact = compress(&input).unwrap();
        prop_assert_eq!(decompress(&artifact).unwrap(), input);
    }

    #[test]
    fn skewed_input_round_trips(input in proptest::collection::vec(prop_oneof![
        8 => Just(b'e'),
        4 => Just(b't'),
        2 => 0u8..32,
        1 => any::<u8>(),
    ], 1..4096)) {
        let artifact = compress(&input).unwrap();
        prop_assert_eq!(decompress(&artifact).unwrap(), input);
    }

    #[test]
    fn header_accounts_for_every_byte(input in proptest::collection::vec(any::<u8>(), 0..1024)) {
        let artifact = compress(&input).unwrap();
        let header = ArtifactHeader::decode(&artifact).unwrap();
        prop_assert_eq!(header.original_len, input.len() as u64);
        prop_assert_eq!(header.frequencies.total(), input.len() as u64);
    }

    #[test]
    fn compression_is_deterministic(input in proptest::collection::vec(any::<u8>(), 0..1024)) {
        prop_assert_eq!(compress(&input).unwrap(), compress(&input).unwrap());
    }

    #[test]
    fn codes_are_prefix_free(input in proptest::collection::vec(any::<u8>(), 1..1024)) {
        let codes = codes_for(&input).unwrap();
        let all: Vec<String> = codes.iter().map(|(_, c)| c.to_string()).collect();
        for (i, a) in all.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, b) in all.iter().enumerate() {
                if i != j {
                    prop_assert!(!b.starts_with(a.as_str()));
                }
            }
        }
    }

    #[test]
    fn truncation_is_detected(input in proptest::collection::vec(any::<u8>(), 1..1024), cut in 1usize..64) {
        let artifact = compress(&input).unwrap();
        let bitstream = artifact.len() - HEADER_SIZE;
        let cut = cut.min(bitstream);
        let err = decompress(&artifact[..artifact.len() - cut]).unwrap_err();
        let is_truncated = matches!(
            err,
            CodecError::MalformedArtifact(MalformedKind::TruncatedBitstream { .. })
        );
        prop_assert!(is_truncated);
    }
}

#[test]
fn empty_input_artifact() {
    let artifact = compress(&[]).unwrap();
    assert_eq!(artifact.len(), HEADER_SIZE);
    assert_eq!(&artifact[..8], &0i64.to_le_bytes());
    assert!(decompress(&artifact).unwrap().is_empty());
}

#[test]
fn thousand_copies_of_one_byte() {
    let input = vec![b'a'; 1000];
    let artifact = compress(&input).unwrap();
    assert_eq!(artifact.len(), HEADER_SIZE + 125);
    assert_eq!(decompress(&artifact).unwrap(), input);
}

#[test]
fn full_alphabet_once_each() {
    let input: Vec<u8> = (0..=255u8).collect();
    let freq = FrequencyTable::from_bytes(&input).unwrap();
    let tree = HuffmanTree::build(&freq).unwrap().unwrap();
    assert_eq!(tree.leaf_count(), 256);
    assert_eq!(tree.internal_count(), 255);

    let artifact = compress(&input).unwrap();
    // 256 symbols at 8 bits each
    assert_eq!(artifact.len(), HEADER_SIZE + 256);
    assert_eq!(decompress(&artifact).unwrap(), input);
}

#[test]
fn zero_counts_with_length_is_malformed() {
    let mut artifact = vec![0u8; HEADER_SIZE];
    artifact[..8].copy_from_slice(&42i64.to_le_bytes());
    assert!(matches!(
        decompress(&artifact),
        Err(CodecError::MalformedArtifact(MalformedKind::CountMismatch { declared: 42, counted: 0 }))
    ));
}
