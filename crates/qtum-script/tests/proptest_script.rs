//! Property tests for script parsing and number encoding.

use proptest::prelude::*;

use qtum_script::{number, template, Script};

proptest! {
    #[test]
    fn script_number_roundtrip(value in (i64::MIN + 1)..=i64::MAX) {
        // i64::MIN needs a 9th byte for its sign, which decode rejects
        prop_assert_eq!(number::decode(&number::encode(value)).unwrap(), value);
    }

    #[test]
    fn push_data_chunks_recover_payload(data in prop::collection::vec(any::<u8>(), 0..1024)) {
        let mut script = Script::new();
        script.append_push_data(&data).unwrap();

        let chunks = script.chunks().unwrap();
        if data.is_empty() {
            // a zero-length push is the bare length byte 0x00
            prop_assert_eq!(script.as_bytes(), &[0x00][..]);
        } else {
            prop_assert_eq!(chunks.len(), 1);
            prop_assert_eq!(chunks[0].data.as_deref(), Some(&data[..]));
        }
    }

    #[test]
    fn p2pkh_lock_is_always_recognized(hash in prop::array::uniform20(any::<u8>())) {
        let script = template::p2pkh_lock(&hash);
        prop_assert!(script.is_p2pkh());
        prop_assert_eq!(script.public_key_hash().unwrap(), hash);
    }

    #[test]
    fn contract_scripts_parse_back(
        gas_limit in 1i64..=10_000_000,
        gas_price in 1i64..=100_000,
        data in prop::collection::vec(any::<u8>(), 1..512),
        addr in prop::array::uniform20(any::<u8>()),
    ) {
        let create = template::contract_create(gas_limit, gas_price, &data).unwrap();
        let chunks = create.chunks().unwrap();
        prop_assert_eq!(chunks.len(), 5);
        prop_assert_eq!(number::decode(chunks[1].data_or_empty()).unwrap(), gas_limit);
        prop_assert_eq!(number::decode(chunks[2].data_or_empty()).unwrap(), gas_price);
        prop_assert_eq!(chunks[3].data_or_empty(), &data[..]);
        prop_assert!(create.is_contract());

        let call = template::contract_call(gas_limit, gas_price, &data, &addr).unwrap();
        let chunks = call.chunks().unwrap();
        prop_assert_eq!(chunks.len(), 6);
        prop_assert_eq!(chunks[4].data_or_empty(), &addr[..]);
        prop_assert!(call.is_contract());
    }

    #[test]
    fn strip_code_separators_removes_every_marker(
        bytes in prop::collection::vec(any::<u8>(), 0..256),
    ) {
        let stripped = Script::from_bytes(&bytes).strip_code_separators();
        prop_assert!(stripped.as_bytes().iter().all(|&b| b != 0xab));
    }
}
