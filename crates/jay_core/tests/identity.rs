use jay_core::{EntityId, Lookup};
use std::collections::HashSet;

#[test]
fn generated_ids_round_trip_through_text_and_bytes() {
    for _ in 0..64 {
        let id = EntityId::generate();

        let text = id.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(EntityId::parse(&text).unwrap(), id);
        assert_eq!(text.parse::<EntityId>().unwrap(), id);
        assert_eq!(EntityId::parse(&text.to_uppercase()).unwrap(), id);

        assert_eq!(EntityId::from_bytes(id.to_bytes()), id);
    }
}

#[test]
fn generated_ids_are_distinct() {
    let ids: HashSet<_> = (0..256).map(|_| EntityId::generate()).collect();
    assert_eq!(ids.len(), 256);
}

#[test]
fn malformed_ids_are_rejected() {
    let rejected = [
        "",
        "Garage",
        // wrong length
        "00000000-0000-4000-8000-00000000000",
        "00000000-0000-4000-8000-0000000000000",
        // hyphens moved
        "0000000-00000-4000-8000-000000000000",
        "00000000-0000-40008-000-000000000000",
        // version nibble must be 4
        "00000000-0000-1000-8000-000000000000",
        "00000000-0000-7000-8000-000000000000",
        // variant nibble must be 8, 9, a or b
        "00000000-0000-4000-7000-000000000000",
        "00000000-0000-4000-c000-000000000000",
        // non-hex
        "g0000000-0000-4000-8000-000000000000",
        // surrounding whitespace
        " 00000000-0000-4000-8000-000000000000",
    ];

    for text in rejected {
        assert!(EntityId::parse(text).is_err(), "accepted `{text}`");
    }
}

#[test]
fn variant_nibbles_are_all_accepted() {
    for variant in ['8', '9', 'a', 'b', 'A', 'B'] {
        let text = format!("00000000-0000-4000-{variant}000-000000000000");
        assert!(EntityId::parse(&text).is_ok(), "rejected `{text}`");
    }
}

#[test]
fn lookup_tokens_split_into_ids_and_names() {
    let id = EntityId::generate();
    assert!(matches!(Lookup::parse(&id.to_string()), Lookup::ById(parsed) if parsed == id));
    assert_eq!(
        Lookup::parse("00000000-0000-1000-8000-000000000000"),
        Lookup::ByName("00000000-0000-1000-8000-000000000000".to_string())
    );
}

#[test]
fn ids_serialize_as_canonical_text() {
    let id = EntityId::parse("6f9619ff-8b86-4d01-b42d-00cf4fc964ff").unwrap();
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "\"6f9619ff-8b86-4d01-b42d-00cf4fc964ff\"");
}
