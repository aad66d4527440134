//! Property tests across all three codecs.

use proptest::prelude::*;
use recordb_codec::wire::{Field, UnknownFields, WireReader, WireWriter};
use recordb_core::format::WireCodec;
use recordb_core::{
    CodecKind, Employee, EmployeeCollection, PhoneType, RecordCodec, Role, SchemaVersion,
};
use recordb_testkit::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut h = DefaultHasher::new();
    value.hash(&mut h);
    h.finish()
}

/// Field numbers and values that a newer writer might add at each level
/// of an address book.
#[derive(Debug, Clone)]
struct Additions {
    book_field: u32,
    person_field: u32,
    phone_field: u32,
    phone_type: u64,
    value: u64,
}

fn additions_strategy() -> impl Strategy<Value = Additions> {
    (2u32..2000, 9u32..2000, 3u32..2000, 4u64..1000, any::<u64>()).prop_map(
        |(book_field, person_field, phone_field, phone_type, value)| Additions {
            book_field,
            person_field,
            phone_field,
            phone_type,
            value,
        },
    )
}

fn copy_field(w: &mut WireWriter, field: &Field<'_>) {
    let mut raw = UnknownFields::new();
    raw.push(field);
    w.unknown(&raw);
}

/// Rewrites a phone message with an unrecognised type number and an extra
/// field.
fn extend_phone(w: &mut WireWriter, phone: &[u8], add: &Additions) {
    let mut reader = WireReader::new(phone);
    while let Some(field) = reader.next_field().unwrap() {
        if field.number == 2 {
            w.uint64(2, add.phone_type);
        } else {
            copy_field(w, &field);
        }
    }
    w.string(add.phone_field, "ext 12");
}

/// Adds unknown fields to a wire payload at the book, person and phone
/// levels.
fn with_additions(book: &[u8], add: &Additions) -> Vec<u8> {
    let mut reader = WireReader::new(book);
    let mut out = WireWriter::new();
    while let Some(field) = reader.next_field().unwrap() {
        let person = field.expect_bytes("person").unwrap();
        out.message(1, |p| {
            let mut inner = WireReader::new(person);
            while let Some(f) = inner.next_field().unwrap() {
                if f.number == 4 {
                    let phone = f.expect_bytes("phone").unwrap();
                    p.message(4, |ph| extend_phone(ph, phone, add));
                } else {
                    copy_field(p, &f);
                }
            }
            p.uint64(add.person_field, add.value);
        });
    }
    out.uint64(add.book_field, add.value);
    out.into_bytes()
}

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn every_codec_roundtrips(employees in collection_strategy(6)) {
        for kind in CodecKind::ALL {
            let codec = kind.codec();
            let bytes = codec.encode(&employees).unwrap();
            let decoded = codec.decode(&bytes).unwrap();
            prop_assert!(decoded.is_identical(&employees), "{} changed the records", kind);
        }
    }

    #[test]
    fn v1_records_read_with_defaults(e in employee_v1_strategy()) {
        let employees: EmployeeCollection = vec![e.clone()].into();
        for kind in CodecKind::ALL {
            let codec = kind.codec();
            let decoded = codec.decode(&codec.encode(&employees).unwrap()).unwrap();
            let d = &decoded[0];

            prop_assert_eq!(d.version(), SchemaVersion::V1);
            prop_assert_eq!(d.role(), Role::Unknown);
            prop_assert!(d.email().is_none());
            prop_assert!(d.phones().is_empty());
            prop_assert_eq!(d.birthday(), e.birthday());
            prop_assert_eq!(d.gender(), e.gender());
        }
    }

    #[test]
    fn equality_depends_only_on_identity(a in employee_strategy(), b in employee_v2_strategy()) {
        // a's identity with b's attributes.
        let mut twin = Employee::builder(i64::from(a.id().get()), a.name())
            .role(b.role())
            .phones(b.phones().to_vec());
        if let Some(gender) = b.gender() {
            twin = twin.gender(gender);
        }
        if let Some(email) = b.email() {
            twin = twin.email(email);
        }
        let twin = twin.build().unwrap();

        prop_assert!(a == twin);
        prop_assert!(twin == a);
        prop_assert_eq!(hash_of(&a), hash_of(&twin));
        prop_assert_eq!(a.cmp(&twin), std::cmp::Ordering::Equal);
        prop_assert_eq!(a == b, b == a);
        prop_assert_eq!(a == b, a.key() == b.key());
    }

    #[test]
    fn wire_preserves_unknown_fields(
        employees in collection_strategy(4),
        add in additions_strategy(),
    ) {
        let original = with_additions(&WireCodec.encode(&employees).unwrap(), &add);
        let decoded = WireCodec.decode(&original).unwrap();

        prop_assert!(!decoded.unknown_fields().is_empty());
        prop_assert!(decoded.iter().all(|e| !e.unknown_fields().is_empty()));
        prop_assert!(decoded
            .iter()
            .flat_map(|e| e.phones())
            .all(|p| p.kind == PhoneType::Unknown && !p.unknown_fields().is_empty()));
        prop_assert_eq!(WireCodec.encode(&decoded).unwrap(), original);
    }

    #[test]
    fn decoding_garbage_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        for kind in CodecKind::ALL {
            let _ = kind.codec().decode(&bytes);
        }
    }
}
