//! Record store behaviour against real files.

use recordb_codec::envelope::{self, write_envelope, RawRecord};
use recordb_core::format::{BodyV1, NativeCodec};
use recordb_core::{
    sample, CodecKind, CoreError, Employee, Gender, PhoneNumber, PhoneType, RecordCodec,
    RecordStore, Role, SchemaVersion, StoreConfig,
};
use recordb_testkit::prelude::*;

#[test]
fn append_twice_then_list_in_order() {
    for_each_codec(|kind, file| {
        let store = file.store();
        store.append(file.path(), sample::employee_one()).unwrap();
        store.append(file.path(), sample::employee_two()).unwrap();

        let listing = store.list_all(file.path()).unwrap();
        assert!(listing.exists, "{kind}");
        assert!(listing.records.is_identical(&sample::employees()), "{kind}");
    });
}

#[test]
fn append_to_missing_file_creates_it() {
    for_each_codec(|kind, file| {
        assert!(!file.path().exists());
        file.store()
            .append(file.path(), sample::employee_two())
            .unwrap();

        assert!(file.path().exists(), "{kind}");
        assert_eq!(file.load().len(), 1, "{kind}");
    });
}

#[test]
fn list_missing_file_reports_absence() {
    for_each_codec(|kind, file| {
        let listing = file.store().list_all(file.path()).unwrap();
        assert!(!listing.exists, "{kind}");
        assert!(listing.records.is_empty(), "{kind}");
        assert!(!file.path().exists(), "{kind}: listing must not create the file");
    });
}

#[test]
fn load_missing_file_fails() {
    for_each_codec(|kind, file| {
        let err = file.store().load(file.path()).unwrap_err();
        assert!(err.is_not_found(), "{kind}: {err}");
    });
}

#[test]
fn corrupt_file_is_untouched_by_append() {
    for_each_codec(|kind, file| {
        let garbage = b"\x00\x01garbage that no codec accepts\xff".to_vec();
        file.write_raw(&garbage);

        let err = file
            .store()
            .append(file.path(), sample::employee_one())
            .unwrap_err();
        assert!(matches!(err, CoreError::CorruptPayload { .. }), "{kind}: {err}");
        assert_eq!(file.read_raw(), garbage, "{kind}");
    });
}

#[test]
fn unsupported_version_is_untouched_by_append() {
    let file = TempRecordFile::new(CodecKind::Native);
    let future = write_envelope(&[RawRecord::new(9, vec![0xa0])]).unwrap();
    file.write_raw(&future);

    let err = file
        .store()
        .append(file.path(), sample::employee_one())
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::UnsupportedVersion { found: 9, .. }
    ));
    assert_eq!(file.read_raw(), future);
}

#[test]
fn appending_to_v1_file_keeps_old_records_readable() {
    let file = TempRecordFile::new(CodecKind::Native);
    let old = BodyV1 {
        id: 1,
        name: "Employee 1".to_string(),
        birthday: None,
        gender: Some(Gender::Male),
    };
    let record = RawRecord::new(1, envelope::to_cbor(&old).unwrap());
    file.write_raw(&write_envelope(&[record]).unwrap());

    let newer = Employee::builder(3, "Employee 3")
        .role(Role::Developer)
        .phone(PhoneNumber::new("555-0003", PhoneType::Work))
        .build()
        .unwrap();
    file.store().append(file.path(), newer.clone()).unwrap();

    let loaded = file.load();
    assert_eq!(loaded.len(), 2);

    let first = &loaded[0];
    assert_eq!(first.version(), SchemaVersion::V1);
    assert_eq!(first.gender(), Some(Gender::Male));
    assert_eq!(first.role(), Role::Unknown);
    assert!(first.email().is_none());
    assert!(first.phones().is_empty());

    assert!(loaded[1].is_identical(&newer));
}

#[test]
fn existing_records_are_rewritten_unchanged() {
    let file = TempRecordFile::new(CodecKind::Native);
    file.store()
        .save(file.path(), &sample::employees())
        .unwrap();
    let before = file.read_raw();

    file.store()
        .append(file.path(), Employee::builder(3, "Employee 3").build().unwrap())
        .unwrap();

    let after = NativeCodec.decode(&file.read_raw()).unwrap();
    let prefix: recordb_core::EmployeeCollection = after.iter().take(2).cloned().collect();
    assert!(prefix.is_identical(&NativeCodec.decode(&before).unwrap()));
}

#[test]
fn strict_policy_still_treats_missing_file_as_empty() {
    let file = TempRecordFile::with_config(
        StoreConfig::new().read_failure(recordb_core::ReadFailurePolicy::Fail),
    );
    file.store()
        .append(file.path(), sample::employee_one())
        .unwrap();
    assert_eq!(file.load().len(), 1);
}

#[cfg(unix)]
#[test]
fn unreadable_file_follows_policy() {
    use recordb_core::ReadFailurePolicy;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    let strict = TempRecordFile::with_config(
        StoreConfig::new().read_failure(ReadFailurePolicy::Fail),
    );
    strict
        .store()
        .save(strict.path(), &sample::employees())
        .unwrap();
    fs::set_permissions(strict.path(), fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read the file regardless of its mode.
    if fs::read(strict.path()).is_ok() {
        return;
    }

    let err = strict
        .store()
        .append(strict.path(), sample::employee_one())
        .unwrap_err();
    assert!(matches!(err, CoreError::Storage(_)), "{err}");

    let lenient = RecordStore::new(StoreConfig::default());
    lenient
        .append(strict.path(), sample::employee_one())
        .unwrap();
    fs::set_permissions(strict.path(), fs::Permissions::from_mode(0o644)).unwrap();
    assert_eq!(lenient.load(strict.path()).unwrap().len(), 1);
}
