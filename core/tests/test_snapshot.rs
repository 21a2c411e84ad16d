//! Snapshot Tests
//!
//! Pause/resume through serialized snapshots: a restored generator must
//! produce the exact stream the original would have produced, including
//! across regeneration boundaries, and malformed snapshots must be rejected.

use sfmt_core_rs::{RngSnapshot, SfmtRng, SnapshotError};

#[test]
fn test_restore_resumes_identical_stream() {
    let mut original = SfmtRng::new(42);
    for _ in 0..10 {
        let _ = original.next_u32();
    }

    let snapshot = original.snapshot();
    let mut restored = SfmtRng::restore(&snapshot).unwrap();
    assert_eq!(original, restored);

    // Run well past the next regeneration boundary.
    for i in 0..2000 {
        assert_eq!(
            original.next_u32(),
            restored.next_u32(),
            "streams diverged {} draws after restore",
            i
        );
    }
    assert_eq!(original, restored);
}

#[test]
fn test_restore_after_seeding_allows_bulk_fill() {
    let original = SfmtRng::new(9001);
    let mut restored = SfmtRng::restore(&original.snapshot()).unwrap();

    let mut expected = vec![0u32; SfmtRng::min_array_size32()];
    SfmtRng::new(9001).fill_array32(&mut expected);

    let mut actual = vec![0u32; SfmtRng::min_array_size32()];
    restored.fill_array32(&mut actual);

    assert_eq!(expected, actual);
}

#[test]
fn test_snapshot_json_round_trip() {
    let mut original = SfmtRng::from_key(&[1, 2, 3]);
    for _ in 0..5 {
        let _ = original.next_u64();
    }

    let json = serde_json::to_string(&original.snapshot()).unwrap();
    let decoded: RngSnapshot = serde_json::from_str(&json).unwrap();
    let mut restored = SfmtRng::restore(&decoded).unwrap();

    assert_eq!(original, restored);
    for _ in 0..100 {
        assert_eq!(original.next_u64(), restored.next_u64());
    }
}

#[test]
fn test_snapshot_carries_idstring() {
    let snapshot = SfmtRng::new(5).snapshot();
    assert_eq!(snapshot.idstring, SfmtRng::idstring());
    assert_eq!(snapshot.state.len(), SfmtRng::min_array_size32());
}

#[test]
fn test_restore_validation_errors() {
    let base = SfmtRng::new(5).snapshot();

    let mut foreign = base.clone();
    foreign.idstring = "MT19937".to_string();
    assert!(matches!(
        SfmtRng::restore(&foreign),
        Err(SnapshotError::IdMismatch { .. })
    ));

    let mut short = base.clone();
    short.state.pop();
    assert!(matches!(
        SfmtRng::restore(&short),
        Err(SnapshotError::StateLength { .. })
    ));

    let mut bad_idx = base;
    bad_idx.idx = SfmtRng::min_array_size32() + 1;
    assert!(matches!(
        SfmtRng::restore(&bad_idx),
        Err(SnapshotError::IndexOutOfRange { .. })
    ));
}

#[test]
fn test_error_messages_are_descriptive() {
    let mut snapshot = SfmtRng::new(5).snapshot();
    snapshot.state.truncate(3);

    let err = SfmtRng::restore(&snapshot).unwrap_err();
    assert_eq!(
        err.to_string(),
        "state length mismatch: expected 624 words, got 3"
    );
}
