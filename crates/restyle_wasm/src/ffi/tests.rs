use super::*;
use restyle_rules::RuleTableBuilder;

#[test]
fn alloc_rejects_non_positive_sizes() {
    assert!(restyle_alloc(0).is_null());
    assert!(restyle_alloc(-4).is_null());
}

#[test]
fn alloc_dealloc_round_trip() {
    let ptr = restyle_alloc(64);
    assert!(!ptr.is_null());
    assert_eq!(ptr.align_offset(ALIGN), 0);
    unsafe { restyle_dealloc(ptr, 64) };
}

#[test]
fn dealloc_ignores_null() {
    unsafe { restyle_dealloc(std::ptr::null_mut(), 16) };
}

#[test]
fn protocol_version_export() {
    assert_eq!(restyle_protocol_version(), 1);
}

#[test]
fn rules_status_through_raw_pointers() {
    let table = RuleTableBuilder::new().rename("color", 1).build().unwrap();
    let bytes = table.as_bytes();
    let len = i32::try_from(bytes.len()).unwrap();
    assert_eq!(unsafe { restyle_rules_status(bytes.as_ptr(), len) }, 0);
    assert_eq!(unsafe { restyle_rules_status(std::ptr::null(), len) }, 1);
    assert_eq!(unsafe { restyle_rules_status(bytes.as_ptr(), -1) }, 1);
}

#[test]
fn host_slice_guards() {
    let data = [1u16, 2, 3];
    assert_eq!(unsafe { host_slice(data.as_ptr(), 3) }, &[1, 2, 3]);
    assert!(unsafe { host_slice(data.as_ptr(), 0) }.is_empty());
    assert!(unsafe { host_slice(data.as_ptr(), -1) }.is_empty());
    assert!(unsafe { host_slice::<u16>(std::ptr::null(), 3) }.is_empty());
}
