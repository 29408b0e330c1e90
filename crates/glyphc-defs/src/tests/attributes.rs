use super::*;

#[test]
fn has_reports_only_marked_attributes() {
    let mut set = AttributeSet::new();
    set.mark_found(Attribute::Final);
    assert!(set.has(Attribute::Final));
    assert!(!set.has(Attribute::Override));
}

#[test]
fn disallowed_found_lists_markers_present_but_not_allowed() {
    let mut set = AttributeSet::new();
    set.mark_found(Attribute::Mutating);
    set.mark_found(Attribute::Final);
    set.allow(Attribute::Final);

    let disallowed = set.disallowed_found();
    assert_eq!(disallowed, vec![Attribute::Mutating]);
}

#[test]
fn allowed_but_absent_is_not_disallowed() {
    let mut set = AttributeSet::new();
    set.allow(Attribute::Export);
    assert!(set.disallowed_found().is_empty());
}
