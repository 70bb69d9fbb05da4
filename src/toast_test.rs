use super::*;

#[test]
fn new_toast_uses_default_variant() {
    let toast = Toast::new("Saved", "All good");
    assert_eq!(toast.variant, ToastVariant::Default);
    assert!(!toast.is_destructive());
}

#[test]
fn destructive_toast_is_flagged() {
    let toast = Toast::destructive("Error", "Broken");
    assert!(toast.is_destructive());
}

#[test]
fn default_limit_keeps_only_latest() {
    let toaster = Toaster::new();
    toaster.push(Toast::new("one", ""));
    toaster.push(Toast::new("two", ""));
    let drained = toaster.drain();
    assert_eq!(drained.len(), 1);
    assert_eq!(drained[0].title, "two");
}

#[test]
fn larger_limit_drops_oldest_first() {
    let toaster = Toaster::with_limit(2);
    toaster.push(Toast::new("one", ""));
    toaster.push(Toast::new("two", ""));
    toaster.push(Toast::new("three", ""));
    let titles: Vec<String> = toaster.drain().into_iter().map(|t| t.title).collect();
    assert_eq!(titles, vec!["two", "three"]);
}

#[test]
fn zero_limit_is_treated_as_one() {
    let toaster = Toaster::with_limit(0);
    toaster.push(Toast::new("kept", ""));
    assert_eq!(toaster.pending(), 1);
}

#[test]
fn drain_empties_the_queue() {
    let toaster = Toaster::new();
    toaster.push(Toast::new("once", ""));
    assert_eq!(toaster.drain().len(), 1);
    assert!(toaster.drain().is_empty());
}

#[test]
fn clones_share_the_queue() {
    let toaster = Toaster::new();
    let handle = toaster.clone();
    handle.push(Toast::destructive("Error", "shared"));
    assert_eq!(toaster.pending(), 1);
}

#[test]
fn variant_serializes_snake_case() {
    let json = serde_json::to_value(Toast::destructive("Error", "x")).unwrap();
    assert_eq!(json["variant"], "destructive");
}
