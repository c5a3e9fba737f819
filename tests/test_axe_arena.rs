#![allow(unused)]

use rsamerge::model::{Axe, AxeArena, AxeType, Length, RsaBuilder, SegmentMap};
use rsamerge::{RsaErrorType, set_axe_type};

// ============= Length Tests =============
#[test]
fn test_length() {
    assert_eq!(*Length::new(1.25), 1.25);
}

#[test]
#[should_panic]
fn test_negative_length() {
    let negative = Length::new(-1.0);
}

#[test]
#[should_panic]
fn test_branch_longer_than_axe() {
    let axe = Axe::new(0, vec![], 1.0, 2.0);
}

#[test]
fn test_negative_length_rejected_from_json() {
    assert!(serde_json::from_str::<Length>("-3.0").is_err());
    assert_eq!(*serde_json::from_str::<Length>("3.0").unwrap(), 3.0);
}

// ============= Axe Tests =============
#[test]
fn test_new_axe_is_untyped() {
    let axe = Axe::new(4, vec![0, 1], 10.0, 6.0).with_order(2);
    assert_eq!(axe.id(), None);
    assert_eq!(axe.plant(), 4);
    assert_eq!(axe.segments(), &[0, 1]);
    assert_eq!(axe.overlap(), 4.0);
    assert_eq!(axe.order(), Some(2));
    assert!(!axe.is_primary_candidate());
    assert_eq!(axe.axe_type(), AxeType::Unset);
    assert!(!axe.has_parent());
    assert_eq!(axe.parent_start_offset(), 0.0);
}

#[test]
fn test_set_parent_and_type() {
    let mut axe = Axe::new(0, vec![], 10.0, 6.0);
    axe.set_parent(Some(3), 4.0);
    axe.set_type(AxeType::Lateral);
    assert_eq!(axe.parent(), Some(3));
    assert_eq!(axe.parent_start_offset(), 4.0);
    assert!(axe.is_lateral());
}

#[test]
fn test_axe_from_json_with_branch_longer_than_axe() {
    let json = r#"{"id":null,"plant":0,"segments":[],"length":1.0,"branch_length":5.0}"#;
    assert!(serde_json::from_str::<Axe>(json).is_err());
}

#[test]
fn test_axe_from_json_with_reserved_id() {
    let json = format!(
        r#"{{"id":{},"plant":0,"segments":[],"length":5.0,"branch_length":1.0}}"#,
        usize::MAX
    );
    assert!(serde_json::from_str::<Axe>(&json).is_err());
}

#[test]
fn test_axe_from_json_keeps_hierarchy() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(2.0);
    let s1 = rsa.add_segment(1.0);
    rsa.add_axe(Axe::new(0, vec![s0], 2.0, 2.0).with_order(1));
    let lateral = rsa.add_axe(Axe::new(0, vec![s0, s1], 3.0, 1.0));
    set_axe_type(&mut rsa).unwrap();

    let json = serde_json::to_string(&rsa[lateral]).unwrap();
    let restored: Axe = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, rsa[lateral]);
    assert_eq!(restored.id(), Some(lateral));
    assert_eq!(restored.overlap(), 2.0);

    // Unset fields fall back to an untyped axe without parent
    let json = r#"{"id":null,"plant":2,"segments":[0],"length":4.0,"branch_length":4.0}"#;
    let minimal: Axe = serde_json::from_str(json).unwrap();
    assert_eq!(minimal.id(), None);
    assert_eq!(minimal.axe_type(), AxeType::Unset);
    assert!(!minimal.has_parent());
}

// ============= Arena Tests =============
#[test]
fn test_add_axe_assigns_ids() {
    let mut rsa = AxeArena::with_capacity(2, 0);
    let first = rsa.add_axe(Axe::new(0, vec![], 1.0, 1.0));
    let second = rsa.add_axe(Axe::new(1, vec![], 1.0, 1.0));
    assert_eq!((first, second), (0, 1));
    assert_eq!(rsa[second].id(), Some(1));
    assert_eq!(rsa.num_axes(), 2);
    assert_eq!(rsa.num_plants(), 2);
}

#[test]
fn test_iter_axes_in_insertion_order() {
    let mut rsa = AxeArena::new();
    for plant in [3, 1, 2] {
        rsa.add_axe(Axe::new(plant, vec![], 1.0, 1.0));
    }
    let plants: Vec<_> = rsa.iter_axes().map(|(_, axe)| axe.plant()).collect();
    assert_eq!(plants, vec![3, 1, 2]);
}

#[test]
fn test_get_axe_not_found() {
    let mut rsa = AxeArena::new();
    assert_eq!(rsa.get_axe(0).unwrap_err().kind(), &RsaErrorType::NotFound);
    assert_eq!(rsa.get_axe_mut(0).unwrap_err().kind(), &RsaErrorType::NotFound);
    assert_eq!(rsa.segment_length(0).unwrap_err().kind(), &RsaErrorType::NotFound);
}

#[test]
fn test_laterals_and_plants() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(2.0);
    let s1 = rsa.add_segment(1.0);
    let primary = rsa.add_axe(Axe::new(0, vec![s0], 2.0, 2.0).with_order(1));
    let lateral = rsa.add_axe(Axe::new(0, vec![s0, s1], 3.0, 1.0));
    assert_eq!(rsa.laterals().count(), 0);
    assert_eq!(rsa.primary_of(0), None);

    set_axe_type(&mut rsa).unwrap();

    assert_eq!(rsa.laterals().collect::<Vec<_>>(), vec![lateral]);
    assert_eq!(rsa.axes_of_plant(0).collect::<Vec<_>>(), vec![primary, lateral]);
    assert_eq!(rsa.primary_of(0), Some(primary));
    assert_eq!(rsa.primary_of(1), None);
}

#[test]
fn test_invalid_hierarchy_with_lateral_parent() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(2.0);
    let s1 = rsa.add_segment(1.0);
    let primary = rsa.add_axe(Axe::new(0, vec![s0], 2.0, 2.0).with_order(1));
    let lateral = rsa.add_axe(Axe::new(0, vec![s0, s1], 3.0, 1.0));
    let nested = rsa.add_axe(Axe::new(0, vec![s0, s1], 3.5, 0.5));
    set_axe_type(&mut rsa).unwrap();
    assert!(rsa.is_valid_hierarchy());

    rsa[nested].set_parent(Some(lateral), 3.0);
    assert!(!rsa.is_valid_hierarchy());
}

#[test]
fn test_valid_hierarchy_of_deserialized_axes() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(2.0);
    let s1 = rsa.add_segment(1.0);
    let primary = r#"{"id":null,"plant":0,"segments":[0],"length":2.0,"branch_length":2.0,"order":1}"#;
    let lateral = r#"{"id":null,"plant":0,"segments":[0,1],"length":3.0,"branch_length":1.0}"#;
    rsa.add_axe(serde_json::from_str(primary).unwrap());
    let lateral = rsa.add_axe(serde_json::from_str(lateral).unwrap());
    assert_eq!(rsa[lateral].segments(), &[s0, s1]);

    set_axe_type(&mut rsa).unwrap();
    assert!(rsa.is_valid_hierarchy());
    assert!(rsa[lateral].branch_length() <= rsa[lateral].length());
}

#[test]
fn test_invalid_hierarchy_with_unknown_segment() {
    let mut rsa = AxeArena::new();
    rsa.add_axe(Axe::new(0, vec![5], 2.0, 2.0).with_order(1));
    assert!(set_axe_type(&mut rsa).is_ok());
    assert!(!rsa.is_valid_hierarchy());
}

// ============= Segment Map Tests =============
#[test]
fn test_segment_map() {
    let mut segments = SegmentMap::new(2);
    let s0 = segments.insert(1.5);
    let s1 = segments.insert(0.5);
    assert_eq!(segments[s1], 0.5);
    assert_eq!(segments.num_segments(), 2);
    assert!(segments.contains(s0));
    assert!(!segments.contains(2));
    assert_eq!(segments.path_length(&[s0, s1, s0]), Some(3.5));
    assert_eq!(segments.path_length(&[s0, 9]), None);
}
