use rsamerge::RsaErrorType;
use rsamerge::hierarchy::{set_axe_type, shared_prefix_length};
use rsamerge::model::{Axe, AxeArena, AxeType, RsaBuilder};

// ============= Shared Prefix Tests =============
#[test]
fn test_shared_prefix_counts_length_not_elements() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(2.5);
    let s1 = rsa.add_segment(4.0);
    let s2 = rsa.add_segment(1.0);
    let s3 = rsa.add_segment(8.0);

    assert_eq!(shared_prefix_length(&rsa, &[s0, s1, s2], &[s0, s1, s3]).unwrap(), 6.5);
    assert_eq!(shared_prefix_length(&rsa, &[s0, s1], &[s0, s1, s3]).unwrap(), 6.5);
    assert_eq!(shared_prefix_length(&rsa, &[s1, s0], &[s0, s1]).unwrap(), 0.0);
    assert_eq!(shared_prefix_length(&rsa, &[], &[s0]).unwrap(), 0.0);
}

#[test]
fn test_shared_prefix_stops_at_first_difference() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(1.0);
    let s1 = rsa.add_segment(1.0);
    let s2 = rsa.add_segment(1.0);
    // Shares s2 again later, which must not count
    assert_eq!(shared_prefix_length(&rsa, &[s0, s1, s2], &[s0, s2, s2]).unwrap(), 1.0);
}

#[test]
fn test_shared_prefix_unknown_segment() {
    let rsa = AxeArena::new();
    let err = shared_prefix_length(&rsa, &[3], &[3]).unwrap_err();
    assert_eq!(err.kind(), &RsaErrorType::NotFound);
}

// ============= Set Axe Type Tests =============
#[test]
fn test_longest_order_one_axe_becomes_primary() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(10.0);
    let s1 = rsa.add_segment(20.0);
    let s2 = rsa.add_segment(30.0);
    let short = rsa.add_axe(Axe::new(0, vec![s0, s1], 30.0, 30.0).with_order(1));
    let long = rsa.add_axe(Axe::new(0, vec![s0, s2], 40.0, 40.0).with_order(1));
    // Longest of all, but not a candidate
    let no_hint = rsa.add_axe(Axe::new(0, vec![s0, s1, s2], 60.0, 60.0));

    set_axe_type(&mut rsa).unwrap();

    assert_eq!(rsa[long].axe_type(), AxeType::Primary);
    assert_eq!(rsa[long].parent(), None);
    assert_eq!(rsa[long].parent_start_offset(), 0.0);
    assert_eq!(rsa[short].axe_type(), AxeType::Lateral);
    assert_eq!(rsa[short].parent(), Some(long));
    assert_eq!(rsa[short].parent_start_offset(), 10.0);
    assert_eq!(rsa[no_hint].axe_type(), AxeType::Lateral);
    assert!(rsa.is_valid_hierarchy());
}

#[test]
fn test_equal_length_candidates_first_wins() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(5.0);
    let first = rsa.add_axe(Axe::new(0, vec![s0], 5.0, 5.0).with_order(1));
    let second = rsa.add_axe(Axe::new(0, vec![s0], 5.0, 5.0).with_order(1));

    set_axe_type(&mut rsa).unwrap();

    assert!(rsa[first].is_primary());
    assert_eq!(rsa[second].parent(), Some(first));
}

#[test]
fn test_two_plants_never_parent_across_plants() {
    let mut rsa = AxeArena::new();
    let a0 = rsa.add_segment(10.0);
    let a1 = rsa.add_segment(50.0);
    let a2 = rsa.add_segment(5.0);
    let b0 = rsa.add_segment(12.0);
    let b1 = rsa.add_segment(40.0);
    let b2 = rsa.add_segment(6.0);

    let primary_a = rsa.add_axe(Axe::new(0, vec![a0, a1], 60.0, 60.0).with_order(1));
    let primary_b = rsa.add_axe(Axe::new(1, vec![b0, b1], 52.0, 52.0).with_order(1));
    let lateral_a = rsa.add_axe(Axe::new(0, vec![a0, a2], 15.0, 5.0).with_order(2));
    let lateral_b = rsa.add_axe(Axe::new(1, vec![b0, b2], 18.0, 6.0).with_order(2));
    // No overlap with anything: default parent of its plant
    let detached_b = rsa.add_axe(Axe::new(1, vec![b2], 6.0, 6.0).with_order(3));

    set_axe_type(&mut rsa).unwrap();

    assert_eq!(rsa[lateral_a].parent(), Some(primary_a));
    assert_eq!(rsa[lateral_a].parent_start_offset(), 10.0);
    assert_eq!(rsa[lateral_b].parent(), Some(primary_b));
    assert_eq!(rsa[lateral_b].parent_start_offset(), 12.0);
    assert_eq!(rsa[detached_b].parent(), Some(primary_b));
    assert_eq!(rsa[detached_b].parent_start_offset(), 0.0);

    for (_, axe) in rsa.iter_axes() {
        if let Some(parent) = axe.parent() {
            assert_eq!(rsa[parent].plant(), axe.plant());
        }
    }
    assert_eq!(rsa.primary_of(0), Some(primary_a));
    assert_eq!(rsa.primary_of(1), Some(primary_b));
    assert!(rsa.is_valid_hierarchy());
}

#[test]
fn test_geometry_overrides_plant_metadata() {
    let mut rsa = AxeArena::new();
    let a0 = rsa.add_segment(10.0);
    let a1 = rsa.add_segment(50.0);
    let b0 = rsa.add_segment(10.0);
    let x = rsa.add_segment(3.0);

    let primary_a = rsa.add_axe(Axe::new(0, vec![a0, a1], 60.0, 60.0).with_order(1));
    let _primary_b = rsa.add_axe(Axe::new(1, vec![b0], 10.0, 10.0).with_order(1));
    // Recorded in plant 1, but grows out of plant 0's primary axe
    let misfiled = rsa.add_axe(Axe::new(1, vec![a0, x], 13.0, 3.0));

    set_axe_type(&mut rsa).unwrap();

    assert_eq!(rsa[misfiled].parent(), Some(primary_a));
    assert_eq!(rsa[misfiled].parent_start_offset(), 10.0);
}

#[test]
fn test_equal_overlap_keeps_first_primary() {
    let mut rsa = AxeArena::new();
    let shared = rsa.add_segment(7.0);
    let a1 = rsa.add_segment(20.0);
    let b1 = rsa.add_segment(20.0);
    let x = rsa.add_segment(2.0);

    let primary_a = rsa.add_axe(Axe::new(0, vec![shared, a1], 27.0, 27.0).with_order(1));
    let primary_b = rsa.add_axe(Axe::new(1, vec![shared, b1], 27.0, 27.0).with_order(1));
    let lateral = rsa.add_axe(Axe::new(1, vec![shared, x], 9.0, 2.0));

    set_axe_type(&mut rsa).unwrap();

    assert_ne!(primary_a, primary_b);
    assert_eq!(rsa[lateral].parent(), Some(primary_a));
    assert_eq!(rsa[lateral].parent_start_offset(), 7.0);
}

#[test]
fn test_plant_without_candidate_fails_without_writing() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(10.0);
    let primary = rsa.add_axe(Axe::new(0, vec![s0], 10.0, 10.0).with_order(1));
    let orphan = rsa.add_axe(Axe::new(1, vec![s0], 10.0, 10.0).with_order(2));

    let err = set_axe_type(&mut rsa).unwrap_err();

    assert_eq!(err.kind(), &RsaErrorType::MissingPrimary);
    assert_eq!(rsa[primary].axe_type(), AxeType::Unset);
    assert_eq!(rsa[orphan].axe_type(), AxeType::Unset);
    assert!(!rsa.is_valid_hierarchy());
}

#[test]
fn test_set_axe_type_twice_is_stable() {
    let mut rsa = AxeArena::new();
    let s0 = rsa.add_segment(4.0);
    let s1 = rsa.add_segment(6.0);
    let s2 = rsa.add_segment(1.0);
    rsa.add_axe(Axe::new(0, vec![s0, s1], 10.0, 10.0).with_order(1));
    rsa.add_axe(Axe::new(0, vec![s0, s2], 5.0, 1.0));

    set_axe_type(&mut rsa).unwrap();
    let first = rsa.clone();
    set_axe_type(&mut rsa).unwrap();

    for ((_, a), (_, b)) in first.iter_axes().zip(rsa.iter_axes()) {
        assert_eq!(a, b);
    }
}
