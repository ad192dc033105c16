use rand::seq::SliceRandom;
use treewick::error::TreeError;
use treewick::model::{NodeId, Tree, distance_from_r};

/// No-op shuffle, for calls without sampling.
fn no_shuffle(_: &mut Vec<String>) {}

/// Builds a balanced four-tip tree with unit branch lengths, pairing the
/// first two and last two names into cherries.
fn cherry_tree(names: [&str; 4]) -> (Tree, NodeId) {
    let mut tree = Tree::new();
    let root = tree.add_node(None, None);
    let left = tree.add_node(None, Some(1.0));
    let right = tree.add_node(None, Some(1.0));
    tree.extend(root, &[left, right]);
    for (parent, name) in [(left, names[0]), (left, names[1]), (right, names[2]), (right, names[3])]
    {
        let tip = tree.add_node(Some(name), Some(1.0));
        tree.append(parent, tip);
    }
    (tree, root)
}

#[test]
fn test_identical_trees_score_zero() {
    let (mut tree1, root1) = cherry_tree(["A", "B", "C", "D"]);
    let (mut tree2, root2) = cherry_tree(["A", "B", "C", "D"]);

    let score = tree1
        .compare_tip_distances(root1, &mut tree2, root2, None, distance_from_r, no_shuffle)
        .unwrap();
    assert!(score.abs() < 1e-12);
}

#[test]
fn test_different_topologies_score_between_zero_and_one() {
    let (mut tree1, root1) = cherry_tree(["A", "B", "C", "D"]);
    // Same tips, different cherries
    let (mut tree2, root2) = cherry_tree(["A", "C", "B", "D"]);

    let score = tree1
        .compare_tip_distances(root1, &mut tree2, root2, None, distance_from_r, no_shuffle)
        .unwrap();
    assert!(score > 0.0);
    assert!(score < 1.0);
}

#[test]
fn test_no_common_tips_is_an_error() {
    let (mut tree1, root1) = cherry_tree(["A", "B", "C", "D"]);
    let (mut tree2, root2) = cherry_tree(["E", "F", "G", "H"]);

    assert_eq!(
        tree1.compare_tip_distances(root1, &mut tree2, root2, None, distance_from_r, no_shuffle),
        Err(TreeError::NoCommonTips)
    );
}

#[test]
fn test_two_or_fewer_common_tips_score_one_by_convention() {
    let (mut tree1, root1) = cherry_tree(["A", "B", "C", "D"]);
    let (mut tree2, root2) = cherry_tree(["A", "B", "X", "Y"]);

    // The metric must not even be consulted
    let panicking_metric = |_: &_, _: &_| -> f64 { panic!("metric called") };
    let score = tree1
        .compare_tip_distances(root1, &mut tree2, root2, None, panicking_metric, no_shuffle)
        .unwrap();
    assert_eq!(score, 1.0);
}

#[test]
fn test_sampling_applies_shuffle_and_truncates() {
    let (mut tree1, root1) = cherry_tree(["A", "B", "C", "D"]);
    let (mut tree2, root2) = cherry_tree(["A", "B", "C", "D"]);

    let mut shuffled = false;
    let score = tree1
        .compare_tip_distances(
            root1,
            &mut tree2,
            root2,
            Some(3),
            |m1, m2| {
                assert_eq!(m1.len(), 3);
                assert_eq!(m2.len(), 3);
                distance_from_r(m1, m2)
            },
            |names| {
                shuffled = true;
                names.reverse();
            },
        )
        .unwrap();

    assert!(shuffled);
    // Identical trees stay identical on any common subset
    assert!(score.abs() < 1e-12);
}

#[test]
fn test_sampling_with_random_shuffle() {
    let (mut tree1, root1) = cherry_tree(["A", "B", "C", "D"]);
    let (mut tree2, root2) = cherry_tree(["A", "B", "C", "D"]);

    let mut rng = rand::rng();
    let score = tree1
        .compare_tip_distances(
            root1,
            &mut tree2,
            root2,
            Some(3),
            distance_from_r,
            |names| names.shuffle(&mut rng),
        )
        .unwrap();
    assert!(score.abs() < 1e-12);
}

#[test]
fn test_custom_metric_is_plumbed_through() {
    let (mut tree1, root1) = cherry_tree(["A", "B", "C", "D"]);
    let (mut tree2, root2) = cherry_tree(["A", "B", "C", "D"]);

    let score = tree1
        .compare_tip_distances(root1, &mut tree2, root2, None, |_, _| 0.25, no_shuffle)
        .unwrap();
    assert_eq!(score, 0.25);
}

#[test]
fn test_comparison_restricted_to_common_tips() {
    // tree2 lacks D; the matrices are built over A, B, C only
    let (mut tree1, root1) = cherry_tree(["A", "B", "C", "D"]);
    let (mut tree2, root2) = cherry_tree(["A", "B", "C", "X"]);

    let score = tree1
        .compare_tip_distances(
            root1,
            &mut tree2,
            root2,
            None,
            |m1, m2| {
                assert_eq!(m1.names(), &["A", "B", "C"]);
                assert_eq!(m2.names(), &["A", "B", "C"]);
                distance_from_r(m1, m2)
            },
            no_shuffle,
        )
        .unwrap();
    assert!(score.abs() < 1e-12);
}
