use treewick::error::TreeError;
use treewick::model::{NodeId, NodeRef, Tree};
use treewick::newick::NewickOptions;

/// Builds `(A:1,(B:1,C:1):1):0;` and returns (tree, root, a, inner, b, c).
fn sample_tree() -> (Tree, NodeId, NodeId, NodeId, NodeId, NodeId) {
    let mut tree = Tree::new();
    let root = tree.add_node(None, Some(0.0));
    let a = tree.add_node(Some("A"), Some(1.0));
    let inner = tree.add_node(None, Some(1.0));
    let b = tree.add_node(Some("B"), Some(1.0));
    let c = tree.add_node(Some("C"), Some(1.0));
    tree.append(root, a);
    tree.append(root, inner);
    tree.extend(inner, &[b, c]);
    (tree, root, a, inner, b, c)
}

// ============= Topology Tests =============

#[test]
fn test_append_sets_parent_and_order() {
    let (tree, root, a, inner, b, c) = sample_tree();

    assert_eq!(tree[root].children(), &[a, inner]);
    assert_eq!(tree[inner].children(), &[b, c]);
    assert_eq!(tree[a].parent(), Some(root));
    assert_eq!(tree[b].parent(), Some(inner));
    assert!(tree[root].is_root());
    assert!(tree[a].is_tip());
    assert!(!tree[inner].is_tip());
}

#[test]
fn test_adoption_moves_node_between_parents() {
    let (mut tree, root, a, inner, b, c) = sample_tree();

    // Appending an attached node detaches it from its old parent first
    tree.append(inner, a);
    assert_eq!(tree[root].children(), &[inner]);
    assert_eq!(tree[inner].children(), &[b, c, a]);
    assert_eq!(tree[a].parent(), Some(inner));

    // No duplicate edges anywhere
    let child_refs: usize = tree
        .preorder(root, true)
        .map(|id| tree[id].children().len())
        .sum();
    assert_eq!(child_refs, tree.node_count(root) - 1);
}

#[test]
fn test_pop_detaches_last_child() {
    let (mut tree, root, a, inner, _b, _c) = sample_tree();

    assert_eq!(tree.pop(root), Some(inner));
    assert_eq!(tree[root].children(), &[a]);
    assert_eq!(tree[inner].parent(), None);

    assert_eq!(tree.pop(root), Some(a));
    assert_eq!(tree.pop(root), None);
}

#[test]
fn test_pop_at_out_of_bounds_returns_none() {
    let (mut tree, root, a, _inner, _b, _c) = sample_tree();

    assert_eq!(tree.pop_at(root, 5), None);
    assert_eq!(tree.pop_at(root, 0), Some(a));
}

#[test]
fn test_remove_non_child_returns_false() {
    let (mut tree, root, a, inner, b, _c) = sample_tree();

    // b is a grandchild, not a direct child of root
    assert!(!tree.remove(root, b));
    assert!(tree.remove(root, a));
    assert_eq!(tree[root].children(), &[inner]);
}

#[test]
fn test_remove_deleted_by_predicate() {
    let (mut tree, root, _a, inner, _b, _c) = sample_tree();

    tree.remove_deleted(root, |node| matches!(node.name(), Some("A") | Some("C")));

    let remaining: Vec<Option<&str>> = tree
        .preorder(root, true)
        .map(|id| tree[id].name())
        .collect();
    assert_eq!(remaining, vec![None, None, Some("B")]);
    assert_eq!(tree[inner].children().len(), 1);
}

#[test]
fn test_prune_collapses_single_child_chain() {
    // ((A)B)C;
    let mut tree = Tree::new();
    let c = tree.add_node(Some("C"), None);
    let b = tree.add_node(Some("B"), None);
    let a = tree.add_node(Some("A"), None);
    tree.append(c, b);
    tree.append(b, a);

    tree.prune(c);

    assert_eq!(tree.to_newick(c, &NewickOptions::default()), "(A)C;");
    assert_eq!(tree[a].parent(), Some(c));
    assert_eq!(tree[b].parent(), None);
}

#[test]
fn test_prune_collapses_longer_chain() {
    // (((A)B)D)C;
    let mut tree = Tree::new();
    let c = tree.add_node(Some("C"), None);
    let d = tree.add_node(Some("D"), None);
    let b = tree.add_node(Some("B"), None);
    let a = tree.add_node(Some("A"), None);
    tree.append(c, d);
    tree.append(d, b);
    tree.append(b, a);

    tree.prune(c);

    assert_eq!(tree.to_newick(c, &NewickOptions::default()), "(A)C;");
}

#[test]
fn test_prune_after_removal() {
    let (mut tree, root, _a, inner, _b, c) = sample_tree();

    tree.remove(inner, c);
    tree.prune(root);

    // inner had one child left and was spliced out
    assert_eq!(tree.to_newick(root, &NewickOptions::default()), "(A,B);");
}

#[test]
fn test_counters() {
    let (tree, root, _a, inner, _b, _c) = sample_tree();

    assert_eq!(tree.node_count(root), 5);
    assert_eq!(tree.tip_count(root), 3);
    assert_eq!(tree.internal_count(root), 2);
    assert_eq!(tree.node_count(inner), 3);
    assert_eq!(tree.tip_count(inner), 2);
}

// ============= Name Cache Tests =============

#[test]
fn test_find_by_name_and_by_id() {
    let (mut tree, root, a, _inner, b, _c) = sample_tree();

    assert_eq!(tree.find(root, "A").unwrap(), a);
    assert_eq!(tree.find(root, "B").unwrap(), b);
    // An already resolved reference is returned unchanged
    assert_eq!(tree.find(root, a).unwrap(), a);
}

#[test]
fn test_find_missing_node() {
    let (mut tree, root, _a, _inner, _b, _c) = sample_tree();

    assert_eq!(
        tree.find(root, "Z"),
        Err(TreeError::MissingNode("Z".to_string()))
    );
}

#[test]
fn test_create_node_cache_is_idempotent() {
    let (mut tree, root, a, _inner, _b, _c) = sample_tree();

    tree.create_node_cache(root).unwrap();
    tree.create_node_cache(root).unwrap();
    assert_eq!(tree.find(root, "A").unwrap(), a);
}

#[test]
fn test_duplicate_name_detected_on_rebuild() {
    let (mut tree, root, a, _inner, _b, _c) = sample_tree();

    // Build the cache, then append a duplicate name; the append must
    // invalidate so the next lookup rebuilds and reports the conflict
    assert_eq!(tree.find(root, "A").unwrap(), a);
    let dup = tree.add_node(Some("A"), None);
    tree.append(root, dup);

    assert_eq!(
        tree.find(root, "B"),
        Err(TreeError::DuplicateNode("A".to_string()))
    );
}

#[test]
fn test_mutations_invalidate_cache() {
    let (mut tree, root, a, inner, b, _c) = sample_tree();

    assert_eq!(tree.find(root, "B").unwrap(), b);
    // Move B out of the tree; the stale cache must not answer for it
    tree.remove(inner, b);
    let standalone = tree.add_node(Some("B2"), None);
    tree.append(root, standalone);

    assert_eq!(tree.find(root, "B2").unwrap(), standalone);
    assert_eq!(
        tree.find(root, "B"),
        Err(TreeError::MissingNode("B".to_string()))
    );
    assert_eq!(tree.find(root, "A").unwrap(), a);
}

#[test]
fn test_cache_scope_switches_with_lookup_scope() {
    let (mut tree, root, a, inner, b, _c) = sample_tree();

    // A is not below inner
    assert_eq!(tree.find(inner, "B").unwrap(), b);
    assert_eq!(
        tree.find(inner, "A"),
        Err(TreeError::MissingNode("A".to_string()))
    );
    // Widening the scope rebuilds and finds it again
    assert_eq!(tree.find(root, "A").unwrap(), a);
}

// ============= Path and Ancestry Tests =============

#[test]
fn test_ancestors_root_and_siblings() {
    let (tree, root, a, inner, b, c) = sample_tree();

    assert_eq!(tree.ancestors(b), vec![inner, root]);
    assert_eq!(tree.ancestors(root), Vec::<NodeId>::new());
    assert_eq!(tree.root_of(b), root);
    assert_eq!(tree.root_of(root), root);
    assert_eq!(tree.siblings(b), vec![c]);
    assert_eq!(tree.siblings(a), vec![inner]);
    assert_eq!(tree.siblings(root), Vec::<NodeId>::new());
}

#[test]
fn test_lowest_common_ancestor() {
    let (mut tree, root, a, inner, b, _c) = sample_tree();

    // Single reference resolves to the node itself
    assert_eq!(
        tree.lowest_common_ancestor(root, &[NodeRef::Name("A")])
            .unwrap(),
        a
    );
    // Two tips under the same internal node
    assert_eq!(
        tree.lowest_common_ancestor(root, &[NodeRef::Name("B"), NodeRef::Name("C")])
            .unwrap(),
        inner
    );
    // All tips meet at the root
    assert_eq!(
        tree.lowest_common_ancestor(
            root,
            &[NodeRef::Name("A"), NodeRef::Name("B"), NodeRef::Name("C")]
        )
        .unwrap(),
        root
    );
    // Resolved handles work the same as names
    assert_eq!(
        tree.lowest_common_ancestor(root, &[NodeRef::Id(a), NodeRef::Id(b)])
            .unwrap(),
        root
    );
}

#[test]
fn test_lca_leaves_tree_unmodified() {
    let (mut tree, root, _a, _inner, _b, _c) = sample_tree();
    let options = NewickOptions::default().with_distances(true);
    let before = tree.to_newick(root, &options);

    for _ in 0..3 {
        tree.lowest_common_ancestor(root, &[NodeRef::Name("A"), NodeRef::Name("C")])
            .unwrap();
    }

    assert_eq!(tree.to_newick(root, &options), before);
}

#[test]
fn test_lca_missing_name_propagates() {
    let (mut tree, root, _a, _inner, _b, _c) = sample_tree();

    assert_eq!(
        tree.lowest_common_ancestor(root, &[NodeRef::Name("A"), NodeRef::Name("Z")]),
        Err(TreeError::MissingNode("Z".to_string()))
    );
}

// ============= Copy and Subset Tests =============

#[test]
fn test_copy_is_deep_and_independent() {
    let (mut tree, root, _a, _inner, _b, _c) = sample_tree();
    let options = NewickOptions::default().with_distances(true);

    let copied = tree.copy(root);
    assert_eq!(copied.len(), 5);
    assert_eq!(
        copied.to_newick(0, &options),
        tree.to_newick(root, &options)
    );

    // Mutating the original leaves the copy untouched
    let extra = tree.add_node(Some("D"), Some(2.0));
    tree.append(root, extra);
    assert_eq!(copied.to_newick(0, &options), "(A:1,(B:1,C:1):1):0;");
    assert_eq!(copied.node_count(0), 5);
}

#[test]
fn test_copy_of_inner_subtree() {
    let (tree, _root, _a, inner, _b, _c) = sample_tree();

    let copied = tree.copy(inner);
    assert_eq!(copied.node_count(0), 3);
    assert_eq!(
        copied.to_newick(0, &NewickOptions::default().with_distances(true)),
        "(B:1,C:1):1;"
    );
}

#[test]
fn test_subset() {
    let (tree, root, a, inner, _b, _c) = sample_tree();

    let names: Vec<String> = tree.subset(root).into_iter().collect();
    assert_eq!(names, vec!["A", "B", "C"]);

    let inner_names: Vec<String> = tree.subset(inner).into_iter().collect();
    assert_eq!(inner_names, vec!["B", "C"]);

    assert!(tree.subset(a).is_empty());
}
