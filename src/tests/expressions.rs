use crate::*;

#[test]
fn test_binary_op_groups_its_operands() {
    let program = analyze(decode("6001600201"));
    let analysis = group_expressions(&program);

    assert_eq!(analysis.nodes.len(), 1);
    let add = &analysis.nodes[0];
    assert_eq!((add.span_start, add.span_end), (0, 2));
    assert_eq!(add.produced_count, 1);
    assert_eq!(add.children.len(), 2);
    assert!(add.children.iter().all(|child| child.children.is_empty()));
}

#[test]
fn test_symbolic_stack_tracks_pushes_and_mstore() {
    let program = analyze(decode("6080604052"));
    let analysis = group_expressions(&program);

    assert_eq!(analysis.stacks[0], ["0x80"]);
    assert_eq!(analysis.stacks[1], ["0x80", "0x40"]);
    assert!(analysis.stacks[2].is_empty());

    assert_eq!(analysis.nodes.len(), 1);
    assert_eq!(analysis.nodes[0].produced_count, 0);
}

#[test]
fn test_leaves_without_consumer_stay_top_level() {
    // caller, push1 1, push0
    let analysis = group_expressions(&analyze(decode("3360015f")));

    assert_eq!(analysis.nodes.len(), 3);
    assert_eq!(analysis.stacks[2], ["0x01", "0x0"]);
}

#[test]
fn test_underfull_stack_is_tolerated() {
    // add with nothing before it
    let analysis = group_expressions(&analyze(decode("01")));

    assert_eq!(analysis.nodes.len(), 1);
    assert!(analysis.nodes[0].children.is_empty());
}
