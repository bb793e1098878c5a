use linker::{file_content, human, link, output, warning_text, Kind, Warning};
use pretty_assertions::assert_eq;

const LAB: &str = "\
1 xy 2
2 z xy
5 R 1004 I 5678 E 2000 R 8002 E 7001
0
1 z
6 R 8001 E 1000 E 1000 E 3000 R 1002 A 1010
0
1 z
2 R 5001 E 4000
1 z 2
2 xy z
3 A 8000 E 1001 E 2000
";

#[test]
fn lab_example() {
    let linked = link(LAB).unwrap();
    assert_eq!(linked.len(), 4);
    assert_eq!(linked.symbols().to_string(), "xy=2\nz=15");
    assert_eq!(
        output(&linked),
        "xy=2\nz=15\n\n\
         0: 1004\n1: 5678\n2: 2015\n3: 8002\n4: 7002\n5: 8006\n6: 1015\n7: 1015\n\
         8: 3015\n9: 1007\n10: 1010\n11: 5012\n12: 4015\n13: 8000\n14: 1015\n15: 2002\n"
    );
    assert!(linked.warnings().is_empty());
}

#[test]
fn lab_example_bases() {
    let linked = link(LAB).unwrap();
    let bases: Vec<_> = linked.modules().iter().map(|m| m.base_address()).collect();
    assert_eq!(bases, vec![0, 5, 11, 13]);
}

#[test]
fn unused_definition_still_links() {
    let text = "1 X 5 0 6 I 1000 I 1001 I 1002 I 1003 I 1004 I 1005";
    let linked = link(text).unwrap();
    assert_eq!(
        linked.warnings(),
        &[Warning::DefinedButUnused {
            symbol: "X".to_string(),
            module: 1,
        }]
    );
    assert_eq!(linked.warnings()[0].kind(), Kind::DefinedButUnused);
    assert_eq!(
        file_content(&linked),
        "X=5\n\n0: 1000\n1: 1001\n2: 1002\n3: 1003\n4: 1004\n5: 1005\n\n\n\
         Warning: X was defined in Module 1 but was never used.\n"
    );
}

#[test]
fn unused_use_entry() {
    let text = "1 A 0 0 1 I 1000  0 2 A A 1 E 1001";
    let linked = link(text).unwrap();
    assert_eq!(
        warning_text(linked.warnings()),
        "Warning: A appeared in the use list in Module 2 but not used.\n"
    );
    assert_eq!(output(&linked), "A=0\n\n0: 1000\n1: 1000\n");
}

#[test]
fn round_trip() {
    let linked = link("1 A 0 0 1 I 1000\n0 1 A 1 E 1000\n").unwrap();
    assert_eq!(output(&linked), "A=0\n\n0: 1000\n1: 1000\n");
    assert_eq!(
        human(&linked),
        "Symbol Table\nA=0\n\
         Module 1\nBase Address: 0\n1 A 0\n0\n1 I 1000\n\n\
         Module 2\nBase Address: 1\n0\n1 A\n1 E 1000\n"
    );
}

#[test]
fn empty_input_links_nothing() {
    let linked = link("").unwrap();
    assert!(linked.is_empty());
    assert_eq!(output(&linked), "\n\n\n");
}
