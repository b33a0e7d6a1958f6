use std::io::Write as _;

use linker::Linker;

fn run_file(content: &str) -> String {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input.txt");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(content.as_bytes())
        .unwrap();
    let source = std::fs::read_to_string(&path).unwrap();
    let linker = Linker::new(source);
    let mut out = String::new();
    linker.run(&mut out).unwrap();
    out
}

#[test]
fn relative_reference_gets_module_base_added() {
    // module 1: defines nothing, one R instruction referencing rel addr 1
    // within a 2-instruction module, relocated by module_addr=0
    let out = run_file("0 0 2\nR 1\nA 2\n");
    assert!(out.contains("000: 0001"));
    assert!(out.contains("001: 0002"));
}

#[test]
fn oversized_relative_address_is_reset_to_module_base() {
    let input = "1 x 5 0 1\nA 0\n";
    let out = run_file(input);
    assert!(out.contains("too big"));
    assert!(out.contains("x=0"));
}

#[test]
fn unused_uselist_entry_is_warned() {
    let input = "0 1 z 1\nA 0\n";
    let out = run_file(input);
    assert!(out.contains("z appeared in the uselist but was not actually used"));
}

#[test]
fn defined_but_unused_symbol_is_warned() {
    let input = "1 x 0 0 1\nA 0\n";
    let out = run_file(input);
    assert!(out.contains("x was defined but never used"));
}
