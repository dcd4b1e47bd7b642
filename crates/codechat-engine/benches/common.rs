// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_c_source(functions: usize) -> String {
    let mut content = String::from("/* Generated benchmark input.\n *\n * Header block comment.\n */\n#include <stdio.h>\n\n");

    for i in 0..functions {
        content.push_str(&format!("// Function {i}.\n//\n// Adds one to its argument.\n"));
        content.push_str(&format!("int f{i}(int x) {{\n"));
        content.push_str("    // Indented doc inside the body.\n");
        content.push_str("    int y = x + 1; // trailing comment\n");
        content.push_str("    /* block doc\n       over two lines */\n");
        content.push_str("    return y;\n}\n\n");
    }

    content
}
