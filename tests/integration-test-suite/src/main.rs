//! End-to-end test suite for the `mcp` crate.

fn main() {
    println!("run this suite with `cargo test`");
}
