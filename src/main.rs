//! Just main(). Keep as small as possible.

// Attributes in `main.rs` don't reach the rest of the crate, and this file
// stays minimal, so lint groups are just blanket-allowed.
#![allow(clippy::cargo)]
#![allow(clippy::restriction)]

use cupid::utils::cli::run;

fn main() -> std::io::Result<()> {
    run()
}
