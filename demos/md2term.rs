//! Render Markdown from stdin to the terminal.
//!
//! ```sh
//! $ cargo run --example md2term < README.md
//! $ cargo run --example md2term 60 < README.md   # wrap at 60 columns
//! ```

use std::io::Read;

use md2term::{render_markdown, RenderOptions};

fn main() {
    env_logger::init();

    let columns = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(80);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("reading stdin");

    let opts = RenderOptions::default().columns(columns);
    match render_markdown(&input, opts) {
        Ok(text) => print!("{}", text),
        Err(e) => eprintln!("md2term: {}", e),
    }
}
