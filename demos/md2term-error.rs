//! Render a sample decorated error report.
//!
//! ```sh
//! $ cargo run --example md2term-error
//! ```

use md2term::{render_error, ErrorFormatOptions, ErrorProps};

fn main() {
    env_logger::init();

    let props = ErrorProps {
        code: Some("ENOENT".into()),
        name: "FileNotFoundError".into(),
        readable_name: Some("File Not Found".into()),
        message: "Error: ENOENT: no such file or directory, open 'config.yml'".into(),
        explain: Some(
            "The configuration file could not be found. It is looked up in the \
             current directory first, then in `$HOME/.config`."
                .into(),
        ),
        hints: Some(
            "* Run `touch config.yml` to start from an empty file\n\
             * Pass `--config <path>` to use a file elsewhere"
                .into(),
        ),
        path: Some("./config.yml".into()),
        ..ErrorProps::default()
    };

    match render_error(&props, ErrorFormatOptions::default()) {
        Ok(report) => print!("{}", report),
        Err(e) => eprintln!("md2term: {}", e),
    }
}
