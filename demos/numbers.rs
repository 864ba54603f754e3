//! Typed values, a flag and a custom help token.
//!
//! ```console
//! $ cargo run -p argbind-demos --example numbers -- -n=3 0.25 --scale -2 -v
//! count=3 ratio=0.25 scale=-2 verbose=true
//! $ cargo run -p argbind-demos --example numbers -- -n 3
//! error: option --number, -n is not assigned properly starting from argument 2
//! ```

use argbind_core::{ArgParser, ParserConfig, arg_parse};

fn main() -> Result<(), argbind_core::ArgError> {
    let mut count: u32 = 0;
    let mut ratio: f64 = 1.0;
    let mut scale: i64 = 1;
    let mut verbose = false;
    {
        let config = ParserConfig::default()
            .with_name("numbers")
            .with_help_token("-h");
        let mut app = ArgParser::with_config(config);
        app.add_option("--number, -n", "Count and ratio", (&mut count, &mut ratio))?;
        app.add_option("--scale", "Signed multiplier", &mut scale)?;
        app.add_flag("-v; --verbose", "Print more", &mut verbose)?;

        arg_parse!(app);
    }

    println!("count={count} ratio={ratio} scale={scale} verbose={verbose}");
    Ok(())
}
