//! Binds three strings to an option with four aliases.
//!
//! ```console
//! $ cargo run -p argbind-demos --example friend -- --qw a b c
//! a
//! b
//! c
//! ```

use argbind_core::{ArgParser, arg_parse};

fn main() -> Result<(), argbind_core::ArgError> {
    let (mut a, mut b, mut c) = (String::new(), String::new(), String::new());
    let mut s = String::new();
    {
        let mut app = ArgParser::named("friend");
        app.add_option(
            "-f, -friend,--qw,--flag",
            "this is an example option",
            (&mut a, &mut b, &mut c),
        )?;
        app.add_option("--string", "this is an example option", &mut s)?;

        arg_parse!(app);
    }

    println!("{a}\n{b}\n{c}");
    if !s.is_empty() {
        println!("{s}");
    }
    Ok(())
}
