//! The `options` subcommand: list selectable filter values for an attribute,
//! with the `All` sentinel first, the way a dropdown would present them.

use anyhow::Result;
use log::info;

use crate::{cli::OptionsArgs, engine, explore};

pub fn execute(args: &OptionsArgs) -> Result<()> {
    let data = explore::load_or_message(&args.input)?;
    let values = engine::distinct_values(&data, &args.attribute)?;

    println!("{}", engine::ALL);
    for value in &values {
        println!("{value}");
    }

    info!(
        "Listed {} value(s) for '{}' from {:?}",
        values.len(),
        args.attribute,
        args.input
    );
    Ok(())
}
