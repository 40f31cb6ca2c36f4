use anyhow::Result;
use log::info;

use crate::{cli::PreviewArgs, explore, table};

pub fn execute(args: &PreviewArgs) -> Result<()> {
    let data = explore::load_or_message(&args.input)?;
    let mut rows = data.display_rows();
    rows.truncate(args.rows);

    table::print_table(data.headers(), &rows);
    info!("Displayed {} row(s) from {:?}", rows.len(), args.input);
    Ok(())
}
