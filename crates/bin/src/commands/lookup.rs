//! Lookup command - resolves an identifier to its current path.

use crate::backend::StoreHandle;
use crate::cli::LookupArgs;
use crate::output::OutputFormat;

/// Run the lookup command
pub fn run(args: &LookupArgs, store: &StoreHandle, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let path = store.indexing().get_path_by_identifier(&args.id)?;

    match format {
        OutputFormat::Human => println!("{path}"),
        OutputFormat::Json => {
            let value = serde_json::json!({ "id": args.id, "path": path });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
