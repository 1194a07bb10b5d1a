//! Exists command - reports whether a node exists at a path.

use confstore::{backend::Configuration, tree::Path};

use crate::backend::StoreHandle;
use crate::cli::PathArgs;
use crate::output::OutputFormat;

/// Run the exists command
pub fn run(args: &PathArgs, store: &StoreHandle, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::parse(&args.path)?;
    let exists = store.stack().node_exists(&path)?;

    match format {
        OutputFormat::Human => println!("{exists}"),
        OutputFormat::Json => {
            let value = serde_json::json!({ "path": path.render(), "exists": exists });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
