//! Remove command - deletes the subtree at a path.

use confstore::{backend::Configuration, tree::Path};

use super::put::display_path;
use crate::backend::StoreHandle;
use crate::cli::PathArgs;
use crate::output::OutputFormat;

/// Run the remove command
pub fn run(args: &PathArgs, store: &StoreHandle, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::parse(&args.path)?;
    store.stack().remove_node(&path)?;

    match format {
        OutputFormat::Human => println!("Removed {}", display_path(&path)),
        OutputFormat::Json => {
            let value = serde_json::json!({ "removed": path.render() });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
