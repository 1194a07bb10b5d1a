//! Get command - prints the subtree at a path.

use confstore::{backend::Configuration, tree::Path};

use super::locked_schema;
use crate::backend::StoreHandle;
use crate::cli::GetArgs;
use crate::output::OutputFormat;

/// Run the get command
pub fn run(args: &GetArgs, store: &StoreHandle, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::parse(&args.path)?;
    let schema = locked_schema(args.lock);
    let node = store.stack().get_configuration_node(&path, schema.as_ref())?;
    format.print_value(&node.into())?;
    Ok(())
}
