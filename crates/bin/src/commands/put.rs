//! Put command - replaces the subtree at a path.

use confstore::{
    backend::Configuration,
    tree::{ConfigNode, Path},
};

use super::locked_schema;
use crate::backend::StoreHandle;
use crate::cli::PutArgs;
use crate::output::OutputFormat;

/// Run the put command
pub fn run(args: &PutArgs, store: &StoreHandle, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::parse(&args.path)?;
    let node: ConfigNode = serde_json::from_str(&args.value)?;
    let schema = locked_schema(args.lock);

    store.stack().persist_node(&path, node, schema.as_ref())?;

    match format {
        OutputFormat::Human => println!("Persisted {}", display_path(&path)),
        OutputFormat::Json => {
            let value = serde_json::json!({ "persisted": path.render() });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}

/// Render a path for humans, naming the root explicitly
pub fn display_path(path: &Path) -> String {
    if path.is_root() {
        "<root>".to_string()
    } else {
        path.render()
    }
}
