//! Index command - lists every indexed identifier.

use crate::backend::StoreHandle;
use crate::output::{OutputFormat, print_table};

/// Run the index command
pub fn run(store: &StoreHandle, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut entries: Vec<_> = store.index().snapshot().into_iter().collect();
    entries.sort_by(|(_, a), (_, b)| a.cmp(b));

    match format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No identifiers indexed");
                return Ok(());
            }
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|(id, path)| vec![id.to_string(), path.render()])
                .collect();
            print_table(&["IDENTIFIER", "PATH"], &rows);
        }
        OutputFormat::Json => {
            let value: serde_json::Map<String, serde_json::Value> = entries
                .into_iter()
                .map(|(id, path)| (id.to_string(), serde_json::Value::String(path.render())))
                .collect();
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
