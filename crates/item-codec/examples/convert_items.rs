//! Converts a JSON array of items into a YAML config section.
//!
//! ```text
//! RUST_LOG=item_codec=debug cargo run --example convert_items -- items.json
//! ```

use std::fs::File;
use std::io::BufReader;

use item_codec::codec::{read_items_json, write_items};
use item_codec::{AttributeRegistry, ConfigSection};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "items.json".to_string());
    eprintln!("Reading: {}", path);

    let file = File::open(&path).expect("Failed to open file");
    let registry = AttributeRegistry::global();
    let items = read_items_json(BufReader::new(file), registry).expect("Failed to decode");
    eprintln!("Decoded {} items", items.len());

    for (i, item) in items.iter().enumerate() {
        let attributes = item.attributes(registry).len();
        let meta: Vec<String> = item
            .populated_meta()
            .map(|m| m.tags().map(|t| format!("{t:?}")).collect())
            .unwrap_or_default();
        eprintln!(
            "  [{i}] {} x{} (data {}), {} enchantments, meta {:?}, {} attributes",
            item.kind,
            item.amount,
            item.durability,
            item.enchantments.len(),
            meta,
            attributes
        );
    }

    let mut list = ConfigSection::new();
    write_items(&items, &mut list).expect("Failed to encode");
    let mut root = ConfigSection::new();
    root.set_section("items", list);

    print!("{}", root.to_yaml_string().expect("Failed to serialize"));
}
