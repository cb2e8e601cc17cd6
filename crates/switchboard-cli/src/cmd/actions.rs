use anyhow::Result;
use std::collections::BTreeMap;

use crate::output::{print_json, print_table};
use switchboard_core::config::Config;
use switchboard_core::registry::{default_catalog, Registry, RouteDescriptor};

/// List every registered action with its resolved route.
pub fn run(json: bool) -> Result<()> {
    let config = Config::from_env();
    let registry = Registry::build(&default_catalog(&config));

    if json {
        let actions: BTreeMap<String, &RouteDescriptor> = registry
            .list_actions()
            .into_iter()
            .filter_map(|name| registry.lookup(&name).map(|d| (name, d)))
            .collect();
        return print_json(&actions);
    }

    let rows: Vec<Vec<String>> = registry
        .list_actions()
        .into_iter()
        .filter_map(|name| {
            registry.lookup(&name).map(|descriptor| {
                vec![name, descriptor.method.to_string(), descriptor.url.clone()]
            })
        })
        .collect();
    print_table(&["ACTION", "METHOD", "URL"], &rows);
    Ok(())
}
