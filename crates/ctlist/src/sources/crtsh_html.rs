use super::{CtSource, Module};
use crate::model::ResultSet;
use crate::normalize::split_names;
use crate::Result;
use async_trait::async_trait;
use select::document::Document;
use select::node::Node;
use select::predicate::Name;
use tracing::{debug, trace};

// region:        --- Module info

pub struct CrtShHtml {
    endpoint: String,
}

impl CrtShHtml {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl Module for CrtShHtml {
    fn name(&self) -> String {
        "crtsh/html".to_string()
    }

    fn description(&self) -> String {
        "Scrape matching identities from the crt.sh results page".to_string()
    }
}

// endregion:     --- Module info

#[async_trait]
impl CtSource for CrtShHtml {
    fn url(&self) -> String {
        format!("{}/", self.endpoint)
    }

    fn parse(&self, body: &str, result: &mut ResultSet) -> Result<usize> {
        let document = Document::from(body);

        let Some(table) = results_table(&document) else {
            debug!("No results table");
            return Ok(0);
        };

        let mut collected = 0;
        for row in table.find(Name("tr")) {
            let cells: Vec<Node> = row.children().filter(|n| n.is(Name("td"))).collect();
            if cells.len() < 2 {
                continue;
            }

            // second to last column lists every identity of the certificate
            let markup = cells[cells.len() - 2].inner_html();
            for name in split_names(&markup) {
                trace!("Collecting: {:?}", name);
                if result.insert(&name) {
                    collected += 1;
                }
            }
        }

        debug!("{} collected", collected);
        Ok(collected)
    }
}

// region:        --- Utils

/// The innermost table with the most rows. crt.sh nests its results table
/// inside a layout table.
fn results_table(document: &Document) -> Option<Node> {
    document
        .find(Name("table"))
        .filter(|table| !contains_table(table))
        .max_by_key(|table| table.find(Name("tr")).count())
}

fn contains_table(node: &Node) -> bool {
    node.children()
        .any(|child| child.is(Name("table")) || contains_table(&child))
}

// endregion:     --- Utils
