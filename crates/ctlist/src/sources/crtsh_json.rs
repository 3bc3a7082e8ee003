use super::{CtSource, Module};
use crate::model::ResultSet;
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, trace};

// region:        --- Module info

pub struct CrtShJson {
    endpoint: String,
}

impl CrtShJson {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

impl Module for CrtShJson {
    fn name(&self) -> String {
        "crtsh/json".to_string()
    }

    fn description(&self) -> String {
        "Read common names from the crt.sh JSON output".to_string()
    }
}

// endregion:     --- Module info

/// One certificate as listed by the JSON output. Only the common name is used.
#[derive(Debug, Deserialize)]
pub struct CertificateRecord {
    pub common_name: Option<String>,
}

#[async_trait]
impl CtSource for CrtShJson {
    fn url(&self) -> String {
        format!("{}/json", self.endpoint)
    }

    fn parse(&self, body: &str, result: &mut ResultSet) -> Result<usize> {
        let records: Vec<CertificateRecord> = serde_json::from_str(body)?;
        debug!("{} records decoded", records.len());

        let collected = records
            .into_iter()
            .filter_map(|record| record.common_name)
            .inspect(|name| trace!("Collecting: {:?}", name))
            .filter(|name| result.insert(name))
            .count();

        debug!("{} collected", collected);
        Ok(collected)
    }
}
