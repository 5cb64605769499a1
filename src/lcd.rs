use crate::core::{DenomLookup, IbcReference, LookupError};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const DENOM_TRACES_PATH: &str = "/ibc/apps/transfer/v1/denom_traces";

/// Where an IBC denom came from: the port/channel hops and the original denom.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DenomTrace {
    pub path: String,
    pub base_denom: String,
}

#[derive(Debug, Deserialize)]
struct DenomTraceResponse {
    denom_trace: DenomTrace,
}

/// Resolves IBC references against a Cosmos LCD (REST) node.
pub struct LcdClient {
    node: String,
    http: reqwest::blocking::Client,
}

impl LcdClient {
    pub fn new(node: &str, timeout: Duration) -> reqwest::Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(LcdClient {
            node: node.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn trace_url(&self, reference: &IbcReference) -> String {
        format!("{}{}/{}", self.node, DENOM_TRACES_PATH, reference.hash())
    }

    /// Fetch the denom trace for `reference`; `None` if the node does not know it.
    pub fn denom_trace(&self, reference: &IbcReference) -> Result<Option<DenomTrace>, LookupError> {
        let url = self.trace_url(reference);
        log::debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .send()
            .map_err(|source| LookupError::Transport {
                reference: reference.to_string(),
                source: Box::new(source),
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            log::info!("No denom trace for {} on {}", reference, self.node);
            return Ok(None);
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                reference: reference.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| LookupError::Transport {
            reference: reference.to_string(),
            source: Box::new(source),
        })?;
        parse_denom_trace(reference, &body).map(Some)
    }
}

impl DenomLookup for LcdClient {
    fn ibc_address_to_denom(
        &self,
        reference: &IbcReference,
    ) -> Result<Option<String>, LookupError> {
        Ok(self
            .denom_trace(reference)?
            .map(|trace| trace.base_denom))
    }
}

fn parse_denom_trace(reference: &IbcReference, body: &str) -> Result<DenomTrace, LookupError> {
    let response: DenomTraceResponse =
        serde_json::from_str(body).map_err(|e| LookupError::Malformed {
            reference: reference.to_string(),
            reason: e.to_string(),
        })?;
    let trace = response.denom_trace;

    let derived = IbcReference::from_trace(&trace.path, &trace.base_denom);
    if &derived != reference {
        log::warn!(
            "Denom trace {}/{} hashes to {}, not {}",
            trace.path,
            trace.base_denom,
            derived,
            reference
        );
    }
    Ok(trace)
}
