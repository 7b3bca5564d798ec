//! Transport-agnostic request envelope
//!
//! Binds the pipeline to a single operation: `{ mediaUrl }` in, report out.
//! Method filtering and payload validation happen here, before any
//! collaborator is touched; actual transport routing (HTTP server, function
//! runtime) is the embedder's concern.

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::pipeline::Pipeline;
use crate::report::ServiceResponse;

/// Transport method as seen at the boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMethod {
    Post,
    /// CORS preflight; answered with a no-op success
    Options,
    Other(String),
}

/// The single accepted request payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(rename = "mediaUrl")]
    pub media_url: Option<String>,
}

pub struct MediaForensicsService {
    pipeline: Pipeline,
}

impl MediaForensicsService {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Handles one request end to end and maps the outcome onto a response
    #[instrument(skip(self, payload))]
    pub async fn handle(
        &self,
        method: RequestMethod,
        payload: Option<AnalyzeRequest>,
    ) -> ServiceResponse {
        match method {
            RequestMethod::Options => return ServiceResponse::preflight(),
            RequestMethod::Post => {}
            RequestMethod::Other(name) => {
                warn!(method = %name, "rejected non-POST request");
                return ServiceResponse::method_not_allowed();
            }
        }

        let media_url = match payload.and_then(|p| p.media_url).filter(|u| !u.trim().is_empty()) {
            Some(url) => url,
            None => return ServiceResponse::bad_request("mediaUrl is required"),
        };

        info!(url = %media_url, "analysis requested");
        match self.pipeline.execute(&media_url).await {
            Ok(report) => ServiceResponse::ok(&report),
            Err(err) => ServiceResponse::from_error(&err),
        }
    }
}
