//! Where column suggestions come from.

use std::future::Future;

use colmap_map::SuggestionService;
use colmap_model::Mapping;
use tracing::debug;

use crate::error::Result;

/// A provider of suggested field-to-column mappings.
///
/// Implementations report every failure as a [`SuggestError`] and leave the
/// fail-open decision to the caller.
///
/// [`SuggestError`]: crate::SuggestError
pub trait SuggestionSource {
    /// Fetch a suggested mapping for `columns`, given in document order.
    fn fetch(&self, columns: &[String]) -> impl Future<Output = Result<Mapping>> + Send;
}

/// In-process source backed by a [`SuggestionService`].
#[derive(Debug, Clone)]
pub struct EngineSource {
    service: SuggestionService,
}

impl EngineSource {
    pub fn new(service: SuggestionService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &SuggestionService {
        &self.service
    }
}

impl SuggestionSource for EngineSource {
    async fn fetch(&self, columns: &[String]) -> Result<Mapping> {
        debug!(columns = columns.len(), "suggesting in process");
        Ok(self.service.report(columns)?.into_mapping())
    }
}
