//! # College Finder Orchestrator
//!
//! This module coordinates the query pipeline:
//! 1. Extract search terms from the raw query
//! 2. Filter the catalog (on the blocking pool, the catalog may be large)
//! 3. Generate the answer text, LLM first with deterministic fallback
//!
//! Streaming is not done here; see [`crate::emitter`].

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info};

use catalog::{Catalog, CollegeRecord};
use pipeline::{FilterPipeline, MatchPolicy};
use query::SearchTerms;

use crate::responder::ResponseGenerator;

/// Main orchestrator shared by every request.
#[derive(Clone)]
pub struct CollegeFinder {
    catalog: Arc<Catalog>,
    filter_pipeline: Arc<FilterPipeline>,
    generator: ResponseGenerator,
}

impl CollegeFinder {
    pub fn new(catalog: Arc<Catalog>, policy: MatchPolicy, generator: ResponseGenerator) -> Self {
        Self {
            catalog,
            filter_pipeline: Arc::new(FilterPipeline::for_policy(policy)),
            generator,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn llm_available(&self) -> bool {
        self.generator.llm_available()
    }

    /// Extract terms and filter the catalog, without generating an answer.
    pub async fn search(&self, query: &str) -> Result<(SearchTerms, Vec<CollegeRecord>)> {
        let terms = SearchTerms::extract(query);
        debug!("Extracted {} terms: {:?}", terms.len(), terms);

        let matches = tokio::task::spawn_blocking({
            let catalog = self.catalog.clone();
            let pipeline = self.filter_pipeline.clone();
            let terms = terms.clone();
            move || pipeline.filter_catalog(&catalog, &terms)
        })
        .await
        .context("Filter task panicked")?
        .context("Failed to apply filters")?;

        debug!(
            "Filtering complete, {} of {} colleges match",
            matches.len(),
            self.catalog.len()
        );
        Ok((terms, matches))
    }

    /// Run the whole pipeline for one query and return the answer text.
    ///
    /// Only internal failures surface as errors; provider trouble is
    /// absorbed by the response generator.
    pub async fn answer(&self, query: &str) -> Result<String> {
        let start_time = Instant::now();

        let (_terms, matches) = self.search(query).await?;
        let text = self.generator.generate(query, &matches).await;

        info!(
            matches = matches.len(),
            response_len = text.len(),
            "Answered query in {:.2?}",
            start_time.elapsed()
        );
        Ok(text)
    }
}
