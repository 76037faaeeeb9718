//! Suggestion pipeline: exact TLD matches plus name variations

use crate::config::CheckerConfig;
use crate::domain::AvailabilityCheck;
use crate::error::Result;
use crate::types::{SuggestionRecord, SuggestionResult, VariationPattern};
use std::time::Instant;

use super::variations::generate_variations;

/// Per-run switches coming from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestOptions {
    /// Replaces both the resolved exact-match TLDs and the primary variation TLDs
    pub tlds: Option<Vec<String>>,
    pub no_variations: bool,
    pub variations_only: bool,
}

/// Progress events emitted before each request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestProgress {
    ExactBatch {
        batch: usize,
        batches: usize,
        domains: usize,
    },
    Variation {
        pattern: VariationPattern,
        candidate: String,
        index: usize,
        total: usize,
    },
}

/// Sequential, rate-limited suggestion run over an availability checker
pub struct SuggestionPipeline<'a, C: ?Sized> {
    checker: &'a C,
    config: &'a CheckerConfig,
}

impl<'a, C> SuggestionPipeline<'a, C>
where
    C: AvailabilityCheck + ?Sized,
{
    pub fn new(checker: &'a C, config: &'a CheckerConfig) -> Self {
        Self { checker, config }
    }

    /// TLDs crossed with the base name in the exact-match stream
    pub fn exact_tlds(&self, options: &SuggestOptions) -> Vec<String> {
        options
            .tlds
            .clone()
            .unwrap_or_else(|| self.config.tlds.resolve())
    }

    /// TLDs each variation candidate is checked against
    pub fn primary_tlds(&self, options: &SuggestOptions) -> Vec<String> {
        options
            .tlds
            .clone()
            .unwrap_or_else(|| self.config.tlds.primary())
    }

    pub fn variations_enabled(&self, options: &SuggestOptions) -> bool {
        !options.no_variations && self.config.variations.enabled
    }

    /// Run both streams in order. The first failed request aborts the run.
    pub async fn run<F>(
        &self,
        base: &str,
        options: &SuggestOptions,
        mut on_progress: F,
    ) -> Result<SuggestionResult>
    where
        F: FnMut(&SuggestProgress),
    {
        let start = Instant::now();
        let mut result = SuggestionResult::default();

        if !options.variations_only {
            self.check_exact(base, options, &mut result, &mut on_progress)
                .await?;
        }

        if self.variations_enabled(options) {
            self.check_variations(base, options, &mut result, &mut on_progress)
                .await?;
        }

        tracing::info!(
            base = %base,
            exact = result.exact.len(),
            available = result.available_count(),
            duration_ms = %start.elapsed().as_millis(),
            "Suggestion run completed"
        );

        Ok(result)
    }

    async fn check_exact<F>(
        &self,
        base: &str,
        options: &SuggestOptions,
        result: &mut SuggestionResult,
        on_progress: &mut F,
    ) -> Result<()>
    where
        F: FnMut(&SuggestProgress),
    {
        let domains: Vec<String> = self
            .exact_tlds(options)
            .iter()
            .map(|tld| format!("{}.{}", base, tld))
            .collect();

        let batch_size = self.config.rate_limit.batch_size();
        let delay = self.config.rate_limit.delay();
        let batches = domains.len().div_ceil(batch_size);

        for (i, batch) in domains.chunks(batch_size).enumerate() {
            on_progress(&SuggestProgress::ExactBatch {
                batch: i + 1,
                batches,
                domains: batch.len(),
            });

            let list = self.checker.check_availability(batch).await?;
            let currency = list.currency.as_deref();
            result.exact.extend(
                list.products
                    .iter()
                    .map(|product| SuggestionRecord::from_product(product, currency)),
            );

            // Pause between batches, not after the last one
            if i + 1 < batches {
                tokio::time::sleep(delay).await;
            }
        }

        Ok(())
    }

    async fn check_variations<F>(
        &self,
        base: &str,
        options: &SuggestOptions,
        result: &mut SuggestionResult,
        on_progress: &mut F,
    ) -> Result<()>
    where
        F: FnMut(&SuggestProgress),
    {
        let variations = generate_variations(base, &self.config.variations);
        let primary = self.primary_tlds(options);
        let delay = self.config.rate_limit.delay();

        for (pattern, names) in &variations {
            if names.is_empty() {
                continue;
            }

            let retained = result.variations.entry(*pattern).or_default();

            for (i, name) in names.iter().enumerate() {
                let domains: Vec<String> = primary
                    .iter()
                    .map(|tld| format!("{}.{}", name, tld))
                    .collect();
                if domains.is_empty() {
                    continue;
                }

                on_progress(&SuggestProgress::Variation {
                    pattern: *pattern,
                    candidate: name.clone(),
                    index: i + 1,
                    total: names.len(),
                });

                let list = self.checker.check_availability(&domains).await?;
                let currency = list.currency.as_deref();
                retained.extend(
                    list.products
                        .iter()
                        .filter(|product| product.is_available())
                        .map(|product| SuggestionRecord::from_product(product, currency)),
                );

                // One pause per candidate request
                tokio::time::sleep(delay).await;
            }

            tracing::debug!(
                pattern = %pattern,
                candidates = names.len(),
                available = retained.len(),
                "Variation pattern checked"
            );
        }

        Ok(())
    }
}
