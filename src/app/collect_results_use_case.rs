use crate::app::ports::HttpClientPort;
use crate::config::ElectionsConfig;
use crate::elections::download::download_precinct_csv;
use crate::elections::jump_list::{parse_jump_list, JumpList};
use crate::error::Result;
use crate::types::CollectedElection;
use std::collections::HashSet;
use std::thread;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionReport {
    pub kept: Vec<CollectedElection>,
    pub considered: usize,
    pub needed: usize,
}

impl CollectionReport {
    pub fn is_complete(&self) -> bool {
        self.kept.len() >= self.needed
    }
}

/// Walks the "Similar results" list from the configured election and
/// downloads the precinct CSV of every election whose label matches.
pub struct CollectResultsUseCase<H> {
    http: H,
    config: ElectionsConfig,
}

impl<H: HttpClientPort> CollectResultsUseCase<H> {
    pub fn new(http: H, config: ElectionsConfig) -> Self {
        Self { http, config }
    }

    fn load_jump_list(&self, election_id: u64) -> Result<JumpList> {
        let resp = self.http.get(&self.config.jump_list_url(election_id))?;
        parse_jump_list(&resp.text(), election_id)
    }

    fn wanted(&self, label: &str) -> bool {
        match self.config.label_filter.as_deref() {
            Some(filter) if !filter.is_empty() => label.contains(filter),
            _ => true,
        }
    }

    #[instrument(skip(self), fields(start = self.config.start_election_id, needed = self.config.needed))]
    pub fn run(&self) -> Result<CollectionReport> {
        let mut report = CollectionReport {
            needed: self.config.needed,
            ..CollectionReport::default()
        };
        let mut list = self.load_jump_list(self.config.start_election_id)?;
        let mut current = list.selected;
        let mut visited = HashSet::new();

        while report.kept.len() < self.config.needed {
            let mut candidate = current;

            match self.consider(&mut list, &mut candidate) {
                Ok(Some(collected)) => {
                    info!(
                        id = collected.id,
                        kept = report.kept.len() + 1,
                        needed = self.config.needed,
                        path = %collected.path.display(),
                        "Kept election"
                    );
                    report.kept.push(collected);
                }
                Ok(None) => {}
                Err(e) => warn!(id = candidate, error = %e, "Error while processing election"),
            }
            report.considered += 1;
            visited.insert(candidate);

            match list.next_after(candidate) {
                Some(next) if !visited.contains(&next) => current = next,
                _ => {
                    info!("No more similar results to traverse");
                    break;
                }
            }

            if !self.config.delay().is_zero() {
                thread::sleep(self.config.delay());
            }
        }

        if !report.is_complete() {
            warn!(
                kept = report.kept.len(),
                needed = self.config.needed,
                "Fewer matching elections than requested were available"
            );
        }
        Ok(report)
    }

    /// Downloads `candidate` when its label matches. A candidate missing from
    /// the current list reloads the list from its own page and continues from
    /// that page's selected entry.
    fn consider(
        &self,
        list: &mut JumpList,
        candidate: &mut u64,
    ) -> Result<Option<CollectedElection>> {
        if !list.contains(*candidate) {
            *list = self.load_jump_list(*candidate)?;
            *candidate = list.selected;
        }
        let label = list.label_of(*candidate).unwrap_or_default().to_string();
        info!(id = *candidate, label = %label, "Considering election");

        if !self.wanted(&label) {
            info!(id = *candidate, "Skip: label does not match filter");
            return Ok(None);
        }

        match download_precinct_csv(
            &self.http,
            &self.config,
            *candidate,
            &label,
            &self.config.output_dir,
        ) {
            Ok(path) => Ok(Some(CollectedElection {
                id: *candidate,
                label,
                path,
            })),
            Err(e) => {
                warn!(id = *candidate, error = %e, "Skip: download failed");
                Ok(None)
            }
        }
    }
}
