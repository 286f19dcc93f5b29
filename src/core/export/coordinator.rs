//! Export coordinator - main orchestrator for the export process
//!
//! This module runs the export stages in order against one descriptor and
//! merges their reports into an [`ExportSummary`].

use crate::adapters::descriptor::{DescriptorStore, JsonDescriptorStore};
use crate::adapters::storage::{FileInventory, LocalInventory};
use crate::adapters::vocabulary::{VocabularyService, VocabularyStore};
use crate::config::LuxConfig;
use crate::core::admission::{check_admission, Admission};
use crate::core::enrich::{
    add_location_from_related_agent, GroupVocabularyEnricher, MetadataEnricher, StrategyRegistry,
};
use crate::core::export::summary::{ExportStatus, ExportSummary};
use crate::core::filegroups::plan_file_groups;
use crate::core::generation::apply_generation_rules;
use crate::core::pruning::prune_unpublished_groups;
use crate::core::representative::select_representative;
use crate::core::structure::{rebuild_pagination, reconcile_pages};
use crate::core::variables::ProcessInfo;
use crate::domain::{LuxError, Result, Ruleset};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// One export invocation
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Descriptor of the process to export
    pub descriptor: PathBuf,

    /// Folder the page images are reconciled against
    pub image_folder: PathBuf,

    /// Folder listed when rebuilding pagination and relinking original files.
    /// Defaults to `image_folder`.
    pub media_folder: Option<PathBuf>,

    pub process: ProcessInfo,

    /// Overrides `export.destination`
    pub destination: Option<PathBuf>,

    /// Skip every write
    pub dry_run: bool,
}

impl ExportRequest {
    pub fn new(descriptor: impl Into<PathBuf>, image_folder: impl Into<PathBuf>, process: ProcessInfo) -> Self {
        Self {
            descriptor: descriptor.into(),
            image_folder: image_folder.into(),
            media_folder: None,
            process,
            destination: None,
            dry_run: false,
        }
    }

    fn media_folder(&self) -> &Path {
        self.media_folder.as_deref().unwrap_or(&self.image_folder)
    }
}

/// Export coordinator
pub struct ExportCoordinator {
    config: LuxConfig,
    ruleset: Arc<Ruleset>,
    descriptors: Arc<dyn DescriptorStore>,
    vocabulary: Arc<dyn VocabularyService>,
    inventory: Arc<dyn FileInventory>,
    strategies: StrategyRegistry,
}

impl ExportCoordinator {
    /// Create a coordinator from explicit collaborators
    pub fn new(
        config: LuxConfig,
        ruleset: Arc<Ruleset>,
        descriptors: Arc<dyn DescriptorStore>,
        vocabulary: Arc<dyn VocabularyService>,
        inventory: Arc<dyn FileInventory>,
    ) -> Self {
        Self {
            config,
            ruleset,
            descriptors,
            vocabulary,
            inventory,
            strategies: StrategyRegistry::default(),
        }
    }

    /// Create a coordinator backed by the files named in the configuration
    ///
    /// # Errors
    ///
    /// Fails when the ruleset or the vocabulary export cannot be loaded.
    pub fn from_config(config: LuxConfig) -> Result<Self> {
        let ruleset = Ruleset::from_file(&config.ruleset.path).map_err(|e| {
            LuxError::Configuration(format!(
                "Failed to load ruleset {}: {}",
                config.ruleset.path, e
            ))
        })?;
        let vocabulary = VocabularyStore::from_file(&config.vocabulary_service.path)?;
        tracing::debug!(vocabularies = vocabulary.len(), "Vocabulary store loaded");

        Ok(Self::new(
            config,
            Arc::new(ruleset),
            Arc::new(JsonDescriptorStore::new()),
            Arc::new(vocabulary),
            Arc::new(LocalInventory::new()),
        ))
    }

    /// Replace the derivation strategies
    pub fn with_strategies(mut self, strategies: StrategyRegistry) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn config(&self) -> &LuxConfig {
        &self.config
    }

    /// Execute the export
    ///
    /// Never fails: fatal problems set the summary status to
    /// [`ExportStatus::Failed`] and are recorded as its last error.
    pub fn run(&self, request: &ExportRequest) -> ExportSummary {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(request.process.title.as_str());

        crate::log_export_start!(&request.process.title, request.process.id);

        if let Err(e) = self.execute(request, &mut summary) {
            crate::log_error_with_context!(&e, "Export aborted");
            summary.fail(&e);
        }

        let summary = summary.with_duration(start_time.elapsed());
        if summary.status == ExportStatus::Exported {
            crate::log_export_complete!(summary.pages, summary.duration);
        }
        summary.log_summary();
        summary
    }

    fn execute(&self, request: &ExportRequest, summary: &mut ExportSummary) -> Result<()> {
        let export = &self.config.export;
        let dry_run = request.dry_run || self.config.application.dry_run;

        let mut doc = self
            .descriptors
            .read(&request.descriptor, Arc::clone(&self.ruleset))?;
        // Write-back carries the pagination change only, never pruning or enrichment
        let mut source = export.cleanup_pagination.then(|| doc.clone());

        if check_admission(&doc, export.export_unpublished_records)? == Admission::NotApplicable {
            summary.status = ExportStatus::NotApplicable;
            return Ok(());
        }

        let pruned = prune_unpublished_groups(&mut doc)?;
        summary.groups_pruned = pruned.removed;
        summary.source_groups = pruned.sources.len();
        summary.bibliography_groups = pruned.bibliography.len();

        if export.add_event_location_from_agent {
            let report = add_location_from_related_agent(
                &mut doc,
                self.descriptors.as_ref(),
                Path::new(&export.metadata_folder),
            );
            summary.locations_added = report.imported;
            summary.extend_errors(report.problems);
        }

        if export.cleanup_pagination {
            let report = rebuild_pagination(&mut doc, self.inventory.as_ref(), request.media_folder())?;
            if report.rebuilt {
                summary.pages_rebuilt = Some(report.created);
            }
            summary.extend_errors(report.problems);
            if report.write_back {
                if dry_run {
                    tracing::info!("Dry run: rebuilt pagination not written back");
                } else if let Some(source) = source.as_mut() {
                    rebuild_pagination(source, self.inventory.as_ref(), request.media_folder())?;
                    self.descriptors.write(&request.descriptor, source)?;
                    summary.written_back = true;
                }
            }
        }

        let folder_names = self.inventory.list_names(&request.image_folder)?;
        let reconciled = reconcile_pages(&mut doc, &folder_names);
        summary.pages_removed = reconciled.removed;
        summary.pages = reconciled.retained;

        summary.representative_marked = select_representative(&mut doc);

        let groups = GroupVocabularyEnricher::new(self.vocabulary.as_ref(), &self.config.vocabulary)
            .enrich(&mut doc);
        summary.group_fields_filled = groups.filled;
        summary.extend_errors(groups.problems);

        let enrichment =
            MetadataEnricher::new(self.vocabulary.as_ref(), &self.strategies, export.base_url())
                .enrich(&mut doc);
        summary.metadata_resolved = enrichment.resolved;
        summary.metadata_derived = enrichment.derived;
        summary.extend_errors(enrichment.problems);

        let generation = apply_generation_rules(&mut doc, &self.config.metadata, &request.process);
        summary.metadata_generated = generation.generated;
        summary.extend_errors(generation.problems);

        let plan = plan_file_groups(
            &mut doc,
            &self.config.file_groups,
            &request.process,
            self.inventory.as_ref(),
            request.media_folder(),
        )?;
        summary.plan = Some(plan);

        let destination = request
            .destination
            .clone()
            .unwrap_or_else(|| PathBuf::from(&export.destination));
        let output = destination.join(format!("{}.json", request.process.title));
        if dry_run {
            tracing::info!(path = %output.display(), "Dry run: descriptor not written");
        } else {
            self.descriptors.write(&output, &doc)?;
            tracing::info!(path = %output.display(), "Descriptor written");
            summary.output_path = Some(output);
        }
        Ok(())
    }
}
