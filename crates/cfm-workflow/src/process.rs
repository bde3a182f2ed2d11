//! The XML processing workflow step
//!
//! Resolves a work item to an asset, reads its first XML rendition, maps
//! the parsed document onto the configured template and commits a new
//! content fragment in the asset's folder.

use crate::asset::AssetStore;
use crate::config::ProcessingConfig;
use crate::fragment::FragmentStore;
use crate::payload::{PayloadType, WorkItem};
use crate::Result;
use cfm_adapter_xml::XmlParser;
use cfm_mapping::{humanize, FieldMapper, RejectedField};
use cfm_template::{FragmentTemplate, TemplateLoader};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Workflow step creating content fragments from XML renditions
pub struct XmlProcessingStep<A, F> {
    config: ProcessingConfig,
    template: Arc<FragmentTemplate>,
    assets: A,
    fragments: F,
}

/// Result of running the step on one work item
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProcessOutcome {
    Completed(ProcessReport),
    Skipped { reason: SkipReason },
}

/// Why a work item was left alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    UnsupportedPayload(PayloadType),
    AssetNotFound(String),
    NoXmlRendition(String),
}

/// Summary of a created fragment
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub work_item: String,
    pub asset: String,
    pub rendition: String,
    pub fragment_path: String,
    pub fragment_title: String,
    pub mapped: Vec<String>,
    pub skipped: Vec<String>,
    pub rejected: Vec<RejectedField>,
}

impl<A: AssetStore, F: FragmentStore> XmlProcessingStep<A, F> {
    /// Validate `config` and resolve its template through `loader`
    ///
    /// # Errors
    ///
    /// Returns a configuration error, or a template error when the
    /// configured template cannot be loaded.
    pub fn activate(config: ProcessingConfig, loader: &TemplateLoader, assets: A, fragments: F) -> Result<Self> {
        config.validate()?;
        let template = loader.load(&config.content_fragment_template)?;
        info!(
            "Got content fragment template '{}' from {}",
            template.title, config.content_fragment_template
        );
        Ok(Self::new(config, template, assets, fragments))
    }

    /// Build a step from an already resolved template
    pub fn new(config: ProcessingConfig, template: Arc<FragmentTemplate>, assets: A, fragments: F) -> Self {
        Self {
            config,
            template,
            assets,
            fragments,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    #[must_use]
    pub fn template(&self) -> &FragmentTemplate {
        &self.template
    }

    #[must_use]
    pub fn fragments(&self) -> &F {
        &self.fragments
    }

    /// Run the step on a work item
    ///
    /// Items the step does not apply to are reported as skipped; failures
    /// after a rendition was selected are errors and nothing is committed.
    ///
    /// # Errors
    ///
    /// Returns store, parse, mapping (strict coercion) or commit errors.
    pub fn execute(&self, item: &WorkItem) -> Result<ProcessOutcome> {
        info!("Running XML processing on {}", item.payload);

        let Some(payload_path) = item.path() else {
            warn!("Unsupported payload type {} for {}", item.payload_type, item.id);
            return Ok(skipped(SkipReason::UnsupportedPayload(item.payload_type.clone())));
        };

        let Some(asset) = self.assets.resolve(payload_path)? else {
            warn!("No asset found for payload {}", payload_path);
            return Ok(skipped(SkipReason::AssetNotFound(payload_path.to_string())));
        };

        let Some(rendition) = asset.find_rendition(&self.config.xml_mime_types) else {
            warn!("No XML rendition on asset {}", asset.path);
            return Ok(skipped(SkipReason::NoXmlRendition(asset.path.clone())));
        };
        info!("Using rendition {} ({})", rendition.name, rendition.mime_type);

        let content = self.assets.read_rendition(rendition)?;
        let document = XmlParser::new(&rendition.path).parse_bytes(&content)?;

        let report = FieldMapper::with_policy(self.config.coercion_policy)
            .map_with_report(&document, &self.template.fields)?;

        let name = self
            .config
            .fragment_name
            .clone()
            .unwrap_or_else(|| asset.base_name().to_string());
        let title = humanize(&name)?;

        let mut fragment = self.fragments.create(
            asset.parent_path(),
            &name,
            &title,
            &self.template.reference,
        )?;
        fragment.apply(&report.mapping);
        self.fragments.commit(&fragment)?;

        info!(
            "Created fragment {} with {} of {} fields",
            fragment.path,
            report.mapping.len(),
            self.template.fields.len()
        );

        Ok(ProcessOutcome::Completed(ProcessReport {
            work_item: item.id.clone(),
            asset: asset.path.clone(),
            rendition: rendition.name.clone(),
            fragment_path: fragment.path,
            fragment_title: fragment.title,
            mapped: report.mapping.fields().map(str::to_string).collect(),
            skipped: report.skipped,
            rejected: report.rejected,
        }))
    }
}

fn skipped(reason: SkipReason) -> ProcessOutcome {
    ProcessOutcome::Skipped { reason }
}

impl ProcessOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, ProcessOutcome::Completed(_))
    }

    #[must_use]
    pub fn report(&self) -> Option<&ProcessReport> {
        match self {
            ProcessOutcome::Completed(report) => Some(report),
            ProcessOutcome::Skipped { .. } => None,
        }
    }
}
