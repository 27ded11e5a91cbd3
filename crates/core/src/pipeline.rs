use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::{
    AggregateWriter, DirectiveExtractor, GuextConfig, GuextError, ProjectScanner, Result,
    RootReport, RunReport, Workspace, WorkspaceIsolator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Init,
    Scanning,
    Isolating,
    ProcessingRoots,
    Done,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Init => "init",
            PipelineStage::Scanning => "scanning",
            PipelineStage::Isolating => "isolating",
            PipelineStage::ProcessingRoots => "processing roots",
            PipelineStage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing under the target holds a project descriptor; nothing was touched.
    NoProjectRoots { target: PathBuf },
    Completed(RunReport),
}

/// Scan, optionally isolate, then extract and aggregate root by root.
///
/// Any failure ends the run. Files already rewritten stay rewritten; with
/// isolation disabled that means the real tree can be left half-processed.
pub struct Pipeline {
    config: GuextConfig,
    isolate: bool,
}

impl Pipeline {
    pub fn new(config: GuextConfig) -> Self {
        Self {
            config,
            isolate: true,
        }
    }

    pub fn with_isolation(mut self, isolate: bool) -> Self {
        self.isolate = isolate;
        self
    }

    pub fn config(&self) -> &GuextConfig {
        &self.config
    }

    pub fn run(&self, target: impl AsRef<Path>) -> Result<RunOutcome> {
        self.run_with(target, |_| {})
    }

    /// Like [`Pipeline::run`], calling `on_root` before each root is processed.
    pub fn run_with(
        &self,
        target: impl AsRef<Path>,
        mut on_root: impl FnMut(&Path),
    ) -> Result<RunOutcome> {
        let started = Instant::now();

        enter(PipelineStage::Init);
        let target = validate_target(target.as_ref())?;

        enter(PipelineStage::Scanning);
        let scanner = ProjectScanner::new(&self.config);
        let mut roots = scanner.project_roots(&target)?;
        if roots.is_empty() {
            return Ok(RunOutcome::NoProjectRoots { target });
        }

        let workspace = if self.isolate {
            enter(PipelineStage::Isolating);
            let workspace =
                WorkspaceIsolator::new(self.config.staging_dir_name()).isolate(&target)?;

            enter(PipelineStage::Scanning);
            roots = scanner.project_roots(&workspace.path)?;
            workspace
        } else {
            log::warn!(
                "Isolation disabled; rewriting {} in place",
                target.display()
            );
            Workspace::in_place(target)
        };

        enter(PipelineStage::ProcessingRoots);
        let extractor = DirectiveExtractor::new(self.config.directive_prefix());
        let aggregate = AggregateWriter::from_config(&self.config);
        let mut report = RunReport::new(workspace);

        for root in &roots {
            on_root(root);
            let root_report = self.process_root(&scanner, &extractor, &aggregate, root)?;
            log::info!(
                "{}: {} file(s), {} directive(s), {} aggregate line(s)",
                root.display(),
                root_report.files,
                root_report.directives,
                root_report.aggregate.lines
            );
            report.add_root(root_report);
        }

        enter(PipelineStage::Done);
        report.time_ms = started.elapsed().as_millis() as u64;
        Ok(RunOutcome::Completed(report))
    }

    fn process_root(
        &self,
        scanner: &ProjectScanner<'_>,
        extractor: &DirectiveExtractor,
        aggregate: &AggregateWriter,
        root: &Path,
    ) -> Result<RootReport> {
        let files = scanner.source_files(root)?;
        let mut directives = Vec::new();
        for file in &files {
            directives.extend(extractor.extract_file(file)?);
        }

        let aggregate = aggregate.write(root, &directives)?;
        Ok(RootReport {
            root: root.to_path_buf(),
            files: files.len(),
            directives: directives.len(),
            aggregate,
        })
    }
}

fn enter(stage: PipelineStage) {
    log::debug!("stage: {stage}");
}

fn validate_target(target: &Path) -> Result<PathBuf> {
    if target.as_os_str().is_empty() {
        return Err(GuextError::InvalidPath(
            "no target directory specified".to_string(),
        ));
    }
    if !target.is_dir() {
        return Err(GuextError::InvalidPath(format!(
            "{} is not a directory",
            target.display()
        )));
    }
    target
        .canonicalize()
        .map_err(|err| GuextError::io("resolve", target, err))
}
