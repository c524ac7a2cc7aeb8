use crate::cli::{self, Command, ExperimentArgs, FolderArgs, RenameArgs, SplitArgs};
use crate::config::WorkflowConfig;
use crate::journal::Journal;
use crate::prompt::{self, DirectoryProvider, FixedDirectory, FolderPicker};
use crate::sequencer::{NamingScheme, Sequencer, split_interleaved};
use crate::{file_scanner, progress, utils};
use anyhow::{Context, Result, anyhow};
use std::path::{Path, PathBuf};

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub moved: usize,
    pub renamed: usize,
    pub copied: usize,
}

impl RunSummary {
    fn add(&mut self, other: RunSummary) {
        self.moved += other.moved;
        self.renamed += other.renamed;
        self.copied += other.copied;
    }
}

// Picks the directory from --dir, or from the folder dialog when it is absent.
fn resolve_directory(folder: &FolderArgs, title: &str) -> Result<PathBuf> {
    let provider: Box<dyn DirectoryProvider> = match &folder.dir {
        Some(dir) => Box::new(FixedDirectory(dir.clone())),
        None => Box::new(FolderPicker {
            title: title.to_string(),
        }),
    };
    let dir = prompt::choose_directory(provider.as_ref())?;
    tracing::info!(dir = %dir.display(), "working directory chosen");
    Ok(dir)
}

fn tag_for(dir: &Path, explicit: Option<&str>) -> Result<String> {
    match explicit {
        Some(tag) => Ok(tag.to_string()),
        None => utils::parent_tag(dir).ok_or_else(|| {
            anyhow!(
                "{} has no parent folder to take the tag from; pass --tag",
                dir.display()
            )
        }),
    }
}

/// Renames the matching files of `dir` in place.
pub fn rename_folder(
    seq: &mut Sequencer,
    dir: &Path,
    extension: &str,
    label: &str,
    tag: &str,
    scheme: &NamingScheme,
) -> Result<RunSummary> {
    let list = seq.scan(dir, extension)?;
    if list.is_empty() {
        tracing::info!(dir = %dir.display(), extension, "no matching files to rename");
    } else {
        tracing::debug!(files = ?list.names().collect::<Vec<_>>(), "renaming");
    }
    let renamed = seq
        .rename(&list, label, tag, scheme)
        .with_context(|| format!("renaming files in {}", dir.display()))?;
    Ok(RunSummary {
        renamed,
        ..RunSummary::default()
    })
}

/// Splits the matching files of `dir` into `dir/<even_dir>` and
/// `dir/<odd_dir>`, then renames each subfolder with `(label, tag)`.
pub fn split_folder(
    seq: &mut Sequencer,
    dir: &Path,
    extension: &str,
    (even_dir, odd_dir): (&str, &str),
    (even_label, odd_label): (&str, &str),
    tag: &str,
    scheme: &NamingScheme,
) -> Result<RunSummary> {
    // Scan first: a missing folder must fail before any subfolder is created.
    let split = split_interleaved(&seq.scan(dir, extension)?);
    let even_path = dir.join(even_dir);
    let odd_path = dir.join(odd_dir);
    seq.ensure_dir(&even_path)?;
    seq.ensure_dir(&odd_path)?;

    let mut summary = RunSummary::default();
    summary.moved += seq
        .relocate(&split.even, &even_path)
        .with_context(|| format!("moving files into {}", even_path.display()))?;
    summary.moved += seq
        .relocate(&split.odd, &odd_path)
        .with_context(|| format!("moving files into {}", odd_path.display()))?;

    // Rescan: the subfolders may already have held files before the move.
    summary.add(rename_folder(seq, &even_path, extension, even_label, tag, scheme)?);
    summary.add(rename_folder(seq, &odd_path, extension, odd_label, tag, scheme)?);
    Ok(summary)
}

/// Walks `<root>/<camera>/<role>` for every configured pair, splits the
/// experiment role into single/double light source shots, renames
/// everything and collects the DaVis inputs.
pub fn process_experiment(
    seq: &mut Sequencer,
    root: &Path,
    config: &WorkflowConfig,
) -> Result<RunSummary> {
    let scheme = NamingScheme::new(&config.separator, config.pad_width, &config.extension);
    let davis_experiment = root.join(&config.davis_experiment_dir);
    let davis_calibration = root.join(&config.davis_calibration_dir);
    file_scanner::check_directory(root)?;
    seq.ensure_dir(&davis_experiment)?;
    seq.ensure_dir(&davis_calibration)?;

    let mut summary = RunSummary::default();

    // Step 1: split and rename every camera/role folder.
    for camera in &config.cameras {
        for role in &config.roles {
            let role_path = root.join(camera).join(role);
            tracing::info!(camera = %camera, role = %role, "processing folder");

            if *role == config.split_role {
                summary.add(split_folder(
                    seq,
                    &role_path,
                    &config.extension,
                    (config.single_dir.as_str(), config.double_dir.as_str()),
                    (config.single_dir.as_str(), config.double_dir.as_str()),
                    camera,
                    &scheme,
                )?);
            }

            summary.add(rename_folder(
                seq,
                &role_path,
                &config.extension,
                role,
                camera,
                &scheme,
            )?);
        }
    }

    // Step 2: collect double light source shots and calibration images.
    for camera in &config.davis_cameras {
        let camera_path = root.join(camera);
        let sources = [
            (
                camera_path.join(&config.split_role).join(&config.double_dir),
                &davis_experiment,
            ),
            (camera_path.join(&config.calibration_role), &davis_calibration),
        ];
        for (src, dest) in sources {
            let list = seq.scan(&src, &config.extension)?;
            summary.copied += seq
                .copy_into(&list, dest)
                .with_context(|| format!("copying {} into {}", src.display(), dest.display()))?;
        }
    }

    Ok(summary)
}

fn run_rename(seq: &mut Sequencer, args: RenameArgs, config: &WorkflowConfig) -> Result<RunSummary> {
    let dir = resolve_directory(&args.folder, "Select folder to rename")?;
    let tag = tag_for(&dir, args.tag.as_deref())?;
    let label = match args.label {
        Some(label) => label,
        None => prompt::read_label(
            "type in file names:",
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
        )?,
    };
    let output_ext = args.output_ext.as_deref().unwrap_or(&args.folder.ext);
    let scheme = NamingScheme::new(&config.separator, config.pad_width, output_ext);
    rename_folder(seq, &dir, &args.folder.ext, &label, &tag, &scheme)
}

fn run_split(seq: &mut Sequencer, args: SplitArgs, config: &WorkflowConfig) -> Result<RunSummary> {
    let dir = resolve_directory(&args.folder, "Select folder with top view / DEM shots")?;
    let tag = tag_for(&dir, args.tag.as_deref())?;
    let scheme = NamingScheme::new(&config.separator, config.pad_width, &args.output_ext);
    let label = args.label.as_deref().unwrap_or(&config.split_label);
    split_folder(
        seq,
        &dir,
        &args.folder.ext,
        (config.topview_dir.as_str(), config.dem_dir.as_str()),
        (label, label),
        &tag,
        &scheme,
    )
}

fn run_experiment(
    seq: &mut Sequencer,
    args: ExperimentArgs,
    mut config: WorkflowConfig,
) -> Result<RunSummary> {
    let root = resolve_directory(&args.folder, "Select experiment folder")?;
    config.extension = args.folder.ext;
    if !args.cameras.is_empty() {
        config.cameras = args.cameras;
    }
    if !args.roles.is_empty() {
        config.roles = args.roles;
    }
    if !args.davis_cameras.is_empty() {
        config.davis_cameras = args.davis_cameras;
    }
    tracing::debug!(?config, "experiment configuration");
    process_experiment(seq, &root, &config)
}

// Main orchestrator: sets up progress and journal, then runs the chosen command.
pub fn run_photoseq(cli_args: cli::Cli) -> Result<()> {
    let journal = cli_args
        .journal
        .as_deref()
        .map(Journal::open)
        .transpose()?;
    let mut seq = Sequencer::new(progress::for_terminal(cli_args.quiet), journal);
    let config = WorkflowConfig::default();

    let (summary, done) = match cli_args.command {
        Command::Rename(args) => (run_rename(&mut seq, args, &config)?, "renamed files"),
        Command::Split(args) => (run_split(&mut seq, args, &config)?, "split images and renamed files"),
        Command::Experiment(args) => (
            run_experiment(&mut seq, args, config)?,
            "split images, renamed files and copied into DaVis folders",
        ),
    };

    println!(
        "✅ Successfully {} ({} moved, {} renamed, {} copied).",
        done, summary.moved, summary.renamed, summary.copied
    );
    Ok(())
}
