//! Implementation of `sift check`.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_index::{
    KeyScheme, MANIFEST_FILENAME, SearchTable, SectionManifest, TableWarning,
    discover_index_files, index_filename, key_initial, load_manifest, load_table, validate_table,
};

use crate::cli::{
    args::CheckCommand,
    context::CommandContext,
    output::{dim, success, warning},
};

/// Exit codes for `sift check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Every file is valid.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Files parse but have warnings.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;

    /// A file could not be read or parsed.
    pub fn error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Tally of a check run.
#[derive(Default)]
struct Summary {
    /// Files checked.
    files: usize,
    /// Warnings reported.
    warnings: usize,
    /// Files that failed to load.
    errors: usize,
}

/// A manifest claim that does not match the files on disk.
fn manifest_warnings(dir: &Path, manifest: &SectionManifest) -> Vec<String> {
    let mut found = Vec::new();
    for section in &manifest.sections {
        for (number, initial) in (0u32..).zip(section.initials.chars()) {
            let path = dir.join(index_filename(&section.name, number));
            if !path.is_file() {
                found.push(format!(
                    "section '{}' lists '{initial}' but {} is missing",
                    section.name,
                    path.display()
                ));
            }
        }
    }
    found
}

/// Returns the key initials in a file that the manifest files under another number.
fn misfiled_initials(
    table: &SearchTable,
    manifest: &SectionManifest,
    section: &str,
    number: u32,
) -> Vec<char> {
    let Some(listed) = manifest.section(section) else {
        return Vec::new();
    };

    let mut misfiled = Vec::new();
    for initial in table.entries.iter().filter_map(|e| key_initial(&e.key)) {
        if listed.file_number(initial) != Some(number) && !misfiled.contains(&initial) {
            misfiled.push(initial);
        }
    }
    misfiled
}

impl Summary {
    /// Reports one file's warnings.
    fn report(&mut self, path: &Path, warnings: &[TableWarning]) {
        self.files += 1;
        if warnings.is_empty() {
            println!("{} {}", success("ok"), path.display());
            return;
        }

        println!("{} {}", warning("warn"), path.display());
        for w in warnings {
            println!("  - {w}");
        }
        self.warnings += warnings.len();
    }

    /// Reports a free-form warning about `path`.
    fn report_note(&mut self, path: &Path, note: &str) {
        println!("{} {}: {note}", warning("warn"), path.display());
        self.warnings += 1;
    }

    /// Reports a file that failed to load.
    fn report_error(&mut self, message: &str) {
        self.files += 1;
        self.errors += 1;
        eprintln!("error: {message}");
    }

    /// Checks one index file, returning the table when it loads.
    fn check_file(&mut self, path: &Path, scheme: KeyScheme) -> Option<SearchTable> {
        match load_table(path) {
            Ok(table) => {
                self.report(path, &validate_table(&table, scheme));
                Some(table)
            }
            Err(e) => {
                self.report_error(&e.to_string());
                None
            }
        }
    }

    /// Checks every index file in a search directory, plus its manifest.
    fn check_dir(&mut self, dir: &Path, scheme: KeyScheme) {
        let files = match discover_index_files(dir) {
            Ok(files) => files,
            Err(e) => {
                self.report_error(&e.to_string());
                return;
            }
        };
        if files.is_empty() {
            self.report_note(dir, "no index files found");
        }

        let manifest_path = dir.join(MANIFEST_FILENAME);
        let manifest = if manifest_path.is_file() {
            match load_manifest(&manifest_path) {
                Ok(manifest) => {
                    for note in manifest_warnings(dir, &manifest) {
                        self.report_note(&manifest_path, &note);
                    }
                    Some(manifest)
                }
                Err(e) => {
                    self.report_error(&e.to_string());
                    None
                }
            }
        } else {
            None
        };

        for file in &files {
            let table = self.check_file(&file.path, scheme);
            let (Some(table), Some(manifest)) = (&table, &manifest) else {
                continue;
            };
            for initial in misfiled_initials(table, manifest, &file.section, file.number) {
                self.report_note(
                    &file.path,
                    &format!("keys starting with '{initial}' belong in another file of this section"),
                );
            }
        }
    }
}

/// Resolves the paths to check, defaulting to the configured index directory.
fn target_paths(ctx: &CommandContext, cmd: &CheckCommand) -> Result<Vec<PathBuf>, ExitCode> {
    if cmd.paths.is_empty() {
        return ctx
            .index_dir(None)
            .map(|dir| vec![dir])
            .map_err(|_| exit_codes::error());
    }
    Ok(cmd.paths.iter().map(|p| ctx.resolve(p)).collect())
}

/// Validates index files and search directories.
pub fn run(ctx: &CommandContext, cmd: &CheckCommand) -> ExitCode {
    let scheme = ctx.key_scheme(cmd.scheme.key_scheme);
    let paths = match target_paths(ctx, cmd) {
        Ok(paths) => paths,
        Err(code) => return code,
    };

    let mut summary = Summary::default();
    for path in &paths {
        if path.is_dir() {
            summary.check_dir(path, scheme);
        } else {
            summary.check_file(path, scheme);
        }
    }

    println!();
    println!(
        "{}",
        dim(&format!(
            "{} files checked, {} warnings, {} errors (key scheme: {scheme})",
            summary.files, summary.warnings, summary.errors
        ))
    );

    if summary.errors > 0 {
        exit_codes::error()
    } else if summary.warnings > 0 {
        exit_codes::WARNINGS
    } else {
        exit_codes::OK
    }
}
