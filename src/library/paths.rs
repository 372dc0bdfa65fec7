//! Keeping intra-library references valid after a merge or creation
//!
//! Two rewrites, both idempotent:
//! - symbols link to footprints as `<Library>:<Footprint>`; fetched parts
//!   carry a placeholder namespace that is replaced by the library name
//! - footprints point at their 3D models; the path is retargeted at the
//!   library's model folder, either portably through an environment variable
//!   or by renaming the fetched `3dshapes` folder segment

use std::fs;
use std::ops::Range;

use tracing::{debug, info};

use crate::common::fs::{has_extension, list_files};
use crate::config::{ModelPathStyle, Settings};
use crate::error::{self, Result};
use crate::sexpr;
use crate::symbol::map_property;
use crate::transaction::Transaction;

use super::{FOOTPRINT_EXT, Library};

/// Symbol property that links a symbol to its footprint
pub const FOOTPRINT_PROPERTY: &str = "Footprint";

/// Model folder name written by the part fetcher
pub const FETCHED_MODEL_FOLDER: &str = "3dshapes";

const MODEL_MARKER: &str = "(model ";

/// Counts of references changed by [`rewrite_library`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub namespaces: usize,
    pub models: usize,
}

/// Footprint link with its placeholder namespace replaced by `library`.
///
/// `.:Name`, `:Name` and `.Name` qualify as placeholders; anything else is
/// already namespaced (or not a link) and yields `None`.
pub fn qualify_footprint(value: &str, library: &str) -> Option<String> {
    let item = value
        .strip_prefix(".:")
        .or_else(|| value.strip_prefix(':'))
        .or_else(|| value.strip_prefix('.').filter(|rest| !rest.contains(':')))?;
    if item.is_empty() {
        return None;
    }
    Some(format!("{library}:{item}"))
}

/// Prefix every placeholder footprint link in a symbol file with `library`
pub fn prefix_namespace(text: &str, library: &str) -> (String, usize) {
    map_property(text, FOOTPRINT_PROPERTY, |value| qualify_footprint(value, library))
}

/// Path token of a `(model ...)` line: its byte range, unquoted value and quoting
fn model_path(line: &str) -> Option<(Range<usize>, String, bool)> {
    let marker = line.find(MODEL_MARKER)?;
    if !line[..marker].trim().is_empty() {
        return None;
    }
    let after = marker + MODEL_MARKER.len();
    let rest = &line[after..];
    let start = after + (rest.len() - rest.trim_start().len());

    if line[start..].starts_with('"') {
        let (value, end) = sexpr::read_quoted(&line[start..])?;
        return Some((start..start + end, value, true));
    }

    let len = line[start..]
        .find(|c: char| c.is_whitespace() || c == ')')
        .unwrap_or(line.len() - start);
    if len == 0 {
        return None;
    }
    Some((start..start + len, line[start..start + len].to_string(), false))
}

fn retarget(path: &str, library: &Library, settings: &Settings) -> Option<String> {
    let folder = library.model_dir_name();
    match settings.model_paths {
        ModelPathStyle::Portable => {
            let file_name = path.rsplit(['/', '\\']).next().filter(|f| !f.is_empty())?;
            Some(format!(
                "{}/{}/{folder}/{file_name}",
                settings.portability_token(),
                library.name
            ))
        }
        ModelPathStyle::Relative => {
            let mut changed = false;
            let mut out = String::with_capacity(path.len());
            for (idx, segment) in path.split('/').enumerate() {
                if idx > 0 {
                    out.push('/');
                }
                if segment == FETCHED_MODEL_FOLDER {
                    out.push_str(&folder);
                    changed = true;
                } else {
                    out.push_str(segment);
                }
            }
            changed.then_some(out)
        }
    }
}

/// Point every model reference in a footprint at `library`'s model folder.
///
/// Lines that already contain the portability token are never modified.
pub fn retarget_model_paths(text: &str, library: &Library, settings: &Settings) -> (String, usize) {
    let token = settings.portability_token();
    let mut changed = 0;
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let rewritten = if line.contains(&token) {
            None
        } else {
            model_path(line).and_then(|(range, path, quoted)| {
                let target = retarget(&path, library, settings)?;
                let target = if quoted || target.contains(char::is_whitespace) {
                    sexpr::quote(&target)
                } else {
                    target
                };
                let mut line = line.to_string();
                line.replace_range(range, &target);
                Some(line)
            })
        };

        match rewritten {
            Some(line) => {
                changed += 1;
                out.push_str(&line);
            }
            None => out.push_str(line),
        }
    }

    (out, changed)
}

/// Apply both rewrites to a library on disk, staging writes in `transaction`
pub fn rewrite_library(
    library: &Library,
    settings: &Settings,
    transaction: &mut Transaction,
) -> Result<RewriteReport> {
    let mut report = RewriteReport::default();

    let aggregate = library.symbol_file();
    let text = fs::read_to_string(&aggregate).map_err(|e| error::fs::read_error(&aggregate, &e))?;
    let (text, namespaces) = prefix_namespace(&text, &library.name);
    if namespaces > 0 {
        transaction.write_file(&aggregate, text)?;
        report.namespaces = namespaces;
    }

    let footprints = library.footprint_dir();
    if library.model_dir().is_dir() && footprints.is_dir() {
        let files = list_files(&footprints).map_err(|e| error::fs::read_error(&footprints, &e))?;
        for path in files.iter().filter(|p| has_extension(p, FOOTPRINT_EXT)) {
            let text = fs::read_to_string(path).map_err(|e| error::fs::read_error(path, &e))?;
            let (text, models) = retarget_model_paths(&text, library, settings);
            if models > 0 {
                debug!(footprint = %path.display(), models, "Retargeted model paths");
                transaction.write_file(path, text)?;
                report.models += models;
            }
        }
    }

    info!(
        library = %library.name,
        namespaces = report.namespaces,
        models = report.models,
        "Rewrote library references"
    );
    Ok(report)
}
