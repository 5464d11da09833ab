//! Change-set resolution: porcelain status parsing, ignore filtering, size
//! checking, and the deletion confirmation step.
//!
//! Everything downstream of this module works with structured
//! [`ChangedFile`] records; raw `git status` text never leaks past
//! [`parse_status`].

use crate::{
   cancel::CancelToken,
   config::CommitConfig,
   error::{CommitError, Result},
   git::GitClient,
   ignore::is_ignored,
   prompt::Prompter,
   sizecheck::check_sizes,
   style,
};

/// File state derived from the porcelain two-character status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
   Modified,
   Added,
   Deleted,
   Renamed,
   Copied,
   Untracked,
   Unmerged,
   TypeChanged,
}

/// One entry of `git status --porcelain` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangedFile {
   pub status: FileStatus,
   /// Repo-root relative path. For renames and copies this is the
   /// destination path.
   pub path:   String,
}

impl ChangedFile {
   pub const fn is_deletion(&self) -> bool {
      matches!(self.status, FileStatus::Deleted)
   }
}

/// The validated, filtered collection of files for one run.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
   pub files: Vec<ChangedFile>,

   /// True when reported deletions were confirmed out by the operator.
   /// The executor must then stage paths selectively so the deletions do
   /// not reappear through `git add -A`.
   pub deletions_dropped: bool,
}

impl ChangeSet {
   pub fn is_empty(&self) -> bool {
      self.files.is_empty()
   }

   pub fn paths(&self) -> Vec<String> {
      self.files.iter().map(|f| f.path.clone()).collect()
   }
}

/// Parse one porcelain status line.
///
/// Grammar: a two-character status code, a whitespace run, then the path as
/// the entire remainder (paths may contain spaces). Lines that yield an
/// empty path are rejected. Rename/copy lines (`old -> new`) carry only the
/// destination.
pub fn parse_status_line(line: &str) -> Option<ChangedFile> {
   let code = line.get(..2)?;
   let path = line.get(2..)?.trim_start();
   if path.is_empty() {
      return None;
   }

   let status = status_from_code(code)?;

   // Renames and copies report "old -> new"; the destination is the path
   // that exists on disk.
   let path = if matches!(status, FileStatus::Renamed | FileStatus::Copied) {
      path.rsplit_once(" -> ").map_or(path, |(_, dest)| dest)
   } else {
      path
   };

   // Porcelain C-quotes paths containing unusual characters; the quoted
   // form carries backslash escapes that must be expanded to get the path
   // that exists on disk.
   let path = match path.strip_prefix('"').and_then(|p| p.strip_suffix('"')) {
      Some(inner) => unquote_path(inner),
      None => path.to_string(),
   };

   if path.is_empty() {
      return None;
   }

   Some(ChangedFile { status, path })
}

/// Expand the backslash escapes of a C-quoted path. Octal sequences encode
/// raw bytes, so the expansion works on bytes and re-validates UTF-8 at the
/// end.
fn unquote_path(inner: &str) -> String {
   let mut bytes = Vec::with_capacity(inner.len());
   let mut iter = inner.bytes().peekable();

   while let Some(b) = iter.next() {
      if b != b'\\' {
         bytes.push(b);
         continue;
      }
      match iter.next() {
         Some(b'n') => bytes.push(b'\n'),
         Some(b't') => bytes.push(b'\t'),
         Some(digit @ b'0'..=b'7') => {
            let mut value = digit - b'0';
            for _ in 0..2 {
               let Some(&(next @ b'0'..=b'7')) = iter.peek() else {
                  break;
               };
               value = value.wrapping_mul(8).wrapping_add(next - b'0');
               iter.next();
            }
            bytes.push(value);
         }
         Some(other) => bytes.push(other),
         None => {}
      }
   }

   String::from_utf8_lossy(&bytes).into_owned()
}

/// Map a porcelain XY code to a [`FileStatus`], preferring the index column
/// and falling back to the worktree column.
fn status_from_code(code: &str) -> Option<FileStatus> {
   if code == "??" {
      return Some(FileStatus::Untracked);
   }

   let mut chars = code.chars();
   let index = chars.next()?;
   let worktree = chars.next().unwrap_or(' ');

   let classify = |c: char| match c {
      'M' => Some(FileStatus::Modified),
      'A' => Some(FileStatus::Added),
      'D' => Some(FileStatus::Deleted),
      'R' => Some(FileStatus::Renamed),
      'C' => Some(FileStatus::Copied),
      'U' => Some(FileStatus::Unmerged),
      'T' => Some(FileStatus::TypeChanged),
      _ => None,
   };

   classify(index).or_else(|| classify(worktree))
}

/// Parse full porcelain output into structured records, skipping anything
/// that does not fit the grammar.
pub fn parse_status(raw: &str) -> Vec<ChangedFile> {
   raw.lines().filter_map(parse_status_line).collect()
}

/// Resolve the change set for this run.
///
/// Invokes the status query, parses and filters the output, enforces the
/// size ceiling before any mutation can happen, and asks once whether to
/// include reported deletions. An empty result is the terminal
/// "nothing to do" outcome, not an error.
pub fn resolve(
   git: &dyn GitClient,
   prompter: &mut dyn Prompter,
   cancel: &CancelToken,
   config: &CommitConfig,
) -> Result<ChangeSet> {
   println!("{}", style::info("Checking git status..."));

   let raw = git.status_porcelain()?;
   if raw.trim().is_empty() {
      return Ok(ChangeSet::default());
   }

   let files: Vec<ChangedFile> = parse_status(&raw)
      .into_iter()
      .filter(|f| !is_ignored(&f.path))
      .collect();

   if files.is_empty() {
      println!("{}", style::warning("No relevant changes detected. Ignored standard files."));
      return Ok(ChangeSet::default());
   }

   // Size ceiling is enforced before any staging, prompting, or generation.
   let root = git.top_level()?;
   let candidates: Vec<&str> = files
      .iter()
      .filter(|f| !f.is_deletion())
      .map(|f| f.path.as_str())
      .collect();
   let oversized = check_sizes(&root, &candidates, config.max_file_size_mb);
   if !oversized.is_empty() {
      return Err(CommitError::OversizedFiles(oversized));
   }

   let (deletions, kept): (Vec<ChangedFile>, Vec<ChangedFile>) =
      files.into_iter().partition(|f| f.is_deletion());

   let mut changeset = ChangeSet { files: kept, deletions_dropped: false };

   if !deletions.is_empty() {
      let listing = deletions
         .iter()
         .map(|f| format!("  - {}", f.path))
         .collect::<Vec<_>>()
         .join("\n");
      println!("{}", style::warning("Deleted files:"));
      println!("{listing}");

      cancel.checkpoint()?;
      let include = prompter.confirm("Include these deletions in the commit?", true)?;
      cancel.checkpoint()?;

      if include {
         changeset.files.extend(deletions);
      } else {
         changeset.deletions_dropped = true;
      }
   }

   if !changeset.is_empty() {
      let listing = changeset
         .files
         .iter()
         .map(|f| format!("- {}", f.path))
         .collect::<Vec<_>>()
         .join("\n");
      println!("{}", style::boxed_message("Changed Files", &listing, style::term_width()));
   }

   Ok(changeset)
}
