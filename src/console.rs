//! Line-oriented presentation surface for a [`Selector`].
//!
//! Reads one command per line, applies it to the selector, and re-renders
//! after every accepted transition. Rejected transitions print nothing so the
//! display stays as it was. Command arguments are the remainder of the line,
//! which keeps keys with spaces usable; a bare number picks the n-th visible
//! item when no key matches literally.

use crate::selector::Selector;
use crate::store::DocumentStore;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

const HELP: &str = "\
commands:
  top <key|n>   choose a top-key
  sub <key|n>   choose a sub-key under the current top-key
  get <leaf|n>  save a visible leaf into the download directory
  show          print the three lists again
  stats         print catalog counts
  help          print this message
  quit          end the session";

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Console<S> {
    selector: Selector<S>,
    download_dir: PathBuf,
}

impl<S: DocumentStore> Console<S> {
    pub fn new(selector: Selector<S>, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            selector,
            download_dir: download_dir.into(),
        }
    }

    pub fn selector(&self) -> &Selector<S> {
        &self.selector
    }

    /// Drive the session until `quit` or end of input.
    pub fn run<R: BufRead, W: Write, E: Write>(
        &mut self,
        input: R,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        self.render(out)?;
        self.render_stats(out)?;
        for line in input.lines() {
            if self.handle(line?.trim(), out, err)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn handle<W: Write, E: Write>(
        &mut self,
        line: &str,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<Flow> {
        if line.is_empty() {
            return Ok(Flow::Continue);
        }
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "top" => {
                let key = pick(arg, &self.selector.visible_top_keys());
                if self.selector.select_top(&key) {
                    self.render(out)?;
                }
            }
            "sub" => {
                let key = pick(arg, &self.selector.visible_sub_keys());
                if self.selector.select_sub(&key) {
                    self.render(out)?;
                }
            }
            "get" => {
                let leaves: Vec<&str> = self
                    .selector
                    .visible_leaves()
                    .iter()
                    .map(|entry| entry.as_str())
                    .collect();
                let leaf = pick(arg, &leaves);
                self.download(&leaf, out, err)?;
            }
            "show" => self.render(out)?,
            "stats" => self.render_stats(out)?,
            "help" => writeln!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            other => writeln!(err, "unknown command '{other}'; type 'help'")?,
        }
        Ok(Flow::Continue)
    }

    fn download<W: Write, E: Write>(
        &self,
        leaf: &str,
        out: &mut W,
        err: &mut E,
    ) -> io::Result<()> {
        let document = match self.selector.select_leaf(leaf) {
            None => return Ok(()),
            Some(Err(failure)) => {
                writeln!(err, "retrieval failed: {failure}")?;
                return Ok(());
            }
            Some(Ok(document)) => document,
        };
        let target = self.download_dir.join(&document.path().leaf);
        let source = document.path().to_string();
        match save(document.into_reader(), &self.download_dir, &target) {
            Ok(bytes) => {
                debug!(%source, target = %target.display(), bytes, "document saved");
                writeln!(out, "saved {} ({bytes} bytes)", target.display())
            }
            Err(failure) => writeln!(err, "retrieval failed: {source}: {failure}"),
        }
    }

    fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let state = self.selector.state();
        writeln!(out, "top-keys:")?;
        render_list(
            out,
            &self.selector.visible_top_keys(),
            state.selected_top(),
            "(catalog is empty)",
        )?;

        writeln!(out, "sub-keys:")?;
        let subs_hint = if state.selected_top().is_none() {
            "(choose a top-key first)"
        } else {
            "(no sub-keys)"
        };
        render_list(
            out,
            &self.selector.visible_sub_keys(),
            state.selected_sub(),
            subs_hint,
        )?;

        writeln!(out, "leaves:")?;
        let leaves: Vec<&str> = self
            .selector
            .visible_leaves()
            .iter()
            .map(|entry| entry.as_str())
            .collect();
        let leaves_hint = if state.selected_sub().is_none() {
            "(choose a sub-key first)"
        } else {
            "(no leaves)"
        };
        render_list(out, &leaves, None, leaves_hint)
    }

    fn render_stats<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let summary = self.selector.summary();
        writeln!(
            out,
            "top-keys: {}, sub-keys: {}, leaves: {}",
            summary.top_keys, summary.sub_keys, summary.leaves
        )
    }
}

fn render_list<W: Write>(
    out: &mut W,
    items: &[&str],
    selected: Option<&str>,
    empty_hint: &str,
) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "  {empty_hint}");
    }
    for (idx, item) in items.iter().enumerate() {
        let marker = if Some(*item) == selected { " <" } else { "" };
        writeln!(out, "  {}. {item}{marker}", idx + 1)?;
    }
    Ok(())
}

/// Resolve a command argument to a visible item.
fn pick(arg: &str, items: &[&str]) -> String {
    if items.contains(&arg) {
        return arg.to_string();
    }
    match arg.parse::<usize>() {
        Ok(n) if (1..=items.len()).contains(&n) => items[n - 1].to_string(),
        _ => arg.to_string(),
    }
}

/// Stream into a temp file inside `dir`, then rename over `target`. A failed
/// copy leaves `target` untouched.
fn save(mut reader: Box<dyn io::Read + Send>, dir: &Path, target: &Path) -> io::Result<u64> {
    let mut staged = NamedTempFile::new_in(dir)?;
    let bytes = io::copy(&mut reader, &mut staged)?;
    staged.as_file().sync_all()?;
    staged.persist(target).map_err(|err| err.error)?;
    Ok(bytes)
}
