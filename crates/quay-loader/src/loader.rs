//! Replays a remote repository tree into the store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;

use quay_types::error::{QuayError, Result};
use quay_vfs::{Vfs, path};

use crate::progress::LoadProgress;
use crate::remote::{RemoteKind, RemoteNode, RemoteSource};

/// Cooperative cancellation flag for an in-flight load.
///
/// Cloned tokens share the flag; cancelling any of them makes the loader
/// abandon the remaining traversal after the current file. The store keeps
/// whatever was already written.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Walks a fetched repository tree and populates the store from it.
pub struct RepoLoader {
    cancel: CancelToken,
}

impl RepoLoader {
    pub fn new() -> Self {
        Self {
            cancel: CancelToken::new(),
        }
    }

    /// A token that cancels this loader's in-flight load.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Load `repo` from `source` into `vfs`.
    ///
    /// The store is cleared first, then repopulated depth-first: a
    /// directory always exists before anything beneath it is written.
    /// Files are fetched and written one at a time; a file whose fetch or
    /// write fails is logged and skipped without stopping the load. Only a
    /// failure to fetch the tree itself (or to initialize/clear the store)
    /// aborts.
    ///
    /// Returns the fetched tree, independent of the store population side
    /// effect. `on_progress` sees the initial report, one report per
    /// written file, and a final report with `in_progress == false`.
    pub fn load(
        &self,
        source: &dyn RemoteSource,
        vfs: &mut dyn Vfs,
        repo: &str,
        on_progress: &mut dyn FnMut(&LoadProgress),
    ) -> Result<Vec<RemoteNode>> {
        let tree = source
            .fetch_tree(repo)
            .map_err(|e| QuayError::RemoteFetch(format!("{repo}: {e}")))?;

        vfs.ensure_initialized()?;
        vfs.clear()?;

        let mut progress = LoadProgress::started(count_files(&tree));
        on_progress(&progress);

        self.walk(&tree, "/", source, vfs, repo, &mut progress, on_progress)?;

        progress.in_progress = false;
        on_progress(&progress);
        Ok(tree)
    }

    #[allow(clippy::too_many_arguments)]
    fn walk(
        &self,
        nodes: &[RemoteNode],
        base: &str,
        source: &dyn RemoteSource,
        vfs: &mut dyn Vfs,
        repo: &str,
        progress: &mut LoadProgress,
        on_progress: &mut dyn FnMut(&LoadProgress),
    ) -> Result<()> {
        for node in nodes {
            if self.cancel.is_cancelled() {
                warn!("load of {repo} cancelled, store left partially populated");
                return Ok(());
            }
            let target = path::join(base, &node.name);
            match node.kind {
                RemoteKind::Dir => {
                    vfs.ensure_directory_exists(&target)?;
                    self.walk(
                        &node.children,
                        &target,
                        source,
                        vfs,
                        repo,
                        progress,
                        on_progress,
                    )?;
                },
                RemoteKind::File => {
                    let content = match source.fetch_file(repo, &node.path) {
                        Ok(content) => content,
                        Err(e) => {
                            warn!("skipping {}: fetch failed: {e}", node.path);
                            continue;
                        },
                    };
                    if let Err(e) = vfs.create_file(&target, &content) {
                        warn!("skipping {}: write failed: {e}", node.path);
                        continue;
                    }
                    progress.loaded += 1;
                    on_progress(progress);
                },
            }
        }
        Ok(())
    }
}

impl Default for RepoLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn count_files(nodes: &[RemoteNode]) -> usize {
    nodes
        .iter()
        .map(|node| match node.kind {
            RemoteKind::File => 1,
            RemoteKind::Dir => count_files(&node.children),
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::{RemoteError, StaticSource};
    use quay_vfs::MemoryVfs;
    use std::collections::{BTreeMap, BTreeSet};

    fn single_file_source() -> StaticSource {
        StaticSource::new(
            vec![RemoteNode::dir(
                "a",
                "a",
                vec![RemoteNode::file("x.txt", "a/x.txt")],
            )],
            BTreeMap::from([("a/x.txt".to_string(), "hi".to_string())]),
        )
    }

    /// A source whose listed failure paths refuse to serve content.
    struct FlakySource {
        tree: Vec<RemoteNode>,
        contents: BTreeMap<String, String>,
        fail: BTreeSet<String>,
    }

    impl RemoteSource for FlakySource {
        fn fetch_tree(&self, _repo: &str) -> std::result::Result<Vec<RemoteNode>, RemoteError> {
            Ok(self.tree.clone())
        }

        fn fetch_file(&self, _repo: &str, path: &str) -> std::result::Result<String, RemoteError> {
            if self.fail.contains(path) {
                return Err(RemoteError::Network("connection reset".into()));
            }
            self.contents
                .get(path)
                .cloned()
                .ok_or(RemoteError::NotFound)
        }
    }

    #[test]
    fn load_single_file_tree() {
        let mut vfs = MemoryVfs::new();
        let mut reports = Vec::new();
        let tree = RepoLoader::new()
            .load(&single_file_source(), &mut vfs, "demo/repo", &mut |p| {
                reports.push(*p)
            })
            .unwrap();

        assert_eq!(vfs.readdir("/").unwrap(), vec!["a"]);
        assert_eq!(vfs.read_file("/a/x.txt").unwrap(), "hi");
        assert_eq!(tree.len(), 1);
        assert_eq!(
            *reports.last().unwrap(),
            LoadProgress {
                in_progress: false,
                total: 1,
                loaded: 1
            }
        );
    }

    #[test]
    fn progress_is_monotonic_and_terminates() {
        let mut vfs = MemoryVfs::new();
        let mut reports = Vec::new();
        RepoLoader::new()
            .load(&StaticSource::sample(), &mut vfs, "demo/repo", &mut |p| {
                reports.push(*p)
            })
            .unwrap();

        assert_eq!(reports.first().unwrap().loaded, 0);
        for pair in reports.windows(2) {
            assert!(pair[1].loaded >= pair[0].loaded);
            assert_eq!(pair[1].total, pair[0].total);
        }
        let finished: Vec<_> = reports.iter().filter(|p| !p.in_progress).collect();
        assert_eq!(finished.len(), 1);
        assert!(!reports.last().unwrap().in_progress);
    }

    #[test]
    fn prior_store_contents_are_cleared() {
        let mut vfs = MemoryVfs::new();
        vfs.create_file("/stale/old.txt", "gone soon").unwrap();

        RepoLoader::new()
            .load(&single_file_source(), &mut vfs, "demo/repo", &mut |_| {})
            .unwrap();

        assert!(!vfs.exists("/stale"));
        assert!(vfs.exists("/a/x.txt"));
    }

    #[test]
    fn failed_fetch_is_skipped_not_fatal() {
        let source = FlakySource {
            tree: vec![
                RemoteNode::file("good1.txt", "good1.txt"),
                RemoteNode::file("bad.txt", "bad.txt"),
                RemoteNode::file("good2.txt", "good2.txt"),
            ],
            contents: BTreeMap::from([
                ("good1.txt".to_string(), "one".to_string()),
                ("good2.txt".to_string(), "two".to_string()),
            ]),
            fail: BTreeSet::from(["bad.txt".to_string()]),
        };

        let mut vfs = MemoryVfs::new();
        let mut last = None;
        RepoLoader::new()
            .load(&source, &mut vfs, "demo/repo", &mut |p| last = Some(*p))
            .unwrap();

        let last = last.unwrap();
        assert_eq!(last.total, 3);
        assert_eq!(last.loaded, 2);
        assert!(!last.in_progress);
        assert_eq!(vfs.read_file("/good1.txt").unwrap(), "one");
        assert_eq!(vfs.read_file("/good2.txt").unwrap(), "two");
        assert!(!vfs.exists("/bad.txt"));
    }

    #[test]
    fn failed_write_is_skipped_not_fatal() {
        // The second node tries to write a file over the directory the
        // first one created; the write fails and is skipped.
        let source = StaticSource::new(
            vec![
                RemoteNode::dir("a", "a", vec![RemoteNode::file("x.txt", "a/x.txt")]),
                RemoteNode::file("a", "a-as-file"),
            ],
            BTreeMap::from([
                ("a/x.txt".to_string(), "hi".to_string()),
                ("a-as-file".to_string(), "clobber".to_string()),
            ]),
        );

        let mut vfs = MemoryVfs::new();
        let mut last = None;
        RepoLoader::new()
            .load(&source, &mut vfs, "demo/repo", &mut |p| last = Some(*p))
            .unwrap();

        let last = last.unwrap();
        assert_eq!(last.total, 2);
        assert_eq!(last.loaded, 1);
        assert!(vfs.stat("/a").unwrap().is_dir());
        assert_eq!(vfs.read_file("/a/x.txt").unwrap(), "hi");
    }

    #[test]
    fn tree_fetch_failure_aborts() {
        struct DownSource;
        impl RemoteSource for DownSource {
            fn fetch_tree(&self, _repo: &str) -> std::result::Result<Vec<RemoteNode>, RemoteError> {
                Err(RemoteError::Unauthorized)
            }
            fn fetch_file(&self, _repo: &str, _path: &str) -> std::result::Result<String, RemoteError> {
                unreachable!("no tree, no file fetches")
            }
        }

        let mut vfs = MemoryVfs::new();
        vfs.create_file("/kept.txt", "still here").unwrap();
        let err = RepoLoader::new()
            .load(&DownSource, &mut vfs, "demo/repo", &mut |_| {})
            .unwrap_err();

        assert!(matches!(err, QuayError::RemoteFetch(_)));
        // The store is untouched when the tree never arrived.
        assert_eq!(vfs.read_file("/kept.txt").unwrap(), "still here");
    }

    #[test]
    fn directories_exist_before_their_files() {
        let mut vfs = MemoryVfs::new();
        RepoLoader::new()
            .load(&StaticSource::sample(), &mut vfs, "demo/repo", &mut |_| {})
            .unwrap();

        assert!(vfs.stat("/src").unwrap().is_dir());
        assert!(vfs.stat("/src/components").unwrap().is_dir());
        assert_eq!(
            vfs.readdir("/src/components").unwrap(),
            vec!["FileTree.jsx", "FileViewer.jsx"]
        );
        assert!(vfs.read_file("/src/index.js").unwrap().contains("ReactDOM"));
    }

    #[test]
    fn cancellation_stops_the_walk_but_still_finishes_the_report() {
        let loader = RepoLoader::new();
        let token = loader.cancel_token();
        let mut vfs = MemoryVfs::new();
        let mut reports = Vec::new();

        loader
            .load(&StaticSource::sample(), &mut vfs, "demo/repo", &mut |p| {
                reports.push(*p);
                if p.in_progress && p.loaded == 1 {
                    token.cancel();
                }
            })
            .unwrap();

        let last = reports.last().unwrap();
        assert!(!last.in_progress);
        assert_eq!(last.loaded, 1);
        assert!(last.loaded < last.total);
    }

    #[test]
    fn empty_tree_reports_zero_totals() {
        let source = StaticSource::new(Vec::new(), BTreeMap::new());
        let mut vfs = MemoryVfs::new();
        let mut reports = Vec::new();
        let tree = RepoLoader::new()
            .load(&source, &mut vfs, "demo/repo", &mut |p| reports.push(*p))
            .unwrap();

        assert!(tree.is_empty());
        assert_eq!(
            reports,
            vec![
                LoadProgress {
                    in_progress: true,
                    total: 0,
                    loaded: 0
                },
                LoadProgress {
                    in_progress: false,
                    total: 0,
                    loaded: 0
                },
            ]
        );
    }
}
