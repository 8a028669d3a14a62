use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Writes `content` to a uniquely-named scratch file under the OS temp
/// directory and returns its path. The file is not cleaned up automatically
/// (tests run in a fresh temp location per invocation); this mirrors how the
/// crate's own unit tests stage scratch graph files.
pub fn write_graph(content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!("bellman_pgas_scenario_{}_{unique}.txt", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}
