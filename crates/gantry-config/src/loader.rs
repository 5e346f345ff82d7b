use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;

use crate::ProfilerConfig;

/// Ordered list of config file locations searched from lowest to highest
/// priority.  Later files override earlier ones.
fn config_search_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    // 1. System-wide default
    paths.push(PathBuf::from("/etc/gantry/config.toml"));

    // 2. XDG / home
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/gantry/config.toml"));
    }
    if let Some(cfg) = dirs::config_dir() {
        paths.push(cfg.join("gantry/config.toml"));
    }

    // 3. Workspace-local
    paths.push(PathBuf::from(".gantry/config.toml"));
    paths.push(PathBuf::from("gantry.toml"));

    paths
}

/// Load configuration by merging all discovered TOML files.
/// The `extra` argument may provide an explicit path (e.g. `--config` CLI flag).
pub fn load(extra: Option<&Path>) -> anyhow::Result<ProfilerConfig> {
    let mut merged = toml::Value::Table(toml::map::Map::new());

    for path in config_search_paths() {
        if path.is_file() {
            debug!(path = %path.display(), "loading config layer");
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let layer: toml::Value = toml::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            merge_toml(&mut merged, layer);
        }
    }

    if let Some(p) = extra {
        debug!(path = %p.display(), "loading explicit config");
        let text = std::fs::read_to_string(p)
            .with_context(|| format!("reading {}", p.display()))?;
        let layer: toml::Value = toml::from_str(&text)
            .with_context(|| format!("parsing {}", p.display()))?;
        merge_toml(&mut merged, layer);
    }

    // A config that parses as TOML but not as a ProfilerConfig (say, a
    // scalar where [agent].modules should be an array) must fail the host
    // here, not boot an agent with silently-defaulted settings.
    let config: ProfilerConfig = merged
        .try_into()
        .context("config does not match the profiler config schema")?;
    Ok(config)
}

/// Deep-merge `src` into `dst`; src wins on scalar conflicts.
fn merge_toml(dst: &mut toml::Value, src: toml::Value) {
    match (dst, src) {
        (toml::Value::Table(d), toml::Value::Table(s)) => {
            for (k, v) in s {
                let entry = d.entry(k).or_insert(toml::Value::Table(toml::map::Map::new()));
                merge_toml(entry, v);
            }
        }
        (dst, src) => *dst = src,
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn val(s: &str) -> toml::Value {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn merge_scalar_src_wins() {
        let mut dst = val(r#"x = 1"#);
        let src = val(r#"x = 2"#);
        merge_toml(&mut dst, src);
        assert_eq!(dst["x"].as_integer(), Some(2));
    }

    #[test]
    fn merge_preserves_unrelated_keys() {
        let mut dst = val("[agent]\nargs = \"a=1\"");
        let src = val("[collector]\nendpoint = \"tcp://c:9994\"");
        merge_toml(&mut dst, src);
        assert_eq!(dst["agent"]["args"].as_str(), Some("a=1"));
        assert_eq!(dst["collector"]["endpoint"].as_str(), Some("tcp://c:9994"));
    }

    #[test]
    fn merge_nested_tables() {
        let mut dst = val("[agent]\nargs = \"a=1\"\nenabled = true");
        let src = val("[agent]\nargs = \"a=2\"");
        merge_toml(&mut dst, src);
        assert_eq!(dst["agent"]["args"].as_str(), Some("a=2"));
        assert_eq!(dst["agent"]["enabled"].as_bool(), Some(true));
    }

    #[test]
    fn load_explicit_path_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[agent]\nentry_point = \"acme.test.Agent\"\nmodules = [\"m\"]"
        )
        .unwrap();
        let cfg = load(Some(file.path())).unwrap();
        assert_eq!(cfg.agent.entry_point.as_deref(), Some("acme.test.Agent"));
    }

    #[test]
    fn load_missing_explicit_path_errors() {
        assert!(load(Some(Path::new("/nonexistent/gantry.toml"))).is_err());
    }

    #[test]
    fn schema_mismatch_is_surfaced_not_defaulted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // modules must be an array of locations, not a scalar
        writeln!(file, "[agent]\nmodules = \"lib/collector-agent\"").unwrap();
        let err = load(Some(file.path())).err().expect("schema mismatch must fail");
        assert!(err.to_string().contains("profiler config schema"));
    }
}
