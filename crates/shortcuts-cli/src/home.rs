use anyhow::Context as _;
use shortcuts_core::config::{Config, LoadPolicy};
use shortcuts_core::{paths, AliasTable};
use std::path::{Path, PathBuf};

/// Resolve the shortcuts home directory.
///
/// Priority:
/// 1. `--home` flag / `SHORTCUTS_HOME` env var (passed in as `explicit`)
/// 2. `~/.shortcuts`
pub fn resolve_home(explicit: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(p) = explicit {
        return Ok(p.to_path_buf());
    }
    Ok(paths::default_home()?)
}

/// `--file` / `SHORTCUTS_FILE` if given, else `<home>/aliases`.
pub fn resolve_aliases_file(home: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(p) => p.to_path_buf(),
        None => paths::aliases_path(home),
    }
}

/// Everything a command needs: where the files live, the loaded config and
/// the output mode.
pub struct Context {
    pub home: PathBuf,
    pub aliases: PathBuf,
    pub config: Config,
    pub json: bool,
}

impl Context {
    pub fn new(home: Option<&Path>, file: Option<&Path>, json: bool) -> anyhow::Result<Self> {
        let home = resolve_home(home)?;
        let aliases = resolve_aliases_file(&home, file);
        let config = Config::load(&home)?;
        Ok(Self {
            home,
            aliases,
            config,
            json,
        })
    }

    /// Load the alias table under the configured parse-error policy.
    pub fn load_table(&self) -> anyhow::Result<AliasTable> {
        self.load_table_with(self.config.on_parse_error)
    }

    /// A missing definitions file is an empty table, so every name passes
    /// through.
    pub fn load_table_with(&self, policy: LoadPolicy) -> anyhow::Result<AliasTable> {
        if !self.aliases.exists() {
            tracing::warn!(
                path = %self.aliases.display(),
                "no alias file found; run `shortcuts init` to create one"
            );
            return Ok(AliasTable::default().with_max_depth(self.config.max_depth));
        }
        let table = AliasTable::from_file(&self.aliases, policy)
            .with_context(|| format!("failed to load {}", self.aliases.display()))?;
        Ok(table.with_max_depth(self.config.max_depth))
    }
}
