//! The alias table: an ordered set of definitions, frozen after load, with
//! chain-following expansion.
//!
//! Lookups never mutate the table, so a loaded `AliasTable` can be shared
//! between threads (e.g. behind an `Arc`) without locking.

use crate::config::{LoadPolicy, DEFAULT_MAX_DEPTH};
use crate::definition::{leading_token, parse_source, AliasDefinition};
use crate::error::{ParseError, Result, ShortcutsError};
use crate::placeholder::{self, Env};
use crate::quote;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// A single lookup hit: the raw template, before chain following.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCommand<'a> {
    pub name: &'a str,
    pub template: &'a str,
    /// The template's leading token is another alias.
    pub chains: bool,
}

/// The final command line produced by [`AliasTable::expand`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    pub command: String,
    /// Alias names visited, starting with the requested one. Empty when the
    /// requested name was not an alias and was passed through.
    pub chain: Vec<String>,
}

impl Expansion {
    pub fn is_passthrough(&self) -> bool {
        self.chain.is_empty()
    }
}

/// A name defined on more than one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Override {
    pub name: String,
    pub active_line: usize,
    pub shadowed_lines: Vec<usize>,
}

// ---------------------------------------------------------------------------
// AliasTable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AliasTable {
    /// Every parsed definition in source order, shadowed ones included.
    definitions: Vec<AliasDefinition>,
    /// Name -> index of the winning (last) definition.
    active: HashMap<String, usize>,
    skipped: Vec<ParseError>,
    max_depth: usize,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            definitions: Vec::new(),
            active: HashMap::new(),
            skipped: Vec::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl AliasTable {
    /// Load with [`LoadPolicy::Abort`].
    pub fn load(source: &str) -> Result<Self> {
        Self::load_with(source, LoadPolicy::Abort)
    }

    /// Parse `source` top to bottom. Later definitions of a name replace
    /// earlier ones.
    pub fn load_with(source: &str, policy: LoadPolicy) -> Result<Self> {
        let mut definitions = Vec::new();
        let mut skipped = Vec::new();

        for parsed in parse_source(source) {
            match parsed {
                Ok(def) => definitions.push(def),
                Err(e) => match policy {
                    LoadPolicy::Abort => return Err(e.into()),
                    LoadPolicy::Skip => {
                        tracing::warn!(line = e.line, reason = %e.reason, "skipping malformed alias definition");
                        skipped.push(e);
                    }
                },
            }
        }

        let mut active = HashMap::with_capacity(definitions.len());
        for (i, def) in definitions.iter().enumerate() {
            if let Some(prev) = active.insert(def.name.clone(), i) {
                tracing::debug!(
                    name = %def.name,
                    previous_line = definitions[prev].line,
                    line = def.line,
                    "alias redefined"
                );
            }
        }

        Ok(Self {
            definitions,
            active,
            skipped,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    pub fn from_file(path: &Path, policy: LoadPolicy) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let table = Self::load_with(&source, policy)?;
        tracing::debug!(path = %path.display(), aliases = table.len(), "loaded alias table");
        Ok(table)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn get(&self, name: &str) -> Option<&AliasDefinition> {
        self.active.get(name).map(|&i| &self.definitions[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.active.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Look up `name`. `None` means no substitution applies, which is not an
    /// error.
    pub fn resolve(&self, name: &str) -> Option<ResolvedCommand<'_>> {
        let def = self.get(name)?;
        let chains = def
            .leading_token()
            .is_some_and(|t| t != name && self.contains(t));
        Some(ResolvedCommand {
            name: &def.name,
            template: &def.template,
            chains,
        })
    }

    /// Active definitions, ordered by the line that defined them.
    pub fn definitions(&self) -> Vec<&AliasDefinition> {
        let mut idx: Vec<usize> = self.active.values().copied().collect();
        idx.sort_unstable();
        idx.into_iter().map(|i| &self.definitions[i]).collect()
    }

    pub fn overridden(&self) -> Vec<Override> {
        let mut lines: HashMap<&str, Vec<usize>> = HashMap::new();
        for def in &self.definitions {
            lines.entry(def.name.as_str()).or_default().push(def.line);
        }
        let mut out: Vec<Override> = lines
            .into_iter()
            .filter(|(_, l)| l.len() > 1)
            .map(|(name, mut l)| {
                let active_line = l.pop().unwrap_or_default();
                Override {
                    name: name.to_string(),
                    active_line,
                    shadowed_lines: l,
                }
            })
            .collect();
        out.sort_by_key(|o| o.active_line);
        out
    }

    /// Lines dropped under [`LoadPolicy::Skip`].
    pub fn skipped(&self) -> &[ParseError] {
        &self.skipped
    }

    // -----------------------------------------------------------------------
    // Expansion
    // -----------------------------------------------------------------------

    /// Expand `name` to a full command line: follow the alias chain, fill
    /// placeholders from `env`, then append `extra_args` individually quoted.
    ///
    /// A name that is not an alias passes through as itself.
    pub fn expand<S: AsRef<str>>(
        &self,
        name: &str,
        extra_args: &[S],
        env: &Env,
    ) -> Result<Expansion> {
        let (mut command, chain) = match self.follow_chain(name)? {
            Some((template, chain)) => (placeholder::substitute(&template, env, name)?, chain),
            None => (quote::quote(name), Vec::new()),
        };

        if !extra_args.is_empty() {
            if !command.is_empty() && !command.ends_with(char::is_whitespace) {
                command.push(' ');
            }
            command.push_str(&quote::join(extra_args));
        }

        Ok(Expansion { command, chain })
    }

    /// Follow every alias's chain and collect the failures.
    pub fn check(&self) -> Vec<ShortcutsError> {
        self.definitions()
            .into_iter()
            .filter_map(|def| self.follow_chain(&def.name).err())
            .collect()
    }

    /// Repeatedly replace the leading token while it names an alias.
    ///
    /// Returns the terminal command text and the names visited, or `None`
    /// when `name` is not an alias. A template whose leading token is the
    /// alias being expanded stops there: that word is the real command.
    fn follow_chain(&self, name: &str) -> Result<Option<(String, Vec<String>)>> {
        let Some(def) = self.get(name) else {
            return Ok(None);
        };
        let mut chain = vec![def.name.clone()];
        let mut current = def.template.clone();

        loop {
            let Some(token) = leading_token(&current).map(str::to_string) else {
                break;
            };
            if chain.last().is_some_and(|last| *last == token) {
                break;
            }
            let Some(next) = self.get(&token) else {
                break;
            };
            if chain.contains(&token) {
                chain.push(token.clone());
                return Err(ShortcutsError::Cycle { name: token, chain });
            }
            if chain.len() >= self.max_depth {
                chain.push(token);
                return Err(ShortcutsError::DepthExceeded {
                    limit: self.max_depth,
                    chain,
                });
            }

            let rest = &current.trim_start()[token.len()..];
            tracing::debug!(alias = %token, template = %next.template, "expanding");
            current = format!("{}{}", next.template, rest);
            chain.push(token);
        }

        Ok(Some((current, chain)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn table(src: &str) -> AliasTable {
        AliasTable::load(src).unwrap()
    }

    fn expand(t: &AliasTable, name: &str, args: &[&str]) -> Result<Expansion> {
        t.expand(name, args, &Env::new())
    }

    #[test]
    fn loading_is_deterministic() {
        let src = "ll=ls -lh\nla=ll -A\n..=cd ..\nll=ls -lhG\n";
        let a = table(src);
        let b = table(src);
        for name in ["ll", "la", "..", "nope"] {
            assert_eq!(a.resolve(name), b.resolve(name));
        }
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        let t = table("ll=ls -lh\n");
        assert!(t.resolve("git").is_none());
        assert!(AliasTable::default().resolve("ll").is_none());
    }

    #[test]
    fn resolve_reports_chaining() {
        let t = table("ll=ls -lh\nla=ll -A\nls=ls -G\n");
        let la = t.resolve("la").unwrap();
        assert_eq!(la.template, "ll -A");
        assert!(la.chains);
        // ll -> ls, and ls is an alias
        assert!(t.resolve("ll").unwrap().chains);
        // self-reference is the real command, not a chain
        assert!(!t.resolve("ls").unwrap().chains);
    }

    #[test]
    fn chain_terminates() {
        let t = table("a=b\nb=c\n");
        let exp = expand(&t, "a", &[]).unwrap();
        assert_eq!(exp.command, "c");
        assert_eq!(exp.chain, vec!["a", "b"]);
    }

    #[test]
    fn two_cycle_is_detected() {
        let t = table("a=b\nb=a\n");
        match expand(&t, "a", &[]).unwrap_err() {
            ShortcutsError::Cycle { name, chain } => {
                assert_eq!(name, "a");
                assert_eq!(chain, vec!["a", "b", "a"]);
            }
            other => panic!("expected cycle, got {other}"),
        }
    }

    #[test]
    fn longer_cycle_names_repeated_alias() {
        let t = table("x=a\na=b --flag\nb=c\nc=a\n");
        match expand(&t, "x", &[]).unwrap_err() {
            ShortcutsError::Cycle { name, chain } => {
                assert_eq!(name, "a");
                assert_eq!(chain, vec!["x", "a", "b", "c", "a"]);
            }
            other => panic!("expected cycle, got {other}"),
        }
    }

    #[test]
    fn self_reference_is_the_real_command() {
        let t = table("ls=ls -G\nll=ls -l\n");
        assert_eq!(expand(&t, "ls", &[]).unwrap().command, "ls -G");
        let ll = expand(&t, "ll", &["src"]).unwrap();
        assert_eq!(ll.command, "ls -G -l src");
        assert_eq!(ll.chain, vec!["ll", "ls"]);
    }

    #[test]
    fn depth_limit_is_enforced() {
        let t = table("a1=a2\na2=a3\na3=a4\na4=echo done\n").with_max_depth(3);
        match expand(&t, "a1", &[]).unwrap_err() {
            ShortcutsError::DepthExceeded { limit, chain } => {
                assert_eq!(limit, 3);
                assert_eq!(chain, vec!["a1", "a2", "a3", "a4"]);
            }
            other => panic!("expected depth error, got {other}"),
        }
        let roomy = table("a1=a2\na2=a3\na3=a4\na4=echo done\n");
        assert_eq!(expand(&roomy, "a1", &[]).unwrap().command, "echo done");
    }

    #[test]
    fn remainder_of_template_is_kept() {
        let t = table("g=git\ngs=g status --short\n");
        assert_eq!(expand(&t, "gs", &[]).unwrap().command, "git status --short");
    }

    #[test]
    fn duplicate_name_last_wins() {
        let t = table("x=foo\ny=bar\nx=bar\n");
        assert_eq!(t.resolve("x").unwrap().template, "bar");
        assert_eq!(t.len(), 2);
        let overridden = t.overridden();
        assert_eq!(
            overridden,
            vec![Override {
                name: "x".to_string(),
                active_line: 3,
                shadowed_lines: vec![1],
            }]
        );
    }

    #[test]
    fn definitions_follow_winning_line_order() {
        let t = table("b=1\na=2\nb=3\n");
        let names: Vec<_> = t.definitions().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn extra_args_are_quoted() {
        let t = table("gg=grep --color=auto -rn\n");
        let exp = expand(&t, "gg", &["two words", "$(rm -rf ~)", "-i"]).unwrap();
        assert_eq!(
            exp.command,
            "grep --color=auto -rn 'two words' '$(rm -rf ~)' -i"
        );
    }

    #[test]
    fn backticks_in_template_are_verbatim() {
        let t = table("cg=cd `git rev-parse --show-toplevel`\n");
        let exp = expand(&t, "cg", &[]).unwrap();
        assert_eq!(exp.command, "cd `git rev-parse --show-toplevel`");
    }

    #[test]
    fn unknown_name_passes_through() {
        let t = table("ll=ls -lh\n");
        let exp = expand(&t, "git", &["log", "--oneline"]).unwrap();
        assert!(exp.is_passthrough());
        assert_eq!(exp.command, "git log --oneline");
    }

    #[test]
    fn placeholders_filled_after_chain() {
        let t = table("ports=lsof -nP -iTCP:{PORT:-8000} -sTCP:LISTEN\np=ports\n");
        let mut env = Env::new();
        assert_eq!(
            t.expand("p", &[] as &[&str], &env).unwrap().command,
            "lsof -nP -iTCP:8000 -sTCP:LISTEN"
        );
        env.insert("PORT".to_string(), "3000".to_string());
        assert_eq!(
            t.expand("p", &[] as &[&str], &env).unwrap().command,
            "lsof -nP -iTCP:3000 -sTCP:LISTEN"
        );
    }

    #[test]
    fn forwarded_args_are_not_placeholder_sources() {
        let t = table("say=echo\n");
        let exp = expand(&t, "say", &["{HOME}"]).unwrap();
        assert_eq!(exp.command, "echo '{HOME}'");
    }

    #[test]
    fn missing_placeholder_names_requested_alias() {
        let t = table("jump=ssh {HOST}\nj=jump\n");
        match expand(&t, "j", &[]).unwrap_err() {
            ShortcutsError::MissingPlaceholder { alias, placeholder } => {
                assert_eq!(alias, "j");
                assert_eq!(placeholder, "HOST");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn abort_policy_stops_at_first_bad_line() {
        let err = AliasTable::load("ok=echo\nbroken\nbad name=x\n").unwrap_err();
        match err {
            ShortcutsError::Parse(e) => {
                assert_eq!(e.line, 2);
                assert_eq!(e.content, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skip_policy_keeps_good_lines() {
        let t = AliasTable::load_with("ok=echo\nbroken\nbad name=x\nalso=true\n", LoadPolicy::Skip)
            .unwrap();
        assert_eq!(t.len(), 2);
        let lines: Vec<_> = t.skipped().iter().map(|e| e.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn check_collects_chain_failures() {
        let t = table("a=b\nb=a\nok=echo fine\n");
        let errors = t.check();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| matches!(e, ShortcutsError::Cycle { .. })));
        assert!(table("ok=echo fine\n").check().is_empty());
    }

    #[test]
    fn empty_template_with_args() {
        let t = table("nothing=\n");
        assert_eq!(expand(&t, "nothing", &["a b"]).unwrap().command, "'a b'");
    }

    #[test]
    fn assignment_shaped_words_stay_literal() {
        let t = table("nothing=\n");
        assert_eq!(
            expand(&t, "nothing", &["X=1", "true"]).unwrap().command,
            "'X=1' true"
        );
        let passthrough = expand(&t, "FOO=bar", &["env"]).unwrap();
        assert!(passthrough.is_passthrough());
        assert_eq!(passthrough.command, "'FOO=bar' env");
    }

    #[test]
    fn shell_parameter_syntax_is_verbatim() {
        let t = table("proj=cd ${HOME}/src\nport=lsof -i :${PORT:-8000}\ned=${EDITOR}\n");
        let mut env = Env::new();
        env.insert("HOME".to_string(), "/home/u".to_string());
        assert_eq!(
            t.expand("proj", &[] as &[&str], &env).unwrap().command,
            "cd ${HOME}/src"
        );
        assert_eq!(
            t.expand("port", &[] as &[&str], &env).unwrap().command,
            "lsof -i :${PORT:-8000}"
        );
        assert_eq!(
            t.expand("ed", &["notes.md"], &Env::new()).unwrap().command,
            "${EDITOR} notes.md"
        );
    }

    #[test]
    fn from_file_reads_source() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("aliases");
        std::fs::write(&path, "# stock\nll=ls -lh\n").unwrap();
        let t = AliasTable::from_file(&path, LoadPolicy::Abort).unwrap();
        assert!(t.contains("ll"));
    }

    #[test]
    fn shared_across_threads() {
        let t = Arc::new(table("a=b\nb=echo hi\n"));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let t = Arc::clone(&t);
                std::thread::spawn(move || {
                    t.expand("a", &[i.to_string()], &Env::new()).unwrap().command
                })
            })
            .collect();
        for (i, h) in handles.into_iter().enumerate() {
            assert_eq!(h.join().unwrap(), format!("echo hi {i}"));
        }
    }
}
