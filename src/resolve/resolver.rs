//! Variable resolution - flattens an entry into placeholder values

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use super::color::color_placeholders;
use super::error::ResolveError;
use crate::config::ResolveOptions;
use crate::document::{Color, DocumentSource, Fetcher, Mode, ModeValue, Scalar, Variable};
use crate::naming::to_identifier;

/// Placeholder name to display string, built fresh per entry
pub type ResolvedValueMap = BTreeMap<String, String>;

/// Placeholder holding the entry's identifier-cased name
pub const NAME_PLACEHOLDER: &str = "name";

/// End of an alias chain
#[derive(Debug, Clone, PartialEq)]
enum Terminal {
    Scalar(Scalar),
    Color(Color),
}

/// Resolves variables against a document, following aliases
pub struct Resolver<'a, S> {
    fetcher: &'a Fetcher<S>,
    options: &'a ResolveOptions,
}

impl<'a, S: DocumentSource> Resolver<'a, S> {
    pub fn new(fetcher: &'a Fetcher<S>, options: &'a ResolveOptions) -> Self {
        Self { fetcher, options }
    }

    /// Resolve every mode of `entry` into one placeholder map.
    ///
    /// Placeholders are keyed by the names in `modes`, even when the value
    /// was reached through aliases into collections with other mode names.
    /// Values that cannot be found are omitted.
    pub async fn resolve_entry(
        &self,
        entry: &Variable,
        modes: &[Mode],
    ) -> Result<ResolvedValueMap, ResolveError> {
        let mut map = ResolvedValueMap::new();
        map.insert(NAME_PLACEHOLDER.to_string(), to_identifier(&entry.name));

        for (index, mode) in modes.iter().enumerate() {
            match self.follow(entry, mode, index).await? {
                Some(Terminal::Scalar(value)) => {
                    map.insert(mode.name.clone(), value.to_string());
                }
                Some(Terminal::Color(color)) => {
                    map.extend(color_placeholders(&mode.name, &color, &self.options.color));
                }
                None => {}
            }
        }

        Ok(map)
    }

    /// Walk the alias chain for one mode until a concrete value is reached.
    ///
    /// Each hop uses the target collection's mode at the caller's mode
    /// position. The walk fails on a revisited variable or once the hop
    /// limit is exceeded.
    async fn follow(
        &self,
        entry: &Variable,
        mode: &Mode,
        mode_index: usize,
    ) -> Result<Option<Terminal>, ResolveError> {
        let Some(mut value) = entry.value_for(&mode.mode_id).cloned() else {
            debug!(entry = %entry.name, mode = %mode.name, "no value for mode");
            return Ok(None);
        };

        let mut visited = HashSet::new();
        visited.insert((entry.collection_id.clone(), entry.id.clone()));
        let mut chain = vec![entry.name.clone()];
        let mut hops = 0;

        loop {
            let alias = match value {
                ModeValue::Scalar(s) => return Ok(Some(Terminal::Scalar(s))),
                ModeValue::Composite(c) => return Ok(Some(Terminal::Color(c))),
                ModeValue::Alias(alias) => alias,
            };

            hops += 1;
            if hops > self.options.max_alias_depth {
                chain.push(alias.id);
                return Err(ResolveError::too_deep(
                    &entry.name,
                    self.options.max_alias_depth,
                    chain,
                ));
            }

            let Some(target) = self.lookup_variable(&alias.id).await else {
                debug!(entry = %entry.name, alias = %alias.id, "alias target not found");
                return Ok(None);
            };
            chain.push(target.name.clone());

            if !visited.insert((target.collection_id.clone(), target.id.clone())) {
                return Err(ResolveError::cycle(&entry.name, chain));
            }

            let Some(collection) = self.lookup_collection(&target.collection_id).await else {
                debug!(
                    entry = %entry.name,
                    collection = %target.collection_id,
                    "alias target collection not found"
                );
                return Ok(None);
            };

            let Some(target_mode) = collection.mode_at(mode_index) else {
                debug!(collection = %collection.name, "alias target collection has no modes");
                return Ok(None);
            };

            value = match target.value_for(&target_mode.mode_id) {
                Some(v) => v.clone(),
                None => {
                    debug!(
                        entry = %entry.name,
                        target = %target.name,
                        mode = %target_mode.name,
                        "alias target has no value for mode"
                    );
                    return Ok(None);
                }
            };
        }
    }

    async fn lookup_variable(&self, id: &str) -> Option<Variable> {
        match self.fetcher.variable(id).await {
            Ok(found) => found,
            Err(e) => {
                warn!(variable = id, error = %e, "treating unreachable variable as missing");
                None
            }
        }
    }

    async fn lookup_collection(&self, id: &str) -> Option<crate::document::Collection> {
        match self.fetcher.collection(id).await {
            Ok(found) => found,
            Err(e) => {
                warn!(collection = id, error = %e, "treating unreachable collection as missing");
                None
            }
        }
    }
}
