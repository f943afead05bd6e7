//! Update requests: query-string flags and the JSON command body.
//!
//! An update is a POST to the `update` handler. [`UpdateParams`] goes in the
//! query string; [`UpdatePayload`] is the body, written in Solr's JSON
//! command syntax where the same key may appear many times:
//!
//! ```text
//! {"add":{"doc":{"id":"1"}},"add":{"doc":{"id":"2"}},"delete":{"query":"stale:true"},"commit":{}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::encode::QueryString;
use crate::error::{ParamsError, Result};
use crate::params::Params;

/// Query-string flags of an update request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateParams {
    /// Hard commit after the update (`commit`).
    pub commit: Option<bool>,
    /// Make changes visible without flushing to disk (`softCommit`).
    pub soft_commit: Option<bool>,
    /// Commit within this many milliseconds (`commitWithin`).
    pub commit_within: Option<u64>,
    /// Replace documents with the same unique key (`overwrite`).
    pub overwrite: Option<bool>,
    /// Block until a new searcher is open (`waitSearcher`).
    pub wait_searcher: Option<bool>,
    /// Merge segments after the update (`optimize`).
    pub optimize: Option<bool>,
    /// Target segment count; needs `optimize` (`maxSegments`).
    pub max_segments: Option<u32>,
    /// Merge away segments holding deletes on commit (`expungeDeletes`).
    pub expunge_deletes: Option<bool>,
    /// Update processor chain (`update.chain`).
    pub update_chain: Option<String>,
}

impl UpdateParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hard commit once the update is applied.
    pub fn commit() -> Self {
        Self {
            commit: Some(true),
            ..Default::default()
        }
    }

    pub fn with_commit_within(mut self, millis: u64) -> Self {
        self.commit_within = Some(millis);
        self
    }

    pub fn with_soft_commit(mut self, soft: bool) -> Self {
        self.soft_commit = Some(soft);
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn with_wait_searcher(mut self, wait: bool) -> Self {
        self.wait_searcher = Some(wait);
        self
    }

    /// Sets `optimize=true` and, when given, `maxSegments`.
    pub fn with_optimize(mut self, max_segments: Option<u32>) -> Self {
        self.optimize = Some(true);
        self.max_segments = max_segments;
        self
    }

    pub fn with_expunge_deletes(mut self, expunge: bool) -> Self {
        self.expunge_deletes = Some(expunge);
        self
    }

    pub fn with_update_chain(mut self, chain: impl Into<String>) -> Self {
        self.update_chain = Some(chain.into());
        self
    }
}

impl Params for UpdateParams {
    fn write_params(&self, out: &mut QueryString) {
        out.push_opt("commit", self.commit)
            .push_opt("softCommit", self.soft_commit)
            .push_opt("commitWithin", self.commit_within)
            .push_opt("overwrite", self.overwrite)
            .push_opt("waitSearcher", self.wait_searcher)
            .push_opt("optimize", self.optimize)
            .push_opt("maxSegments", self.max_segments)
            .push_opt("expungeDeletes", self.expunge_deletes)
            .push_opt("update.chain", self.update_chain.as_deref());
    }

    fn validate(&self) -> Result<()> {
        if self.max_segments.is_some() && self.optimize != Some(true) {
            return Err(ParamsError::invalid("maxSegments", "only valid with optimize=true"));
        }
        Ok(())
    }
}

/// Per-document options of an `add` command.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AddOptions {
    /// Index-time document boost (`boost`).
    pub boost: Option<f32>,
    /// Replace an existing document with the same unique key (`overwrite`).
    pub overwrite: Option<bool>,
    /// Commit within this many milliseconds (`commitWithin`).
    pub commit_within: Option<u64>,
}

impl AddOptions {
    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = Some(boost);
        self
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = Some(overwrite);
        self
    }

    pub fn with_commit_within(mut self, millis: u64) -> Self {
        self.commit_within = Some(millis);
        self
    }
}

/// One command in an update body.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateCommand {
    /// Index (or replace) a document.
    Add {
        doc: Map<String, Value>,
        boost: Option<f32>,
        overwrite: Option<bool>,
        commit_within: Option<u64>,
    },
    /// Delete documents by unique key.
    DeleteByIds(Vec<String>),
    /// Delete every document matching a query.
    DeleteByQuery(String),
    /// Commit pending changes.
    Commit {
        soft_commit: Option<bool>,
        wait_searcher: Option<bool>,
        expunge_deletes: Option<bool>,
    },
    /// Merge index segments.
    Optimize {
        wait_searcher: Option<bool>,
        max_segments: Option<u32>,
    },
}

impl UpdateCommand {
    fn key(&self) -> &'static str {
        match self {
            Self::Add { .. } => "add",
            Self::DeleteByIds(_) | Self::DeleteByQuery(_) => "delete",
            Self::Commit { .. } => "commit",
            Self::Optimize { .. } => "optimize",
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Add {
                doc,
                boost,
                overwrite,
                commit_within,
            } => {
                let mut body = Map::new();
                body.insert("doc".into(), Value::Object(doc.clone()));
                insert_opt(&mut body, "boost", *boost);
                insert_opt(&mut body, "overwrite", *overwrite);
                insert_opt(&mut body, "commitWithin", *commit_within);
                Value::Object(body)
            }
            Self::DeleteByIds(ids) if ids.len() == 1 => json!({ "id": ids[0] }),
            Self::DeleteByIds(ids) => json!(ids),
            Self::DeleteByQuery(query) => json!({ "query": query }),
            Self::Commit {
                soft_commit,
                wait_searcher,
                expunge_deletes,
            } => {
                let mut body = Map::new();
                insert_opt(&mut body, "softCommit", *soft_commit);
                insert_opt(&mut body, "waitSearcher", *wait_searcher);
                insert_opt(&mut body, "expungeDeletes", *expunge_deletes);
                Value::Object(body)
            }
            Self::Optimize {
                wait_searcher,
                max_segments,
            } => {
                let mut body = Map::new();
                insert_opt(&mut body, "waitSearcher", *wait_searcher);
                insert_opt(&mut body, "maxSegments", *max_segments);
                Value::Object(body)
            }
        }
    }
}

fn insert_opt<V: Into<Value>>(body: &mut Map<String, Value>, key: &str, value: Option<V>) {
    if let Some(value) = value {
        body.insert(key.to_owned(), value.into());
    }
}

/// An ordered list of update commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePayload {
    commands: Vec<UpdateCommand>,
}

impl UpdatePayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document.
    ///
    /// # Errors
    ///
    /// Returns [`ParamsError::Serialize`] if `doc` does not serialize to a
    /// JSON object.
    pub fn add<T: Serialize>(self, doc: &T) -> Result<Self> {
        self.add_with(doc, AddOptions::default())
    }

    /// Adds a document with per-document `boost`, `overwrite` and
    /// `commitWithin`.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add).
    pub fn add_with<T: Serialize>(
        mut self,
        doc: &T,
        options: AddOptions,
    ) -> Result<Self> {
        let doc = match serde_json::to_value(doc) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                return Err(ParamsError::Serialize(format!(
                    "document must be a JSON object, got {}",
                    json_kind(&other)
                )))
            }
            Err(e) => return Err(ParamsError::Serialize(e.to_string())),
        };
        self.commands.push(UpdateCommand::Add {
            doc,
            boost: options.boost,
            overwrite: options.overwrite,
            commit_within: options.commit_within,
        });
        Ok(self)
    }

    /// Adds every document in `docs`.
    ///
    /// # Errors
    ///
    /// Same as [`add`](Self::add); nothing is added past the failing document.
    pub fn add_all<'a, T: Serialize + 'a>(
        mut self,
        docs: impl IntoIterator<Item = &'a T>,
    ) -> Result<Self> {
        for doc in docs {
            self = self.add(doc)?;
        }
        Ok(self)
    }

    pub fn delete_by_ids<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        if !ids.is_empty() {
            self.commands.push(UpdateCommand::DeleteByIds(ids));
        }
        self
    }

    pub fn delete_by_query(mut self, query: impl Into<String>) -> Self {
        self.commands.push(UpdateCommand::DeleteByQuery(query.into()));
        self
    }

    pub fn commit(mut self) -> Self {
        self.commands.push(UpdateCommand::Commit {
            soft_commit: None,
            wait_searcher: None,
            expunge_deletes: None,
        });
        self
    }

    pub fn optimize(mut self, max_segments: Option<u32>) -> Self {
        self.commands.push(UpdateCommand::Optimize {
            wait_searcher: None,
            max_segments,
        });
        self
    }

    /// Appends an already-built command.
    pub fn push(mut self, command: UpdateCommand) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[UpdateCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Renders the JSON command body. An empty payload renders `{}`.
    pub fn to_json(&self) -> String {
        let mut body = String::from("{");
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                body.push(',');
            }
            body.push('"');
            body.push_str(command.key());
            body.push_str("\":");
            body.push_str(&command.body().to_string());
        }
        body.push('}');
        body
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Book {
        id: &'static str,
        title: &'static str,
    }

    #[test]
    fn update_params_order() {
        let params = UpdateParams::commit().with_commit_within(1000).with_overwrite(false);
        assert_eq!(
            params.flatten().to_string(),
            "commit=true&commitWithin=1000&overwrite=false"
        );
    }

    #[test]
    fn optimize_builder_satisfies_max_segments_rule() {
        let params = UpdateParams::new()
            .with_optimize(Some(1))
            .with_expunge_deletes(true);
        assert!(params.validate().is_ok());
        assert_eq!(
            params.flatten().to_string(),
            "optimize=true&maxSegments=1&expungeDeletes=true"
        );
    }

    #[test]
    fn max_segments_requires_optimize() {
        let params = UpdateParams {
            max_segments: Some(1),
            ..Default::default()
        };
        assert!(params.validate().is_err());
        let params = UpdateParams {
            optimize: Some(true),
            max_segments: Some(1),
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn payload_keeps_duplicate_command_keys() {
        let payload = UpdatePayload::new()
            .add(&Book { id: "1", title: "Dune" })
            .and_then(|p| p.add(&Book { id: "2", title: "Emma" }))
            .expect("documents serialize");
        assert_eq!(
            payload.to_json(),
            r#"{"add":{"doc":{"id":"1","title":"Dune"}},"add":{"doc":{"id":"2","title":"Emma"}}}"#
        );
    }

    #[test]
    fn delete_and_commit_commands() {
        let payload = UpdatePayload::new()
            .delete_by_ids(["a"])
            .delete_by_ids(["b", "c"])
            .delete_by_query("stale:true")
            .commit();
        assert_eq!(
            payload.to_json(),
            r#"{"delete":{"id":"a"},"delete":["b","c"],"delete":{"query":"stale:true"},"commit":{}}"#
        );
    }

    #[test]
    fn add_with_options() {
        let payload = UpdatePayload::new()
            .add_with(
                &json!({"id": "x"}),
                AddOptions::default()
                    .with_boost(2.5)
                    .with_overwrite(false)
                    .with_commit_within(500),
            )
            .expect("object");
        assert_eq!(
            payload.to_json(),
            r#"{"add":{"doc":{"id":"x"},"boost":2.5,"overwrite":false,"commitWithin":500}}"#
        );
    }

    #[test]
    fn optimize_with_segments() {
        let payload = UpdatePayload::new().optimize(Some(2));
        assert_eq!(payload.to_json(), r#"{"optimize":{"maxSegments":2}}"#);
    }

    #[test]
    fn non_object_document_rejected() {
        let err = UpdatePayload::new().add(&"just a string").unwrap_err();
        assert!(err.to_string().contains("a string"));
    }

    #[test]
    fn empty_id_list_adds_nothing() {
        let empty: Vec<String> = Vec::new();
        assert!(UpdatePayload::new().delete_by_ids(empty).is_empty());
    }

    #[test]
    fn empty_payload_renders_empty_object() {
        assert_eq!(UpdatePayload::new().to_json(), "{}");
    }
}
