//! Typed builder for batched GitHub GraphQL documents.
//!
//! Every field of a document is addressed by a positional alias (`_0`, `_1`,
//! ...). The alias is assigned when the field is pushed and is the only key
//! used to read the field's result back, so building and parsing share the
//! same index.

use crate::error::{Result, ThanksError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

/// Positional alias of a field within one document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Alias(usize);

impl Alias {
    pub fn at(index: usize) -> Self {
        Alias(index)
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let digits = raw.strip_prefix('_')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Alias)
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

/// One aliased sub-operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// `repository(owner, name) { id viewerHasStarred }`
    Repository { owner: String, name: String },
    /// `addStar(input: { clientMutationId, starrableId }) { clientMutationId }`
    AddStar {
        starrable_id: String,
        client_mutation_id: String,
    },
}

impl Field {
    fn kind(&self) -> OperationKind {
        match self {
            Field::Repository { .. } => OperationKind::Query,
            Field::AddStar { .. } => OperationKind::Mutation,
        }
    }

    fn render(&self) -> String {
        match self {
            Field::Repository { owner, name } => format!(
                "repository(owner:{},name:{}){{id,viewerHasStarred}}",
                string_literal(owner),
                string_literal(name)
            ),
            Field::AddStar {
                starrable_id,
                client_mutation_id,
            } => format!(
                "addStar(input:{{clientMutationId:{},starrableId:{}}}){{clientMutationId}}",
                string_literal(client_mutation_id),
                string_literal(starrable_id)
            ),
        }
    }
}

// JSON string escaping is valid GraphQL string escaping.
fn string_literal(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}

/// A batched query or mutation
#[derive(Debug, Clone)]
pub struct Document {
    kind: OperationKind,
    fields: Vec<Field>,
}

impl Document {
    pub fn query() -> Self {
        Self {
            kind: OperationKind::Query,
            fields: Vec::new(),
        }
    }

    pub fn mutation() -> Self {
        Self {
            kind: OperationKind::Mutation,
            fields: Vec::new(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// Append a field and return the alias it was assigned.
    pub fn push(&mut self, field: Field) -> Result<Alias> {
        if field.kind() != self.kind {
            return Err(ThanksError::InvalidDocument(format!(
                "cannot add a {} field to a {}",
                field.kind().keyword(),
                self.kind.keyword()
            )));
        }
        let alias = Alias::at(self.fields.len());
        self.fields.push(field);
        Ok(alias)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::from(self.kind.keyword());
        out.push('{');
        for (index, field) in self.fields.iter().enumerate() {
            out.push_str(&format!("{}: {}\n", Alias::at(index), field.render()));
        }
        out.push('}');
        out
    }

    /// Read each field's result out of the `data` object, in push order.
    pub fn correlate<T: DeserializeOwned>(&self, mut data: Map<String, Value>) -> Result<Vec<T>> {
        let mut results = Vec::with_capacity(self.fields.len());
        for index in 0..self.fields.len() {
            let alias = Alias::at(index).to_string();
            let value = data
                .remove(&alias)
                .ok_or_else(|| ThanksError::ApiError(format!("no result for alias {}", alias)))?;
            if value.is_null() {
                return Err(ThanksError::NotFound(format!("null result for alias {}", alias)));
            }
            results.push(serde_json::from_value(value)?);
        }

        for key in data.keys() {
            match Alias::parse(key) {
                Some(alias) => warn!(%alias, "Result for an alias that was never requested"),
                None => warn!(key = %key, "Unexpected key in GraphQL data"),
            }
        }

        Ok(results)
    }
}
