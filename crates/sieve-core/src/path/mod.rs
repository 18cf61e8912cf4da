//! Field path resolution over the schema graph.

mod escape;
mod graph;

#[cfg(test)]
mod tests;

use crate::{
    model::{AttributeInfo, FieldKind, Schema},
    obs::{ResolveEvent, sink},
};
use std::sync::Arc;
use thiserror::Error as ThisError;

pub use escape::{join_escaped, split_escaped};
pub use graph::{JoinGraph, JoinId, JoinNode};

///
/// PathError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,

    #[error("unknown attribute '{segment}' on '{entity}' in path '{path}'")]
    UnknownAttribute {
        entity: String,
        segment: String,
        path: String,
    },

    #[error("association '{attribute}' targets '{entity}', which has no terminal identifier")]
    MissingIdentifier { entity: String, attribute: String },
}

///
/// FieldRef
///
/// Resolved handle for one terminal field: the join node that owns it, the
/// attribute path relative to that node, and the field's runtime type tag.
/// A path ending on an association refers to `[association, identifier]`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldRef {
    pub node: JoinId,
    pub attribute_path: Vec<String>,
    pub kind: FieldKind,
    pub path: String,
}

impl FieldRef {
    #[must_use]
    pub fn new(
        node: JoinId,
        attribute_path: Vec<String>,
        kind: FieldKind,
        path: impl Into<String>,
    ) -> Self {
        Self {
            node,
            attribute_path,
            kind,
            path: path.into(),
        }
    }

    /// Terminal attribute name.
    #[must_use]
    pub fn attribute(&self) -> &str {
        self.attribute_path.last().map_or("", String::as_str)
    }
}

///
/// PathResolver
///
/// Walks separator-delimited paths from a root entity. Owned by one
/// resolution pass; association joins are created once and reused.
///

pub struct PathResolver {
    schema: Arc<dyn Schema>,
    separator: String,
    graph: JoinGraph,
}

impl PathResolver {
    #[must_use]
    pub fn new(
        schema: Arc<dyn Schema>,
        root_entity: impl Into<String>,
        separator: impl Into<String>,
    ) -> Self {
        Self {
            schema,
            separator: separator.into(),
            graph: JoinGraph::new(root_entity),
        }
    }

    #[must_use]
    pub const fn graph(&self) -> &JoinGraph {
        &self.graph
    }

    #[must_use]
    pub fn into_graph(self) -> JoinGraph {
        self.graph
    }

    /// Resolve `path`. A non-association segment ends the walk early, even
    /// if segments remain.
    pub fn resolve(&mut self, path: &str) -> Result<FieldRef, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<&str> = path.split(self.separator.as_str()).collect();
        let Some((leaf, hops)) = segments.split_last() else {
            return Err(PathError::Empty);
        };

        let mut node = JoinId::ROOT;
        let mut entity = self.graph.root().entity.clone();

        for segment in hops {
            match self.lookup(&entity, segment, path)? {
                AttributeInfo::Field(kind) => {
                    return Ok(FieldRef::new(node, vec![(*segment).to_string()], kind, path));
                }
                AttributeInfo::Association { target, .. } => {
                    node = self.join(node, &entity, segment, &target);
                    entity = target;
                }
            }
        }

        match self.lookup(&entity, leaf, path)? {
            AttributeInfo::Field(kind) => {
                Ok(FieldRef::new(node, vec![(*leaf).to_string()], kind, path))
            }
            AttributeInfo::Association {
                target,
                id_attribute,
            } => {
                let kind = match self.schema.attribute(&target, &id_attribute) {
                    Some(attr) => match attr.info {
                        AttributeInfo::Field(kind) => kind,
                        AttributeInfo::Association { .. } => {
                            return Err(missing_identifier(target, leaf));
                        }
                    },
                    None => return Err(missing_identifier(target, leaf)),
                };

                Ok(FieldRef::new(
                    node,
                    vec![(*leaf).to_string(), id_attribute],
                    kind,
                    path,
                ))
            }
        }
    }

    fn lookup(&self, entity: &str, segment: &str, path: &str) -> Result<AttributeInfo, PathError> {
        self.schema
            .attribute(entity, segment)
            .map(|attr| attr.info)
            .ok_or_else(|| PathError::UnknownAttribute {
                entity: entity.to_string(),
                segment: segment.to_string(),
                path: path.to_string(),
            })
    }

    fn join(&mut self, from: JoinId, entity: &str, attribute: &str, target: &str) -> JoinId {
        let (id, created) = self.graph.join(from, attribute, target);

        let event = if created {
            ResolveEvent::JoinCreated { entity, attribute }
        } else {
            ResolveEvent::JoinReused { entity, attribute }
        };
        sink::record(&event);

        id
    }
}

fn missing_identifier(entity: String, attribute: &str) -> PathError {
    PathError::MissingIdentifier {
        entity,
        attribute: attribute.to_string(),
    }
}
