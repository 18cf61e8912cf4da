use crate::model::{
    entity::{AttributeKind, EntityModel},
    field::FieldKind,
};
use std::collections::BTreeMap;
use thiserror::Error as ThisError;

///
/// Schema
///
/// Read-only schema graph surface. This is the *only* schema contract the
/// path resolver depends on.
///

pub trait Schema: Send + Sync {
    /// Look up one attribute on an entity type.
    fn attribute(&self, entity: &str, name: &str) -> Option<Attribute>;
}

///
/// Attribute
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub info: AttributeInfo,
}

impl Attribute {
    #[must_use]
    pub const fn is_association(&self) -> bool {
        matches!(self.info, AttributeInfo::Association { .. })
    }
}

///
/// AttributeInfo
///
/// Terminal field type, or association target plus its identifier attribute.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttributeInfo {
    Field(FieldKind),
    Association {
        target: String,
        id_attribute: String,
    },
}

///
/// StaticSchema
///
/// In-memory schema description built from `EntityModel`s.
///

#[derive(Clone, Debug, Default)]
pub struct StaticSchema {
    entities: BTreeMap<String, EntityModel>,
}

impl StaticSchema {
    /// Build a schema and validate its association graph.
    pub fn new(entities: impl IntoIterator<Item = EntityModel>) -> Result<Self, SchemaError> {
        let mut map = BTreeMap::new();
        for entity in entities {
            if map.contains_key(&entity.name) {
                return Err(SchemaError::DuplicateEntity { entity: entity.name });
            }
            map.insert(entity.name.clone(), entity);
        }

        let schema = Self { entities: map };
        schema.validate()?;

        Ok(schema)
    }

    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&EntityModel> {
        self.entities.get(name)
    }

    fn validate(&self) -> Result<(), SchemaError> {
        for entity in self.entities.values() {
            match entity.attribute(&entity.id_attribute).map(|attr| &attr.kind) {
                Some(AttributeKind::Field(_)) => {}
                Some(AttributeKind::Association { .. }) | None => {
                    return Err(SchemaError::InvalidIdentifier {
                        entity: entity.name.clone(),
                        attribute: entity.id_attribute.clone(),
                    });
                }
            }

            let mut seen = std::collections::BTreeSet::new();
            for attr in &entity.attributes {
                if !seen.insert(attr.name.as_str()) {
                    return Err(SchemaError::DuplicateAttribute {
                        entity: entity.name.clone(),
                        attribute: attr.name.clone(),
                    });
                }

                if let AttributeKind::Association { target } = &attr.kind
                    && !self.entities.contains_key(target)
                {
                    return Err(SchemaError::UnknownTarget {
                        entity: entity.name.clone(),
                        attribute: attr.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl Schema for StaticSchema {
    fn attribute(&self, entity: &str, name: &str) -> Option<Attribute> {
        let attr = self.entities.get(entity)?.attribute(name)?;

        let info = match &attr.kind {
            AttributeKind::Field(kind) => AttributeInfo::Field(kind.clone()),
            AttributeKind::Association { target } => AttributeInfo::Association {
                target: target.clone(),
                id_attribute: self.entities.get(target)?.id_attribute.clone(),
            },
        };

        Some(Attribute {
            name: attr.name.clone(),
            info,
        })
    }
}

///
/// SchemaError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("duplicate entity '{entity}'")]
    DuplicateEntity { entity: String },

    #[error("duplicate attribute '{attribute}' on '{entity}'")]
    DuplicateAttribute { entity: String, attribute: String },

    #[error("identifier '{attribute}' on '{entity}' must be a terminal attribute")]
    InvalidIdentifier { entity: String, attribute: String },

    #[error("association '{attribute}' on '{entity}' targets unknown entity '{target}'")]
    UnknownTarget {
        entity: String,
        attribute: String,
        target: String,
    },
}
