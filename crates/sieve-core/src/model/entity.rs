use crate::model::field::FieldKind;

///
/// EntityModel
/// Runtime metadata for one entity type in the schema graph.
///

#[derive(Clone, Debug)]
pub struct EntityModel {
    /// Stable entity name used as the graph key.
    pub name: String,
    /// Identifier attribute (compared when a path ends on an association).
    pub id_attribute: String,
    /// Ordered attribute list.
    pub attributes: Vec<AttributeModel>,
}

impl EntityModel {
    #[must_use]
    pub fn new(name: impl Into<String>, id_attribute: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id_attribute: id_attribute.into(),
            attributes: Vec::new(),
        }
    }

    /// Append a terminal attribute.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        self.attributes.push(AttributeModel {
            name: name.into(),
            kind: AttributeKind::Field(kind.into()),
        });
        self
    }

    /// Append an association to another entity.
    #[must_use]
    pub fn association(mut self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.attributes.push(AttributeModel {
            name: name.into(),
            kind: AttributeKind::Association {
                target: target.into(),
            },
        });
        self
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeModel> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

///
/// AttributeModel
///

#[derive(Clone, Debug)]
pub struct AttributeModel {
    pub name: String,
    pub kind: AttributeKind,
}

///
/// AttributeKind
///

#[derive(Clone, Debug)]
pub enum AttributeKind {
    Field(FieldKind),
    Association { target: String },
}
