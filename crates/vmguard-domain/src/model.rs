use crate::value::{AttrValue, Attributes};

/// One auditable cloud entity, as fetched by the inventory collaborator.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
    /// Unique within one audit run.
    pub id: String,
    pub attributes: Attributes,
}

impl Resource {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::new(),
        }
    }

    pub fn with_attributes(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
        }
    }

    /// Builder-style helper for tests and fixtures.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }
}
