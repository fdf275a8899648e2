//! Discrete, non-periodic occurrences such as detected events.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;
use crate::value::Parameter;

macro_rules! define_entity_list {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            pub entities: Vec<EntityId>,
        }

        impl $name {
            #[must_use]
            pub fn new(entities: Vec<EntityId>) -> Self {
                Self { entities }
            }

            #[must_use]
            pub fn contains(&self, entity_id: EntityId) -> bool {
                self.entities.contains(&entity_id)
            }
        }

        impl From<Vec<EntityId>> for $name {
            fn from(entities: Vec<EntityId>) -> Self {
                Self { entities }
            }
        }

        impl<const N: usize> From<[usize; N]> for $name {
            fn from(ids: [usize; N]) -> Self {
                Self {
                    entities: ids.into_iter().map(EntityId).collect(),
                }
            }
        }
    };
}

define_entity_list!(
    /// Entities causing an occurrence.
    TriggeringEntities
);
define_entity_list!(
    /// Entities affected by an occurrence.
    AffectedEntities
);

/// An acyclic occurrence. Equality is structural over all four fields.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acyclic {
    /// Name (or identifier) of this occurrence
    pub name: String,
    pub triggering_entities: TriggeringEntities,
    pub affected_entities: AffectedEntities,
    /// Generic parameter set associated with this occurrence
    pub parameter: Parameter,
}

impl Acyclic {
    pub fn new(
        name: impl Into<String>,
        triggering_entities: impl Into<TriggeringEntities>,
        affected_entities: impl Into<AffectedEntities>,
        parameter: Parameter,
    ) -> Self {
        Self {
            name: name.into(),
            triggering_entities: triggering_entities.into(),
            affected_entities: affected_entities.into(),
            parameter,
        }
    }

    /// An occurrence triggered by a single entity and affecting nobody in particular.
    pub fn with_entity(name: impl Into<String>, entity_id: EntityId, parameter: Parameter) -> Self {
        Self {
            name: name.into(),
            triggering_entities: TriggeringEntities::new(vec![entity_id]),
            affected_entities: AffectedEntities::default(),
            parameter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn params(name: &str, value: impl Into<Value>) -> Parameter {
        Parameter::from([(name.to_string(), value.into())])
    }

    #[test]
    fn equality_covers_all_fields() {
        let event = Acyclic::new("name", [0, 1], [2, 3], params("param1", 1));
        assert_eq!(event, Acyclic::new("name", [0, 1], [2, 3], params("param1", 1)));
        assert_ne!(event, Acyclic::new("other", [0, 1], [2, 3], params("param1", 1)));
        assert_ne!(event, Acyclic::new("name", [1, 0], [2, 3], params("param1", 1)));
        assert_ne!(event, Acyclic::new("name", [0, 1], [2], params("param1", 1)));
        assert_ne!(event, Acyclic::new("name", [0, 1], [2, 3], params("param1", 2)));
    }

    #[test]
    fn parameter_equality_ignores_insertion_order() {
        let mut first = Parameter::new();
        first.insert("a".to_string(), Value::from(1));
        first.insert("b".to_string(), Value::from(2.0));
        let mut second = Parameter::new();
        second.insert("b".to_string(), Value::from(2.0));
        second.insert("a".to_string(), Value::from(1));
        assert_eq!(
            Acyclic::new("name", [0], [1], first),
            Acyclic::new("name", [0], [1], second)
        );
    }

    #[test]
    fn with_entity_sets_single_trigger() {
        let event = Acyclic::with_entity("Collision", EntityId(4), Parameter::new());
        assert_eq!(event.triggering_entities.entities, vec![EntityId(4)]);
        assert!(event.triggering_entities.contains(EntityId(4)));
        assert!(event.affected_entities.entities.is_empty());
    }
}
