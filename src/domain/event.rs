//! Structural events emitted by insertion.

use std::fmt;

use serde::Serialize;

/// Direction of a single rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// Which of the four rebalancing cases fired.
///
/// The double cases emit two `Rotated` events carrying the same case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RebalanceCase {
    LeftLeft,
    RightRight,
    LeftRight,
    RightLeft,
}

impl fmt::Display for RebalanceCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RebalanceCase::LeftLeft => "Left-Left",
            RebalanceCase::RightRight => "Right-Right",
            RebalanceCase::LeftRight => "Left-Right",
            RebalanceCase::RightLeft => "Right-Left",
        };
        f.write_str(label)
    }
}

/// One observable change made by `AvlTree::insert_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructuralEvent<K> {
    /// A node was created for `value`.
    Inserted { value: K },
    /// `new_parent` was lifted above `pivot`.
    Rotated {
        direction: Direction,
        pivot: K,
        new_parent: K,
        case: RebalanceCase,
        description: String,
    },
}

impl<K: fmt::Display> StructuralEvent<K> {
    pub(crate) fn rotated(
        direction: Direction,
        pivot: K,
        new_parent: K,
        case: RebalanceCase,
    ) -> Self {
        let description = match direction {
            Direction::Right => {
                format!("Right rotation: {} becomes parent of {}", new_parent, pivot)
            }
            Direction::Left => {
                format!("Left rotation: {} becomes parent of {}", new_parent, pivot)
            }
        };
        StructuralEvent::Rotated {
            direction,
            pivot,
            new_parent,
            case,
            description,
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, StructuralEvent::Rotated { .. })
    }
}

impl<K: fmt::Display> fmt::Display for StructuralEvent<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralEvent::Inserted { value } => write!(f, "Inserted node: {}", value),
            StructuralEvent::Rotated {
                case, description, ..
            } => write!(f, "[{}] {}", case, description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_right_rotation_then_description_names_new_parent_first() {
        let event = StructuralEvent::rotated(Direction::Right, 30, 20, RebalanceCase::LeftLeft);
        match event {
            StructuralEvent::Rotated { description, .. } => {
                assert_eq!(description, "Right rotation: 20 becomes parent of 30")
            }
            _ => panic!("expected rotation"),
        }
    }

    #[test]
    fn given_events_when_serialized_then_tagged_by_type() {
        let inserted = serde_json::to_value(StructuralEvent::Inserted { value: 5 }).unwrap();
        assert_eq!(inserted["type"], "inserted");
        assert_eq!(inserted["value"], 5);

        let rotated = serde_json::to_value(StructuralEvent::rotated(
            Direction::Left,
            10,
            20,
            RebalanceCase::RightRight,
        ))
        .unwrap();
        assert_eq!(rotated["type"], "rotated");
        assert_eq!(rotated["direction"], "left");
        assert_eq!(rotated["case"], "right-right");
    }
}
