use std::fmt;

use glam::Vec3;

use super::{BvhPrimitive, BvhPrimitiveId};
use crate::BoundingBox;

/// Node of the tree under construction.
#[derive(Clone, Copy, Debug)]
pub enum BvhNode {
    Internal {
        bounds: BoundingBox,
        center: Vec3,
        left_id: BvhNodeId,
        right_id: BvhNodeId,
        parent_id: Option<BvhNodeId>,
    },

    Leaf {
        bounds: BoundingBox,
        center: Vec3,
        primitive_id: BvhPrimitiveId,
        parent_id: Option<BvhNodeId>,
    },
}

impl BvhNode {
    pub fn leaf(primitive: &BvhPrimitive) -> Self {
        BvhNode::Leaf {
            bounds: primitive.bounds,
            center: primitive.center,
            primitive_id: primitive.id,
            parent_id: None,
        }
    }

    pub fn internal(
        bounds: BoundingBox,
        left_id: BvhNodeId,
        right_id: BvhNodeId,
    ) -> Self {
        BvhNode::Internal {
            bounds,
            center: bounds.center(),
            left_id,
            right_id,
            parent_id: None,
        }
    }

    pub fn bounds(&self) -> BoundingBox {
        match self {
            BvhNode::Internal { bounds, .. } => *bounds,
            BvhNode::Leaf { bounds, .. } => *bounds,
        }
    }

    pub fn center(&self) -> Vec3 {
        match self {
            BvhNode::Internal { center, .. } => *center,
            BvhNode::Leaf { center, .. } => *center,
        }
    }

    pub fn parent_id(&self) -> Option<BvhNodeId> {
        match self {
            BvhNode::Internal { parent_id, .. } => *parent_id,
            BvhNode::Leaf { parent_id, .. } => *parent_id,
        }
    }

    pub fn set_parent_id(&mut self, id: BvhNodeId) {
        match self {
            BvhNode::Internal { parent_id, .. } => *parent_id = Some(id),
            BvhNode::Leaf { parent_id, .. } => *parent_id = Some(id),
        }
    }

    pub fn children(&self) -> Option<(BvhNodeId, BvhNodeId)> {
        if let BvhNode::Internal {
            left_id, right_id, ..
        } = self
        {
            Some((*left_id, *right_id))
        } else {
            None
        }
    }

    pub fn primitive_id(&self) -> Option<BvhPrimitiveId> {
        if let BvhNode::Leaf { primitive_id, .. } = self {
            Some(*primitive_id)
        } else {
            None
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, BvhNode::Leaf { .. })
    }
}

/// Index into the construction arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BvhNodeId(u32);

impl BvhNodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BvhNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
