use crate::INVALID;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub distance: f32,
    pub primitive_id: u32,
    pub u: f32,
    pub v: f32,
}

impl Hit {
    pub fn none() -> Self {
        Self {
            distance: f32::MAX,
            primitive_id: INVALID,
            u: 0.0,
            v: 0.0,
        }
    }

    pub fn is_some(&self) -> bool {
        self.primitive_id != INVALID
    }

    pub fn is_none(&self) -> bool {
        !self.is_some()
    }
}

impl Default for Hit {
    fn default() -> Self {
        Self::none()
    }
}
