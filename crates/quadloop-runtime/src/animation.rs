//! Per-frame uniform values for the animated quad.

/// Horizontal swing amplitude in clip space.
pub const OFFSET_AMPLITUDE: f32 = 0.9;

/// Opaque red.
pub const QUAD_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

/// X offset after `t_secs` seconds: `0.9 * cos(t)`.
pub fn quad_offset_x(t_secs: f32) -> f32 {
    OFFSET_AMPLITUDE * t_secs.cos()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadUniforms {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl QuadUniforms {
    pub fn at(t_secs: f32) -> Self {
        Self {
            position: [quad_offset_x(t_secs), 0.0],
            color: QUAD_COLOR,
        }
    }
}
