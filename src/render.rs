//! Renderer collaborator interface
//!
//! Renderers receive plain snapshots and never see the body store, so nothing
//! they do (including the display clamp) can feed back into physics.

use glam::Vec2;

use crate::sim::{Body, BodyRole, Viewport};

/// What a renderer needs to draw one body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySnapshot {
    pub id: u32,
    pub role: BodyRole,
    pub pos: Vec2,
    pub radius: f32,
    /// 0xRRGGBB
    pub color: u32,
}

impl BodySnapshot {
    /// `None` for a body whose position is unusable
    pub fn from_body(body: &Body) -> Option<Self> {
        body.pos.is_finite().then(|| Self {
            id: body.id,
            role: body.role,
            pos: body.pos,
            radius: body.radius(),
            color: body.color,
        })
    }

    /// Halo radius: stars glow out to 2r, the planet's atmosphere to 1.5r
    pub fn halo_radius(&self) -> f32 {
        match self.role {
            BodyRole::Star => self.radius * 2.0,
            BodyRole::Planet => self.radius * 1.5,
        }
    }
}

/// Draws one frame of bodies
pub trait Renderer {
    fn render(&mut self, bodies: &[BodySnapshot], viewport: &Viewport);
}

/// Where to draw a body so it stays fully visible (display only)
pub fn display_position(snapshot: &BodySnapshot, viewport: &Viewport) -> Vec2 {
    let margin = snapshot.radius * 2.0;
    let max_x = (viewport.width() - margin).max(margin);
    let max_y = (viewport.height() - margin).max(margin);
    Vec2::new(
        snapshot.pos.x.clamp(margin, max_x),
        snapshot.pos.y.clamp(margin, max_y),
    )
}

/// "#RRGGBB" for a packed colour
pub fn css_color(rgb: u32) -> String {
    format!("#{:06X}", rgb & 0xFF_FFFF)
}

/// "#RRGGBBAA" for a packed colour with alpha
pub fn css_color_alpha(rgb: u32, alpha: u8) -> String {
    format!("#{:06X}{:02X}", rgb & 0xFF_FFFF, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Command, Simulation};

    #[derive(Default)]
    struct RecordingRenderer {
        frames: Vec<Vec<BodySnapshot>>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, bodies: &[BodySnapshot], _viewport: &Viewport) {
            self.frames.push(bodies.to_vec());
        }
    }

    fn snapshot(pos: Vec2, radius: f32) -> BodySnapshot {
        BodySnapshot {
            id: 0,
            role: BodyRole::Star,
            pos,
            radius,
            color: 0xFF5733,
        }
    }

    #[test]
    fn test_display_clamp() {
        let vp = Viewport::new(800.0, 600.0).unwrap();
        let inside = snapshot(Vec2::new(400.0, 300.0), 10.0);
        assert_eq!(display_position(&inside, &vp), inside.pos);

        let outside = snapshot(Vec2::new(-50.0, 900.0), 10.0);
        assert_eq!(display_position(&outside, &vp), Vec2::new(20.0, 580.0));
    }

    #[test]
    fn test_renderer_gets_all_bodies_without_mutating() {
        let mut sim = Simulation::new(8, Viewport::default());
        sim.apply(Command::Randomize, 0.0);
        // Push one body off screen; the display clamp must not move it
        sim.bodies.bodies_mut()[0].pos = Vec2::new(-500.0, -500.0);
        let snapshots = sim.snapshots();
        let mut renderer = RecordingRenderer::default();
        renderer.render(&snapshots, sim.viewport());

        assert_eq!(renderer.frames.len(), 1);
        assert_eq!(renderer.frames[0].len(), 4);
        let shown = display_position(&renderer.frames[0][0], sim.viewport());
        assert!(shown.x > 0.0 && shown.y > 0.0);
        for (snap, body) in renderer.frames[0].iter().zip(sim.bodies().bodies()) {
            assert_eq!(snap.pos, body.pos);
        }
        assert_eq!(sim.bodies().bodies()[0].pos, Vec2::new(-500.0, -500.0));
    }

    #[test]
    fn test_css_colors() {
        assert_eq!(css_color(0x3498DB), "#3498DB");
        assert_eq!(css_color(0x00FF00), "#00FF00");
        assert_eq!(css_color_alpha(0xFF5733, 0xCC), "#FF5733CC");
    }

    #[test]
    fn test_halo_radius() {
        let star = snapshot(Vec2::ZERO, 20.0);
        assert_eq!(star.halo_radius(), 40.0);
        let planet = BodySnapshot { role: BodyRole::Planet, ..star };
        assert_eq!(planet.halo_radius(), 30.0);
    }
}
