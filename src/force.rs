use rforce::vector::{Vec2, point_segment_distance};
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::ttf::Font;
use sdl2::video::Window;

const ARROW_LENGTH: f64 = 15.0;
const ARROW_ANGLE: f64 = std::f64::consts::PI / 6.0;
const MIN_ARROW_MAGNITUDE: f64 = 10.0;
const LABEL_COLOR: Color = Color::RGB(0, 0, 0);
const LABEL_ANGLE_COLOR: Color = Color::RGB(100, 100, 100);

pub fn to_abgr(color: Color) -> Color {
    Color::RGBA(color.a, color.b, color.g, color.r)
}

pub fn to_vec(p: [i32; 2]) -> Vec2 {
    Vec2::new(p[0] as f64, p[1] as f64)
}

pub fn draw_text(canvas: &mut Canvas<Window>, font: &Font, text: &str, x: i32, y: i32, color: Color) {
    let Ok(surface) = font.render(text).blended(color) else {
        return;
    };
    let texture_creator = canvas.texture_creator();
    let Ok(texture) = texture_creator.create_texture_from_surface(&surface) else {
        return;
    };
    let query = texture.query();
    let _ = canvas.copy(&texture, None, Some(Rect::new(x, y, query.width, query.height)));
}

pub fn draw_text_centered(canvas: &mut Canvas<Window>, font: &Font, text: &str, cx: i32, y: i32, color: Color) {
    let Ok(surface) = font.render(text).blended(color) else {
        return;
    };
    let texture_creator = canvas.texture_creator();
    let Ok(texture) = texture_creator.create_texture_from_surface(&surface) else {
        return;
    };
    let query = texture.query();
    let x = cx - query.width as i32 / 2;
    let _ = canvas.copy(&texture, None, Some(Rect::new(x, y, query.width, query.height)));
}

pub struct Force {
    pub start: [i32; 2],
    pub end: [i32; 2],
    pub color: Color,
    pub scale: f64,
    pub selected: bool,
    pub dragging: bool,
}

impl Force {
    pub fn new(start: [i32; 2], end: [i32; 2], color: Option<Color>, scale: Option<f64>) -> Force {
        let scale = scale.unwrap_or(1.0);
        debug_assert!(scale > 0.0);
        Force {
            start,
            end,
            color: color.unwrap_or(Color::RED),
            scale,
            selected: false,
            dragging: false,
        }
    }

    pub fn vector(&self) -> Vec2 {
        let dx = (self.end[0] - self.start[0]) as f64;
        let dy = (self.end[1] - self.start[1]) as f64;
        Vec2::new(dx / self.scale, dy / self.scale)
    }

    pub fn magnitude(&self) -> f64 {
        self.vector().magnitude()
    }

    pub fn angle_degrees(&self) -> f64 {
        self.vector().angle_degrees()
    }

    pub fn contains_point(&self, p: [i32; 2], tolerance: f64) -> bool {
        point_segment_distance(to_vec(p), to_vec(self.start), to_vec(self.end)) <= tolerance
    }

    pub fn draw(&self, canvas: &mut Canvas<Window>, font: &Font) {
        let [x1, y1] = self.start;
        let [x2, y2] = self.end;
        let width: u8 = if self.selected { 3 } else { 2 };
        let color = to_abgr(self.color);
        let _ = canvas.thick_line(x1 as i16, y1 as i16, x2 as i16, y2 as i16, width, color);
        self.draw_arrow_head(canvas);
        self.draw_label(canvas, font);
    }

    fn draw_arrow_head(&self, canvas: &mut Canvas<Window>) {
        // Too short to fit a tip
        if self.magnitude() < MIN_ARROW_MAGNITUDE {
            return;
        }
        let angle = (to_vec(self.end) - to_vec(self.start)).angle();
        let [tip_x, tip_y] = self.end;
        let left_x = tip_x as f64 - ARROW_LENGTH * (angle - ARROW_ANGLE).cos();
        let left_y = tip_y as f64 - ARROW_LENGTH * (angle - ARROW_ANGLE).sin();
        let right_x = tip_x as f64 - ARROW_LENGTH * (angle + ARROW_ANGLE).cos();
        let right_y = tip_y as f64 - ARROW_LENGTH * (angle + ARROW_ANGLE).sin();
        let _ = canvas.filled_trigon(
            tip_x as i16,
            tip_y as i16,
            left_x as i16,
            left_y as i16,
            right_x as i16,
            right_y as i16,
            to_abgr(self.color),
        );
    }

    fn draw_label(&self, canvas: &mut Canvas<Window>, font: &Font) {
        let mid_x = (self.start[0] + self.end[0]) / 2;
        let mid_y = (self.start[1] + self.end[1]) / 2;

        let backing = Rect::new(mid_x - 30, mid_y - 22, 60, 44);
        canvas.set_draw_color(Color::WHITE);
        let _ = canvas.fill_rect(backing);
        canvas.set_draw_color(Color::BLACK);
        let _ = canvas.draw_rect(backing);

        let magnitude_text = format!("{:.1}N", self.magnitude());
        let angle_text = format!("{:.1}°", self.angle_degrees());
        draw_text_centered(canvas, font, &magnitude_text, mid_x, mid_y - 22, LABEL_COLOR);
        draw_text_centered(canvas, font, &angle_text, mid_x, mid_y, LABEL_ANGLE_COLOR);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn vector_divides_displacement_by_scale() {
        let force = Force::new([100, 100], [120, 140], None, Some(2.0));
        let v = force.vector();
        assert_relative_eq!(v.x, 10.0);
        assert_relative_eq!(v.y, 20.0);
    }

    #[test]
    fn horizontal_force_has_zero_angle() {
        let force = Force::new([100, 100], [120, 100], None, None);
        assert_relative_eq!(force.magnitude(), 20.0);
        assert_relative_eq!(force.angle_degrees(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn contains_point_respects_tolerance() {
        let force = Force::new([0, 0], [100, 0], None, None);
        assert!(force.contains_point([50, 10], 10.0));
        assert!(!force.contains_point([50, 11], 10.0));
        assert!(force.contains_point([0, 0], 10.0));
        assert!(force.contains_point([105, 0], 10.0));
    }

    #[test]
    fn zero_length_force_is_hit_testable() {
        let force = Force::new([40, 40], [40, 40], None, None);
        assert!(force.contains_point([45, 40], 10.0));
        assert!(!force.contains_point([60, 40], 10.0));
    }
}
