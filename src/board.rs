use crate::force::{Force, draw_text, to_abgr, to_vec};
use rforce::vector::Vec2;
use sdl2::gfx::primitives::DrawRenderer;
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::Canvas;
use sdl2::ttf::Font;
use sdl2::video::Window;

// Interaction tuning. Radii and thresholds are usability heuristics.
pub const CENTER_RADIUS: f64 = 30.0;
pub const HIT_TOLERANCE: f64 = 10.0;
pub const ENDPOINT_GRAB_RADIUS: f64 = 15.0;
pub const MIN_FORCE_LENGTH: f64 = 10.0;

const GRID_STEP: i32 = 50;
const AXIS_MARGIN: i32 = 50;
const CROSS_SIZE: i16 = 8;
const RESULTANT_WIDTH: u8 = 4;
const RESULTANT_ARROW_LENGTH: f64 = 20.0;
const RESULTANT_ARROW_ANGLE: f64 = std::f64::consts::PI / 6.0;
const MIN_RESULTANT_ARROW: f64 = 10.0;

const RESULTANT_COLOR: Color = Color::RGB(255, 0, 255);
const GRID_COLOR: Color = Color::RGB(200, 200, 200);
const ZONE_COLOR: Color = Color::RGB(200, 200, 255);
const GRAY: Color = Color::RGB(128, 128, 128);

pub const PALETTE: [Color; 6] = [
    Color::RGB(255, 0, 0),
    Color::RGB(0, 0, 255),
    Color::RGB(0, 200, 0),
    Color::RGB(255, 165, 0),
    Color::RGB(128, 0, 128),
    Color::RGB(255, 192, 203),
];

const HELP_LINES: [&str; 5] = [
    "Controls:",
    "Drag: create or move a force",
    "Center zone: new force from origin",
    "Right click: delete a force",
    "C: clear  G: grid  H: components",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Idle,
    Creating { start: [i32; 2] },
    Dragging { offset: [i32; 2] },
}

pub struct Board {
    pub forces: Vec<Force>,
    pub resultant: Option<Vec2>,
    pub selected: Option<usize>,
    gesture: Gesture,
    cursor: [i32; 2],
    color_cursor: usize,
    pub show_grid: bool,
    pub show_components: bool,
    width: u32,
    height: u32,
}

impl Board {
    pub fn new(width: u32, height: u32) -> Board {
        Board {
            forces: Vec::new(),
            resultant: None,
            selected: None,
            gesture: Gesture::Idle,
            cursor: [0, 0],
            color_cursor: 0,
            show_grid: true,
            show_components: true,
            width,
            height,
        }
    }

    fn center(&self) -> [i32; 2] {
        [self.width as i32 / 2, self.height as i32 / 2]
    }

    fn in_center_zone(&self, p: [i32; 2]) -> bool {
        (to_vec(p) - to_vec(self.center())).magnitude() <= CENTER_RADIUS
    }

    fn deselect_all(&mut self) {
        for force in &mut self.forces {
            force.selected = false;
        }
        self.selected = None;
    }

    pub fn selected_force(&self) -> Option<&Force> {
        self.selected.and_then(|idx| self.forces.get(idx))
    }

    pub fn begin_primary_press(&mut self, pos: [i32; 2]) {
        self.cursor = pos;
        // creation zone takes priority over hit-testing
        if self.in_center_zone(pos) {
            self.deselect_all();
            self.gesture = Gesture::Creating { start: pos };
            return;
        }
        let hit = self.forces.iter().position(|force| {
            if !force.contains_point(pos, HIT_TOLERANCE) {
                return false;
            }
            // a force anchored in the creation zone is only grabbed by its tip
            if self.in_center_zone(force.start) {
                return (to_vec(pos) - to_vec(force.end)).magnitude() <= ENDPOINT_GRAB_RADIUS;
            }
            true
        });
        match hit {
            Some(idx) => {
                self.deselect_all();
                self.forces[idx].selected = true;
                self.forces[idx].dragging = true;
                self.selected = Some(idx);
                let [end_x, end_y] = self.forces[idx].end;
                self.gesture = Gesture::Dragging {
                    offset: [pos[0] - end_x, pos[1] - end_y],
                };
            }
            None => {
                self.deselect_all();
                self.gesture = Gesture::Creating { start: pos };
            }
        }
    }

    pub fn end_primary_press(&mut self, pos: [i32; 2]) {
        match self.gesture {
            Gesture::Creating { start } => {
                // ignore drags shorter than the minimum length
                if (to_vec(pos) - to_vec(start)).magnitude() > MIN_FORCE_LENGTH {
                    let color = PALETTE[self.color_cursor % PALETTE.len()];
                    self.forces.push(Force::new(start, pos, Some(color), None));
                    self.color_cursor += 1;
                }
                self.gesture = Gesture::Idle;
            }
            Gesture::Dragging { .. } => {
                if let Some(idx) = self.selected {
                    self.forces[idx].dragging = false;
                }
                self.gesture = Gesture::Idle;
            }
            Gesture::Idle => {}
        }
    }

    pub fn pointer_move(&mut self, pos: [i32; 2]) {
        self.cursor = pos;
        if let Gesture::Dragging { offset } = self.gesture {
            if let Some(idx) = self.selected {
                self.forces[idx].end = [pos[0] - offset[0], pos[1] - offset[1]];
            }
        }
    }

    pub fn delete_at(&mut self, pos: [i32; 2]) {
        let hit = self
            .forces
            .iter()
            .position(|force| force.contains_point(pos, HIT_TOLERANCE));
        let Some(idx) = hit else {
            return;
        };
        self.forces.remove(idx);
        match self.selected {
            Some(selected) if selected == idx => self.selected = None,
            Some(selected) if selected > idx => self.selected = Some(selected - 1),
            _ => {}
        }
    }

    pub fn clear_all(&mut self) {
        self.forces.clear();
        self.selected = None;
        self.gesture = Gesture::Idle;
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    pub fn toggle_components(&mut self) {
        self.show_components = !self.show_components;
    }

    pub fn update(&mut self) {
        self.resultant = self.forces.iter().map(|force| force.vector()).reduce(|a, b| a + b);
    }

    pub fn draw_frame(&self, canvas: &mut Canvas<Window>, font: &Font, title_font: &Font) {
        if self.show_grid {
            self.draw_grid(canvas);
        }
        self.draw_axes(canvas, font);
        self.draw_center_zone(canvas);
        for force in &self.forces {
            force.draw(canvas, font);
            if self.show_components {
                self.draw_components(canvas, force);
            }
        }
        self.draw_resultant(canvas);
        if let Gesture::Creating { start } = self.gesture {
            let _ = canvas.thick_line(
                start[0] as i16,
                start[1] as i16,
                self.cursor[0] as i16,
                self.cursor[1] as i16,
                2,
                to_abgr(Color::RED),
            );
        }
        self.draw_panel(canvas, font, title_font);
        self.draw_help(canvas, font);
    }

    fn draw_grid(&self, canvas: &mut Canvas<Window>) {
        let color = to_abgr(GRID_COLOR);
        for x in (0..self.width as i32).step_by(GRID_STEP as usize) {
            let _ = canvas.vline(x as i16, 0, self.height as i16, color);
        }
        for y in (0..self.height as i32).step_by(GRID_STEP as usize) {
            let _ = canvas.hline(0, self.width as i16, y as i16, color);
        }
    }

    fn draw_axes(&self, canvas: &mut Canvas<Window>, font: &Font) {
        let [cx, cy] = self.center();
        let w = self.width as i32;
        let h = self.height as i32;
        let black = to_abgr(Color::BLACK);

        let _ = canvas.thick_line(AXIS_MARGIN as i16, cy as i16, (w - AXIS_MARGIN) as i16, cy as i16, 2, black);
        let _ = canvas.filled_trigon(
            (w - AXIS_MARGIN) as i16,
            cy as i16,
            (w - AXIS_MARGIN - 10) as i16,
            (cy - 5) as i16,
            (w - AXIS_MARGIN - 10) as i16,
            (cy + 5) as i16,
            black,
        );

        let _ = canvas.thick_line(cx as i16, AXIS_MARGIN as i16, cx as i16, (h - AXIS_MARGIN) as i16, 2, black);
        let _ = canvas.filled_trigon(
            cx as i16,
            AXIS_MARGIN as i16,
            (cx - 5) as i16,
            (AXIS_MARGIN + 10) as i16,
            (cx + 5) as i16,
            (AXIS_MARGIN + 10) as i16,
            black,
        );

        draw_text(canvas, font, "X", w - 40, cy + 10, Color::BLACK);
        draw_text(canvas, font, "Y", cx + 10, 30, Color::BLACK);
    }

    fn draw_center_zone(&self, canvas: &mut Canvas<Window>) {
        let [cx, cy] = self.center();
        let _ = canvas.circle(cx as i16, cy as i16, CENTER_RADIUS as i16, to_abgr(ZONE_COLOR));
        let gray = to_abgr(GRAY);
        let _ = canvas.hline(cx as i16 - CROSS_SIZE, cx as i16 + CROSS_SIZE, cy as i16, gray);
        let _ = canvas.vline(cx as i16, cy as i16 - CROSS_SIZE, cy as i16 + CROSS_SIZE, gray);
    }

    fn draw_components(&self, canvas: &mut Canvas<Window>, force: &Force) {
        let [start_x, start_y] = force.start;
        let [end_x, end_y] = force.end;
        if (end_x - start_x).abs() > 5 {
            let color = to_abgr(force.color);
            let _ = canvas.hline(start_x as i16, end_x as i16, start_y as i16, color);
            let _ = canvas.vline(end_x as i16, start_y as i16, end_y as i16, color);
        }
    }

    fn draw_resultant(&self, canvas: &mut Canvas<Window>) {
        let Some(resultant) = self.resultant else {
            return;
        };
        let [cx, cy] = self.center();
        let end_x = cx as f64 + resultant.x;
        let end_y = cy as f64 + resultant.y;
        let color = to_abgr(RESULTANT_COLOR);
        let _ = canvas.thick_line(cx as i16, cy as i16, end_x as i16, end_y as i16, RESULTANT_WIDTH, color);

        if resultant.magnitude() > MIN_RESULTANT_ARROW {
            let angle = resultant.angle();
            let left_x = end_x - RESULTANT_ARROW_LENGTH * (angle - RESULTANT_ARROW_ANGLE).cos();
            let left_y = end_y - RESULTANT_ARROW_LENGTH * (angle - RESULTANT_ARROW_ANGLE).sin();
            let right_x = end_x - RESULTANT_ARROW_LENGTH * (angle + RESULTANT_ARROW_ANGLE).cos();
            let right_y = end_y - RESULTANT_ARROW_LENGTH * (angle + RESULTANT_ARROW_ANGLE).sin();
            let _ = canvas.filled_trigon(
                end_x as i16,
                end_y as i16,
                left_x as i16,
                left_y as i16,
                right_x as i16,
                right_y as i16,
                color,
            );
        }
    }

    fn draw_panel(&self, canvas: &mut Canvas<Window>, font: &Font, title_font: &Font) {
        let panel = Rect::new(10, 10, 300, 200);
        canvas.set_draw_color(Color::WHITE);
        let _ = canvas.fill_rect(panel);
        canvas.set_draw_color(Color::BLACK);
        let _ = canvas.draw_rect(panel);

        let mut y = 25;
        draw_text(canvas, title_font, "Force Composition", 20, y, Color::BLACK);
        y += 40;
        draw_text(canvas, font, &format!("Forces: {}", self.forces.len()), 20, y, Color::BLACK);
        y += 25;

        if let Some(resultant) = self.resultant {
            let magnitude = format!("Resultant: {:.2} N", resultant.magnitude());
            let direction = format!("Direction: {:.1}°", resultant.angle_degrees());
            draw_text(canvas, font, &magnitude, 20, y, Color::BLACK);
            y += 22;
            draw_text(canvas, font, &direction, 20, y, Color::BLACK);
            y += 27;
        } else {
            draw_text(canvas, font, "No forces", 20, y, GRAY);
            y += 49;
        }

        if let Some(force) = self.selected_force() {
            draw_text(canvas, font, "Selected force:", 20, y, Color::BLACK);
            y += 22;
            draw_text(canvas, font, &format!("Magnitude: {:.2} N", force.magnitude()), 20, y, Color::BLACK);
            y += 22;
            draw_text(canvas, font, &format!("Angle: {:.1}°", force.angle_degrees()), 20, y, Color::BLACK);
        }
    }

    fn draw_help(&self, canvas: &mut Canvas<Window>, font: &Font) {
        let x = self.width as i32 - 270;
        let panel = Rect::new(x - 10, 10, 270, HELP_LINES.len() as u32 * 20 + 20);
        canvas.set_draw_color(Color::WHITE);
        let _ = canvas.fill_rect(panel);
        canvas.set_draw_color(Color::BLACK);
        let _ = canvas.draw_rect(panel);

        for (i, line) in HELP_LINES.iter().enumerate() {
            let color = if i == 0 { Color::BLACK } else { GRAY };
            draw_text(canvas, font, line, x, 20 + i as i32 * 20, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn board() -> Board {
        // center lands on (600, 400)
        Board::new(1200, 800)
    }

    #[test]
    fn zero_length_gesture_creates_nothing() {
        let mut b = board();
        b.begin_primary_press([100, 100]);
        b.end_primary_press([100, 100]);
        assert!(b.forces.is_empty());
    }

    #[test]
    fn gesture_longer_than_minimum_creates_one_force() {
        let mut b = board();
        b.begin_primary_press([100, 100]);
        b.end_primary_press([120, 100]);
        assert_eq!(b.forces.len(), 1);
        let v = b.forces[0].vector();
        assert_relative_eq!(v.x, 20.0);
        assert_relative_eq!(v.y, 0.0);
        assert_relative_eq!(b.forces[0].magnitude(), 20.0);
        assert_relative_eq!(b.forces[0].angle_degrees(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn motion_while_creating_mutates_no_entity() {
        let mut b = board();
        b.begin_primary_press([100, 100]);
        b.pointer_move([500, 500]);
        assert!(b.forces.is_empty());
        b.end_primary_press([500, 500]);
        assert_eq!(b.forces.len(), 1);
        assert_eq!(b.forces[0].start, [100, 100]);
        assert_eq!(b.forces[0].end, [500, 500]);
    }

    #[test]
    fn resultant_is_the_sum_of_all_force_vectors() {
        let mut b = board();
        b.forces.push(Force::new([0, 0], [10, 0], None, None));
        b.forces.push(Force::new([0, 0], [0, 10], None, None));
        b.update();
        let r = b.resultant.unwrap();
        assert_relative_eq!(r.x, 10.0);
        assert_relative_eq!(r.y, 10.0);
        assert_relative_eq!(r.magnitude(), 14.142, epsilon = 1e-3);
        assert_relative_eq!(r.angle_degrees(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn resultant_is_permutation_invariant() {
        let mut a = board();
        a.forces.push(Force::new([0, 0], [30, 10], None, None));
        a.forces.push(Force::new([50, 50], [20, 90], None, None));
        a.forces.push(Force::new([5, 5], [-40, 25], None, None));
        a.update();

        let mut b = board();
        b.forces.push(Force::new([5, 5], [-40, 25], None, None));
        b.forces.push(Force::new([0, 0], [30, 10], None, None));
        b.forces.push(Force::new([50, 50], [20, 90], None, None));
        b.update();

        let ra = a.resultant.unwrap();
        let rb = b.resultant.unwrap();
        assert_relative_eq!(ra.x, rb.x);
        assert_relative_eq!(ra.y, rb.y);
    }

    #[test]
    fn empty_board_has_no_resultant() {
        let mut b = board();
        b.update();
        assert!(b.resultant.is_none());
    }

    #[test]
    fn center_zone_press_starts_creation_over_existing_forces() {
        let mut b = board();
        b.forces.push(Force::new([550, 400], [650, 400], None, None));
        b.forces[0].selected = true;
        b.selected = Some(0);
        b.begin_primary_press([600, 400]);
        assert!(b.selected.is_none());
        assert!(!b.forces[0].selected);
        b.end_primary_press([600, 300]);
        assert_eq!(b.forces.len(), 2);
    }

    #[test]
    fn press_on_segment_selects_and_drags_its_tip() {
        let mut b = board();
        b.forces.push(Force::new([100, 100], [200, 100], None, None));
        b.begin_primary_press([150, 105]);
        assert_eq!(b.selected, Some(0));
        assert!(b.forces[0].selected);
        assert!(b.forces[0].dragging);

        b.pointer_move([300, 205]);
        assert_eq!(b.forces[0].end, [350, 200]);
        assert_eq!(b.forces[0].start, [100, 100]);

        b.end_primary_press([300, 205]);
        assert_eq!(b.forces[0].end, [350, 200]);
        assert!(!b.forces[0].dragging);
        assert_eq!(b.selected, Some(0));
    }

    #[test]
    fn dragging_leaves_other_forces_and_resultant_consistent() {
        let mut b = board();
        b.forces.push(Force::new([100, 100], [200, 100], None, None));
        b.forces.push(Force::new([100, 300], [200, 300], None, None));
        b.begin_primary_press([150, 100]);
        b.pointer_move([150, 150]);
        b.end_primary_press([150, 150]);
        assert_eq!(b.forces[1].end, [200, 300]);
        b.update();
        let r = b.resultant.unwrap();
        let expected = b.forces[0].vector() + b.forces[1].vector();
        assert_relative_eq!(r.x, expected.x);
        assert_relative_eq!(r.y, expected.y);
    }

    #[test]
    fn center_anchored_force_grabs_only_by_its_tip() {
        let mut b = board();
        b.forces.push(Force::new([600, 400], [800, 400], None, None));

        // Body press: no selection, a creation gesture starts instead
        b.begin_primary_press([700, 400]);
        assert!(b.selected.is_none());
        b.end_primary_press([700, 400]);
        assert_eq!(b.forces.len(), 1);

        // Tip press within the grab radius selects
        b.begin_primary_press([790, 405]);
        assert_eq!(b.selected, Some(0));
    }

    #[test]
    fn first_force_in_insertion_order_wins_the_hit() {
        let mut b = board();
        b.forces.push(Force::new([100, 100], [200, 100], None, None));
        b.forces.push(Force::new([100, 105], [200, 105], None, None));
        b.begin_primary_press([150, 102]);
        assert_eq!(b.selected, Some(0));
    }

    #[test]
    fn delete_at_removes_at_most_one_force() {
        let mut b = board();
        b.forces.push(Force::new([100, 100], [200, 100], None, None));
        b.forces.push(Force::new([100, 105], [200, 105], None, None));
        b.delete_at([150, 102]);
        assert_eq!(b.forces.len(), 1);
        assert_eq!(b.forces[0].end, [200, 105]);
    }

    #[test]
    fn delete_far_from_every_force_is_a_noop() {
        let mut b = board();
        b.forces.push(Force::new([100, 100], [200, 100], None, None));
        b.delete_at([500, 500]);
        assert_eq!(b.forces.len(), 1);
    }

    #[test]
    fn deleting_the_selected_force_clears_the_selection() {
        let mut b = board();
        b.forces.push(Force::new([100, 100], [200, 100], None, None));
        b.begin_primary_press([150, 100]);
        b.end_primary_press([150, 100]);
        assert_eq!(b.selected, Some(0));
        b.delete_at([150, 100]);
        assert!(b.selected.is_none());
        assert!(b.selected_force().is_none());
    }

    #[test]
    fn deleting_an_earlier_force_keeps_the_selection_valid() {
        let mut b = board();
        b.forces.push(Force::new([100, 100], [200, 100], None, None));
        b.forces.push(Force::new([100, 300], [200, 300], None, None));
        b.begin_primary_press([150, 300]);
        b.end_primary_press([150, 300]);
        assert_eq!(b.selected, Some(1));
        b.delete_at([150, 100]);
        assert_eq!(b.selected, Some(0));
        assert_eq!(b.selected_force().unwrap().end, [200, 300]);
    }

    #[test]
    fn clear_all_resets_forces_selection_and_gesture() {
        let mut b = board();
        b.begin_primary_press([100, 100]);
        b.end_primary_press([200, 100]);
        b.begin_primary_press([100, 300]);
        b.clear_all();
        b.update();
        assert!(b.forces.is_empty());
        assert!(b.selected.is_none());
        assert!(b.resultant.is_none());
        // the interrupted creation gesture is gone as well
        b.end_primary_press([400, 400]);
        assert!(b.forces.is_empty());
    }

    #[test]
    fn palette_cycles_through_six_colors() {
        let mut b = board();
        for i in 0..7 {
            let y = 50 + i * 50;
            b.begin_primary_press([100, y]);
            b.end_primary_press([200, y]);
        }
        assert_eq!(b.forces.len(), 7);
        for (i, force) in b.forces.iter().enumerate() {
            assert_eq!(force.color, PALETTE[i % PALETTE.len()]);
        }
        assert_eq!(b.forces[6].color, b.forces[0].color);
    }

    #[test]
    fn toggles_flip_only_display_flags() {
        let mut b = board();
        b.forces.push(Force::new([100, 100], [200, 100], None, None));
        assert!(b.show_grid);
        assert!(b.show_components);
        b.toggle_grid();
        b.toggle_components();
        assert!(!b.show_grid);
        assert!(!b.show_components);
        assert_eq!(b.forces[0].start, [100, 100]);
        assert_eq!(b.forces[0].end, [200, 100]);
        b.toggle_grid();
        assert!(b.show_grid);
    }
}
