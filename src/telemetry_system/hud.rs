use crate::module::HudStyle;

/// Drawing surface handed to the vessel during the HUD callback.
pub trait HudCanvas {
    fn select_style(&mut self, style: &HudStyle);
    fn text(&mut self, x: i32, y: i32, text: &str);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudChannel {
    text: String,
    remaining: f64,
}

impl HudChannel {
    pub fn post(&mut self, text: impl Into<String>, duration: f64) {
        self.text = text.into();
        self.remaining = duration;
    }

    pub fn text(&self) -> Option<&str> {
        (self.remaining > 0.0).then_some(self.text.as_str())
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    fn draw(&mut self, canvas: &mut dyn HudCanvas, x: i32, y: i32, elapsed: f64) {
        if self.remaining > 0.0 {
            canvas.text(x, y, &self.text);
            self.remaining = (self.remaining - elapsed).max(0.0);
        }
    }
}

/// Crew and cargo message lines shown on the HUD.
#[derive(Debug, Clone)]
pub struct HudMessages {
    pub crew: HudChannel,
    pub cargo: HudChannel,
    duration: f64,
}

impl HudMessages {
    pub fn new(duration: f64) -> Self {
        HudMessages {
            crew: HudChannel::default(),
            cargo: HudChannel::default(),
            duration,
        }
    }

    pub fn post_crew(&mut self, text: impl Into<String>) {
        self.crew.post(text, self.duration);
    }

    pub fn post_cargo(&mut self, text: impl Into<String>) {
        self.cargo.post(text, self.duration);
    }

    /// Draws live channels and counts them down by `elapsed`. Rows follow the
    /// simulator's 60-line HUD grid.
    pub fn draw(&mut self, canvas: &mut dyn HudCanvas, style: &HudStyle, height: i32, elapsed: f64) {
        if self.crew.text().is_none() && self.cargo.text().is_none() {
            return;
        }
        canvas.select_style(style);
        let row = height / 60;
        self.crew.draw(canvas, 5, row * 25, elapsed);
        self.cargo.draw(canvas, 5, row * 20, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{GdiHandle, Rgb};

    #[derive(Default)]
    struct RecordingCanvas {
        styled: usize,
        lines: Vec<(i32, i32, String)>,
    }

    impl HudCanvas for RecordingCanvas {
        fn select_style(&mut self, _style: &HudStyle) {
            self.styled += 1;
        }

        fn text(&mut self, x: i32, y: i32, text: &str) {
            self.lines.push((x, y, text.to_string()));
        }
    }

    fn style() -> HudStyle {
        HudStyle {
            font: GdiHandle(1),
            pen: GdiHandle(2),
            brush: GdiHandle(3),
            text_color: Rgb(120, 220, 120),
        }
    }

    #[test]
    fn test_message_expires_after_duration() {
        let mut hud = HudMessages::new(15.0);
        let mut canvas = RecordingCanvas::default();
        hud.post_crew("Airlock open");

        for _ in 0..15 {
            hud.draw(&mut canvas, &style(), 600, 1.0);
        }
        assert_eq!(canvas.lines.len(), 15);
        assert_eq!(hud.crew.text(), None);

        hud.draw(&mut canvas, &style(), 600, 1.0);
        assert_eq!(canvas.lines.len(), 15);
    }

    #[test]
    fn test_channel_rows() {
        let mut hud = HudMessages::new(15.0);
        let mut canvas = RecordingCanvas::default();
        hud.post_crew("crew");
        hud.post_cargo("cargo");

        hud.draw(&mut canvas, &style(), 630, 0.1);

        assert_eq!(canvas.styled, 1);
        assert_eq!(
            canvas.lines,
            vec![(5, 250, "crew".to_string()), (5, 200, "cargo".to_string())]
        );
    }

    #[test]
    fn test_repost_resets_countdown() {
        let mut hud = HudMessages::new(15.0);
        let mut canvas = RecordingCanvas::default();
        hud.post_cargo("first");
        hud.draw(&mut canvas, &style(), 600, 10.0);
        hud.post_cargo("second");
        assert_eq!(hud.cargo.remaining(), 15.0);
        assert_eq!(hud.cargo.text(), Some("second"));
    }
}
