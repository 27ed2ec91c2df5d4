//! Process-wide drawing resources, acquired when the simulator loads the
//! module and released when it unloads it.

use log::{debug, info};

use crate::errors::VesselError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontSpec {
    pub face: &'static str,
    /// Negative values request character height rather than cell height.
    pub height: i32,
    pub width: i32,
    pub weight: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PenSpec {
    pub style: PenStyle,
    pub width: i32,
    pub color: Rgb,
}

/// Opaque handle to a graphics object owned by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GdiHandle(pub u64);

pub trait GraphicsHost {
    fn create_font(&mut self, font: &FontSpec) -> Option<GdiHandle>;
    fn create_pen(&mut self, pen: &PenSpec) -> Option<GdiHandle>;
    fn create_brush(&mut self, color: Rgb) -> Option<GdiHandle>;
    fn release(&mut self, handle: GdiHandle);
}

/// Font, pen and brush used for every HUD message of this vessel class.
#[derive(Debug, Clone, PartialEq)]
pub struct HudStyle {
    pub font: GdiHandle,
    pub pen: GdiHandle,
    pub brush: GdiHandle,
    pub text_color: Rgb,
}

impl HudStyle {
    pub fn font_spec() -> FontSpec {
        FontSpec {
            face: "Haettenschweiler",
            height: -20,
            width: 3,
            weight: 150,
        }
    }

    pub fn pen_spec() -> PenSpec {
        PenSpec {
            style: PenStyle::Solid,
            width: 3,
            color: Rgb(120, 220, 120),
        }
    }

    pub fn brush_color() -> Rgb {
        Rgb(0, 128, 0)
    }
}

pub struct VesselModule {
    style: HudStyle,
}

impl VesselModule {
    pub fn init(gfx: &mut dyn GraphicsHost) -> Result<Self, VesselError> {
        let font = gfx
            .create_font(&HudStyle::font_spec())
            .ok_or_else(|| VesselError::InitializationError("HUD font".to_string()))?;

        let pen = match gfx.create_pen(&HudStyle::pen_spec()) {
            Some(pen) => pen,
            None => {
                gfx.release(font);
                return Err(VesselError::InitializationError("HUD pen".to_string()));
            }
        };

        let brush = match gfx.create_brush(HudStyle::brush_color()) {
            Some(brush) => brush,
            None => {
                gfx.release(pen);
                gfx.release(font);
                return Err(VesselError::InitializationError("HUD brush".to_string()));
            }
        };

        info!("Vessel module loaded");
        Ok(VesselModule {
            style: HudStyle {
                font,
                pen,
                brush,
                text_color: HudStyle::pen_spec().color,
            },
        })
    }

    pub fn style(&self) -> &HudStyle {
        &self.style
    }

    /// Hands every resource back to the simulator. Consumes the module so the
    /// style can no longer be borrowed afterwards.
    pub fn exit(self, gfx: &mut dyn GraphicsHost) {
        for handle in [self.style.brush, self.style.pen, self.style.font] {
            debug!("Releasing graphics handle {:?}", handle);
            gfx.release(handle);
        }
        info!("Vessel module unloaded");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingGraphics {
        next: u64,
        fail_brush: bool,
        live: Vec<GdiHandle>,
    }

    impl CountingGraphics {
        fn allocate(&mut self) -> Option<GdiHandle> {
            self.next += 1;
            let handle = GdiHandle(self.next);
            self.live.push(handle);
            Some(handle)
        }
    }

    impl GraphicsHost for CountingGraphics {
        fn create_font(&mut self, _font: &FontSpec) -> Option<GdiHandle> {
            self.allocate()
        }

        fn create_pen(&mut self, _pen: &PenSpec) -> Option<GdiHandle> {
            self.allocate()
        }

        fn create_brush(&mut self, _color: Rgb) -> Option<GdiHandle> {
            if self.fail_brush {
                None
            } else {
                self.allocate()
            }
        }

        fn release(&mut self, handle: GdiHandle) {
            self.live.retain(|live| *live != handle);
        }
    }

    #[test]
    fn test_init_and_exit_balance() {
        let mut gfx = CountingGraphics::default();
        let module = VesselModule::init(&mut gfx).unwrap();
        assert_eq!(gfx.live.len(), 3);
        assert_eq!(module.style().text_color, Rgb(120, 220, 120));

        module.exit(&mut gfx);
        assert!(gfx.live.is_empty());
    }

    #[test]
    fn test_partial_init_releases_what_it_took() {
        let mut gfx = CountingGraphics {
            fail_brush: true,
            ..Default::default()
        };
        let result = VesselModule::init(&mut gfx);
        assert!(matches!(result, Err(VesselError::InitializationError(_))));
        assert!(gfx.live.is_empty());
    }

    #[test]
    fn test_style_specs() {
        let font = HudStyle::font_spec();
        assert_eq!(font.face, "Haettenschweiler");
        assert_eq!((font.height, font.width, font.weight), (-20, 3, 150));
        assert_eq!(HudStyle::brush_color(), Rgb(0, 128, 0));
    }
}
