use crate::error::RenderError;
use glam::Mat4;
use pickscene_common::{Rgba, Viewport};
use std::fmt::Write as _;

/// Immediate-mode draw context for one frame.
///
/// Calls arrive in frame order: `begin_frame`, then any number of
/// `set_projection` / `set_model_view` / `draw_triangles`, then `present`.
/// Matrix state persists between draws until overwritten.
pub trait DrawBackend {
    /// Size the target to `viewport` and clear the color buffer.
    fn begin_frame(&mut self, viewport: Viewport, clear_color: Rgba);

    fn set_projection(&mut self, projection: Mat4);

    fn set_model_view(&mut self, model_view: Mat4);

    /// Submit a triangle list. `positions` holds 3 floats and `colors` 4
    /// floats per vertex; `vertex_count` is a multiple of three.
    fn draw_triangles(&mut self, positions: &[f32], colors: &[f32], vertex_count: usize);

    /// Finish the frame and show it.
    fn present(&mut self) -> Result<(), RenderError>;
}

/// A draw call as seen by [`CommandRecorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginFrame { viewport: Viewport, clear_color: Rgba },
    SetProjection(Mat4),
    SetModelView(Mat4),
    DrawTriangles {
        positions: Vec<f32>,
        colors: Vec<f32>,
        vertex_count: usize,
    },
    Present,
}

/// Draw backend that records every call instead of touching a device.
///
/// Used by tests and the headless driver. `frames_presented` counts completed
/// frames; `commands` holds the calls of the current or most recent frame.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<DrawCommand>,
    frames_presented: u64,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Drop recorded commands, keeping the frame counter.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Draw calls recorded so far.
    pub fn draw_calls(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawTriangles { .. }))
    }

    /// Human-readable listing of the recorded commands.
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Draw log (frames={}, commands={}) ===",
            self.frames_presented,
            self.commands.len()
        );
        for command in &self.commands {
            let _ = match command {
                DrawCommand::BeginFrame {
                    viewport,
                    clear_color,
                } => writeln!(
                    out,
                    "  begin {}x{} clear=({:.2}, {:.2}, {:.2}, {:.2})",
                    viewport.width,
                    viewport.height,
                    clear_color.r,
                    clear_color.g,
                    clear_color.b,
                    clear_color.a
                ),
                DrawCommand::SetProjection(m) => {
                    writeln!(out, "  projection sx={:.3} sy={:.3}", m.x_axis.x, m.y_axis.y)
                }
                DrawCommand::SetModelView(m) => writeln!(
                    out,
                    "  model_view t=({:.2}, {:.2}, {:.2})",
                    m.w_axis.x, m.w_axis.y, m.w_axis.z
                ),
                DrawCommand::DrawTriangles { vertex_count, .. } => {
                    writeln!(out, "  draw triangles vertices={vertex_count}")
                }
                DrawCommand::Present => writeln!(out, "  present"),
            };
        }
        out
    }
}

impl DrawBackend for CommandRecorder {
    fn begin_frame(&mut self, viewport: Viewport, clear_color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::BeginFrame {
            viewport,
            clear_color,
        });
    }

    fn set_projection(&mut self, projection: Mat4) {
        self.commands.push(DrawCommand::SetProjection(projection));
    }

    fn set_model_view(&mut self, model_view: Mat4) {
        self.commands.push(DrawCommand::SetModelView(model_view));
    }

    fn draw_triangles(&mut self, positions: &[f32], colors: &[f32], vertex_count: usize) {
        self.commands.push(DrawCommand::DrawTriangles {
            positions: positions.to_vec(),
            colors: colors.to_vec(),
            vertex_count,
        });
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.commands.push(DrawCommand::Present);
        self.frames_presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_keeps_call_order() {
        let mut rec = CommandRecorder::new();
        rec.begin_frame(Viewport::new(4, 2), Rgba::BLACK);
        rec.set_projection(Mat4::IDENTITY);
        rec.draw_triangles(&[0.0; 9], &[1.0; 12], 3);
        rec.present().unwrap();

        assert_eq!(rec.commands().len(), 4);
        assert!(matches!(rec.commands()[0], DrawCommand::BeginFrame { .. }));
        assert_eq!(rec.commands()[3], DrawCommand::Present);
        assert_eq!(rec.draw_calls().count(), 1);
        assert_eq!(rec.frames_presented(), 1);
    }

    #[test]
    fn new_frame_replaces_previous_commands() {
        let mut rec = CommandRecorder::new();
        for width in [10, 20, 30] {
            rec.begin_frame(Viewport::new(width, 10), Rgba::BLACK);
            rec.draw_triangles(&[0.0; 9], &[1.0; 12], 3);
            rec.present().unwrap();
            assert_eq!(rec.commands().len(), 3);
        }
        assert_eq!(rec.frames_presented(), 3);
        assert_eq!(
            rec.commands()[0],
            DrawCommand::BeginFrame {
                viewport: Viewport::new(30, 10),
                clear_color: Rgba::BLACK,
            }
        );
        assert!(rec.summary().contains("frames=3, commands=3"));
    }

    #[test]
    fn clear_keeps_frame_counter() {
        let mut rec = CommandRecorder::new();
        rec.present().unwrap();
        rec.clear();
        assert!(rec.commands().is_empty());
        assert_eq!(rec.frames_presented(), 1);
    }

    #[test]
    fn summary_lists_commands() {
        let mut rec = CommandRecorder::new();
        rec.begin_frame(Viewport::new(800, 600), Rgba::BLACK);
        rec.draw_triangles(&[0.0; 9], &[1.0; 12], 3);
        rec.present().unwrap();

        let text = rec.summary();
        assert!(text.contains("frames=1"));
        assert!(text.contains("begin 800x600"));
        assert!(text.contains("vertices=3"));
        assert!(text.contains("present"));
    }
}
