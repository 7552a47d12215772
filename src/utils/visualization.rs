//! Visualization utilities for rt_rrt_star
//!
//! Plots planner snapshots with gnuplot. Rendering happens in the caller's
//! loop between planning calls, never inside the timed growth loop.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth, PointSize, PointSymbol};

use crate::common::{PlannerError, Point2D, Segment, TreeObserver};
use crate::path_planning::TreeSnapshot;

/// Color palette for consistent styling
pub mod colors {
    pub const BLACK: &str = "#000000";
    pub const RED: &str = "#FF0000";
    pub const GREEN: &str = "#00AA00";
    pub const BLUE: &str = "#0000FF";
    pub const YELLOW: &str = "#FFCC00";
    pub const GRAY: &str = "#AAAAAA";

    // Semantic colors
    pub const OBSTACLE: &str = BLACK;
    pub const TREE: &str = GREEN;
    pub const START: &str = BLUE;
    pub const GOAL: &str = RED;
    pub const PATH: &str = RED;
    pub const SAMPLE: &str = YELLOW;
}

/// Style for path rendering
#[derive(Debug, Clone)]
pub struct PathStyle {
    pub color: String,
    pub line_width: f64,
    pub caption: String,
}

impl PathStyle {
    pub fn new(color: &str, caption: &str) -> Self {
        Self {
            color: color.to_string(),
            line_width: 2.0,
            caption: caption.to_string(),
        }
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.line_width = width;
        self
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: colors::PATH.to_string(),
            line_width: 2.0,
            caption: "Path".to_string(),
        }
    }
}

/// Where a rendered snapshot goes
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Live gnuplot window, redrawn on every snapshot
    Window,
    /// Numbered SVG frames: `{prefix}_{frame:05}.svg`
    SvgFrames { prefix: String, width: u32, height: u32 },
}

/// gnuplot-backed snapshot renderer
pub struct Visualizer {
    figure: Figure,
    title: String,
    output: Output,
    path_style: PathStyle,
    frame: usize,
}

impl Visualizer {
    pub fn new(output: Output) -> Self {
        Self {
            figure: Figure::new(),
            title: "RT-RRT*".to_string(),
            output,
            path_style: PathStyle::default(),
            frame: 0,
        }
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn set_path_style(&mut self, style: PathStyle) -> &mut Self {
        self.path_style = style;
        self
    }

    /// Number of snapshots rendered so far
    pub fn frames(&self) -> usize {
        self.frame
    }

    /// File the next snapshot goes to, for SVG output
    pub fn next_frame_path(&self) -> Option<String> {
        match &self.output {
            Output::Window => None,
            Output::SvgFrames { prefix, .. } => Some(format!("{}_{:05}.svg", prefix, self.frame)),
        }
    }

    fn draw(&mut self, snapshot: &TreeSnapshot<'_>) {
        self.figure.clear_axes();
        let axes = self.figure.axes2d();

        axes.set_title(&self.title, &[]);
        axes.set_x_label("X [m]", &[]);
        axes.set_y_label("Y [m]", &[]);
        axes.set_x_range(
            AutoOption::Fix(snapshot.bounds.xmin),
            AutoOption::Fix(snapshot.bounds.xmax),
        );
        axes.set_y_range(
            AutoOption::Fix(snapshot.bounds.ymin),
            AutoOption::Fix(snapshot.bounds.ymax),
        );
        axes.set_aspect_ratio(AutoOption::Fix(snapshot.bounds.height() / snapshot.bounds.width()));

        for (child, parent) in snapshot.edges() {
            axes.lines(&[child.x, parent.x], &[child.y, parent.y], &[Color(colors::TREE)]);
        }

        for Segment { start, end } in snapshot.obstacles {
            axes.lines(
                &[start.x, end.x],
                &[start.y, end.y],
                &[Color(colors::OBSTACLE), LineWidth(2.0)],
            );
        }

        if let Some(path) = snapshot.path {
            axes.lines(
                &path.x_coords(),
                &path.y_coords(),
                &[
                    Caption(self.path_style.caption.as_str()),
                    Color(self.path_style.color.as_str()),
                    LineWidth(self.path_style.line_width),
                ],
            );
        }

        let mut marker = |p: Point2D, color: &str, symbol: char, caption: &str| {
            axes.points(
                &[p.x],
                &[p.y],
                &[Caption(caption), Color(color), PointSymbol(symbol), PointSize(1.5)],
            );
        };
        if let Some(sample) = snapshot.sample {
            marker(sample, colors::SAMPLE, '*', "Sample");
        }
        marker(snapshot.start, colors::START, 'S', "Start");
        if let Some(root) = snapshot.root() {
            marker(root, colors::START, 'X', "Root");
        }
        marker(snapshot.goal, colors::GOAL, 'O', "Goal");
    }
}

impl TreeObserver for Visualizer {
    fn observe(&mut self, snapshot: &TreeSnapshot<'_>) -> Result<(), PlannerError> {
        self.draw(snapshot);
        let filename = self.next_frame_path();
        match (&self.output, filename) {
            (Output::SvgFrames { width, height, .. }, Some(filename)) => {
                self.figure
                    .save_to_svg(&filename, *width, *height)
                    .map_err(|e| PlannerError::Visualization(e.to_string()))?;
                log::debug!("Snapshot saved to {}", filename);
            }
            _ => {
                self.figure
                    .show_and_keep_running()
                    .map_err(|e| PlannerError::Visualization(e.to_string()))?;
            }
        }
        self.frame += 1;
        Ok(())
    }
}
