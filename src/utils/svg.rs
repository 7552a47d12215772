//! Dependency-free SVG rendering of planner snapshots

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::common::{PlannerError, TreeObserver};
use crate::path_planning::TreeSnapshot;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 640.0;
const MARGIN: f64 = 40.0;

/// Render a snapshot as a standalone SVG document.
pub fn render_svg(snapshot: &TreeSnapshot<'_>) -> String {
    let b = snapshot.bounds;
    let scale_x = (WIDTH - 2.0 * MARGIN) / b.width();
    let scale_y = (HEIGHT - 2.0 * MARGIN) / b.height();
    let scale = scale_x.min(scale_y);

    let tx = |x: f64| -> f64 { MARGIN + (x - b.xmin) * scale };
    let ty = |y: f64| -> f64 { HEIGHT - MARGIN - (y - b.ymin) * scale };

    let mut svg = String::new();

    // writing into a String cannot fail
    let _ = write!(
        svg,
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <rect width="100%" height="100%" fill="white"/>
  <text x="{cx}" y="25" text-anchor="middle" font-family="Arial" font-size="16" font-weight="bold">RT-RRT* ({n} nodes)</text>
"##,
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
        n = snapshot.tree.len()
    );

    for (child, parent) in snapshot.edges() {
        let _ = writeln!(
            svg,
            r##"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#66bb66" stroke-width="0.5"/>"##,
            tx(parent.x),
            ty(parent.y),
            tx(child.x),
            ty(child.y)
        );
    }

    for wall in snapshot.obstacles {
        let _ = writeln!(
            svg,
            r##"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="#000000" stroke-width="3" class="obstacle"/>"##,
            tx(wall.start.x),
            ty(wall.start.y),
            tx(wall.end.x),
            ty(wall.end.y)
        );
    }

    if let Some(path) = snapshot.path.filter(|p| p.len() > 1) {
        let d: Vec<String> = path
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| format!("{} {:.1} {:.1}", if i == 0 { "M" } else { "L" }, tx(p.x), ty(p.y)))
            .collect();
        let _ = writeln!(
            svg,
            r##"  <path d="{}" fill="none" stroke="#ff3300" stroke-width="3"/>"##,
            d.join(" ")
        );
    }

    if let Some(sample) = snapshot.sample {
        let _ = writeln!(
            svg,
            r##"  <circle cx="{:.1}" cy="{:.1}" r="4" fill="#ffcc00" class="sample"/>"##,
            tx(sample.x),
            ty(sample.y)
        );
    }

    let _ = writeln!(
        svg,
        r##"  <rect x="{:.1}" y="{:.1}" width="10" height="10" fill="#0066ff" class="start"/>"##,
        tx(snapshot.start.x) - 5.0,
        ty(snapshot.start.y) - 5.0
    );

    if let Some(root) = snapshot.root() {
        let _ = writeln!(
            svg,
            r##"  <circle cx="{:.1}" cy="{:.1}" r="8" fill="#0066ff" stroke="#003388" stroke-width="2" class="root"/>"##,
            tx(root.x),
            ty(root.y)
        );
    }

    let _ = writeln!(
        svg,
        r##"  <circle cx="{:.1}" cy="{:.1}" r="8" fill="#ff3300" stroke="#aa2200" stroke-width="2" class="goal"/>"##,
        tx(snapshot.goal.x),
        ty(snapshot.goal.y)
    );

    svg.push_str("</svg>\n");
    svg
}

/// Writes every observed snapshot to `{dir}/frame_{n:05}.svg`
#[derive(Debug, Clone)]
pub struct SvgRecorder {
    dir: PathBuf,
    frame: usize,
}

impl SvgRecorder {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            frame: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.frame
    }
}

impl TreeObserver for SvgRecorder {
    fn observe(&mut self, snapshot: &TreeSnapshot<'_>) -> Result<(), PlannerError> {
        std::fs::create_dir_all(&self.dir)?;
        let filename = self.dir.join(format!("frame_{:05}.svg", self.frame));
        std::fs::write(&filename, render_svg(snapshot))?;
        log::debug!("Snapshot saved to {}", filename.display());
        self.frame += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{AreaBounds, Path2D, Point2D, Segment};
    use crate::path_planning::Tree;

    #[test]
    fn test_render_counts_elements() {
        let mut tree = Tree::with_root(Point2D::new(0.0, 0.0));
        tree.push(Point2D::new(1.0, 0.0), Some(0));
        tree.push(Point2D::new(2.0, 0.0), Some(1));
        let walls = [Segment::from((1.5, -1.0, 1.5, -0.5))];
        let path = Path2D::from_points(vec![Point2D::new(0.0, 0.0), Point2D::new(2.0, 0.0)]);
        let snapshot = TreeSnapshot {
            tree: &tree,
            obstacles: &walls,
            bounds: AreaBounds::new(-1.0, 3.0, -1.0, 1.0),
            start: Point2D::new(0.0, 0.0),
            goal: Point2D::new(2.5, 0.0),
            sample: Some(Point2D::new(0.5, 0.5)),
            path: Some(&path),
        };

        let svg = render_svg(&snapshot);

        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line").count(), 3);
        assert_eq!(svg.matches("class=\"obstacle\"").count(), 1);
        assert_eq!(svg.matches("<path").count(), 1);
        assert!(svg.contains("class=\"sample\""));
        assert!(svg.contains("class=\"root\""));
        assert_eq!(svg.matches("class=\"start\"").count(), 1);
        assert!(svg.contains("(3 nodes)"));
    }

    #[test]
    fn test_recorder_writes_frames() {
        let dir = std::env::temp_dir().join(format!("rt_rrt_star_svg_{}", std::process::id()));
        let tree = Tree::with_root(Point2D::new(0.0, 0.0));
        let snapshot = TreeSnapshot {
            tree: &tree,
            obstacles: &[],
            bounds: AreaBounds::new(-1.0, 1.0, -1.0, 1.0),
            start: Point2D::new(0.0, 0.0),
            goal: Point2D::new(0.5, 0.5),
            sample: None,
            path: None,
        };

        let mut recorder = SvgRecorder::new(&dir);
        recorder.observe(&snapshot).unwrap();
        recorder.observe(&snapshot).unwrap();

        assert_eq!(recorder.frames(), 2);
        assert!(dir.join("frame_00001.svg").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
