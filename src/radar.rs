//! Radar chart data and rendering for a track's feature vector.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Write;

use crate::features::TrackFeatures;

const FILL: &str = "rgba(29, 185, 84, 0.2)";
const STROKE: &str = "rgb(29, 185, 84)";
const GRID: &str = "rgba(255, 255, 255, 0.1)";
const RINGS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct RadarAxis {
    pub label: &'static str,
    pub value: f64,
}

/// A point in chart space, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RadarChart {
    pub axes: Vec<RadarAxis>,
}

impl RadarChart {
    pub fn from_features(features: &TrackFeatures) -> Self {
        let mut axes = vec![
            RadarAxis { label: "Acousticness", value: features.acousticness },
            RadarAxis { label: "Danceability", value: features.danceability },
            RadarAxis { label: "Energy", value: features.energy },
            RadarAxis { label: "Instrumentalness", value: features.instrumentalness },
            RadarAxis { label: "Liveness", value: features.liveness },
            RadarAxis { label: "Speechiness", value: features.speechiness },
        ];
        if let Some(valence) = features.valence {
            axes.push(RadarAxis { label: "Valence", value: valence });
        }
        Self { axes }
    }

    /// Angle of axis `i`: first axis points straight up, then clockwise.
    fn angle(&self, i: usize) -> f64 {
        let n = self.axes.len().max(1) as f64;
        -FRAC_PI_2 + TAU * i as f64 / n
    }

    /// Polygon vertices relative to the chart centre for a given outer radius.
    ///
    /// Radii are clamped to the outer ring; axis values themselves are not modified.
    pub fn vertices(&self, radius: f64) -> Vec<Point> {
        self.axes
            .iter()
            .enumerate()
            .map(|(i, axis)| {
                let r = axis.value.clamp(0.0, 1.0) * radius;
                let angle = self.angle(i);
                Point {
                    x: angle.cos() * r,
                    y: angle.sin() * r,
                }
            })
            .collect()
    }

    /// Renders a standalone SVG document of `size` x `size` pixels.
    pub fn to_svg(&self, size: u32) -> String {
        let size = f64::from(size);
        let c = size / 2.0;
        let radius = size * 0.35;
        let mut svg = String::new();

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            s = size
        );
        let _ = writeln!(svg, r##"<rect width="100%" height="100%" fill="#181818"/>"##);

        for ring in 1..=RINGS {
            let r = radius * ring as f64 / RINGS as f64;
            let points = self.ring_points(c, r);
            let _ = writeln!(
                svg,
                r#"<polygon points="{}" fill="none" stroke="{}"/>"#,
                points, GRID
            );
        }

        for (i, axis) in self.axes.iter().enumerate() {
            let angle = self.angle(i);
            let (x, y) = (c + angle.cos() * radius, c + angle.sin() * radius);
            let _ = writeln!(
                svg,
                r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}"/>"#,
                c, c, x, y, GRID
            );
            let (lx, ly) = (c + angle.cos() * radius * 1.15, c + angle.sin() * radius * 1.15);
            let _ = writeln!(
                svg,
                r#"<text x="{:.2}" y="{:.2}" fill="white" font-size="12" text-anchor="middle">{}</text>"#,
                lx, ly, axis.label
            );
        }

        let polygon = self
            .vertices(radius)
            .iter()
            .map(|p| format!("{:.2},{:.2}", c + p.x, c + p.y))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(
            svg,
            r#"<polygon points="{}" fill="{}" stroke="{}" stroke-width="1"/>"#,
            polygon, FILL, STROKE
        );
        svg.push_str("</svg>\n");
        svg
    }

    fn ring_points(&self, c: f64, r: f64) -> String {
        (0..self.axes.len())
            .map(|i| {
                let angle = self.angle(i);
                format!("{:.2},{:.2}", c + angle.cos() * r, c + angle.sin() * r)
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One bar per axis, `width` cells wide.
    pub fn to_text(&self, width: usize) -> String {
        let label_width = self.axes.iter().map(|a| a.label.len()).max().unwrap_or(0);
        let mut out = String::new();
        for axis in &self.axes {
            let filled = (axis.value.clamp(0.0, 1.0) * width as f64).round() as usize;
            let _ = writeln!(
                out,
                "{:<lw$}  {}{}  {:.2}",
                axis.label,
                "█".repeat(filled),
                "░".repeat(width - filled),
                axis.value,
                lw = label_width
            );
        }
        out
    }
}
