//! Polygon → `Coords` element, per schema version.
//!
//! ```text
//! 2017-07-15   <Coords points="10,5 30,5 30,13 10,13"/>
//! 2010-03-19   <Coords><Point x="10" y="5"/> … 4 children … </Coords>
//! ```
//!
//! Point order is preserved exactly as given (top-left, top-right,
//! bottom-right, bottom-left for every polygon the builder produces).

use crate::geometry::Polygon;
use crate::schema::SchemaVersion;
use crate::xml::Element;

/// Encode `polygon` as a `Coords` element using the convention of `version`.
pub fn encode_coords(version: SchemaVersion, polygon: &Polygon) -> Element {
    let coords = Element::new("Coords");
    match version {
        SchemaVersion::V2017 => coords.with_attr("points", format_points(polygon)),
        SchemaVersion::V2010 => polygon.points().iter().fold(coords, |coords, p| {
            coords.with_child(
                Element::new("Point")
                    .with_attr("x", p.x.to_string())
                    .with_attr("y", p.y.to_string()),
            )
        }),
    }
}

/// Render points as `"x,y"` pairs joined by single spaces.
pub fn format_points(polygon: &Polygon) -> String {
    polygon
        .points()
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
