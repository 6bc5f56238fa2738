use crate::sampling::SamplePoint;

/// Area of a simple polygon by the shoelace formula.
///
/// The last vertex connects back to the first. The result is unsigned, so
/// it does not depend on winding direction or on which vertex comes first.
/// Fewer than three vertices enclose no area.
pub fn polygon_area(vertices: &[SamplePoint]) -> f64 {
    if vertices.len() < 3 {
        return 0.0;
    }
    let twice: f64 = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum();
    twice.abs() / 2.0
}
