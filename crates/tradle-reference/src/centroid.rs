//! Planar centroids of country geometries
//!
//! Computed in degree space on unprojected lon/lat rings, the same way a GIS
//! library reports the centroid of an EPSG:4326 polygon:
//!
//! ```text
//! A  = ½ Σ (xᵢ·yᵢ₊₁ - xᵢ₊₁·yᵢ)
//! Cx = Σ (xᵢ + xᵢ₊₁)(xᵢ·yᵢ₊₁ - xᵢ₊₁·yᵢ) / 6A
//! Cy = Σ (yᵢ + yᵢ₊₁)(xᵢ·yᵢ₊₁ - xᵢ₊₁·yᵢ) / 6A
//! ```
//!
//! Shells add area, holes subtract it, independent of ring winding.

use tradle_core::Centroid;

/// GeoJSON position: `[longitude, latitude, ...]`
pub type Position = Vec<f64>;

/// Accumulated area moments
#[derive(Debug, Default, Clone, Copy)]
struct Moments {
    area: f64,
    x: f64,
    y: f64,
}

impl Moments {
    fn add(&mut self, other: Moments, sign: f64) {
        self.area += sign * other.area;
        self.x += sign * other.x;
        self.y += sign * other.y;
    }
}

/// Area moments of one ring, normalized to positive area
fn ring_moments(ring: &[Position]) -> Moments {
    let mut area = 0.0;
    let mut x = 0.0;
    let mut y = 0.0;

    for pair in ring.windows(2) {
        let (x0, y0) = (pair[0][0], pair[0][1]);
        let (x1, y1) = (pair[1][0], pair[1][1]);
        let cross = x0 * y1 - x1 * y0;
        area += cross;
        x += (x0 + x1) * cross;
        y += (y0 + y1) * cross;
    }

    // Closing edge, for rings that do not repeat their first position
    if let (Some(first), Some(last)) = (ring.first(), ring.last()) {
        if first[..2] != last[..2] {
            let cross = last[0] * first[1] - first[0] * last[1];
            area += cross;
            x += (last[0] + first[0]) * cross;
            y += (last[1] + first[1]) * cross;
        }
    }

    let sign = if area < 0.0 { -1.0 } else { 1.0 };
    Moments {
        area: sign * area / 2.0,
        x: sign * x / 6.0,
        y: sign * y / 6.0,
    }
}

fn polygon_moments(rings: &[Vec<Position>]) -> Moments {
    let mut total = Moments::default();
    for (i, ring) in rings.iter().enumerate() {
        let sign = if i == 0 { 1.0 } else { -1.0 };
        total.add(ring_moments(ring), sign);
    }
    total
}

fn vertex_mean(rings: impl Iterator<Item = Position>) -> Option<Centroid> {
    let (mut sum_x, mut sum_y, mut n) = (0.0, 0.0, 0usize);
    for p in rings {
        sum_x += p[0];
        sum_y += p[1];
        n += 1;
    }
    (n > 0).then(|| Centroid::new(sum_y / n as f64, sum_x / n as f64))
}

fn from_moments(moments: Moments) -> Option<Centroid> {
    if moments.area.abs() < f64::EPSILON {
        return None;
    }
    Some(Centroid::new(moments.y / moments.area, moments.x / moments.area))
}

fn well_formed(rings: &[Vec<Position>]) -> bool {
    rings.iter().flatten().all(|p| p.len() >= 2)
}

/// Centroid of a polygon (shell first, then holes)
pub fn polygon_centroid(rings: &[Vec<Position>]) -> Option<Centroid> {
    if !well_formed(rings) {
        return None;
    }
    from_moments(polygon_moments(rings))
        .or_else(|| vertex_mean(rings.first()?.iter().cloned()))
}

/// Area-weighted centroid of a multipolygon
pub fn multi_polygon_centroid(polygons: &[Vec<Vec<Position>>]) -> Option<Centroid> {
    if !polygons.iter().all(|p| well_formed(p)) {
        return None;
    }
    let mut total = Moments::default();
    for polygon in polygons {
        total.add(polygon_moments(polygon), 1.0);
    }
    from_moments(total).or_else(|| {
        vertex_mean(
            polygons
                .iter()
                .filter_map(|p| p.first())
                .flat_map(|ring| ring.iter().cloned()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Vec<Position> {
        vec![
            vec![x0, y0],
            vec![x0 + size, y0],
            vec![x0 + size, y0 + size],
            vec![x0, y0 + size],
            vec![x0, y0],
        ]
    }

    fn assert_close(c: Centroid, lat: f64, lon: f64) {
        assert!((c.latitude - lat).abs() < 1e-9, "latitude {} != {}", c.latitude, lat);
        assert!((c.longitude - lon).abs() < 1e-9, "longitude {} != {}", c.longitude, lon);
    }

    #[test]
    fn test_square_centroid() {
        let c = polygon_centroid(&[square(10.0, 20.0, 4.0)]).unwrap();
        assert_close(c, 22.0, 12.0);
    }

    #[test]
    fn test_winding_does_not_matter() {
        let mut ring = square(10.0, 20.0, 4.0);
        ring.reverse();
        let c = polygon_centroid(&[ring]).unwrap();
        assert_close(c, 22.0, 12.0);
    }

    #[test]
    fn test_unclosed_ring() {
        let mut ring = square(0.0, 0.0, 2.0);
        ring.pop();
        let c = polygon_centroid(&[ring]).unwrap();
        assert_close(c, 1.0, 1.0);
    }

    #[test]
    fn test_hole_shifts_centroid() {
        // 4x4 shell with the left 2x4 half cut out leaves the right half
        let shell = square(0.0, 0.0, 4.0);
        let hole = vec![
            vec![0.0, 0.0],
            vec![0.0, 4.0],
            vec![2.0, 4.0],
            vec![2.0, 0.0],
            vec![0.0, 0.0],
        ];
        let c = polygon_centroid(&[shell, hole]).unwrap();
        assert_close(c, 2.0, 3.0);
    }

    #[test]
    fn test_multipolygon_area_weighted() {
        // Big square (area 16) centred at (2, 2), small one (area 4) at (11, 1)
        let polygons = vec![vec![square(0.0, 0.0, 4.0)], vec![square(10.0, 0.0, 2.0)]];
        let c = multi_polygon_centroid(&polygons).unwrap();
        assert_close(c, (16.0 * 2.0 + 4.0 * 1.0) / 20.0, (16.0 * 2.0 + 4.0 * 11.0) / 20.0);
    }

    #[test]
    fn test_degenerate_ring_falls_back_to_vertices() {
        let line = vec![vec![0.0, 0.0], vec![2.0, 2.0], vec![0.0, 0.0]];
        let c = polygon_centroid(&[line]).unwrap();
        assert_close(c, 2.0 / 3.0, 2.0 / 3.0);
    }

    #[test]
    fn test_malformed_positions_rejected() {
        assert!(polygon_centroid(&[vec![vec![1.0], vec![2.0]]]).is_none());
        assert!(polygon_centroid(&[]).is_none());
    }
}
