use serde_derive::{Deserialize, Serialize};

use super::{edge::EdgeData, DynamicGraph, VertexId};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Coordinate,
    max: Coordinate,
}

impl BoundingBox {
    /// Box spanned by two opposite corners, in any order.
    pub fn new(a: Coordinate, b: Coordinate) -> BoundingBox {
        BoundingBox {
            min: Coordinate::new(a.latitude.min(b.latitude), a.longitude.min(b.longitude)),
            max: Coordinate::new(a.latitude.max(b.latitude), a.longitude.max(b.longitude)),
        }
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        (self.min.latitude..=self.max.latitude).contains(&coordinate.latitude)
            && (self.min.longitude..=self.max.longitude).contains(&coordinate.longitude)
    }

    /// Whether the straight segment `a - b` touches the box (Liang-Barsky
    /// clipping).
    pub fn intersects_segment(&self, a: &Coordinate, b: &Coordinate) -> bool {
        if self.contains(a) || self.contains(b) {
            return true;
        }

        let delta_longitude = b.longitude - a.longitude;
        let delta_latitude = b.latitude - a.latitude;
        let boundaries = [
            (-delta_longitude, a.longitude - self.min.longitude),
            (delta_longitude, self.max.longitude - a.longitude),
            (-delta_latitude, a.latitude - self.min.latitude),
            (delta_latitude, self.max.latitude - a.latitude),
        ];

        let mut enter = 0.0f64;
        let mut exit = 1.0f64;
        for (p, q) in boundaries {
            if p == 0.0 {
                if q < 0.0 {
                    return false;
                }
                continue;
            }
            let ratio = q / p;
            if p < 0.0 {
                if ratio > exit {
                    return false;
                }
                enter = enter.max(ratio);
            } else {
                if ratio < enter {
                    return false;
                }
                exit = exit.min(ratio);
            }
        }

        enter <= exit
    }
}

/// All records whose segment lies inside or crosses `bounding_box`. Records
/// touching a vertex without coordinate are skipped.
pub fn arcs_in_box<G: DynamicGraph + ?Sized>(
    graph: &G,
    bounding_box: &BoundingBox,
) -> Vec<(VertexId, VertexId, EdgeData)> {
    let mut arcs = Vec::new();

    for tail in graph.vertices() {
        let (Some(tail_coordinate), Some(tail_arcs)) = (graph.coordinate(tail), graph.arcs(tail))
        else {
            continue;
        };

        for arc in tail_arcs {
            let Some(head_coordinate) = graph.coordinate(arc.head) else {
                continue;
            };
            if bounding_box.intersects_segment(&tail_coordinate, &head_coordinate) {
                arcs.push((tail, arc.head, arc.data));
            }
        }
    }

    arcs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Coordinate::new(1.0, 1.0), Coordinate::new(0.0, 0.0))
    }

    #[test]
    fn segment_inside_and_outside() {
        let bounding_box = unit_box();
        assert!(bounding_box.intersects_segment(
            &Coordinate::new(0.2, 0.2),
            &Coordinate::new(0.4, 0.9)
        ));
        assert!(!bounding_box.intersects_segment(
            &Coordinate::new(2.0, 2.0),
            &Coordinate::new(3.0, 2.5)
        ));
    }

    #[test]
    fn segment_crossing_without_endpoint_inside() {
        let bounding_box = unit_box();
        assert!(bounding_box.intersects_segment(
            &Coordinate::new(-1.0, 0.5),
            &Coordinate::new(2.0, 0.5)
        ));
        // passes beside the corner
        assert!(!bounding_box.intersects_segment(
            &Coordinate::new(1.5, -1.0),
            &Coordinate::new(3.0, 0.5)
        ));
    }
}
