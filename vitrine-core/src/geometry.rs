/// Geometry primitives for the showcase scenes
use nalgebra::{Point3, Vector3};
use std::f32::consts::PI;

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(x: f32, y: f32, z: f32, nx: f32, ny: f32, nz: f32) -> Self {
        Self {
            position: Point3::new(x, y, z),
            normal: Vector3::new(nx, ny, nz),
        }
    }

    fn from_parts(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Build a flat-shaded triangle, normal taken from the winding
    fn flat(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> Self {
        let normal = (b - a).cross(&(c - a));
        let normal = normal.try_normalize(1e-12).unwrap_or_else(Vector3::z);
        Self::new(
            Vertex::from_parts(a, normal),
            Vertex::from_parts(b, normal),
            Vertex::from_parts(c, normal),
        )
    }

    /// Calculate the face normal from the triangle's vertices
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).normalize()
    }

    pub fn centroid(&self) -> Point3<f32> {
        let [a, b, c] = &self.vertices;
        Point3::from((a.position.coords + b.position.coords + c.position.coords) / 3.0)
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Axis-aligned box centered on the origin
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self::with_capacity(12);

        // (normal, corners in counter-clockwise order seen from outside)
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            ([0.0, 0.0, 1.0], [[-hx, -hy, hz], [hx, -hy, hz], [hx, hy, hz], [-hx, hy, hz]]),
            ([0.0, 0.0, -1.0], [[hx, -hy, -hz], [-hx, -hy, -hz], [-hx, hy, -hz], [hx, hy, -hz]]),
            ([0.0, 1.0, 0.0], [[-hx, hy, hz], [hx, hy, hz], [hx, hy, -hz], [-hx, hy, -hz]]),
            ([0.0, -1.0, 0.0], [[-hx, -hy, -hz], [hx, -hy, -hz], [hx, -hy, hz], [-hx, -hy, hz]]),
            ([1.0, 0.0, 0.0], [[hx, -hy, hz], [hx, -hy, -hz], [hx, hy, -hz], [hx, hy, hz]]),
            ([-1.0, 0.0, 0.0], [[-hx, -hy, -hz], [-hx, -hy, hz], [-hx, hy, hz], [-hx, hy, -hz]]),
        ];

        for ([nx, ny, nz], corners) in faces {
            let v = corners.map(|[x, y, z]| Vertex::new(x, y, z, nx, ny, nz));
            mesh.add_triangle(Triangle::new(v[0], v[1], v[2]));
            mesh.add_triangle(Triangle::new(v[0], v[2], v[3]));
        }

        mesh
    }

    /// Cube with equal sides
    pub fn cube(size: f32) -> Self {
        Self::cuboid(size, size, size)
    }

    /// Latitude/longitude sphere with smooth normals
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let point = |ix: u32, iy: u32| {
            let u = ix as f32 / width_segments as f32;
            let v = iy as f32 / height_segments as f32;
            let normal = Vector3::new(
                -(u * 2.0 * PI).cos() * (v * PI).sin(),
                (v * PI).cos(),
                (u * 2.0 * PI).sin() * (v * PI).sin(),
            );
            Vertex::from_parts(Point3::from(normal * radius), normal)
        };

        let mut mesh = Self::with_capacity((width_segments * height_segments * 2) as usize);
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = point(ix + 1, iy);
                let b = point(ix, iy);
                let c = point(ix, iy + 1);
                let d = point(ix + 1, iy + 1);

                // Poles collapse one triangle of each quad
                if iy != 0 {
                    mesh.add_triangle(Triangle::new(a, b, d));
                }
                if iy != height_segments - 1 {
                    mesh.add_triangle(Triangle::new(b, c, d));
                }
            }
        }

        mesh
    }

    /// Capped cylinder along the y axis
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let segments = radial_segments.max(3);
        let half = height / 2.0;
        let slope = (radius_bottom - radius_top) / height;

        let rim = |i: u32, radius: f32, y: f32| {
            let theta = i as f32 / segments as f32 * 2.0 * PI;
            Point3::new(radius * theta.sin(), y, radius * theta.cos())
        };
        let side_normal = |i: u32| {
            let theta = i as f32 / segments as f32 * 2.0 * PI;
            Vector3::new(theta.sin(), slope, theta.cos()).normalize()
        };

        let mut mesh = Self::with_capacity((segments * 4) as usize);
        for i in 0..segments {
            let top0 = Vertex::from_parts(rim(i, radius_top, half), side_normal(i));
            let top1 = Vertex::from_parts(rim(i + 1, radius_top, half), side_normal(i + 1));
            let bottom0 = Vertex::from_parts(rim(i, radius_bottom, -half), side_normal(i));
            let bottom1 = Vertex::from_parts(rim(i + 1, radius_bottom, -half), side_normal(i + 1));

            mesh.add_triangle(Triangle::new(top0, bottom0, top1));
            mesh.add_triangle(Triangle::new(bottom0, bottom1, top1));

            if radius_top > 0.0 {
                mesh.add_triangle(Triangle::flat(
                    Point3::new(0.0, half, 0.0),
                    rim(i, radius_top, half),
                    rim(i + 1, radius_top, half),
                ));
            }
            if radius_bottom > 0.0 {
                mesh.add_triangle(Triangle::flat(
                    Point3::new(0.0, -half, 0.0),
                    rim(i + 1, radius_bottom, -half),
                    rim(i, radius_bottom, -half),
                ));
            }
        }

        mesh
    }

    /// Regular icosahedron, each face subdivided `detail` times and pushed
    /// out to the circumscribed sphere
    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let vertices = [
            [-1.0, t, 0.0],
            [1.0, t, 0.0],
            [-1.0, -t, 0.0],
            [1.0, -t, 0.0],
            [0.0, -1.0, t],
            [0.0, 1.0, t],
            [0.0, -1.0, -t],
            [0.0, 1.0, -t],
            [t, 0.0, -1.0],
            [t, 0.0, 1.0],
            [-t, 0.0, -1.0],
            [-t, 0.0, 1.0],
        ];
        let faces = [
            [0, 11, 5],
            [0, 5, 1],
            [0, 1, 7],
            [0, 7, 10],
            [0, 10, 11],
            [1, 5, 9],
            [5, 11, 4],
            [11, 10, 2],
            [10, 7, 6],
            [7, 1, 8],
            [3, 9, 4],
            [3, 4, 2],
            [3, 2, 6],
            [3, 6, 8],
            [3, 8, 9],
            [4, 9, 5],
            [2, 4, 11],
            [6, 2, 10],
            [8, 6, 7],
            [9, 8, 1],
        ];
        Self::polyhedron(&vertices, &faces, radius, detail)
    }

    /// Regular tetrahedron, subdivided like [`Mesh::icosahedron`]
    pub fn tetrahedron(radius: f32, detail: u32) -> Self {
        let vertices = [
            [1.0, 1.0, 1.0],
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
        ];
        let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
        Self::polyhedron(&vertices, &faces, radius, detail)
    }

    fn polyhedron(vertices: &[[f32; 3]], faces: &[[usize; 3]], radius: f32, detail: u32) -> Self {
        let cols = detail as usize + 1;
        let project = |p: Vector3<f32>| Point3::from(p.normalize() * radius);

        let mut mesh = Self::with_capacity(faces.len() * cols * cols);
        for face in faces {
            let [a, b, c] = face.map(|i| Vector3::from(vertices[i]));

            // rows[i][j]: row i walks from the a-c edge towards c
            let rows: Vec<Vec<Vector3<f32>>> = (0..=cols)
                .map(|i| {
                    let start = a.lerp(&c, i as f32 / cols as f32);
                    let end = b.lerp(&c, i as f32 / cols as f32);
                    let row_len = cols - i;
                    (0..=row_len)
                        .map(|j| {
                            if row_len == 0 {
                                start
                            } else {
                                start.lerp(&end, j as f32 / row_len as f32)
                            }
                        })
                        .collect()
                })
                .collect();

            for i in 0..cols {
                for j in 0..2 * (cols - i) - 1 {
                    let k = j / 2;
                    let triangle = if j % 2 == 0 {
                        Triangle::flat(
                            project(rows[i][k + 1]),
                            project(rows[i + 1][k]),
                            project(rows[i][k]),
                        )
                    } else {
                        Triangle::flat(
                            project(rows[i][k + 1]),
                            project(rows[i + 1][k + 1]),
                            project(rows[i + 1][k]),
                        )
                    };
                    mesh.add_triangle(triangle);
                }
            }
        }

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuboid_faces_point_outward() {
        let mesh = Mesh::cuboid(2.0, 1.0, 0.5);
        assert_eq!(mesh.len(), 12);
        for triangle in &mesh.triangles {
            let outward = triangle.centroid().coords;
            assert!(triangle.calculate_normal().dot(&outward) > 0.0);
            assert!((triangle.calculate_normal() - triangle.vertices[0].normal).norm() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_vertices_on_surface() {
        let mesh = Mesh::uv_sphere(0.15, 16, 16);
        // Two triangles per quad, minus one per quad in each polar band
        assert_eq!(mesh.len(), 16 * 16 * 2 - 2 * 16);
        for vertex in mesh.triangles.iter().flat_map(|t| t.vertices.iter()) {
            assert!((vertex.position.coords.norm() - 0.15).abs() < 1e-5);
        }
    }

    #[test]
    fn test_polyhedron_subdivision_counts() {
        assert_eq!(Mesh::icosahedron(0.35, 0).len(), 20);
        assert_eq!(Mesh::icosahedron(0.35, 4).len(), 20 * 25);
        assert_eq!(Mesh::tetrahedron(0.25, 2).len(), 4 * 9);

        let mesh = Mesh::icosahedron(0.35, 4);
        for vertex in mesh.triangles.iter().flat_map(|t| t.vertices.iter()) {
            assert!((vertex.position.coords.norm() - 0.35).abs() < 1e-5);
        }
    }

    #[test]
    fn test_polyhedron_faces_point_outward() {
        for mesh in [Mesh::tetrahedron(1.0, 0), Mesh::tetrahedron(1.0, 2), Mesh::icosahedron(1.0, 1)] {
            for triangle in &mesh.triangles {
                assert!(triangle.calculate_normal().dot(&triangle.centroid().coords) > 0.0);
            }
        }
    }

    #[test]
    fn test_cylinder_counts() {
        let mesh = Mesh::cylinder(0.05, 0.05, 0.8, 8);
        assert_eq!(mesh.len(), 8 * 4);
    }
}
