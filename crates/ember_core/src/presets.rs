//! Built-in scenes.
//!
//! The camera looks down +X from `(-1, 0, 0)` with +Z up in both scenes.

use ember_math::{Color, Vec3};

use crate::material::Material;
use crate::scene::{LightDesc, SceneDescription, Shape};

pub const OPEN: &str = "open";
pub const HEX_ROOM: &str = "hex-room";

/// Names accepted by [`SceneDescription::preset`].
pub const NAMES: &[&str] = &[OPEN, HEX_ROOM];

/// Two spheres over a ground plane, between a green wall and a mirror wall,
/// lit by a 4x4 ceiling light.
pub fn open() -> SceneDescription {
    let mut scene = SceneDescription::new(OPEN);

    scene.add_material("red", Material::lambert(Color::new(0.9, 0.2, 0.2)));
    scene.add_material("green", Material::lambert(Color::new(0.25, 0.6, 0.25)));
    scene.add_material("grey", Material::lambert(Color::new(0.8, 0.8, 0.8)));
    scene.add_material("mirror", Material::Mirror);

    scene.add_surface(sphere(Vec3::new(3.0, -0.4, -0.25), 0.5), "red");
    scene.add_surface(sphere(Vec3::new(4.6, 0.7, -0.10), 0.6), "mirror");

    // Ground, left wall, right mirror wall
    scene.add_surface(plane(Vec3::new(0.0, 0.0, -0.75), Vec3::Z), "grey");
    scene.add_surface(plane(Vec3::new(0.0, -1.2, 0.0), Vec3::Y), "green");
    scene.add_surface(plane(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y), "mirror");

    scene.add_light(ceiling_light(Color::ONE));
    scene
}

/// A closed hexagonal room with coloured and mirrored walls, two spheres,
/// a tetrahedron and a visible ceiling lamp.
pub fn hex_room() -> SceneDescription {
    let mut scene = SceneDescription::new(HEX_ROOM);

    scene.add_material("wall", Material::lambert(Color::splat(0.7)));
    scene.add_material("green", Material::lambert(Color::new(0.2, 0.9, 0.2)));
    scene.add_material("blue", Material::lambert(Color::new(0.2, 0.2, 0.9)));
    scene.add_material("red", Material::lambert(Color::new(0.9, 0.2, 0.2)));
    scene.add_material("yellow", Material::lambert(Color::new(0.9, 0.9, 0.2)));
    scene.add_material("mirror", Material::Mirror);
    scene.add_material("lamp", Material::emissive(Color::splat(1.5)));

    // Floor outline in the XY plane, walls run from z = -5 to z = 5
    let outline = [
        Vec3::new(0.0, 6.0, 0.0),
        Vec3::new(10.0, 6.0, 0.0),
        Vec3::new(13.0, 0.0, 0.0),
        Vec3::new(10.0, -6.0, 0.0),
        Vec3::new(0.0, -6.0, 0.0),
        Vec3::new(-3.0, 0.0, 0.0),
    ];
    let wall_materials = ["green", "mirror", "wall", "blue", "wall", "wall"];
    for (i, material) in wall_materials.iter().enumerate() {
        let a = outline[i];
        let b = outline[(i + 1) % outline.len()];
        let corner = Vec3::new(a.x, a.y, -5.0);
        scene.add_surface(
            parallelogram(corner, Vec3::new(0.0, 0.0, 10.0), b - a),
            *material,
        );
    }

    // Floor and ceiling: a central rectangle plus two triangular wedges
    for z in [-5.0, 5.0] {
        scene.add_surface(
            parallelogram(
                Vec3::new(0.0, -6.0, z),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(0.0, 12.0, 0.0),
            ),
            "wall",
        );
    }
    for z in [-5.0, 5.0] {
        scene.add_surface(
            triangle(Vec3::new(-3.0, 0.0, z), Vec3::new(0.0, 6.0, z), Vec3::new(0.0, -6.0, z)),
            "wall",
        );
        scene.add_surface(
            triangle(Vec3::new(10.0, 6.0, z), Vec3::new(13.0, 0.0, z), Vec3::new(10.0, -6.0, z)),
            "wall",
        );
    }

    scene.add_surface(sphere(Vec3::new(5.0, 0.0, -3.0), 0.8), "red");
    scene.add_surface(sphere(Vec3::new(5.0, 2.0, -3.0), 0.65), "mirror");

    // Tetrahedron
    let a = Vec3::new(5.3, -3.0, -4.0);
    let b = Vec3::new(5.6, -1.5, -4.0);
    let c = Vec3::new(5.3, -3.0, 0.3);
    let d = Vec3::new(5.3, -2.2, -4.0);
    for (p, q, r) in [(a, b, c), (a, c, d), (a, d, b), (b, d, c)] {
        scene.add_surface(triangle(p, q, r), "yellow");
    }

    // Visible lamp hanging just below the sampled ceiling light
    scene.add_surface(
        parallelogram(
            Vec3::new(2.0, -2.0, 4.9),
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
        ),
        "lamp",
    );
    scene.add_light(ceiling_light(Color::splat(1.3)));

    scene
}

/// 4x4 light at z = 5 centred near (4, 0), shining down.
fn ceiling_light(radiance: Color) -> LightDesc {
    LightDesc {
        corner: Vec3::new(2.0, -2.0, 5.0),
        edge1: Vec3::new(0.0, 4.0, 0.0),
        edge2: Vec3::new(4.0, 0.0, 0.0),
        normal: Some(-Vec3::Z),
        radiance,
    }
}

fn sphere(center: Vec3, radius: f64) -> Shape {
    Shape::Sphere { center, radius }
}

fn plane(point: Vec3, normal: Vec3) -> Shape {
    Shape::Plane { point, normal }
}

fn parallelogram(corner: Vec3, edge1: Vec3, edge2: Vec3) -> Shape {
    Shape::Parallelogram { corner, edge1, edge2 }
}

fn triangle(v0: Vec3, v1: Vec3, v2: Vec3) -> Shape {
    Shape::Triangle { v0, v1, v2 }
}
