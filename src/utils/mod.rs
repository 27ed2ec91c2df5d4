pub mod headless;
pub mod vector3d;
