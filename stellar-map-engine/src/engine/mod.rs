pub mod assets;
pub mod camera;
pub mod core;
pub mod hierarchy;
pub mod loading;
pub mod orbit;
pub mod overview;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod session;
pub mod speed;
pub mod systems;
