/// Asset locations for the engine.
pub mod path;
