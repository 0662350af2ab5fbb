pub mod pr_model;
pub mod user_input;
pub mod view;

pub type V2 = nalgebra::Vector2<f32>;
