pub mod details;
pub mod document;
pub mod links;
pub mod normalize;
