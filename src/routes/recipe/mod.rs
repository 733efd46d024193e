mod handler;
mod model;

pub use handler::{
    add_favorite, create_recipe, create_tried, get_recipe, list_favorites, list_recipes,
    list_recommendations, list_tried, remove_favorite,
};
