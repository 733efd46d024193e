mod handler;
mod model;

pub use handler::{
    create_ingredient, delete_my_ingredient, get_ingredient, list_ingredients,
    list_my_ingredients, put_my_ingredient,
};
