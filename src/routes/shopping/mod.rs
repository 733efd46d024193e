mod handler;
mod model;

pub use handler::{
    create_item, create_shopping_list, delete_item, list_items, list_shopping_lists,
};
