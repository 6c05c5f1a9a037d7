pub mod mod_item;
pub mod purchase;
