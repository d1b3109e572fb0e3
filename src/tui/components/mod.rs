// Chrome drawn around the stacked components

pub mod crumbs;
pub mod flash_bar;
pub mod menu;
pub mod splash;
pub mod sub_menu;
