pub mod parse_menu;
pub mod parse_menu_method_not_allowed;
