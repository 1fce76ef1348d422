pub mod color;
pub mod help;
pub mod list;
pub mod milestone_path;
pub mod pet_shop;
pub mod planner_view;
pub mod popup;
pub mod settings_view;
pub mod status_bar;
pub mod tabs;
pub mod todo_list;
